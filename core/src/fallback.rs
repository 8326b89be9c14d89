//! Placeholder data screens show when a fetch fails.
//!
//! This lives beside the client, not inside it: `RemoteDataClient` always
//! returns success or a classified error, and each screen decides whether to
//! substitute these lists.

use tracing::warn;

use crate::endpoint::{EventFilter, ReportKind};
use crate::error::FetchError;
use crate::types::{BringItem, EventDetail, HomeworkItem, NotificationItem, ReportData, Subject};

/// Return the fetched value, or log the failure and use `fallback`.
pub fn resolve<S>(result: Result<S, FetchError>, fallback: impl FnOnce() -> S) -> S {
    match result {
        Ok(value) => value,
        Err(err) => {
            warn!(kind = err.kind().as_str(), error = %err, "using placeholder data");
            fallback()
        }
    }
}

pub fn homework() -> Vec<HomeworkItem> {
    let item = |id, title: &str, due: &str, status: &str, kind: &str, description: &str| {
        HomeworkItem {
            id,
            title: title.to_string(),
            due_date: due.to_string(),
            status: status.to_string(),
            kind: Some(kind.to_string()),
            description: Some(description.to_string()),
        }
    };
    vec![
        item(
            1,
            "Science Book: Complete exercises on page 45 to 49.",
            "Today, 12:00 PM",
            "Pending",
            "Assignment",
            "Complete exercises on page 45 to 49.",
        ),
        item(
            2,
            "Maths Workbook: Solve all problems",
            "Today, 3:30 PM",
            "Pending",
            "Project",
            "Finish your science group project summary.",
        ),
        item(
            3,
            "English Essay",
            "Today, 5:00 PM",
            "Completed",
            "Essay",
            "Write an essay about your weekend.",
        ),
    ]
}

pub fn bring_items() -> Vec<BringItem> {
    [
        (1, "Get colors of Leaves (for Exam)", "Today"),
        (2, "The Water Cycle (A Model)", "Tomorrow"),
        (3, "The Human Body (A Model)", "Next Week"),
    ]
    .into_iter()
    .map(|(id, title, due)| BringItem {
        id,
        title: title.to_string(),
        due_date: due.to_string(),
        status: "Pending".to_string(),
    })
    .collect()
}

pub fn notifications() -> Vec<NotificationItem> {
    let item = |id, title: &str, message: &str, time: &str, is_read, avatar: &str| {
        NotificationItem {
            id,
            title: title.to_string(),
            message: message.to_string(),
            time: time.to_string(),
            is_read,
            avatar: avatar.to_string(),
        }
    };
    vec![
        item(
            1,
            "Ms. Ann Davis",
            "Today's homework has been uploaded. Please check your assignments.",
            "Today",
            false,
            "teacher1",
        ),
        item(
            2,
            "Mr. John Smith",
            "Tomorrow's science trip will be held for Math and English classes.",
            "Today",
            false,
            "teacher2",
        ),
        item(
            3,
            "Ms. Ann Davis",
            "Reminder: Make sure you bring all of your science materials for tomorrow's lab session.",
            "Yesterday",
            true,
            "teacher1",
        ),
        item(
            4,
            "Mr. Robert Johnson",
            "Bring lab coat, face mask, and safety goggles for tomorrow's chemistry experiment.",
            "Yesterday",
            true,
            "teacher3",
        ),
    ]
}

pub fn events(filter: EventFilter) -> Vec<EventDetail> {
    match filter {
        EventFilter::Upcoming => vec![
            event(
                1,
                "Science Fair Competition",
                "May 10, 2025",
                "10:00 AM - 3:00 PM",
                "School Hall",
                "Join us for an exciting science fair where students will showcase their innovative projects.",
                "science_fair",
            ),
            event(
                2,
                "Chess Day Competition",
                "May 15, 2025",
                "9:00 AM - 5:00 PM",
                "Activity Room",
                "Annual chess tournament for all skill levels.",
                "chess_competition",
            ),
        ],
        EventFilter::Ongoing => vec![event(
            3,
            "Spring Art Exhibition",
            "April 20-30, 2025",
            "All day",
            "Art Gallery",
            "A showcase of student artwork created during the spring semester.",
            "art_exhibition",
        )],
        EventFilter::Past => vec![
            event(
                4,
                "Math Olympiad",
                "March 15, 2025",
                "9:00 AM - 1:00 PM",
                "Main Auditorium",
                "Annual mathematics competition for talented students.",
                "math_olympiad",
            ),
            event(
                5,
                "Sports Day",
                "February 28, 2025",
                "8:00 AM - 4:00 PM",
                "School Grounds",
                "Annual sports competition featuring various athletic events.",
                "sports_day",
            ),
        ],
    }
}

fn event(
    id: i64,
    title: &str,
    date: &str,
    time: &str,
    location: &str,
    description: &str,
    image: &str,
) -> EventDetail {
    EventDetail {
        id,
        title: title.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        location: location.to_string(),
        description: Some(description.to_string()),
        image: Some(image.to_string()),
    }
}

/// Both report tabs share one placeholder sheet.
pub fn report(_kind: ReportKind) -> ReportData {
    let subjects = [
        ("Maths", "95%", "Excellent"),
        ("Science", "87%", "Good"),
        ("English", "100%", "Outstanding"),
        ("Health", "92%", "Excellent"),
        ("Religion", "92%", "Excellent"),
        ("Art", "100%", "Excellent"),
        ("Drawing", "85%", "Excellent"),
        ("PE", "96%", "Excellent"),
    ]
    .into_iter()
    .map(|(name, marks, achievement)| Subject {
        name: name.to_string(),
        marks: marks.to_string(),
        achievement: achievement.to_string(),
    })
    .collect();
    ReportData { subjects }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{unread, ItemStatus};

    #[test]
    fn resolve_prefers_fetched_value() {
        let items = resolve(Ok(vec![]), bring_items);
        assert!(items.is_empty());
    }

    #[test]
    fn resolve_substitutes_on_error() {
        let err = FetchError::Transport("connection refused".into());
        let items = resolve(Err(err), bring_items);
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|i| i.status_kind() == ItemStatus::Pending));
    }

    #[test]
    fn placeholder_notifications_have_two_unread() {
        let items = notifications();
        assert_eq!(unread(&items).count(), 2);
    }

    #[test]
    fn placeholder_events_are_split_by_filter() {
        assert_eq!(events(EventFilter::Upcoming).len(), 2);
        assert_eq!(events(EventFilter::Ongoing).len(), 1);
        let past: Vec<i64> = events(EventFilter::Past).iter().map(|e| e.id).collect();
        assert_eq!(past, vec![4, 5]);
    }

    #[test]
    fn placeholder_report_lists_eight_subjects() {
        let report = report(ReportKind::Term);
        assert_eq!(report.subjects.len(), 8);
        assert_eq!(report.subjects[0].id(), "Maths");
    }

    #[test]
    fn placeholder_homework_has_one_completed() {
        let done = homework()
            .iter()
            .filter(|h| h.status_kind().is_completed())
            .count();
        assert_eq!(done, 1);
    }
}
