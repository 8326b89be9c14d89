use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Homework {
    pub id: i64,
    pub title: String,
    pub due_date: String,
    pub status: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BringItem {
    pub id: i64,
    pub title: String,
    pub due_date: String,
    pub status: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    pub title: String,
    pub message: String,
    pub time: String,
    pub is_read: bool,
    pub avatar: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub description: String,
    pub image: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    pub marks: String,
    pub achievement: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Report {
    pub subjects: Vec<Subject>,
}

/// Everything the server hands out. Only notifications change at runtime.
pub struct Seed {
    pub homework: Vec<Homework>,
    pub bring_items: Vec<BringItem>,
    pub upcoming: Vec<Event>,
    pub ongoing: Vec<Event>,
    pub past: Vec<Event>,
    pub term_report: Report,
    pub monthly_exams: Report,
    pub notifications: RwLock<Vec<Notification>>,
}

pub type Db = Arc<Seed>;

pub fn app() -> Router {
    app_with(Seed::school())
}

pub fn app_with(seed: Seed) -> Router {
    let db: Db = Arc::new(seed);
    let api = Router::new()
        .route("/homework", get(list_homework))
        .route("/bring-items", get(list_bring_items))
        .route("/events/upcoming", get(list_upcoming))
        .route("/events/ongoing", get(list_ongoing))
        .route("/events/past", get(list_past))
        .route("/notifications", get(list_notifications))
        .route("/notifications/{id}/read", post(mark_read))
        .route("/term-reports", get(term_report))
        .route("/monthly-exams", get(monthly_exams))
        .with_state(db);
    Router::new().nest("/api", api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_homework(State(db): State<Db>) -> Json<Vec<Homework>> {
    Json(db.homework.clone())
}

async fn list_bring_items(State(db): State<Db>) -> Json<Vec<BringItem>> {
    Json(db.bring_items.clone())
}

async fn list_upcoming(State(db): State<Db>) -> Json<Vec<Event>> {
    Json(db.upcoming.clone())
}

async fn list_ongoing(State(db): State<Db>) -> Json<Vec<Event>> {
    Json(db.ongoing.clone())
}

async fn list_past(State(db): State<Db>) -> Json<Vec<Event>> {
    Json(db.past.clone())
}

async fn list_notifications(State(db): State<Db>) -> Json<Vec<Notification>> {
    Json(db.notifications.read().await.clone())
}

async fn term_report(State(db): State<Db>) -> Json<Report> {
    Json(db.term_report.clone())
}

async fn monthly_exams(State(db): State<Db>) -> Json<Report> {
    Json(db.monthly_exams.clone())
}

async fn mark_read(State(db): State<Db>, Path(id): Path<i64>) -> StatusCode {
    let mut notifications = db.notifications.write().await;
    match notifications.iter_mut().find(|n| n.id == id) {
        Some(notification) => {
            notification.is_read = true;
            info!(id, "notification marked read");
            StatusCode::OK
        }
        None => StatusCode::NOT_FOUND,
    }
}

impl Seed {
    /// The sample school the app ships with.
    pub fn school() -> Self {
        let homework = vec![
            homework(
                1,
                "Science Book: Complete exercises on page 45 to 49.",
                "Today, 12:00 PM",
                "Pending",
                "Assignment",
                "Complete exercises on page 45 to 49.",
            ),
            homework(
                2,
                "Maths Workbook: Solve all problems",
                "Today, 3:30 PM",
                "Pending",
                "Project",
                "Finish your science group project summary.",
            ),
            homework(
                3,
                "English Essay",
                "Today, 5:00 PM",
                "Completed",
                "Essay",
                "Write an essay about your weekend.",
            ),
        ];
        let bring_items = vec![
            bring_item(1, "Get colors of Leaves (for Exam)", "Today"),
            bring_item(2, "The Water Cycle (A Model)", "Tomorrow"),
            bring_item(3, "The Human Body (A Model)", "Next Week"),
        ];
        let upcoming = vec![
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
        ];
        let ongoing = vec![event(
            3,
            "Spring Art Exhibition",
            "April 20-30, 2025",
            "All day",
            "Art Gallery",
            "A showcase of student artwork created during the spring semester.",
            "art_exhibition",
        )];
        let past = vec![
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
        ];
        let notifications = vec![
            notification(
                1,
                "Ms. Ann Davis",
                "Today's homework has been uploaded. Please check your assignments.",
                "Today",
                false,
                "teacher1",
            ),
            notification(
                2,
                "Mr. John Smith",
                "Tomorrow's science trip will be held for Math and English classes.",
                "Today",
                false,
                "teacher2",
            ),
            notification(
                3,
                "Ms. Ann Davis",
                "Reminder: Make sure you bring all of your science materials for tomorrow's lab session.",
                "Yesterday",
                true,
                "teacher1",
            ),
            notification(
                4,
                "Mr. Robert Johnson",
                "Bring lab coat, face mask, and safety goggles for tomorrow's chemistry experiment.",
                "Yesterday",
                true,
                "teacher3",
            ),
        ];
        let term_report = report(&[
            ("Maths", "95%", "Excellent"),
            ("Science", "87%", "Good"),
            ("English", "100%", "Outstanding"),
            ("Health", "92%", "Excellent"),
            ("Religion", "92%", "Excellent"),
            ("Art", "100%", "Excellent"),
            ("Drawing", "85%", "Excellent"),
            ("PE", "96%", "Excellent"),
        ]);
        let monthly_exams = report(&[
            ("Maths", "88%", "Good"),
            ("Science", "91%", "Excellent"),
            ("English", "94%", "Excellent"),
        ]);

        Self {
            homework,
            bring_items,
            upcoming,
            ongoing,
            past,
            term_report,
            monthly_exams,
            notifications: RwLock::new(notifications),
        }
    }
}

fn homework(
    id: i64,
    title: &str,
    due: &str,
    status: &str,
    kind: &str,
    description: &str,
) -> Homework {
    Homework {
        id,
        title: title.to_string(),
        due_date: due.to_string(),
        status: status.to_string(),
        kind: Some(kind.to_string()),
        description: Some(description.to_string()),
    }
}

fn bring_item(id: i64, title: &str, due: &str) -> BringItem {
    BringItem {
        id,
        title: title.to_string(),
        due_date: due.to_string(),
        status: "Pending".to_string(),
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
) -> Event {
    Event {
        id,
        title: title.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        location: location.to_string(),
        description: description.to_string(),
        image: image.to_string(),
    }
}

fn notification(
    id: i64,
    title: &str,
    message: &str,
    time: &str,
    is_read: bool,
    avatar: &str,
) -> Notification {
    Notification {
        id,
        title: title.to_string(),
        message: message.to_string(),
        time: time.to_string(),
        is_read,
        avatar: avatar.to_string(),
    }
}

fn report(rows: &[(&str, &str, &str)]) -> Report {
    Report {
        subjects: rows
            .iter()
            .map(|&(name, marks, achievement)| Subject {
                name: name.to_string(),
                marks: marks.to_string(),
                achievement: achievement.to_string(),
            })
            .collect(),
    }
}
