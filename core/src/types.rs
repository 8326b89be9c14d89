//! Records returned by the EduLoop API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch schema drift between the two crates. JSON keys are
//! camelCase. Optional fields decode to `None` when absent or `null`, every
//! other field is required so a short object is rejected instead of being
//! partially populated. Unknown keys are ignored.
//!
//! Records are immutable from the client's point of view. Status labels and
//! read flags are changed in caller-owned copies.

use serde::{Deserialize, Serialize};

/// Dashboard shortcut tile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuickLink {
    pub id: i64,
    pub title: String,
    pub icon: String,
    pub color: String,
}

/// Event as shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub quick_links: Vec<QuickLink>,
    pub upcoming_events: Vec<Event>,
}

/// Event as listed on the events screen. `date` and `time` are display
/// strings such as "May 10, 2025" and "10:00 AM - 3:00 PM".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventDetail {
    pub id: i64,
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl From<EventDetail> for Event {
    fn from(detail: EventDetail) -> Self {
        Event {
            id: detail.id,
            title: detail.title,
            date: detail.date,
            time: detail.time,
            location: detail.location,
            description: detail.description,
            image: detail.image,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HomeworkItem {
    pub id: i64,
    pub title: String,
    pub due_date: String,
    pub status: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl HomeworkItem {
    pub fn status_kind(&self) -> ItemStatus {
        ItemStatus::from_label(&self.status)
    }
}

/// Something a student has to bring to school.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BringItem {
    pub id: i64,
    pub title: String,
    pub due_date: String,
    pub status: String,
}

impl BringItem {
    pub fn status_kind(&self) -> ItemStatus {
        ItemStatus::from_label(&self.status)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationItem {
    pub id: i64,
    pub title: String,
    pub message: String,
    pub time: String,
    pub is_read: bool,
    pub avatar: String,
}

/// Notifications not yet marked as read, in their original order.
pub fn unread(items: &[NotificationItem]) -> impl Iterator<Item = &NotificationItem> {
    items.iter().filter(|n| !n.is_read)
}

/// One row of a term report or monthly exam sheet. Marks are display
/// strings such as "95%".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subject {
    pub name: String,
    pub marks: String,
    pub achievement: String,
}

impl Subject {
    /// Subjects have no server id; the name identifies them within a report.
    pub fn id(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportData {
    pub subjects: Vec<Subject>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Meeting {
    pub id: i64,
    pub title: String,
    pub date: String,
    pub time: String,
    pub description: String,
    pub status: String,
}

/// Interpreted status label of a homework or bring item. Matching is
/// case-insensitive; unrecognised labels are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemStatus {
    Pending,
    Completed,
    Overdue,
    Other(String),
}

impl ItemStatus {
    pub fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "pending" => ItemStatus::Pending,
            "completed" => ItemStatus::Completed,
            "overdue" => ItemStatus::Overdue,
            _ => ItemStatus::Other(label.to_string()),
        }
    }

    /// Label written back into a record after a local status change.
    pub fn label(&self) -> &str {
        match self {
            ItemStatus::Pending => "Pending",
            ItemStatus::Completed => "Completed",
            ItemStatus::Overdue => "Overdue",
            ItemStatus::Other(label) => label,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, ItemStatus::Completed)
    }
}
