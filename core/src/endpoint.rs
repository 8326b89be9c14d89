//! Known endpoint names of the EduLoop API.
//!
//! `fetch_typed` accepts any relative path; these enums name the ones the
//! app actually calls so screens don't hardcode strings.

use std::fmt;

/// Which slice of the events calendar to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventFilter {
    #[default]
    Upcoming,
    Ongoing,
    Past,
}

/// Which report sheet to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportKind {
    #[default]
    Term,
    Monthly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    BringItems,
    Events(EventFilter),
    Homework,
    Notifications,
    Reports(ReportKind),
}

impl Endpoint {
    pub const ALL: [Endpoint; 8] = [
        Endpoint::BringItems,
        Endpoint::Events(EventFilter::Upcoming),
        Endpoint::Events(EventFilter::Ongoing),
        Endpoint::Events(EventFilter::Past),
        Endpoint::Homework,
        Endpoint::Notifications,
        Endpoint::Reports(ReportKind::Term),
        Endpoint::Reports(ReportKind::Monthly),
    ];

    pub fn path(self) -> &'static str {
        match self {
            Endpoint::BringItems => "bring-items",
            Endpoint::Events(EventFilter::Upcoming) => "events/upcoming",
            Endpoint::Events(EventFilter::Ongoing) => "events/ongoing",
            Endpoint::Events(EventFilter::Past) => "events/past",
            Endpoint::Homework => "homework",
            Endpoint::Notifications => "notifications",
            Endpoint::Reports(ReportKind::Term) => "term-reports",
            Endpoint::Reports(ReportKind::Monthly) => "monthly-exams",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Path of the mark-as-read action for one notification.
pub fn mark_read_path(id: i64) -> String {
    format!("notifications/{id}/read")
}
