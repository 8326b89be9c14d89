//! The closed set of decode targets a caller may request.
//!
//! `Shape` is sealed: only the records in `types` and lists of them
//! implement it, so asking `fetch_typed` for anything else fails to compile.

use serde::de::DeserializeOwned;

use crate::types::{
    BringItem, DashboardData, Event, EventDetail, HomeworkItem, Meeting, NotificationItem,
    QuickLink, ReportData, Subject,
};

mod sealed {
    pub trait Sealed {}
}

/// A JSON structure `ApiClient::parse_fetch` knows how to decode.
pub trait Shape: DeserializeOwned + sealed::Sealed {
    /// Human-readable name used in `DecodeMismatch` errors.
    const NAME: &'static str;
}

macro_rules! shapes {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}
            impl Shape for $ty {
                const NAME: &'static str = $name;
            }
        )*
    };
}

shapes! {
    QuickLink => "QuickLink",
    Vec<QuickLink> => "QuickLink list",
    Event => "Event",
    Vec<Event> => "Event list",
    EventDetail => "EventDetail",
    Vec<EventDetail> => "EventDetail list",
    DashboardData => "DashboardData",
    HomeworkItem => "HomeworkItem",
    Vec<HomeworkItem> => "HomeworkItem list",
    BringItem => "BringItem",
    Vec<BringItem> => "BringItem list",
    NotificationItem => "NotificationItem",
    Vec<NotificationItem> => "NotificationItem list",
    Subject => "Subject",
    Vec<Subject> => "Subject list",
    ReportData => "ReportData",
    Meeting => "Meeting",
    Vec<Meeting> => "Meeting list",
}
