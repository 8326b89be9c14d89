//! Typed API client core for the EduLoop school app.
//!
//! # Overview
//! Turns an endpoint name plus an expected record shape into a typed value
//! or a classified `FetchError`, and performs the one state-changing call
//! the app makes (mark a notification as read).
//!
//! # Design
//! - `ApiClient` is sans-IO: `build_*` produces an `HttpRequest`, `parse_*`
//!   consumes an `HttpResponse`. Hosts that own their networking stack
//!   (through the FFI crate) use it directly.
//! - `RemoteDataClient` pairs it with a `Transport` and is the value screens
//!   are handed at startup. It is stateless, `Send + Sync`, never retries.
//! - `Shape` is sealed so only the records in `types` can be requested.
//! - Placeholder data for failed fetches lives in `fallback`, outside the
//!   client's contract.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod fallback;
pub mod http;
pub mod remote;
pub mod shape;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use endpoint::{Endpoint, EventFilter, ReportKind};
pub use error::{ConfigError, ErrorKind, FetchError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use remote::RemoteDataClient;
pub use shape::Shape;
pub use transport::{Transport, UreqTransport};
pub use types::{
    unread, BringItem, DashboardData, Event, EventDetail, HomeworkItem, ItemStatus, Meeting,
    NotificationItem, QuickLink, ReportData, Subject,
};
