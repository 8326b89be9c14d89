//! Typed fetches over a real transport.
//!
//! # Design
//! `RemoteDataClient` composes the sans-IO `ApiClient` with a `Transport`.
//! It holds no mutable state, so one value can be shared across threads and
//! every call is an independent one-shot: no retry, no cache, no fallback.
//! Screens construct it once at startup and receive it by reference.

use tracing::debug;

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::endpoint::{Endpoint, EventFilter, ReportKind};
use crate::error::FetchError;
use crate::http::HttpResponse;
use crate::shape::Shape;
use crate::transport::{Transport, UreqTransport};
use crate::types::{BringItem, EventDetail, HomeworkItem, NotificationItem, ReportData};

pub struct RemoteDataClient<T = UreqTransport> {
    api: ApiClient,
    transport: T,
}

impl RemoteDataClient<UreqTransport> {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_transport(
            ApiClient::new(&config.base_url),
            UreqTransport::new(config.timeout),
        )
    }
}

impl<T: Transport> RemoteDataClient<T> {
    pub fn with_transport(api: ApiClient, transport: T) -> Self {
        Self { api, transport }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// GET `endpoint` and decode the body into `S`.
    pub fn fetch_typed<S: Shape>(&self, endpoint: &str) -> Result<S, FetchError> {
        let response = self.fetch_raw(endpoint)?;
        let result = self.api.parse_fetch(response);
        if let Err(err) = &result {
            debug!(endpoint, shape = S::NAME, kind = err.kind().as_str(), "fetch failed");
        }
        result
    }

    /// GET `endpoint` without decoding. Any status is returned as data; the
    /// caller must still run the response through `ApiClient::parse_fetch`.
    pub fn fetch_raw(&self, endpoint: &str) -> Result<HttpResponse, FetchError> {
        let request = self.api.build_fetch(endpoint)?;
        self.transport.execute(request)
    }

    /// Mark notification `id` as read on the server. Safe to repeat.
    pub fn mark_read(&self, id: i64) -> Result<bool, FetchError> {
        let request = self.api.build_mark_read(id)?;
        let response = self.transport.execute(request)?;
        self.api.parse_mark_read(response)
    }

    pub fn homework(&self) -> Result<Vec<HomeworkItem>, FetchError> {
        self.fetch_typed(Endpoint::Homework.path())
    }

    pub fn bring_items(&self) -> Result<Vec<BringItem>, FetchError> {
        self.fetch_typed(Endpoint::BringItems.path())
    }

    pub fn notifications(&self) -> Result<Vec<NotificationItem>, FetchError> {
        self.fetch_typed(Endpoint::Notifications.path())
    }

    pub fn events(&self, filter: EventFilter) -> Result<Vec<EventDetail>, FetchError> {
        self.fetch_typed(Endpoint::Events(filter).path())
    }

    pub fn report(&self, kind: ReportKind) -> Result<ReportData, FetchError> {
        self.fetch_typed(Endpoint::Reports(kind).path())
    }
}
