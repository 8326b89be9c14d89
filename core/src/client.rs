//! Stateless HTTP request builder and response parser for the EduLoop API.
//!
//! # Design
//! `ApiClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip, keeping this layer
//! deterministic and free of I/O.

use ureq::http::Uri;

use crate::endpoint::mark_read_path;
use crate::error::FetchError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::shape::Shape;

/// Synchronous, stateless client for the EduLoop API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a GET for `endpoint`, a path relative to the base origin.
    ///
    /// A single leading `/` is tolerated. An empty endpoint or a composed URL
    /// that is not an absolute http(s) URI is `InvalidUrl`.
    pub fn build_fetch(&self, endpoint: &str) -> Result<HttpRequest, FetchError> {
        let url = self.compose(endpoint)?;
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: vec![("accept".to_string(), "application/json".to_string())],
            body: None,
        })
    }

    /// Build the POST that marks notification `id` as read. No body.
    pub fn build_mark_read(&self, id: i64) -> Result<HttpRequest, FetchError> {
        let url = self.compose(&mark_read_path(id))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url,
            headers: Vec::new(),
            body: None,
        })
    }

    /// Check the status and decode the body into `S`.
    pub fn parse_fetch<S: Shape>(&self, response: HttpResponse) -> Result<S, FetchError> {
        check_status(&response)?;
        serde_json::from_slice(&response.body).map_err(|e| FetchError::DecodeMismatch {
            shape: S::NAME,
            message: e.to_string(),
        })
    }

    /// `true` on any 2xx; the response body is ignored.
    pub fn parse_mark_read(&self, response: HttpResponse) -> Result<bool, FetchError> {
        check_status(&response)?;
        Ok(true)
    }

    fn compose(&self, endpoint: &str) -> Result<String, FetchError> {
        let endpoint = endpoint.strip_prefix('/').unwrap_or(endpoint);
        if endpoint.is_empty() {
            return Err(FetchError::InvalidUrl("endpoint is empty".to_string()));
        }
        let url = format!("{}/{endpoint}", self.base_url);
        let uri: Uri = url
            .parse()
            .map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;
        match uri.scheme_str() {
            Some("http") | Some("https") => {}
            _ => return Err(FetchError::InvalidUrl(format!("{url}: expected http or https"))),
        }
        if uri.authority().is_none() {
            return Err(FetchError::InvalidUrl(format!("{url}: missing host")));
        }
        Ok(url)
    }
}

fn check_status(response: &HttpResponse) -> Result<(), FetchError> {
    if response.is_success() {
        return Ok(());
    }
    Err(FetchError::BadStatus {
        status: response.status,
        body: response.body_text().into_owned(),
    })
}
