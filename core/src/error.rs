//! Error types for the EduLoop API client.
//!
//! # Design
//! Every failure is classified into one of four categories and surfaced to
//! the caller unchanged. 404 is not special-cased: the server does not
//! distinguish "already read" from "unknown id", so both land in `BadStatus`
//! and callers that care can inspect `status()`.

use thiserror::Error;

/// Errors returned by `ApiClient`, `Transport` and `RemoteDataClient`.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The base origin or the composed endpoint URL is malformed.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Connection-level failure: DNS, refused connection, timeout.
    #[error("transport failure: {0}")]
    Transport(String),

    /// A response arrived with a status outside 2xx.
    #[error("HTTP {status}: {body}")]
    BadStatus { status: u16, body: String },

    /// The body did not decode into the requested shape.
    #[error("response does not match {shape}: {message}")]
    DecodeMismatch { shape: &'static str, message: String },
}

/// Cause category of a `FetchError`, stable across the FFI boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidUrl,
    Transport,
    BadStatus,
    DecodeMismatch,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidUrl => "invalid-url",
            ErrorKind::Transport => "transport",
            ErrorKind::BadStatus => "bad-status",
            ErrorKind::DecodeMismatch => "decode-mismatch",
        }
    }
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::InvalidUrl(_) => ErrorKind::InvalidUrl,
            FetchError::Transport(_) => ErrorKind::Transport,
            FetchError::BadStatus { .. } => ErrorKind::BadStatus,
            FetchError::DecodeMismatch { .. } => ErrorKind::DecodeMismatch,
        }
    }

    /// HTTP status for `BadStatus`, `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::BadStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Malformed client configuration read from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a whole number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },

    #[error("{var} must not be empty")]
    EmptyBaseUrl { var: &'static str },
}
