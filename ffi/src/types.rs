//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Requests mirror the core `HttpRequest` with C strings and raw arrays.
//! Decoded records do not get a C struct each: the core validates the body
//! against the requested `FfiShape`, then hands back canonical JSON that the
//! host decodes with its own model types. The error taxonomy crosses the
//! boundary as `FfiErrorCode`.

use std::ffi::CString;
use std::os::raw::c_char;

use eduloop_core::{
    ApiClient, BringItem, DashboardData, ErrorKind, EventDetail, FetchError, HomeworkItem,
    HttpMethod, HttpResponse, Meeting, NotificationItem, QuickLink, RemoteDataClient, ReportData,
    Shape,
};
use serde::Serialize;

/// Opaque handle to a `RemoteDataClient`. C callers receive a pointer to
/// this and pass it back into every FFI function.
pub struct FfiApiClient {
    pub(crate) inner: RemoteDataClient,
}

/// Copy `s` into a heap C string, dropping interior NULs.
pub(crate) fn to_c_string(s: String) -> *mut c_char {
    CString::new(s.replace('\0', ""))
        .unwrap_or_default()
        .into_raw()
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `eduloop_build_*`. The host executes it and passes the response
/// back through `eduloop_parse_*`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: eduloop_core::HttpRequest) -> *mut Self {
        let url = to_c_string(req.url);
        let body = match req.body {
            Some(b) => to_c_string(b),
            None => std::ptr::null_mut(),
        };

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: to_c_string(k),
                    value: to_c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url,
            headers,
            headers_len,
            body,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The host constructs this after executing a request and passes a pointer
/// to an `eduloop_parse_*` function. The FFI layer reads but does not free
/// these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

/// Decode targets selectable from C. Passed as `u32` so an out-of-range
/// value is reported as `UnknownShape` rather than being undefined.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiShape {
    HomeworkList = 0,
    BringItemList = 1,
    NotificationList = 2,
    EventDetailList = 3,
    Report = 4,
    Dashboard = 5,
    QuickLinkList = 6,
    MeetingList = 7,
}

impl TryFrom<u32> for FfiShape {
    type Error = u32;

    fn try_from(raw: u32) -> Result<Self, u32> {
        Ok(match raw {
            0 => FfiShape::HomeworkList,
            1 => FfiShape::BringItemList,
            2 => FfiShape::NotificationList,
            3 => FfiShape::EventDetailList,
            4 => FfiShape::Report,
            5 => FfiShape::Dashboard,
            6 => FfiShape::QuickLinkList,
            7 => FfiShape::MeetingList,
            other => return Err(other),
        })
    }
}

impl FfiShape {
    /// Decode `response` as this shape and re-encode it as canonical JSON.
    pub(crate) fn parse(self, api: &ApiClient, response: HttpResponse) -> Result<String, FetchError> {
        match self {
            FfiShape::HomeworkList => canonical::<Vec<HomeworkItem>>(api, response),
            FfiShape::BringItemList => canonical::<Vec<BringItem>>(api, response),
            FfiShape::NotificationList => canonical::<Vec<NotificationItem>>(api, response),
            FfiShape::EventDetailList => canonical::<Vec<EventDetail>>(api, response),
            FfiShape::Report => canonical::<ReportData>(api, response),
            FfiShape::Dashboard => canonical::<DashboardData>(api, response),
            FfiShape::QuickLinkList => canonical::<Vec<QuickLink>>(api, response),
            FfiShape::MeetingList => canonical::<Vec<Meeting>>(api, response),
        }
    }
}

fn canonical<S: Shape + Serialize>(api: &ApiClient, response: HttpResponse) -> Result<String, FetchError> {
    let value: S = api.parse_fetch(response)?;
    serde_json::to_string(&value).map_err(|e| FetchError::DecodeMismatch {
        shape: S::NAME,
        message: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiResult`. The first five mirror the core
/// taxonomy; the rest are boundary failures.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    InvalidUrl = 1,
    Transport = 2,
    BadStatus = 3,
    DecodeMismatch = 4,
    NullArg = 5,
    UnknownShape = 6,
    Panic = 7,
}

impl From<ErrorKind> for FfiErrorCode {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::InvalidUrl => FfiErrorCode::InvalidUrl,
            ErrorKind::Transport => FfiErrorCode::Transport,
            ErrorKind::BadStatus => FfiErrorCode::BadStatus,
            ErrorKind::DecodeMismatch => FfiErrorCode::DecodeMismatch,
        }
    }
}

/// Result envelope for every parse and fetch operation.
///
/// On success `error_code` is `Ok` and `error_message` is null. Fetches set
/// `json` to the decoded value; mark-read sets `read` and leaves `json` null.
/// On failure `error_code` names the category, `error_message` is a
/// human-readable C string, `http_status` is set for `BadStatus`.
#[repr(C)]
pub struct FfiResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub json: *mut c_char,
    pub read: bool,
}

impl FfiResult {
    fn boxed(self) -> *mut Self {
        Box::into_raw(Box::new(self))
    }

    fn failure(error_code: FfiErrorCode, http_status: u16, msg: String) -> *mut Self {
        FfiResult {
            error_code,
            error_message: to_c_string(msg),
            http_status,
            json: std::ptr::null_mut(),
            read: false,
        }
        .boxed()
    }

    /// Build a success result carrying a decoded value as JSON.
    pub(crate) fn ok_json(json: String) -> *mut Self {
        FfiResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            json: to_c_string(json),
            read: false,
        }
        .boxed()
    }

    /// Build a success result for mark-read.
    pub(crate) fn ok_read(read: bool) -> *mut Self {
        FfiResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            json: std::ptr::null_mut(),
            read,
        }
        .boxed()
    }

    pub(crate) fn from_error(err: FetchError) -> *mut Self {
        let status = err.status().unwrap_or(0);
        Self::failure(err.kind().into(), status, err.to_string())
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::failure(FfiErrorCode::NullArg, 0, format!("null argument: {name}"))
    }

    pub(crate) fn unknown_shape(raw: u32) -> *mut Self {
        Self::failure(FfiErrorCode::UnknownShape, 0, format!("unknown shape: {raw}"))
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::failure(FfiErrorCode::Panic, 0, msg.to_string())
    }
}
