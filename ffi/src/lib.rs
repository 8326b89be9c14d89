//! C-ABI wrapper around `eduloop-core`.
//!
//! # Overview
//! Lets the mobile host either own the networking (build a request, execute
//! it with the platform HTTP stack, parse the response) or hand the whole
//! round-trip to Rust with `eduloop_fetch` / `eduloop_mark_read`. Blocking
//! calls must be issued from a background thread.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - A single `FfiResult` envelope conveys decoded JSON, the mark-read flag
//!   and classified errors uniformly.
//! - The host owns all returned pointers and must call the matching
//!   `eduloop_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::str::Utf8Error;

use eduloop_core::{ClientConfig, FetchError, HttpResponse, RemoteDataClient};

use types::*;

/// Borrow a C string as `&str`.
fn read_str<'a>(ptr: *const c_char) -> Result<&'a str, Utf8Error> {
    unsafe { CStr::from_ptr(ptr) }.to_str()
}

fn read_endpoint<'a>(ptr: *const c_char) -> Result<&'a str, FetchError> {
    read_str(ptr)
        .map_err(|e| FetchError::InvalidUrl(format!("endpoint is not valid UTF-8: {e}")))
}

/// Hand a build outcome to the host. On failure the error goes to
/// `out_error` when it is non-null and is freed otherwise.
fn finish_build(
    outcome: Result<*mut FfiHttpRequest, *mut FfiResult>,
    out_error: *mut *mut FfiResult,
) -> *mut FfiHttpRequest {
    let (request, error) = match outcome {
        Ok(request) => (request, std::ptr::null_mut()),
        Err(error) => (std::ptr::null_mut(), error),
    };
    if out_error.is_null() {
        eduloop_free_result(error);
    } else {
        unsafe { *out_error = error };
    }
    request
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a client bound to `base_url`, e.g. `http://10.0.2.2:5000/api`.
///
/// `timeout_secs` bounds each blocking call; `0` leaves the transport
/// default. The URL itself is validated per request. Returns null if
/// `base_url` is null or not UTF-8. Free with `eduloop_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn eduloop_client_new(base_url: *const c_char, timeout_secs: u32) -> *mut FfiApiClient {
    catch_unwind(|| {
        if base_url.is_null() {
            return std::ptr::null_mut();
        }
        let Ok(base_url) = read_str(base_url) else {
            return std::ptr::null_mut();
        };
        let timeout = (timeout_secs > 0).then(|| std::time::Duration::from_secs(timeout_secs.into()));
        let config = ClientConfig::new(base_url).with_timeout(timeout);
        let inner = RemoteDataClient::new(&config);
        Box::into_raw(Box::new(FfiApiClient { inner }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `eduloop_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn eduloop_client_free(client: *mut FfiApiClient) {
    if !client.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            drop(unsafe { Box::from_raw(client) });
        }));
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Build a GET for `endpoint` (e.g. `"homework"`, `"events/past"`).
///
/// Returns null on failure. If `out_error` is non-null it receives an
/// `FfiResult` naming the failure (`NullArg`, `InvalidUrl` or `Panic`), or
/// null on success; free it with `eduloop_free_result`. Free the request
/// with `eduloop_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn eduloop_build_fetch(
    client: *const FfiApiClient,
    endpoint: *const c_char,
    out_error: *mut *mut FfiResult,
) -> *mut FfiHttpRequest {
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return Err(FfiResult::null_arg("client"));
        }
        if endpoint.is_null() {
            return Err(FfiResult::null_arg("endpoint"));
        }
        let client = unsafe { &*client };
        read_endpoint(endpoint)
            .and_then(|endpoint| client.inner.api().build_fetch(endpoint))
            .map(FfiHttpRequest::from_core)
            .map_err(FfiResult::from_error)
    }))
    .unwrap_or_else(|_| Err(FfiResult::panic("panic in eduloop_build_fetch")));
    finish_build(outcome, out_error)
}

/// Build the POST that marks notification `id` as read.
///
/// Failures are reported as for `eduloop_build_fetch`.
#[unsafe(no_mangle)]
pub extern "C" fn eduloop_build_mark_read(
    client: *const FfiApiClient,
    id: i64,
    out_error: *mut *mut FfiResult,
) -> *mut FfiHttpRequest {
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return Err(FfiResult::null_arg("client"));
        }
        let client = unsafe { &*client };
        client
            .inner
            .api()
            .build_mark_read(id)
            .map(FfiHttpRequest::from_core)
            .map_err(FfiResult::from_error)
    }))
    .unwrap_or_else(|_| Err(FfiResult::panic("panic in eduloop_build_mark_read")));
    finish_build(outcome, out_error)
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. A null body is
/// read as empty. Bytes are copied as-is and checked when decoded.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() {
        Vec::new()
    } else {
        unsafe { CStr::from_ptr(resp.body) }.to_bytes().to_vec()
    };
    HttpResponse::new(resp.status, body)
}

/// Parse a fetch response as `shape` (an `FfiShape` discriminant).
///
/// On success `json` holds the decoded value re-encoded as JSON.
#[unsafe(no_mangle)]
pub extern "C" fn eduloop_parse_fetch(
    client: *const FfiApiClient,
    shape: u32,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return FfiResult::null_arg("client");
        }
        if response.is_null() {
            return FfiResult::null_arg("response");
        }
        let shape = match FfiShape::try_from(shape) {
            Ok(s) => s,
            Err(raw) => return FfiResult::unknown_shape(raw),
        };
        let client = unsafe { &*client };
        let core_resp = ffi_response_to_core(unsafe { &*response });
        match shape.parse(client.inner.api(), core_resp) {
            Ok(json) => FfiResult::ok_json(json),
            Err(e) => FfiResult::from_error(e),
        }
    }))
    .unwrap_or_else(|_| FfiResult::panic("panic in eduloop_parse_fetch"))
}

/// Parse a mark-read response. `read` is true on any 2xx.
#[unsafe(no_mangle)]
pub extern "C" fn eduloop_parse_mark_read(
    client: *const FfiApiClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return FfiResult::null_arg("client");
        }
        if response.is_null() {
            return FfiResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let core_resp = ffi_response_to_core(unsafe { &*response });
        match client.inner.api().parse_mark_read(core_resp) {
            Ok(read) => FfiResult::ok_read(read),
            Err(e) => FfiResult::from_error(e),
        }
    }))
    .unwrap_or_else(|_| FfiResult::panic("panic in eduloop_parse_mark_read"))
}

// ---------------------------------------------------------------------------
// Blocking round-trips
// ---------------------------------------------------------------------------

/// GET `endpoint` and decode it as `shape`, performing the I/O in Rust.
/// Blocks until a response arrives or the client's timeout elapses.
#[unsafe(no_mangle)]
pub extern "C" fn eduloop_fetch(
    client: *const FfiApiClient,
    shape: u32,
    endpoint: *const c_char,
) -> *mut FfiResult {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return FfiResult::null_arg("client");
        }
        if endpoint.is_null() {
            return FfiResult::null_arg("endpoint");
        }
        let shape = match FfiShape::try_from(shape) {
            Ok(s) => s,
            Err(raw) => return FfiResult::unknown_shape(raw),
        };
        let client = unsafe { &*client };
        let outcome = read_endpoint(endpoint)
            .and_then(|endpoint| client.inner.fetch_raw(endpoint))
            .and_then(|resp| shape.parse(client.inner.api(), resp));
        match outcome {
            Ok(json) => FfiResult::ok_json(json),
            Err(e) => FfiResult::from_error(e),
        }
    }))
    .unwrap_or_else(|_| FfiResult::panic("panic in eduloop_fetch"))
}

/// Mark notification `id` as read, performing the I/O in Rust.
#[unsafe(no_mangle)]
pub extern "C" fn eduloop_mark_read(client: *const FfiApiClient, id: i64) -> *mut FfiResult {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return FfiResult::null_arg("client");
        }
        let client = unsafe { &*client };
        match client.inner.mark_read(id) {
            Ok(read) => FfiResult::ok_read(read),
            Err(e) => FfiResult::from_error(e),
        }
    }))
    .unwrap_or_else(|_| FfiResult::panic("panic in eduloop_mark_read"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a request returned by any `eduloop_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn eduloop_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(AssertUnwindSafe(|| {
        let req = unsafe { Box::from_raw(req) };
        eduloop_free_string(req.url);
        eduloop_free_string(req.body);
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                eduloop_free_string(h.key);
                eduloop_free_string(h.value);
            }
        }
    }));
}

/// Free a result returned by any parse or fetch function. Safe to call
/// with null.
#[unsafe(no_mangle)]
pub extern "C" fn eduloop_free_result(result: *mut FfiResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(AssertUnwindSafe(|| {
        let result = unsafe { Box::from_raw(result) };
        eduloop_free_string(result.error_message);
        eduloop_free_string(result.json);
    }));
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn eduloop_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            drop(unsafe { CString::from_raw(s) });
        }));
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    fn new_client(base: &str) -> *mut FfiApiClient {
        let url = CString::new(base).unwrap();
        let client = eduloop_client_new(url.as_ptr(), 5);
        assert!(!client.is_null());
        client
    }

    fn c_str<'a>(ptr: *const c_char) -> &'a str {
        unsafe { CStr::from_ptr(ptr) }.to_str().unwrap()
    }

    fn parse(client: *const FfiApiClient, shape: FfiShape, status: u16, body: &str) -> *mut FfiResult {
        let body = CString::new(body).unwrap();
        let resp = FfiHttpResponse {
            status,
            body: body.as_ptr(),
        };
        eduloop_parse_fetch(client, shape as u32, &resp)
    }

    #[test]
    fn client_new_and_free() {
        let client = new_client("http://127.0.0.1:5000/api");
        eduloop_client_free(client);
    }

    #[test]
    fn client_new_null_returns_null() {
        let client = eduloop_client_new(std::ptr::null(), 0);
        assert!(client.is_null());
    }

    #[test]
    fn client_free_null_is_safe() {
        eduloop_client_free(std::ptr::null_mut());
    }

    #[test]
    fn build_fetch_returns_get_with_accept_header() {
        let client = new_client("http://127.0.0.1:5000/api");
        let endpoint = CString::new("events/upcoming").unwrap();
        let mut error: *mut FfiResult = std::ptr::null_mut();
        let req = eduloop_build_fetch(client, endpoint.as_ptr(), &mut error);
        assert!(!req.is_null());
        assert!(error.is_null());

        let req_ref = unsafe { &*req };
        assert!(matches!(req_ref.method, FfiHttpMethod::Get));
        assert_eq!(c_str(req_ref.url), "http://127.0.0.1:5000/api/events/upcoming");
        assert!(req_ref.body.is_null());
        assert_eq!(req_ref.headers_len, 1);
        let header = unsafe { &*req_ref.headers };
        assert_eq!(c_str(header.key), "accept");
        assert_eq!(c_str(header.value), "application/json");

        eduloop_free_request(req);
        eduloop_client_free(client);
    }

    #[test]
    fn build_fetch_empty_endpoint_reports_invalid_url() {
        let client = new_client("http://127.0.0.1:5000/api");
        let endpoint = CString::new("").unwrap();
        let mut error: *mut FfiResult = std::ptr::null_mut();
        assert!(eduloop_build_fetch(client, endpoint.as_ptr(), &mut error).is_null());

        assert!(!error.is_null());
        let e = unsafe { &*error };
        assert_eq!(e.error_code, FfiErrorCode::InvalidUrl);
        assert!(c_str(e.error_message).contains("empty"));

        eduloop_free_result(error);
        eduloop_client_free(client);
    }

    #[test]
    fn build_fetch_without_error_slot_returns_null() {
        let client = new_client("http://127.0.0.1:5000/api");
        let endpoint = CString::new("").unwrap();
        assert!(eduloop_build_fetch(client, endpoint.as_ptr(), std::ptr::null_mut()).is_null());
        eduloop_client_free(client);
    }

    #[test]
    fn build_fetch_null_client_reports_null_arg() {
        let endpoint = CString::new("homework").unwrap();
        let mut error: *mut FfiResult = std::ptr::null_mut();
        assert!(eduloop_build_fetch(std::ptr::null(), endpoint.as_ptr(), &mut error).is_null());

        let e = unsafe { &*error };
        assert_eq!(e.error_code, FfiErrorCode::NullArg);
        assert_eq!(c_str(e.error_message), "null argument: client");
        eduloop_free_result(error);
    }

    #[test]
    fn non_utf8_endpoint_is_invalid_url() {
        let client = new_client("http://127.0.0.1:5000/api");
        let endpoint = CString::new(b"home\xFFwork".to_vec()).unwrap();

        let mut error: *mut FfiResult = std::ptr::null_mut();
        assert!(eduloop_build_fetch(client, endpoint.as_ptr(), &mut error).is_null());
        let e = unsafe { &*error };
        assert_eq!(e.error_code, FfiErrorCode::InvalidUrl);
        assert!(c_str(e.error_message).contains("UTF-8"));
        eduloop_free_result(error);

        // Rejected before any I/O, so no server is needed.
        let result = eduloop_fetch(client, FfiShape::HomeworkList as u32, endpoint.as_ptr());
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::InvalidUrl);
        assert!(c_str(r.error_message).contains("UTF-8"));
        eduloop_free_result(result);

        eduloop_client_free(client);
    }

    #[test]
    fn non_utf8_base_url_returns_null_client() {
        let url = CString::new(b"http://caf\xE9/api".to_vec()).unwrap();
        assert!(eduloop_client_new(url.as_ptr(), 0).is_null());
    }

    #[test]
    fn build_mark_read_returns_bodyless_post() {
        let client = new_client("http://127.0.0.1:5000/api");
        let mut error: *mut FfiResult = std::ptr::null_mut();
        let req = eduloop_build_mark_read(client, 42, &mut error);
        assert!(!req.is_null());
        assert!(error.is_null());

        let req_ref = unsafe { &*req };
        assert!(matches!(req_ref.method, FfiHttpMethod::Post));
        assert_eq!(c_str(req_ref.url), "http://127.0.0.1:5000/api/notifications/42/read");
        assert!(req_ref.body.is_null());
        assert_eq!(req_ref.headers_len, 0);

        eduloop_free_request(req);
        eduloop_client_free(client);
    }

    #[test]
    fn parse_homework_returns_canonical_json() {
        let client = new_client("http://127.0.0.1:5000/api");
        let result = parse(
            client,
            FfiShape::HomeworkList,
            200,
            r#"[{"id":1,"title":"Essay","dueDate":"Today","status":"Pending","extra":1}]"#,
        );
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert!(r.error_message.is_null());

        let json: serde_json::Value = serde_json::from_str(c_str(r.json)).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "id": 1,
                "title": "Essay",
                "dueDate": "Today",
                "status": "Pending",
                "type": null,
                "description": null
            }])
        );

        eduloop_free_result(result);
        eduloop_client_free(client);
    }

    #[test]
    fn parse_report_object() {
        let client = new_client("http://127.0.0.1:5000/api");
        let result = parse(
            client,
            FfiShape::Report,
            200,
            r#"{"subjects":[{"name":"Art","marks":"100%","achievement":"Excellent"}]}"#,
        );
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        let json: serde_json::Value = serde_json::from_str(c_str(r.json)).unwrap();
        assert_eq!(json["subjects"][0]["name"], "Art");

        eduloop_free_result(result);
        eduloop_client_free(client);
    }

    #[test]
    fn parse_missing_field_is_decode_mismatch() {
        let client = new_client("http://127.0.0.1:5000/api");
        let result = parse(
            client,
            FfiShape::HomeworkList,
            200,
            r#"[{"id":1,"title":"Essay","dueDate":"Today"}]"#,
        );
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::DecodeMismatch);
        assert!(r.json.is_null());
        assert!(c_str(r.error_message).contains("status"));

        eduloop_free_result(result);
        eduloop_client_free(client);
    }

    #[test]
    fn parse_non_utf8_body_is_decode_mismatch() {
        let client = new_client("http://127.0.0.1:5000/api");
        let mut bytes = br#"[{"id":1,"title":"Caf"#.to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(br#"","dueDate":"Today","status":"Pending"}]"#);
        let body = CString::new(bytes).unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = eduloop_parse_fetch(client, FfiShape::HomeworkList as u32, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::DecodeMismatch);
        assert!(r.json.is_null());

        eduloop_free_result(result);
        eduloop_client_free(client);
    }

    #[test]
    fn parse_server_error_is_bad_status() {
        let client = new_client("http://127.0.0.1:5000/api");
        let result = parse(client, FfiShape::NotificationList, 500, "boom");
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::BadStatus);
        assert_eq!(r.http_status, 500);

        eduloop_free_result(result);
        eduloop_client_free(client);
    }

    #[test]
    fn parse_unknown_shape_is_reported() {
        let client = new_client("http://127.0.0.1:5000/api");
        let body = CString::new("[]").unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = eduloop_parse_fetch(client, 99, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::UnknownShape);

        eduloop_free_result(result);
        eduloop_client_free(client);
    }

    #[test]
    fn parse_null_response_is_null_arg() {
        let client = new_client("http://127.0.0.1:5000/api");
        let result = eduloop_parse_fetch(client, FfiShape::HomeworkList as u32, std::ptr::null());
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::NullArg);

        eduloop_free_result(result);
        eduloop_client_free(client);
    }

    #[test]
    fn parse_null_body_reads_as_empty() {
        let client = new_client("http://127.0.0.1:5000/api");
        let resp = FfiHttpResponse {
            status: 200,
            body: std::ptr::null(),
        };
        let result = eduloop_parse_fetch(client, FfiShape::BringItemList as u32, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::DecodeMismatch);
        eduloop_free_result(result);

        let result = eduloop_parse_mark_read(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert!(r.read);

        eduloop_free_result(result);
        eduloop_client_free(client);
    }

    #[test]
    fn parse_mark_read_not_found() {
        let client = new_client("http://127.0.0.1:5000/api");
        let body = CString::new("").unwrap();
        let resp = FfiHttpResponse {
            status: 404,
            body: body.as_ptr(),
        };
        let result = eduloop_parse_mark_read(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::BadStatus);
        assert_eq!(r.http_status, 404);
        assert!(!r.read);

        eduloop_free_result(result);
        eduloop_client_free(client);
    }

    #[test]
    fn fetch_and_mark_read_against_live_server() {
        let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = std_listener.local_addr().unwrap();
        std_listener.set_nonblocking(true).unwrap();
        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async {
                let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
                mock_server::run(listener).await
            })
            .unwrap();
        });

        let client = new_client(&format!("http://{addr}/api"));

        let endpoint = CString::new("notifications").unwrap();
        let result = eduloop_fetch(client, FfiShape::NotificationList as u32, endpoint.as_ptr());
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        let json: serde_json::Value = serde_json::from_str(c_str(r.json)).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 4);
        eduloop_free_result(result);

        for _ in 0..2 {
            let result = eduloop_mark_read(client, 2);
            let r = unsafe { &*result };
            assert_eq!(r.error_code, FfiErrorCode::Ok);
            assert!(r.read);
            eduloop_free_result(result);
        }

        let result = eduloop_mark_read(client, 42);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::BadStatus);
        assert_eq!(r.http_status, 404);
        eduloop_free_result(result);

        eduloop_client_free(client);
    }

    #[test]
    fn free_request_null_is_safe() {
        eduloop_free_request(std::ptr::null_mut());
    }

    #[test]
    fn free_result_null_is_safe() {
        eduloop_free_result(std::ptr::null_mut());
    }

    #[test]
    fn free_string_null_is_safe() {
        eduloop_free_string(std::ptr::null_mut());
    }
}
