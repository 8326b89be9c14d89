//! End-to-end fetches against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every endpoint
//! through `RemoteDataClient` over real HTTP. Validates that the client's
//! records decode what the server actually sends.

use std::io::{BufRead, BufReader, Write};
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use eduloop_core::{
    fallback, unread, BringItem, ClientConfig, Endpoint, EventDetail, EventFilter, FetchError,
    HomeworkItem, ItemStatus, NotificationItem, RemoteDataClient, ReportData, ReportKind,
};

fn start_server() -> SocketAddr {
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

    addr
}

/// Answer a single connection with `response` verbatim, for payloads the
/// mock server would never produce.
fn serve_raw_once(response: Vec<u8>) -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut line = String::new();
        while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
            line.clear();
        }
        stream.write_all(&response).unwrap();
    });

    addr
}

fn client(addr: SocketAddr) -> RemoteDataClient {
    let config = ClientConfig::new(format!("http://{addr}/api"))
        .with_timeout(Some(Duration::from_secs(10)));
    RemoteDataClient::new(&config)
}

#[test]
fn every_known_endpoint_decodes() {
    let addr = start_server();
    let client = client(addr);

    let homework: Vec<HomeworkItem> = client.fetch_typed("homework").unwrap();
    assert_eq!(homework.len(), 3);
    assert_eq!(homework[2].status_kind(), ItemStatus::Completed);
    assert_eq!(homework[0].kind.as_deref(), Some("Assignment"));

    let bring: Vec<BringItem> = client.fetch_typed(Endpoint::BringItems.path()).unwrap();
    assert_eq!(bring, fallback::bring_items());

    for filter in [EventFilter::Upcoming, EventFilter::Ongoing, EventFilter::Past] {
        let events: Vec<EventDetail> = client.events(filter).unwrap();
        assert_eq!(events, fallback::events(filter), "{filter:?}");
    }

    let term: ReportData = client.report(ReportKind::Term).unwrap();
    assert_eq!(term, fallback::report(ReportKind::Term));
    let monthly: ReportData = client.report(ReportKind::Monthly).unwrap();
    assert!(!monthly.subjects.is_empty());
}

#[test]
fn mark_read_lifecycle() {
    let addr = start_server();
    let client = client(addr);

    let before: Vec<NotificationItem> = client.notifications().unwrap();
    assert_eq!(unread(&before).count(), 2);

    // Idempotent: the second call still succeeds.
    assert!(client.mark_read(1).unwrap());
    assert!(client.mark_read(1).unwrap());

    let after = client.notifications().unwrap();
    let unread_ids: Vec<i64> = unread(&after).map(|n| n.id).collect();
    assert_eq!(unread_ids, vec![2]);
}

#[test]
fn mark_read_unknown_id_is_bad_status() {
    let addr = start_server();
    let err = client(addr).mark_read(42).unwrap_err();
    assert!(matches!(err, FetchError::BadStatus { status: 404, .. }));
}

#[test]
fn unknown_endpoint_is_bad_status() {
    let addr = start_server();
    let err = client(addr)
        .fetch_typed::<Vec<HomeworkItem>>("meetings")
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[test]
fn wrong_shape_is_decode_mismatch() {
    let addr = start_server();
    // term-reports is an object, not a list of homework.
    let err = client(addr)
        .fetch_typed::<Vec<HomeworkItem>>("term-reports")
        .unwrap_err();
    assert!(matches!(err, FetchError::DecodeMismatch { .. }));
}

#[test]
fn unreachable_host_is_transport_error() {
    // Bind then drop so nothing listens on the port.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let config = ClientConfig::new(format!("http://{addr}/api"))
        .with_timeout(Some(Duration::from_secs(5)));
    let client = RemoteDataClient::new(&config);

    let started = Instant::now();
    let err = client.events(EventFilter::Upcoming).unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)), "{err:?}");
    assert!(started.elapsed() < Duration::from_secs(10));

    let events = fallback::resolve(Err(err), || fallback::events(EventFilter::Upcoming));
    assert_eq!(events.len(), 2);
}

#[test]
fn concurrent_fetches_share_one_client() {
    let addr = start_server();
    let client = client(addr);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| client.homework().map(|items| items.len())))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), 3);
        }
    });
}

#[test]
fn non_utf8_body_is_decode_mismatch() {
    let mut body = br#"[{"id":1,"title":"Caf"#.to_vec();
    body.push(0xE9);
    body.extend_from_slice(br#"","dueDate":"Today","status":"Pending"}]"#);
    let mut response = format!(
        "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n",
        body.len()
    )
    .into_bytes();
    response.extend_from_slice(&body);

    let addr = serve_raw_once(response);
    let err = client(addr).homework().unwrap_err();
    assert!(matches!(err, FetchError::DecodeMismatch { .. }), "{err:?}");
}

#[test]
fn stalled_server_is_cut_off_by_timeout() {
    // Connections queue in the backlog but are never accepted or answered.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let config = ClientConfig::new(format!("http://{addr}/api"))
        .with_timeout(Some(Duration::from_secs(1)));
    let client = RemoteDataClient::new(&config);

    let started = Instant::now();
    let err = client.homework().unwrap_err();
    let elapsed = started.elapsed();

    assert!(matches!(err, FetchError::Transport(_)), "{err:?}");
    assert!(elapsed >= Duration::from_millis(900), "{elapsed:?}");
    assert!(elapsed < Duration::from_secs(3), "{elapsed:?}");
    drop(listener);
}
