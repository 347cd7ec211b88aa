//! Client tests against a minimal HTTP/1.1 stub server.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use super::*;
use crate::core::chat::Transcript;
use crate::core::filters::FilterField;
use crate::core::page::ListingEntry;

/// Canned response for one `METHOD /path` (query string ignored).
struct Route {
    method: &'static str,
    path: &'static str,
    status: u16,
    body: String,
}

fn route(method: &'static str, path: &'static str, status: u16, body: serde_json::Value) -> Route {
    Route {
        method,
        path,
        status,
        body: body.to_string(),
    }
}

/// Read one request: head up to the blank line, then `Content-Length` bytes of body.
fn read_request(stream: &mut TcpStream) -> Option<String> {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    let head_end = loop {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buf[..n]);
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };
    let head = String::from_utf8_lossy(&data[..head_end]).to_string();
    let len = head
        .lines()
        .find_map(|l| {
            let (name, value) = l.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);
    while data.len() < head_end + len {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
    }
    Some(String::from_utf8_lossy(&data).to_string())
}

/// Start a server in a background thread. Returns the base URL and a receiver
/// yielding every raw request it handled.
fn start(routes: Vec<Route>) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for mut stream in listener.incoming().flatten() {
            let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
            let Some(request) = read_request(&mut stream) else {
                continue;
            };
            let line = request.lines().next().unwrap_or_default().to_string();
            let mut parts = line.split_whitespace();
            let method = parts.next().unwrap_or_default();
            let target = parts.next().unwrap_or_default();
            let path = target.split('?').next().unwrap_or_default();
            let (status, body) = routes
                .iter()
                .find(|r| r.method == method && r.path == path)
                .map(|r| (r.status, r.body.clone()))
                .unwrap_or((404, r#"{"error":"no route"}"#.to_string()));
            let response = format!(
                "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
            let _ = tx.send(request);
        }
    });
    (format!("http://127.0.0.1:{}", port), rx)
}

fn client(base: &str) -> ApiClient {
    ApiClient::new(base, Duration::from_secs(5)).unwrap()
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Runtime::new().unwrap()
}

fn page_json(content: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "content": content,
        "totalPages": 3,
        "totalElements": 45,
        "size": 20,
        "number": 1,
        "first": false,
        "last": false
    })
}

#[test]
fn fetch_properties_sends_filter_query() {
    let body = page_json(serde_json::json!([
        {"id": 1, "price": 850000, "city": "Irvine"},
        {"id": 2, "price": 910000, "city": "Irvine"}
    ]));
    let (base, requests) = start(vec![route("GET", "/properties", 200, body)]);
    let mut filters = PropertyFilters::default();
    filters.set(FilterField::City, "Irvine").unwrap();
    filters.set(FilterField::MinBeds, "3").unwrap();
    filters.page = 1;

    let page = runtime()
        .block_on(client(&base).fetch_properties(&filters))
        .unwrap();
    assert_eq!(page.property_ids(), vec![1, 2]);
    assert_eq!(page.info().total_pages, 3);

    let req = requests.recv_timeout(Duration::from_secs(2)).unwrap();
    let line = req.lines().next().unwrap();
    assert!(line.starts_with("GET /properties?"), "{}", line);
    assert!(line.contains("city=Irvine"));
    assert!(line.contains("minBeds=3"));
    assert!(line.contains("page=1"));
}

#[test]
fn malformed_record_does_not_fail_the_page() {
    let body = page_json(serde_json::json!([
        {"id": 1, "price": 500000},
        {"id": 2, "price": "not a number"}
    ]));
    let (base, _requests) = start(vec![route("GET", "/properties", 200, body)]);
    let page = runtime()
        .block_on(client(&base).fetch_properties(&PropertyFilters::default()))
        .unwrap();
    assert_eq!(page.content.len(), 2);
    assert_eq!(page.malformed_count(), 1);
    assert!(matches!(
        page.content[1],
        ListingEntry::Malformed { id: Some(2), .. }
    ));
}

#[test]
fn missing_property_maps_to_not_found() {
    let (base, _requests) = start(vec![route(
        "GET",
        "/properties/7",
        200,
        serde_json::json!({"id": 7, "price": 1}),
    )]);
    let rt = runtime();
    let c = client(&base);
    assert_eq!(rt.block_on(c.fetch_property(7)).unwrap().id, 7);
    let err = rt.block_on(c.fetch_property(8)).unwrap_err();
    assert!(matches!(err, ApiError::NotFound(8)));
    assert_eq!(err.user_message(c.base_url()), "Property 8 not found");
}

#[test]
fn server_error_maps_to_status() {
    let (base, _requests) = start(vec![route(
        "GET",
        "/properties",
        500,
        serde_json::json!({"error": "boom"}),
    )]);
    let c = client(&base);
    let err = runtime()
        .block_on(c.fetch_properties(&PropertyFilters::default()))
        .unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 500, .. }));
    assert!(err.user_message(c.base_url()).contains(&base));
}

#[test]
fn nlp_search_posts_plain_text() {
    let body = page_json(serde_json::json!([{"id": 3}]));
    let (base, requests) = start(vec![route("POST", "/properties/nlp-search", 200, body)]);
    let page = runtime()
        .block_on(client(&base).nlp_search("3 bed in Irvine", 0, 20))
        .unwrap();
    assert_eq!(page.property_ids(), vec![3]);

    let req = requests.recv_timeout(Duration::from_secs(2)).unwrap();
    assert!(req.starts_with("POST /properties/nlp-search?page=0&size=20"));
    assert!(req.to_ascii_lowercase().contains("content-type: text/plain"));
    assert!(req.ends_with("3 bed in Irvine"));
}

#[test]
fn chat_request_body_shape() {
    let (base, requests) = start(vec![route(
        "POST",
        "/api/chatbot/chat",
        200,
        serde_json::json!({
            "message": "Irvine has great schools.",
            "timestamp": 1_700_000_000_000i64,
            "suggestedQuestions": ["What about Tustin?"]
        }),
    )]);
    let mut transcript = Transcript::new();
    let request = transcript.begin_send("Good areas for families?", &[4, 5]).unwrap();
    let response = runtime()
        .block_on(client(&base).send_chat(&request))
        .unwrap();
    assert_eq!(response.message, "Irvine has great schools.");

    let req = requests.recv_timeout(Duration::from_secs(2)).unwrap();
    let body = req.split("\r\n\r\n").nth(1).unwrap();
    let v: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(v["role"], "user");
    assert_eq!(v["content"], "Good areas for families?");
    assert_eq!(v["includePropertyContext"], true);
    assert_eq!(v["propertyIds"], serde_json::json!([4, 5]));
    assert!(v["conversationHistory"].is_array());
    assert!(v["timestamp"].is_i64());
}

#[test]
fn health_up_and_down() {
    let (up_base, _r1) = start(vec![route(
        "GET",
        "/health",
        200,
        serde_json::json!({"status": "UP"}),
    )]);
    let (down_base, _r2) = start(vec![route(
        "GET",
        "/health",
        503,
        serde_json::json!({"status": "DOWN"}),
    )]);
    let rt = runtime();
    let up = rt.block_on(client(&up_base).health()).unwrap();
    assert_eq!(
        up,
        HealthStatus {
            up: true,
            status: Some("UP".to_string())
        }
    );
    let down = rt.block_on(client(&down_base).health()).unwrap();
    assert!(!down.up);
    assert_eq!(down.status.as_deref(), Some("DOWN"));
}

#[test]
fn unreachable_server_is_a_connection_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let c = client(&format!("http://127.0.0.1:{}", port));
    let err = runtime()
        .block_on(c.fetch_properties(&PropertyFilters::default()))
        .unwrap_err();
    assert!(err.is_connection());
    assert!(err.user_message(c.base_url()).starts_with("Failed to load properties"));
}
