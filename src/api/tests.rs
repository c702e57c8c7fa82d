#![allow(clippy::unwrap_used)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{Category, Division, TxnType};

/// A request as seen by the loopback server.
struct Captured {
    request_line: String,
    body: String,
}

/// Serve exactly one HTTP request with a canned response, returning the base
/// URL and a handle that yields what the client sent.
fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}/api", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();

        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().unwrap();
                }
            }
        }

        let mut received = vec![0u8; content_length];
        reader.read_exact(&mut received).unwrap();

        let mut stream = stream;
        write!(
            stream,
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .unwrap();
        stream.flush().unwrap();

        Captured {
            request_line: request_line.trim_end().to_string(),
            body: String::from_utf8(received).unwrap(),
        }
    });

    (base, handle)
}

fn sample_input() -> TransactionInput {
    TransactionInput {
        kind: TxnType::Income,
        division: Division::Office,
        category: Category::Salary,
        amount: dec!(5000),
        description: "July salary".into(),
        date: NaiveDate::from_ymd_opt(2024, 7, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap(),
    }
}

// ── HttpBackend ───────────────────────────────────────────────

#[test]
fn test_get_stats() {
    let (base, server) = serve_once("200 OK", r#"{"income":5000,"expense":1200,"net":3800}"#);
    let backend = HttpBackend::new(&base);

    let stats = backend.stats().unwrap();
    assert_eq!(stats.income, dec!(5000));
    assert_eq!(stats.net, dec!(3800));

    let seen = server.join().unwrap();
    assert_eq!(seen.request_line, "GET /api/stats HTTP/1.1");
}

#[test]
fn test_get_transactions() {
    let (base, server) = serve_once(
        "200 OK",
        r#"[{"_id":"abc","type":"expense","division":"Personal","category":"Food","amount":250,"description":"Lunch","date":"2024-07-02T13:00"}]"#,
    );
    let backend = HttpBackend::new(&base);

    let txns = backend.transactions().unwrap();
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].id, "abc");
    assert_eq!(txns[0].category, Category::Food);

    let seen = server.join().unwrap();
    assert_eq!(seen.request_line, "GET /api/transactions HTTP/1.1");
}

#[test]
fn test_trailing_slash_in_base_url() {
    let (base, server) = serve_once("200 OK", r#"{"income":0,"expense":0,"net":0}"#);
    let backend = HttpBackend::new(&format!("{base}/"));
    assert!(!backend.base_url().ends_with('/'));

    backend.stats().unwrap();
    assert_eq!(server.join().unwrap().request_line, "GET /api/stats HTTP/1.1");
}

#[test]
fn test_create_posts_json_body() {
    let (base, server) = serve_once("201 Created", r#"{"_id":"new"}"#);
    let backend = HttpBackend::new(&base);

    backend.create(&sample_input()).unwrap();

    let seen = server.join().unwrap();
    assert_eq!(seen.request_line, "POST /api/transactions HTTP/1.1");
    let body: serde_json::Value = serde_json::from_str(&seen.body).unwrap();
    assert_eq!(body["type"], "income");
    assert_eq!(body["division"], "Office");
    assert_eq!(body["category"], "Salary");
    assert_eq!(body["amount"].as_f64(), Some(5000.0));
    assert_eq!(body["description"], "July salary");
    assert_eq!(body["date"], "2024-07-01T09:30");
}

#[test]
fn test_update_puts_to_encoded_id() {
    let (base, server) = serve_once("200 OK", "{}");
    let backend = HttpBackend::new(&base);

    backend.update("a b/c", &sample_input()).unwrap();

    let seen = server.join().unwrap();
    assert_eq!(seen.request_line, "PUT /api/transactions/a%20b%2Fc HTTP/1.1");
}

#[test]
fn test_delete_request() {
    let (base, server) = serve_once("200 OK", r#"{"message":"deleted"}"#);
    let backend = HttpBackend::new(&base);

    backend.delete("66a1f0c2").unwrap();

    let seen = server.join().unwrap();
    assert_eq!(seen.request_line, "DELETE /api/transactions/66a1f0c2 HTTP/1.1");
}

#[test]
fn test_rejection_carries_backend_message() {
    let (base, server) = serve_once(
        "400 Bad Request",
        r#"{"error":"Edits are only allowed within 12 hours"}"#,
    );
    let backend = HttpBackend::new(&base);

    let err = backend.create(&sample_input()).unwrap_err();
    server.join().unwrap();

    match &err {
        ApiError::Rejected { status, message } => {
            assert_eq!(*status, 400);
            assert_eq!(
                message.as_deref(),
                Some("Edits are only allowed within 12 hours")
            );
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert_eq!(
        err.user_message("Error saving transaction"),
        "Edits are only allowed within 12 hours"
    );
}

#[test]
fn test_rejection_without_json_body_uses_fallback() {
    let (base, server) = serve_once("500 Internal Server Error", "oops");
    let backend = HttpBackend::new(&base);

    let err = backend.create(&sample_input()).unwrap_err();
    server.join().unwrap();

    assert!(matches!(err, ApiError::Rejected { status: 500, message: None }));
    assert_eq!(err.user_message("Error saving transaction"), "Error saving transaction");
}

#[test]
fn test_malformed_success_body_is_decode_error() {
    let (base, server) = serve_once("200 OK", r#"{"income":"lots"#);
    let backend = HttpBackend::new(&base);

    let err = backend.stats().unwrap_err();
    server.join().unwrap();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn test_unreachable_backend_is_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let backend = HttpBackend::new(&format!("http://127.0.0.1:{port}/api"));

    let err = backend.transactions().unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.user_message("Delete failed"), "Delete failed");
}

// ── ApiError ──────────────────────────────────────────────────

#[test]
fn test_empty_backend_message_falls_back() {
    let err = ApiError::Rejected {
        status: 422,
        message: Some(String::new()),
    };
    assert_eq!(err.user_message("Error saving transaction"), "Error saving transaction");
}

#[test]
fn test_error_display() {
    let err = ApiError::Rejected {
        status: 404,
        message: Some("Transaction not found".into()),
    };
    assert_eq!(
        err.to_string(),
        "backend rejected the request (404): Transaction not found"
    );
    let err = ApiError::Rejected {
        status: 500,
        message: None,
    };
    assert_eq!(err.to_string(), "backend rejected the request (500)");
}
