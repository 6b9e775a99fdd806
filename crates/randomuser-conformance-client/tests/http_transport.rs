// crates/randomuser-conformance-client/tests/http_transport.rs
// ============================================================================
// Module: HTTP Transport Tests
// Description: Exercise the reqwest transport against local stub servers.
// Purpose: Validate URL construction, response snapshots, limits, and transcripts.
// ============================================================================

//! ## Overview
//! Each test starts a `tiny_http` server on an ephemeral port, serves a fixed
//! list of canned responses, and returns the request URLs it observed.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::net::TcpListener;
use std::thread;
use std::thread::JoinHandle;

use randomuser_conformance_client::HttpTransport;
use randomuser_conformance_client::HttpTransportConfig;
use randomuser_conformance_core::Catalog;
use randomuser_conformance_core::Scenario;
use randomuser_conformance_core::ScenarioStatus;
use randomuser_conformance_core::Transport;
use randomuser_conformance_core::TransportError;
use randomuser_conformance_core::FailureKind;
use randomuser_conformance_core::run_scenario;
use randomuser_conformance_core::runtime::verifier;
use serde_json::json;
use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Stub Server
// ============================================================================

struct Canned {
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
}

fn json_body(status: u16, body: &serde_json::Value) -> Canned {
    Canned {
        status,
        content_type: "application/json; charset=utf-8",
        body: body.to_string().into_bytes(),
    }
}

fn spawn_server(responses: Vec<Canned>) -> (String, JoinHandle<Vec<String>>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let handle = thread::spawn(move || {
        let mut seen = Vec::new();
        for canned in responses {
            let Ok(request) = server.recv() else {
                break;
            };
            seen.push(request.url().to_string());
            let header =
                Header::from_bytes(&b"Content-Type"[..], canned.content_type.as_bytes()).unwrap();
            let response =
                Response::from_data(canned.body).with_status_code(canned.status).with_header(header);
            let _ = request.respond(response);
        }
        seen
    });
    (format!("http://{addr}/api"), handle)
}

fn transport(base_url: &str) -> HttpTransport {
    HttpTransport::new(HttpTransportConfig::new(base_url).unwrap()).unwrap()
}

fn query(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs.iter().map(|(name, value)| ((*name).to_string(), (*value).to_string())).collect()
}

// ============================================================================
// SECTION: URL Construction
// ============================================================================

#[test]
fn base_url_gains_trailing_slash() {
    let config = HttpTransportConfig::new("https://randomuser.me/api").unwrap();
    assert_eq!(config.base_url.as_str(), "https://randomuser.me/api/");
    assert!(matches!(
        HttpTransportConfig::new("ftp://randomuser.me/api/"),
        Err(TransportError::InvalidUrl(_))
    ));
    assert!(matches!(HttpTransportConfig::new("not a url"), Err(TransportError::InvalidUrl(_))));
}

#[test]
fn request_url_keeps_query_order() {
    let transport = transport("https://randomuser.me/api/");
    let url = transport
        .request_url("", &query(&[("results", "10"), ("gender", "female"), ("inc", "login")]))
        .unwrap();
    assert_eq!(url.as_str(), "https://randomuser.me/api/?results=10&gender=female&inc=login");

    let bare = transport.request_url("does-not-exist", &[]).unwrap();
    assert_eq!(bare.as_str(), "https://randomuser.me/api/does-not-exist");
}

// ============================================================================
// SECTION: Exchanges
// ============================================================================

#[tokio::test]
async fn get_snapshots_status_content_type_and_body() {
    let (base_url, server) = spawn_server(vec![
        json_body(200, &json!({ "results": [], "info": {} })),
        json_body(404, &json!({ "error": "Not found" })),
    ]);
    let transport = transport(&base_url);

    let ok = transport.get("", &query(&[("results", "0")])).await.unwrap();
    assert_eq!(ok.status, 200);
    assert!(ok.is_success());
    assert!(ok.is_json());
    assert!(ok.body.contains("\"results\""));

    let missing = transport.get("does-not-exist", &[]).await.unwrap();
    assert_eq!(missing.status, 404);
    assert!(missing.body.contains("Not found"));

    let seen = server.join().unwrap();
    assert_eq!(seen, vec!["/api/?results=0".to_string(), "/api/does-not-exist".to_string()]);

    let transcript = transport.transcript();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0].sequence, 1);
    assert_eq!(transcript[0].query, query(&[("results", "0")]));
    assert_eq!(transcript[1].status, Some(404));
    assert!(transcript.iter().all(|entry| entry.error.is_none()));
}

#[tokio::test]
async fn oversized_bodies_fail_closed() {
    let (base_url, server) = spawn_server(vec![Canned {
        status: 200,
        content_type: "text/plain",
        body: "x".repeat(512).into_bytes(),
    }]);
    let mut config = HttpTransportConfig::new(&base_url).unwrap();
    config.max_response_bytes = 64;
    let transport = HttpTransport::new(config).unwrap();

    let err = transport.get("", &[]).await.unwrap_err();
    assert!(matches!(err, TransportError::Body(_)), "unexpected error: {err}");
    server.join().unwrap();
    assert!(transport.transcript()[0].error.is_some());
}

#[tokio::test]
async fn invalid_utf8_bodies_are_not_repaired_into_json() {
    let mut body = br#"{"results":[],"info":{"seed":""#.to_vec();
    body.push(0xFF);
    body.extend_from_slice(br#""}}"#);
    let (base_url, server) = spawn_server(vec![
        Canned {
            status: 200,
            content_type: "application/json",
            body: body.clone(),
        },
        Canned {
            status: 404,
            content_type: "application/json",
            body,
        },
    ]);
    let transport = transport(&base_url);

    let ok = transport.get("", &[]).await.unwrap();
    assert!(ok.decode_error.is_some());
    let err = verifier::verify_count(&ok, 0).unwrap_err();
    assert_eq!(err.kind(), FailureKind::Shape);

    let missing = transport.get("does-not-exist", &[]).await.unwrap();
    let err = verifier::verify_error(&missing).unwrap_err();
    assert_eq!(err.kind(), FailureKind::Shape);
    server.join().unwrap();
}

#[tokio::test]
async fn unreachable_host_is_request_error() {
    let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let transport = transport(&format!("http://127.0.0.1:{port}/api/"));
    let err = transport.get("", &[]).await.unwrap_err();
    assert!(matches!(err, TransportError::Request(_)), "unexpected error: {err}");
    let transcript = transport.transcript();
    assert_eq!(transcript[0].status, None);
    assert!(transcript[0].error.is_some());
}

// ============================================================================
// SECTION: End-to-End
// ============================================================================

#[tokio::test]
async fn scenarios_run_over_http() {
    let two = json!({
        "results": [
            { "gender": "male", "nat": "US", "login": { "uuid": "a" } },
            { "gender": "female", "nat": "FR", "login": { "uuid": "b" } },
        ],
        "info": { "seed": "s", "results": 2, "page": 1, "version": "1.4" },
    });
    let (base_url, server) = spawn_server(vec![
        json_body(200, &two),
        Canned {
            status: 404,
            content_type: "text/html",
            body: b"<h1>Not Found</h1>".to_vec(),
        },
        json_body(200, &json!({ "error": "Uh oh, something has gone wrong." })),
    ]);
    let transport = transport(&base_url);
    let catalog = Catalog::standard();

    let count = run_scenario(&transport, &catalog, Scenario::ResultCount(2)).await;
    assert_eq!(count.status, ScenarioStatus::Pass, "{:?}", count.failure);

    let invalid = run_scenario(&transport, &catalog, Scenario::InvalidPath).await;
    assert_eq!(invalid.status, ScenarioStatus::Pass, "{:?}", invalid.failure);

    let garbage = run_scenario(&transport, &catalog, Scenario::ResultCount(1)).await;
    assert_eq!(garbage.status, ScenarioStatus::Fail);

    let seen = server.join().unwrap();
    assert_eq!(seen[0], "/api/?results=2");
    assert_eq!(seen[1], "/api/does-not-exist");
    assert_eq!(transport.transcript().len(), 3);
}
