//! Integration tests for the translate and draft proxies
//!
//! The upstream is a stub axum server on 127.0.0.1:0 that records every call
//! and answers with a canned status and body.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request, StatusCode},
    routing::post,
    Json, Router,
};
use http_body_util::BodyExt;
use hptk_server::{build_router, AppState, ServerConfig};
use serde_json::{json, Value};
use tower::util::ServiceExt;

struct Stub {
    calls: AtomicUsize,
    authorization: Mutex<Option<String>>,
    body: Mutex<Option<Value>>,
    status: StatusCode,
    reply: Value,
}

impl Stub {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_body(&self) -> Value {
        self.body.lock().unwrap().clone().expect("upstream was called")
    }
}

async fn completions(
    State(stub): State<Arc<Stub>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    stub.calls.fetch_add(1, Ordering::SeqCst);
    *stub.authorization.lock().unwrap() = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    *stub.body.lock().unwrap() = Some(body);
    (stub.status, Json(stub.reply.clone()))
}

/// Start a stub upstream answering `status` with `reply`
async fn start_stub(status: StatusCode, reply: Value) -> (Arc<Stub>, SocketAddr) {
    let stub = Arc::new(Stub {
        calls: AtomicUsize::new(0),
        authorization: Mutex::new(None),
        body: Mutex::new(None),
        status,
        reply,
    });

    let app = Router::new()
        .route("/v1/chat/completions", post(completions))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (stub, addr)
}

fn completion(content: &str) -> Value {
    json!({"choices": [{"message": {"role": "assistant", "content": content}}]})
}

fn setup_app(addr: SocketAddr, translate_key: Option<&str>, drafter_key: Option<&str>) -> Router {
    let config = ServerConfig {
        upstream_base_url: format!("http://{}/v1", addr),
        upstream_timeout: Duration::from_secs(5),
        translate_api_key: translate_key.map(str::to_string),
        drafter_api_key: drafter_key.map(str::to_string),
        ..ServerConfig::default()
    };
    build_router(AppState::new(&config).unwrap())
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn extract_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

// =============================================================================
// Translate
// =============================================================================

#[tokio::test]
async fn test_translate_success() {
    let (stub, addr) = start_stub(StatusCode::OK, completion("  你好\nสวัสดี  ")).await;
    let app = setup_app(addr, Some("sk-translate"), None);

    let response = app
        .oneshot(post_json("/api/translate", json!({"text": "hello"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(extract_json(response).await, json!({"translation": "你好\nสวัสดี"}));

    assert_eq!(stub.calls(), 1);
    assert_eq!(
        stub.authorization.lock().unwrap().as_deref(),
        Some("Bearer sk-translate")
    );

    let sent = stub.last_body();
    assert_eq!(sent["model"], "openai/gpt-4o-mini");
    assert_eq!(sent["messages"][0]["role"], "system");
    assert_eq!(sent["messages"][1]["role"], "user");
    assert!(sent["messages"][1]["content"].as_str().unwrap().contains("\"hello\""));
    assert!(sent.get("temperature").is_none());
}

#[tokio::test]
async fn test_translate_empty_text_is_400() {
    let (stub, addr) = start_stub(StatusCode::OK, completion("unused")).await;
    let app = setup_app(addr, Some("sk-translate"), None);

    for body in [json!({"text": ""}), json!({"text": "   "}), json!({})] {
        let response = app
            .clone()
            .oneshot(post_json("/api/translate", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(extract_json(response).await["error"], "Text is required");
    }
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn test_translate_missing_credential_never_calls_upstream() {
    let (stub, addr) = start_stub(StatusCode::OK, completion("unused")).await;
    let app = setup_app(addr, None, Some("sk-drafter"));

    let response = app
        .oneshot(post_json("/api/translate", json!({"text": "hello"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(extract_json(response).await["error"], "API key not configured");
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn test_translate_credential_checked_before_body() {
    let (stub, addr) = start_stub(StatusCode::OK, completion("unused")).await;
    let app = setup_app(addr, None, None);

    let response = app
        .oneshot(post_json("/api/translate", json!({"text": ""})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn test_translate_upstream_status_passed_through() {
    let (_stub, addr) = start_stub(
        StatusCode::TOO_MANY_REQUESTS,
        json!({"error": {"message": "rate limited"}}),
    )
    .await;
    let app = setup_app(addr, Some("sk-translate"), None);

    let response = app
        .oneshot(post_json("/api/translate", json!({"text": "hello"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(extract_json(response).await["error"], "Translation service error");
}

#[tokio::test]
async fn test_translate_empty_upstream_content_is_500() {
    let (_stub, addr) = start_stub(StatusCode::OK, json!({"choices": []})).await;
    let app = setup_app(addr, Some("sk-translate"), None);

    let response = app
        .oneshot(post_json("/api/translate", json!({"text": "hello"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(extract_json(response).await["error"], "No translation received");
}

#[tokio::test]
async fn test_translate_unreachable_upstream_is_500() {
    // Bind then drop to get a port nobody listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let app = setup_app(addr, Some("sk-translate"), None);
    let response = app
        .oneshot(post_json("/api/translate", json!({"text": "hello"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(extract_json(response).await["error"], "Internal server error");
}

// =============================================================================
// Draft
// =============================================================================

#[tokio::test]
async fn test_draft_reply_success() {
    let (stub, addr) = start_stub(StatusCode::OK, completion("Dear client,\nThanks.")).await;
    let app = setup_app(addr, None, Some("sk-drafter"));

    let request = post_json(
        "/api/draft",
        json!({
            "mode": "reply",
            "clientEmail": "The player is offline again.",
            "instructions": "Apologise and book an engineer",
            "tone": "Apologetic & reassuring",
            "language": "Thai",
            "length": "Medium"
        }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(extract_json(response).await, json!({"draft": "Dear client,\nThanks."}));

    assert_eq!(
        stub.authorization.lock().unwrap().as_deref(),
        Some("Bearer sk-drafter")
    );
    let sent = stub.last_body();
    let messages = sent["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["role"], "user");
    let prompt = messages[0]["content"].as_str().unwrap();
    assert!(prompt.contains("Thai"));
    assert!(prompt.contains("Apologetic & reassuring"));
    assert!(prompt.contains("The player is offline again."));
    assert!((sent["temperature"].as_f64().unwrap() - 0.4).abs() < 1e-6);
}

#[tokio::test]
async fn test_draft_new_mode_uses_defaults() {
    let (stub, addr) = start_stub(StatusCode::OK, completion("Hello")).await;
    let app = setup_app(addr, None, Some("sk-drafter"));

    let response = app
        .oneshot(post_json("/api/draft", json!({"instructions": "Announce maintenance"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let sent = stub.last_body();
    let prompt = sent["messages"][0]["content"].as_str().unwrap();
    assert!(prompt.contains("English (British)"));
    assert!(prompt.contains("Concise & direct"));
    assert!(prompt.contains("(New email)"));
}

#[tokio::test]
async fn test_draft_validation() {
    let (stub, addr) = start_stub(StatusCode::OK, completion("unused")).await;
    let app = setup_app(addr, None, Some("sk-drafter"));

    let response = app
        .clone()
        .oneshot(post_json("/api/draft", json!({"mode": "new", "instructions": ""})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(extract_json(response).await["error"], "Instructions are required");

    let response = app
        .oneshot(post_json("/api/draft", json!({"mode": "reply", "instructions": "Reply"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        extract_json(response).await["error"],
        "Client email is required for reply mode"
    );

    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn test_draft_missing_credential() {
    let (stub, addr) = start_stub(StatusCode::OK, completion("unused")).await;
    let app = setup_app(addr, Some("sk-translate"), None);

    let response = app
        .oneshot(post_json("/api/draft", json!({"instructions": "Hello"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        extract_json(response).await["error"],
        "Drafter API key not configured"
    );
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn test_draft_upstream_failure() {
    let (_stub, addr) = start_stub(StatusCode::UNAUTHORIZED, json!({"error": "bad key"})).await;
    let app = setup_app(addr, None, Some("sk-wrong"));

    let response = app
        .oneshot(post_json("/api/draft", json!({"instructions": "Hello"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        extract_json(response).await["error"],
        "Email drafting service error"
    );
}

#[tokio::test]
async fn test_draft_blank_upstream_content() {
    let (_stub, addr) = start_stub(StatusCode::OK, completion("   ")).await;
    let app = setup_app(addr, None, Some("sk-drafter"));

    let response = app
        .oneshot(post_json("/api/draft", json!({"instructions": "Hello"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(extract_json(response).await["error"], "No email draft received");
}
