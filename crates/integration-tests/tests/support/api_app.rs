use std::sync::Arc;

use api_server::http::{AppState, SessionRegistry, build_router};
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use shared::llm::{ApiClient, PerplexityGateway, PerplexityGatewayConfig};
use shared::pages::Presentation;
use tower::ServiceExt;

pub const TEST_API_KEY: &str = "pplx-integration-key";

pub fn build_test_router(completions_url: &str) -> axum::Router {
    build_test_router_with_presentation(completions_url, Presentation::Enhanced)
}

pub fn build_test_router_with_presentation(
    completions_url: &str,
    presentation: Presentation,
) -> axum::Router {
    let gateway = PerplexityGateway::new(PerplexityGatewayConfig {
        chat_completions_url: completions_url.to_string(),
        model: "integration-model".to_string(),
        timeout_ms: Some(5_000),
    })
    .expect("gateway should build");

    build_router(AppState {
        sessions: SessionRegistry::default(),
        client: ApiClient::new(Arc::new(gateway)),
        presentation,
    })
}

pub struct JsonResponse {
    pub status: StatusCode,
    pub body: Value,
}

pub async fn send_json(app: &axum::Router, request: Request<Body>) -> JsonResponse {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request should succeed");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body should read");
    let body = serde_json::from_slice::<Value>(&body).unwrap_or_else(|_| json!({}));

    JsonResponse { status, body }
}

pub fn request(
    method: Method,
    path: &str,
    session_id: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header(header::ACCEPT, "application/json");

    if let Some(session_id) = session_id {
        builder = builder.header("x-session-id", session_id);
    }

    let request_body = body
        .map(|value| {
            serde_json::to_vec(&value).expect("json body should serialize for integration request")
        })
        .unwrap_or_default();
    if !request_body.is_empty() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }

    builder
        .body(Body::from(request_body))
        .expect("integration request should build")
}

/// Starts a session and returns its id.
pub async fn start_session(app: &axum::Router) -> String {
    let created = send_json(app, request(Method::POST, "/v1/sessions", None, None)).await;
    assert_eq!(created.status, StatusCode::CREATED);
    created.body["session_id"]
        .as_str()
        .expect("session id should be a string")
        .to_string()
}

/// Starts a session with the test credential stored.
pub async fn start_session_with_key(app: &axum::Router) -> String {
    let session_id = start_session(app).await;
    let stored = send_json(
        app,
        request(
            Method::PUT,
            "/v1/session/credential",
            Some(&session_id),
            Some(json!({"api_key": TEST_API_KEY})),
        ),
    )
    .await;
    assert_eq!(stored.status, StatusCode::OK);
    session_id
}

pub async fn navigate(app: &axum::Router, session_id: &str, page: &str) -> JsonResponse {
    send_json(
        app,
        request(
            Method::PUT,
            "/v1/session/navigation",
            Some(session_id),
            Some(json!({"page": page})),
        ),
    )
    .await
}

pub async fn submit(app: &axum::Router, session_id: &str, page: &str, body: Value) -> JsonResponse {
    send_json(
        app,
        request(
            Method::POST,
            &format!("/v1/session/pages/{page}/submit"),
            Some(session_id),
            Some(body),
        ),
    )
    .await
}

pub fn error_code(body: &Value) -> Option<&str> {
    body.get("error")?.get("code")?.as_str()
}

pub fn controller_state(shell: &Value) -> Option<&str> {
    shell["page"]["controller"]["state"].as_str()
}
