#![allow(dead_code)]

pub mod api_app;

use std::collections::VecDeque;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::{Mutex, Notify, oneshot};

#[derive(Debug, Clone)]
pub struct MockReply {
    pub status: StatusCode,
    pub body: Value,
}

impl MockReply {
    pub fn answer(content: &str) -> Self {
        Self {
            status: StatusCode::OK,
            body: json!({
                "id": "resp-mock",
                "model": "mock-model",
                "choices": [
                    {"index": 0, "message": {"role": "assistant", "content": content}}
                ],
                "citations": ["https://www.nih.gov"]
            }),
        }
    }

    pub fn empty() -> Self {
        Self {
            status: StatusCode::OK,
            body: json!({"id": "resp-empty", "model": "mock-model", "choices": []}),
        }
    }

    pub fn provider_error(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            body: json!({"error": {"message": message}}),
        }
    }
}

/// Stand-in for the completions endpoint. Records every call; optionally
/// holds each answer until `release` is notified.
#[derive(Clone)]
pub struct MockCompletions {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    pub seen_payloads: Arc<Mutex<Vec<Value>>>,
    pub seen_auth_headers: Arc<Mutex<Vec<String>>>,
    pub entered: Arc<Notify>,
    release: Option<Arc<Notify>>,
}

impl MockCompletions {
    pub fn with_replies(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            seen_payloads: Arc::new(Mutex::new(Vec::new())),
            seen_auth_headers: Arc::new(Mutex::new(Vec::new())),
            entered: Arc::new(Notify::new()),
            release: None,
        }
    }

    pub fn held(replies: Vec<MockReply>, release: Arc<Notify>) -> Self {
        Self {
            release: Some(release),
            ..Self::with_replies(replies)
        }
    }

    pub async fn call_count(&self) -> usize {
        self.seen_payloads.lock().await.len()
    }
}

pub struct MockServer {
    pub url: String,
    shutdown_tx: oneshot::Sender<()>,
    task: tokio::task::JoinHandle<()>,
}

impl MockServer {
    pub async fn shutdown(self) {
        self.shutdown_tx
            .send(())
            .expect("shutdown signal should send");
        self.task.await.expect("server task should join");
    }
}

pub async fn spawn_mock_completions(state: MockCompletions) -> MockServer {
    let app = Router::new()
        .route("/chat/completions", post(mock_completions_handler))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let local_addr = listener
        .local_addr()
        .expect("listener address should resolve");
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let server = axum::serve(listener, app).with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
        });

        server.await.expect("mock server should run");
    });

    MockServer {
        url: format!("http://{local_addr}/chat/completions"),
        shutdown_tx,
        task,
    }
}

async fn mock_completions_handler(
    State(state): State<MockCompletions>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.seen_payloads.lock().await.push(payload);
    if let Some(value) = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
    {
        state.seen_auth_headers.lock().await.push(value.to_string());
    }

    state.entered.notify_one();
    if let Some(release) = &state.release {
        release.notified().await;
    }

    let reply = state
        .replies
        .lock()
        .await
        .pop_front()
        .unwrap_or_else(|| MockReply::provider_error(StatusCode::INTERNAL_SERVER_ERROR, "no mock reply queued"));

    (reply.status, Json(reply.body))
}
