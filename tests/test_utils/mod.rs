//! Test utilities for integration tests
#![allow(dead_code)]

use std::time::Duration;

use anyhow::{Error, bail};
use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use serde_json::Value;
use tower::util::ServiceExt;

use chapka::api::{AppState, SharedState, app};
use chapka::core::AppConfig;
use chapka::ollama::{BoxedInferenceBackend, InferenceBackend, Message, Role};

pub const TEST_MODEL: &str = "llama3.2:3b";

/// Creates a test application router that talks to an inference
/// backend at `ollama_url`, usually a `mockito` server.
pub fn test_app(ollama_url: &str) -> Router {
    let mut app_config = AppConfig::new(ollama_url, TEST_MODEL);
    app_config.request_timeout_secs = 5;
    let app_state = AppState::new(&app_config);
    app(SharedState::new(app_state))
}

/// Creates a test application router backed by `backend` instead of an
/// HTTP inference server.
pub fn test_app_with_backend(backend: BoxedInferenceBackend) -> Router {
    app(SharedState::new(AppState::with_backend(backend)))
}

/// Backend that waits `delay` and then replies with the number of
/// messages it was sent.
pub struct CountingBackend {
    pub delay: Duration,
}

#[async_trait]
impl InferenceBackend for CountingBackend {
    async fn chat(&self, messages: &[Message]) -> Result<Message, Error> {
        tokio::time::sleep(self.delay).await;
        Ok(Message::new(Role::Assistant, &messages.len().to_string()))
    }

    async fn generate(&self, _prompt: &str) -> Result<Value, Error> {
        bail!("generate is not supported")
    }
}

/// Body of an Ollama `/api/chat` response replying with `content`.
pub fn ollama_chat_body(content: &str) -> String {
    serde_json::json!({
        "model": TEST_MODEL,
        "created_at": "2025-01-01T00:00:00Z",
        "message": {"role": "assistant", "content": content},
        "done": true,
        "done_reason": "stop"
    })
    .to_string()
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .method("POST")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_to_json(body: Body) -> Value {
    let body = body_to_string(body).await;
    serde_json::from_str(&body).unwrap()
}
