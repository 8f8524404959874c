//! Router for the chat API

use axum::{Json, Router, extract::State, routing::post};
use serde_json::Value;

use super::public;
use crate::api::public::ApiError;
use crate::api::state::SharedState;

/// Add a message to a session, starting a new one when no session id
/// is given, and respond with the model's reply
async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<public::ChatRequest>,
) -> Result<Json<public::ChatResponse>, ApiError> {
    let reply = state
        .gateway
        .converse(payload.session_id, &payload.message)
        .await?;
    Ok(Json(reply.into()))
}

/// Send a single prompt with no history and respond with whatever the
/// backend returned
async fn simple_chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<public::SimpleChatRequest>,
) -> Result<Json<Value>, ApiError> {
    let output = state.gateway.direct(&payload.message).await?;
    Ok(Json(output))
}

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/chat", post(chat_handler))
        .route("/simple-chat", post(simple_chat_handler))
}
