//! Router for the sessions API

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use super::public;
use crate::api::public::ApiError;
use crate::api::state::SharedState;
use crate::chat::SessionId;

/// List every session with the first message sent to it
async fn session_list(State(state): State<SharedState>) -> Json<public::SessionListResponse> {
    Json(state.gateway.store().list_summaries())
}

/// Get the full transcript of a single session
async fn session_transcript(
    State(state): State<SharedState>,
    Path(session_id): Path<SessionId>,
) -> Result<Json<public::Transcript>, ApiError> {
    let transcript = state.gateway.store().get(session_id)?;
    Ok(Json(transcript))
}

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/sessions", get(session_list))
        .route("/sessions/{session_id}", get(session_transcript))
}
