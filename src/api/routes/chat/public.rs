//! Public types for the chat API
use serde::{Deserialize, Serialize};

use crate::chat::{Reply, SessionId};

#[derive(Deserialize)]
pub struct ChatRequest {
    // `0` or missing starts a new session
    #[serde(default)]
    pub session_id: SessionId,
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ChatResponse {
    pub response: String,
    pub history_length: usize,
    pub session_id: SessionId,
}

impl From<Reply> for ChatResponse {
    fn from(reply: Reply) -> Self {
        Self {
            response: reply.response,
            history_length: reply.history_length,
            session_id: reply.session_id,
        }
    }
}

/// Request for a one-off completion. A `session_id` sent along with
/// it is ignored.
#[derive(Deserialize)]
pub struct SimpleChatRequest {
    pub message: String,
}
