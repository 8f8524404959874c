//! The core models for a chat session held in memory.
use serde::Serialize;

use crate::ollama::Message;

/// Session identifier. `0` is reserved and means "allocate one".
pub type SessionId = i64;

/// Ordered, append-only history of a session. This is exactly what
/// gets sent to the backend on every turn.
#[derive(Default, Clone, Debug, Serialize)]
#[serde(transparent)]
pub struct Transcript(Vec<Message>);

impl Transcript {
    pub fn messages(&self) -> Vec<Message> {
        self.0.clone()
    }

    pub fn as_slice(&self) -> &[Message] {
        &self.0
    }

    pub fn push(&mut self, msg: Message) {
        self.0.push(msg)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&Message> {
        self.0.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.0.iter()
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SessionSummary {
    pub session_id: SessionId,
    // Content of the first message in the session
    pub prompt: String,
}
