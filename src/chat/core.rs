use std::ops::RangeInclusive;

use rand::Rng;
use serde_json::Value;

use super::error::ChatError;
use super::models::SessionId;
use super::store::SessionStore;
use crate::ollama::{BoxedInferenceBackend, Message, Role};

/// Range new session ids are drawn from when the caller passes `0`.
///
/// There is no uniqueness check: two callers asking for a new session
/// can be handed the same id and will then share a transcript.
pub const SESSION_ID_RANGE: RangeInclusive<SessionId> = 0..=999;

/// Returns `session_id` unless it is the `0` sentinel, in which case a
/// random id from `SESSION_ID_RANGE` is allocated.
pub fn resolve_session_id(session_id: SessionId) -> SessionId {
    if session_id == 0 {
        rand::thread_rng().gen_range(SESSION_ID_RANGE)
    } else {
        session_id
    }
}

/// Outcome of a successful chat turn.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub response: String,
    pub history_length: usize,
    pub session_id: SessionId,
}

/// Runs chat turns against an inference backend, keeping each
/// session's history in the owned `SessionStore`.
pub struct ChatGateway {
    store: SessionStore,
    backend: BoxedInferenceBackend,
}

impl ChatGateway {
    pub fn new(backend: BoxedInferenceBackend) -> Self {
        Self {
            store: SessionStore::new(),
            backend,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Runs one chat turn: append the user's message to the session,
    /// send the whole transcript to the backend and append the reply.
    ///
    /// When the backend call fails the user's message stays in the
    /// transcript.
    pub async fn converse(&self, session_id: SessionId, message: &str) -> Result<Reply, ChatError> {
        self.continue_session(resolve_session_id(session_id), message)
            .await
    }

    /// Runs one chat turn on exactly `session_id`. Unlike `converse`,
    /// `0` is not a sentinel here and addresses session `0`.
    pub async fn continue_session(
        &self,
        session_id: SessionId,
        message: &str,
    ) -> Result<Reply, ChatError> {
        let session = self.store.ensure(session_id);

        // Held until the reply is stored so concurrent turns on the
        // same session can't interleave
        let _turn = session.lock_turn().await;

        self.store
            .append(session_id, Message::new(Role::User, message))?;
        let transcript = session.transcript();
        tracing::debug!("Session {} messages: {:?}", session_id, transcript);

        let reply = self
            .backend
            .chat(transcript.as_slice())
            .await
            .inspect_err(|e| tracing::error!("Chat failed for session {}: {:#}", session_id, e))?;

        let response = reply.content.clone();
        let history_length = self.store.append(session_id, reply)?;

        Ok(Reply {
            response,
            history_length,
            session_id,
        })
    }

    /// Sends `message` as a standalone prompt and returns the backend's
    /// output untouched. No session is read or written.
    pub async fn direct(&self, message: &str) -> Result<Value, ChatError> {
        let output = self
            .backend
            .generate(message)
            .await
            .inspect_err(|e| tracing::error!("Generate failed: {:#}", e))?;
        Ok(output)
    }
}
