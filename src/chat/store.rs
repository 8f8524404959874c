//! In-memory session store.
//!
//! Sessions live for as long as the store does. There is no eviction
//! and no bound on the number of sessions or transcript length.
//!
//! Locking is split in two levels. The session map sits behind a
//! `RwLock` that is only held to look up or insert an entry and never
//! across an await. Each `Session` then carries its own async turn
//! lock that a caller holds for a whole chat turn, including the
//! backend call, so turns on one session are serialised while other
//! sessions are unaffected. The transcript itself has a separate short
//! lock so reads never wait on an in-flight turn.
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::{Mutex, MutexGuard};

use super::error::ChatError;
use super::models::{SessionId, SessionSummary, Transcript};
use crate::ollama::Message;

#[derive(Default, Debug)]
pub struct Session {
    turn: Mutex<()>,
    transcript: RwLock<Transcript>,
}

impl Session {
    /// Wait for exclusive use of the session for one chat turn.
    pub async fn lock_turn(&self) -> MutexGuard<'_, ()> {
        self.turn.lock().await
    }

    /// Append `msg` and return the new transcript length.
    pub fn push(&self, msg: Message) -> usize {
        let mut transcript = self
            .transcript
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        transcript.push(msg);
        transcript.len()
    }

    pub fn transcript(&self) -> Transcript {
        self.transcript
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn first_content(&self) -> Option<String> {
        self.transcript
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .first()
            .map(|m| m.content.clone())
    }
}

#[derive(Default, Debug)]
pub struct SessionStore {
    sessions: RwLock<BTreeMap<SessionId, Arc<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session for `session_id`, creating an empty one if
    /// it doesn't exist yet.
    pub fn ensure(&self, session_id: SessionId) -> Arc<Session> {
        if let Some(session) = self.session(session_id) {
            return session;
        }
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        // Another caller may have inserted it between the two locks
        Arc::clone(sessions.entry(session_id).or_default())
    }

    /// Appends `msg` to the end of an existing session's transcript and
    /// returns the new length.
    pub fn append(&self, session_id: SessionId, msg: Message) -> Result<usize, ChatError> {
        let session = self.session(session_id).ok_or(ChatError::NotFound)?;
        Ok(session.push(msg))
    }

    /// Returns a snapshot of the full transcript for `session_id`.
    pub fn get(&self, session_id: SessionId) -> Result<Transcript, ChatError> {
        let session = self.session(session_id).ok_or(ChatError::NotFound)?;
        Ok(session.transcript())
    }

    /// Every session with at least one message, paired with the content
    /// of its first message, in ascending id order.
    pub fn list_summaries(&self) -> Vec<SessionSummary> {
        let sessions = self
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        sessions
            .iter()
            .filter_map(|(id, session)| {
                session.first_content().map(|prompt| SessionSummary {
                    session_id: *id,
                    prompt,
                })
            })
            .collect()
    }

    fn session(&self, session_id: SessionId) -> Option<Arc<Session>> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&session_id)
            .map(Arc::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ollama::Role;

    #[test]
    fn test_ensure_creates_empty_session_once() {
        let store = SessionStore::new();
        assert!(store.get(3).is_err());

        let a = store.ensure(3);
        let b = store.ensure(3);

        assert!(Arc::ptr_eq(&a, &b));
        assert!(a.transcript().is_empty());
        assert!(store.get(3).unwrap().is_empty());
    }

    #[test]
    fn test_append_grows_transcript_in_order() {
        let store = SessionStore::new();
        store.ensure(1);

        assert_eq!(store.append(1, Message::new(Role::User, "a")).unwrap(), 1);
        assert_eq!(
            store.append(1, Message::new(Role::Assistant, "b")).unwrap(),
            2
        );
        assert_eq!(store.append(1, Message::new(Role::User, "c")).unwrap(), 3);

        let contents: Vec<_> = store
            .get(1)
            .unwrap()
            .iter()
            .map(|m| m.content.clone())
            .collect();
        assert_eq!(contents, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_append_to_unknown_session_is_not_found() {
        let store = SessionStore::new();
        let result = store.append(5, Message::new(Role::User, "a"));
        assert!(matches!(result, Err(ChatError::NotFound)));
        // Append never creates a session
        assert!(matches!(store.get(5), Err(ChatError::NotFound)));
    }

    #[test]
    fn test_get_unknown_session_is_not_found() {
        let store = SessionStore::new();
        assert!(matches!(store.get(999_999), Err(ChatError::NotFound)));
    }

    #[test]
    fn test_list_summaries_uses_first_message_and_skips_empty() {
        let store = SessionStore::new();
        store.ensure(42);
        store.append(42, Message::new(Role::User, "first")).unwrap();
        store
            .append(42, Message::new(Role::Assistant, "second"))
            .unwrap();
        store.ensure(7);
        store.append(7, Message::new(Role::User, "hello")).unwrap();
        // Never appended to
        store.ensure(100);

        assert_eq!(
            store.list_summaries(),
            vec![
                SessionSummary {
                    session_id: 7,
                    prompt: "hello".to_string()
                },
                SessionSummary {
                    session_id: 42,
                    prompt: "first".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_negative_and_large_ids_are_valid_keys() {
        let store = SessionStore::new();
        store.ensure(-12);
        store.ensure(i64::MAX);
        store.append(-12, Message::new(Role::User, "neg")).unwrap();
        store.append(i64::MAX, Message::new(Role::User, "max")).unwrap();
        assert_eq!(store.get(-12).unwrap().len(), 1);
        assert_eq!(store.get(i64::MAX).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_turn_lock_is_exclusive_per_session() {
        let store = SessionStore::new();
        let one = store.ensure(1);
        let two = store.ensure(2);

        let _guard = one.lock_turn().await;
        assert!(one.turn.try_lock().is_err());
        // A different session is not blocked
        assert!(two.turn.try_lock().is_ok());
    }
}
