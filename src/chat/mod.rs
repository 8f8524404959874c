//! Per-session conversation state and the orchestration of a chat
//! turn against the inference backend.
mod core;
mod error;
mod models;
mod store;

pub use self::core::{ChatGateway, Reply, SESSION_ID_RANGE, resolve_session_id};
pub use error::ChatError;
pub use models::{SessionId, SessionSummary, Transcript};
pub use store::{Session, SessionStore};
