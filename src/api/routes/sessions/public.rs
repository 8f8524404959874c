//! Public types for the sessions API
pub use crate::chat::{SessionSummary, Transcript};

pub type SessionListResponse = Vec<SessionSummary>;
