//! API routes module

pub mod chat;
pub mod sessions;

use axum::Router;

use crate::api::state::SharedState;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Chat routes
        .merge(chat::router())
        // Session history routes
        .merge(sessions::router())
}
