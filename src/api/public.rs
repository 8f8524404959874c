//! Public API types

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::chat::ChatError;

// Errors

/// Body of every error response.
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorDetail {
    pub detail: String,
}

pub struct ApiError(ChatError);

/// Convert `ApiError` into an Axum compatible response.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ChatError::NotFound => {
                tracing::warn!("{}", self.0);
                StatusCode::NOT_FOUND
            }
            ChatError::Backend(_) => {
                tracing::error!("{}", self.0);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status,
            Json(ErrorDetail {
                detail: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

/// Enables using `?` on functions that return `Result<_, ChatError>`
/// to turn them into `Result<_, ApiError>`
impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        Self(err)
    }
}

// Re-export public types from each route

pub mod chat {
    pub use crate::api::routes::chat::public::*;
}

pub mod sessions {
    pub use crate::api::routes::sessions::public::*;
}
