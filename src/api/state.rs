use std::sync::Arc;

use crate::chat::ChatGateway;
use crate::core::AppConfig;
use crate::ollama::{BoxedInferenceBackend, OllamaClient};

pub type SharedState = Arc<AppState>;

/// Everything a request handler needs. Built once at startup and
/// shared by every request for the life of the server.
pub struct AppState {
    pub gateway: ChatGateway,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let backend = OllamaClient::from_config(config);
        Self::with_backend(Box::new(backend))
    }

    pub fn with_backend(backend: BoxedInferenceBackend) -> Self {
        Self {
            gateway: ChatGateway::new(backend),
        }
    }
}
