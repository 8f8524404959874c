use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Session not found")]
    NotFound,
    /// Anything that went wrong talking to the inference backend or
    /// reading its response.
    #[error("Ollama error: {0:#}")]
    Backend(#[from] anyhow::Error),
}
