use std::env;

const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";
const DEFAULT_OLLAMA_MODEL: &str = "llama3.2:3b";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60 * 10;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub ollama_api_hostname: String,
    pub ollama_model: String,
    // Upper bound on a single backend call, chat or generate
    pub request_timeout_secs: u64,
}

/// Timeout in seconds from the raw env var value. Missing or
/// unparsable values use the default.
fn parse_timeout(value: Option<String>) -> u64 {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
}

impl AppConfig {
    pub fn new(ollama_api_hostname: &str, ollama_model: &str) -> Self {
        Self {
            ollama_api_hostname: ollama_api_hostname.to_string(),
            ollama_model: ollama_model.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let ollama_api_hostname =
            env::var("CHAPKA_OLLAMA_HOST").unwrap_or_else(|_| DEFAULT_OLLAMA_HOST.to_string());
        let ollama_model =
            env::var("CHAPKA_OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_OLLAMA_MODEL.to_string());
        let request_timeout_secs = parse_timeout(env::var("CHAPKA_REQUEST_TIMEOUT_SECS").ok());

        Self {
            ollama_api_hostname,
            ollama_model,
            request_timeout_secs,
        }
    }
}
