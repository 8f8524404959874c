use std::time::Duration;

use anyhow::{Context, Error, Result, bail};
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value, json};

use crate::core::AppConfig;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "user")]
    User,
    #[serde(rename = "tool")]
    Tool,
    // The backend decides how it labels its own replies
    #[serde(untagged)]
    Other(String),
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// Object {
//     "role": String("assistant"),
//     "content": String("Hello! How can I help?"),
//     "images": Null,
//     "tool_calls": Null
// }
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Message {
    pub role: Role,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    // Whatever else the backend put on the message. Kept so the
    // stored reply round trips exactly as it was received.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: content.to_string(),
            extra: Map::new(),
        }
    }
}

/// A language model server that can continue a transcript or
/// complete a single prompt.
#[async_trait]
pub trait InferenceBackend {
    /// Returns the next message for the transcript `messages`.
    async fn chat(&self, messages: &[Message]) -> Result<Message, Error>;
    /// Returns the backend's raw output for a standalone prompt.
    async fn generate(&self, prompt: &str) -> Result<Value, Error>;
}

pub type BoxedInferenceBackend = Box<dyn InferenceBackend + Send + Sync + 'static>;

/// Client for an Ollama server's `/api/chat` and `/api/generate`
/// endpoints. The model is fixed for every request.
#[derive(Clone, Debug)]
pub struct OllamaClient {
    client: reqwest::Client,
    api_hostname: String,
    model: String,
    timeout: Duration,
}

impl OllamaClient {
    pub fn new(api_hostname: &str, model: &str, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_hostname: api_hostname.trim_end_matches('/').to_string(),
            model: model.to_string(),
            timeout,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.ollama_api_hostname,
            &config.ollama_model,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    async fn post(&self, path: &str, payload: &Value) -> Result<Value, Error> {
        let url = format!("{}{}", self.api_hostname, path);
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(payload)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            // Ollama reports failures as `{"error": "..."}`
            let reason = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| v["error"].as_str().map(String::from))
                .unwrap_or(text);
            bail!("{} (status code: {})", reason, status.as_u16());
        }

        serde_json::from_str(&text).with_context(|| format!("Malformed response: {}", text))
    }
}

#[async_trait]
impl InferenceBackend for OllamaClient {
    async fn chat(&self, messages: &[Message]) -> Result<Message, Error> {
        let payload = json!({
            "model": self.model,
            "messages": messages,
            "stream": false,
        });
        let mut resp = self.post("/api/chat", &payload).await?;

        if let Some(err) = resp["error"].as_str() {
            bail!("{}", err);
        }
        let Some(msg) = resp.get_mut("message").map(Value::take) else {
            bail!("No message received. Resp:\n\n {}", resp);
        };
        let msg = serde_json::from_value(msg).context("Invalid message in response")?;

        Ok(msg)
    }

    async fn generate(&self, prompt: &str) -> Result<Value, Error> {
        let payload = json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
        });
        self.post("/api/generate", &payload).await
    }
}
