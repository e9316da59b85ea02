//! OpenAI-compatible JSON-mode completion provider.
//!
//! Works against OpenAI or any endpoint that follows the chat completions
//! API format. Every request asks for `response_format: json_object` and
//! the assistant message content is parsed as JSON before being handed to
//! the caller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;

use super::LlmProvider;
use crate::config::LlmConfig;
use crate::error::LlmError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI-compatible LLM provider.
pub struct OpenAiProvider {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f64,
    timeout_secs: u64,
}

impl OpenAiProvider {
    /// Create a provider from configuration, reading the API key from the
    /// environment variable named in `config.api_key_env`.
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| LlmError::AuthFailed {
                provider: format!("{}: env var '{}' not set", config.provider, config.api_key_env),
            })?;
        Self::new_with_key(config, api_key)
    }

    /// Create a provider with an explicitly provided API key.
    pub fn new_with_key(config: &LlmConfig, api_key: String) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::ApiRequest {
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            timeout_secs: config.timeout_secs,
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn complete_json(&self, system: &str, user: &str) -> Result<Value, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
            "temperature": self.temperature,
            "response_format": {"type": "json_object"},
        });

        debug!(url = %url, model = %self.model, "sending completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout {
                        timeout_secs: self.timeout_secs,
                    }
                } else {
                    LlmError::ApiRequest {
                        message: format!("request failed: {e}"),
                    }
                }
            })?;

        let status = response.status();
        let response_body = response.text().await.map_err(|e| LlmError::ApiRequest {
            message: format!("failed to read response body: {e}"),
        })?;

        if !status.is_success() {
            return Err(LlmError::ApiRequest {
                message: format!("HTTP {status}: {response_body}"),
            });
        }

        let parsed: Value =
            serde_json::from_str(&response_body).map_err(|e| LlmError::ResponseParse {
                message: format!("invalid JSON: {e}"),
            })?;

        let content = parsed
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(Value::as_str)
            .ok_or_else(|| LlmError::ResponseParse {
                message: "no message content in response".to_string(),
            })?;

        serde_json::from_str(content).map_err(|e| LlmError::ResponseParse {
            message: format!("message content is not JSON: {e}"),
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
