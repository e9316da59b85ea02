//! LLM provider interface and the degrade-to-fallback policy.
//!
//! Every reference list and every semantic judgement in the service comes
//! from a provider implementing [`LlmProvider`], treated as an untrusted
//! black box that returns a JSON object. A slot whose credential is not
//! configured simply has no provider, and every call site carries static
//! fallback content, so a missing key or a failed call degrades that one
//! call and nothing else. There is no retry logic anywhere.

pub mod openai;
pub mod prompts;
pub mod stubs;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::LlmConfig;
use crate::error::LlmError;

pub use openai::OpenAiProvider;

/// A text-completion provider that answers with a JSON object.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send one system instruction plus user content; the reply is parsed
    /// as a JSON object before being returned.
    async fn complete_json(&self, system: &str, user: &str) -> Result<Value, LlmError>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}

/// Shared handle to a provider slot.
pub type LlmHandle = Arc<dyn LlmProvider>;

/// Whether a value came from a live provider or from static fallback.
///
/// The HTTP layer serializes both identically; the distinction exists so
/// orchestration code and tests can tell "the model answered" from
/// "the stub was served".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sourced<T> {
    /// Parsed from a live provider reply.
    Answered(T),
    /// The provider was unavailable, failed, or replied with an
    /// unexpected shape; this is fallback content.
    Degraded(T),
}

impl<T> Sourced<T> {
    pub fn get(&self) -> &T {
        match self {
            Sourced::Answered(value) | Sourced::Degraded(value) => value,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Sourced::Answered(value) | Sourced::Degraded(value) => value,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Sourced::Degraded(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Sourced<U> {
        match self {
            Sourced::Answered(value) => Sourced::Answered(f(value)),
            Sourced::Degraded(value) => Sourced::Degraded(f(value)),
        }
    }
}

/// Build a provider handle for one slot. A missing credential disables
/// the slot (logged once at startup) instead of failing.
pub fn create_provider(config: &LlmConfig) -> Option<LlmHandle> {
    match OpenAiProvider::new(config) {
        Ok(provider) => Some(Arc::new(provider)),
        Err(e) => {
            tracing::warn!(
                provider = %config.provider,
                model = %config.model,
                error = %e,
                "LLM slot disabled; its calls will serve fallback content"
            );
            None
        }
    }
}

/// Ask a provider and parse its reply, degrading to `fallback` when the
/// slot is empty, the call fails, or the reply does not match the
/// expected shape.
pub async fn ask<T, P, F>(
    provider: Option<&LlmHandle>,
    system: &str,
    user: &str,
    parse: P,
    fallback: F,
) -> Sourced<T>
where
    P: FnOnce(&Value) -> Option<T>,
    F: FnOnce() -> T,
{
    let Some(provider) = provider else {
        return Sourced::Degraded(fallback());
    };
    match provider.complete_json(system, user).await {
        Ok(body) => match parse(&body) {
            Some(value) => Sourced::Answered(value),
            None => {
                tracing::warn!(
                    model = %provider.model_name(),
                    "reply did not match the expected shape; serving fallback"
                );
                Sourced::Degraded(fallback())
            }
        },
        Err(e) => {
            tracing::warn!(
                model = %provider.model_name(),
                error = %e,
                "LLM call failed; serving fallback"
            );
            Sourced::Degraded(fallback())
        }
    }
}

/// Read `body[key]` as a list of trimmed strings, capped at `cap`.
/// Non-string entries are stringified rather than dropped; a missing or
/// non-array key yields an empty list.
pub(crate) fn string_list(body: &Value, key: &str, cap: usize) -> Vec<String> {
    body.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|v| match v.as_str() {
                    Some(s) => s.trim().to_string(),
                    None => v.to_string(),
                })
                .take(cap)
                .collect()
        })
        .unwrap_or_default()
}

/// A scriptable provider for tests: returns queued JSON replies in order.
pub struct MockLlmProvider {
    model: String,
    replies: std::sync::Mutex<Vec<Result<Value, LlmError>>>,
}

impl MockLlmProvider {
    pub fn new() -> Self {
        Self {
            model: "mock-model".to_string(),
            replies: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// A provider that always returns the given JSON object.
    pub fn with_reply(reply: Value) -> Self {
        let provider = Self::new();
        for _ in 0..20 {
            provider.queue_reply(Ok(reply.clone()));
        }
        provider
    }

    /// A provider whose every call fails.
    pub fn failing() -> Self {
        let provider = Self::new();
        for _ in 0..20 {
            provider.queue_reply(Err(LlmError::ApiRequest {
                message: "mock failure".to_string(),
            }));
        }
        provider
    }

    /// Queue the reply for the next `complete_json` call (FIFO).
    pub fn queue_reply(&self, reply: Result<Value, LlmError>) {
        self.replies.lock().unwrap().push(reply);
    }

    /// Wrap into a slot handle.
    pub fn into_handle(self) -> LlmHandle {
        Arc::new(self)
    }
}

impl Default for MockLlmProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmProvider for MockLlmProvider {
    async fn complete_json(&self, _system: &str, _user: &str) -> Result<Value, LlmError> {
        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Err(LlmError::ApiRequest {
                message: "mock provider has no queued replies".to_string(),
            });
        }
        replies.remove(0)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_sourced_accessors() {
        let answered = Sourced::Answered(3);
        let degraded = Sourced::Degraded(5);
        assert!(!answered.is_degraded());
        assert!(degraded.is_degraded());
        assert_eq!(*answered.get(), 3);
        assert_eq!(degraded.into_inner(), 5);
        assert_eq!(answered.map(|n| n * 2), Sourced::Answered(6));
    }

    #[test]
    fn test_string_list_parses_and_caps() {
        let body = json!({"apis": [" a ", "b", 3, "d", "e", "f"]});
        assert_eq!(string_list(&body, "apis", 5), vec!["a", "b", "3", "d", "e"]);
    }

    #[test]
    fn test_string_list_missing_or_wrong_type() {
        let body = json!({"apis": "not a list"});
        assert_eq!(string_list(&body, "apis", 5), Vec::<String>::new());
        assert_eq!(string_list(&body, "absent", 5), Vec::<String>::new());
    }

    #[tokio::test]
    async fn test_ask_without_provider_degrades() {
        let result: Sourced<i32> =
            ask(None, "system", "user", |_| Some(1), || 42).await;
        assert_eq!(result, Sourced::Degraded(42));
    }

    #[tokio::test]
    async fn test_ask_with_failing_provider_degrades() {
        let handle = MockLlmProvider::failing().into_handle();
        let result: Sourced<i32> =
            ask(Some(&handle), "system", "user", |_| Some(1), || 42).await;
        assert_eq!(result, Sourced::Degraded(42));
    }

    #[tokio::test]
    async fn test_ask_parses_live_reply() {
        let handle = MockLlmProvider::with_reply(json!({"n": 7})).into_handle();
        let result = ask(
            Some(&handle),
            "system",
            "user",
            |body| body.get("n").and_then(Value::as_i64),
            || 0,
        )
        .await;
        assert_eq!(result, Sourced::Answered(7));
    }

    #[tokio::test]
    async fn test_ask_unparseable_reply_degrades() {
        let handle = MockLlmProvider::with_reply(json!({"other": true})).into_handle();
        let result = ask(
            Some(&handle),
            "system",
            "user",
            |body| body.get("n").and_then(Value::as_i64),
            || -1,
        )
        .await;
        assert_eq!(result, Sourced::Degraded(-1));
    }
}
