//! Error types for the sdmentor core library.
//!
//! Uses `thiserror` for structured error variants covering the LLM
//! provider, diagram rendering, and configuration domains. Review
//! endpoints never surface these to callers; they degrade to fallback
//! content and the error shows up in logs only.

/// Top-level error type for the sdmentor core library.
#[derive(Debug, thiserror::Error)]
pub enum MentorError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from LLM provider interactions.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("API request failed: {message}")]
    ApiRequest { message: String },

    #[error("API response parse error: {message}")]
    ResponseParse { message: String },

    #[error("Authentication failed for provider {provider}")]
    AuthFailed { provider: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

/// Errors from the diagram rendering service.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Render request failed: {message}")]
    Request { message: String },

    #[error("Render service returned HTTP {status}")]
    Status { status: u16 },
}

/// Errors from the configuration system.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Configuration parse error: {message}")]
    ParseError { message: String },
}

/// A type alias for results using the top-level `MentorError`.
pub type Result<T> = std::result::Result<T, MentorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_llm() {
        let err = MentorError::Llm(LlmError::ApiRequest {
            message: "connection refused".into(),
        });
        assert_eq!(
            err.to_string(),
            "LLM error: API request failed: connection refused"
        );
    }

    #[test]
    fn test_error_display_render() {
        let err = MentorError::Render(RenderError::Status { status: 503 });
        assert_eq!(
            err.to_string(),
            "Render error: Render service returned HTTP 503"
        );
    }

    #[test]
    fn test_error_display_config() {
        let err = MentorError::Config(ConfigError::ParseError {
            message: "bad toml".into(),
        });
        assert_eq!(
            err.to_string(),
            "Configuration error: Configuration parse error: bad toml"
        );
    }

    #[test]
    fn test_llm_error_variants() {
        let err = LlmError::AuthFailed {
            provider: "openai: env var 'OPENAI_API_KEY' not set".into(),
        };
        assert!(err.to_string().contains("OPENAI_API_KEY"));

        let err = LlmError::Timeout { timeout_secs: 30 };
        assert_eq!(err.to_string(), "Request timed out after 30s");
    }

    #[test]
    fn test_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: MentorError = serde_err.into();
        assert!(matches!(err, MentorError::Serialization(_)));
    }
}
