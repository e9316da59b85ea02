//! Configuration system for sdmentor.
//!
//! Uses `figment` for layered configuration: defaults -> `sdmentor.toml`
//! -> environment (`SDMENTOR_` prefix, `__` section separator). The
//! resulting [`AppConfig`] is built once at startup and passed explicitly
//! to the components that need it; nothing reads configuration ambiently.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Top-level configuration for the sdmentor service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LlmSlots,
    pub render: RenderConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Origin allowed to call the API (the web frontend).
    pub allowed_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            allowed_origin: "http://localhost:3000".to_string(),
        }
    }
}

/// The two independent LLM slots consulted for every reference list.
///
/// Both slots fall back to static content when their credential is not
/// configured; in the default setup only the primary slot is live.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmSlots {
    pub primary: LlmConfig,
    pub secondary: LlmConfig,
}

/// Configuration for one LLM provider slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider label, for logging. Any OpenAI-compatible endpoint works.
    pub provider: String,
    /// Model identifier sent with each request.
    pub model: String,
    /// Environment variable holding the API key. An unset variable
    /// disables the slot rather than failing startup.
    pub api_key_env: String,
    /// Base URL override; defaults to the OpenAI API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Sampling temperature.
    pub temperature: f64,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            base_url: None,
            temperature: 0.7,
            timeout_secs: 30,
        }
    }
}

/// Configuration for the diagram rendering service (Kroki-compatible).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Whether rendering is attempted at all. Disabled in tests.
    pub enabled: bool,
    /// Base URL of the rendering service.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://kroki.io".to_string(),
            timeout_secs: 15,
        }
    }
}

/// Load configuration: defaults -> optional TOML file -> environment.
///
/// When `config_file` is `None`, `sdmentor.toml` in the working directory
/// is merged if it exists. Environment variables use the `SDMENTOR_`
/// prefix with `__` separating sections, e.g.
/// `SDMENTOR_LLM__PRIMARY__MODEL=gpt-4o`.
pub fn load_config(config_file: Option<&Path>) -> std::result::Result<AppConfig, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

    match config_file {
        Some(path) => {
            figment = figment.merge(Toml::file(path));
        }
        None => {
            let default_path = Path::new("sdmentor.toml");
            if default_path.exists() {
                figment = figment.merge(Toml::file(default_path));
            }
        }
    }

    figment = figment.merge(Env::prefixed("SDMENTOR_").split("__"));

    figment.extract().map_err(|e| ConfigError::ParseError {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.allowed_origin, "http://localhost:3000");
        assert_eq!(config.llm.primary.model, "gpt-4o-mini");
        assert_eq!(config.llm.primary.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.llm.secondary.api_key_env, "OPENAI_API_KEY");
        assert!(config.render.enabled);
        assert_eq!(config.render.base_url, "https://kroki.io");
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.llm.primary.model, config.llm.primary.model);
        assert_eq!(back.render.base_url, config.render.base_url);
    }
}
