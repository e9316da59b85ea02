//! Diagram rendering via a Kroki-compatible service.
//!
//! Diagram source is POSTed as plain text to `{base}/{kind}/png` and the
//! returned PNG bytes come back as a `data:image/png;base64,...` URL.
//! Callers degrade a failed render to an empty string; a broken renderer
//! never fails a review.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;

use crate::config::RenderConfig;
use crate::error::RenderError;

/// Diagram syntax accepted by the rendering service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramKind {
    Mermaid,
    D2,
}

impl DiagramKind {
    fn path(self) -> &'static str {
        match self {
            DiagramKind::Mermaid => "mermaid",
            DiagramKind::D2 => "d2",
        }
    }
}

/// Client for the rendering service.
pub struct DiagramRenderer {
    client: Client,
    base_url: String,
    enabled: bool,
}

impl DiagramRenderer {
    pub fn new(config: &RenderConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            enabled: config.enabled,
        }
    }

    /// Render diagram source to a PNG data URL.
    ///
    /// Empty source or a disabled renderer yields an empty string without
    /// touching the network.
    pub async fn render_data_url(
        &self,
        kind: DiagramKind,
        source: &str,
    ) -> Result<String, RenderError> {
        let source = source.trim();
        if !self.enabled || source.is_empty() {
            return Ok(String::new());
        }

        let url = format!("{}/{}/png", self.base_url, kind.path());
        let response = self
            .client
            .post(&url)
            .header("Content-Type", "text/plain")
            .body(source.to_string())
            .send()
            .await
            .map_err(|e| RenderError::Request {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RenderError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| RenderError::Request {
            message: e.to_string(),
        })?;
        Ok(format!("data:image/png;base64,{}", BASE64.encode(&bytes)))
    }

    /// Render, degrading to an empty string on any failure.
    pub async fn render_or_empty(&self, kind: DiagramKind, source: &str) -> String {
        match self.render_data_url(kind, source).await {
            Ok(data_url) => data_url,
            Err(e) => {
                tracing::warn!(kind = kind.path(), error = %e, "diagram render failed; returning empty image");
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn disabled_renderer() -> DiagramRenderer {
        DiagramRenderer::new(&RenderConfig {
            enabled: false,
            ..RenderConfig::default()
        })
    }

    #[test]
    fn test_kind_paths() {
        assert_eq!(DiagramKind::Mermaid.path(), "mermaid");
        assert_eq!(DiagramKind::D2.path(), "d2");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let renderer = DiagramRenderer::new(&RenderConfig {
            base_url: "https://kroki.example/".into(),
            ..RenderConfig::default()
        });
        assert_eq!(renderer.base_url, "https://kroki.example");
    }

    #[tokio::test]
    async fn test_disabled_renderer_returns_empty() {
        let renderer = disabled_renderer();
        let url = renderer
            .render_data_url(DiagramKind::Mermaid, "flowchart TB\n A --> B")
            .await
            .unwrap();
        assert_eq!(url, "");
    }

    #[tokio::test]
    async fn test_empty_source_returns_empty_without_request() {
        let renderer = DiagramRenderer::new(&RenderConfig {
            // Unroutable base URL: a request would error, an empty source
            // must short-circuit before it.
            base_url: "http://127.0.0.1:1/".into(),
            ..RenderConfig::default()
        });
        assert_eq!(
            renderer.render_or_empty(DiagramKind::D2, "   ").await,
            ""
        );
    }

    #[tokio::test]
    async fn test_unreachable_renderer_degrades_to_empty() {
        let renderer = DiagramRenderer::new(&RenderConfig {
            base_url: "http://127.0.0.1:1".into(),
            timeout_secs: 1,
            ..RenderConfig::default()
        });
        assert_eq!(
            renderer.render_or_empty(DiagramKind::D2, "a -> b").await,
            ""
        );
    }
}
