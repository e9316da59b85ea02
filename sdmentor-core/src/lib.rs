//! # sdmentor Core
//!
//! Core library for the sdmentor review service.
//! Provides the LLM provider interface, reference-list merging, coverage
//! classification, draw.io label extraction, diagram rendering, and the
//! per-aspect review orchestration consumed by the HTTP server.

pub mod config;
pub mod coverage;
pub mod diagram;
pub mod error;
pub mod llm;
pub mod merge;
pub mod render;
pub mod review;
pub mod text;
pub mod types;

// Re-export commonly used types at the crate root.
pub use config::{AppConfig, LlmConfig, RenderConfig, ServerConfig};
pub use coverage::CoverageMode;
pub use error::{LlmError, MentorError, RenderError, Result};
pub use llm::{LlmHandle, LlmProvider, MockLlmProvider, Sourced};
pub use render::{DiagramKind, DiagramRenderer};
pub use review::Reviewer;
pub use types::CoveragePartition;
