//! Core type definitions for the sdmentor review service.
//!
//! Everything here is request-scoped: built fresh per HTTP call, returned
//! to the handler, and dropped after serialization.

use serde::{Deserialize, Serialize};

/// Which reference items the user's submission covered.
///
/// `matched` and `missed` always partition the reference list exactly:
/// together they contain every reference item once, and nothing else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoveragePartition {
    pub matched: Vec<String>,
    pub missed: Vec<String>,
}

impl CoveragePartition {
    /// The fail-closed partition: nothing judged covered.
    pub fn all_missed(reference: &[String]) -> Self {
        Self {
            matched: Vec::new(),
            missed: reference.to_vec(),
        }
    }
}

/// Functional and non-functional requirement lists from one LLM slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementLists {
    pub functional: Vec<String>,
    pub non_functional: Vec<String>,
}

/// Key components plus a suggested diagram from the primary LLM slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagramSuggestion {
    pub elements: Vec<String>,
    /// Mermaid flowchart source.
    pub diagram_source: String,
}

/// Per-line feedback on a user-written estimation or schema line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineFeedback {
    pub user_line: String,
    pub reasonable: bool,
    pub comment: String,
}

/// One deep-dive topic as submitted by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeepDiveEntry {
    pub topic: String,
    pub user_summary: String,
}

/// One API row from the user's API-design step, passed as context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiDesignEntry {
    pub api: String,
    pub request: String,
    pub response: String,
}

/// Result of reviewing the requirements step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementsReview {
    pub functional: Vec<String>,
    pub non_functional: Vec<String>,
    pub functional_coverage: CoveragePartition,
    pub non_functional_coverage: CoveragePartition,
    /// True when any branch of the fan-out served fallback content.
    pub degraded: bool,
}

/// Result of reviewing the API-design step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApisReview {
    pub apis: Vec<String>,
    pub coverage: CoveragePartition,
    pub degraded: bool,
}

/// Result of reviewing the high-level diagram step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramReview {
    pub elements: Vec<String>,
    pub coverage: CoveragePartition,
    /// Mermaid source for a suggested diagram.
    pub suggested_diagram: String,
    /// PNG data URL of the suggested diagram; empty when rendering is
    /// disabled or failed.
    pub suggested_diagram_png: String,
    pub degraded: bool,
}

/// Result of reviewing the back-of-the-envelope estimation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimationReview {
    pub elements: Vec<String>,
    pub coverage: CoveragePartition,
    /// One entry per user estimation line, in input order.
    pub calculation_feedback: Vec<LineFeedback>,
    pub degraded: bool,
}

/// Result of reviewing the data-model step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataModelReview {
    pub elements: Vec<String>,
    pub coverage: CoveragePartition,
    /// One entry per user schema line, in input order.
    pub feedback: Vec<LineFeedback>,
    pub suggested_missing_tables: Vec<String>,
    pub degraded: bool,
}

/// Result of reviewing the end-to-end flow narrative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowReview {
    pub correct: bool,
    pub feedback: String,
    pub improvements: String,
    pub degraded: bool,
}

/// Review of one deep-dive topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepDiveItemReview {
    pub topic: String,
    pub suggested_summary: String,
    pub feedback: String,
}

/// Result of reviewing the deep-dives step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeepDivesReview {
    /// One entry per submitted topic, in input order.
    pub items: Vec<DeepDiveItemReview>,
    pub suggested_missing_topics: Vec<String>,
    pub degraded: bool,
}

/// Result of reviewing the detailed diagram step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailedDiagramReview {
    pub feedback: String,
    pub improvements: String,
    /// D2 source for a suggested detailed diagram.
    pub suggested_diagram: String,
    /// PNG data URL; empty when rendering is disabled or failed.
    pub suggested_diagram_png: String,
    pub degraded: bool,
}

/// Everything the detailed-diagram review receives as interview context.
#[derive(Debug, Clone, Default)]
pub struct DetailedDiagramContext {
    pub requirements: Option<RequirementLists>,
    pub api_design: Vec<ApiDesignEntry>,
    pub data_model: Vec<String>,
    pub high_level_diagram_xml: String,
    pub end_to_end_flow: String,
    pub deep_dives: Vec<DeepDiveEntry>,
}
