//! Per-aspect review orchestration.
//!
//! One method per interview step. Each fans out a fixed set of LLM calls
//! with `tokio::join!`, merges the two reference lists, classifies
//! coverage, and optionally renders a suggested diagram. Every branch of
//! a fan-out degrades to its own static fallback independently; a failed
//! call never fails the request and nothing is retried.

use serde_json::Value;

use crate::config::AppConfig;
use crate::coverage::{self, CoverageMode};
use crate::diagram::extract_labels;
use crate::llm::{self, LlmHandle, Sourced, prompts, string_list, stubs};
use crate::merge::merge;
use crate::render::{DiagramKind, DiagramRenderer};
use crate::types::{
    ApisReview, DataModelReview, DeepDiveEntry, DeepDiveItemReview, DeepDivesReview,
    DetailedDiagramContext, DetailedDiagramReview, DiagramReview, DiagramSuggestion,
    EstimationReview, FlowReview, LineFeedback, RequirementLists, RequirementsReview,
};

/// Placeholder comment when a live reply carried nothing for a line.
const NO_LINE_FEEDBACK: &str = "No specific feedback for this line.";

/// Reference lists keep at most this many items before merging.
const LIST_CAP: usize = 5;
/// Element-style lists (diagram, estimation, schema) allow a couple more.
const ELEMENTS_CAP: usize = 7;

/// Holds the two LLM slots and the diagram renderer; everything else is
/// request-scoped.
pub struct Reviewer {
    primary: Option<LlmHandle>,
    secondary: Option<LlmHandle>,
    renderer: DiagramRenderer,
}

impl Reviewer {
    pub fn new(
        primary: Option<LlmHandle>,
        secondary: Option<LlmHandle>,
        renderer: DiagramRenderer,
    ) -> Self {
        Self {
            primary,
            secondary,
            renderer,
        }
    }

    /// Build both LLM slots and the renderer from configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            llm::create_provider(&config.llm.primary),
            llm::create_provider(&config.llm.secondary),
            DiagramRenderer::new(&config.render),
        )
    }

    /// Review the requirements step: merge two generated requirement
    /// lists per category, then classify the user's coverage of each.
    pub async fn review_requirements(
        &self,
        topic: &str,
        user_functional: &[String],
        user_non_functional: &[String],
    ) -> RequirementsReview {
        let user_content = topic_content(topic);
        let (first, second) = tokio::join!(
            llm::ask(
                self.primary.as_ref(),
                prompts::REQUIREMENTS,
                &user_content,
                parse_requirement_lists,
                stubs::requirements_primary,
            ),
            llm::ask(
                self.secondary.as_ref(),
                prompts::REQUIREMENTS,
                &user_content,
                parse_requirement_lists,
                stubs::requirements_secondary,
            ),
        );

        let functional = merge(&first.get().functional, &second.get().functional);
        let non_functional = merge(&first.get().non_functional, &second.get().non_functional);

        let (functional_coverage, non_functional_coverage) = tokio::join!(
            coverage::classify(
                self.primary.as_ref(),
                &functional,
                user_functional,
                CoverageMode::Requirements,
                None,
            ),
            coverage::classify(
                self.primary.as_ref(),
                &non_functional,
                user_non_functional,
                CoverageMode::Requirements,
                None,
            ),
        );

        let degraded = first.is_degraded()
            || second.is_degraded()
            || functional_coverage.is_degraded()
            || non_functional_coverage.is_degraded();
        RequirementsReview {
            functional,
            non_functional,
            functional_coverage: functional_coverage.into_inner(),
            non_functional_coverage: non_functional_coverage.into_inner(),
            degraded,
        }
    }

    /// Review the API-design step.
    pub async fn review_apis(&self, topic: &str, user_apis: &[String]) -> ApisReview {
        let user_content = topic_content(topic);
        let (first, second) = tokio::join!(
            llm::ask(
                self.primary.as_ref(),
                prompts::APIS,
                &user_content,
                |body| Some(string_list(body, "apis", LIST_CAP)),
                stubs::apis_primary,
            ),
            llm::ask(
                self.secondary.as_ref(),
                prompts::APIS,
                &user_content,
                |body| Some(string_list(body, "apis", LIST_CAP)),
                stubs::apis_secondary,
            ),
        );

        let apis = merge(first.get(), second.get());
        let coverage = coverage::classify(
            self.primary.as_ref(),
            &apis,
            user_apis,
            CoverageMode::Apis,
            None,
        )
        .await;

        let degraded = first.is_degraded() || second.is_degraded() || coverage.is_degraded();
        ApisReview {
            apis,
            coverage: coverage.into_inner(),
            degraded,
        }
    }

    /// Review the high-level diagram step: merge expected components,
    /// compare them against the labels extracted from the user's draw.io
    /// XML, and render the suggested diagram.
    pub async fn review_diagram(&self, topic: &str, diagram_xml: &str) -> DiagramReview {
        let user_content = topic_content(topic);
        let (first, second) = tokio::join!(
            llm::ask(
                self.primary.as_ref(),
                prompts::DIAGRAM,
                &user_content,
                parse_diagram_suggestion,
                stubs::diagram_primary,
            ),
            llm::ask(
                self.secondary.as_ref(),
                prompts::DIAGRAM,
                &user_content,
                |body| Some(string_list(body, "elements", ELEMENTS_CAP)),
                stubs::diagram_secondary,
            ),
        );

        let elements = merge(&first.get().elements, second.get());
        let suggested_diagram = first.get().diagram_source.clone();
        let user_labels = extract_labels(diagram_xml);

        let (coverage, suggested_diagram_png) = tokio::join!(
            coverage::classify(
                self.primary.as_ref(),
                &elements,
                &user_labels,
                CoverageMode::Diagram,
                None,
            ),
            self.renderer
                .render_or_empty(DiagramKind::Mermaid, &suggested_diagram),
        );

        let degraded = first.is_degraded() || second.is_degraded() || coverage.is_degraded();
        DiagramReview {
            elements,
            coverage: coverage.into_inner(),
            suggested_diagram,
            suggested_diagram_png,
            degraded,
        }
    }

    /// Review the estimation step: merge expected estimation items,
    /// classify coverage, and review each user line's numbers in
    /// parallel.
    pub async fn review_estimation(
        &self,
        topic: &str,
        user_estimations: &[String],
    ) -> EstimationReview {
        let user_content = topic_content(topic);
        let (first, second) = tokio::join!(
            llm::ask(
                self.primary.as_ref(),
                prompts::ESTIMATION,
                &user_content,
                |body| Some(string_list(body, "elements", ELEMENTS_CAP)),
                stubs::estimation_primary,
            ),
            llm::ask(
                self.secondary.as_ref(),
                prompts::ESTIMATION,
                &user_content,
                |body| Some(string_list(body, "elements", ELEMENTS_CAP)),
                stubs::estimation_secondary,
            ),
        );

        let elements = merge(first.get(), second.get());
        let (coverage, calculation_feedback) = tokio::join!(
            coverage::classify(
                self.primary.as_ref(),
                &elements,
                user_estimations,
                CoverageMode::Generic,
                None,
            ),
            self.line_feedback(
                prompts::ESTIMATION_CALCULATIONS,
                estimation_lines_content(topic, user_estimations),
                user_estimations,
                stubs::calculation_feedback,
            ),
        );

        let degraded = first.is_degraded()
            || second.is_degraded()
            || coverage.is_degraded()
            || calculation_feedback.is_degraded();
        EstimationReview {
            elements,
            coverage: coverage.into_inner(),
            calculation_feedback: calculation_feedback.into_inner(),
            degraded,
        }
    }

    /// Review the data-model step: merge expected schema elements (API
    /// design as context), classify coverage, and critique each user
    /// schema line in parallel.
    pub async fn review_data_model(
        &self,
        topic: &str,
        user_lines: &[String],
        api_design: &[String],
    ) -> DataModelReview {
        let user_content = data_model_topic_content(topic, api_design);
        let (first, second) = tokio::join!(
            llm::ask(
                self.primary.as_ref(),
                prompts::DATA_MODEL,
                &user_content,
                |body| Some(string_list(body, "elements", ELEMENTS_CAP)),
                stubs::data_model_primary,
            ),
            llm::ask(
                self.secondary.as_ref(),
                prompts::DATA_MODEL,
                &user_content,
                |body| Some(string_list(body, "elements", ELEMENTS_CAP)),
                stubs::data_model_secondary,
            ),
        );

        let elements = merge(first.get(), second.get());
        let (coverage, feedback) = tokio::join!(
            coverage::classify(
                self.primary.as_ref(),
                &elements,
                user_lines,
                CoverageMode::Schema,
                Some(api_design),
            ),
            self.data_model_feedback(topic, user_lines, api_design),
        );

        let (feedback_lines, suggested_missing_tables) = feedback.get().clone();
        let degraded = first.is_degraded()
            || second.is_degraded()
            || coverage.is_degraded()
            || feedback.is_degraded();
        DataModelReview {
            elements,
            coverage: coverage.into_inner(),
            feedback: feedback_lines,
            suggested_missing_tables,
            degraded,
        }
    }

    /// Review the end-to-end flow narrative. Diagram XML, when present,
    /// contributes component labels as context.
    pub async fn review_flow(
        &self,
        topic: &str,
        flow_summary: &str,
        diagram_xml: &str,
    ) -> FlowReview {
        let labels = if diagram_xml.trim().is_empty() {
            Vec::new()
        } else {
            extract_labels(diagram_xml)
        };
        let user_content = flow_content(topic, flow_summary, &labels);
        llm::ask(
            self.primary.as_ref(),
            prompts::FLOW,
            &user_content,
            parse_flow_review,
            stubs::flow_review,
        )
        .await
        .into_inner()
    }

    /// Review the deep-dives step. Empty input yields an empty review
    /// without an LLM call.
    pub async fn review_deep_dives(
        &self,
        topic: &str,
        entries: &[DeepDiveEntry],
    ) -> DeepDivesReview {
        if entries.is_empty() {
            return DeepDivesReview::default();
        }
        let user_content = deep_dives_content(topic, entries);
        llm::ask(
            self.primary.as_ref(),
            prompts::DEEP_DIVES,
            &user_content,
            |body| parse_deep_dives(body, entries),
            || stubs::deep_dives_review(entries),
        )
        .await
        .into_inner()
    }

    /// Review the detailed diagram against the full interview context and
    /// render the suggested replacement diagram.
    pub async fn review_detailed_diagram(
        &self,
        topic: &str,
        diagram_xml: &str,
        context: &DetailedDiagramContext,
    ) -> DetailedDiagramReview {
        let labels = extract_labels(diagram_xml);
        let user_content = detailed_diagram_content(topic, &labels, context);
        let mut review = llm::ask(
            self.primary.as_ref(),
            prompts::DETAILED_DIAGRAM,
            &user_content,
            parse_detailed_diagram,
            stubs::detailed_diagram_review,
        )
        .await
        .into_inner();

        review.suggested_diagram_png = self
            .renderer
            .render_or_empty(DiagramKind::D2, &review.suggested_diagram)
            .await;
        review
    }

    /// Shared per-line feedback call: ask, parse the `feedback` array,
    /// realign to the user's lines. Empty input skips the call entirely.
    async fn line_feedback(
        &self,
        system: &'static str,
        user_content: String,
        user_lines: &[String],
        fallback: fn(&[String]) -> Vec<LineFeedback>,
    ) -> Sourced<Vec<LineFeedback>> {
        if user_lines.is_empty() {
            return Sourced::Answered(Vec::new());
        }
        llm::ask(
            self.primary.as_ref(),
            system,
            &user_content,
            |body| {
                let raw = body.get("feedback").and_then(Value::as_array)?;
                Some(realign_line_feedback(user_lines, raw))
            },
            || fallback(user_lines),
        )
        .await
    }

    /// Data-model critique: per-line feedback plus suggested missing
    /// tables from the same reply.
    async fn data_model_feedback(
        &self,
        topic: &str,
        user_lines: &[String],
        api_design: &[String],
    ) -> Sourced<(Vec<LineFeedback>, Vec<String>)> {
        if user_lines.is_empty() {
            return Sourced::Answered((Vec::new(), Vec::new()));
        }
        let user_content = data_model_lines_content(topic, user_lines, api_design);
        llm::ask(
            self.primary.as_ref(),
            prompts::DATA_MODEL_FEEDBACK,
            &user_content,
            |body| {
                let raw = body.get("feedback").and_then(Value::as_array)?;
                let feedback = realign_line_feedback(user_lines, raw);
                let mut suggested = suggested_missing_tables(body);
                suggested.retain(|table| !table.is_empty());
                Some((feedback, suggested))
            },
            || (stubs::data_model_feedback(user_lines), Vec::new()),
        )
        .await
    }
}

/// Realign a raw per-line feedback array to the user's lines: exactly one
/// entry per line, in input order, matched by exact (trimmed) text;
/// unmatched lines and entries without a boolean verdict get a neutral
/// placeholder.
fn realign_line_feedback(user_lines: &[String], raw: &[Value]) -> Vec<LineFeedback> {
    user_lines
        .iter()
        .map(|line| {
            let line = line.trim();
            let claimed = raw
                .iter()
                .find(|entry| {
                    entry
                        .get("userLine")
                        .and_then(Value::as_str)
                        .map(str::trim)
                        == Some(line)
                })
                .and_then(|entry| {
                    entry
                        .get("reasonable")
                        .and_then(Value::as_bool)
                        .map(|reasonable| (entry, reasonable))
                });
            match claimed {
                Some((entry, reasonable)) => LineFeedback {
                    user_line: line.to_string(),
                    reasonable,
                    comment: entry
                        .get("comment")
                        .and_then(Value::as_str)
                        .map(str::trim)
                        .filter(|comment| !comment.is_empty())
                        .unwrap_or("No comment.")
                        .to_string(),
                },
                None => LineFeedback {
                    user_line: line.to_string(),
                    reasonable: true,
                    comment: NO_LINE_FEEDBACK.to_string(),
                },
            }
        })
        .collect()
}

fn parse_requirement_lists(body: &Value) -> Option<RequirementLists> {
    Some(RequirementLists {
        functional: string_list(body, "functional_requirements", LIST_CAP),
        non_functional: string_list(body, "non_functional_requirements", LIST_CAP),
    })
}

fn parse_diagram_suggestion(body: &Value) -> Option<DiagramSuggestion> {
    let elements = string_list(body, "elements", ELEMENTS_CAP);
    let mut diagram_source = body
        .get("mermaid_diagram")
        .or_else(|| body.get("suggested_diagram"))
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    if diagram_source.is_empty() {
        diagram_source = stubs::diagram_primary().diagram_source;
    }
    Some(DiagramSuggestion {
        elements,
        diagram_source,
    })
}

fn parse_flow_review(body: &Value) -> Option<FlowReview> {
    let correct = body.get("correct").and_then(Value::as_bool)?;
    let feedback = body.get("feedback").and_then(Value::as_str)?.trim();
    if feedback.is_empty() {
        return None;
    }
    Some(FlowReview {
        correct,
        feedback: feedback.to_string(),
        improvements: body
            .get("improvements")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string(),
        degraded: false,
    })
}

/// Realign the reply's items to the submitted topics, matched by exact
/// (trimmed) topic text; topics the model skipped get an empty review.
fn parse_deep_dives(body: &Value, entries: &[DeepDiveEntry]) -> Option<DeepDivesReview> {
    let raw = body.get("items").and_then(Value::as_array)?;
    let items = entries
        .iter()
        .map(|entry| {
            let topic = entry.topic.trim();
            let claimed = raw.iter().find(|item| {
                item.get("topic").and_then(Value::as_str).map(str::trim) == Some(topic)
            });
            DeepDiveItemReview {
                topic: topic.to_string(),
                suggested_summary: claimed
                    .and_then(|item| item.get("suggestedSummary"))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
                feedback: claimed
                    .and_then(|item| item.get("feedback"))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
            }
        })
        .collect();
    let mut suggested_missing_topics = string_list(body, "suggestedMissingTopics", ELEMENTS_CAP);
    suggested_missing_topics.retain(|topic| !topic.is_empty());
    Some(DeepDivesReview {
        items,
        suggested_missing_topics,
        degraded: false,
    })
}

fn parse_detailed_diagram(body: &Value) -> Option<DetailedDiagramReview> {
    let feedback = body.get("feedback").and_then(Value::as_str)?.trim();
    if feedback.is_empty() {
        return None;
    }
    let suggested_diagram = body
        .get("d2_diagram")
        .or_else(|| body.get("suggested_diagram"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string();
    Some(DetailedDiagramReview {
        feedback: feedback.to_string(),
        improvements: body
            .get("improvements")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string(),
        suggested_diagram,
        suggested_diagram_png: String::new(),
        degraded: false,
    })
}

fn suggested_missing_tables(body: &Value) -> Vec<String> {
    let key = if body.get("suggestedMissingTables").is_some() {
        "suggestedMissingTables"
    } else {
        "suggested_missing_tables"
    };
    string_list(body, key, ELEMENTS_CAP)
}

fn topic_content(topic: &str) -> String {
    format!("System design topic: {topic}")
}

fn data_model_topic_content(topic: &str, api_design: &[String]) -> String {
    let mut content = topic_content(topic);
    if !api_design.is_empty() {
        content.push_str(&format!(
            "\n\nAPI design (from interview summary) — suggest tables that support these APIs:\n{}",
            bulleted(api_design)
        ));
    }
    content
}

fn estimation_lines_content(topic: &str, user_lines: &[String]) -> String {
    format!(
        "System design topic: {topic}\n\nUser's estimation lines (one per line):\n{}",
        user_lines.join("\n")
    )
}

fn data_model_lines_content(topic: &str, user_lines: &[String], api_design: &[String]) -> String {
    let mut content = format!(
        "System design topic: {topic}\n\nUser's data model (one per line):\n{}",
        user_lines.join("\n")
    );
    if !api_design.is_empty() {
        content.push_str(&format!(
            "\n\nAPI design (validate schema against these):\n{}",
            bulleted(api_design)
        ));
    }
    content
}

fn flow_content(topic: &str, flow_summary: &str, labels: &[String]) -> String {
    let mut content = format!(
        "System design topic: {topic}\n\nUser's end-to-end flow summary:\n{flow_summary}"
    );
    if !labels.is_empty() {
        content.push_str(&format!(
            "\n\nComponent labels from the user's diagram:\n{}",
            bulleted(labels)
        ));
    }
    content
}

fn deep_dives_content(topic: &str, entries: &[DeepDiveEntry]) -> String {
    let items = entries
        .iter()
        .map(|entry| {
            if entry.user_summary.trim().is_empty() {
                format!("- {} (no summary)", entry.topic.trim())
            } else {
                format!("- {}: {}", entry.topic.trim(), entry.user_summary.trim())
            }
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("System design topic: {topic}\n\nUser's deep-dive topics:\n{items}")
}

fn detailed_diagram_content(
    topic: &str,
    labels: &[String],
    context: &DetailedDiagramContext,
) -> String {
    let mut content = format!("System design topic: {topic}");
    if labels.is_empty() {
        content.push_str("\n\nLabels from the user's detailed diagram: (none)");
    } else {
        content.push_str(&format!(
            "\n\nLabels from the user's detailed diagram:\n{}",
            bulleted(labels)
        ));
    }
    if let Some(requirements) = &context.requirements {
        content.push_str(&format!(
            "\n\nRequirements:\n{}\n{}",
            bulleted(&requirements.functional),
            bulleted(&requirements.non_functional)
        ));
    }
    if !context.api_design.is_empty() {
        let apis = context
            .api_design
            .iter()
            .map(|row| {
                let mut line = format!("- {}", row.api);
                if !row.request.is_empty() {
                    line.push_str(&format!(" | request: {}", row.request));
                }
                if !row.response.is_empty() {
                    line.push_str(&format!(" | response: {}", row.response));
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n");
        content.push_str(&format!("\n\nAPI design:\n{apis}"));
    }
    if !context.data_model.is_empty() {
        content.push_str(&format!(
            "\n\nData model:\n{}",
            bulleted(&context.data_model)
        ));
    }
    let high_level_labels = extract_labels(&context.high_level_diagram_xml);
    if !high_level_labels.is_empty() {
        content.push_str(&format!(
            "\n\nHigh-level diagram components:\n{}",
            bulleted(&high_level_labels)
        ));
    }
    if !context.end_to_end_flow.trim().is_empty() {
        content.push_str(&format!(
            "\n\nEnd-to-end flow:\n{}",
            context.end_to_end_flow.trim()
        ));
    }
    if !context.deep_dives.is_empty() {
        let dives = context
            .deep_dives
            .iter()
            .map(|entry| format!("- {}: {}", entry.topic.trim(), entry.user_summary.trim()))
            .collect::<Vec<_>>()
            .join("\n");
        content.push_str(&format!("\n\nDeep dives:\n{dives}"));
    }
    content
}

fn bulleted(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::llm::MockLlmProvider;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn offline_reviewer() -> Reviewer {
        Reviewer::new(
            None,
            None,
            DiagramRenderer::new(&RenderConfig {
                enabled: false,
                ..RenderConfig::default()
            }),
        )
    }

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_realign_feedback_matches_by_exact_line() {
        let user_lines = lines(&["QPS = 1000", "Storage = 1 TB"]);
        let raw = vec![
            json!({"userLine": "Storage = 1 TB", "reasonable": false, "comment": "Too low."}),
            json!({"userLine": "QPS = 1000", "reasonable": true, "comment": "Fine."}),
        ];
        let feedback = realign_line_feedback(&user_lines, &raw);
        assert_eq!(feedback.len(), 2);
        assert_eq!(feedback[0].user_line, "QPS = 1000");
        assert!(feedback[0].reasonable);
        assert_eq!(feedback[1].comment, "Too low.");
        assert!(!feedback[1].reasonable);
    }

    #[test]
    fn test_realign_feedback_fills_unmatched_lines() {
        let user_lines = lines(&["QPS = 1000"]);
        let raw = vec![json!({"userLine": "something else", "reasonable": false, "comment": "?"})];
        let feedback = realign_line_feedback(&user_lines, &raw);
        assert_eq!(feedback[0].comment, NO_LINE_FEEDBACK);
        assert!(feedback[0].reasonable);
    }

    #[test]
    fn test_realign_feedback_requires_boolean_verdict() {
        let user_lines = lines(&["QPS = 1000"]);
        let raw = vec![json!({"userLine": "QPS = 1000", "reasonable": "yes", "comment": "?"})];
        let feedback = realign_line_feedback(&user_lines, &raw);
        assert_eq!(feedback[0].comment, NO_LINE_FEEDBACK);
    }

    #[test]
    fn test_realign_feedback_defaults_empty_comment() {
        let user_lines = lines(&["QPS = 1000"]);
        let raw = vec![json!({"userLine": "QPS = 1000", "reasonable": false, "comment": ""})];
        let feedback = realign_line_feedback(&user_lines, &raw);
        assert_eq!(feedback[0].comment, "No comment.");
        assert!(!feedback[0].reasonable);
    }

    #[test]
    fn test_parse_diagram_suggestion_accepts_both_keys() {
        let body = json!({"elements": ["A", "B"], "suggested_diagram": "flowchart LR\n A --> B"});
        let suggestion = parse_diagram_suggestion(&body).unwrap();
        assert_eq!(suggestion.diagram_source, "flowchart LR\n A --> B");

        let body = json!({"elements": [], "mermaid_diagram": ""});
        let suggestion = parse_diagram_suggestion(&body).unwrap();
        // Empty diagram source falls back to the canned one.
        assert!(suggestion.diagram_source.starts_with("flowchart TB"));
    }

    #[tokio::test]
    async fn test_offline_requirements_review_is_deterministic() {
        let review = offline_reviewer()
            .review_requirements("URL Shortener", &lines(&["shorten links"]), &[])
            .await;
        assert!(review.degraded);
        // The two stub lists share no two-word overlap, so the positional
        // combination applies.
        assert_eq!(
            review.functional,
            lines(&[
                "User authentication and authorization",
                "Core feature implementation",
                "Data storage and retrieval",
                "User management",
                "Core business logic",
            ])
        );
        assert_eq!(
            review.non_functional,
            lines(&[
                "Scalability to handle 1M+ users",
                "99.9% uptime",
                "Response time < 200ms",
                "Horizontal scalability",
                "High availability",
            ])
        );
        // Fail-closed: nothing judged covered without a provider.
        assert!(review.functional_coverage.matched.is_empty());
        assert_eq!(review.functional_coverage.missed, review.functional);
        assert_eq!(review.non_functional_coverage.missed, review.non_functional);
    }

    #[tokio::test]
    async fn test_offline_estimation_review_keeps_common_subset() {
        let review = offline_reviewer()
            .review_estimation("URL Shortener", &lines(&["QPS = 1000"]))
            .await;
        // "Queries per second (QPS)" and "Requests per second" share
        // "per" and "second"; nothing else overlaps, so the common-subset
        // strategy fires with that single item.
        assert_eq!(review.elements, lines(&["Queries per second (QPS)"]));
        assert_eq!(review.coverage.missed, review.elements);
        assert_eq!(review.calculation_feedback.len(), 1);
        assert_eq!(
            review.calculation_feedback[0].comment,
            "Stub: enable OpenAI API key for calculation review."
        );
        assert!(review.degraded);
    }

    #[tokio::test]
    async fn test_offline_estimation_review_empty_lines_skip_feedback() {
        let review = offline_reviewer()
            .review_estimation("URL Shortener", &[])
            .await;
        assert!(review.calculation_feedback.is_empty());
    }

    #[tokio::test]
    async fn test_offline_diagram_review() {
        let xml = r#"<root><mxCell id="1" value="Load Balancer"/></root>"#;
        let review = offline_reviewer().review_diagram("URL Shortener", xml).await;
        assert_eq!(
            review.elements,
            lines(&[
                "Load Balancer",
                "API Server",
                "Database",
                "Web Server",
                "Application Server",
            ])
        );
        assert!(review.suggested_diagram.starts_with("flowchart TB"));
        assert_eq!(review.suggested_diagram_png, "");
        assert_eq!(review.coverage.missed, review.elements);
    }

    #[tokio::test]
    async fn test_offline_data_model_review() {
        let review = offline_reviewer()
            .review_data_model("URL Shortener", &lines(&["urls (short, long)"]), &[])
            .await;
        // Stub schema lists agree on four of five items by shared words.
        assert_eq!(
            review.elements,
            lines(&[
                "Users (id, email, createdAt)",
                "ShortUrl (shortCode, longUrl, userId, createdAt)",
                "Index on ShortUrl.shortCode",
                "Index on ShortUrl.userId",
            ])
        );
        assert_eq!(review.feedback.len(), 1);
        assert!(review.suggested_missing_tables.is_empty());
    }

    #[tokio::test]
    async fn test_offline_flow_review() {
        let review = offline_reviewer()
            .review_flow("URL Shortener", "client -> lb -> api -> db", "")
            .await;
        assert!(review.correct);
        assert!(review.degraded);
        assert_eq!(review.feedback, "Stub: enable OpenAI API key for flow review.");
    }

    #[tokio::test]
    async fn test_offline_deep_dives_review() {
        let entries = vec![DeepDiveEntry {
            topic: "Sharding".into(),
            user_summary: String::new(),
        }];
        let review = offline_reviewer()
            .review_deep_dives("URL Shortener", &entries)
            .await;
        assert_eq!(review.items.len(), 1);
        assert_eq!(review.items[0].topic, "Sharding");
        assert!(review.degraded);
    }

    #[tokio::test]
    async fn test_deep_dives_empty_input_skips_call() {
        let review = offline_reviewer().review_deep_dives("URL Shortener", &[]).await;
        assert_eq!(review, DeepDivesReview::default());
    }

    #[tokio::test]
    async fn test_offline_detailed_diagram_review() {
        let review = offline_reviewer()
            .review_detailed_diagram("URL Shortener", "", &DetailedDiagramContext::default())
            .await;
        assert!(review.degraded);
        assert!(review.suggested_diagram.contains("->"));
        assert_eq!(review.suggested_diagram_png, "");
    }

    #[tokio::test]
    async fn test_live_requirements_coverage_uses_exact_reference_strings() {
        // Primary answers every call with one shaped reply; the coverage
        // calls only pick up the keys they understand.
        let reply = json!({
            "functional_requirements": ["Create short links", "Redirect visitors"],
            "non_functional_requirements": ["Low latency reads", "High availability"],
            "matched": ["Create short links"],
            "missed": [],
        });
        let primary = MockLlmProvider::with_reply(reply).into_handle();
        let reviewer = Reviewer::new(
            Some(primary),
            None,
            DiagramRenderer::new(&RenderConfig {
                enabled: false,
                ..RenderConfig::default()
            }),
        );
        let review = reviewer
            .review_requirements("URL Shortener", &lines(&["users can shorten URLs"]), &[])
            .await;
        // Secondary slot is offline, so its stub list merges against the
        // live primary list.
        assert!(review.degraded);
        assert!(review.functional.contains(&"Create short links".to_string()));
        assert!(review.functional_coverage.matched.contains(&"Create short links".to_string()));
        let total = review.functional_coverage.matched.len() + review.functional_coverage.missed.len();
        assert_eq!(total, review.functional.len());
    }
}
