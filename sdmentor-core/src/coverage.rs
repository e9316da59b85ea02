//! Coverage classification: which reference items the user's answers
//! semantically satisfy.
//!
//! The yes/no judgement per item is delegated to the LLM, but the LLM's
//! reply is untrusted: [`reconcile`] filters it down to exact reference
//! strings and repairs it into a true partition before anything is
//! returned. When no provider is available the classification fails
//! closed: nothing is reported as covered.

use serde_json::Value;

use crate::llm::{self, LlmHandle, Sourced, prompts};
use crate::types::CoveragePartition;

/// Which comparison semantics the LLM is asked to apply. Selects the
/// prompt only; the partition invariants are identical in every mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageMode {
    Generic,
    Requirements,
    Apis,
    Diagram,
    Schema,
}

impl CoverageMode {
    fn system_prompt(self) -> &'static str {
        match self {
            CoverageMode::Diagram => prompts::COVERAGE_DIAGRAM,
            CoverageMode::Schema => prompts::COVERAGE_SCHEMA,
            CoverageMode::Generic | CoverageMode::Requirements | CoverageMode::Apis => {
                prompts::COVERAGE_GENERIC
            }
        }
    }
}

/// Classify which reference items the user's answers cover.
///
/// `api_design` is extra context for `Schema` mode and ignored otherwise.
pub async fn classify(
    provider: Option<&LlmHandle>,
    reference: &[String],
    user_answers: &[String],
    mode: CoverageMode,
    api_design: Option<&[String]>,
) -> Sourced<CoveragePartition> {
    if reference.is_empty() {
        return Sourced::Answered(CoveragePartition::default());
    }

    let user_content = build_user_content(reference, user_answers, mode, api_design);
    llm::ask(
        provider,
        mode.system_prompt(),
        &user_content,
        |body| {
            Some(reconcile(
                reference,
                claimed_list(body, "matched"),
                claimed_list(body, "missed"),
            ))
        },
        || CoveragePartition::all_missed(reference),
    )
    .await
}

/// Repair a claimed matched/missed split into an exact partition of the
/// reference list:
/// - entries that are not character-for-character reference members are
///   dropped (the model may paraphrase or echo user text);
/// - an item claimed in both sets counts as matched;
/// - reference items claimed in neither set are appended to missed;
/// - duplicates are collapsed, first claim wins.
pub fn reconcile(
    reference: &[String],
    claimed_matched: Vec<String>,
    claimed_missed: Vec<String>,
) -> CoveragePartition {
    let mut matched: Vec<String> = Vec::new();
    for item in claimed_matched {
        let item = item.trim().to_string();
        if reference.contains(&item) && !matched.contains(&item) {
            matched.push(item);
        }
    }

    let mut missed: Vec<String> = Vec::new();
    for item in claimed_missed {
        let item = item.trim().to_string();
        if reference.contains(&item) && !matched.contains(&item) && !missed.contains(&item) {
            missed.push(item);
        }
    }

    for item in reference {
        if !matched.contains(item) && !missed.contains(item) {
            missed.push(item.clone());
        }
    }

    CoveragePartition { matched, missed }
}

fn claimed_list(body: &Value, key: &str) -> Vec<String> {
    body.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|v| match v.as_str() {
                    Some(s) => s.to_string(),
                    None => v.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn build_user_content(
    reference: &[String],
    user_answers: &[String],
    mode: CoverageMode,
    api_design: Option<&[String]>,
) -> String {
    let ref_str = bulleted(reference);
    let user_str = if user_answers.is_empty() {
        "(none)".to_string()
    } else {
        bulleted(user_answers)
    };

    match mode {
        CoverageMode::Schema => {
            let mut content = format!(
                "Reference list (expected tables/indexes — use these EXACT strings in matched/missed):\n{ref_str}\n\nUser's schema (what they wrote):\n{user_str}"
            );
            if let Some(apis) = api_design
                && !apis.is_empty()
            {
                content.push_str(&format!("\n\nAPI design (for context):\n{}", bulleted(apis)));
            }
            content
        }
        CoverageMode::Diagram => format!(
            "Reference list (copy these exact strings into your matched/missed lists):\n{ref_str}\n\nUser's list:\n{user_str}"
        ),
        CoverageMode::Generic | CoverageMode::Requirements | CoverageMode::Apis => format!(
            "Reference requirements (use these exact strings in your answer):\n{ref_str}\n\nUser's answers:\n{user_str}"
        ),
    }
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
    use crate::llm::MockLlmProvider;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn reference() -> Vec<String> {
        vec![
            "Load Balancer".to_string(),
            "Database".to_string(),
            "Cache".to_string(),
        ]
    }

    #[test]
    fn test_reconcile_partitions_exactly() {
        let partition = reconcile(
            &reference(),
            vec!["Load Balancer".into()],
            vec!["Database".into(), "Cache".into()],
        );
        assert_eq!(partition.matched, vec!["Load Balancer"]);
        assert_eq!(partition.missed, vec!["Database", "Cache"]);
    }

    #[test]
    fn test_reconcile_drops_paraphrases_and_user_strings() {
        let partition = reconcile(
            &reference(),
            vec!["A load balancer".into(), "Load Balancer".into()],
            vec!["the user's db".into()],
        );
        assert_eq!(partition.matched, vec!["Load Balancer"]);
        // Unclaimed reference items land in missed, the hallucinated
        // strings nowhere.
        assert_eq!(partition.missed, vec!["Database", "Cache"]);
    }

    #[test]
    fn test_reconcile_matched_wins_on_conflict() {
        let partition = reconcile(
            &reference(),
            vec!["Cache".into()],
            vec!["Cache".into(), "Database".into()],
        );
        assert_eq!(partition.matched, vec!["Cache"]);
        assert_eq!(partition.missed, vec!["Database", "Load Balancer"]);
    }

    #[test]
    fn test_reconcile_collapses_duplicates() {
        let partition = reconcile(
            &reference(),
            vec!["Cache".into(), "Cache".into()],
            vec!["Database".into(), "Database".into()],
        );
        assert_eq!(partition.matched.len() + partition.missed.len(), 3);
    }

    #[test]
    fn test_reconcile_trims_whitespace_claims() {
        let partition = reconcile(&reference(), vec!["  Cache  ".into()], vec![]);
        assert_eq!(partition.matched, vec!["Cache"]);
    }

    #[tokio::test]
    async fn test_classify_empty_reference() {
        let result = classify(None, &[], &["anything".into()], CoverageMode::Generic, None).await;
        assert_eq!(result, Sourced::Answered(CoveragePartition::default()));
    }

    #[tokio::test]
    async fn test_classify_without_provider_fails_closed() {
        let result = classify(None, &reference(), &[], CoverageMode::Requirements, None).await;
        assert!(result.is_degraded());
        let partition = result.into_inner();
        assert!(partition.matched.is_empty());
        assert_eq!(partition.missed, reference());
    }

    #[tokio::test]
    async fn test_classify_with_failing_provider_fails_closed() {
        let handle = MockLlmProvider::failing().into_handle();
        let result = classify(
            Some(&handle),
            &reference(),
            &["load balancing tier".into()],
            CoverageMode::Diagram,
            None,
        )
        .await;
        assert!(result.is_degraded());
        assert_eq!(result.into_inner(), CoveragePartition::all_missed(&reference()));
    }

    #[tokio::test]
    async fn test_classify_filters_live_reply() {
        let handle = MockLlmProvider::with_reply(json!({
            "matched": ["Load Balancer", "totally invented item"],
            "missed": ["Database"],
        }))
        .into_handle();
        let result = classify(
            Some(&handle),
            &reference(),
            &["an LB".into()],
            CoverageMode::Diagram,
            None,
        )
        .await;
        assert!(!result.is_degraded());
        let partition = result.into_inner();
        assert_eq!(partition.matched, vec!["Load Balancer"]);
        assert_eq!(partition.missed, vec!["Database", "Cache"]);
    }

    #[test]
    fn test_mode_prompts() {
        assert_eq!(
            CoverageMode::Requirements.system_prompt(),
            CoverageMode::Generic.system_prompt()
        );
        assert_ne!(
            CoverageMode::Schema.system_prompt(),
            CoverageMode::Diagram.system_prompt()
        );
    }
}
