//! Reference-list merging.
//!
//! Every review aspect asks two independent LLM slots for a ranked
//! reference list, then reconciles the two lists here without a third
//! LLM call: keep the items the slots agree on, or fall back to a fixed
//! positional combination when they agree on nothing.

use std::collections::HashSet;

/// Merged lists never exceed this many items.
const MERGE_CAP: usize = 5;
/// Two items are "common" when they share at least this many words.
const COMMON_WORD_THRESHOLD: usize = 2;

/// Items from `first` that share at least two words (case-folded,
/// whitespace-split) with some item of `second`, in `first`'s order,
/// capped at five.
///
/// A word counts once per occurrence on the `first` side whenever it is a
/// member of the `second` item's word set; the first matching `second`
/// item wins and no further pairs are checked for that item.
pub fn find_common(first: &[String], second: &[String]) -> Vec<String> {
    let second_word_sets: Vec<HashSet<String>> = second
        .iter()
        .map(|item| {
            item.to_lowercase()
                .split_whitespace()
                .map(str::to_string)
                .collect()
        })
        .collect();

    let mut common = Vec::new();
    for item in first {
        let lower = item.to_lowercase();
        let words: Vec<&str> = lower.split_whitespace().collect();
        let is_common = second_word_sets.iter().any(|set| {
            words.iter().filter(|w| set.contains(**w)).count() >= COMMON_WORD_THRESHOLD
        });
        if is_common {
            common.push(item.clone());
        }
    }
    common.truncate(MERGE_CAP);
    common
}

/// Fixed positional combination: first three of `first`, first two of
/// `second`, capped at five. Short inputs contribute what they have.
pub fn combine_top(first: &[String], second: &[String]) -> Vec<String> {
    let mut combined: Vec<String> = first.iter().take(3).cloned().collect();
    combined.extend(second.iter().take(2).cloned());
    combined.truncate(MERGE_CAP);
    combined
}

/// Merge two reference lists: the common subset when it is non-empty,
/// otherwise the positional combination.
pub fn merge(first: &[String], second: &[String]) -> Vec<String> {
    let common = find_common(first, second);
    if common.is_empty() {
        combine_top(first, second)
    } else {
        common
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_shared_word_is_not_common() {
        let a = list(&["Response time < 200ms"]);
        let b = list(&["Low latency response"]);
        assert_eq!(find_common(&a, &b), Vec::<String>::new());
    }

    #[test]
    fn test_two_shared_words_are_common() {
        let a = list(&["Low latency reads", "Exactly-once delivery"]);
        let b = list(&["Low latency writes"]);
        assert_eq!(find_common(&a, &b), list(&["Low latency reads"]));
    }

    #[test]
    fn test_comparison_is_case_insensitive() {
        let a = list(&["LOAD BALANCER tier"]);
        let b = list(&["load balancer pool"]);
        assert_eq!(find_common(&a, &b), a);
    }

    #[test]
    fn test_repeated_word_on_left_counts_per_occurrence() {
        let a = list(&["cache the cache keys"]);
        let b = list(&["cache invalidation"]);
        assert_eq!(find_common(&a, &b), a);
    }

    #[test]
    fn test_common_preserves_first_list_order_and_cap() {
        let a = list(&["a b one", "a b two", "a b three", "a b four", "a b five", "a b six"]);
        let b = list(&["a b"]);
        assert_eq!(
            find_common(&a, &b),
            list(&["a b one", "a b two", "a b three", "a b four", "a b five"])
        );
    }

    #[test]
    fn test_combine_top_takes_three_plus_two() {
        let a = list(&["a1", "a2", "a3", "a4"]);
        let b = list(&["b1", "b2", "b3"]);
        assert_eq!(combine_top(&a, &b), list(&["a1", "a2", "a3", "b1", "b2"]));
    }

    #[test]
    fn test_combine_top_with_short_lists() {
        let a = list(&["a1"]);
        let b = list(&["b1"]);
        assert_eq!(combine_top(&a, &b), list(&["a1", "b1"]));
        assert_eq!(combine_top(&[], &[]), Vec::<String>::new());
    }

    #[test]
    fn test_merge_prefers_common_subset() {
        let a = list(&[
            "POST /shorten create short URL",
            "GET /analytics fetch stats",
            "DELETE /urls remove entry",
        ]);
        let b = list(&[
            "POST /shorten create a short URL from a long one",
            "GET /health liveness probe",
        ]);
        // Only the first item shares two or more words; the common-subset
        // strategy fires with a single item and no positional padding.
        assert_eq!(merge(&a, &b), list(&["POST /shorten create short URL"]));
    }

    #[test]
    fn test_merge_falls_back_when_nothing_common() {
        let a = list(&["alpha one", "beta two", "gamma three", "delta four"]);
        let b = list(&["epsilon five", "zeta six", "eta seven"]);
        assert_eq!(
            merge(&a, &b),
            list(&["alpha one", "beta two", "gamma three", "epsilon five", "zeta six"])
        );
    }

    #[test]
    fn test_merge_with_empty_input_uses_fallback() {
        let a = list(&["alpha one", "beta two"]);
        assert_eq!(merge(&a, &[]), a);
        assert_eq!(merge(&[], &a), list(&["alpha one", "beta two"]));
    }
}
