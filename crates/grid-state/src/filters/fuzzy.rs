//! Fuzzy text filter using nucleo-matcher.

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use serde_json::Value;

use super::value_text;

/// Score of `cell` against the fuzzy `query`, or `None` when it does not match.
///
/// An empty query matches everything with score 0.
pub fn fuzzy_rank(cell: &Value, query: &Value) -> Option<u32> {
    let query = value_text(query);
    if query.trim().is_empty() {
        return Some(0);
    }

    let mut matcher = Matcher::new(Config::DEFAULT);
    let pattern = Pattern::new(
        &query,
        CaseMatching::Ignore,
        Normalization::Smart,
        AtomKind::Fuzzy,
    );

    let haystack_text = value_text(cell);
    let mut buf = Vec::new();
    let haystack = Utf32Str::new(&haystack_text, &mut buf);
    pattern.score(haystack, &mut matcher)
}

/// Whether `cell` fuzzily matches `query`.
pub fn fuzzy_text_matches(cell: &Value, query: &Value) -> bool {
    fuzzy_rank(cell, query).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn matches_subsequence_ignoring_case() {
        assert!(fuzzy_text_matches(&json!("Relationship"), &json!("rlshp")));
        assert!(fuzzy_text_matches(&json!("single"), &json!("SIN")));
        assert!(!fuzzy_text_matches(&json!("single"), &json!("complicated")));
    }

    #[test]
    fn numbers_match_by_text() {
        assert!(fuzzy_text_matches(&json!(1234), &json!("23")));
    }

    #[test]
    fn empty_query_matches_everything() {
        assert_eq!(fuzzy_rank(&json!("anything"), &json!("")), Some(0));
        assert!(fuzzy_text_matches(&Value::Null, &json!("  ")));
    }

    #[test]
    fn closer_matches_rank_higher() {
        let exact = fuzzy_rank(&json!("tanner"), &json!("tanner")).unwrap();
        let scattered = fuzzy_rank(&json!("t-a-n-n-e-r"), &json!("tanner")).unwrap();
        assert!(exact > scattered);
    }
}
