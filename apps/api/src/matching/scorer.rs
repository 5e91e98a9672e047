//! Variation Scorer — pluggable, trait-based scoring of one variation against
//! a normalized keyword set.
//!
//! Default: `TokenCountScorer` (unweighted count of exact token matches).
//! Alternative: `WeightedTokenScorer` (sums `level` of matched keywords), only
//! active when explicitly configured via `SCORING_MODE=weighted`.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::matching::keywords::NormalizedKeywordSet;
use crate::models::resume::Variation;

/// Splits on runs of anything outside the ASCII word class.
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9A-Za-z_]+").expect("valid regex"));

/// Score of a single variation, with the keywords that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariationScore {
    pub variation_id: String,
    pub score: f64,
    /// Matched keywords in normalized-set order.
    pub matched: Vec<String>,
}

/// The scorer trait. Implementations must be pure and deterministic.
pub trait VariationScorer: Send + Sync {
    fn score(&self, variation: &Variation, keywords: &NormalizedKeywordSet) -> VariationScore;

    /// Backend name surfaced in match reports.
    fn backend(&self) -> &'static str;
}

/// Counts keywords that appear verbatim among the variation's tokens.
/// `level` is deliberately not applied.
pub struct TokenCountScorer;

impl VariationScorer for TokenCountScorer {
    fn score(&self, variation: &Variation, keywords: &NormalizedKeywordSet) -> VariationScore {
        let matched = matched_keywords(variation.content(), keywords);
        VariationScore {
            variation_id: variation.id.clone(),
            score: matched.len() as f64,
            matched,
        }
    }

    fn backend(&self) -> &'static str {
        "count"
    }
}

/// Same matching rule as `TokenCountScorer`, but each hit contributes its
/// keyword's `level` instead of 1.
pub struct WeightedTokenScorer;

impl VariationScorer for WeightedTokenScorer {
    fn score(&self, variation: &Variation, keywords: &NormalizedKeywordSet) -> VariationScore {
        let matched = matched_keywords(variation.content(), keywords);
        let score = matched
            .iter()
            .filter_map(|text| keywords.get(text))
            .map(|kw| kw.level)
            .sum();
        VariationScore {
            variation_id: variation.id.clone(),
            score,
            matched,
        }
    }

    fn backend(&self) -> &'static str {
        "weighted"
    }
}

/// Scorer selection, read from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScoringMode {
    #[default]
    Count,
    Weighted,
}

impl ScoringMode {
    pub fn scorer(self) -> Arc<dyn VariationScorer> {
        match self {
            ScoringMode::Count => Arc::new(TokenCountScorer),
            ScoringMode::Weighted => Arc::new(WeightedTokenScorer),
        }
    }
}

impl FromStr for ScoringMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "count" => Ok(ScoringMode::Count),
            "weighted" => Ok(ScoringMode::Weighted),
            other => anyhow::bail!("unknown scoring mode '{other}' (expected 'count' or 'weighted')"),
        }
    }
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringMode::Count => f.write_str("count"),
            ScoringMode::Weighted => f.write_str("weighted"),
        }
    }
}

/// Scores a variation with the default unweighted scorer.
pub fn score(variation: &Variation, keywords: &NormalizedKeywordSet) -> VariationScore {
    TokenCountScorer.score(variation, keywords)
}

/// Lower-cased word tokens of `content`. Empty pieces from leading or
/// trailing punctuation are discarded.
pub fn tokenize(content: &str) -> HashSet<String> {
    NON_WORD
        .split(content)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn matched_keywords(content: &str, keywords: &NormalizedKeywordSet) -> Vec<String> {
    if keywords.is_empty() || content.trim().is_empty() {
        return Vec::new();
    }

    let tokens = tokenize(content);
    keywords
        .iter()
        .filter(|kw| tokens.contains(&kw.text))
        .map(|kw| kw.text.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::keywords::normalize;
    use crate::models::resume::{Keyword, Skill};

    fn variation(id: &str, content: &str) -> Variation {
        Variation::new(id, content)
    }

    fn keywords(items: &[(&str, f64)]) -> NormalizedKeywordSet {
        let raw: Vec<Keyword> = items
            .iter()
            .map(|(k, l)| Keyword {
                keyword: k.to_string(),
                level: *l,
                skill: Skill::Hard,
            })
            .collect();
        normalize(&raw)
    }

    #[test]
    fn test_tokenize_splits_on_punctuation_and_lowercases() {
        let tokens = tokenize("Built React/Redux dashboards, shipped CI-CD!");
        for expected in ["built", "react", "redux", "dashboards", "shipped", "ci", "cd"] {
            assert!(tokens.contains(expected), "missing token {expected}");
        }
        assert!(!tokens.contains(""));
    }

    #[test]
    fn test_tokenize_keeps_underscores_and_digits() {
        let tokens = tokenize("tuned snake_case py3 code");
        assert!(tokens.contains("snake_case"));
        assert!(tokens.contains("py3"));
    }

    #[test]
    fn test_counts_each_keyword_once() {
        let kws = keywords(&[("react", 0.9), ("typescript", 0.5), ("go", 0.2)]);
        let result = score(&variation("v1", "React and TypeScript; more React"), &kws);
        assert!((result.score - 2.0).abs() < f64::EPSILON);
        assert_eq!(result.matched, vec!["react", "typescript"]);
        assert_eq!(result.variation_id, "v1");
    }

    #[test]
    fn test_exact_token_not_substring() {
        let kws = keywords(&[("react", 0.9)]);
        let result = score(&variation("v1", "Reactive systems in Preact"), &kws);
        assert_eq!(result.score, 0.0);
        assert!(result.matched.is_empty());
    }

    #[test]
    fn test_multi_word_keyword_never_matches_single_token() {
        let kws = keywords(&[("distributed systems", 1.0)]);
        let result = score(&variation("v1", "Designed distributed systems"), &kws);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_empty_keywords_score_zero() {
        let result = score(&variation("v1", "Led backend team"), &NormalizedKeywordSet::default());
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_blank_content_scores_zero() {
        let kws = keywords(&[("rust", 1.0)]);
        assert_eq!(score(&variation("v1", ""), &kws).score, 0.0);
        assert_eq!(score(&variation("v2", "   \n\t"), &kws).score, 0.0);
    }

    #[test]
    fn test_padded_keyword_matches_token() {
        let kws = keywords(&[(" React ", 0.9)]);
        let result = score(&variation("v1", "Built React dashboards"), &kws);
        assert_eq!(result.matched, vec!["react"]);
    }

    #[test]
    fn test_non_string_content_scores_zero() {
        let kws = keywords(&[("rust", 1.0)]);
        let v: Variation =
            serde_json::from_value(serde_json::json!({"id": "v1", "content": ["rust"]})).unwrap();
        assert_eq!(score(&v, &kws).score, 0.0);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let kws = keywords(&[("rust", 1.0), ("tokio", 0.4)]);
        let v = variation("v1", "Rust services on Tokio");
        assert_eq!(score(&v, &kws), score(&v, &kws));
    }

    #[test]
    fn test_weighted_scorer_sums_levels() {
        let kws = keywords(&[("rust", 0.75), ("tokio", 0.5), ("kafka", 0.9)]);
        let result = WeightedTokenScorer.score(&variation("v1", "Rust on Tokio"), &kws);
        assert!((result.score - 1.25).abs() < 1e-9, "score was {}", result.score);
        assert_eq!(result.matched, vec!["rust", "tokio"]);
    }

    #[test]
    fn test_scoring_mode_parse_and_backend() {
        assert_eq!("count".parse::<ScoringMode>().unwrap(), ScoringMode::Count);
        assert_eq!(" Weighted ".parse::<ScoringMode>().unwrap(), ScoringMode::Weighted);
        assert!("fuzzy".parse::<ScoringMode>().is_err());
        assert_eq!(ScoringMode::Count.scorer().backend(), "count");
        assert_eq!(ScoringMode::Weighted.scorer().backend(), "weighted");
        assert_eq!(ScoringMode::default().to_string(), "count");
    }
}
