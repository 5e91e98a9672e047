//! Item Selector — picks the best-scoring variation of an item and makes it
//! the only enabled one.

use serde::{Deserialize, Serialize};

use crate::matching::keywords::NormalizedKeywordSet;
use crate::matching::scorer::{TokenCountScorer, VariationScore, VariationScorer};
use crate::models::resume::{Item, Variation};

/// Why a given variation won (or that nothing could).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSelection {
    pub item_id: String,
    /// Position of the winner in `scores`; ids are not required to be unique.
    pub selected_index: Option<usize>,
    pub selected_variation_id: Option<String>,
    pub best_score: f64,
    pub scores: Vec<VariationScore>,
}

#[derive(Debug, Clone)]
pub struct SelectionOutcome {
    pub item: Item,
    pub selection: ItemSelection,
}

/// Selects the best variation using the default unweighted scorer.
pub fn select_best(item: &Item, keywords: &NormalizedKeywordSet) -> Item {
    select_with(item, keywords, &TokenCountScorer).item
}

/// Scores every variation and returns a copy of `item` in which exactly the
/// winner is enabled.
///
/// Ties go to the leftmost variation: the running best is only replaced on a
/// strictly greater score. An item without variations comes back unchanged.
pub fn select_with(
    item: &Item,
    keywords: &NormalizedKeywordSet,
    scorer: &dyn VariationScorer,
) -> SelectionOutcome {
    let scores: Vec<VariationScore> = item
        .variations
        .iter()
        .map(|v| scorer.score(v, keywords))
        .collect();

    let mut best: Option<(usize, f64)> = None;
    for (idx, s) in scores.iter().enumerate() {
        match best {
            Some((_, top)) if s.score <= top => {}
            _ => best = Some((idx, s.score)),
        }
    }

    let Some((winner, best_score)) = best else {
        return SelectionOutcome {
            item: item.clone(),
            selection: ItemSelection {
                item_id: item.id.clone(),
                selected_index: None,
                selected_variation_id: None,
                best_score: 0.0,
                scores,
            },
        };
    };

    let variations: Vec<Variation> = item
        .variations
        .iter()
        .enumerate()
        .map(|(idx, v)| Variation {
            enabled: idx == winner,
            ..v.clone()
        })
        .collect();

    tracing::trace!(
        item_id = %item.id,
        variation_id = %item.variations[winner].id,
        score = best_score,
        "selected variation"
    );

    SelectionOutcome {
        selection: ItemSelection {
            item_id: item.id.clone(),
            selected_index: Some(winner),
            selected_variation_id: Some(item.variations[winner].id.clone()),
            best_score,
            scores,
        },
        item: Item {
            variations,
            ..item.clone()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::keywords::normalize;
    use crate::matching::scorer::WeightedTokenScorer;
    use crate::models::resume::{Keyword, Skill};
    use serde_json::Map;

    fn variation(id: &str, content: &str, enabled: bool) -> Variation {
        Variation {
            enabled,
            ..Variation::new(id, content)
        }
    }

    fn item(variations: Vec<Variation>) -> Item {
        Item {
            id: "i1".to_string(),
            variations,
            extra: Map::new(),
        }
    }

    fn kws(items: &[(&str, f64)]) -> NormalizedKeywordSet {
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

    fn enabled_ids(item: &Item) -> Vec<&str> {
        item.variations
            .iter()
            .filter(|v| v.enabled)
            .map(|v| v.id.as_str())
            .collect()
    }

    #[test]
    fn test_best_match_wins() {
        let input = item(vec![
            variation("v1", "Led backend team", false),
            variation("v2", "Built React dashboards", false),
        ]);
        let out = select_best(&input, &kws(&[("react", 0.9)]));
        assert_eq!(enabled_ids(&out), vec!["v2"]);
        assert!(!out.variations[0].enabled);
    }

    #[test]
    fn test_tie_goes_to_first() {
        let input = item(vec![
            variation("v1", "Led backend team", false),
            variation("v2", "Built React dashboards", false),
        ]);
        let out = select_best(&input, &kws(&[("rust", 1.0)]));
        assert_eq!(enabled_ids(&out), vec!["v1"]);
    }

    #[test]
    fn test_tie_at_nonzero_score_goes_to_first() {
        let input = item(vec![
            variation("v1", "Wrote Go tooling", false),
            variation("v2", "Rust services", false),
            variation("v3", "Go and Rust", false),
            variation("v4", "More Go plus Rust", false),
        ]);
        let out = select_best(&input, &kws(&[("rust", 1.0), ("go", 1.0)]));
        assert_eq!(enabled_ids(&out), vec!["v3"]);
    }

    #[test]
    fn test_flags_fully_overwritten() {
        let input = item(vec![
            variation("v1", "Kubernetes operators", false),
            variation("v2", "Handled billing", true),
            variation("v3", "Handled payroll", true),
        ]);
        let out = select_best(&input, &kws(&[("kubernetes", 0.5)]));
        assert_eq!(enabled_ids(&out), vec!["v1"]);
    }

    #[test]
    fn test_empty_variations_is_noop() {
        let input = item(vec![]);
        let outcome = select_with(&input, &kws(&[("rust", 1.0)]), &TokenCountScorer);
        assert_eq!(outcome.item, input);
        assert_eq!(outcome.selection.selected_variation_id, None);
        assert_eq!(outcome.selection.selected_index, None);
        assert!(outcome.selection.scores.is_empty());
    }

    #[test]
    fn test_input_item_not_mutated() {
        let input = item(vec![
            variation("v1", "Rust", true),
            variation("v2", "Rust and Tokio", false),
        ]);
        let before = input.clone();
        let out = select_best(&input, &kws(&[("rust", 1.0), ("tokio", 1.0)]));
        assert_eq!(input, before);
        assert_eq!(enabled_ids(&out), vec!["v2"]);
    }

    #[test]
    fn test_selection_report_lists_every_score() {
        let input = item(vec![
            variation("v1", "Rust", false),
            variation("v2", "Rust and Tokio", false),
        ]);
        let outcome = select_with(&input, &kws(&[("rust", 1.0), ("tokio", 1.0)]), &TokenCountScorer);
        let sel = &outcome.selection;
        assert_eq!(sel.item_id, "i1");
        assert_eq!(sel.selected_variation_id.as_deref(), Some("v2"));
        assert_eq!(sel.selected_index, Some(1));
        assert!((sel.best_score - 2.0).abs() < f64::EPSILON);
        assert_eq!(sel.scores.len(), 2);
        assert_eq!(sel.scores[1].matched, vec!["rust", "tokio"]);
    }

    #[test]
    fn test_weighted_scorer_changes_winner() {
        let input = item(vec![
            variation("v1", "Python and SQL", false),
            variation("v2", "Rust", false),
        ]);
        let keywords = kws(&[("python", 0.2), ("sql", 0.2), ("rust", 0.9)]);

        let counted = select_with(&input, &keywords, &TokenCountScorer);
        assert_eq!(counted.selection.selected_variation_id.as_deref(), Some("v1"));

        let weighted = select_with(&input, &keywords, &WeightedTokenScorer);
        assert_eq!(weighted.selection.selected_variation_id.as_deref(), Some("v2"));
    }

    #[test]
    fn test_selection_is_deterministic() {
        let input = item(vec![
            variation("v1", "React", false),
            variation("v2", "React", false),
        ]);
        let keywords = kws(&[("react", 1.0)]);
        let first = select_best(&input, &keywords);
        for _ in 0..5 {
            assert_eq!(select_best(&input, &keywords), first);
        }
    }
}
