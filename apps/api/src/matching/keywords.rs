//! Keyword Normalizer — case-folds and deduplicates extracted JD keywords.

use std::collections::HashMap;

use crate::models::resume::{Keyword, Skill};

/// A keyword after case folding. `level` is the highest seen for its text.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedKeyword {
    pub text: String,
    pub level: f64,
    pub skill: Skill,
}

/// Lookup structure over normalized keywords.
///
/// Iteration follows first-seen order so that anything derived from it
/// (matched keyword lists, reports) is deterministic.
#[derive(Debug, Clone, Default)]
pub struct NormalizedKeywordSet {
    entries: Vec<NormalizedKeyword>,
    index: HashMap<String, usize>,
}

impl NormalizedKeywordSet {
    pub fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }

    pub fn get(&self, token: &str) -> Option<&NormalizedKeyword> {
        self.index.get(token).map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NormalizedKeyword> {
        self.entries.iter()
    }
}

/// Normalizes a keyword list for case-insensitive exact-token matching.
///
/// Duplicates (after lower-casing and trimming) collapse into one entry that
/// keeps the maximum `level` and the skill of the entry carrying it. Blank
/// keywords are dropped.
pub fn normalize(keywords: &[Keyword]) -> NormalizedKeywordSet {
    let mut set = NormalizedKeywordSet::default();

    for kw in keywords {
        let text = kw.keyword.trim().to_lowercase();
        if text.is_empty() {
            continue;
        }

        match set.index.get(&text) {
            Some(&i) => {
                let existing = &mut set.entries[i];
                if kw.level > existing.level {
                    existing.level = kw.level;
                    existing.skill = kw.skill;
                }
            }
            None => {
                set.index.insert(text.clone(), set.entries.len());
                set.entries.push(NormalizedKeyword {
                    text,
                    level: kw.level,
                    skill: kw.skill,
                });
            }
        }
    }

    set
}
