//! Resume Composer — runs normalize → select → truncate over a whole resume
//! and assembles the final document.
//!
//! The input resume is only borrowed; every returned structure is freshly
//! built, so one resume can be matched against many keyword sets.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matching::keywords::normalize;
use crate::matching::scorer::{TokenCountScorer, VariationScorer};
use crate::matching::selector::{select_with, ItemSelection};
use crate::matching::truncator::{truncate_with_report, TruncationPolicy};
use crate::models::resume::{Experience, Keyword, ResumeContent};

// ────────────────────────────────────────────────────────────────────────────
// Report models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceReport {
    pub experience_id: String,
    pub item_limit: usize,
    pub dropped_items: usize,
    /// Selections for the items that survived truncation, in order.
    pub selections: Vec<ItemSelection>,
}

/// Explains a match: which variation won each kept item and what was cut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub scorer_backend: String,
    /// Distinct keywords after normalization.
    pub keyword_count: usize,
    /// Matched keywords summed over the winning variations of kept items.
    pub matched_hits: usize,
    pub experiences: Vec<ExperienceReport>,
}

#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub resume: ResumeContent,
    pub report: MatchReport,
}

// ────────────────────────────────────────────────────────────────────────────
// Matcher
// ────────────────────────────────────────────────────────────────────────────

/// A configured matching engine: scorer backend plus truncation policy.
#[derive(Clone)]
pub struct Matcher {
    scorer: Arc<dyn VariationScorer>,
    policy: TruncationPolicy,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(Arc::new(TokenCountScorer), TruncationPolicy::default())
    }
}

impl Matcher {
    pub fn new(scorer: Arc<dyn VariationScorer>, policy: TruncationPolicy) -> Self {
        Self { scorer, policy }
    }

    pub fn backend(&self) -> &'static str {
        self.scorer.backend()
    }

    pub fn policy(&self) -> &TruncationPolicy {
        &self.policy
    }

    /// Builds the final resume for `keywords`.
    ///
    /// `None` keywords means no job description has been analyzed yet and
    /// yields `None`. An empty list is valid: every variation scores 0 and
    /// the first variation of each item wins.
    pub fn compose(
        &self,
        resume: &ResumeContent,
        keywords: Option<&[Keyword]>,
    ) -> Option<MatchOutcome> {
        let keywords = normalize(keywords?);

        let mut experiences = Vec::with_capacity(resume.experiences.len());
        let mut selections = Vec::with_capacity(resume.experiences.len());

        for experience in &resume.experiences {
            let (items, item_selections): (Vec<_>, Vec<_>) = experience
                .items
                .iter()
                .map(|item| {
                    let outcome = select_with(item, &keywords, self.scorer.as_ref());
                    (outcome.item, outcome.selection)
                })
                .unzip();

            experiences.push(Experience {
                id: experience.id.clone(),
                items,
                extra: experience.extra.clone(),
            });
            selections.push(item_selections);
        }

        let (experiences, dropped) = truncate_with_report(experiences, &self.policy);

        let reports: Vec<ExperienceReport> = experiences
            .iter()
            .zip(selections)
            .zip(dropped)
            .enumerate()
            .map(|(index, ((experience, mut item_selections), dropped_items))| {
                item_selections.truncate(experience.items.len());
                ExperienceReport {
                    experience_id: experience.id.clone(),
                    item_limit: self.policy.limit_for(index),
                    dropped_items,
                    selections: item_selections,
                }
            })
            .collect();

        let matched_hits: usize = reports
            .iter()
            .flat_map(|r| &r.selections)
            .filter_map(|sel| sel.scores.get(sel.selected_index?))
            .map(|s| s.matched.len())
            .sum();

        debug!(
            experiences = experiences.len(),
            keywords = keywords.len(),
            matched_hits,
            backend = self.backend(),
            "composed final resume"
        );

        Some(MatchOutcome {
            resume: ResumeContent {
                experiences,
                sections: resume.sections.clone(),
            },
            report: MatchReport {
                scorer_backend: self.backend().to_string(),
                keyword_count: keywords.len(),
                matched_hits,
                experiences: reports,
            },
        })
    }
}

/// Default-configured composition: unweighted scoring and `[5, 3, 2]` tiers.
pub fn construct_final_resume(
    resume: &ResumeContent,
    keywords: Option<&[Keyword]>,
) -> Option<ResumeContent> {
    Matcher::default()
        .compose(resume, keywords)
        .map(|outcome| outcome.resume)
}
