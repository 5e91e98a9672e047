//! Section Truncator — position-dependent caps on how many items each
//! experience keeps.

use std::str::FromStr;

use anyhow::{bail, Context};

use crate::models::resume::Experience;

/// Per-position item caps. Position `i` uses `tiers[i]`; positions past the
/// end of the table reuse the last tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruncationPolicy {
    tiers: Vec<usize>,
}

impl TruncationPolicy {
    pub fn new(tiers: Vec<usize>) -> anyhow::Result<Self> {
        if tiers.is_empty() {
            bail!("truncation policy needs at least one tier");
        }
        Ok(Self { tiers })
    }

    pub fn tiers(&self) -> &[usize] {
        &self.tiers
    }

    /// Maximum number of items kept for the experience at `index`.
    pub fn limit_for(&self, index: usize) -> usize {
        self.tiers[index.min(self.tiers.len() - 1)]
    }
}

impl Default for TruncationPolicy {
    /// First experience keeps 5, second keeps 3, the rest keep 2.
    fn default() -> Self {
        Self {
            tiers: vec![5, 3, 2],
        }
    }
}

impl FromStr for TruncationPolicy {
    type Err = anyhow::Error;

    /// Parses a comma-separated tier list such as `"5,3,2"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tiers = s
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| {
                t.parse::<usize>()
                    .with_context(|| format!("invalid truncation tier '{t}'"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Self::new(tiers)
    }
}

/// Truncates each experience's items by its position. Experiences are never
/// dropped or reordered, and surviving items keep their order.
pub fn truncate(experiences: Vec<Experience>, policy: &TruncationPolicy) -> Vec<Experience> {
    truncate_with_report(experiences, policy).0
}

/// Like [`truncate`], also returning how many items each experience lost.
pub fn truncate_with_report(
    mut experiences: Vec<Experience>,
    policy: &TruncationPolicy,
) -> (Vec<Experience>, Vec<usize>) {
    let dropped = experiences
        .iter_mut()
        .enumerate()
        .map(|(index, experience)| {
            let limit = policy.limit_for(index);
            let before = experience.items.len();
            experience.items.truncate(limit);
            before - experience.items.len()
        })
        .collect();

    (experiences, dropped)
}
