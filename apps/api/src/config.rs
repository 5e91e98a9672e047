use anyhow::{Context, Result};

use crate::matching::scorer::ScoringMode;
use crate::matching::truncator::TruncationPolicy;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub truncation_policy: TruncationPolicy,
    pub scoring_mode: ScoringMode,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key → value source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            port: get("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            truncation_policy: match get("TRUNCATION_TIERS") {
                Some(raw) => raw
                    .parse()
                    .context("TRUNCATION_TIERS must be a comma-separated list of item caps")?,
                None => TruncationPolicy::default(),
            },
            scoring_mode: match get("SCORING_MODE") {
                Some(raw) => raw.parse().context("SCORING_MODE is invalid")?,
                None => ScoringMode::default(),
            },
        })
    }
}
