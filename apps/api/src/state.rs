use std::sync::Arc;

use crate::config::Config;
use crate::matching::Matcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Engine built once from config; immutable and shared across requests.
    pub matcher: Arc<Matcher>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let matcher = Matcher::new(
            config.scoring_mode.scorer(),
            config.truncation_policy.clone(),
        );
        Self {
            config,
            matcher: Arc::new(matcher),
        }
    }
}
