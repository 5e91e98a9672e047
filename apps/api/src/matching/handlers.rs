//! Axum route handlers for the Matching API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::matching::MatchReport;
use crate::models::resume::{Keyword, ResumeContent};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub resume: ResumeContent,
    /// `null` or absent when the job description has not been analyzed yet.
    #[serde(default)]
    pub keywords: Option<Vec<Keyword>>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub resume: Option<ResumeContent>,
    pub report: Option<MatchReport>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/match
///
/// Selects the best variation per item against the supplied keywords and
/// truncates experiences. Returns `{resume: null, report: null}` when no
/// keywords were supplied.
pub async fn handle_match(
    State(state): State<AppState>,
    payload: Result<Json<MatchRequest>, JsonRejection>,
) -> Result<Json<MatchResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| match rejection {
        JsonRejection::JsonDataError(e) => AppError::UnprocessableEntity(e.body_text()),
        other => AppError::Validation(other.body_text()),
    })?;

    let Some(outcome) = state
        .matcher
        .compose(&request.resume, request.keywords.as_deref())
    else {
        info!("match requested before keyword extraction; returning empty result");
        return Ok(Json(MatchResponse {
            resume: None,
            report: None,
        }));
    };

    info!(
        experiences = outcome.resume.experiences.len(),
        keywords = outcome.report.keyword_count,
        matched_hits = outcome.report.matched_hits,
        "resume matched"
    );

    Ok(Json(MatchResponse {
        resume: Some(outcome.resume),
        report: Some(outcome.report),
    }))
}
