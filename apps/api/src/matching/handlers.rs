//! Axum route handlers for the Recommendation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::matching::aggregator::{rank_careers, MatchResult};
use crate::matching::profile::{ProfileInput, UserProfile};
use crate::state::AppState;

pub const MAX_TOP_N: usize = 50;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct RecommendationRequest {
    #[serde(flatten)]
    pub profile: ProfileInput,
    #[serde(default)]
    pub top_n: Option<usize>,
}

/// One entry of the recommendation array. Scores are on a 0–100 scale,
/// rounded to two decimals.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub career_name: String,
    pub category: String,
    pub match_score: f64,
    pub interest_score: f64,
    pub skill_score: f64,
    pub personality_score: f64,
    pub subject_score: f64,
    pub reasons: Vec<String>,
    pub education: Vec<String>,
    pub salary_range: String,
    pub growth_prospects: String,
    pub work_environment: String,
    pub description: String,
}

impl From<MatchResult> for Recommendation {
    fn from(result: MatchResult) -> Self {
        Recommendation {
            career_name: result.career_name,
            category: result.category,
            match_score: to_percent(result.total_score),
            interest_score: to_percent(result.sub_scores.interest),
            skill_score: to_percent(result.sub_scores.skill),
            personality_score: to_percent(result.sub_scores.personality),
            subject_score: to_percent(result.sub_scores.subject),
            reasons: result.reasons,
            education: result.education,
            salary_range: result.salary_range,
            growth_prospects: result.growth_prospects,
            work_environment: result.work_environment,
            description: result.description,
        }
    }
}

pub fn to_percent(unit: f64) -> f64 {
    (unit * 10_000.0).round() / 100.0
}

/// Validates the client profile at the boundary.
pub fn build_profile(input: ProfileInput) -> Result<UserProfile, AppError> {
    UserProfile::try_from(input).map_err(|e| AppError::Validation(e.to_string()))
}

pub fn resolve_top_n(requested: Option<usize>, default: usize) -> Result<usize, AppError> {
    match requested {
        None => Ok(default),
        Some(n) if (1..=MAX_TOP_N).contains(&n) => Ok(n),
        Some(n) => Err(AppError::Validation(format!(
            "top_n must be between 1 and {MAX_TOP_N}, got {n}"
        ))),
    }
}

/// Ranks careers for a profile and converts to the wire shape.
pub fn recommend(state: &AppState, profile: &UserProfile, top_n: usize) -> Vec<Recommendation> {
    rank_careers(profile, &state.catalog, &state.config.weights, top_n)
        .into_iter()
        .map(Recommendation::from)
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/recommendations
///
/// Returns the ranked array. An empty profile yields the catalog in its
/// catalog order with zero scores; callers should prompt for more input.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> Result<Json<Vec<Recommendation>>, AppError> {
    let top_n = resolve_top_n(request.top_n, state.config.default_top_n)?;
    let profile = build_profile(request.profile)?;

    if profile.is_empty() {
        tracing::info!("Recommendation requested with an empty profile");
    }

    Ok(Json(recommend(&state, &profile, top_n)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_percent_rounds_two_decimals() {
        assert_eq!(to_percent(0.375), 37.5);
        assert_eq!(to_percent(0.123456), 12.35);
        assert_eq!(to_percent(0.0), 0.0);
    }

    #[test]
    fn test_resolve_top_n_defaults_and_bounds() {
        assert_eq!(resolve_top_n(None, 5).unwrap(), 5);
        assert_eq!(resolve_top_n(Some(3), 5).unwrap(), 3);
        assert!(matches!(resolve_top_n(Some(0), 5), Err(AppError::Validation(_))));
        assert!(matches!(
            resolve_top_n(Some(MAX_TOP_N + 1), 5),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_request_flattens_profile_fields() {
        let request: RecommendationRequest = serde_json::from_str(
            r#"{"interests": ["technology"], "personality": {"analytical": 0.9}, "top_n": 2}"#,
        )
        .unwrap();
        assert_eq!(request.top_n, Some(2));
        assert_eq!(request.profile.interests, vec!["technology".to_string()]);
        assert_eq!(request.profile.personality["analytical"], 0.9);
    }

    #[test]
    fn test_empty_request_deserializes() {
        let request: RecommendationRequest = serde_json::from_str("{}").unwrap();
        assert!(request.top_n.is_none());
        assert!(request.profile.interests.is_empty());
    }
}
