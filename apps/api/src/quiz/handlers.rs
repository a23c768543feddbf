//! Axum route handlers for the Quiz API.

use std::str::FromStr;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::handlers::{build_profile, recommend, resolve_top_n, to_percent, Recommendation};
use crate::matching::profile::{ProfileInput, UserProfile};
use crate::quiz::adapter::{aptitude_profile, personality_profile};
use crate::quiz::bank::{AnswerSheet, PublicQuestion};
use crate::quiz::models::CategoryScore;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizType {
    Aptitude,
    Personality,
}

impl FromStr for QuizType {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "aptitude" => Ok(QuizType::Aptitude),
            "personality" => Ok(QuizType::Personality),
            _ => Err(AppError::NotFound(format!("Quiz '{raw}' not found"))),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct QuestionListResponse {
    pub quiz_type: QuizType,
    pub questions: Vec<PublicQuestion>,
    pub total: usize,
}

/// `answers` is keyed by question id. `profile` optionally carries whatever
/// the user already told us; it is merged with the quiz-derived profile.
#[derive(Debug, Default, Deserialize)]
pub struct QuizSubmission {
    #[serde(default)]
    pub answers: AnswerSheet,
    #[serde(default)]
    pub profile: Option<ProfileInput>,
    #[serde(default)]
    pub top_n: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum QuizBreakdown {
    Aptitude {
        correct: usize,
        total: usize,
        /// 0–100
        score: f64,
        categories: Vec<CategoryScore>,
        identified_skills: Vec<String>,
    },
    Personality {
        answered: usize,
        skipped: usize,
    },
}

#[derive(Debug, Serialize)]
pub struct QuizResultResponse {
    pub result_id: Uuid,
    pub quiz_type: QuizType,
    pub completed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub breakdown: QuizBreakdown,
    pub profile: UserProfile,
    /// Set when the combined profile carries no positive signal. The
    /// recommendations are then the catalog in order with zero scores.
    pub needs_more_information: bool,
    pub recommendations: Vec<Recommendation>,
}

/// Scores a submission, merges in the caller's profile, and ranks careers.
pub fn evaluate_submission(
    state: &AppState,
    quiz_type: QuizType,
    submission: QuizSubmission,
) -> Result<QuizResultResponse, AppError> {
    let top_n = resolve_top_n(submission.top_n, state.config.default_top_n)?;
    let provided = submission.profile.map(build_profile).transpose()?;

    let (mut profile, breakdown) = match quiz_type {
        QuizType::Aptitude => {
            let items = state.questions.aptitude_items(&submission.answers);
            let outcome = aptitude_profile(&items, &state.config.aptitude_rules);
            let categories = outcome
                .categories
                .into_iter()
                .map(|mut c| {
                    c.score = to_percent(c.score);
                    c
                })
                .collect();
            let breakdown = QuizBreakdown::Aptitude {
                correct: outcome.correct,
                total: outcome.total,
                score: to_percent(outcome.score),
                categories,
                identified_skills: outcome.identified_skills,
            };
            (outcome.profile, breakdown)
        }
        QuizType::Personality => {
            let items = state.questions.personality_items(&submission.answers);
            let outcome = personality_profile(&items);
            let breakdown = QuizBreakdown::Personality {
                answered: outcome.answered,
                skipped: outcome.skipped,
            };
            (outcome.profile, breakdown)
        }
    };

    if let Some(provided) = provided {
        profile.merge(provided);
    }

    let needs_more_information = profile.is_empty();
    let recommendations = recommend(state, &profile, top_n);

    Ok(QuizResultResponse {
        result_id: Uuid::new_v4(),
        quiz_type,
        completed_at: Utc::now(),
        breakdown,
        profile,
        needs_more_information,
        recommendations,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/quiz/:quiz_type/questions
pub async fn handle_get_questions(
    State(state): State<AppState>,
    Path(quiz_type): Path<String>,
) -> Result<Json<QuestionListResponse>, AppError> {
    let quiz_type: QuizType = quiz_type.parse()?;
    let questions = match quiz_type {
        QuizType::Aptitude => state.questions.public_aptitude(),
        QuizType::Personality => state.questions.public_personality(),
    };
    let total = questions.len();
    Ok(Json(QuestionListResponse {
        quiz_type,
        questions,
        total,
    }))
}

/// POST /api/v1/quiz/:quiz_type/submit
pub async fn handle_submit_quiz(
    State(state): State<AppState>,
    Path(quiz_type): Path<String>,
    Json(submission): Json<QuizSubmission>,
) -> Result<Json<QuizResultResponse>, AppError> {
    let quiz_type: QuizType = quiz_type.parse()?;
    let result = evaluate_submission(&state, quiz_type, submission)?;

    info!(
        result_id = %result.result_id,
        quiz_type = ?quiz_type,
        needs_more_information = result.needs_more_information,
        "Quiz submission scored"
    );

    Ok(Json(result))
}
