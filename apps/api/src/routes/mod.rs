pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::catalog::handlers as catalog;
use crate::matching::handlers as matching;
use crate::quiz::handlers as quiz;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Career catalog
        .route("/api/v1/careers", get(catalog::handle_list_careers))
        .route(
            "/api/v1/careers/categories",
            get(catalog::handle_list_categories),
        )
        .route("/api/v1/careers/:name", get(catalog::handle_get_career))
        // Matching
        .route(
            "/api/v1/recommendations",
            post(matching::handle_recommendations),
        )
        // Quiz
        .route(
            "/api/v1/quiz/:quiz_type/questions",
            get(quiz::handle_get_questions),
        )
        .route(
            "/api/v1/quiz/:quiz_type/submit",
            post(quiz::handle_submit_quiz),
        )
        .with_state(state)
}
