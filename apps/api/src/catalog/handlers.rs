use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::catalog::models::CareerProfile;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CareerListQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}

#[derive(Serialize)]
pub struct CareerListResponse {
    pub careers: Vec<CareerProfile>,
    pub total: usize,
}

#[derive(Serialize)]
pub struct CategoryListResponse {
    pub categories: Vec<String>,
}

/// GET /api/v1/careers
pub async fn handle_list_careers(
    State(state): State<AppState>,
    Query(params): Query<CareerListQuery>,
) -> Json<CareerListResponse> {
    let careers: Vec<CareerProfile> = state
        .catalog
        .filter(params.category.as_deref(), params.search.as_deref())
        .into_iter()
        .cloned()
        .collect();
    let total = careers.len();
    Json(CareerListResponse { careers, total })
}

/// GET /api/v1/careers/categories
pub async fn handle_list_categories(State(state): State<AppState>) -> Json<CategoryListResponse> {
    let categories = state
        .catalog
        .categories()
        .into_iter()
        .map(str::to_string)
        .collect();
    Json(CategoryListResponse { categories })
}

/// GET /api/v1/careers/:name
pub async fn handle_get_career(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<CareerProfile>, AppError> {
    state
        .catalog
        .get(&name)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Career '{name}' not found")))
}
