use std::sync::Arc;

use crate::catalog::CareerCatalog;
use crate::config::Config;
use crate::quiz::bank::QuestionBank;

/// Shared application state injected into all route handlers via Axum extractors.
/// Catalog and question bank are loaded once at startup and read-only after.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub catalog: Arc<CareerCatalog>,
    pub questions: Arc<QuestionBank>,
}

#[cfg(test)]
pub fn test_state() -> AppState {
    AppState {
        config: Config::default(),
        catalog: Arc::new(CareerCatalog::builtin().unwrap()),
        questions: Arc::new(QuestionBank::builtin().unwrap()),
    }
}
