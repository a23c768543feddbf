mod catalog;
mod config;
mod errors;
mod matching;
mod quiz;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::CareerCatalog;
use crate::config::Config;
use crate::quiz::bank::QuestionBank;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Advisor API v{}", env!("CARGO_PKG_VERSION"));

    let catalog = match &config.catalog_path {
        Some(path) => CareerCatalog::from_path(path)
            .with_context(|| format!("Failed to load career catalog from {}", path.display()))?,
        None => CareerCatalog::builtin().context("Built-in career catalog is invalid")?,
    };
    if catalog.is_empty() {
        bail!("Career catalog has no careers");
    }
    info!(
        "Career catalog loaded: {} careers (version {})",
        catalog.len(),
        catalog.version()
    );

    let questions = QuestionBank::builtin().context("Built-in question bank is invalid")?;
    info!(
        "Question bank loaded: {} aptitude, {} personality",
        questions.aptitude.len(),
        questions.personality.len()
    );

    info!(
        "Scoring weights: interest={} skill={} personality={} subject={} dislike_penalty={}",
        config.weights.interest,
        config.weights.skill,
        config.weights.personality,
        config.weights.subject,
        config.weights.dislike_penalty
    );

    let state = AppState {
        config: config.clone(),
        catalog: Arc::new(catalog),
        questions: Arc::new(questions),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
