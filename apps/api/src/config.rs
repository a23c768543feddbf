use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::matching::handlers::MAX_TOP_N;
use crate::matching::weights::ScoringWeights;
use crate::quiz::adapter::AptitudeRules;

/// Application configuration loaded from environment variables.
/// Every variable is optional; unset ones fall back to the defaults below.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Replaces the built-in career catalog when set.
    pub catalog_path: Option<PathBuf>,
    pub default_top_n: usize,
    pub weights: ScoringWeights,
    pub aptitude_rules: AptitudeRules,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            catalog_path: None,
            default_top_n: 5,
            weights: ScoringWeights::default(),
            aptitude_rules: AptitudeRules::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let weights_default = defaults.weights;

        let config = Config {
            port: env_or("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            catalog_path: std::env::var("CAREER_CATALOG_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            default_top_n: env_or("RECOMMENDATION_TOP_N", defaults.default_top_n)?,
            weights: ScoringWeights {
                interest: env_or("SCORING_INTEREST_WEIGHT", weights_default.interest)?,
                skill: env_or("SCORING_SKILL_WEIGHT", weights_default.skill)?,
                personality: env_or("SCORING_PERSONALITY_WEIGHT", weights_default.personality)?,
                subject: env_or("SCORING_SUBJECT_WEIGHT", weights_default.subject)?,
                dislike_penalty: env_or("SCORING_DISLIKE_PENALTY", weights_default.dislike_penalty)?,
                reason_threshold: env_or(
                    "SCORING_REASON_THRESHOLD",
                    weights_default.reason_threshold,
                )?,
            },
            aptitude_rules: {
                let threshold = env_or(
                    "APTITUDE_BONUS_THRESHOLD",
                    defaults.aptitude_rules.category_bonus_threshold,
                )?;
                AptitudeRules {
                    category_bonus_threshold: threshold,
                    overall_bonus_threshold: threshold,
                }
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.weights
            .validate()
            .context("Invalid SCORING_* configuration")?;

        if !(1..=MAX_TOP_N).contains(&self.default_top_n) {
            bail!(
                "RECOMMENDATION_TOP_N must be between 1 and {MAX_TOP_N}, got {}",
                self.default_top_n
            );
        }

        let threshold = self.aptitude_rules.category_bonus_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            bail!("APTITUDE_BONUS_THRESHOLD must be between 0 and 1, got {threshold}");
        }
        Ok(())
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    parse_or(key, std::env::var(key).ok(), default)
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{value}'")),
    }
}
