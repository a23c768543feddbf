//! Aggregator: combines the dimension scores into one ranked list with
//! human-readable reasons.
//!
//! total = interest·w_i + skill·w_s + personality·w_p + subject·w_sub
//!         − dislike_penalty · |dislikes ∩ (interest_tags ∪ skill_tags)|, floored at 0.
//!
//! Ranking is a stable descending sort, so ties keep catalog order.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use crate::catalog::models::CareerProfile;
use crate::catalog::CareerCatalog;
use crate::matching::profile::UserProfile;
use crate::matching::scorers::{cosine_similarity, overlap_ratio, shared_tags};
use crate::matching::weights::ScoringWeights;

pub const FALLBACK_REASON: &str = "Based on your overall profile";

/// Per-dimension scores, each in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubScores {
    pub interest: f64,
    pub skill: f64,
    pub personality: f64,
    pub subject: f64,
}

/// One scored career. `total_score` is on the unit scale; the HTTP layer
/// converts to 0–100.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub career_name: String,
    pub category: String,
    pub total_score: f64,
    pub sub_scores: SubScores,
    pub reasons: Vec<String>,
    pub education: Vec<String>,
    pub salary_range: String,
    pub growth_prospects: String,
    pub work_environment: String,
    pub description: String,
}

/// Scores every career in catalog order, sorts descending by total (stable),
/// and keeps the first `top_n`.
pub fn rank_careers(
    profile: &UserProfile,
    catalog: &CareerCatalog,
    weights: &ScoringWeights,
    top_n: usize,
) -> Vec<MatchResult> {
    let mut results: Vec<MatchResult> = catalog
        .careers()
        .iter()
        .map(|career| score_career(profile, career, weights))
        .collect();

    results.sort_by(|a, b| {
        b.total_score
            .partial_cmp(&a.total_score)
            .unwrap_or(Ordering::Equal)
    });
    results.truncate(top_n);

    debug!(
        catalog_size = catalog.len(),
        top_n,
        top_career = results.first().map(|r| r.career_name.as_str()).unwrap_or("-"),
        "ranked careers"
    );

    results
}

/// Scores a single career against the profile.
pub fn score_career(
    profile: &UserProfile,
    career: &CareerProfile,
    weights: &ScoringWeights,
) -> MatchResult {
    let background = profile.subjects_and_hobbies();

    let sub_scores = SubScores {
        interest: overlap_ratio(&profile.interests, &career.interest_tags),
        skill: overlap_ratio(&profile.skills, &career.skill_tags),
        personality: cosine_similarity(&profile.personality_vector, &career.personality_vector),
        subject: overlap_ratio(&background, &career.interest_tags),
    };

    let weighted = sub_scores.interest * weights.interest
        + sub_scores.skill * weights.skill
        + sub_scores.personality * weights.personality
        + sub_scores.subject * weights.subject;

    let disliked = disliked_tags(profile, career);
    let total_score = (weighted - weights.dislike_penalty * disliked.len() as f64).max(0.0);

    let reasons = build_reasons(profile, career, &background, &sub_scores, &disliked, weights);

    MatchResult {
        career_name: career.name.clone(),
        category: career.category.clone(),
        total_score,
        sub_scores,
        reasons,
        education: career.education.clone(),
        salary_range: career.salary_range.clone(),
        growth_prospects: career.growth_prospects.clone(),
        work_environment: career.work_environment.clone(),
        description: career.description.clone(),
    }
}

/// Disliked tags the career carries, each counted once even if it appears
/// in both the interest and skill tags.
fn disliked_tags<'a>(profile: &'a UserProfile, career: &CareerProfile) -> Vec<&'a str> {
    profile
        .dislikes
        .iter()
        .filter(|t| career.interest_tags.contains(t) || career.skill_tags.contains(t))
        .map(String::as_str)
        .collect()
}

fn build_reasons(
    profile: &UserProfile,
    career: &CareerProfile,
    background: &BTreeSet<String>,
    scores: &SubScores,
    disliked: &[&str],
    weights: &ScoringWeights,
) -> Vec<String> {
    let threshold = weights.reason_threshold;
    let mut reasons = Vec::new();

    if scores.interest > threshold {
        let tags = shared_tags(&profile.interests, &career.interest_tags);
        reasons.push(format!("Matches your interests in {}.", tags.join(", ")));
    }

    if scores.skill > threshold {
        let tags = shared_tags(&profile.skills, &career.skill_tags);
        reasons.push(format!("Aligns with your {} skills.", tags.join(", ")));
    }

    if scores.personality > threshold {
        let traits = shared_traits(profile, career);
        reasons.push(format!(
            "Your {} traits suit this role.",
            traits.join(", ")
        ));
    }

    if scores.subject > threshold {
        let tags = shared_tags(background, &career.interest_tags);
        reasons.push(format!("Builds on your background in {}.", tags.join(", ")));
    }

    if reasons.is_empty() {
        reasons.push(FALLBACK_REASON.to_string());
    }

    if !disliked.is_empty() {
        reasons.push(format!(
            "Involves {}, which you said you dislike.",
            disliked.join(", ")
        ));
    }

    reasons
}

/// Shared personality traits, strongest career weight first, name as tiebreak.
fn shared_traits<'a>(profile: &UserProfile, career: &'a CareerProfile) -> Vec<&'a str> {
    let mut traits: Vec<(&'a str, f64)> = career
        .personality_vector
        .iter()
        .filter(|(name, _)| profile.personality_vector.contains_key(*name))
        .map(|(name, weight)| (name.as_str(), *weight))
        .collect();
    traits.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal).then(a.0.cmp(b.0)));
    traits.into_iter().map(|(name, _)| name).collect()
}
