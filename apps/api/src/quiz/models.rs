use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::models::TraitVector;
use crate::matching::profile::UserProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AptitudeCategory {
    Logical,
    Numerical,
    Verbal,
    /// Anything outside the fixed set. Counts toward the overall score only.
    #[serde(other)]
    General,
}

impl AptitudeCategory {
    /// Categories that receive a per-category score, in report order.
    pub const SCORED: [AptitudeCategory; 3] = [
        AptitudeCategory::Logical,
        AptitudeCategory::Numerical,
        AptitudeCategory::Verbal,
    ];

    /// Skill and interest tags granted when the category clears the bonus
    /// threshold.
    pub fn bonus_tags(self) -> (&'static [&'static str], &'static [&'static str]) {
        match self {
            AptitudeCategory::Logical => (LOGICAL_SKILLS, LOGICAL_INTERESTS),
            AptitudeCategory::Numerical => (NUMERICAL_SKILLS, NUMERICAL_INTERESTS),
            AptitudeCategory::Verbal => (VERBAL_SKILLS, VERBAL_INTERESTS),
            AptitudeCategory::General => (NO_TAGS, NO_TAGS),
        }
    }
}

const LOGICAL_SKILLS: &[&str] = &["analytical", "problem-solving"];
const LOGICAL_INTERESTS: &[&str] = &["technology", "problem-solving"];
const NUMERICAL_SKILLS: &[&str] = &["mathematical", "analytical"];
const NUMERICAL_INTERESTS: &[&str] = &["mathematics", "numbers"];
const VERBAL_SKILLS: &[&str] = &["communication", "research"];
const VERBAL_INTERESTS: &[&str] = &["writing", "communication"];
const NO_TAGS: &[&str] = &[];

/// One answered (or skipped) aptitude question.
#[derive(Debug, Clone)]
pub struct AptitudeItem {
    pub question: String,
    pub user_answer: Option<String>,
    pub correct_answer: String,
    pub category: AptitudeCategory,
    pub skill_tags: Vec<String>,
}

impl AptitudeItem {
    pub fn is_correct(&self) -> bool {
        self.user_answer
            .as_deref()
            .map(|a| a.trim().eq_ignore_ascii_case(self.correct_answer.trim()))
            .unwrap_or(false)
    }
}

/// One personality question with the answer the user picked. `trait_mapping`
/// maps each answer choice key to the trait weights it contributes.
#[derive(Debug, Clone)]
pub struct PersonalityItem {
    pub question: String,
    pub user_answer: Option<String>,
    pub trait_mapping: BTreeMap<String, TraitVector>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    pub category: AptitudeCategory,
    pub correct: usize,
    pub total: usize,
    /// correct / total, in [0, 1].
    pub score: f64,
    pub bonus_applied: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AptitudeOutcome {
    pub profile: UserProfile,
    pub correct: usize,
    pub total: usize,
    pub score: f64,
    pub categories: Vec<CategoryScore>,
    /// Skill tags from correctly answered questions, before bonuses.
    pub identified_skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonalityOutcome {
    pub profile: UserProfile,
    pub answered: usize,
    pub skipped: usize,
}
