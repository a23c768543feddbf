//! Built-in quiz question bank and the translation from submitted answers
//! (keyed by question index) to adapter items.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::models::TraitVector;
use crate::quiz::models::{AptitudeCategory, AptitudeItem, PersonalityItem};

const BUILTIN_QUESTIONS: &str = include_str!("../../data/quiz_questions.json");

#[derive(Debug, Error)]
pub enum QuizBankError {
    #[error("Question bank parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid question {index} in {quiz}: {reason}")]
    InvalidQuestion {
        quiz: &'static str,
        index: usize,
        reason: String,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct AptitudeQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub category: AptitudeCategory,
    #[serde(default)]
    pub skill_tags: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonalityQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub trait_mapping: BTreeMap<String, TraitVector>,
}

/// What clients see. Aptitude correct answers are withheld.
#[derive(Debug, Clone, Serialize)]
pub struct PublicQuestion {
    pub id: usize,
    pub question: String,
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<AptitudeCategory>,
}

/// A submitted answer: either the option text or its index. Any other JSON
/// value lands in `Other` and resolves to no answer for that question only.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Index(u64),
    Text(String),
    Other(serde_json::Value),
}

pub type AnswerSheet = BTreeMap<String, Answer>;

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionBank {
    pub aptitude: Vec<AptitudeQuestion>,
    pub personality: Vec<PersonalityQuestion>,
}

impl QuestionBank {
    pub fn builtin() -> Result<Self, QuizBankError> {
        Self::from_json_str(BUILTIN_QUESTIONS)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, QuizBankError> {
        let bank: QuestionBank = serde_json::from_str(raw)?;
        bank.validate()?;
        Ok(bank)
    }

    fn validate(&self) -> Result<(), QuizBankError> {
        for (index, q) in self.aptitude.iter().enumerate() {
            if !q.options.iter().any(|o| o == &q.correct_answer) {
                return Err(QuizBankError::InvalidQuestion {
                    quiz: "aptitude",
                    index,
                    reason: "correct_answer is not one of the options".to_string(),
                });
            }
        }
        for (index, q) in self.personality.iter().enumerate() {
            if q.options.is_empty() || q.trait_mapping.is_empty() {
                return Err(QuizBankError::InvalidQuestion {
                    quiz: "personality",
                    index,
                    reason: "question needs options and a trait mapping".to_string(),
                });
            }
            let negative = q
                .trait_mapping
                .values()
                .flat_map(|v| v.values())
                .any(|w| !w.is_finite() || *w < 0.0);
            if negative {
                return Err(QuizBankError::InvalidQuestion {
                    quiz: "personality",
                    index,
                    reason: "trait weights must be non-negative".to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.aptitude.len() + self.personality.len()
    }

    pub fn public_aptitude(&self) -> Vec<PublicQuestion> {
        self.aptitude
            .iter()
            .enumerate()
            .map(|(id, q)| PublicQuestion {
                id,
                question: q.question.clone(),
                options: q.options.clone(),
                category: Some(q.category),
            })
            .collect()
    }

    pub fn public_personality(&self) -> Vec<PublicQuestion> {
        self.personality
            .iter()
            .enumerate()
            .map(|(id, q)| PublicQuestion {
                id,
                question: q.question.clone(),
                options: q.options.clone(),
                category: None,
            })
            .collect()
    }

    /// Every aptitude question becomes an item; unanswered ones have no
    /// `user_answer` and count as incorrect. Index answers resolve to the
    /// option text; an out-of-range index or a malformed answer resolves to
    /// no answer.
    pub fn aptitude_items(&self, answers: &AnswerSheet) -> Vec<AptitudeItem> {
        self.aptitude
            .iter()
            .enumerate()
            .map(|(idx, q)| AptitudeItem {
                question: q.question.clone(),
                user_answer: answers.get(&idx.to_string()).and_then(|a| match a {
                    Answer::Index(i) => usize::try_from(*i)
                        .ok()
                        .and_then(|i| q.options.get(i))
                        .cloned(),
                    Answer::Text(text) => Some(text.clone()),
                    Answer::Other(_) => None,
                }),
                correct_answer: q.correct_answer.clone(),
                category: q.category,
                skill_tags: q.skill_tags.clone(),
            })
            .collect()
    }

    /// Personality answers resolve to the choice key of `trait_mapping`.
    /// Option text is accepted and mapped to its index; unknown text is
    /// passed through for the adapter to skip. Malformed answers count as
    /// unanswered.
    pub fn personality_items(&self, answers: &AnswerSheet) -> Vec<PersonalityItem> {
        self.personality
            .iter()
            .enumerate()
            .map(|(idx, q)| PersonalityItem {
                question: q.question.clone(),
                user_answer: answers.get(&idx.to_string()).and_then(|a| match a {
                    Answer::Index(i) => Some(i.to_string()),
                    Answer::Text(text) => Some(
                        q.options
                            .iter()
                            .position(|o| o.eq_ignore_ascii_case(text.trim()))
                            .map(|pos| pos.to_string())
                            .unwrap_or_else(|| text.clone()),
                    ),
                    Answer::Other(_) => None,
                }),
                trait_mapping: q.trait_mapping.clone(),
            })
            .collect()
    }
}
