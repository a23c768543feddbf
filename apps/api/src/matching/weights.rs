use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tunable constants for the career aggregator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringWeights {
    pub interest: f64,
    pub skill: f64,
    pub personality: f64,
    /// Additive bonus for subjects and hobbies scored against interest tags.
    pub subject: f64,
    /// Subtracted from the total once per disliked tag the career carries.
    pub dislike_penalty: f64,
    /// A sub-score must exceed this to earn a reason line.
    pub reason_threshold: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            interest: 0.40,
            skill: 0.35,
            personality: 0.25,
            subject: 0.10,
            dislike_penalty: 0.10,
            reason_threshold: 0.5,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum WeightsError {
    #[error("scoring weight '{0}' must be a finite, non-negative number")]
    OutOfRange(&'static str),

    #[error("subject bonus weight must be smaller than each primary weight")]
    BonusDominates,
}

impl ScoringWeights {
    pub fn validate(&self) -> Result<(), WeightsError> {
        let fields = [
            ("interest", self.interest),
            ("skill", self.skill),
            ("personality", self.personality),
            ("subject", self.subject),
            ("dislike_penalty", self.dislike_penalty),
            ("reason_threshold", self.reason_threshold),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(WeightsError::OutOfRange(name));
            }
        }

        let min_primary = self.interest.min(self.skill).min(self.personality);
        if self.subject >= min_primary {
            return Err(WeightsError::BonusDominates);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_primary_weights_sum_to_one() {
        let w = ScoringWeights::default();
        assert!((w.interest + w.skill + w.personality - 1.0).abs() < 1e-9);
        assert_eq!(w.validate(), Ok(()));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let w = ScoringWeights {
            skill: -0.1,
            ..ScoringWeights::default()
        };
        assert_eq!(w.validate(), Err(WeightsError::OutOfRange("skill")));
    }

    #[test]
    fn test_nan_weight_rejected() {
        let w = ScoringWeights {
            dislike_penalty: f64::NAN,
            ..ScoringWeights::default()
        };
        assert_eq!(w.validate(), Err(WeightsError::OutOfRange("dislike_penalty")));
    }

    #[test]
    fn test_bonus_must_not_dominate() {
        let w = ScoringWeights {
            subject: 0.30,
            ..ScoringWeights::default()
        };
        assert_eq!(w.validate(), Err(WeightsError::BonusDominates));
    }
}
