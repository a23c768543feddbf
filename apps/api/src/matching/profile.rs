use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::models::{normalize_tag, TraitVector};

/// Profile fields as they arrive from a client. Every field is optional;
/// unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileInput {
    pub interests: Vec<String>,
    pub skills: Vec<String>,
    pub personality: BTreeMap<String, f64>,
    pub subjects: Vec<String>,
    pub hobbies: Vec<String>,
    pub dislikes: Vec<String>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("personality weight for '{trait_name}' must be between 0 and 1, got {value}")]
    TraitWeightOutOfRange { trait_name: String, value: f64 },
}

/// A normalized user profile, built fresh per request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserProfile {
    pub interests: BTreeSet<String>,
    pub skills: BTreeSet<String>,
    pub personality_vector: TraitVector,
    pub subjects: BTreeSet<String>,
    pub hobbies: BTreeSet<String>,
    pub dislikes: BTreeSet<String>,
}

pub fn normalize_tags<I, S>(raw: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .filter_map(|t| normalize_tag(t.as_ref()))
        .collect()
}

impl TryFrom<ProfileInput> for UserProfile {
    type Error = ProfileError;

    fn try_from(input: ProfileInput) -> Result<Self, Self::Error> {
        let mut personality_vector = TraitVector::new();
        for (raw_trait, value) in input.personality {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ProfileError::TraitWeightOutOfRange {
                    trait_name: raw_trait,
                    value,
                });
            }
            if let Some(trait_name) = normalize_tag(&raw_trait) {
                // "Analytical" and "analytical" collapse; keep the stronger one
                let slot = personality_vector.entry(trait_name).or_insert(0.0);
                *slot = slot.max(value);
            }
        }

        Ok(UserProfile {
            interests: normalize_tags(input.interests),
            skills: normalize_tags(input.skills),
            personality_vector,
            subjects: normalize_tags(input.subjects),
            hobbies: normalize_tags(input.hobbies),
            dislikes: normalize_tags(input.dislikes),
        })
    }
}

impl UserProfile {
    /// True when nothing would raise a career's score. Dislikes alone only
    /// penalize, so they do not count.
    pub fn is_empty(&self) -> bool {
        self.interests.is_empty()
            && self.skills.is_empty()
            && self.personality_vector.is_empty()
            && self.subjects.is_empty()
            && self.hobbies.is_empty()
    }

    /// Subjects and hobbies are scored together as one weaker signal.
    pub fn subjects_and_hobbies(&self) -> BTreeSet<String> {
        self.subjects.union(&self.hobbies).cloned().collect()
    }

    /// Folds another profile into this one: sets union, trait weights sum.
    pub fn merge(&mut self, other: UserProfile) {
        self.interests.extend(other.interests);
        self.skills.extend(other.skills);
        self.subjects.extend(other.subjects);
        self.hobbies.extend(other.hobbies);
        self.dislikes.extend(other.dislikes);
        for (trait_name, weight) in other.personality_vector {
            *self.personality_vector.entry(trait_name).or_insert(0.0) += weight;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_builds_empty_profile() {
        let profile = UserProfile::try_from(ProfileInput::default()).unwrap();
        assert!(profile.is_empty());
        assert_eq!(profile, UserProfile::default());
    }

    #[test]
    fn test_tags_normalized_and_deduped() {
        let input = ProfileInput {
            interests: vec!["Technology".into(), " technology ".into(), "".into()],
            skills: vec!["Problem Solving".into()],
            ..ProfileInput::default()
        };
        let profile = UserProfile::try_from(input).unwrap();
        assert_eq!(profile.interests.len(), 1);
        assert!(profile.interests.contains("technology"));
        assert!(profile.skills.contains("problem-solving"));
    }

    #[test]
    fn test_out_of_range_trait_weight_rejected() {
        let input = ProfileInput {
            personality: BTreeMap::from([("analytical".to_string(), 1.5)]),
            ..ProfileInput::default()
        };
        let err = UserProfile::try_from(input).unwrap_err();
        assert!(err.to_string().contains("analytical"));
    }

    #[test]
    fn test_only_dislikes_counts_as_empty() {
        let input = ProfileInput {
            dislikes: vec!["technology".into()],
            ..ProfileInput::default()
        };
        assert!(UserProfile::try_from(input).unwrap().is_empty());
    }

    #[test]
    fn test_deserialize_ignores_unknown_fields() {
        let input: ProfileInput =
            serde_json::from_str(r#"{"interests": ["arts"], "favourite_colour": "blue"}"#).unwrap();
        assert_eq!(input.interests, vec!["arts".to_string()]);
        assert!(input.skills.is_empty());
    }

    #[test]
    fn test_merge_unions_and_sums() {
        let mut base = UserProfile {
            skills: normalize_tags(["analytical"]),
            personality_vector: TraitVector::from([("creative".to_string(), 2.0)]),
            ..UserProfile::default()
        };
        base.merge(UserProfile {
            skills: normalize_tags(["technical", "analytical"]),
            personality_vector: TraitVector::from([
                ("creative".to_string(), 1.0),
                ("patient".to_string(), 3.0),
            ]),
            ..UserProfile::default()
        });

        assert_eq!(base.skills.len(), 2);
        assert_eq!(base.personality_vector["creative"], 3.0);
        assert_eq!(base.personality_vector["patient"], 3.0);
    }

    #[test]
    fn test_subjects_and_hobbies_union() {
        let profile = UserProfile {
            subjects: normalize_tags(["mathematics"]),
            hobbies: normalize_tags(["design", "mathematics"]),
            ..UserProfile::default()
        };
        assert_eq!(profile.subjects_and_hobbies().len(), 2);
    }
}
