//! Quiz-to-Profile Adapter: turns raw quiz answers into the same
//! `UserProfile` shape the aggregator scores.
//!
//! Aptitude: correct answers contribute their skill tags; strong categories
//! add category-specific bonus tags on top.
//! Personality: each answer's trait weights are summed. The sums are not
//! renormalized; cosine similarity is scale-invariant.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::catalog::models::normalize_tag;
use crate::matching::profile::{normalize_tags, UserProfile};
use crate::quiz::models::{
    AptitudeCategory, AptitudeItem, AptitudeOutcome, CategoryScore, PersonalityItem,
    PersonalityOutcome,
};

const OVERALL_BONUS_SKILLS: &[&str] = &["analytical", "problem-solving"];

#[derive(Debug, Clone, PartialEq)]
pub struct AptitudeRules {
    /// Category score at or above which the category's bonus tags apply.
    pub category_bonus_threshold: f64,
    /// Overall score strictly above which the general bonus skills apply.
    pub overall_bonus_threshold: f64,
}

impl Default for AptitudeRules {
    fn default() -> Self {
        Self {
            category_bonus_threshold: 0.70,
            overall_bonus_threshold: 0.70,
        }
    }
}

pub fn aptitude_profile(items: &[AptitudeItem], rules: &AptitudeRules) -> AptitudeOutcome {
    let mut identified = BTreeSet::new();
    let mut correct = 0usize;
    // (correct, total) per entry of AptitudeCategory::SCORED
    let mut tallies = [(0usize, 0usize); AptitudeCategory::SCORED.len()];

    for item in items {
        let is_correct = item.is_correct();
        if is_correct {
            correct += 1;
            identified.extend(normalize_tags(&item.skill_tags));
        }

        if let Some(idx) = AptitudeCategory::SCORED
            .iter()
            .position(|c| *c == item.category)
        {
            tallies[idx].1 += 1;
            if is_correct {
                tallies[idx].0 += 1;
            }
        }
    }

    let mut profile = UserProfile {
        skills: identified.clone(),
        ..UserProfile::default()
    };

    let categories: Vec<CategoryScore> = AptitudeCategory::SCORED
        .iter()
        .zip(tallies)
        .map(|(&category, (cat_correct, cat_total))| {
            let score = ratio(cat_correct, cat_total);
            let bonus_applied = cat_total > 0 && score >= rules.category_bonus_threshold;
            if bonus_applied {
                let (skills, interests) = category.bonus_tags();
                profile.skills.extend(normalize_tags(skills));
                profile.interests.extend(normalize_tags(interests));
            }
            CategoryScore {
                category,
                correct: cat_correct,
                total: cat_total,
                score,
                bonus_applied,
            }
        })
        .collect();

    let score = ratio(correct, items.len());
    if score > rules.overall_bonus_threshold {
        profile.skills.extend(normalize_tags(OVERALL_BONUS_SKILLS));
    }

    debug!(
        correct,
        total = items.len(),
        skills = profile.skills.len(),
        "derived aptitude profile"
    );

    AptitudeOutcome {
        profile,
        correct,
        total: items.len(),
        score,
        categories,
        identified_skills: identified.into_iter().collect(),
    }
}

/// Sums the trait weights of every answered question. Unanswered questions
/// and answers missing from the question's mapping contribute nothing.
pub fn personality_profile(items: &[PersonalityItem]) -> PersonalityOutcome {
    let mut profile = UserProfile::default();
    let mut answered = 0usize;
    let mut skipped = 0usize;

    for item in items {
        let Some(answer) = item.user_answer.as_deref().map(str::trim) else {
            skipped += 1;
            continue;
        };

        let Some(weights) = item.trait_mapping.get(answer) else {
            warn!(
                question = %item.question,
                answer,
                "Skipping personality answer with no trait mapping"
            );
            skipped += 1;
            continue;
        };

        answered += 1;
        for (raw_trait, weight) in weights {
            if !weight.is_finite() {
                continue;
            }
            if let Some(trait_name) = normalize_tag(raw_trait) {
                *profile.personality_vector.entry(trait_name).or_insert(0.0) += weight;
            }
        }
    }

    PersonalityOutcome {
        profile,
        answered,
        skipped,
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::TraitVector;
    use std::collections::BTreeMap;

    fn aptitude(category: AptitudeCategory, answer: Option<&str>, tags: &[&str]) -> AptitudeItem {
        AptitudeItem {
            question: "q".to_string(),
            user_answer: answer.map(str::to_string),
            correct_answer: "42".to_string(),
            category,
            skill_tags: tags.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn personality(answer: Option<&str>, mapping: Vec<(&str, Vec<(&str, f64)>)>) -> PersonalityItem {
        PersonalityItem {
            question: "q".to_string(),
            user_answer: answer.map(str::to_string),
            trait_mapping: mapping
                .into_iter()
                .map(|(choice, traits)| {
                    let vector: TraitVector =
                        traits.iter().map(|(t, w)| (t.to_string(), *w)).collect();
                    (choice.to_string(), vector)
                })
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn test_strong_numerical_category_adds_bonus_tags() {
        let mut items: Vec<AptitudeItem> = (0..8)
            .map(|_| aptitude(AptitudeCategory::Numerical, Some("42"), &["mathematical"]))
            .collect();
        items.push(aptitude(AptitudeCategory::Logical, Some("7"), &["logical-reasoning"]));
        items.push(aptitude(AptitudeCategory::Verbal, None, &["vocabulary"]));

        let outcome = aptitude_profile(&items, &AptitudeRules::default());

        assert_eq!(outcome.correct, 8);
        assert_eq!(outcome.total, 10);
        assert!((outcome.score - 0.8).abs() < 1e-12);
        assert_eq!(outcome.identified_skills, vec!["mathematical".to_string()]);

        let skills = &outcome.profile.skills;
        assert!(skills.contains("mathematical"));
        assert!(skills.contains("analytical"));
        assert!(!skills.contains("logical-reasoning"));
        assert!(outcome.profile.interests.contains("mathematics"));
        assert!(outcome.profile.interests.contains("numbers"));

        let numerical = &outcome.categories[1];
        assert_eq!(numerical.category, AptitudeCategory::Numerical);
        assert_eq!((numerical.correct, numerical.total), (8, 8));
        assert_eq!(numerical.score, 1.0);
        assert!(numerical.bonus_applied);
        assert!(!outcome.categories[0].bonus_applied);
        assert!(!outcome.categories[2].bonus_applied);
    }

    #[test]
    fn test_overall_bonus_requires_strictly_above_threshold() {
        let mut items: Vec<AptitudeItem> = (0..7)
            .map(|_| aptitude(AptitudeCategory::General, Some("42"), &[]))
            .collect();
        items.extend((0..3).map(|_| aptitude(AptitudeCategory::General, Some("0"), &[])));

        let outcome = aptitude_profile(&items, &AptitudeRules::default());
        assert_eq!(outcome.score, 0.7);
        assert!(outcome.profile.skills.is_empty());

        items.pop();
        items.push(aptitude(AptitudeCategory::General, Some("42"), &[]));
        let outcome = aptitude_profile(&items, &AptitudeRules::default());
        assert!(outcome.profile.skills.contains("problem-solving"));
    }

    #[test]
    fn test_category_bonus_at_exact_threshold() {
        let mut items: Vec<AptitudeItem> = (0..7)
            .map(|_| aptitude(AptitudeCategory::Verbal, Some("42"), &[]))
            .collect();
        items.extend((0..3).map(|_| aptitude(AptitudeCategory::Verbal, Some("no"), &[])));

        let outcome = aptitude_profile(&items, &AptitudeRules::default());
        assert!(outcome.categories[2].bonus_applied);
        assert!(outcome.profile.skills.contains("communication"));
        assert!(outcome.profile.interests.contains("writing"));
    }

    #[test]
    fn test_general_category_counts_only_overall() {
        let items = vec![aptitude(AptitudeCategory::General, Some("42"), &["trivia"])];
        let outcome = aptitude_profile(&items, &AptitudeRules::default());
        assert_eq!(outcome.correct, 1);
        assert!(outcome.categories.iter().all(|c| c.total == 0 && c.score == 0.0));
        assert!(outcome.profile.skills.contains("trivia"));
    }

    #[test]
    fn test_answers_compare_trimmed_case_insensitive() {
        let mut item = aptitude(AptitudeCategory::Verbal, Some("  articulate "), &[]);
        item.correct_answer = "Articulate".to_string();
        assert!(item.is_correct());
        item.user_answer = None;
        assert!(!item.is_correct());
    }

    #[test]
    fn test_empty_aptitude_quiz() {
        let outcome = aptitude_profile(&[], &AptitudeRules::default());
        assert_eq!(outcome.score, 0.0);
        assert!(outcome.profile.is_empty());
    }

    #[test]
    fn test_personality_sums_without_renormalizing() {
        let items = vec![
            personality(Some("0"), vec![("0", vec![("analytical", 3.0), ("logical", 3.0)])]),
            personality(
                Some("1"),
                vec![("1", vec![("analytical", 2.0)]), ("0", vec![("creative", 3.0)])],
            ),
        ];
        let outcome = personality_profile(&items);

        assert_eq!(outcome.answered, 2);
        assert_eq!(outcome.skipped, 0);
        let traits = &outcome.profile.personality_vector;
        assert_eq!(traits["analytical"], 5.0);
        assert_eq!(traits["logical"], 3.0);
        assert!(!traits.contains_key("creative"));
    }

    #[test]
    fn test_personality_skips_unmapped_and_missing_answers() {
        let items = vec![
            personality(Some("9"), vec![("0", vec![("analytical", 3.0)])]),
            personality(None, vec![("0", vec![("creative", 3.0)])]),
            personality(Some("0"), vec![("0", vec![("patient", 1.0)])]),
        ];
        let outcome = personality_profile(&items);

        assert_eq!(outcome.answered, 1);
        assert_eq!(outcome.skipped, 2);
        assert_eq!(
            outcome.profile.personality_vector,
            TraitVector::from([("patient".to_string(), 1.0)])
        );
    }

    #[test]
    fn test_personality_empty_choice_contributes_nothing() {
        let items = vec![personality(Some("0"), vec![("0", vec![])])];
        let outcome = personality_profile(&items);
        assert_eq!(outcome.answered, 1);
        assert!(outcome.profile.personality_vector.is_empty());
    }
}
