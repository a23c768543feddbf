//! Dimension scorers. Pure functions over normalized tags and trait vectors.

use std::collections::BTreeSet;

use crate::catalog::models::{TagSet, TraitVector};

/// Fraction of the career's tags the user also has: `|user ∩ career| / |career|`.
///
/// The denominator is the career's tag count, so extra user tags never
/// dilute the score. `TagSet` is never empty, so the division is always
/// defined. Returns 0.0 for an empty user set.
pub fn overlap_ratio(user_set: &BTreeSet<String>, career_set: &TagSet) -> f64 {
    if user_set.is_empty() {
        return 0.0;
    }
    let matches = career_set.iter().filter(|t| user_set.contains(*t)).count();
    matches as f64 / career_set.len() as f64
}

/// Career tags the user shares, in the career's definition order.
pub fn shared_tags<'a>(user_set: &BTreeSet<String>, career_set: &'a TagSet) -> Vec<&'a str> {
    career_set.iter().filter(|t| user_set.contains(*t)).collect()
}

/// Cosine similarity over sparse trait vectors.
///
/// Only traits present in both vectors enter the dot product; each magnitude
/// is taken over that vector's full set of entries. Returns 0.0 when either
/// vector has zero magnitude or the two share no traits.
pub fn cosine_similarity(user_vector: &TraitVector, career_vector: &TraitVector) -> f64 {
    let mut dot = 0.0_f64;
    let mut shared = 0usize;
    for (trait_name, u) in user_vector {
        if let Some(c) = career_vector.get(trait_name) {
            dot += u * c;
            shared += 1;
        }
    }
    if shared == 0 {
        return 0.0;
    }

    let user_norm = magnitude(user_vector);
    let career_norm = magnitude(career_vector);
    if user_norm == 0.0 || career_norm == 0.0 {
        return 0.0;
    }

    dot / (user_norm * career_norm)
}

fn magnitude(vector: &TraitVector) -> f64 {
    vector.values().map(|v| v * v).sum::<f64>().sqrt()
}
