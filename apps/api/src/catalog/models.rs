use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Sparse trait → weight mapping. Ordered so dot products sum in the same
/// order regardless of which side drives the iteration.
pub type TraitVector = BTreeMap<String, f64>;

/// Normalizes a free-form tag: trims, lowercases, and folds runs of
/// whitespace or underscores into a single hyphen. Returns `None` for blanks.
pub fn normalize_tag(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut pending_sep = false;

    for c in raw.trim().chars() {
        if c.is_whitespace() || c == '_' || c == '-' {
            pending_sep = true;
            continue;
        }
        if pending_sep && !out.is_empty() {
            out.push('-');
        }
        pending_sep = false;
        out.extend(c.to_lowercase());
    }

    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

/// A non-empty, normalized, de-duplicated tag list in definition order.
///
/// Only constructible through [`TagSet::from_tags`], so every ratio taken over
/// a career's tags has a non-zero denominator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagSet(Vec<String>);

impl TagSet {
    pub fn from_tags<I, S>(tags: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for tag in tags {
            if let Some(tag) = normalize_tag(tag.as_ref()) {
                if !out.contains(&tag) {
                    out.push(tag);
                }
            }
        }
        if out.is_empty() {
            None
        } else {
            Some(TagSet(out))
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Raw catalog record as it appears in the JSON file, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct CareerRecord {
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub interest_tags: Vec<String>,
    #[serde(default)]
    pub skill_tags: Vec<String>,
    #[serde(default)]
    pub personality_vector: BTreeMap<String, f64>,
    #[serde(default)]
    pub education: Vec<String>,
    #[serde(default)]
    pub salary_range: String,
    #[serde(default)]
    pub growth_prospects: String,
    #[serde(default)]
    pub work_environment: String,
}

fn default_category() -> String {
    "General".to_string()
}

/// A validated career definition. Immutable once the catalog is built.
#[derive(Debug, Clone, Serialize)]
pub struct CareerProfile {
    pub name: String,
    pub category: String,
    pub description: String,
    pub interest_tags: TagSet,
    pub skill_tags: TagSet,
    pub personality_vector: TraitVector,
    pub education: Vec<String>,
    pub salary_range: String,
    pub growth_prospects: String,
    pub work_environment: String,
}

/// On-disk catalog layout.
#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    #[serde(default = "default_version")]
    pub version: u32,
    pub careers: Vec<CareerRecord>,
}

fn default_version() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tag_folds_separators() {
        assert_eq!(normalize_tag("  Problem Solving "), Some("problem-solving".into()));
        assert_eq!(normalize_tag("problem_solving"), Some("problem-solving".into()));
        assert_eq!(normalize_tag("Detail--Oriented"), Some("detail-oriented".into()));
    }

    #[test]
    fn test_normalize_tag_rejects_blank() {
        assert_eq!(normalize_tag("   "), None);
        assert_eq!(normalize_tag("__"), None);
    }

    #[test]
    fn test_tag_set_dedups_in_order() {
        let tags = TagSet::from_tags(["Technology", "mathematics", "technology"]).unwrap();
        assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["technology", "mathematics"]);
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_tag_set_empty_is_none() {
        assert!(TagSet::from_tags(Vec::<String>::new()).is_none());
        assert!(TagSet::from_tags(["", "  "]).is_none());
    }
}
