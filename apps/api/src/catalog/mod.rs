//! Career Catalog: the fixed table of career definitions the matcher scores
//! against. Built once at startup, validated, then shared read-only.

pub mod handlers;
pub mod models;

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;

use crate::catalog::models::{CareerProfile, CareerRecord, CatalogFile, TagSet};

const BUILTIN_CATALOG: &str = include_str!("../../data/careers.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid catalog entry '{career}': {reason}")]
    InvalidCatalogEntry { career: String, reason: String },

    #[error("Catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog read error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    fn invalid(career: &str, reason: impl Into<String>) -> Self {
        CatalogError::InvalidCatalogEntry {
            career: career.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CareerCatalog {
    version: u32,
    careers: Vec<CareerProfile>,
}

impl CareerCatalog {
    /// The catalog shipped with the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(raw)?;
        Self::from_records(file.version, file.careers)
    }

    /// Validates every record; the first bad entry aborts the whole load.
    pub fn from_records(version: u32, records: Vec<CareerRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        let mut careers = Vec::with_capacity(records.len());

        for record in records {
            let career = validate_record(record)?;
            if !seen.insert(career.name.to_lowercase()) {
                return Err(CatalogError::invalid(&career.name, "duplicate career name"));
            }
            careers.push(career);
        }

        Ok(CareerCatalog { version, careers })
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn careers(&self) -> &[CareerProfile] {
        &self.careers
    }

    pub fn len(&self) -> usize {
        self.careers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.careers.is_empty()
    }

    /// Case-insensitive lookup by name.
    pub fn get(&self, name: &str) -> Option<&CareerProfile> {
        let name = name.trim();
        self.careers
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Distinct categories in first-seen catalog order.
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for career in &self.careers {
            if !out.iter().any(|c| c.eq_ignore_ascii_case(&career.category)) {
                out.push(career.category.as_str());
            }
        }
        out
    }

    /// Directory filter. `category` matches exactly (case-insensitive);
    /// `search` is a case-insensitive substring of the career name.
    pub fn filter(&self, category: Option<&str>, search: Option<&str>) -> Vec<&CareerProfile> {
        let search = search.map(|s| s.trim().to_lowercase()).filter(|s| !s.is_empty());

        self.careers
            .iter()
            .filter(|c| {
                category
                    .map(|cat| c.category.eq_ignore_ascii_case(cat.trim()))
                    .unwrap_or(true)
            })
            .filter(|c| {
                search
                    .as_deref()
                    .map(|s| c.name.to_lowercase().contains(s))
                    .unwrap_or(true)
            })
            .collect()
    }
}

fn validate_record(record: CareerRecord) -> Result<CareerProfile, CatalogError> {
    let name = record.name.trim().to_string();
    if name.is_empty() {
        return Err(CatalogError::invalid("<unnamed>", "career name is empty"));
    }

    let interest_tags = TagSet::from_tags(&record.interest_tags)
        .ok_or_else(|| CatalogError::invalid(&name, "interest_tags is empty"))?;
    let skill_tags = TagSet::from_tags(&record.skill_tags)
        .ok_or_else(|| CatalogError::invalid(&name, "skill_tags is empty"))?;

    let mut personality_vector = models::TraitVector::new();
    for (raw_trait, weight) in record.personality_vector {
        if !weight.is_finite() || weight < 0.0 {
            return Err(CatalogError::invalid(
                &name,
                format!("personality weight for '{raw_trait}' must be a non-negative number"),
            ));
        }
        if let Some(trait_name) = models::normalize_tag(&raw_trait) {
            *personality_vector.entry(trait_name).or_insert(0.0) += weight;
        }
    }

    Ok(CareerProfile {
        name,
        category: record.category.trim().to_string(),
        description: record.description,
        interest_tags,
        skill_tags,
        personality_vector,
        education: record.education,
        salary_range: record.salary_range,
        growth_prospects: record.growth_prospects,
        work_environment: record.work_environment,
    })
}
