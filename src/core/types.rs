//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between the domain and skill halves of a [`SkillKey`]
pub const SKILL_KEY_SEPARATOR: &str = "::";

/// Unique identifier for a (domain, skill) pair
///
/// Derived purely from the trimmed domain and skill names, so two records
/// naming the same pair always map to the same key no matter which person
/// contributed them. Keys stay stable across taxonomy rebuilds as long as the
/// names themselves are unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillKey(String);

impl SkillKey {
    pub fn new(domain: &str, skill: &str) -> Self {
        Self(format!(
            "{}{}{}",
            domain.trim(),
            SKILL_KEY_SEPARATOR,
            skill.trim()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SkillKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One raw skill-usage record as supplied by the caller
///
/// `usage` is conventionally 0-100 but never validated here; non-finite
/// values are coerced to 0 during metric extraction. All fields are defaulted
/// so partially-filled fixture entries still deserialize.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonSkillRecord {
    pub domain: String,
    pub skill: String,
    pub usage: f64,
    pub unlocked_sub_skills: Vec<String>,
}

/// A person in the roster with their sparse skill records
///
/// Owned by the caller; the engine never mutates these, it only derives
/// indices from them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub skills: Vec<PersonSkillRecord>,
}

impl Person {
    /// Identifier with surrounding whitespace stripped; empty means the
    /// person is skipped by every index builder.
    pub fn trimmed_id(&self) -> &str {
        self.id.trim()
    }
}
