//! Flattened skill-key metadata lookup
//!
//! One entry per (domain, skill) pair found in the taxonomy; used to resolve
//! display names and to validate unlocked sub-skill names per person.

use crate::core::types::SkillKey;
use crate::taxonomy::builder::TaxonomyRoot;
use ahash::{AHashMap, AHashSet};

/// Names attached to one skill key
#[derive(Debug, Clone)]
pub struct SkillMeta {
    pub domain_name: String,
    pub skill_name: String,
    /// All sub-skill names the taxonomy knows for this key. May be empty
    /// when no person has contributed a template yet.
    pub sub_skill_names: AHashSet<String>,
}

/// Lookup from skill key to its metadata, rebuilt from scratch alongside the
/// taxonomy
#[derive(Debug, Clone, Default)]
pub struct MetadataIndex {
    by_key: AHashMap<SkillKey, SkillMeta>,
}

impl MetadataIndex {
    /// Pure flattening of the taxonomy tree
    pub fn from_taxonomy(taxonomy: &TaxonomyRoot) -> Self {
        let mut by_key = AHashMap::new();
        for domain in &taxonomy.domains {
            let domain_name = domain.name.trim();
            if domain_name.is_empty() {
                continue;
            }
            for skill in &domain.skills {
                let skill_name = skill.name.trim();
                if skill_name.is_empty() {
                    continue;
                }
                let sub_skill_names = skill
                    .sub_skill_templates
                    .iter()
                    .map(|s| s.trim())
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
                by_key.insert(
                    SkillKey::new(domain_name, skill_name),
                    SkillMeta {
                        domain_name: domain_name.to_string(),
                        skill_name: skill_name.to_string(),
                        sub_skill_names,
                    },
                );
            }
        }
        Self { by_key }
    }

    pub fn get(&self, key: &SkillKey) -> Option<&SkillMeta> {
        self.by_key.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &SkillKey> {
        self.by_key.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SkillKey, &SkillMeta)> {
        self.by_key.iter()
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
