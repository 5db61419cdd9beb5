//! Per-person skill metric extraction
//!
//! Raw records are reconciled against the metadata index: usage is coerced to
//! a finite number and unlocked sub-skill names are validated against the
//! taxonomy's templates.

use crate::core::types::{Person, SkillKey};
use crate::taxonomy::meta::{MetadataIndex, SkillMeta};
use ahash::{AHashMap, AHashSet};

/// Derived metric for one (person, skill key) pair
#[derive(Debug, Clone, Default)]
pub struct PersonSkillMetric {
    pub usage: f64,
    pub unlocked_names: AHashSet<String>,
}

impl PersonSkillMetric {
    pub fn unlocked_count(&self) -> usize {
        self.unlocked_names.len()
    }
}

/// Per-person, per-skill-key metrics for the whole roster
#[derive(Debug, Clone, Default)]
pub struct PersonMetricsIndex {
    by_person: AHashMap<String, AHashMap<SkillKey, PersonSkillMetric>>,
}

impl PersonMetricsIndex {
    /// Derive metrics for every person in roster order
    ///
    /// People with an empty (trimmed) id are skipped; a duplicated id keeps
    /// only the last person carrying it. Records with empty domain or skill
    /// names are skipped; a repeated (domain, skill) pair within one person
    /// keeps only the last record. O(total skill records).
    pub fn build(people: &[Person], meta: &MetadataIndex) -> Self {
        let mut by_person = AHashMap::new();
        for person in people {
            let id = person.trimmed_id();
            if id.is_empty() {
                continue;
            }
            let mut per_skill = AHashMap::new();
            for record in &person.skills {
                let domain = record.domain.trim();
                let skill = record.skill.trim();
                if domain.is_empty() || skill.is_empty() {
                    continue;
                }
                let key = SkillKey::new(domain, skill);
                let usage = if record.usage.is_finite() {
                    record.usage
                } else {
                    0.0
                };
                let unlocked_names =
                    reconcile_unlocked(&record.unlocked_sub_skills, meta.get(&key));
                per_skill.insert(
                    key,
                    PersonSkillMetric {
                        usage,
                        unlocked_names,
                    },
                );
            }
            by_person.insert(id.to_string(), per_skill);
        }
        Self { by_person }
    }

    pub fn metrics_for(&self, person_id: &str) -> Option<&AHashMap<SkillKey, PersonSkillMetric>> {
        self.by_person.get(person_id)
    }

    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (&String, &AHashMap<SkillKey, PersonSkillMetric>)> {
        self.by_person.iter()
    }

    /// Every usage value in the index, in no particular order (scale input)
    pub fn usage_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.by_person
            .values()
            .flat_map(|per_skill| per_skill.values().map(|m| m.usage))
    }

    pub fn len(&self) -> usize {
        self.by_person.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_person.is_empty()
    }
}

/// Keep only names the taxonomy knows for this key
///
/// When the metadata has no recorded sub-skills at all for the key (metadata
/// lag), the raw names pass through deduplicated instead of being dropped.
fn reconcile_unlocked(raw: &[String], meta: Option<&SkillMeta>) -> AHashSet<String> {
    let known = meta.map(|m| &m.sub_skill_names).filter(|s| !s.is_empty());
    let mut names = AHashSet::new();
    for raw_name in raw {
        let name = raw_name.trim();
        if name.is_empty() {
            continue;
        }
        match known {
            Some(known) => {
                if known.contains(name) {
                    names.insert(name.to_string());
                }
            }
            None => {
                names.insert(name.to_string());
            }
        }
    }
    names
}
