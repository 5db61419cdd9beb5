//! Union taxonomy built from the roster's skill records
//!
//! The tree is the union of every domain/skill/sub-skill name seen across all
//! people: a domain present for even one person is present for everyone.
//! Child order is first-seen insertion order, so display order is a
//! deterministic function of input order; callers needing a stable order must
//! sort downstream.

use crate::core::types::{Person, SkillKey};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// Display name of the taxonomy root node
pub const ROOT_NAME: &str = "Tech Skills";

/// Root of the three-level taxonomy: root -> domains -> skills
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyRoot {
    pub name: String,
    #[serde(default)]
    pub domains: Vec<DomainNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainNode {
    pub name: String,
    #[serde(default)]
    pub skills: Vec<SkillNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillNode {
    pub name: String,
    /// Intrinsic usage value, only meaningful for hand-authored taxonomies
    /// rendered without a roster. Roster-built trees leave it at 0; the
    /// per-person values live in the metrics index instead.
    #[serde(default)]
    pub usage: f64,
    /// Template sub-skill names known for this skill. Templates carry no
    /// per-person unlocked state.
    #[serde(default)]
    pub sub_skill_templates: Vec<String>,
}

impl TaxonomyRoot {
    pub fn empty() -> Self {
        Self {
            name: ROOT_NAME.to_string(),
            domains: Vec::new(),
        }
    }

    /// Build the union taxonomy from a roster
    ///
    /// Records with an empty (after trimming) domain or skill name are
    /// silently skipped.
    pub fn from_people(people: &[Person]) -> Self {
        let mut taxonomy = Self::empty();
        taxonomy.apply_people_union(people);
        taxonomy
    }

    /// Upsert every record of every person into the tree, in given order
    pub fn apply_people_union(&mut self, people: &[Person]) {
        for person in people {
            for record in &person.skills {
                let domain_name = record.domain.trim();
                let skill_name = record.skill.trim();
                if domain_name.is_empty() || skill_name.is_empty() {
                    continue;
                }
                let domain = self.ensure_domain(domain_name);
                let skill = domain.ensure_skill(skill_name);
                skill.ensure_sub_skill_templates(&record.unlocked_sub_skills);
            }
        }
    }

    pub fn domain(&self, name: &str) -> Option<&DomainNode> {
        self.domains.iter().find(|d| d.name == name)
    }

    fn ensure_domain(&mut self, name: &str) -> &mut DomainNode {
        let idx = match self.domains.iter().position(|d| d.name == name) {
            Some(idx) => idx,
            None => {
                self.domains.push(DomainNode {
                    name: name.to_string(),
                    skills: Vec::new(),
                });
                self.domains.len() - 1
            }
        };
        &mut self.domains[idx]
    }
}

impl Default for TaxonomyRoot {
    fn default() -> Self {
        Self::empty()
    }
}

impl DomainNode {
    /// Skill keys of every skill in this domain (the drill-down scope)
    pub fn skill_keys(&self) -> AHashSet<SkillKey> {
        self.skills
            .iter()
            .filter(|s| !s.name.trim().is_empty())
            .map(|s| SkillKey::new(&self.name, &s.name))
            .collect()
    }

    fn ensure_skill(&mut self, name: &str) -> &mut SkillNode {
        let idx = match self.skills.iter().position(|s| s.name == name) {
            Some(idx) => idx,
            None => {
                self.skills.push(SkillNode {
                    name: name.to_string(),
                    usage: 0.0,
                    sub_skill_templates: Vec::new(),
                });
                self.skills.len() - 1
            }
        };
        &mut self.skills[idx]
    }
}

impl SkillNode {
    /// Upsert template names, deduplicated, preserving first-seen order
    fn ensure_sub_skill_templates(&mut self, names: &[String]) {
        for raw in names {
            let name = raw.trim();
            if name.is_empty() || self.sub_skill_templates.iter().any(|t| t == name) {
                continue;
            }
            self.sub_skill_templates.push(name.to_string());
        }
    }
}
