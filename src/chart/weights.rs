//! Leaf weight derivation for the geometry collaborator
//!
//! Every leaf carries at least the configured epsilon floor; the geometry
//! collaborator must never receive a literal zero weight.

use crate::chart::{ChartInputs, ChartMode};
use crate::core::types::SkillKey;
use crate::taxonomy::builder::SkillNode;

/// A skill leaf with its layout weight
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedLeaf {
    pub skill_key: SkillKey,
    pub name: String,
    pub weight: f64,
}

/// A domain with its in-scope skill leaves
///
/// A domain whose skills are all out of scope keeps no leaves and acts as a
/// leaf itself, carrying `weight` directly.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedDomain {
    pub name: String,
    pub weight: f64,
    pub leaves: Vec<WeightedLeaf>,
}

/// The weighted hierarchy handed to the geometry collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedRoot {
    pub name: String,
    pub domains: Vec<WeightedDomain>,
}

/// Derive the weighted hierarchy for the current snapshot
///
/// Tree order follows the taxonomy (first-seen insertion order), so the
/// output is deterministic for a given roster and state.
pub fn weighted_hierarchy(inputs: &ChartInputs<'_>) -> WeightedRoot {
    let mut domains = Vec::with_capacity(inputs.taxonomy.domains.len());
    for domain in &inputs.taxonomy.domains {
        let mut leaves = Vec::new();
        for skill in &domain.skills {
            if skill.name.trim().is_empty() {
                continue;
            }
            let key = SkillKey::new(&domain.name, &skill.name);
            if !inputs.in_scope(&key) {
                continue;
            }
            let weight = leaf_weight(inputs, &key, skill);
            leaves.push(WeightedLeaf {
                skill_key: key,
                name: skill.name.clone(),
                weight,
            });
        }
        let weight = if leaves.is_empty() {
            inputs.config.min_leaf_weight
        } else {
            leaves.iter().map(|l| l.weight).sum()
        };
        domains.push(WeightedDomain {
            name: domain.name.clone(),
            weight,
            leaves,
        });
    }
    WeightedRoot {
        name: inputs.taxonomy.name.clone(),
        domains,
    }
}

fn leaf_weight(inputs: &ChartInputs<'_>, key: &SkillKey, skill: &SkillNode) -> f64 {
    let floor = inputs.config.min_leaf_weight;
    if inputs.hidden_skill_keys.contains(key) {
        return floor;
    }
    match inputs.mode {
        ChartMode::Aggregate => {
            if inputs.selection.visible_count() == 0 {
                return floor;
            }
            let unlocked_sum = inputs
                .selection
                .get(key)
                .map(|agg| f64::from(agg.unlocked_sum))
                .unwrap_or(0.0);
            unlocked_sum.max(floor)
        }
        ChartMode::Static => {
            let usage = if skill.usage.is_finite() {
                skill.usage
            } else {
                0.0
            };
            usage.max(floor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AtlasConfig;
    use crate::core::types::{Person, PersonSkillRecord};
    use crate::metrics::person::PersonMetricsIndex;
    use crate::metrics::scale::UsageScale;
    use crate::metrics::selection::SelectionSnapshot;
    use crate::taxonomy::meta::MetadataIndex;
    use crate::taxonomy::builder::TaxonomyRoot;
    use ahash::AHashSet;

    fn roster() -> Vec<Person> {
        vec![
            Person {
                id: "P1".to_string(),
                name: "Alice".to_string(),
                skills: vec![PersonSkillRecord {
                    domain: "Frontend".to_string(),
                    skill: "React".to_string(),
                    usage: 80.0,
                    unlocked_sub_skills: vec!["Hooks".to_string(), "Context".to_string()],
                }],
            },
            Person {
                id: "P2".to_string(),
                name: "Bob".to_string(),
                skills: vec![PersonSkillRecord {
                    domain: "Backend".to_string(),
                    skill: "SQL".to_string(),
                    usage: 40.0,
                    unlocked_sub_skills: vec![],
                }],
            },
        ]
    }

    struct Fixture {
        taxonomy: TaxonomyRoot,
        selection: SelectionSnapshot,
        scale: UsageScale,
        hidden: AHashSet<SkillKey>,
        highlighted: AHashSet<SkillKey>,
        config: AtlasConfig,
    }

    impl Fixture {
        fn new(people: &[Person], selected: &[&str]) -> Self {
            let taxonomy = TaxonomyRoot::from_people(people);
            let meta = MetadataIndex::from_taxonomy(&taxonomy);
            let metrics = PersonMetricsIndex::build(people, &meta);
            let selected: AHashSet<String> = selected.iter().map(|s| s.to_string()).collect();
            let selection = SelectionSnapshot::compute(&selected, &AHashSet::new(), &metrics);
            let config = AtlasConfig::default();
            let scale = UsageScale::fit(metrics.usage_values(), &config);
            Self {
                taxonomy,
                selection,
                scale,
                hidden: AHashSet::new(),
                highlighted: AHashSet::new(),
                config,
            }
        }

        fn inputs(&self, mode: ChartMode) -> ChartInputs<'_> {
            ChartInputs {
                taxonomy: &self.taxonomy,
                selection: &self.selection,
                scale: &self.scale,
                hidden_skill_keys: &self.hidden,
                highlighted_skill_keys: &self.highlighted,
                scope: None,
                mode,
                config: &self.config,
            }
        }
    }

    fn leaf(root: &WeightedRoot, key: &SkillKey) -> WeightedLeaf {
        root.domains
            .iter()
            .flat_map(|d| d.leaves.iter())
            .find(|l| &l.skill_key == key)
            .cloned()
            .expect("leaf present")
    }

    #[test]
    fn test_aggregate_weight_is_unlocked_sum() {
        let people = roster();
        let fixture = Fixture::new(&people, &["P1", "P2"]);
        let root = weighted_hierarchy(&fixture.inputs(ChartMode::Aggregate));

        assert_eq!(leaf(&root, &SkillKey::new("Frontend", "React")).weight, 2.0);
        // SQL has usage but no unlocked sub-skills, so it sits on the floor.
        assert_eq!(leaf(&root, &SkillKey::new("Backend", "SQL")).weight, 0.001);
    }

    #[test]
    fn test_hidden_leaf_floored() {
        let people = roster();
        let mut fixture = Fixture::new(&people, &["P1", "P2"]);
        fixture.hidden.insert(SkillKey::new("Frontend", "React"));
        let root = weighted_hierarchy(&fixture.inputs(ChartMode::Aggregate));

        let w = leaf(&root, &SkillKey::new("Frontend", "React")).weight;
        assert_eq!(w, 0.001);
        assert!(w > 0.0);
    }

    #[test]
    fn test_zero_visible_people_floors_everything() {
        let people = roster();
        let fixture = Fixture::new(&people, &[]);
        let root = weighted_hierarchy(&fixture.inputs(ChartMode::Aggregate));
        for domain in &root.domains {
            for leaf in &domain.leaves {
                assert_eq!(leaf.weight, 0.001);
            }
        }
    }

    #[test]
    fn test_static_mode_uses_intrinsic_usage() {
        let people = roster();
        let mut fixture = Fixture::new(&people, &["P1", "P2"]);
        fixture.taxonomy.domains[0].skills[0].usage = 55.0;
        let root = weighted_hierarchy(&fixture.inputs(ChartMode::Static));

        assert_eq!(leaf(&root, &SkillKey::new("Frontend", "React")).weight, 55.0);
        assert_eq!(leaf(&root, &SkillKey::new("Backend", "SQL")).weight, 0.001);
    }

    #[test]
    fn test_out_of_scope_domain_becomes_floor_leaf() {
        let people = roster();
        let fixture = Fixture::new(&people, &["P1", "P2"]);
        let scope: AHashSet<SkillKey> = fixture
            .taxonomy
            .domain("Frontend")
            .unwrap()
            .skill_keys();
        let mut inputs = fixture.inputs(ChartMode::Aggregate);
        inputs.scope = Some(&scope);
        let root = weighted_hierarchy(&inputs);

        let backend = root.domains.iter().find(|d| d.name == "Backend").unwrap();
        assert!(backend.leaves.is_empty());
        assert_eq!(backend.weight, 0.001);

        let frontend = root.domains.iter().find(|d| d.name == "Frontend").unwrap();
        assert_eq!(frontend.leaves.len(), 1);
    }

    #[test]
    fn test_no_leaf_weight_is_ever_zero() {
        let people = roster();
        let fixture = Fixture::new(&people, &["P1", "P2"]);
        for mode in [ChartMode::Aggregate, ChartMode::Static] {
            let root = weighted_hierarchy(&fixture.inputs(mode));
            for domain in &root.domains {
                assert!(domain.weight > 0.0);
                for leaf in &domain.leaves {
                    assert!(leaf.weight > 0.0);
                }
            }
        }
    }
}
