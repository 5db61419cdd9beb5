//! Display-ready table projections
//!
//! Both projections recompute fully from current inputs on every call; there
//! is no incremental patching or cached partial state. Sorting carries a
//! deterministic key/id tiebreak so equal usages always land in the same
//! order.

use crate::core::types::{Person, SkillKey};
use crate::metrics::person::PersonMetricsIndex;
use crate::metrics::selection::SelectionSnapshot;
use crate::taxonomy::meta::MetadataIndex;
use ahash::{AHashMap, AHashSet};
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::collections::BTreeMap;

/// Inputs shared by both projections, borrowed as one immutable snapshot
/// for a single derivation pass
#[derive(Debug, Clone, Copy)]
pub struct TableInputs<'a> {
    pub people: &'a [Person],
    pub meta: &'a MetadataIndex,
    pub metrics: &'a PersonMetricsIndex,
    pub selection: &'a SelectionSnapshot,
    pub selected_person_ids: &'a AHashSet<String>,
    pub hidden_skill_keys: &'a AHashSet<SkillKey>,
    pub hidden_person_ids: &'a AHashSet<String>,
    /// Skill keys in play; `None` means overview (all keys)
    pub scope: Option<&'a AHashSet<SkillKey>>,
}

impl TableInputs<'_> {
    fn in_scope(&self, key: &SkillKey) -> bool {
        self.scope.map_or(true, |scope| scope.contains(key))
    }
}

/// One selected person's share of a skill row
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillContributor {
    pub person_id: String,
    pub person_name: String,
    pub usage: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillTableRow {
    pub skill_key: SkillKey,
    pub skill_name: String,
    pub domain_name: String,
    pub total_usage: f64,
    pub avg_usage: f64,
    pub contributor_count: u32,
    pub is_visible: bool,
    pub contributors: Vec<SkillContributor>,
}

/// One skill entry nested under a person row
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonSkillCell {
    pub skill_key: SkillKey,
    pub skill_name: String,
    pub domain: String,
    pub usage: f64,
    pub unlocked_count: usize,
    pub total_sub_skills: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonTableRow {
    pub person_id: String,
    pub person_name: String,
    pub total_usage: f64,
    pub chart_percentage: f64,
    pub skill_count: usize,
    pub is_visible: bool,
    /// Whole-number percentage of the person's usage per domain
    pub domain_breakdown: BTreeMap<String, u32>,
    pub skills: Vec<PersonSkillCell>,
}

/// Skill-centric rows, sorted by total usage descending
///
/// Contributors are drawn from the selected set (visibility only flags the
/// row, it never removes contributors) and carry their share of the row's
/// total usage.
pub fn skill_table_rows(inputs: &TableInputs<'_>) -> Vec<SkillTableRow> {
    let mut rows = Vec::new();
    if inputs.selected_person_ids.is_empty() {
        return rows;
    }
    let names = person_name_index(inputs.people);
    let selected = sorted_ids(inputs.selected_person_ids);
    let visible_count = inputs.selection.visible_count();

    for (key, agg) in inputs.selection.iter() {
        if !inputs.in_scope(key) {
            continue;
        }
        let Some(meta) = inputs.meta.get(key) else {
            continue;
        };
        let total_usage = agg.usage_sum;
        let avg_usage = if visible_count > 0 {
            total_usage / visible_count as f64
        } else {
            0.0
        };

        let mut contributors = Vec::new();
        for &person_id in &selected {
            let usage = inputs
                .metrics
                .metrics_for(person_id.as_str())
                .and_then(|per_skill| per_skill.get(key))
                .map(|m| m.usage)
                .unwrap_or(0.0);
            if usage == 0.0 {
                continue;
            }
            let percentage = if total_usage > 0.0 {
                usage / total_usage * 100.0
            } else {
                0.0
            };
            contributors.push(SkillContributor {
                person_id: person_id.clone(),
                person_name: display_name(&names, person_id.as_str()),
                usage,
                percentage,
            });
        }
        contributors.sort_by(|a, b| {
            OrderedFloat(b.usage)
                .cmp(&OrderedFloat(a.usage))
                .then_with(|| a.person_id.cmp(&b.person_id))
        });

        rows.push(SkillTableRow {
            skill_key: key.clone(),
            skill_name: meta.skill_name.clone(),
            domain_name: meta.domain_name.clone(),
            total_usage,
            avg_usage,
            contributor_count: agg.unlocked_people_count,
            is_visible: !inputs.hidden_skill_keys.contains(key),
            contributors,
        });
    }

    rows.sort_by(|a, b| {
        OrderedFloat(b.total_usage)
            .cmp(&OrderedFloat(a.total_usage))
            .then_with(|| a.skill_key.cmp(&b.skill_key))
    });
    rows
}

/// Person-centric rows, sorted by total usage descending
///
/// Only selected people with at least one in-scope non-zero-usage skill get
/// a row. `chart_percentage` is the person's share of all selected people's
/// in-scope usage.
pub fn person_table_rows(inputs: &TableInputs<'_>) -> Vec<PersonTableRow> {
    let mut rows = Vec::new();
    let names = person_name_index(inputs.people);
    let selected = sorted_ids(inputs.selected_person_ids);

    let mut total_chart_usage = 0.0;
    for &person_id in &selected {
        let Some(per_skill) = inputs.metrics.metrics_for(person_id.as_str()) else {
            continue;
        };
        for (key, metric) in per_skill {
            if inputs.in_scope(key) {
                total_chart_usage += metric.usage;
            }
        }
    }

    for &person_id in &selected {
        let Some(per_skill) = inputs.metrics.metrics_for(person_id.as_str()) else {
            continue;
        };

        let mut total_usage = 0.0;
        let mut skills = Vec::new();
        let mut domain_sums: BTreeMap<String, f64> = BTreeMap::new();

        for (key, metric) in per_skill {
            if !inputs.in_scope(key) || metric.usage == 0.0 {
                continue;
            }
            let Some(meta) = inputs.meta.get(key) else {
                continue;
            };
            total_usage += metric.usage;
            *domain_sums.entry(meta.domain_name.clone()).or_default() += metric.usage;
            skills.push(PersonSkillCell {
                skill_key: key.clone(),
                skill_name: meta.skill_name.clone(),
                domain: meta.domain_name.clone(),
                usage: metric.usage,
                unlocked_count: metric.unlocked_count(),
                total_sub_skills: meta.sub_skill_names.len(),
            });
        }
        if skills.is_empty() {
            continue;
        }
        skills.sort_by(|a, b| {
            OrderedFloat(b.usage)
                .cmp(&OrderedFloat(a.usage))
                .then_with(|| a.skill_key.cmp(&b.skill_key))
        });

        let chart_percentage = if total_chart_usage > 0.0 {
            total_usage / total_chart_usage * 100.0
        } else {
            0.0
        };
        let mut domain_breakdown = BTreeMap::new();
        if total_usage > 0.0 {
            for (domain, sum) in domain_sums {
                domain_breakdown.insert(domain, (sum / total_usage * 100.0).round() as u32);
            }
        }

        rows.push(PersonTableRow {
            person_id: person_id.clone(),
            person_name: display_name(&names, person_id.as_str()),
            total_usage,
            chart_percentage,
            skill_count: skills.len(),
            is_visible: !inputs.hidden_person_ids.contains(person_id),
            domain_breakdown,
            skills,
        });
    }

    rows.sort_by(|a, b| {
        OrderedFloat(b.total_usage)
            .cmp(&OrderedFloat(a.total_usage))
            .then_with(|| a.person_id.cmp(&b.person_id))
    });
    rows
}

/// Trimmed id -> display name; the first person carrying an id wins
fn person_name_index(people: &[Person]) -> AHashMap<&str, &str> {
    let mut names = AHashMap::new();
    for person in people {
        let id = person.trimmed_id();
        if id.is_empty() {
            continue;
        }
        names.entry(id).or_insert(person.name.as_str());
    }
    names
}

/// Display name for an id, falling back to the id itself
fn display_name(names: &AHashMap<&str, &str>, person_id: &str) -> String {
    names
        .get(person_id)
        .map(|name| name.to_string())
        .unwrap_or_else(|| person_id.to_string())
}

/// Selection sets iterate in hash order; sort for deterministic output
fn sorted_ids(ids: &AHashSet<String>) -> Vec<&String> {
    let mut sorted: Vec<&String> = ids.iter().collect();
    sorted.sort();
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::PersonSkillRecord;
    use crate::taxonomy::TaxonomyRoot;

    fn record(domain: &str, skill: &str, usage: f64, unlocked: &[&str]) -> PersonSkillRecord {
        PersonSkillRecord {
            domain: domain.to_string(),
            skill: skill.to_string(),
            usage,
            unlocked_sub_skills: unlocked.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn person(id: &str, name: &str, records: Vec<PersonSkillRecord>) -> Person {
        Person {
            id: id.to_string(),
            name: name.to_string(),
            skills: records,
        }
    }

    struct Fixture {
        people: Vec<Person>,
        meta: MetadataIndex,
        metrics: PersonMetricsIndex,
        selection: SelectionSnapshot,
        selected: AHashSet<String>,
        hidden_skills: AHashSet<SkillKey>,
        hidden_people: AHashSet<String>,
    }

    impl Fixture {
        fn new(people: Vec<Person>) -> Self {
            let selected: AHashSet<String> = people
                .iter()
                .map(|p| p.trimmed_id().to_string())
                .filter(|id| !id.is_empty())
                .collect();
            Self::with_selected(people, selected)
        }

        fn with_selected(people: Vec<Person>, selected: AHashSet<String>) -> Self {
            let taxonomy = TaxonomyRoot::from_people(&people);
            let meta = MetadataIndex::from_taxonomy(&taxonomy);
            let metrics = PersonMetricsIndex::build(&people, &meta);
            let hidden_people = AHashSet::new();
            let selection = SelectionSnapshot::compute(&selected, &hidden_people, &metrics);
            Self {
                people,
                meta,
                metrics,
                selection,
                selected,
                hidden_skills: AHashSet::new(),
                hidden_people,
            }
        }

        fn inputs(&self) -> TableInputs<'_> {
            TableInputs {
                people: &self.people,
                meta: &self.meta,
                metrics: &self.metrics,
                selection: &self.selection,
                selected_person_ids: &self.selected,
                hidden_skill_keys: &self.hidden_skills,
                hidden_person_ids: &self.hidden_people,
                scope: None,
            }
        }
    }

    #[test]
    fn test_single_contributor_row() {
        let fixture = Fixture::new(vec![person(
            "P1",
            "Alice",
            vec![record("Frontend", "React", 80.0, &["Hooks"])],
        )]);
        let rows = skill_table_rows(&fixture.inputs());

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.skill_key, SkillKey::new("Frontend", "React"));
        assert_eq!(row.total_usage, 80.0);
        assert_eq!(row.contributor_count, 1);
        assert_eq!(row.contributors.len(), 1);
        let contributor = &row.contributors[0];
        assert_eq!(contributor.person_id, "P1");
        assert_eq!(contributor.person_name, "Alice");
        assert_eq!(contributor.usage, 80.0);
        assert_eq!(contributor.percentage, 100.0);
    }

    #[test]
    fn test_contributor_percentages_sum_to_100() {
        let fixture = Fixture::new(vec![
            person("P1", "Alice", vec![record("Frontend", "React", 60.0, &[])]),
            person("P2", "Bob", vec![record("Frontend", "React", 30.0, &[])]),
            person("P3", "Cara", vec![record("Frontend", "React", 10.0, &[])]),
        ]);
        let rows = skill_table_rows(&fixture.inputs());
        let total: f64 = rows[0].contributors.iter().map(|c| c.percentage).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_contributors_sorted_by_usage_descending() {
        let fixture = Fixture::new(vec![
            person("P1", "Alice", vec![record("Frontend", "React", 10.0, &[])]),
            person("P2", "Bob", vec![record("Frontend", "React", 90.0, &[])]),
        ]);
        let rows = skill_table_rows(&fixture.inputs());
        let ids: Vec<&str> = rows[0]
            .contributors
            .iter()
            .map(|c| c.person_id.as_str())
            .collect();
        assert_eq!(ids, vec!["P2", "P1"]);
    }

    #[test]
    fn test_rows_sorted_by_total_usage_descending() {
        let fixture = Fixture::new(vec![person(
            "P1",
            "Alice",
            vec![
                record("Frontend", "React", 10.0, &[]),
                record("Backend", "SQL", 90.0, &[]),
            ],
        )]);
        let rows = skill_table_rows(&fixture.inputs());
        assert_eq!(rows[0].skill_key, SkillKey::new("Backend", "SQL"));
        assert_eq!(rows[1].skill_key, SkillKey::new("Frontend", "React"));
    }

    #[test]
    fn test_empty_selection_yields_no_skill_rows() {
        let fixture = Fixture::with_selected(
            vec![person(
                "P1",
                "Alice",
                vec![record("Frontend", "React", 80.0, &[])],
            )],
            AHashSet::new(),
        );
        assert!(skill_table_rows(&fixture.inputs()).is_empty());
    }

    #[test]
    fn test_scope_filters_skill_rows() {
        let fixture = Fixture::new(vec![person(
            "P1",
            "Alice",
            vec![
                record("Frontend", "React", 10.0, &[]),
                record("Backend", "SQL", 90.0, &[]),
            ],
        )]);
        let scope: AHashSet<SkillKey> = [SkillKey::new("Frontend", "React")].into_iter().collect();
        let mut inputs = fixture.inputs();
        inputs.scope = Some(&scope);
        let rows = skill_table_rows(&inputs);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].skill_key, SkillKey::new("Frontend", "React"));
    }

    #[test]
    fn test_hidden_skill_flagged_not_removed() {
        let mut fixture = Fixture::new(vec![person(
            "P1",
            "Alice",
            vec![record("Frontend", "React", 80.0, &[])],
        )]);
        fixture
            .hidden_skills
            .insert(SkillKey::new("Frontend", "React"));
        let rows = skill_table_rows(&fixture.inputs());
        assert_eq!(rows.len(), 1);
        assert!(!rows[0].is_visible);
    }

    #[test]
    fn test_person_rows_shares_and_breakdown() {
        let fixture = Fixture::new(vec![
            person(
                "P1",
                "Alice",
                vec![
                    record("Frontend", "React", 60.0, &[]),
                    record("Backend", "SQL", 20.0, &[]),
                ],
            ),
            person("P2", "Bob", vec![record("Frontend", "React", 20.0, &[])]),
        ]);
        let rows = person_table_rows(&fixture.inputs());

        assert_eq!(rows.len(), 2);
        let alice = &rows[0];
        assert_eq!(alice.person_id, "P1");
        assert_eq!(alice.total_usage, 80.0);
        assert_eq!(alice.skill_count, 2);
        assert!((alice.chart_percentage - 80.0).abs() < 1e-9);
        assert_eq!(alice.domain_breakdown.get("Frontend"), Some(&75));
        assert_eq!(alice.domain_breakdown.get("Backend"), Some(&25));

        let bob = &rows[1];
        assert!((bob.chart_percentage - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_person_without_nonzero_usage_has_no_row() {
        let fixture = Fixture::new(vec![
            person("P1", "Alice", vec![record("Frontend", "React", 80.0, &[])]),
            person("P2", "Bob", vec![record("Frontend", "React", 0.0, &["Hooks"])]),
        ]);
        let rows = person_table_rows(&fixture.inputs());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].person_id, "P1");
    }

    #[test]
    fn test_person_skills_sorted_and_enriched() {
        let fixture = Fixture::new(vec![person(
            "P1",
            "Alice",
            vec![
                record("Frontend", "React", 10.0, &["Hooks"]),
                record("Backend", "SQL", 90.0, &[]),
            ],
        )]);
        let rows = person_table_rows(&fixture.inputs());
        let skills = &rows[0].skills;
        assert_eq!(skills[0].skill_key, SkillKey::new("Backend", "SQL"));
        assert_eq!(skills[1].unlocked_count, 1);
        assert_eq!(skills[1].total_sub_skills, 1);
    }

    #[test]
    fn test_hidden_person_still_contributes_with_flag() {
        let mut fixture = Fixture::new(vec![
            person("P1", "Alice", vec![record("Frontend", "React", 80.0, &[])]),
            person("P2", "Bob", vec![record("Frontend", "React", 20.0, &[])]),
        ]);
        fixture.hidden_people.insert("P2".to_string());
        fixture.selection = SelectionSnapshot::compute(
            &fixture.selected,
            &fixture.hidden_people,
            &fixture.metrics,
        );

        let person_rows = person_table_rows(&fixture.inputs());
        let bob = person_rows.iter().find(|r| r.person_id == "P2").unwrap();
        assert!(!bob.is_visible);

        // Aggregate totals exclude the hidden person, contributors do not.
        let skill_rows = skill_table_rows(&fixture.inputs());
        assert_eq!(skill_rows[0].total_usage, 80.0);
        assert_eq!(skill_rows[0].contributors.len(), 2);
    }
}
