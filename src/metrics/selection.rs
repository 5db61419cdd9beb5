//! Selection aggregation across the visible roster subset
//!
//! Visible means selected and not hidden. The snapshot is recomputed in full
//! on every selection, visibility, or roster change; it never patches a prior
//! snapshot in place.

use crate::core::types::SkillKey;
use crate::metrics::person::PersonMetricsIndex;
use ahash::{AHashMap, AHashSet};

/// Accumulated contribution of the visible selection to one skill key
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SelectionAggregate {
    pub usage_sum: f64,
    pub unlocked_sum: u32,
    /// People contributing at least one unlocked sub-skill
    pub unlocked_people_count: u32,
}

/// Derived per-key metrics with division-by-zero guards applied
///
/// Every ratio is 0 when nobody is visible, never NaN.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SelectionMetrics {
    pub selected_count: usize,
    pub unlocked_people_count: u32,
    pub unlocked_people_ratio: f64,
    pub usage_avg: f64,
    pub unlocked_sum: u32,
}

/// Aggregates plus the visible-person count they were derived from
#[derive(Debug, Clone, Default)]
pub struct SelectionSnapshot {
    by_key: AHashMap<SkillKey, SelectionAggregate>,
    visible_count: usize,
}

impl SelectionSnapshot {
    /// Aggregate over `selected - hidden`
    ///
    /// A metric qualifies when its usage is positive or it carries at least
    /// one unlocked sub-skill; keys with no qualifying contribution are
    /// absent from the output.
    pub fn compute(
        selected: &AHashSet<String>,
        hidden: &AHashSet<String>,
        metrics: &PersonMetricsIndex,
    ) -> Self {
        let mut by_key: AHashMap<SkillKey, SelectionAggregate> = AHashMap::new();
        let mut visible_count = 0usize;

        for person_id in selected {
            if hidden.contains(person_id) {
                continue;
            }
            visible_count += 1;
            let Some(per_skill) = metrics.metrics_for(person_id) else {
                continue;
            };
            for (key, metric) in per_skill {
                let unlocked = metric.unlocked_count() as u32;
                if metric.usage <= 0.0 && unlocked == 0 {
                    continue;
                }
                let agg = by_key.entry(key.clone()).or_default();
                agg.usage_sum += metric.usage;
                agg.unlocked_sum += unlocked;
                if unlocked > 0 {
                    agg.unlocked_people_count += 1;
                }
            }
        }

        Self {
            by_key,
            visible_count,
        }
    }

    pub fn get(&self, key: &SkillKey) -> Option<&SelectionAggregate> {
        self.by_key.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SkillKey, &SelectionAggregate)> {
        self.by_key.iter()
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Count of selected, non-hidden people (contributing or not)
    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Per-key derived metrics; all-zero when nobody is visible
    pub fn metrics_for(&self, key: &SkillKey) -> SelectionMetrics {
        if self.visible_count == 0 {
            return SelectionMetrics::default();
        }
        let agg = self.by_key.get(key).copied().unwrap_or_default();
        let visible = self.visible_count as f64;
        SelectionMetrics {
            selected_count: self.visible_count,
            unlocked_people_count: agg.unlocked_people_count,
            unlocked_people_ratio: f64::from(agg.unlocked_people_count) / visible,
            usage_avg: agg.usage_sum / visible,
            unlocked_sum: agg.unlocked_sum,
        }
    }
}
