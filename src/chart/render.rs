//! Per-leaf render styles for the drawing collaborator
//!
//! The renderer owns color palettes and actual drawing; the engine hands it
//! one style record per in-scope leaf.

use crate::chart::{ChartInputs, ChartMode};
use crate::core::types::SkillKey;

/// Style inputs for one skill cell
#[derive(Debug, Clone, PartialEq)]
pub struct LeafStyle {
    pub skill_key: SkillKey,
    pub domain_name: String,
    /// Normalized color-ramp position, always inside the configured band
    pub intensity: f64,
    pub is_highlighted: bool,
    pub is_hidden: bool,
}

/// Derive styles for every in-scope leaf, in taxonomy tree order
pub fn leaf_styles(inputs: &ChartInputs<'_>) -> Vec<LeafStyle> {
    let mut styles = Vec::new();
    for domain in &inputs.taxonomy.domains {
        for skill in &domain.skills {
            if skill.name.trim().is_empty() {
                continue;
            }
            let key = SkillKey::new(&domain.name, &skill.name);
            if !inputs.in_scope(&key) {
                continue;
            }
            let value = match inputs.mode {
                ChartMode::Aggregate => inputs.selection.metrics_for(&key).usage_avg,
                ChartMode::Static => skill.usage,
            };
            styles.push(LeafStyle {
                skill_key: key.clone(),
                domain_name: domain.name.clone(),
                intensity: inputs.scale.apply(value),
                is_highlighted: inputs.highlighted_skill_keys.contains(&key),
                is_hidden: inputs.hidden_skill_keys.contains(&key),
            });
        }
    }
    styles
}
