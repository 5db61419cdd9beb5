//! Contracts with the chart's external collaborators
//!
//! The engine supplies weights and styles; the geometry and rendering
//! collaborators own polygon layout and drawing.

pub mod geometry;
pub mod render;
pub mod weights;

use crate::core::config::AtlasConfig;
use crate::core::types::SkillKey;
use crate::metrics::scale::UsageScale;
use crate::metrics::selection::SelectionSnapshot;
use crate::taxonomy::builder::TaxonomyRoot;
use ahash::AHashSet;

pub use geometry::{circle_polygon, GeometryPartitioner, LeafPolygon};
pub use render::{leaf_styles, LeafStyle};
pub use weights::{weighted_hierarchy, WeightedDomain, WeightedLeaf, WeightedRoot};

/// How leaf values are sourced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartMode {
    /// Values come from the selection aggregates (a roster is loaded)
    Aggregate,
    /// Values come from the taxonomy's intrinsic per-skill usage
    Static,
}

/// Inputs shared by the weight and style derivations, borrowed as one
/// immutable snapshot for a single derivation pass
#[derive(Debug, Clone, Copy)]
pub struct ChartInputs<'a> {
    pub taxonomy: &'a TaxonomyRoot,
    pub selection: &'a SelectionSnapshot,
    pub scale: &'a UsageScale,
    pub hidden_skill_keys: &'a AHashSet<SkillKey>,
    pub highlighted_skill_keys: &'a AHashSet<SkillKey>,
    /// Skill keys in play; `None` means overview (all keys)
    pub scope: Option<&'a AHashSet<SkillKey>>,
    pub mode: ChartMode,
    pub config: &'a AtlasConfig,
}

impl ChartInputs<'_> {
    pub(crate) fn in_scope(&self, key: &SkillKey) -> bool {
        self.scope.map_or(true, |scope| scope.contains(key))
    }
}
