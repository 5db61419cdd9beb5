//! Geometry collaborator contract
//!
//! The partitioner turns the weighted hierarchy into one polygon per leaf.
//! The engine only supplies weights and the clip outline; the returned
//! polygons are opaque and flow straight through to rendering.

use crate::chart::weights::WeightedRoot;
use crate::core::error::Result;
use crate::core::types::SkillKey;
use ahash::AHashMap;
use geo_types::{Coord, LineString, Polygon};

/// Opaque polygon assigned to one leaf by the partitioner
pub type LeafPolygon = Polygon<f64>;

/// The external partitioning algorithm (e.g. a Voronoi treemap)
pub trait GeometryPartitioner {
    /// Partition the clip outline into one polygon per weighted leaf
    ///
    /// Implementations report their own convergence failures through
    /// [`crate::core::error::AtlasError::GeometryError`].
    fn partition(
        &self,
        root: &WeightedRoot,
        clip: &LeafPolygon,
    ) -> Result<AHashMap<SkillKey, LeafPolygon>>;
}

/// Regular n-gon approximating the chart's circular outline
///
/// At least a triangle regardless of the configured point count.
pub fn circle_polygon(radius: f64, points: usize) -> LeafPolygon {
    let count = points.max(3);
    let mut coords = Vec::with_capacity(count + 1);
    for i in 0..count {
        let angle = (i as f64 / count as f64) * std::f64::consts::TAU;
        coords.push(Coord {
            x: angle.cos() * radius,
            y: angle.sin() * radius,
        });
    }
    Polygon::new(LineString::from(coords), vec![])
}
