//! Engine configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other.

/// Configuration shared by the aggregation engine and the chart contracts
///
/// These values match what the downstream chart surface expects. Changing
/// them changes the numbers handed to the geometry and rendering
/// collaborators, nothing inside the engine depends on their exact values.
#[derive(Debug, Clone)]
pub struct AtlasConfig {
    // === CHART OUTLINE ===
    /// Canvas width handed to the rendering collaborator (pixels)
    pub chart_width: f64,

    /// Canvas height handed to the rendering collaborator (pixels)
    pub chart_height: f64,

    /// Radius of the circular chart outline (pixels)
    ///
    /// Defaults to half the smaller canvas dimension minus an 80px margin
    /// for labels around the rim.
    pub chart_radius: f64,

    /// Vertex count of the polygon approximating the circular outline
    ///
    /// 64 points keeps the outline visually round while staying cheap for
    /// the geometry collaborator to clip against.
    pub clip_polygon_points: usize,

    // === GEOMETRY WEIGHTS ===
    /// Epsilon floor for leaf weights
    ///
    /// The geometry collaborator must never receive a literal zero weight;
    /// hidden and contribution-free leaves carry this floor instead so they
    /// stay present (but visually negligible) in the layout.
    pub min_leaf_weight: f64,

    // === INTENSITY SCALE ===
    /// Lower bound of the normalized usage intensity
    ///
    /// Kept above 0 so the palest cells remain distinguishable from the
    /// background.
    pub intensity_min: f64,

    /// Upper bound of the normalized usage intensity
    ///
    /// Kept below 1 so the darkest cells never saturate the color ramp.
    pub intensity_max: f64,

    /// Constant intensity used when the usage extent is degenerate
    ///
    /// With every observed usage equal (e.g. an empty roster) there is no
    /// range to normalize over; mid-ramp keeps such charts readable.
    pub intensity_fallback: f64,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            chart_width: 1000.0,
            chart_height: 1000.0,
            chart_radius: 420.0,
            clip_polygon_points: 64,
            min_leaf_weight: 0.001,
            intensity_min: 0.15,
            intensity_max: 0.95,
            intensity_fallback: 0.6,
        }
    }
}
