//! Error types for geometry primitives

use thiserror::Error;

/// Geometry error enumeration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// Region edges are inverted (left >= right or top >= bottom)
    #[error("invalid region edges: left={left} top={top} right={right} bottom={bottom}")]
    InvertedRegion {
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
    },

    /// Two regions share no area
    #[error("regions are disjoint: {0} does not intersect {1}")]
    DisjointRegions(String, String),

    /// Merge called with no regions
    #[error("cannot merge an empty set of regions")]
    EmptyMerge,
}
