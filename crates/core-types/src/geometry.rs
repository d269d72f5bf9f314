//! Geometry value types
//!
//! `Point` and `Region` are plain integer-pixel value types. Regions are
//! validated at construction: edges must not be inverted, and no operation
//! silently clamps a bad input into a valid one.

use crate::errors::GeometryError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in integer pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate the point in place
    pub fn offset(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "point:{},{}", self.x, self.y)
    }
}

/// An axis-aligned rectangle in integer pixel space
///
/// Invariant: `left < right` and `top < bottom`. The right and bottom edges
/// are exclusive, so `width == right - left`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Region {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Region {
    /// Create a new region, failing on inverted edges
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Result<Self, GeometryError> {
        if left >= right || top >= bottom {
            return Err(GeometryError::InvertedRegion {
                left,
                top,
                right,
                bottom,
            });
        }
        Ok(Self {
            left,
            top,
            right,
            bottom,
        })
    }

    /// Create a region from its top-left corner and size
    pub fn from_size(left: i32, top: i32, width: u32, height: u32) -> Result<Self, GeometryError> {
        Self::new(left, top, left + width as i32, top + height as i32)
    }

    /// Region width in pixels
    pub fn width(&self) -> u32 {
        (self.right - self.left) as u32
    }

    /// Region height in pixels
    pub fn height(&self) -> u32 {
        (self.bottom - self.top) as u32
    }

    /// Region area in pixels
    pub fn area(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    /// Center point (rounded towards the top-left for even sizes)
    pub fn center(&self) -> Point {
        Point::new(
            self.left + (self.right - self.left) / 2,
            self.top + (self.bottom - self.top) / 2,
        )
    }

    /// Whether the point lies inside the region
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }

    /// Whether the other region lies fully inside this one
    pub fn contains_region(&self, other: &Region) -> bool {
        other.left >= self.left
            && other.right <= self.right
            && other.top >= self.top
            && other.bottom <= self.bottom
    }

    /// Scale all four edges by a factor, re-validating the result
    pub fn scale(&self, factor: f64) -> Result<Self, GeometryError> {
        Self::new(
            (f64::from(self.left) * factor).round() as i32,
            (f64::from(self.top) * factor).round() as i32,
            (f64::from(self.right) * factor).round() as i32,
            (f64::from(self.bottom) * factor).round() as i32,
        )
    }

    /// Translate the region, preserving its size
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }

    /// Bounding-box union of a set of regions
    pub fn merge(regions: &[Region]) -> Result<Self, GeometryError> {
        let first = regions.first().ok_or(GeometryError::EmptyMerge)?;
        let mut merged = *first;
        for region in &regions[1..] {
            merged.left = merged.left.min(region.left);
            merged.top = merged.top.min(region.top);
            merged.right = merged.right.max(region.right);
            merged.bottom = merged.bottom.max(region.bottom);
        }
        Ok(merged)
    }

    /// Intersect with `bounds`, failing when the regions are disjoint
    ///
    /// For an owned receiver the derived [`Ord::clamp`] shadows this method
    /// during by-value resolution; call it as `Region::clamp(&region, &bounds)`
    /// there.
    pub fn clamp(&self, bounds: &Region) -> Result<Self, GeometryError> {
        let left = self.left.max(bounds.left);
        let top = self.top.max(bounds.top);
        let right = self.right.min(bounds.right);
        let bottom = self.bottom.min(bounds.bottom);
        if left >= right || top >= bottom {
            return Err(GeometryError::DisjointRegions(
                self.to_string(),
                bounds.to_string(),
            ));
        }
        Ok(Self {
            left,
            top,
            right,
            bottom,
        })
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "region:{},{},{},{}",
            self.left, self.top, self.right, self.bottom
        )
    }
}
