//! Options for template matching

use serde::{Deserialize, Serialize};
use spotter_core_types::Region;

/// Default user-facing confidence (1-100, logarithmic scale)
pub const DEFAULT_CONFIDENCE: u8 = 80;

/// Options controlling a template search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchOptions {
    /// Restrict the search to this region of the source image
    ///
    /// Returned matches are always in full-image coordinates.
    pub region: Option<Region>,

    /// Stop after this many matches
    pub limit: Option<usize>,

    /// User-facing confidence (1-100); values outside the range are clamped
    pub confidence: u8,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            region: None,
            limit: None,
            confidence: DEFAULT_CONFIDENCE,
        }
    }
}

impl MatchOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the search region
    pub fn with_region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    /// Cap the number of matches
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the confidence
    pub fn with_confidence(mut self, confidence: u8) -> Self {
        self.confidence = confidence;
        self
    }
}
