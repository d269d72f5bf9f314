//! Error types for template matching

use spotter_core_types::GeometryError;
use thiserror::Error;

/// Template matching error enumeration
#[derive(Debug, Error)]
pub enum MatchError {
    /// Precondition failure: no correlation work was performed
    #[error("template larger than search region: template {template_width}x{template_height}, search {search_width}x{search_height}")]
    TemplateTooLarge {
        template_width: u32,
        template_height: u32,
        search_width: u32,
        search_height: u32,
    },

    /// The search completed and nothing cleared the tolerance
    #[error("no matches for given template")]
    NoMatches,

    /// A required vision/OCR backend is missing from the environment
    ///
    /// Distinct from [`MatchError::NoMatches`] so callers can react with
    /// "install the dependency" rather than "retry the search".
    #[error("vision backend unavailable: {0}")]
    Unavailable(String),

    /// Invalid input parameters
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Search region failure (for example, disjoint from the image)
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Image decoding or processing failure
    #[error("image processing error: {0}")]
    ImageProcessing(String),
}

impl From<image::ImageError> for MatchError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageProcessing(err.to_string())
    }
}
