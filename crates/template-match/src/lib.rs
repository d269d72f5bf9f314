//! Correlation-search template matching
//!
//! One of the finder backends for image-type locator leaves: slides a
//! template over a grayscale search image, computes a normalized
//! cross-correlation coefficient matrix in a single pass, then extracts
//! peaks iteratively with non-maximum suppression until the tolerance,
//! an optional match limit, or the hard iteration cap is reached.

pub mod errors;
pub mod matcher;
pub mod models;

pub use errors::*;
pub use matcher::*;
pub use models::*;
