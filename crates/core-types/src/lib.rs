//! Shared primitives for the spotter locator engine
//!
//! Geometry value types (`Point`, `Region`) used across the expression
//! engine, the template matcher, and any finder backend.

pub mod errors;
pub mod geometry;

pub use errors::*;
pub use geometry::*;
