//! Spotter library
//!
//! Exposes the file-backed finder for integration testing and embedding.

pub mod finder;

pub use finder::ImageFinder;
