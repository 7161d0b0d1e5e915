//! Storage layer for generated artifacts.
//!
//! This module writes the rendered JavaScript module to disk.

pub mod artifact;

// Re-export key types
pub use artifact::ArtifactWriter;
