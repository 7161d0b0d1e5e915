//! Rendering of the JavaScript data module.

pub mod js;

pub use js::{ArtifactHeader, FUNCTIONS_JS, render_js};
