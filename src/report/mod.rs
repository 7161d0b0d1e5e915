//! Operator-facing console output.
//!
//! This module provides:
//! - thousands-separated number formatting shared with the artifact header
//! - `DataSummary`: the human-readable digest printed after a conversion
//! - writers for the load, write, summary and missing-source messages

pub mod summary;

// Re-export key types
pub use summary::{
    DataSummary, format_count, format_megabytes, format_thousands, write_load_report,
    write_missing_source, write_next_steps, write_summary, write_write_report,
};
