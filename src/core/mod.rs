//! Core types and computations for price data.
//!
//! This module contains the in-memory `Dataset` model, the CSV loader, summary
//! statistics, and native versions of the lookup and validation routines that the
//! generated JavaScript exposes.

pub mod query;
pub mod schema;
pub mod stats;
pub mod table;
pub mod validate;

// Re-export key types for convenience
pub use query::PriceQuery;
pub use schema::{Dataset, Record};
pub use stats::{DateRange, PriceRange, SummaryStats, compute_stats};
pub use table::{load_dataset, read_dataset};
pub use validate::{ValidationReport, validate_dataset};
