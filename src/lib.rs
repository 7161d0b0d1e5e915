//! Converts a CSV price table into a JavaScript data module for the
//! browser-side economics calculator.
//!
//! The pipeline is linear: load the table ([`core::table`]), derive summary
//! statistics ([`core::stats`]), render the artifact ([`render::js`]), write it
//! ([`storage::artifact`]) and print an operator report ([`report::summary`]).
//! [`convert_cmd`] wires those steps together.

pub mod config;
pub mod convert_cmd;
pub mod core;
pub mod locate;
pub mod render;
pub mod report;
pub mod storage;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    /// The source table does not exist. Handled by the CLI with a listing of
    /// candidate files and exit status 1.
    #[error("CSV file not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    /// The source exists but could not be parsed as a delimited table.
    #[error("failed to parse CSV {}: {source}", path.display())]
    MalformedSource {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A column that must hold numbers was loaded as text.
    #[error("column `{column}` is not numeric")]
    NonNumericColumn { column: String },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to serialize data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("{0}")]
    Message(String),
}

pub type ConvertResult<T> = Result<T, ConvertError>;
