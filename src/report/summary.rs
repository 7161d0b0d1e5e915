//! Console report for a conversion run.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::core::schema::{DATE, PRICE};
use crate::core::{Dataset, SummaryStats, ValidationReport};

/// Insert `,` every three digits of an unsigned digit string.
fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `1234567` -> `"1,234,567"`.
pub fn format_count(n: usize) -> String {
    group_digits(&n.to_string())
}

/// Round to a whole number and group thousands: `1234.6` -> `"1,235"`.
pub fn format_thousands(value: f64) -> String {
    let rounded = format!("{value:.0}");
    match rounded.strip_prefix('-') {
        Some(digits) => format!("-{}", group_digits(digits)),
        None => group_digits(&rounded),
    }
}

/// Size in mebibytes with one decimal.
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.1}", bytes as f64 / 1024.0 / 1024.0)
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "N/A".to_string(),
        other => other.to_string(),
    }
}

/// Human-readable digest of a dataset, printed after the artifact is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSummary {
    pub total_records: usize,
    pub categories: usize,
    pub products: usize,
    pub date_range: String,
    pub price_range: String,
}

impl DataSummary {
    pub fn new(dataset: &Dataset, stats: &SummaryStats) -> Self {
        let date_range = if dataset.has_column(DATE) {
            format!(
                "{} ~ {}",
                display_value(&stats.date_range.start),
                display_value(&stats.date_range.end)
            )
        } else {
            "N/A".to_string()
        };
        let price_range = if dataset.has_column(PRICE) {
            format!(
                "{} ~ {}",
                format_thousands(stats.price_range.min),
                format_thousands(stats.price_range.max)
            )
        } else {
            "N/A".to_string()
        };
        DataSummary {
            total_records: stats.total_records,
            categories: stats.categories,
            products: stats.products,
            date_range,
            price_range,
        }
    }

    /// Label/value pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("total_records", self.total_records.to_string()),
            ("categories", self.categories.to_string()),
            ("products", self.products.to_string()),
            ("date_range", self.date_range.clone()),
            ("price_range", self.price_range.clone()),
        ]
    }
}

pub fn write_load_report<W: Write>(out: &mut W, dataset: &Dataset) -> io::Result<()> {
    writeln!(out, "CSV loaded: {} rows", format_count(dataset.len()))?;
    writeln!(out, "Columns: [{}]", dataset.columns().join(", "))
}

pub fn write_write_report<W: Write>(
    out: &mut W,
    records: usize,
    dest: &Path,
    bytes: u64,
) -> io::Result<()> {
    writeln!(
        out,
        "Conversion complete: {} records -> {}",
        format_count(records),
        dest.display()
    )?;
    writeln!(
        out,
        "Output size: {} bytes ({} MB)",
        format_count(bytes as usize),
        format_megabytes(bytes)
    )
}

pub fn write_summary<W: Write>(
    out: &mut W,
    summary: &DataSummary,
    validation: &ValidationReport,
) -> io::Result<()> {
    writeln!(out, "Data summary:")?;
    for (label, value) in summary.entries() {
        writeln!(out, "  {label}: {value}")?;
    }
    if validation.is_valid {
        writeln!(out, "  validation: OK")
    } else {
        writeln!(out, "  validation: {}", validation.issues.join("; "))
    }
}

pub fn write_next_steps<W: Write>(out: &mut W, dest: &Path) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Next steps:")?;
    writeln!(out, "1. {} has been generated", dest.display())?;
    writeln!(out, "2. Load it from the calculator page with a <script> tag")?;
    writeln!(out, "3. Replace any CSV loading code with the PRICE_DATA accessors")?;
    writeln!(out, "4. Commit the generated file and keep the CSV out of version control")
}

/// Diagnostic for a missing source, followed by the CSV files that were found
/// instead.
pub fn write_missing_source<W: Write>(
    out: &mut W,
    source: &Path,
    candidates: &[PathBuf],
) -> io::Result<()> {
    writeln!(out, "CSV file not found: {}", source.display())?;
    writeln!(out, "Available CSV files:")?;
    if candidates.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for path in candidates {
        writeln!(out, "  - {}", path.display())?;
    }
    Ok(())
}
