//! Summary statistics embedded as `DATA_STATS` and shown in the console report.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::schema::{CATEGORY, DATE, Dataset, PRICE, PRODUCT, compare_values};
use crate::{ConvertError, ConvertResult};

/// Placeholder used for the date bounds when the table has no `date` column.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Value,
    pub end: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_records: usize,
    pub categories: usize,
    pub products: usize,
    pub date_range: DateRange,
    pub price_range: PriceRange,
}

/// Count distinct non-null values of a column; 0 when the column is absent.
fn distinct_count(dataset: &Dataset, column: &str) -> usize {
    if !dataset.has_column(column) {
        return 0;
    }
    dataset
        .column_values(column)
        .map(Value::to_string)
        .collect::<BTreeSet<_>>()
        .len()
}

/// Min and max of the `date` column as loaded, without date parsing.
///
/// String columns therefore compare lexicographically. Bounds are `null` when
/// every cell is empty.
fn date_range(dataset: &Dataset) -> DateRange {
    if !dataset.has_column(DATE) {
        return DateRange {
            start: Value::from(NOT_AVAILABLE),
            end: Value::from(NOT_AVAILABLE),
        };
    }
    let start = dataset.column_values(DATE).min_by(|a, b| compare_values(a, b));
    let end = dataset.column_values(DATE).max_by(|a, b| compare_values(a, b));
    DateRange {
        start: start.cloned().unwrap_or(Value::Null),
        end: end.cloned().unwrap_or(Value::Null),
    }
}

fn price_range(dataset: &Dataset) -> ConvertResult<PriceRange> {
    let zero = PriceRange { min: 0.0, max: 0.0, avg: 0.0 };
    if !dataset.has_column(PRICE) {
        return Ok(zero);
    }

    let mut prices = Vec::with_capacity(dataset.len());
    for value in dataset.column_values(PRICE) {
        let price = value.as_f64().ok_or_else(|| ConvertError::NonNumericColumn {
            column: PRICE.to_string(),
        })?;
        prices.push(price);
    }
    if prices.is_empty() {
        return Ok(zero);
    }

    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let avg = prices.iter().sum::<f64>() / prices.len() as f64;
    Ok(PriceRange { min, max, avg })
}

/// Compute the summary snapshot for a dataset.
///
/// # Errors
/// `NonNumericColumn` if the `price` column was loaded as text.
pub fn compute_stats(dataset: &Dataset) -> ConvertResult<SummaryStats> {
    Ok(SummaryStats {
        total_records: dataset.len(),
        categories: distinct_count(dataset, CATEGORY),
        products: distinct_count(dataset, PRODUCT),
        date_range: date_range(dataset),
        price_range: price_range(dataset)?,
    })
}
