//! Data quality checks, identical to the artifact's `validateData()`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::schema::{CATEGORY, Dataset, PRICE, PRODUCT, Record};

/// Prices above this are treated as data entry errors.
pub const MAX_PRICE: f64 = 10_000_000.0;

/// Issue message prefixes. The JavaScript template emits the same text.
pub const EMPTY_VALUES_MESSAGE: &str = "Records with empty values";
pub const INVALID_PRICES_MESSAGE: &str = "Records with invalid prices";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub total_records: usize,
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// True when category or product is missing/empty, or price is missing/zero.
pub fn is_empty_valued(record: &Record) -> bool {
    let price_missing = match record.get(PRICE) {
        None | Some(Value::Null) => true,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    };
    is_blank(record.get(CATEGORY)) || is_blank(record.get(PRODUCT)) || price_missing
}

/// True when `price <= 0 || price > MAX_PRICE` holds under browser comparison
/// rules: a `null` price compares as zero, a missing one never matches.
pub fn has_invalid_price(record: &Record) -> bool {
    let price = match record.get(PRICE) {
        None => return false,
        Some(Value::Null) => 0.0,
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) => v,
            None => return false,
        },
        Some(Value::String(s)) => match s.trim() {
            "" => 0.0,
            t => match t.parse::<f64>() {
                Ok(v) => v,
                Err(_) => return false,
            },
        },
        Some(_) => return false,
    };
    price <= 0.0 || price > MAX_PRICE
}

/// Run both checks over every record.
///
/// Each check that flags at least one record contributes one message with the
/// count; the dataset is valid only when no message was produced.
pub fn validate_dataset(dataset: &Dataset) -> ValidationReport {
    let mut issues = Vec::new();

    let empty = dataset.records().iter().filter(|r| is_empty_valued(r)).count();
    if empty > 0 {
        issues.push(format!("{EMPTY_VALUES_MESSAGE}: {empty}"));
    }

    let invalid = dataset.records().iter().filter(|r| has_invalid_price(r)).count();
    if invalid > 0 {
        issues.push(format!("{INVALID_PRICES_MESSAGE}: {invalid}"));
    }

    ValidationReport {
        is_valid: issues.is_empty(),
        issues,
        total_records: dataset.len(),
    }
}
