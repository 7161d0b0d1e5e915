//! Record and dataset model for loaded price tables.

use std::borrow::Cow;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Well-known column names. Any of them may be missing from a table.
pub const CATEGORY: &str = "category";
pub const PRODUCT: &str = "product";
pub const PRICE: &str = "price";
pub const DATE: &str = "date";
pub const DATE_FULL: &str = "date_full";

/// One row of the source table.
///
/// Fields keep the header's column order. Values are typed per column by the
/// loader: integers, floats, strings, or `null` for empty cells.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Record(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    /// Display form of a cell, used when listing distinct values. Integral
    /// floats print without a fraction (`1.0` is `"1"`). `null` and missing
    /// cells have no text form.
    pub fn text(&self, column: &str) -> Option<Cow<'_, str>> {
        match self.0.get(column)? {
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) if n.is_f64() => n.as_f64().map(|f| Cow::Owned(f.to_string())),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            _ => None,
        }
    }

    /// The cell if it holds a string. Numeric cells never equal a string
    /// argument in the artifact's `===` lookups, so they have no value here.
    pub fn str_value(&self, column: &str) -> Option<&str> {
        self.0.get(column).and_then(Value::as_str)
    }

    pub fn category(&self) -> Option<Cow<'_, str>> {
        self.text(CATEGORY)
    }

    pub fn product(&self) -> Option<Cow<'_, str>> {
        self.text(PRODUCT)
    }

    pub fn date(&self) -> Option<Cow<'_, str>> {
        self.text(DATE)
    }

    pub fn date_full(&self) -> Option<Cow<'_, str>> {
        self.text(DATE_FULL)
    }

    /// Numeric price, if the cell holds a number.
    pub fn price(&self) -> Option<f64> {
        self.0.get(PRICE).and_then(Value::as_f64)
    }
}

/// The full table as loaded, in row order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        Dataset { columns, records }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Non-null values of a column, in row order.
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.records
            .iter()
            .filter_map(move |r| r.get(column))
            .filter(|v| !v.is_null())
    }
}

/// Natural ordering of two cell values from the same column.
///
/// Numbers compare numerically and strings lexicographically. Mixed kinds
/// cannot come out of the loader; they fall back to comparing their JSON text.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => a.to_string().cmp(&b.to_string()),
    }
}
