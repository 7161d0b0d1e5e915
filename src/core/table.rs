//! CSV loading with per-column type inference.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use serde_json::{Map, Number, Value};
use tracing::debug;

use super::schema::{Dataset, Record};
use crate::{ConvertError, ConvertResult};

/// Inferred storage type of a column, decided once over all its cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Integer,
    Float,
    Text,
}

impl ColumnKind {
    fn cell_value(self, cell: &str) -> Value {
        if cell.is_empty() {
            return Value::Null;
        }
        match self {
            ColumnKind::Integer => cell.trim().parse::<i64>().map(Value::from).unwrap_or(Value::Null),
            ColumnKind::Float => parse_float(cell)
                .and_then(Number::from_f64)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            ColumnKind::Text => Value::String(cell.to_string()),
        }
    }
}

fn parse_float(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Integer if every non-empty cell is an integer, float if every one is a
/// finite number, text otherwise. A column with no values stays integer and
/// loads as all nulls.
fn infer_kind<'a>(cells: impl Iterator<Item = &'a str>) -> ColumnKind {
    let mut kind = ColumnKind::Integer;
    for cell in cells.filter(|c| !c.is_empty()) {
        match kind {
            ColumnKind::Integer if cell.trim().parse::<i64>().is_ok() => {}
            ColumnKind::Integer | ColumnKind::Float if parse_float(cell).is_some() => {
                kind = ColumnKind::Float;
            }
            _ => return ColumnKind::Text,
        }
    }
    kind
}

/// Repeated header names get a `.N` suffix so every column keeps its own key.
fn dedupe_headers(headers: &StringRecord) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(headers.len());
    for name in headers.iter() {
        let mut candidate = name.to_string();
        let mut n = 0;
        while names.contains(&candidate) {
            n += 1;
            candidate = format!("{name}.{n}");
        }
        names.push(candidate);
    }
    names
}

/// Parse a headed CSV table from any reader.
///
/// # Errors
/// Returns the underlying csv error for unreadable input, rows with more
/// fields than the header, or input with no header at all. Rows with fewer
/// fields load with the missing trailing cells as `null`.
pub fn read_dataset<R: Read>(reader: R) -> csv::Result<Dataset> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = dedupe_headers(rdr.headers()?);
    if columns.is_empty() {
        return Err(csv::Error::from(io::Error::new(
            io::ErrorKind::InvalidData,
            "no columns to parse from file",
        )));
    }

    let rows: Vec<StringRecord> = rdr.records().collect::<Result<_, _>>()?;
    if let Some((n, row)) = rows.iter().enumerate().find(|(_, row)| row.len() > columns.len()) {
        let line = row.position().map_or(n + 2, |p| p.line() as usize);
        return Err(csv::Error::from(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("line {line}: expected {} fields, saw {}", columns.len(), row.len()),
        )));
    }

    let kinds: Vec<ColumnKind> = (0..columns.len())
        .map(|i| infer_kind(rows.iter().map(|row| row.get(i).unwrap_or(""))))
        .collect();

    let records = rows
        .iter()
        .map(|row| {
            let mut fields = Map::new();
            for (i, (name, kind)) in columns.iter().zip(&kinds).enumerate() {
                fields.insert(name.clone(), kind.cell_value(row.get(i).unwrap_or("")));
            }
            Record::new(fields)
        })
        .collect();

    Ok(Dataset::new(columns, records))
}

/// Load the source table from disk.
///
/// # Errors
/// `SourceNotFound` if the path does not exist, `MalformedSource` if it
/// cannot be parsed.
pub fn load_dataset(path: &Path) -> ConvertResult<Dataset> {
    if !path.exists() {
        return Err(ConvertError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }

    let malformed = |source: csv::Error| ConvertError::MalformedSource {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(|e| malformed(csv::Error::from(e)))?;
    let dataset = read_dataset(file).map_err(malformed)?;

    debug!(
        path = %path.display(),
        rows = dataset.len(),
        columns = dataset.columns().len(),
        "loaded table"
    );
    Ok(dataset)
}
