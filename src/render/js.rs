//! JavaScript artifact generator.
//!
//! Produces a single `.js` file that declares:
//! - `PRICE_DATA`: every loaded record, in order, as pretty-printed JSON
//! - `DATA_STATS`: the summary statistics
//! - accessor functions over both, plus `validateData()`
//! - a trailer that logs record count, stats and validation to the console
//!
//! Apart from the `// Generated:` line the output is a pure function of the
//! dataset and the source file name.

use std::path::Path;

use time::OffsetDateTime;
use time::macros::format_description;

use crate::ConvertResult;
use crate::core::{Dataset, SummaryStats};
use crate::report::format_count;

/// Prefix of the only header line that changes between runs.
pub const GENERATED_PREFIX: &str = "// Generated: ";

/// Fixed accessor, validation and trailer code appended after the data.
pub const FUNCTIONS_JS: &str = r#"// Data accessors
function getPriceData() {
    return PRICE_DATA;
}

function getDataStats() {
    return DATA_STATS;
}

function getCategories() {
    return [...new Set(PRICE_DATA.map(item => item.category))].sort();
}

function getProducts() {
    return [...new Set(PRICE_DATA.map(item => item.product))].sort();
}

function getProductsByCategory(category) {
    return PRICE_DATA
        .filter(item => item.category === category)
        .map(item => item.product)
        .filter((value, index, self) => self.indexOf(value) === index)
        .sort();
}

function getPriceHistory(category, product) {
    return PRICE_DATA
        .filter(item => item.category === category && item.product === product)
        .sort((a, b) => new Date(a.date_full) - new Date(b.date_full));
}

function getLatestPrice(category, product) {
    const history = getPriceHistory(category, product);
    return history.length > 0 ? history[history.length - 1] : null;
}

function getPriceByDate(category, product, date) {
    return PRICE_DATA.find(item =>
        item.category === category &&
        item.product === product &&
        item.date === date
    );
}

// Data validation
function isBlankValue(value) {
    return value === undefined || value === null || value === '';
}

function validateData() {
    const issues = [];

    // Missing category, product or price
    const emptyValues = PRICE_DATA.filter(item =>
        isBlankValue(item.category) ||
        isBlankValue(item.product) ||
        isBlankValue(item.price) || item.price === 0
    );
    if (emptyValues.length > 0) {
        issues.push(`Records with empty values: ${emptyValues.length}`);
    }

    // Price range
    const invalidPrices = PRICE_DATA.filter(item =>
        item.price <= 0 || item.price > 10000000
    );
    if (invalidPrices.length > 0) {
        issues.push(`Records with invalid prices: ${invalidPrices.length}`);
    }

    return {
        isValid: issues.length === 0,
        issues: issues,
        totalRecords: PRICE_DATA.length
    };
}

console.log('Price data loaded:', PRICE_DATA.length, 'records');
console.log('Data stats:', DATA_STATS);
console.log('Data validation:', validateData());
"#;

/// Values for the artifact's header comment block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactHeader {
    pub generated_at: String,
    pub source_name: String,
}

impl ArtifactHeader {
    /// Header for `source`, stamped with the current local time (UTC if the
    /// local offset cannot be determined).
    pub fn for_source(source: &Path) -> Self {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        let generated_at = now
            .format(format_description!(
                "[year]-[month]-[day] [hour]:[minute]:[second]"
            ))
            .unwrap_or_default();
        let source_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.display().to_string());
        ArtifactHeader {
            generated_at,
            source_name,
        }
    }
}

/// Render the complete artifact text.
///
/// # Errors
/// Returns an error if the records or stats fail to serialize.
pub fn render_js(
    dataset: &Dataset,
    stats: &SummaryStats,
    header: &ArtifactHeader,
) -> ConvertResult<String> {
    let data_json = serde_json::to_string_pretty(dataset.records())?;
    let stats_json = serde_json::to_string_pretty(stats)?;

    let mut js = String::with_capacity(data_json.len() + stats_json.len() + FUNCTIONS_JS.len() + 512);

    js.push_str("// Price data for the economics calculator\n");
    js.push_str(GENERATED_PREFIX);
    js.push_str(&header.generated_at);
    js.push('\n');
    js.push_str(&format!("// Records: {}\n", format_count(dataset.len())));
    js.push_str(&format!("// Source CSV: {}\n\n", header.source_name));

    js.push_str("const PRICE_DATA = ");
    js.push_str(&data_json);
    js.push_str(";\n\n");

    js.push_str("// Data statistics\n");
    js.push_str("const DATA_STATS = ");
    js.push_str(&stats_json);
    js.push_str(";\n\n");

    js.push_str(FUNCTIONS_JS);
    Ok(js)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validate::{EMPTY_VALUES_MESSAGE, INVALID_PRICES_MESSAGE, MAX_PRICE};
    use crate::core::{compute_stats, read_dataset};

    fn fixed_header() -> ArtifactHeader {
        ArtifactHeader {
            generated_at: "2026-01-15 12:00:00".to_string(),
            source_name: "prices.csv".to_string(),
        }
    }

    fn render(csv: &str) -> String {
        let ds = read_dataset(csv.as_bytes()).unwrap();
        let stats = compute_stats(&ds).unwrap();
        render_js(&ds, &stats, &fixed_header()).unwrap()
    }

    #[test]
    fn test_header_block() {
        let js = render("category,product,price\nA,X,1\n");
        let lines: Vec<&str> = js.lines().take(4).collect();
        assert_eq!(lines[0], "// Price data for the economics calculator");
        assert_eq!(lines[1], "// Generated: 2026-01-15 12:00:00");
        assert_eq!(lines[2], "// Records: 1");
        assert_eq!(lines[3], "// Source CSV: prices.csv");
    }

    #[test]
    fn test_embeds_data_and_stats() {
        let js = render("category,product,price,note\n시멘트,포대,5200,\n");
        assert!(js.contains("const PRICE_DATA = [\n  {\n    \"category\": \"시멘트\",\n"));
        assert!(js.contains("\"price\": 5200,"));
        assert!(js.contains("\"note\": null"));
        assert!(js.contains("const DATA_STATS = {\n  \"total_records\": 1,"));
        assert!(js.contains("\"start\": \"N/A\""));
    }

    #[test]
    fn test_declares_all_functions() {
        let js = render("category\nA\n");
        for name in [
            "getPriceData",
            "getDataStats",
            "getCategories",
            "getProducts",
            "getProductsByCategory",
            "getPriceHistory",
            "getLatestPrice",
            "getPriceByDate",
            "validateData",
        ] {
            assert!(js.contains(&format!("function {name}(")), "missing {name}");
        }
        assert!(js.trim_end().ends_with("console.log('Data validation:', validateData());"));
    }

    #[test]
    fn test_template_matches_native_validation() {
        assert!(FUNCTIONS_JS.contains(&format!("`{EMPTY_VALUES_MESSAGE}: ${{")));
        assert!(FUNCTIONS_JS.contains(&format!("`{INVALID_PRICES_MESSAGE}: ${{")));
        assert!(FUNCTIONS_JS.contains(&format!("item.price > {}", MAX_PRICE as u64)));
    }

    #[test]
    fn test_empty_dataset() {
        let js = render("category,product,price\n");
        assert!(js.contains("const PRICE_DATA = [];"));
        assert!(js.contains("// Records: 0"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let csv = "category,product,price,date\nA,X,1,d1\nB,Y,2,d2\n";
        assert_eq!(render(csv), render(csv));
    }

    #[test]
    fn test_header_for_source_uses_basename() {
        let header = ArtifactHeader::for_source(Path::new("../dcf-backup/price_data_processed.csv"));
        assert_eq!(header.source_name, "price_data_processed.csv");
        assert_eq!(header.generated_at.len(), "2026-01-15 12:00:00".len());
    }
}
