//! CLI command handler for the conversion.
//!
//! Loads the source CSV, computes summary statistics, renders the JavaScript
//! module, writes it, and prints a report. Any failure aborts the run; nothing
//! is retried.

use std::io::{self, Write};
use std::path::Path;

use tracing::{info, info_span, warn};

use crate::config::ConverterConfig;
use crate::core::{SummaryStats, ValidationReport, compute_stats, load_dataset, validate_dataset};
use crate::locate::find_delimited_files;
use crate::render::{ArtifactHeader, render_js};
use crate::report::{
    DataSummary, write_load_report, write_missing_source, write_next_steps, write_summary,
    write_write_report,
};
use crate::storage::ArtifactWriter;
use crate::{ConvertError, ConvertResult};

/// What a successful conversion produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionOutcome {
    pub records: usize,
    pub bytes_written: u64,
    pub stats: SummaryStats,
    pub validation: ValidationReport,
}

fn report_err(e: io::Error) -> ConvertError {
    ConvertError::Message(format!("failed to write report: {e}"))
}

/// Convert `source` into the JavaScript module at `dest`, printing progress
/// to stdout.
///
/// # Errors
/// `SourceNotFound` if `source` does not exist, `MalformedSource` or
/// `NonNumericColumn` if it cannot be loaded, `Write` if `dest` cannot be
/// written.
pub fn convert(source: &Path, dest: &Path) -> ConvertResult<ConversionOutcome> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    convert_to(source, dest, &mut handle)
}

/// [`convert`] with the report sent to any writer.
pub fn convert_to<W: Write>(
    source: &Path,
    dest: &Path,
    out: &mut W,
) -> ConvertResult<ConversionOutcome> {
    let _span = info_span!("convert", dest = %dest.display()).entered();
    info!(source = %source.display(), "loading CSV");
    writeln!(out, "Loading CSV: {}", source.display()).map_err(report_err)?;
    let dataset = load_dataset(source)?;
    write_load_report(out, &dataset).map_err(report_err)?;

    let stats = compute_stats(&dataset)?;

    let header = ArtifactHeader::for_source(source);
    let js = render_js(&dataset, &stats, &header)?;

    info!(dest = %dest.display(), records = dataset.len(), "writing artifact");
    let bytes_written = ArtifactWriter::new(dest).write(&js)?;
    write_write_report(out, dataset.len(), dest, bytes_written).map_err(report_err)?;

    let validation = validate_dataset(&dataset);
    if !validation.is_valid {
        warn!(issues = ?validation.issues, "data validation reported issues");
    }
    write_summary(out, &DataSummary::new(&dataset, &stats), &validation).map_err(report_err)?;

    Ok(ConversionOutcome {
        records: dataset.len(),
        bytes_written,
        stats,
        validation,
    })
}

/// Run the conversion described by `config`, printing to stdout.
pub fn run(config: &ConverterConfig) -> ConvertResult<ConversionOutcome> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    run_to(config, &mut handle)
}

/// Run the conversion described by `config`.
///
/// A missing source is reported together with every CSV file found under
/// `config.search_root`, and nothing is written.
pub fn run_to<W: Write>(config: &ConverterConfig, out: &mut W) -> ConvertResult<ConversionOutcome> {
    if !config.source.exists() {
        let candidates = find_delimited_files(&config.search_root);
        write_missing_source(out, &config.source, &candidates).map_err(report_err)?;
        return Err(ConvertError::SourceNotFound {
            path: config.source.clone(),
        });
    }

    let outcome = convert_to(&config.source, &config.output, out)?;
    write_next_steps(out, &config.output).map_err(report_err)?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[derive(Clone, Default)]
    struct SharedLog(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl Write for SharedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_conversion_runs_inside_span() {
        use tracing_subscriber::fmt::format::FmtSpan;

        let temp = TempDir::new().unwrap();
        let source = write_csv(&temp, "prices.csv", "category,product,price\nA,X,1\n");
        let dest = temp.path().join("price-data.js");

        let log = SharedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_span_events(FmtSpan::CLOSE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            convert_to(&source, &dest, &mut Vec::new()).unwrap();
        });

        let text = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert!(text.contains("convert{dest="), "{text}");
        assert!(text.contains("loading CSV"), "{text}");
        assert!(text.contains("close"), "{text}");
    }

    #[test]
    fn test_convert_writes_artifact_and_report() {
        let temp = TempDir::new().unwrap();
        let source = write_csv(
            &temp,
            "prices.csv",
            "category,product,price,date,date_full\n\
             A,X,100,2024-01-01,2024-01-01\n\
             A,X,150,2024-02-01,2024-02-01\n",
        );
        let dest = temp.path().join("js/price-data.js");

        let mut out = Vec::new();
        let outcome = convert_to(&source, &dest, &mut out).unwrap();

        assert_eq!(outcome.records, 2);
        assert!(outcome.validation.is_valid);
        assert_eq!(outcome.bytes_written, std::fs::metadata(&dest).unwrap().len());

        let report = String::from_utf8(out).unwrap();
        assert!(report.contains("CSV loaded: 2 rows"));
        assert!(report.contains("Columns: [category, product, price, date, date_full]"));
        assert!(report.contains("date_range: 2024-01-01 ~ 2024-02-01"));
        assert!(report.contains("price_range: 100 ~ 150"));
    }

    #[test]
    fn test_run_missing_source_lists_candidates() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("backup")).unwrap();
        write_csv(&temp, "backup/old_prices.csv", "price\n1\n");

        let config = ConverterConfig {
            source: temp.path().join("missing.csv"),
            output: temp.path().join("js/price-data.js"),
            search_root: temp.path().to_path_buf(),
        };

        let mut out = Vec::new();
        let err = run_to(&config, &mut out).unwrap_err();

        assert!(matches!(err, ConvertError::SourceNotFound { .. }));
        let report = String::from_utf8(out).unwrap();
        assert!(report.contains("old_prices.csv"));
        assert!(!temp.path().join("js").exists());
    }

    #[test]
    fn test_run_prints_next_steps() {
        let temp = TempDir::new().unwrap();
        let config = ConverterConfig {
            source: write_csv(&temp, "p.csv", "category,product,price\nA,X,1\n"),
            output: temp.path().join("out.js"),
            search_root: temp.path().to_path_buf(),
        };

        let mut out = Vec::new();
        run_to(&config, &mut out).unwrap();

        assert!(String::from_utf8(out).unwrap().contains("Next steps:"));
    }

    #[test]
    fn test_malformed_source_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let source = write_csv(&temp, "bad.csv", "a,b\n1,2,3\n");
        let dest = temp.path().join("out.js");

        let err = convert_to(&source, &dest, &mut Vec::new()).unwrap_err();

        assert!(matches!(err, ConvertError::MalformedSource { .. }));
        assert!(!dest.exists());
    }
}
