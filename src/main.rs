#![forbid(unsafe_code)]

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use price_data_js::config::{ConverterConfig, load_config};
use price_data_js::{ConvertError, convert_cmd};

#[derive(Parser, Debug)]
#[command(name = "price-data-js")]
#[command(about = "Convert the price CSV into a JavaScript data module", long_about = None)]
struct Cli {
    /// Enable verbose logging (or set PRICE_DATA_JS_LOG)
    #[arg(long)]
    verbose: bool,

    /// TOML file with `source`, `output` and `search_root`
    #[arg(long)]
    config: Option<PathBuf>,

    /// Source CSV (default: ../dcf-backup/price_data_processed.csv)
    #[arg(long)]
    source: Option<PathBuf>,

    /// Generated JavaScript file (default: js/price-data.js)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Directory searched for CSV files when the source is missing (default: ..)
    #[arg(long)]
    search_root: Option<PathBuf>,
}

fn init_tracing(verbose: bool) {
    let env = std::env::var("PRICE_DATA_JS_LOG").unwrap_or_else(|_| {
        if verbose { "price_data_js=debug".to_string() } else { "price_data_js=info".to_string() }
    });
    let _ = tracing_subscriber::fmt()
        .with_span_events(FmtSpan::ACTIVE)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_env_filter(EnvFilter::new(env))
        .try_init();
}

fn main() {
    color_eyre::install().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let base = match cli.config.as_deref().map(load_config).transpose() {
        Ok(cfg) => cfg.unwrap_or_default(),
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(1);
        }
    };
    let config: ConverterConfig = base.with_overrides(cli.source, cli.output, cli.search_root);

    match convert_cmd::run(&config) {
        Ok(_) => println!("\nConversion finished."),
        // Already reported together with the candidate files
        Err(ConvertError::SourceNotFound { .. }) => std::process::exit(1),
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(1);
        }
    }
}
