use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{ConvertError, ConvertResult};

/// Source table used when nothing else is configured.
pub const DEFAULT_SOURCE: &str = "../dcf-backup/price_data_processed.csv";
/// Generated module consumed by the calculator page.
pub const DEFAULT_OUTPUT: &str = "js/price-data.js";
/// Directory scanned for CSV files when the source is missing.
pub const DEFAULT_SEARCH_ROOT: &str = "..";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    pub source: PathBuf,
    pub output: PathBuf,
    pub search_root: PathBuf,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        ConverterConfig {
            source: PathBuf::from(DEFAULT_SOURCE),
            output: PathBuf::from(DEFAULT_OUTPUT),
            search_root: PathBuf::from(DEFAULT_SEARCH_ROOT),
        }
    }
}

impl ConverterConfig {
    /// Apply command-line values on top of this config.
    pub fn with_overrides(
        mut self,
        source: Option<PathBuf>,
        output: Option<PathBuf>,
        search_root: Option<PathBuf>,
    ) -> Self {
        if let Some(p) = source {
            self.source = p;
        }
        if let Some(p) = output {
            self.output = p;
        }
        if let Some(p) = search_root {
            self.search_root = p;
        }
        self
    }
}

/// Read a TOML config file. Keys left out keep their defaults.
pub fn load_config(path: &Path) -> ConvertResult<ConverterConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| ConvertError::Config(format!("{}: {e}", path.display())))?;
    toml::from_str(&s).map_err(|e| ConvertError::Config(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ConverterConfig::default();
        assert_eq!(cfg.source, PathBuf::from("../dcf-backup/price_data_processed.csv"));
        assert_eq!(cfg.output, PathBuf::from("js/price-data.js"));
        assert_eq!(cfg.search_root, PathBuf::from(".."));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("convert.toml");
        std::fs::write(&path, "source = \"data/prices.csv\"\n").unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.source, PathBuf::from("data/prices.csv"));
        assert_eq!(cfg.output, PathBuf::from(DEFAULT_OUTPUT));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("convert.toml");
        std::fs::write(&path, "sauce = \"x.csv\"\n").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConvertError::Config(_)));
    }

    #[test]
    fn test_overrides_win() {
        let cfg = ConverterConfig::default().with_overrides(
            None,
            Some(PathBuf::from("out/data.js")),
            Some(PathBuf::from("/srv")),
        );
        assert_eq!(cfg.source, PathBuf::from(DEFAULT_SOURCE));
        assert_eq!(cfg.output, PathBuf::from("out/data.js"));
        assert_eq!(cfg.search_root, PathBuf::from("/srv"));
    }
}
