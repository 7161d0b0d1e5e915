//! Search for candidate CSV files when the configured source is missing.

use std::path::{Path, PathBuf};

use tracing::debug;

/// Extension of files offered as candidate sources.
pub const CSV_EXTENSION: &str = "csv";

/// Recursively collect `*.csv` files under `root`, sorted by path.
///
/// Unreadable directories are skipped and symlinked directories are not
/// followed.
pub fn find_delimited_files(root: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "skipping unreadable directory");
                continue;
            }
        };
        for entry in entries.flatten() {
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            let path = entry.path();
            if file_type.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == CSV_EXTENSION) {
                found.push(path);
            }
        }
    }

    found.sort();
    found
}
