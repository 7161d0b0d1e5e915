//! Writes the rendered artifact to its destination.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{ConvertError, ConvertResult};

/// Writer for a single generated file.
///
/// Missing parent directories are created and an existing file is replaced
/// without prompting. The write is not atomic.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    path: PathBuf,
}

impl ArtifactWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        ArtifactWriter {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `contents` as UTF-8 and return the size of the file on disk.
    ///
    /// # Errors
    /// Returns `ConvertError::Write` if a directory or the file cannot be
    /// created.
    pub fn write(&self, contents: &str) -> ConvertResult<u64> {
        let write_err = |source: std::io::Error| ConvertError::Write {
            path: self.path.clone(),
            source,
        };

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        std::fs::write(&self.path, contents).map_err(write_err)?;
        let size = std::fs::metadata(&self.path).map_err(write_err)?.len();

        debug!(path = %self.path.display(), bytes = size, "wrote artifact");
        Ok(size)
    }
}
