use std::io::Write;
use std::path::{Path, PathBuf};

use fingerprint_core::Notify;

/// A config file rendered in memory, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub filename: String,
    pub contents: String,
}

impl GeneratedFile {
    pub fn new(filename: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            contents: contents.into(),
        }
    }

    pub fn target(&self, root: &Path) -> PathBuf {
        root.join(&self.filename)
    }

    pub fn exists_in(&self, root: &Path) -> bool {
        self.target(root).exists()
    }

    /// Write the file into `root` unless it already exists.
    ///
    /// Contents go to a temporary file next to the target first and are
    /// moved into place without clobbering, so the target is either absent
    /// or complete. The notice is sent only once the file is in place.
    /// Returns whether the file was written.
    pub fn write_to(&self, root: &Path, notify: &dyn Notify) -> Result<bool, WriteError> {
        let target = self.target(root);
        if target.exists() {
            tracing::debug!(path = %target.display(), "already exists, skipping");
            return Ok(false);
        }

        let mut tmp = tempfile::NamedTempFile::new_in(root).map_err(|e| WriteError::TempFile {
            dir: root.to_path_buf(),
            source: e,
        })?;
        tmp.write_all(self.contents.as_bytes())
            .and_then(|()| tmp.flush())
            .map_err(|e| WriteError::Write {
                path: target.clone(),
                source: e,
            })?;

        match tmp.persist_noclobber(&target) {
            Ok(_) => {
                notify.notify(&format!(
                    "Writing [{}] to [{}].",
                    self.filename,
                    root.display()
                ));
                Ok(true)
            }
            Err(e) if e.error.kind() == std::io::ErrorKind::AlreadyExists => {
                tracing::debug!(path = %target.display(), "created concurrently, skipping");
                Ok(false)
            }
            Err(e) => Err(WriteError::Persist {
                path: target,
                source: e.error,
            }),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("failed to create a temporary file in {dir}")]
    TempFile {
        dir: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to move generated file into place at {path}")]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },
}
