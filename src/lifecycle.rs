//! Temp-file bookkeeping for a processor.
//!
//! Every JPEG the pipeline writes goes through [`TempFileRegistry::create`],
//! which persists a uniquely named file and records its path. Nothing is
//! deleted until the caller says the request is over by calling
//! [`TempFileRegistry::cleanup`]; from then on the files are gone whether the
//! request succeeded or not.

use crate::error::BannerError;
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

/// Paths of temp files created by the pipeline and not yet cleaned up.
#[derive(Debug, Default)]
pub struct TempFileRegistry {
    dir: Option<PathBuf>,
    files: Mutex<Vec<PathBuf>>,
}

impl TempFileRegistry {
    /// A registry creating files in `dir`, or the system temp dir when `None`.
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self {
            dir,
            files: Mutex::new(Vec::new()),
        }
    }

    /// Create and register a new empty file with the given suffix.
    ///
    /// The file outlives its handle; only [`cleanup`](Self::cleanup) removes it.
    pub fn create(&self, suffix: &str) -> Result<(File, PathBuf), BannerError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("pdf2banner-").suffix(suffix);
        let named = match self.dir {
            Some(ref dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(BannerError::TempFile)?;

        let (file, path) = named.keep().map_err(|e| BannerError::TempFile(e.error))?;
        self.register(path.clone());
        Ok((file, path))
    }

    /// Track a path created elsewhere so the next cleanup removes it.
    pub fn register(&self, path: PathBuf) {
        debug!("Tracking temp file {}", path.display());
        self.lock().push(path);
    }

    /// Snapshot of the currently tracked paths.
    pub fn tracked(&self) -> Vec<PathBuf> {
        self.lock().clone()
    }

    /// Delete every tracked file plus `extra`, then forget them.
    ///
    /// Failures are logged and skipped. Returns the number of files removed.
    pub fn cleanup<P: AsRef<Path>>(&self, extra: &[P]) -> usize {
        let mut pending = std::mem::take(&mut *self.lock());
        pending.extend(extra.iter().map(|p| p.as_ref().to_path_buf()));
        pending.sort();
        pending.dedup();

        let mut removed = 0;
        for path in &pending {
            match std::fs::remove_file(path) {
                Ok(()) => {
                    debug!("Removed temp file {}", path.display());
                    removed += 1;
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    warn!("Could not clean up temporary file {}: {}", path.display(), e);
                }
            }
        }
        removed
    }

    // A panic while holding the lock leaves the list intact, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, Vec<PathBuf>> {
        self.files.lock().unwrap_or_else(|e| e.into_inner())
    }
}
