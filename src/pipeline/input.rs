//! Input validation: make sure a user-supplied path is a readable PDF.
//!
//! pdfium reports a missing file and a truncated xref table with the same
//! opaque error, so the checks here run first to give callers a precise
//! [`BannerError`] instead.

use crate::error::BannerError;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::debug;

const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// Validate that `path` exists, is readable, and starts with `%PDF`.
pub fn validate_pdf(path: &Path) -> Result<(), BannerError> {
    if !path.exists() {
        return Err(BannerError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            return Err(BannerError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(_) => {
            return Err(BannerError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
    };

    let mut magic = [0u8; 4];
    let read = file.read(&mut magic).map_err(|e| BannerError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    if read < magic.len() || &magic != PDF_MAGIC {
        return Err(BannerError::NotAPdf {
            path: path.to_path_buf(),
            magic,
        });
    }

    debug!("Validated PDF input: {}", path.display());
    Ok(())
}
