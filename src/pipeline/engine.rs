//! Locate and bind the pdfium shared library.
//!
//! Resolution order (first match wins):
//!
//! 1. the path configured via [`crate::BannerConfigBuilder::pdfium_lib_path`]
//! 2. `PDFIUM_LIB_PATH`
//! 3. the platform library name in the current directory (`./libpdfium.so`, …)
//! 4. the system library search path

use crate::error::BannerError;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming an explicit pdfium library file.
pub const PDFIUM_LIB_PATH_ENV: &str = "PDFIUM_LIB_PATH";

/// Bind pdfium, preferring `explicit` when given.
pub fn bind_pdfium(explicit: Option<&Path>) -> Result<Pdfium, BannerError> {
    if let Some(path) = explicit_library(explicit) {
        debug!("Binding pdfium from {}", path.display());
        return Pdfium::bind_to_library(&path)
            .map(Pdfium::new)
            .map_err(|e| {
                BannerError::PdfiumBindingFailed(format!("{}: {:?}", path.display(), e))
            });
    }

    let local = Pdfium::pdfium_platform_library_name_at_path("./");
    Pdfium::bind_to_library(&local)
        .or_else(|_| Pdfium::bind_to_system_library())
        .map(Pdfium::new)
        .map_err(|e| BannerError::PdfiumBindingFailed(format!("{:?}", e)))
}

fn explicit_library(configured: Option<&Path>) -> Option<PathBuf> {
    configured.map(Path::to_path_buf).or_else(|| {
        std::env::var_os(PDFIUM_LIB_PATH_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    })
}
