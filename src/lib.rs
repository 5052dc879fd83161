//! # pdf2banner
//!
//! Turn the first page of a PDF into a cover JPEG and a social banner.
//!
//! The cover is page 1 rasterised at 300 DPI. The banner is the cover scaled
//! uniformly to fit a fixed background template with a 10 % margin on the
//! binding dimension, pasted at the centre. The banner always has exactly the
//! background's pixel size.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input      validate path and %PDF header
//!  ├─ 2. Render     rasterise page 1 via pdfium → cover JPEG (q95)
//!  ├─ 3. Composite  fit + centre on background → banner JPEG (q95)
//!  ├─ 4. Output     read both back into memory, name them
//!  └─ 5. Cleanup    delete every temp file, success or not
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2banner::{generate_banner, BannerConfig, BannerProcessor, BannerRequest};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BannerConfig::builder()
//!         .background("assets/banner_bg.jpg")
//!         .build()?;
//!     let processor = BannerProcessor::new(config);
//!
//!     let output = generate_banner(&processor, &BannerRequest::from_path("issue.pdf"))?;
//!     std::fs::write(&output.banner_filename, &output.banner_bytes)?;
//!     std::fs::write(&output.cover_filename, &output.cover_bytes)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2banner` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! ## PDFium
//!
//! Rendering needs the pdfium shared library at run time. Set
//! `PDFIUM_LIB_PATH`, drop `libpdfium` into the working directory, or install
//! it system-wide. See [`pipeline::engine`].

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod lifecycle;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod processor;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{
    BannerConfig, BannerConfigBuilder, ResampleFilter, DEFAULT_BACKGROUND, DEFAULT_PADDING_RATIO,
};
pub use convert::{generate_banner, generate_banner_from_bytes, generate_banner_to_dir, BannerRequest};
pub use error::{BannerError, ErrorKind};
pub use naming::{banner_filename, cover_filename, cover_filename_now};
pub use output::{BannerOutput, BannerStats, SavedBanner};
pub use pipeline::composite::{fit_and_center, FitGeometry};
pub use processor::{BannerProcessor, CompositedBanner, RenderedCover};
pub use progress::{BannerProgressCallback, NoopProgressCallback, ProgressCallback, Stage};
