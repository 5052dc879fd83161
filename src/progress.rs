//! Progress-callback trait for banner generation stages.
//!
//! Inject an [`Arc<dyn BannerProgressCallback>`] via
//! [`crate::config::BannerConfigBuilder::progress_callback`] to receive events
//! as [`crate::convert::generate_banner`] moves through its stages. The CLI
//! drives a terminal progress bar from these events; a web front end could
//! forward them to a socket instead.
//!
//! # Example
//!
//! ```rust
//! use pdf2banner::{BannerConfig, BannerProgressCallback, Stage};
//! use std::sync::Arc;
//!
//! struct Printer;
//!
//! impl BannerProgressCallback for Printer {
//!     fn on_stage(&self, stage: Stage) {
//!         eprintln!("[{:>3}%] {}", stage.percent(), stage.label());
//!     }
//! }
//!
//! let config = BannerConfig::builder()
//!     .progress_callback(Arc::new(Printer) as Arc<dyn BannerProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use serde::Serialize;
use std::sync::Arc;

/// A step of the banner pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    /// Rendering page 1 of the PDF to the cover JPEG.
    Rasterising,
    /// Scaling the cover and pasting it onto the background.
    Compositing,
    /// Reading outputs back and naming them.
    Finalising,
    /// Both images are ready.
    Complete,
}

impl Stage {
    /// Overall completion when this stage begins.
    pub fn percent(self) -> u8 {
        match self {
            Stage::Rasterising => 40,
            Stage::Compositing => 70,
            Stage::Finalising => 90,
            Stage::Complete => 100,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::Rasterising => "Converting PDF to image…",
            Stage::Compositing => "Applying background and scaling…",
            Stage::Finalising => "Finalising image…",
            Stage::Complete => "Image generated successfully",
        }
    }
}

/// Called by the banner pipeline as it moves between stages.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait BannerProgressCallback: Send + Sync {
    /// Called when a stage begins (and once with [`Stage::Complete`]).
    fn on_stage(&self, stage: Stage) {
        let _ = stage;
    }

    /// Called once when the request fails; no further stages follow.
    fn on_error(&self, stage: Stage, error: &str) {
        let _ = (stage, error);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl BannerProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::BannerConfig`].
pub type ProgressCallback = Arc<dyn BannerProgressCallback>;
