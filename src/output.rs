//! Response values returned by the banner pipeline.

use crate::pipeline::composite::FitGeometry;
use serde::Serialize;
use std::path::PathBuf;

/// The two generated images, held in memory and ready to offer for download.
#[derive(Debug, Clone)]
pub struct BannerOutput {
    /// Composite banner JPEG.
    pub banner_bytes: Vec<u8>,
    /// Page-1 cover JPEG.
    pub cover_bytes: Vec<u8>,
    /// Download name for the banner, `banner_<stem>.jpg`.
    pub banner_filename: String,
    /// Download name for the cover, `MM_YYYY_cover.jpg`.
    pub cover_filename: String,
    pub stats: BannerStats,
}

/// Sizes and timings of one banner request.
#[derive(Debug, Clone, Serialize)]
pub struct BannerStats {
    /// Rasterised page 1 size `(width, height)` in pixels.
    pub cover_size: (u32, u32),
    /// Banner size, always the background size.
    pub banner_size: (u32, u32),
    pub geometry: FitGeometry,
    pub render_duration_ms: u64,
    pub composite_duration_ms: u64,
    pub total_duration_ms: u64,
}

/// Where [`crate::convert::generate_banner_to_dir`] wrote its files.
#[derive(Debug, Clone, Serialize)]
pub struct SavedBanner {
    pub banner_path: PathBuf,
    pub cover_path: PathBuf,
    pub stats: BannerStats,
}
