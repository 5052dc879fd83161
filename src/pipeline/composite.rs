//! Fit-and-centre compositing of the page onto the background template.
//!
//! The page is scaled uniformly so that it fits the background with a margin
//! controlled by `padding_ratio`, then pasted at the centre of a copy of the
//! background. The background's pixel size is therefore always the output
//! size.
//!
//! ```text
//! scale = min(bg_w / page_w, bg_h / page_h) × padding_ratio
//! size  = (round(page_w × scale), round(page_h × scale))
//! at    = ((bg_w − w) / 2, (bg_h − h) / 2)     integer floor
//! ```

use crate::config::DEFAULT_PADDING_RATIO;
use crate::error::BannerError;
use image::imageops::{self, FilterType};
use image::RgbImage;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Where and how large the page lands on the background.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitGeometry {
    /// Uniform scale applied to the page.
    pub scale: f64,
    /// Scaled page width in pixels.
    pub width: u32,
    /// Scaled page height in pixels.
    pub height: u32,
    /// Left edge of the pasted page.
    pub x: u32,
    /// Top edge of the pasted page.
    pub y: u32,
}

/// Compute the scaled size and centred offset of a `page` inside `canvas`.
///
/// Both sizes are `(width, height)` and must be non-zero. `padding_ratio` is
/// capped at 1.0, and a zero, negative or NaN ratio falls back to
/// [`DEFAULT_PADDING_RATIO`], so the page always keeps its aspect ratio. The
/// scaled size is clamped to `1..=canvas` on each axis so rounding can never
/// push the page past the canvas edge.
pub fn fit_and_center(page: (u32, u32), canvas: (u32, u32), padding_ratio: f64) -> FitGeometry {
    let (pw, ph) = (page.0.max(1) as f64, page.1.max(1) as f64);
    let (cw, ch) = canvas;

    let ratio = if padding_ratio > 0.0 {
        padding_ratio.min(1.0)
    } else {
        DEFAULT_PADDING_RATIO
    };
    let scale = (cw as f64 / pw).min(ch as f64 / ph) * ratio;
    let width = ((pw * scale).round() as u32).clamp(1, cw.max(1));
    let height = ((ph * scale).round() as u32).clamp(1, ch.max(1));

    FitGeometry {
        scale,
        width,
        height,
        x: cw.saturating_sub(width) / 2,
        y: ch.saturating_sub(height) / 2,
    }
}

/// Paste `page`, scaled per [`fit_and_center`], onto a copy of `background`.
pub fn composite(
    page: &RgbImage,
    background: &RgbImage,
    padding_ratio: f64,
    filter: FilterType,
) -> (RgbImage, FitGeometry) {
    let geometry = fit_and_center(
        page.dimensions(),
        background.dimensions(),
        padding_ratio,
    );
    debug!(
        "Fit {}x{} into {}x{}: scale={:.4} → {}x{} at ({}, {})",
        page.width(),
        page.height(),
        background.width(),
        background.height(),
        geometry.scale,
        geometry.width,
        geometry.height,
        geometry.x,
        geometry.y
    );

    let resized = imageops::resize(page, geometry.width, geometry.height, filter);
    let mut canvas = background.clone();
    imageops::replace(&mut canvas, &resized, geometry.x as i64, geometry.y as i64);

    (canvas, geometry)
}

/// Decode the background template, distinguishing "absent" from "unreadable".
pub fn load_background(path: &Path) -> Result<RgbImage, BannerError> {
    if !path.exists() {
        return Err(BannerError::MissingAsset {
            path: path.to_path_buf(),
        });
    }
    load_rgb(path)
}

/// Decode any supported image file into RGB.
pub fn load_rgb(path: &Path) -> Result<RgbImage, BannerError> {
    image::open(path)
        .map(|img| img.into_rgb8())
        .map_err(|e| BannerError::ImageDecode {
            path: path.to_path_buf(),
            source: e,
        })
}
