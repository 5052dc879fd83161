//! JPEG encoding into registered temp files.
//!
//! Both pipeline outputs (cover and banner) are written here so they share
//! one quality setting and one bookkeeping path: the file is registered the
//! moment it is created, so a failed encode still gets cleaned up.

use crate::error::BannerError;
use crate::lifecycle::TempFileRegistry;
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::debug;

/// Encode `img` as a JPEG at `quality` into a fresh temp file.
pub fn write_jpeg(
    img: &RgbImage,
    quality: u8,
    registry: &TempFileRegistry,
) -> Result<PathBuf, BannerError> {
    let (file, path) = registry.create(".jpg")?;
    let mut writer = BufWriter::new(file);

    JpegEncoder::new_with_quality(&mut writer, quality)
        .encode_image(img)
        .map_err(|e| BannerError::ImageEncode {
            path: path.clone(),
            source: e,
        })?;
    writer.flush().map_err(|e| BannerError::OutputWriteFailed {
        path: path.clone(),
        source: e,
    })?;

    debug!(
        "Encoded {}x{} JPEG (q{}) → {}",
        img.width(),
        img.height(),
        quality,
        path.display()
    );
    Ok(path)
}
