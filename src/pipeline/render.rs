//! PDF rasterisation: render page 1 to an RGB image via pdfium.
//!
//! The render size comes from the page's own media box, so a US-Letter page
//! (612 × 792 pt) at 300 DPI is exactly 2550 × 3300 px. Only page 1 is ever
//! loaded; later pages are never touched.

use crate::error::BannerError;
use image::{DynamicImage, RgbImage};
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::{debug, info};

const POINTS_PER_INCH: f32 = 72.0;

/// Pixel size of a page of `width_pt` × `height_pt` points rendered at `dpi`.
pub fn pixel_size(width_pt: f32, height_pt: f32, dpi: u32) -> (u32, u32) {
    let scale = dpi as f32 / POINTS_PER_INCH;
    let px = |pt: f32| ((pt * scale).round() as u32).max(1);
    (px(width_pt), px(height_pt))
}

/// Rasterise the first page of `pdf_path` at `dpi`, dropping any alpha channel.
pub fn render_first_page(
    pdfium: &Pdfium,
    pdf_path: &Path,
    dpi: u32,
    password: Option<&str>,
) -> Result<RgbImage, BannerError> {
    let document = pdfium.load_pdf_from_file(pdf_path, password).map_err(|e| {
        let err_str = format!("{:?}", e);
        if err_str.contains("Password") || err_str.contains("password") {
            if password.is_some() {
                BannerError::WrongPassword {
                    path: pdf_path.to_path_buf(),
                }
            } else {
                BannerError::PasswordRequired {
                    path: pdf_path.to_path_buf(),
                }
            }
        } else {
            BannerError::CorruptPdf {
                path: pdf_path.to_path_buf(),
                detail: err_str,
            }
        }
    })?;

    let pages = document.pages();
    let total_pages = pages.len() as usize;
    if total_pages == 0 {
        return Err(BannerError::EmptyDocument {
            path: pdf_path.to_path_buf(),
        });
    }
    info!("PDF loaded: {} pages, rendering page 1", total_pages);

    let page = pages
        .get(0)
        .map_err(|e| BannerError::RasterisationFailed {
            path: pdf_path.to_path_buf(),
            detail: format!("{:?}", e),
        })?;

    let (width, height) = pixel_size(page.width().value, page.height().value, dpi);
    let render_config = PdfRenderConfig::new()
        .set_target_width(width as i32)
        .set_target_height(height as i32);

    let bitmap = page
        .render_with_config(&render_config)
        .map_err(|e| BannerError::RasterisationFailed {
            path: pdf_path.to_path_buf(),
            detail: format!("{:?}", e),
        })?;

    let rgb = match bitmap.as_image() {
        DynamicImage::ImageRgb8(rgb) => rgb,
        other => other.to_rgb8(),
    };
    debug!(
        "Rendered page 1 at {} DPI → {}x{} px",
        dpi,
        rgb.width(),
        rgb.height()
    );

    Ok(rgb)
}
