//! The image processor: page rasterisation, compositing, temp-file cleanup.
//!
//! A [`BannerProcessor`] is constructed once and passed by reference to each
//! request. It carries the configuration and the list of temp files written
//! since the last [`cleanup`](BannerProcessor::cleanup); nothing else
//! survives between requests.

use crate::config::BannerConfig;
use crate::error::BannerError;
use crate::lifecycle::TempFileRegistry;
use crate::pipeline::composite::{self, FitGeometry};
use crate::pipeline::{encode, engine, input, render};
use std::path::{Path, PathBuf};
use tracing::info;

/// Cover JPEG produced by [`BannerProcessor::pdf_to_jpeg`].
#[derive(Debug, Clone)]
pub struct RenderedCover {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Banner JPEG produced by [`BannerProcessor::center_and_fit`].
#[derive(Debug, Clone)]
pub struct CompositedBanner {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub geometry: FitGeometry,
}

#[derive(Debug)]
pub struct BannerProcessor {
    config: BannerConfig,
    temp_files: TempFileRegistry,
}

impl BannerProcessor {
    pub fn new(config: BannerConfig) -> Self {
        let temp_files = TempFileRegistry::new(config.temp_dir.clone());
        Self { config, temp_files }
    }

    pub fn config(&self) -> &BannerConfig {
        &self.config
    }

    /// Render page 1 of `pdf_path` to a tracked JPEG temp file.
    ///
    /// The caller owns deletion through [`cleanup`](Self::cleanup).
    pub fn pdf_to_jpeg(&self, pdf_path: &Path) -> Result<RenderedCover, BannerError> {
        input::validate_pdf(pdf_path)?;

        let pdfium = engine::bind_pdfium(self.config.pdfium_lib_path.as_deref())?;
        let page = render::render_first_page(
            &pdfium,
            pdf_path,
            self.config.dpi,
            self.config.password.as_deref(),
        )?;

        let path = encode::write_jpeg(&page, self.config.jpeg_quality, &self.temp_files)?;
        info!(
            "Cover {}x{} written to {}",
            page.width(),
            page.height(),
            path.display()
        );

        Ok(RenderedCover {
            path,
            width: page.width(),
            height: page.height(),
        })
    }

    /// Centre the image at `jpeg_path` on `background_path` with the configured padding.
    ///
    /// Fails with [`BannerError::MissingAsset`] when the background is absent.
    pub fn center_and_fit(
        &self,
        jpeg_path: &Path,
        background_path: &Path,
    ) -> Result<CompositedBanner, BannerError> {
        let page = composite::load_rgb(jpeg_path)?;
        let background = composite::load_background(background_path)?;

        let (banner, geometry) = composite::composite(
            &page,
            &background,
            self.config.padding_ratio,
            self.config.filter.into(),
        );

        let path = encode::write_jpeg(&banner, self.config.jpeg_quality, &self.temp_files)?;
        info!(
            "Banner {}x{} written to {}",
            banner.width(),
            banner.height(),
            path.display()
        );

        Ok(CompositedBanner {
            path,
            width: banner.width(),
            height: banner.height(),
            geometry,
        })
    }

    /// Like [`center_and_fit`](Self::center_and_fit) with the configured background.
    pub fn center_and_fit_default(&self, jpeg_path: &Path) -> Result<CompositedBanner, BannerError> {
        self.center_and_fit(jpeg_path, &self.config.background)
    }

    /// Store `bytes` (an uploaded PDF) in a tracked temp file and return its path.
    pub fn stage_upload(&self, bytes: &[u8]) -> Result<PathBuf, BannerError> {
        use std::io::Write;

        let (mut file, path) = self.temp_files.create(".pdf")?;
        file.write_all(bytes)
            .and_then(|_| file.flush())
            .map_err(|e| BannerError::OutputWriteFailed {
                path: path.clone(),
                source: e,
            })?;
        Ok(path)
    }

    /// Temp files created since the last cleanup.
    pub fn tracked_files(&self) -> Vec<PathBuf> {
        self.temp_files.tracked()
    }

    /// Delete all tracked temp files plus `additional`; never fails.
    ///
    /// Returns how many files were actually removed.
    ///
    /// # Concurrency
    /// Removes files tracked by every request on this processor, including
    /// requests still running on other threads; give each concurrent request
    /// its own processor.
    pub fn cleanup<P: AsRef<Path>>(&self, additional: &[P]) -> usize {
        let removed = self.temp_files.cleanup(additional);
        info!("Cleanup removed {} temp files", removed);
        removed
    }
}

impl Default for BannerProcessor {
    fn default() -> Self {
        Self::new(BannerConfig::default())
    }
}
