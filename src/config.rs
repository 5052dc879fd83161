//! Configuration for banner generation.
//!
//! All processing behaviour is controlled through [`BannerConfig`], built via
//! its [`BannerConfigBuilder`]. The builder clamps numeric knobs into their
//! valid ranges and `build()` rejects what cannot be clamped sensibly.

use crate::error::BannerError;
use crate::progress::ProgressCallback;
use image::imageops::FilterType;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Default location of the background template, relative to the working directory.
pub const DEFAULT_BACKGROUND: &str = "assets/banner_bg.jpg";

/// Default share of the binding background dimension given to the page.
pub const DEFAULT_PADDING_RATIO: f64 = 0.9;

/// Configuration for a [`crate::processor::BannerProcessor`].
///
/// # Example
/// ```rust
/// use pdf2banner::BannerConfig;
///
/// let config = BannerConfig::builder()
///     .padding_ratio(0.8)
///     .background("assets/summer_bg.jpg")
///     .build()
///     .unwrap();
/// assert_eq!(config.dpi, 300);
/// ```
#[derive(Clone)]
pub struct BannerConfig {
    /// Rasterisation density for page 1. Range: 72–600. Default: 300.
    ///
    /// A US-Letter page at 300 DPI is 2550 × 3300 px, plenty of headroom for
    /// the downscale onto a typical 1200 × 630 social banner.
    pub dpi: u32,

    /// JPEG quality for both the cover and the banner. Range: 1–100. Default: 95.
    pub jpeg_quality: u8,

    /// Fraction of the binding background dimension the page may occupy.
    /// Range: (0, 1]. Default: 0.9 (10 % margin).
    pub padding_ratio: f64,

    /// Resampling filter used to shrink the page. Default: Lanczos3.
    pub filter: ResampleFilter,

    /// Background template path. Default: [`DEFAULT_BACKGROUND`].
    pub background: PathBuf,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Directory for temporary files. Default: the system temp dir.
    pub temp_dir: Option<PathBuf>,

    /// Explicit pdfium library path. Takes precedence over `PDFIUM_LIB_PATH`.
    pub pdfium_lib_path: Option<PathBuf>,

    /// Optional stage-progress callback.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            dpi: 300,
            jpeg_quality: 95,
            padding_ratio: DEFAULT_PADDING_RATIO,
            filter: ResampleFilter::default(),
            background: PathBuf::from(DEFAULT_BACKGROUND),
            password: None,
            temp_dir: None,
            pdfium_lib_path: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for BannerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BannerConfig")
            .field("dpi", &self.dpi)
            .field("jpeg_quality", &self.jpeg_quality)
            .field("padding_ratio", &self.padding_ratio)
            .field("filter", &self.filter)
            .field("background", &self.background)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("temp_dir", &self.temp_dir)
            .field("pdfium_lib_path", &self.pdfium_lib_path)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn BannerProgressCallback>"),
            )
            .finish()
    }
}

impl BannerConfig {
    /// Create a new builder for `BannerConfig`.
    pub fn builder() -> BannerConfigBuilder {
        BannerConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`BannerConfig`].
#[derive(Debug)]
pub struct BannerConfigBuilder {
    config: BannerConfig,
}

impl BannerConfigBuilder {
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi.clamp(72, 600);
        self
    }

    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.config.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Not clamped: an out-of-range ratio is a caller bug and fails `build()`.
    pub fn padding_ratio(mut self, ratio: f64) -> Self {
        self.config.padding_ratio = ratio;
        self
    }

    pub fn filter(mut self, filter: ResampleFilter) -> Self {
        self.config.filter = filter;
        self
    }

    pub fn background(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.background = path.into();
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.temp_dir = Some(dir.into());
        self
    }

    pub fn pdfium_lib_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.pdfium_lib_path = Some(path.into());
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<BannerConfig, BannerError> {
        let c = &self.config;
        if !(c.padding_ratio > 0.0 && c.padding_ratio <= 1.0) {
            return Err(BannerError::InvalidConfig(format!(
                "padding ratio must be in (0, 1], got {}",
                c.padding_ratio
            )));
        }
        if c.dpi < 72 || c.dpi > 600 {
            return Err(BannerError::InvalidConfig(format!(
                "DPI must be 72–600, got {}",
                c.dpi
            )));
        }
        if c.jpeg_quality == 0 || c.jpeg_quality > 100 {
            return Err(BannerError::InvalidConfig(format!(
                "JPEG quality must be 1–100, got {}",
                c.jpeg_quality
            )));
        }
        if let Some(ref dir) = c.temp_dir {
            if !dir.is_dir() {
                return Err(BannerError::InvalidConfig(format!(
                    "temp dir '{}' is not a directory",
                    dir.display()
                )));
            }
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Antialiasing filter used when shrinking the page onto the banner.
///
/// Every variant antialiases; there is no nearest-neighbour option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResampleFilter {
    /// Windowed sinc, sharpest result. (default)
    #[default]
    Lanczos3,
    /// Cubic, slightly softer and faster than Lanczos3.
    CatmullRom,
    /// Bilinear.
    Triangle,
}

impl From<ResampleFilter> for FilterType {
    fn from(f: ResampleFilter) -> Self {
        match f {
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Triangle => FilterType::Triangle,
        }
    }
}
