//! Request-level entry points.
//!
//! Each call runs one request start to finish on the calling thread:
//! rasterise page 1, composite it onto the background, read both JPEGs back
//! into memory, then clean up every temp file the request produced. Cleanup
//! runs on the failure path too, so a failed request leaves nothing behind
//! and the processor is ready for the next one.

use crate::error::BannerError;
use crate::naming;
use crate::output::{BannerOutput, BannerStats, SavedBanner};
use crate::processor::BannerProcessor;
use crate::progress::{BannerProgressCallback, Stage};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

/// One banner request.
#[derive(Debug, Clone)]
pub struct BannerRequest {
    /// PDF to read page 1 from.
    pub pdf_path: PathBuf,
    /// Name the user knows the PDF by; drives the banner filename.
    pub source_name: String,
    /// Delete `pdf_path` during cleanup (it is a temporary upload).
    pub owns_source: bool,
}

impl BannerRequest {
    /// A request for a PDF the caller keeps; named after its file name.
    pub fn from_path(pdf_path: impl Into<PathBuf>) -> Self {
        let pdf_path = pdf_path.into();
        let source_name = pdf_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            pdf_path,
            source_name,
            owns_source: false,
        }
    }

    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = name.into();
        self
    }

    /// Mark the PDF as a temporary upload to delete with the other temp files.
    pub fn owning_source(mut self) -> Self {
        self.owns_source = true;
        self
    }
}

/// Generate the cover and banner for `request`.
///
/// # Errors
/// Any stage failure aborts the request; no partial output is returned.
/// Temp files are removed either way.
pub fn generate_banner(
    processor: &BannerProcessor,
    request: &BannerRequest,
) -> Result<BannerOutput, BannerError> {
    let total_start = Instant::now();
    info!("Generating banner for {}", request.pdf_path.display());

    let callback = processor.config().progress_callback.clone();
    let callback = callback.as_deref();
    let mut stage = Stage::Rasterising;

    let result = run_stages(processor, request, callback, &mut stage, total_start);

    let extra: Vec<&Path> = if request.owns_source {
        vec![request.pdf_path.as_path()]
    } else {
        Vec::new()
    };
    processor.cleanup(&extra);

    match result {
        Ok(output) => {
            if let Some(cb) = callback {
                cb.on_stage(Stage::Complete);
            }
            info!(
                "Banner ready: {} ({} bytes), {} ({} bytes) in {}ms",
                output.banner_filename,
                output.banner_bytes.len(),
                output.cover_filename,
                output.cover_bytes.len(),
                output.stats.total_duration_ms
            );
            Ok(output)
        }
        Err(e) => {
            warn!("Banner generation failed during {:?}: {}", stage, e);
            if let Some(cb) = callback {
                cb.on_error(stage, &e.to_string());
            }
            Err(e)
        }
    }
}

/// Generate a banner from uploaded PDF bytes.
///
/// The bytes are staged in a temp `.pdf` that is deleted with the outputs.
pub fn generate_banner_from_bytes(
    processor: &BannerProcessor,
    pdf_bytes: &[u8],
    source_name: &str,
) -> Result<BannerOutput, BannerError> {
    let staged = match processor.stage_upload(pdf_bytes) {
        Ok(path) => path,
        Err(e) => {
            processor.cleanup::<PathBuf>(&[]);
            return Err(e);
        }
    };

    let request = BannerRequest::from_path(staged)
        .with_source_name(source_name)
        .owning_source();
    generate_banner(processor, &request)
}

/// Generate a banner and save both images into `out_dir` under their download names.
pub fn generate_banner_to_dir(
    processor: &BannerProcessor,
    request: &BannerRequest,
    out_dir: &Path,
) -> Result<SavedBanner, BannerError> {
    let output = generate_banner(processor, request)?;

    std::fs::create_dir_all(out_dir).map_err(|e| BannerError::OutputWriteFailed {
        path: out_dir.to_path_buf(),
        source: e,
    })?;

    let banner_path = out_dir.join(&output.banner_filename);
    let cover_path = out_dir.join(&output.cover_filename);
    for (path, bytes) in [
        (&banner_path, &output.banner_bytes),
        (&cover_path, &output.cover_bytes),
    ] {
        std::fs::write(path, bytes).map_err(|e| BannerError::OutputWriteFailed {
            path: path.clone(),
            source: e,
        })?;
        info!("Wrote {}", path.display());
    }

    Ok(SavedBanner {
        banner_path,
        cover_path,
        stats: output.stats,
    })
}

fn run_stages(
    processor: &BannerProcessor,
    request: &BannerRequest,
    callback: Option<&dyn BannerProgressCallback>,
    stage: &mut Stage,
    total_start: Instant,
) -> Result<BannerOutput, BannerError> {
    let enter = |s: Stage, current: &mut Stage| {
        *current = s;
        if let Some(cb) = callback {
            cb.on_stage(s);
        }
    };

    // ── Step 1: Rasterise page 1 ─────────────────────────────────────────
    enter(Stage::Rasterising, stage);
    let render_start = Instant::now();
    let cover = processor.pdf_to_jpeg(&request.pdf_path)?;
    let render_duration_ms = render_start.elapsed().as_millis() as u64;

    // ── Step 2: Composite onto the background ────────────────────────────
    enter(Stage::Compositing, stage);
    let composite_start = Instant::now();
    let banner = processor.center_and_fit_default(&cover.path)?;
    let composite_duration_ms = composite_start.elapsed().as_millis() as u64;

    // ── Step 3: Read back and name ───────────────────────────────────────
    enter(Stage::Finalising, stage);
    let read = |path: &Path| {
        std::fs::read(path).map_err(|e| BannerError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })
    };
    let banner_bytes = read(&banner.path)?;
    let cover_bytes = read(&cover.path)?;

    Ok(BannerOutput {
        banner_bytes,
        cover_bytes,
        banner_filename: naming::banner_filename(&request.source_name),
        cover_filename: naming::cover_filename_now(),
        stats: BannerStats {
            cover_size: (cover.width, cover.height),
            banner_size: (banner.width, banner.height),
            geometry: banner.geometry,
            render_duration_ms,
            composite_duration_ms,
            total_duration_ms: total_start.elapsed().as_millis() as u64,
        },
    })
}
