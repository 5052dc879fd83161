//! CLI binary for pdf2banner.
//!
//! A thin shim over the library crate that maps CLI flags to `BannerConfig`,
//! runs one request and writes the two JPEGs into the output directory.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2banner::{
    generate_banner_to_dir, BannerConfig, BannerProcessor, BannerProgressCallback,
    BannerRequest, ProgressCallback, ResampleFilter, Stage, DEFAULT_BACKGROUND,
    DEFAULT_PADDING_RATIO,
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Percentage bar that advances as the pipeline enters each stage.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}%  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        let bar = ProgressBar::new(100);
        bar.set_style(style);
        bar.set_prefix("Banner");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl BannerProgressCallback for CliProgressCallback {
    fn on_stage(&self, stage: Stage) {
        self.bar.set_position(stage.percent() as u64);
        self.bar.set_message(stage.label());
        if stage == Stage::Complete {
            self.bar.finish_and_clear();
        }
    }

    fn on_error(&self, _stage: Stage, error: &str) {
        self.bar.abandon_with_message(red("failed"));
        // Keep the terminal tidy; the full chain is printed by main.
        let first_line = error.lines().next().unwrap_or(error);
        eprintln!("{} {}", red("✗"), first_line);
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Banner + cover into the current directory
  pdf2banner PM_Digital.pdf

  # Custom background and output directory
  pdf2banner --background assets/summer_bg.jpg -o out/ issue.pdf

  # Tighter fit (page fills 100% of the binding dimension)
  pdf2banner --padding 1.0 issue.pdf

  # Machine-readable summary
  pdf2banner --json issue.pdf

OUTPUT FILES:
  banner_<name>.jpg     the page centred on the background
  MM_YYYY_cover.jpg     page 1 on its own, dated with the current month

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH       Path to an existing libpdfium
  PDF2BANNER_*          Every flag can also be set from the environment
  RUST_LOG              Overrides the log filter (e.g. pdf2banner=debug)
"#;

/// Generate a social banner and cover image from page 1 of a PDF.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2banner",
    version,
    about = "Generate a social banner and cover image from page 1 of a PDF",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file path.
    input: PathBuf,

    /// Background template JPEG; defines the banner size.
    #[arg(short, long, env = "PDF2BANNER_BACKGROUND", default_value = DEFAULT_BACKGROUND)]
    background: PathBuf,

    /// Directory to write the banner and cover into.
    #[arg(short, long, env = "PDF2BANNER_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Fraction of the binding background dimension the page may fill (0–1].
    #[arg(long, env = "PDF2BANNER_PADDING", default_value_t = DEFAULT_PADDING_RATIO)]
    padding: f64,

    /// Rasterisation DPI (72–600).
    #[arg(long, env = "PDF2BANNER_DPI", default_value_t = 300,
          value_parser = clap::value_parser!(u32).range(72..=600))]
    dpi: u32,

    /// JPEG quality (1–100).
    #[arg(long, env = "PDF2BANNER_QUALITY", default_value_t = 95,
          value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,

    /// Resampling filter for the downscale.
    #[arg(long, env = "PDF2BANNER_FILTER", value_enum, default_value = "lanczos3")]
    filter: FilterArg,

    /// Name used for the banner file instead of the input's file name.
    #[arg(long, env = "PDF2BANNER_NAME")]
    name: Option<String>,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PDF2BANNER_PASSWORD")]
    password: Option<String>,

    /// Path to the pdfium shared library.
    #[arg(long, env = "PDF2BANNER_PDFIUM_LIB")]
    pdfium_lib: Option<PathBuf>,

    /// Print a JSON summary (paths, sizes, timings) to stdout.
    #[arg(long, env = "PDF2BANNER_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "PDF2BANNER_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2BANNER_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2BANNER_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum FilterArg {
    Lanczos3,
    Catmullrom,
    Triangle,
}

impl From<FilterArg> for ResampleFilter {
    fn from(v: FilterArg) -> Self {
        match v {
            FilterArg::Lanczos3 => ResampleFilter::Lanczos3,
            FilterArg::Catmullrom => ResampleFilter::CatmullRom,
            FilterArg::Triangle => ResampleFilter::Triangle,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar replaces INFO logs unless --verbose asks for them.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn BannerProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb)?;
    let processor = BannerProcessor::new(config);

    let mut request = BannerRequest::from_path(&cli.input);
    if let Some(ref name) = cli.name {
        request = request.with_source_name(name.clone());
    }

    let saved = generate_banner_to_dir(&processor, &request, &cli.output_dir)
        .with_context(|| format!("Failed to generate banner from {}", cli.input.display()))?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&saved).context("Failed to serialise summary")?
        );
    } else if !cli.quiet {
        let g = &saved.stats.geometry;
        eprintln!(
            "{} {}  {}",
            green("✔"),
            bold(&saved.banner_path.display().to_string()),
            dim(&format!(
                "{}x{}, page {}x{} at ({}, {})",
                saved.stats.banner_size.0,
                saved.stats.banner_size.1,
                g.width,
                g.height,
                g.x,
                g.y
            )),
        );
        eprintln!(
            "{} {}  {}",
            green("✔"),
            bold(&saved.cover_path.display().to_string()),
            dim(&format!(
                "{}x{}",
                saved.stats.cover_size.0, saved.stats.cover_size.1
            )),
        );
        eprintln!("   {}", dim(&format!("{}ms total", saved.stats.total_duration_ms)));
    }

    Ok(())
}

/// Map CLI args to `BannerConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<BannerConfig> {
    let mut builder = BannerConfig::builder()
        .background(&cli.background)
        .padding_ratio(cli.padding)
        .dpi(cli.dpi)
        .jpeg_quality(cli.quality)
        .filter(cli.filter.clone().into());

    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd.clone());
    }
    if let Some(ref lib) = cli.pdfium_lib {
        builder = builder.pdfium_lib_path(lib);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}
