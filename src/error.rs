//! Error types for the pdf2banner library.
//!
//! Every fatal failure is a [`BannerError`]. Variants fall into three
//! classes, reported by [`BannerError::kind`]:
//!
//! * [`ErrorKind::Conversion`] — the PDF could not be read or rendered, or an
//!   image could not be decoded, encoded or written.
//! * [`ErrorKind::MissingAsset`] — the background template is absent.
//! * [`ErrorKind::Config`] — the builder rejected a setting.
//!
//! Temp-file cleanup failures never become a `BannerError`; they are logged
//! by [`crate::processor::BannerProcessor::cleanup`] and dropped.

use std::path::PathBuf;
use thiserror::Error;

/// Coarse error class, for callers that only need to branch on the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Conversion,
    MissingAsset,
    Config,
}

/// All fatal errors returned by the pdf2banner library.
#[derive(Debug, Error)]
pub enum BannerError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' is corrupt: {detail}")]
    CorruptPdf { path: PathBuf, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF '{path}' is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired { path: PathBuf },

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF '{path}'")]
    WrongPassword { path: PathBuf },

    /// The document opened but has no pages to render.
    #[error("PDF '{path}' has no pages")]
    EmptyDocument { path: PathBuf },

    /// pdfium-render returned an error while rendering the first page.
    #[error("Rasterisation failed for '{path}': {detail}")]
    RasterisationFailed { path: PathBuf, detail: String },

    // ── Image errors ──────────────────────────────────────────────────────
    /// The background template does not exist.
    #[error("Background image not found: '{path}'")]
    MissingAsset { path: PathBuf },

    /// An input image could not be opened or decoded.
    #[error("Failed to decode image '{path}': {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// JPEG encoding of an output image failed.
    #[error("Failed to encode JPEG '{path}': {source}")]
    ImageEncode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create a temporary file.
    #[error("Failed to create temporary file: {0}")]
    TempFile(#[source] std::io::Error),

    /// Could not read a produced image back into memory.
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not write an output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
You can:\n\
  • Set PDFIUM_LIB_PATH=/path/to/libpdfium to use an existing copy.\n\
  • Place libpdfium next to the working directory.\n\
  • Install pdfium system-wide.\n"
    )]
    PdfiumBindingFailed(String),
}

impl BannerError {
    /// The error class this variant belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BannerError::MissingAsset { .. } => ErrorKind::MissingAsset,
            BannerError::InvalidConfig(_) => ErrorKind::Config,
            _ => ErrorKind::Conversion,
        }
    }

    pub fn is_missing_asset(&self) -> bool {
        self.kind() == ErrorKind::MissingAsset
    }
}
