//! Pipeline stages for PDF-to-banner conversion.
//!
//! Each submodule implements one transformation step so it can be tested
//! without the others; in particular [`composite`] needs no pdfium at all.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ engine ──▶ render ──▶ encode ──▶ composite ──▶ encode
//! (%PDF)    (bind)     (page 1)   (cover)    (fit+paste)   (banner)
//! ```
//!
//! 1. [`input`]     — check the path exists, is readable and starts with `%PDF`
//! 2. [`engine`]    — locate and bind the pdfium shared library
//! 3. [`render`]    — rasterise page 1 at the configured DPI, RGB only
//! 4. [`encode`]    — write a JPEG into a tracked temp file
//! 5. [`composite`] — scale the page to fit and paste it centred on the background

pub mod composite;
pub mod encode;
pub mod engine;
pub mod input;
pub mod render;
