//! Download filenames for the two outputs.

use chrono::{Datelike, Local, NaiveDate};
use std::path::Path;

/// `MM_YYYY_cover.jpg` for the month containing `date`.
pub fn cover_filename(date: NaiveDate) -> String {
    format!("{:02}_{:04}_cover.jpg", date.month(), date.year())
}

/// [`cover_filename`] for today in local time.
pub fn cover_filename_now() -> String {
    cover_filename(Local::now().date_naive())
}

/// `banner_<stem>.jpg` for an uploaded file called `source_name`.
///
/// Directory components are dropped, a trailing `.pdf` (any case) is removed
/// and characters outside `[A-Za-z0-9 ._-]` become `_`.
pub fn banner_filename(source_name: &str) -> String {
    format!("banner_{}.jpg", sanitize_stem(source_name))
}

fn sanitize_stem(source_name: &str) -> String {
    // Uploads from Windows browsers may carry backslash-separated paths.
    let base = source_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(source_name);
    let base = Path::new(base)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(base);

    let stem = match base.len().checked_sub(4) {
        Some(cut) if base.is_char_boundary(cut) && base[cut..].eq_ignore_ascii_case(".pdf") => {
            &base[..cut]
        }
        _ => base,
    };

    let cleaned: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, ' ' | '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim().trim_start_matches('.');

    if cleaned.is_empty() {
        "document".to_string()
    } else {
        cleaned.to_string()
    }
}
