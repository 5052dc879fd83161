//! End-to-end tests for pdf2banner.
//!
//! Compositing and cleanup tests run everywhere: they use synthetic images
//! written to temp directories. Tests that rasterise a real PDF need the
//! pdfium shared library and are gated behind `E2E_ENABLED`:
//!
//!   E2E_ENABLED=1 PDFIUM_LIB_PATH=/path/to/libpdfium.so cargo test --test e2e -- --nocapture

use image::{GenericImageView, Rgb, RgbImage};
use pdf2banner::{
    fit_and_center, generate_banner, generate_banner_from_bytes, generate_banner_to_dir,
    BannerConfig, BannerError, BannerProcessor, BannerRequest, ErrorKind,
};
use std::path::{Path, PathBuf};

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Skip this test unless E2E_ENABLED is set.
macro_rules! e2e_skip_unless_ready {
    () => {{
        if std::env::var("E2E_ENABLED").is_err() {
            println!("SKIP — set E2E_ENABLED=1 (and PDFIUM_LIB_PATH) to run e2e tests");
            return;
        }
    }};
}

fn processor(temp: &Path, background: &Path, padding: f64) -> BannerProcessor {
    BannerProcessor::new(
        BannerConfig::builder()
            .temp_dir(temp)
            .background(background)
            .padding_ratio(padding)
            .build()
            .expect("valid config"),
    )
}

fn write_jpeg(path: &Path, img: &RgbImage) {
    img.save(path).expect("write test image");
}

/// Solid 1200×630 background, the usual social-card size.
fn social_background(dir: &Path) -> PathBuf {
    let p = dir.join("banner_bg.jpg");
    write_jpeg(&p, &RgbImage::from_pixel(1200, 630, Rgb([20, 40, 120])));
    p
}

/// Stand-in for a US-Letter page rendered at 300 DPI.
fn letter_page(dir: &Path) -> PathBuf {
    let p = dir.join("page.jpg");
    write_jpeg(&p, &RgbImage::from_pixel(2550, 3300, Rgb([250, 250, 250])));
    p
}

fn files_in(dir: &Path) -> Vec<PathBuf> {
    let mut v: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    v.sort();
    v
}

/// Serialise numbered objects (object 1 is the catalog) into a PDF with a
/// valid cross-reference table.
fn build_pdf(objects: &[String]) -> Vec<u8> {
    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref_at = out.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for off in offsets {
        xref.push_str(&format!("{:010} 00000 n \n", off));
    }
    xref.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_at
    ));
    out.extend_from_slice(xref.as_bytes());
    out
}

/// Build a two-page US-Letter PDF: page 1 solid red, page 2 solid blue.
fn two_page_pdf() -> Vec<u8> {
    let page1 = "1 0 0 rg 0 0 612 792 re f\n";
    let page2 = "0 0 1 rg 0 0 612 792 re f\n";
    build_pdf(&[
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R 5 0 R] /Count 2 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Resources << >> /Contents 4 0 R >>"
            .to_string(),
        format!("<< /Length {} >>\nstream\n{}endstream", page1.len(), page1),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Resources << >> /Contents 6 0 R >>"
            .to_string(),
        format!("<< /Length {} >>\nstream\n{}endstream", page2.len(), page2),
    ])
}

/// Well-formed PDF whose page tree is empty.
fn zero_page_pdf() -> Vec<u8> {
    build_pdf(&[
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [] /Count 0 >>".to_string(),
    ])
}

/// Passes the `%PDF` magic check but has no parseable body or xref.
fn corrupt_pdf() -> Vec<u8> {
    let mut out = b"%PDF-1.4\n".to_vec();
    out.extend((0..4096u32).map(|i| (i.wrapping_mul(2654435761) >> 13) as u8));
    out
}

fn is_reddish(p: &Rgb<u8>) -> bool {
    p[0] > 200 && p[1] < 60 && p[2] < 60
}

// ── Compositor (no pdfium) ───────────────────────────────────────────────────

#[test]
fn test_banner_matches_background_size_and_documented_geometry() {
    let dir = tempfile::tempdir().unwrap();
    let bg = social_background(dir.path());
    let page = letter_page(dir.path());
    let p = processor(dir.path(), &bg, 0.9);

    let banner = p.center_and_fit(&page, &bg).expect("composite");
    assert_eq!((banner.width, banner.height), (1200, 630));
    assert_eq!((banner.geometry.width, banner.geometry.height), (438, 567));
    assert_eq!((banner.geometry.x, banner.geometry.y), (381, 31));

    let decoded = image::open(&banner.path).unwrap();
    assert_eq!(decoded.dimensions(), (1200, 630));
    p.cleanup::<PathBuf>(&[]);
}

#[test]
fn test_background_asset_is_never_modified() {
    let dir = tempfile::tempdir().unwrap();
    let bg = social_background(dir.path());
    let page = letter_page(dir.path());
    let before = std::fs::read(&bg).unwrap();

    let p = processor(dir.path(), &bg, 0.9);
    for _ in 0..2 {
        p.center_and_fit(&page, &bg).unwrap();
    }
    assert_eq!(std::fs::read(&bg).unwrap(), before);
}

#[test]
fn test_padding_one_touches_binding_edges_in_pixels() {
    let dir = tempfile::tempdir().unwrap();
    let bg = social_background(dir.path());
    let page = letter_page(dir.path());
    let p = processor(dir.path(), &bg, 1.0);

    let banner = p.center_and_fit(&page, &bg).unwrap();
    assert_eq!(banner.geometry.height, 630);
    assert_eq!(banner.geometry.y, 0);

    // The light page reaches the top and bottom rows in the centre column.
    let img = image::open(&banner.path).unwrap().to_rgb8();
    assert!(img.get_pixel(600, 0)[0] > 200);
    assert!(img.get_pixel(600, 629)[0] > 200);
    // Far left stays background.
    assert!(img.get_pixel(5, 315)[0] < 80);
}

#[test]
fn test_padding_half_leaves_quarter_margin() {
    let dir = tempfile::tempdir().unwrap();
    let bg = social_background(dir.path());
    let page = letter_page(dir.path());
    let p = processor(dir.path(), &bg, 0.5);

    let g = p.center_and_fit(&page, &bg).unwrap().geometry;
    let top = g.y as f64;
    let bottom = (630 - g.y - g.height) as f64;
    assert!(top >= 630.0 * 0.25 - 0.5, "top margin {top}");
    assert!(bottom >= 630.0 * 0.25 - 0.5, "bottom margin {bottom}");
}

#[test]
fn test_fit_geometry_aspect_ratio_across_shapes() {
    for (pw, ph) in [(2550, 3300), (3300, 2550), (1240, 1754), (3000, 600)] {
        let g = fit_and_center((pw, ph), (1200, 630), 0.9);
        let expected_h = g.width as f64 * ph as f64 / pw as f64;
        assert!(
            (g.height as f64 - expected_h).abs() <= 1.0,
            "{pw}x{ph} → {}x{}",
            g.width,
            g.height
        );
        assert!(g.x + g.width <= 1200 && g.y + g.height <= 630);
    }
}

#[test]
fn test_missing_background_is_missing_asset() {
    let dir = tempfile::tempdir().unwrap();
    let page = letter_page(dir.path());
    let absent = dir.path().join("assets/banner_bg.jpg");
    let p = processor(dir.path(), &absent, 0.9);

    let err = p.center_and_fit_default(&page).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingAsset);
    assert!(matches!(err, BannerError::MissingAsset { ref path } if path == &absent));
}

#[test]
fn test_cleanup_removes_everything_and_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let work = dir.path().join("work");
    std::fs::create_dir(&work).unwrap();
    let bg = social_background(dir.path());
    let page = letter_page(dir.path());
    let upload = work.join("upload.pdf");
    std::fs::write(&upload, b"%PDF-1.4").unwrap();

    let p = processor(&work, &bg, 0.9);
    p.center_and_fit(&page, &bg).unwrap();
    p.center_and_fit(&page, &bg).unwrap();
    assert_eq!(p.tracked_files().len(), 2);

    assert_eq!(p.cleanup(&[&upload]), 3);
    assert!(files_in(&work).is_empty());
    assert_eq!(p.cleanup(&[&upload]), 0);
}

#[test]
fn test_invalid_upload_fails_and_leaves_no_files() {
    let dir = tempfile::tempdir().unwrap();
    let work = dir.path().join("work");
    std::fs::create_dir(&work).unwrap();
    let bg = social_background(dir.path());
    let p = processor(&work, &bg, 0.9);

    let err = generate_banner_from_bytes(&p, b"<html>not a pdf</html>", "issue.pdf").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conversion);
    assert!(files_in(&work).is_empty());

    // The processor is still usable for the next request.
    let page = letter_page(dir.path());
    assert!(p.center_and_fit(&page, &bg).is_ok());
}

// ── Full pipeline (needs pdfium) ─────────────────────────────────────────────

#[test]
fn test_first_page_only_at_300_dpi() {
    e2e_skip_unless_ready!();
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("two_pages.pdf");
    std::fs::write(&pdf, two_page_pdf()).unwrap();
    let bg = social_background(dir.path());
    let p = processor(dir.path(), &bg, 0.9);

    let cover = p.pdf_to_jpeg(&pdf).expect("render page 1");
    assert_eq!((cover.width, cover.height), (2550, 3300));

    let img = image::open(&cover.path).unwrap().to_rgb8();
    for &(x, y) in &[(10, 10), (1275, 1650), (2540, 3290)] {
        assert!(is_reddish(img.get_pixel(x, y)), "pixel ({x},{y}) not red");
    }
    assert!(pdf.exists(), "source PDF must not be consumed");
    p.cleanup::<PathBuf>(&[]);
}

#[test]
fn test_generate_banner_from_upload_bytes() {
    e2e_skip_unless_ready!();
    let dir = tempfile::tempdir().unwrap();
    let work = dir.path().join("work");
    std::fs::create_dir(&work).unwrap();
    let bg = social_background(dir.path());
    let p = processor(&work, &bg, 0.9);

    let out = generate_banner_from_bytes(&p, &two_page_pdf(), "PM_Digital.pdf")
        .expect("banner generation");
    assert_eq!(out.banner_filename, "banner_PM_Digital.jpg");
    assert!(out.cover_filename.ends_with("_cover.jpg"));
    assert_eq!(out.stats.banner_size, (1200, 630));
    assert_eq!(out.stats.cover_size, (2550, 3300));
    assert_eq!((out.stats.geometry.x, out.stats.geometry.y), (381, 31));

    let banner = image::load_from_memory(&out.banner_bytes).unwrap().to_rgb8();
    assert_eq!(banner.dimensions(), (1200, 630));
    assert!(is_reddish(banner.get_pixel(600, 315)), "page 1 must be centred");
    assert!(!is_reddish(banner.get_pixel(5, 5)), "corner keeps the background");

    assert!(files_in(&work).is_empty(), "temp files left: {:?}", files_in(&work));
}

#[test]
fn test_generate_banner_to_dir_writes_download_names() {
    e2e_skip_unless_ready!();
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("Issue 7.pdf");
    std::fs::write(&pdf, two_page_pdf()).unwrap();
    let bg = social_background(dir.path());
    let out_dir = dir.path().join("out");
    let p = processor(dir.path(), &bg, 0.9);

    let saved = generate_banner_to_dir(&p, &BannerRequest::from_path(&pdf), &out_dir).unwrap();
    assert_eq!(saved.banner_path, out_dir.join("banner_Issue 7.jpg"));
    assert!(saved.banner_path.exists());
    assert!(saved.cover_path.exists());
    assert!(pdf.exists(), "caller-owned PDF is kept");
    assert!(p.tracked_files().is_empty());
}

#[test]
fn test_missing_background_aborts_full_pipeline() {
    e2e_skip_unless_ready!();
    let dir = tempfile::tempdir().unwrap();
    let work = dir.path().join("work");
    std::fs::create_dir(&work).unwrap();
    let pdf = dir.path().join("doc.pdf");
    std::fs::write(&pdf, two_page_pdf()).unwrap();
    let p = processor(&work, &dir.path().join("nope.jpg"), 0.9);

    let err = generate_banner(&p, &BannerRequest::from_path(&pdf)).unwrap_err();
    assert!(err.is_missing_asset());
    assert!(files_in(&work).is_empty(), "cover temp file must be cleaned up");
}

#[test]
fn test_corrupt_pdf_is_conversion_error_and_leaves_no_files() {
    e2e_skip_unless_ready!();
    let dir = tempfile::tempdir().unwrap();
    let work = dir.path().join("work");
    std::fs::create_dir(&work).unwrap();
    let bg = social_background(dir.path());
    let p = processor(&work, &bg, 0.9);

    let err = generate_banner_from_bytes(&p, &corrupt_pdf(), "broken.pdf").unwrap_err();
    assert!(matches!(err, BannerError::CorruptPdf { .. }), "got {err:?}");
    assert_eq!(err.kind(), ErrorKind::Conversion);
    assert!(files_in(&work).is_empty(), "temp files left: {:?}", files_in(&work));
}

#[test]
fn test_zero_page_pdf_is_empty_document() {
    e2e_skip_unless_ready!();
    let dir = tempfile::tempdir().unwrap();
    let work = dir.path().join("work");
    std::fs::create_dir(&work).unwrap();
    let pdf = dir.path().join("empty.pdf");
    std::fs::write(&pdf, zero_page_pdf()).unwrap();
    let bg = social_background(dir.path());
    let p = processor(&work, &bg, 0.9);

    let err = generate_banner(&p, &BannerRequest::from_path(&pdf)).unwrap_err();
    assert!(
        matches!(err, BannerError::EmptyDocument { ref path } if path == &pdf),
        "got {err:?}"
    );
    assert_eq!(err.kind(), ErrorKind::Conversion);
    assert!(files_in(&work).is_empty());
    assert!(pdf.exists(), "caller-owned PDF is kept");
}
