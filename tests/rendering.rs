use std::fs;
use std::path::Path;

use image::Rgb;
use price_brackets::fonts;
use price_brackets::render::raster::{canvas_pixel, CANVAS_HEIGHT, CANVAS_WIDTH};
use price_brackets::sample::{sample_table, SAMPLE_PRODUCT};
use price_brackets::{Brand, Layout, PriceBracketGenerator, PricingTable, RasterRenderer};
use sha2::{Digest, Sha256};

const SKIP_HINT: &str =
    "no TrueType font pair found. Set PRICE_BRACKETS_FONTS_DIR or copy assets/fonts next to the binary.";

const HEADER_BLUE: Rgb<u8> = Rgb([0x0a, 0x30, 0x8c]);
const LIGHT_BLUE: Rgb<u8> = Rgb([0xe6, 0xf5, 0xff]);
const WHITE: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);

fn fonts_missing(test: &str) -> bool {
    if fonts::default_fonts_available() {
        return false;
    }
    eprintln!("Skipping {test}: {SKIP_HINT}");
    true
}

fn brand_without_logo(dir: &Path) -> Brand {
    Brand::default().with_logo_path(dir.join("missing-logo.png"))
}

fn tall_table(data_rows: usize) -> PricingTable {
    let mut builder = PricingTable::builder(["Sizes", "Qty 1-9", "Qty 10+"]);
    for index in 1..=data_rows {
        builder = builder.row([
            format!("{index}\" x 50'"),
            format!("${index}.00 USD"),
            format!("${index}.50 USD"),
        ]);
    }
    builder.build().expect("valid tall table")
}

fn pdf_page_count(path: &Path) -> usize {
    let bytes = fs::read(path).expect("read generated pdf");
    lopdf::Document::load_mem(&bytes)
        .expect("parse generated pdf")
        .get_pages()
        .len()
}

/// Normalized y coordinate of the middle of table row `row` out of `rows`.
fn row_center(row: usize, rows: usize) -> f64 {
    0.70 - 0.45 * (row as f64 + 0.5) / rows as f64
}

#[test]
fn sample_pdf_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.pdf");
    let generator = PriceBracketGenerator::new(brand_without_logo(dir.path()));

    let written = generator
        .generate_pdf(SAMPLE_PRODUCT, &sample_table().unwrap(), &path)
        .expect("render sample pdf");

    assert_eq!(written, path);
    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"), "missing PDF header");
    assert!(
        bytes
            .windows(b"ESD Mat Roll Price Brackets".len())
            .any(|window| window == b"ESD Mat Roll Price Brackets"),
        "document title should be stored in the info dictionary"
    );
    assert_eq!(pdf_page_count(&path), 1);
}

#[test]
fn tall_tables_continue_on_new_pages() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tall.pdf");
    let generator = PriceBracketGenerator::new(brand_without_logo(dir.path()));

    generator
        .generate_pdf("Tall Product", &tall_table(60), &path)
        .expect("render tall pdf");

    assert!(pdf_page_count(&path) > 1, "60 data rows should not fit one page");
}

#[test]
fn rendering_overwrites_existing_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stale.pdf");
    fs::write(&path, b"stale contents").unwrap();
    let generator = PriceBracketGenerator::new(brand_without_logo(dir.path()));

    generator
        .generate_pdf(SAMPLE_PRODUCT, &sample_table().unwrap(), &path)
        .unwrap();
    assert!(fs::read(&path).unwrap().starts_with(b"%PDF"));
}

#[test]
fn sample_png_is_cropped_png() {
    if fonts_missing("sample_png_is_cropped_png") {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    // The extension does not decide the encoding.
    let path = dir.path().join("sample.img");
    let generator = PriceBracketGenerator::new(brand_without_logo(dir.path()));

    generator
        .generate_png(SAMPLE_PRODUCT, &sample_table().unwrap(), &path)
        .expect("render sample png");

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));

    let image = image::load_from_memory(&bytes).unwrap().to_rgb8();
    assert!(image.width() < CANVAS_WIDTH && image.height() < CANVAS_HEIGHT);
    assert!(image.pixels().any(|px| *px == HEADER_BLUE));
    assert!(image.pixels().any(|px| *px == LIGHT_BLUE));
    assert_eq!(image.get_pixel(0, 0), &WHITE, "crop keeps a white margin");
}

#[test]
fn canvas_rows_follow_brand_colors() {
    if fonts_missing("canvas_rows_follow_brand_colors") {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let brand = brand_without_logo(dir.path());
    let table = sample_table().unwrap();
    let layout = Layout::new(&brand, SAMPLE_PRODUCT, &table);
    let canvas = RasterRenderer::new().compose(&layout, &table).unwrap();

    let rows = table.row_count();
    let expected = [HEADER_BLUE, WHITE, LIGHT_BLUE, WHITE, LIGHT_BLUE];
    for (row, color) in expected.iter().enumerate() {
        let (x, y) = canvas_pixel(0.17, row_center(row, rows));
        assert_eq!(canvas.get_pixel(x, y), color, "row {row}");
    }
}

#[test]
fn logo_is_stretched_above_title() {
    if fonts_missing("logo_is_stretched_above_title") {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let logo_path = dir.path().join("logo.png");
    image::RgbImage::from_pixel(40, 10, Rgb([200, 20, 20]))
        .save(&logo_path)
        .unwrap();

    let brand = Brand::default().with_logo_path(&logo_path);
    let table = sample_table().unwrap();
    let layout = Layout::new(&brand, SAMPLE_PRODUCT, &table);
    let canvas = RasterRenderer::new().compose(&layout, &table).unwrap();

    let (x, y) = canvas_pixel(0.4, 0.9);
    let Rgb([r, g, b]) = *canvas.get_pixel(x, y);
    assert!(r > 190 && g < 30 && b < 30, "expected logo red, got {r},{g},{b}");
    let (x, y) = canvas_pixel(0.8, 0.9);
    assert_eq!(canvas.get_pixel(x, y), &WHITE);
}

#[test]
fn png_rendering_is_deterministic() {
    if fonts_missing("png_rendering_is_deterministic") {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let generator = PriceBracketGenerator::new(brand_without_logo(dir.path()));
    let table = sample_table().unwrap();

    let hash = |name: &str| -> [u8; 32] {
        let path = dir.path().join(name);
        generator.generate_png(SAMPLE_PRODUCT, &table, &path).unwrap();
        Sha256::digest(fs::read(&path).unwrap()).into()
    };

    assert_eq!(hash("a.png"), hash("b.png"), "PNG renders must be identical");
}

#[test]
fn single_column_tables_render() {
    if fonts_missing("single_column_tables_render") {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let table = PricingTable::try_from([["Sizes"], ["Small"], ["Large"]]).unwrap();
    let generator = PriceBracketGenerator::new(brand_without_logo(dir.path()));

    let documents = generator.generate("Labels Only", &table, dir.path()).unwrap();
    assert!(fs::metadata(&documents.pdf).unwrap().len() > 0);
    assert!(fs::metadata(&documents.png).unwrap().len() > 0);
}

#[test]
fn pdf_embeds_logo_when_present() {
    let dir = tempfile::tempdir().unwrap();
    let logo_path = dir.path().join("logo.png");
    image::RgbaImage::from_pixel(60, 16, image::Rgba([24, 65, 135, 128]))
        .save(&logo_path)
        .unwrap();
    let generator = PriceBracketGenerator::new(Brand::default().with_logo_path(&logo_path));

    let with_logo = dir.path().join("with_logo.pdf");
    generator
        .generate_pdf(SAMPLE_PRODUCT, &sample_table().unwrap(), &with_logo)
        .expect("render pdf with logo");

    let bytes = fs::read(&with_logo).unwrap();
    assert!(
        bytes.windows(b"/XObject".len()).any(|window| window == b"/XObject"),
        "logo should be embedded as an image XObject"
    );
    assert_eq!(pdf_page_count(&with_logo), 1);
}
