//! Paginated PDF output built directly on `printpdf`.
//!
//! Content flows top to bottom on US Letter pages with one inch margins:
//! logo, title, table, footer. All internal measurements are points from
//! the top-left corner of the page; [`PdfCanvas`] converts them to the
//! bottom-left millimetre coordinates `printpdf` expects.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::{DynamicImage, RgbImage};
use log::{debug, info};
use printpdf::{
    BuiltinFont, Color, Image, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Pt, Rgb,
};

use crate::brand::BrandColor;
use crate::error::{Error, Result};
use crate::fonts::helvetica::{self, CAP_HEIGHT};
use crate::layout::{
    Layout, FOOTER_FONT_SIZE, GRID_LINE_WIDTH, HEADER_RULE_WIDTH, PAGE_TITLE_FONT_SIZE,
};
use crate::logo::load_logo;
use crate::render::DocumentRenderer;
use crate::table::PricingTable;

const POINTS_PER_INCH: f64 = 72.0;
const PAGE_WIDTH: f64 = 8.5 * POINTS_PER_INCH;
const PAGE_HEIGHT: f64 = 11.0 * POINTS_PER_INCH;
const MARGIN: f64 = POINTS_PER_INCH;
const CONTENT_WIDTH: f64 = PAGE_WIDTH - 2.0 * MARGIN;
const CONTENT_BOTTOM: f64 = PAGE_HEIGHT - MARGIN;

const LOGO_WIDTH: f64 = 2.5 * POINTS_PER_INCH;
const LOGO_HEIGHT: f64 = 0.7 * POINTS_PER_INCH;
const LOGO_DPI: f64 = 300.0;
const SPACE_AFTER_LOGO: f64 = 0.3 * POINTS_PER_INCH;
const SPACE_AFTER_TITLE: f64 = 30.0 + 0.4 * POINTS_PER_INCH;
const SPACE_BEFORE_FOOTER: f64 = 0.5 * POINTS_PER_INCH + 0.3 * POINTS_PER_INCH;
const TITLE_LEADING: f64 = PAGE_TITLE_FONT_SIZE * 1.2;
const FOOTER_LEADING: f64 = 12.0;
const CELL_LEADING_FACTOR: f64 = 1.2;

fn pdf_color(color: BrandColor) -> Color {
    let (r, g, b) = color.to_unit_rgb();
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn mm(points: f64) -> Mm {
    Mm::from(Pt(points))
}

/// Baseline that vertically centers capital letters in a box.
fn centered_baseline(top: f64, height: f64, font_size: f64) -> f64 {
    top + (height + CAP_HEIGHT * font_size) / 2.0
}

/// Drawing surface spanning every page of one document.
struct PdfCanvas {
    document: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    pages: usize,
}

impl PdfCanvas {
    fn new(title: &str) -> Result<Self> {
        let (document, page, layer) =
            PdfDocument::new(title, mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "Page 1");
        let regular = document.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = document.add_builtin_font(BuiltinFont::HelveticaBold)?;
        let layer = document.get_page(page).get_layer(layer);
        Ok(Self {
            document,
            layer,
            regular,
            bold,
            pages: 1,
        })
    }

    fn new_page(&mut self) {
        self.pages += 1;
        let (page, layer) = self.document.add_page(
            mm(PAGE_WIDTH),
            mm(PAGE_HEIGHT),
            format!("Page {}", self.pages),
        );
        self.layer = self.document.get_page(page).get_layer(layer);
        debug!("Started PDF page {}", self.pages);
    }

    fn point(x: f64, y: f64) -> (Point, bool) {
        (Point::new(mm(x), mm(PAGE_HEIGHT - y)), false)
    }

    fn fill_rect(&self, x: f64, top: f64, width: f64, height: f64, color: BrandColor) {
        self.layer.set_fill_color(pdf_color(color));
        self.layer.add_shape(Line {
            points: vec![
                Self::point(x, top),
                Self::point(x + width, top),
                Self::point(x + width, top + height),
                Self::point(x, top + height),
            ],
            is_closed: true,
            has_fill: true,
            has_stroke: false,
            is_clipping_path: false,
        });
    }

    fn stroke_rect(&self, x: f64, top: f64, width: f64, height: f64, line_width: f64, color: BrandColor) {
        self.layer.set_outline_color(pdf_color(color));
        self.layer.set_outline_thickness(line_width);
        self.layer.add_shape(Line {
            points: vec![
                Self::point(x, top),
                Self::point(x + width, top),
                Self::point(x + width, top + height),
                Self::point(x, top + height),
            ],
            is_closed: true,
            has_fill: false,
            has_stroke: true,
            is_clipping_path: false,
        });
    }

    fn horizontal_rule(&self, x: f64, y: f64, width: f64, line_width: f64, color: BrandColor) {
        self.layer.set_outline_color(pdf_color(color));
        self.layer.set_outline_thickness(line_width);
        self.layer.add_shape(Line {
            points: vec![Self::point(x, y), Self::point(x + width, y)],
            is_closed: false,
            has_fill: false,
            has_stroke: true,
            is_clipping_path: false,
        });
    }

    fn centered_text(
        &self,
        text: &str,
        center_x: f64,
        baseline: f64,
        font_size: f64,
        bold: bool,
        color: BrandColor,
    ) {
        if text.is_empty() {
            return;
        }
        let width = helvetica::text_width(text, bold, font_size);
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.set_fill_color(pdf_color(color));
        self.layer.use_text(
            text,
            font_size,
            mm(center_x - width / 2.0),
            mm(PAGE_HEIGHT - baseline),
            font,
        );
    }

    fn image(&self, image: RgbImage, x: f64, top: f64, width: f64, height: f64) {
        let natural_width = f64::from(image.width()) * POINTS_PER_INCH / LOGO_DPI;
        let natural_height = f64::from(image.height()) * POINTS_PER_INCH / LOGO_DPI;
        if natural_width <= 0.0 || natural_height <= 0.0 {
            return;
        }
        Image::from_dynamic_image(&DynamicImage::ImageRgb8(image)).add_to_layer(
            self.layer.clone(),
            Some(mm(x)),
            Some(mm(PAGE_HEIGHT - top - height)),
            None,
            Some(width / natural_width),
            Some(height / natural_height),
            Some(LOGO_DPI),
        );
    }

    fn save(self, output_path: &Path) -> Result<usize> {
        let Self {
            document, pages, ..
        } = self;

        let file = File::create(output_path).map_err(|err| Error::io(output_path, err))?;
        let mut writer = BufWriter::new(file);
        document.save(&mut writer)?;
        writer.flush().map_err(|err| Error::io(output_path, err))?;
        Ok(pages)
    }
}

/// Renders price brackets as a paginated PDF document.
#[derive(Clone, Copy, Debug, Default)]
pub struct PdfRenderer;

impl PdfRenderer {
    /// Creates a renderer.
    pub fn new() -> Self {
        Self
    }

    fn draw_title(canvas: &PdfCanvas, layout: &Layout<'_>, mut cursor: f64) -> f64 {
        let center = MARGIN + CONTENT_WIDTH / 2.0;
        for line in helvetica::wrap(layout.title(), true, PAGE_TITLE_FONT_SIZE, CONTENT_WIDTH) {
            let baseline = centered_baseline(cursor, TITLE_LEADING, PAGE_TITLE_FONT_SIZE);
            canvas.centered_text(
                &line,
                center,
                baseline,
                PAGE_TITLE_FONT_SIZE,
                true,
                layout.text_color(),
            );
            cursor += TITLE_LEADING;
        }
        cursor
    }

    fn draw_table(
        canvas: &mut PdfCanvas,
        layout: &Layout<'_>,
        table: &PricingTable,
        mut cursor: f64,
    ) -> f64 {
        let widths: Vec<f64> = layout
            .page_column_widths()
            .into_iter()
            .map(|inches| inches * POINTS_PER_INCH)
            .collect();
        let table_width: f64 = widths.iter().sum();
        let left = MARGIN + (CONTENT_WIDTH - table_width) / 2.0;

        for (row_index, row) in table.rows().iter().enumerate() {
            let row_style = layout.cell_style(row_index, 0);
            let row_height =
                row_style.font_size * CELL_LEADING_FACTOR + 2.0 * row_style.vertical_padding;

            if cursor + row_height > CONTENT_BOTTOM && cursor > MARGIN {
                canvas.new_page();
                cursor = MARGIN;
            }

            let mut x = left;
            for (column, (cell, width)) in row.iter().zip(&widths).enumerate() {
                let style = layout.cell_style(row_index, column);
                canvas.fill_rect(x, cursor, *width, row_height, style.background);
                canvas.centered_text(
                    cell,
                    x + width / 2.0,
                    centered_baseline(cursor, row_height, style.font_size),
                    style.font_size,
                    style.bold,
                    style.text_color,
                );
                canvas.stroke_rect(x, cursor, *width, row_height, GRID_LINE_WIDTH, layout.grid_color());
                x += width;
            }

            cursor += row_height;
            if row_index == 0 {
                canvas.horizontal_rule(left, cursor, table_width, HEADER_RULE_WIDTH, layout.grid_color());
            }
        }

        cursor
    }

    fn draw_footer(canvas: &mut PdfCanvas, layout: &Layout<'_>, cursor: f64) {
        let lines: Vec<String> = layout
            .footer_lines()
            .iter()
            .flat_map(|line| helvetica::wrap(line, false, FOOTER_FONT_SIZE, CONTENT_WIDTH))
            .collect();
        let height = FOOTER_LEADING * lines.len() as f64;

        let mut top = cursor + SPACE_BEFORE_FOOTER;
        if top + height > CONTENT_BOTTOM {
            canvas.new_page();
            top = MARGIN;
        }

        let center = MARGIN + CONTENT_WIDTH / 2.0;
        for line in &lines {
            canvas.centered_text(
                line,
                center,
                centered_baseline(top, FOOTER_LEADING, FOOTER_FONT_SIZE),
                FOOTER_FONT_SIZE,
                false,
                layout.text_color(),
            );
            top += FOOTER_LEADING;
        }
    }
}

impl DocumentRenderer for PdfRenderer {
    fn format_name(&self) -> &'static str {
        "PDF"
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn render(
        &self,
        layout: &Layout<'_>,
        table: &PricingTable,
        output_path: &Path,
    ) -> Result<PathBuf> {
        let mut canvas = PdfCanvas::new(layout.title())?;
        let mut cursor = MARGIN;

        if let Some(logo) = load_logo(layout.brand().logo_path())? {
            let x = MARGIN + (CONTENT_WIDTH - LOGO_WIDTH) / 2.0;
            canvas.image(logo, x, cursor, LOGO_WIDTH, LOGO_HEIGHT);
            cursor += LOGO_HEIGHT + SPACE_AFTER_LOGO;
        }

        cursor = Self::draw_title(&canvas, layout, cursor) + SPACE_AFTER_TITLE;
        cursor = Self::draw_table(&mut canvas, layout, table, cursor);
        Self::draw_footer(&mut canvas, layout, cursor);

        let pages = canvas.save(output_path)?;
        info!(
            "PDF created: {} ({} page{})",
            output_path.display(),
            pages,
            if pages == 1 { "" } else { "s" }
        );
        Ok(output_path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_area_matches_letter_with_inch_margins() {
        assert_eq!(CONTENT_WIDTH, 6.5 * POINTS_PER_INCH);
        assert_eq!(CONTENT_BOTTOM, 720.0);
    }

    #[test]
    fn baseline_centers_capitals() {
        let baseline = centered_baseline(100.0, 40.0, 10.0);
        let cap_top = baseline - CAP_HEIGHT * 10.0;
        assert!(((cap_top - 100.0) - (140.0 - baseline)).abs() < 1e-9);
    }

    #[test]
    fn brand_colors_map_to_unit_rgb() {
        assert_eq!(
            pdf_color(BrandColor::WHITE),
            Color::Rgb(Rgb::new(1.0, 1.0, 1.0, None))
        );
    }
}
