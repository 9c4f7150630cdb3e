//! Single-canvas PNG output built on `image` and `rusttype`.
//!
//! The canvas is an 11 × 8.5 inch sheet at 300 DPI. Element positions are
//! given in normalized plot coordinates: `(0, 0)` is the bottom-left and
//! `(1, 1)` the top-right corner of a plot region inset from the sheet edges.
//! After drawing, the image is cropped to the drawn content plus a small
//! white pad.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{GenericImageView, ImageError, ImageFormat, Rgb, RgbImage};
use log::info;
use rusttype::{point, Font, Scale};

use crate::brand::BrandColor;
use crate::error::{Error, Result};
use crate::fonts::{self, FontFamily};
use crate::layout::{
    Layout, CANVAS_TITLE_FONT_SIZE, FOOTER_FONT_SIZE, GRID_LINE_WIDTH, HEADER_RULE_WIDTH,
};
use crate::logo::load_logo;
use crate::render::DocumentRenderer;
use crate::table::PricingTable;

/// Output resolution in dots per inch.
pub const DPI: f64 = 300.0;
/// Canvas width in pixels (11 inches).
pub const CANVAS_WIDTH: u32 = 3300;
/// Canvas height in pixels (8.5 inches).
pub const CANVAS_HEIGHT: u32 = 2550;

const PLOT_LEFT: f64 = 0.125;
const PLOT_BOTTOM: f64 = 0.11;
const PLOT_WIDTH: f64 = 0.775;
const PLOT_HEIGHT: f64 = 0.77;

const LOGO_EXTENT: [f64; 4] = [0.15, 0.65, 0.85, 0.95];
const TITLE_Y: f64 = 0.78;
const TABLE_BOX: [f64; 4] = [0.15, 0.25, 0.7, 0.45];
const FOOTER_Y: [f64; 2] = [0.12, 0.08];
/// White margin kept around the content when cropping (0.1 inch).
const CROP_PAD: u32 = 30;

fn points_to_pixels(points: f64) -> f32 {
    (points * DPI / 72.0) as f32
}

fn pixel(color: BrandColor) -> Rgb<u8> {
    Rgb([color.r, color.g, color.b])
}

/// Maps normalized plot coordinates to canvas pixel coordinates.
pub fn canvas_position(x: f64, y: f64) -> (f64, f64) {
    let px = (PLOT_LEFT + PLOT_WIDTH * x) * f64::from(CANVAS_WIDTH);
    let py = (1.0 - (PLOT_BOTTOM + PLOT_HEIGHT * y)) * f64::from(CANVAS_HEIGHT);
    (px, py)
}

/// Like [`canvas_position`], rounded to the containing pixel.
pub fn canvas_pixel(x: f64, y: f64) -> (u32, u32) {
    let (px, py) = canvas_position(x, y);
    (px.floor().max(0.0) as u32, py.floor().max(0.0) as u32)
}

/// Bounding box of all non-white pixels, as `(x, y, width, height)`.
fn content_bounds(image: &RgbImage) -> Option<(u32, u32, u32, u32)> {
    let white = Rgb([255, 255, 255]);
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, px) in image.enumerate_pixels() {
        if *px == white {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    bounds.map(|(x0, y0, x1, y1)| (x0, y0, x1 - x0 + 1, y1 - y0 + 1))
}

/// Crops `image` to its content plus [`CROP_PAD`] pixels on each side.
fn crop_to_content(image: &RgbImage) -> RgbImage {
    match content_bounds(image) {
        Some((x, y, width, height)) => {
            let x0 = x.saturating_sub(CROP_PAD);
            let y0 = y.saturating_sub(CROP_PAD);
            let x1 = (x + width + CROP_PAD).min(image.width());
            let y1 = (y + height + CROP_PAD).min(image.height());
            image.view(x0, y0, x1 - x0, y1 - y0).to_image()
        }
        None => image.clone(),
    }
}

/// Pixel canvas with the few primitives the price bracket needs.
struct RasterCanvas<'f> {
    image: RgbImage,
    fonts: &'f FontFamily,
}

impl<'f> RasterCanvas<'f> {
    fn new(fonts: &'f FontFamily) -> Self {
        Self {
            image: RgbImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, Rgb([255, 255, 255])),
            fonts,
        }
    }

    fn fill_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: BrandColor) {
        let clamp_x = |v: f64| v.round().clamp(0.0, f64::from(self.image.width())) as u32;
        let clamp_y = |v: f64| v.round().clamp(0.0, f64::from(self.image.height())) as u32;
        let (left, right) = (clamp_x(x0.min(x1)), clamp_x(x0.max(x1)));
        let (top, bottom) = (clamp_y(y0.min(y1)), clamp_y(y0.max(y1)));
        let fill = pixel(color);
        for y in top..bottom {
            for x in left..right {
                self.image.put_pixel(x, y, fill);
            }
        }
    }

    fn horizontal_line(&mut self, x0: f64, x1: f64, y: f64, thickness: f64, color: BrandColor) {
        let half = thickness / 2.0;
        self.fill_rect(x0 - half, y - half, x1 + half, y + half, color);
    }

    fn vertical_line(&mut self, x: f64, y0: f64, y1: f64, thickness: f64, color: BrandColor) {
        let half = thickness / 2.0;
        self.fill_rect(x - half, y0 - half, x + half, y1 + half, color);
    }

    fn stroke_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, thickness: f64, color: BrandColor) {
        self.horizontal_line(x0, x1, y0, thickness, color);
        self.horizontal_line(x0, x1, y1, thickness, color);
        self.vertical_line(x0, y0, y1, thickness, color);
        self.vertical_line(x1, y0, y1, thickness, color);
    }

    fn text_width(font: &Font<'_>, text: &str, scale: Scale) -> f32 {
        font.layout(text, scale, point(0.0, 0.0))
            .last()
            .map(|glyph| glyph.position().x + glyph.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0)
    }

    /// Draws `text` centered on `(cx, cy)` in canvas pixels.
    fn centered_text(&mut self, text: &str, cx: f64, cy: f64, points: f64, bold: bool, color: BrandColor) {
        if text.is_empty() {
            return;
        }
        let font = self.fonts.face(bold);
        let scale = Scale::uniform(points_to_pixels(points));
        let metrics = font.v_metrics(scale);
        let width = Self::text_width(font, text, scale);
        let origin = point(
            cx as f32 - width / 2.0,
            cy as f32 + (metrics.ascent + metrics.descent) / 2.0,
        );

        let ink = [f32::from(color.r), f32::from(color.g), f32::from(color.b)];
        let (canvas_w, canvas_h) = self.image.dimensions();
        for glyph in font.layout(text, scale, origin) {
            let Some(bounds) = glyph.pixel_bounding_box() else {
                continue;
            };
            let image = &mut self.image;
            glyph.draw(|gx, gy, coverage| {
                let x = gx as i32 + bounds.min.x;
                let y = gy as i32 + bounds.min.y;
                if x < 0 || y < 0 || x as u32 >= canvas_w || y as u32 >= canvas_h {
                    return;
                }
                let px = image.get_pixel_mut(x as u32, y as u32);
                for (channel, target) in px.0.iter_mut().zip(ink) {
                    let blended = f32::from(*channel) * (1.0 - coverage) + target * coverage;
                    *channel = blended.round().clamp(0.0, 255.0) as u8;
                }
            });
        }
    }

    fn overlay_stretched(&mut self, logo: &RgbImage, x0: f64, y0: f64, x1: f64, y1: f64) {
        let width = (x1 - x0).round().max(1.0) as u32;
        let height = (y1 - y0).round().max(1.0) as u32;
        let resized = imageops::resize(logo, width, height, FilterType::Triangle);
        imageops::overlay(&mut self.image, &resized, x0.round() as u32, y0.round() as u32);
    }
}

/// Renders price brackets as a single PNG image.
#[derive(Clone, Copy, Debug, Default)]
pub struct RasterRenderer;

impl RasterRenderer {
    /// Creates a renderer.
    pub fn new() -> Self {
        Self
    }

    /// Draws the full, uncropped canvas.
    ///
    /// Fails with [`Error::FontLoad`] when no TrueType font pair can be found
    /// and with [`Error::Image`] when the logo exists but cannot be decoded.
    pub fn compose(&self, layout: &Layout<'_>, table: &PricingTable) -> Result<RgbImage> {
        let family = fonts::default_font_family()?;
        let mut canvas = RasterCanvas::new(&family);

        if let Some(logo) = load_logo(layout.brand().logo_path())? {
            let [x0, x1, y0, y1] = LOGO_EXTENT;
            let (left, top) = canvas_position(x0, y1);
            let (right, bottom) = canvas_position(x1, y0);
            canvas.overlay_stretched(&logo, left, top, right, bottom);
        }

        let (cx, cy) = canvas_position(0.5, TITLE_Y);
        canvas.centered_text(layout.title(), cx, cy, CANVAS_TITLE_FONT_SIZE, true, layout.text_color());

        Self::draw_table(&mut canvas, layout, table);

        for (line, y) in layout.footer_lines().iter().zip(FOOTER_Y) {
            let (cx, cy) = canvas_position(0.5, y);
            canvas.centered_text(line, cx, cy, FOOTER_FONT_SIZE, false, layout.text_color());
        }

        Ok(canvas.image)
    }

    fn draw_table(canvas: &mut RasterCanvas<'_>, layout: &Layout<'_>, table: &PricingTable) {
        let [bx, by, bw, bh] = TABLE_BOX;
        let (left, top) = canvas_position(bx, by + bh);
        let (right, bottom) = canvas_position(bx + bw, by);
        let table_width = right - left;
        let row_height = (bottom - top) / table.row_count() as f64;
        let grid = layout.grid_color();
        let grid_width = f64::from(points_to_pixels(GRID_LINE_WIDTH));

        let mut column_edges = vec![left];
        for fraction in layout.canvas_column_widths() {
            let last = column_edges[column_edges.len() - 1];
            column_edges.push(last + fraction * table_width);
        }

        for (row_index, row) in table.rows().iter().enumerate() {
            let y0 = top + row_height * row_index as f64;
            let y1 = y0 + row_height;
            for (column, cell) in row.iter().enumerate() {
                let style = layout.cell_style(row_index, column);
                let (x0, x1) = (column_edges[column], column_edges[column + 1]);
                canvas.fill_rect(x0, y0, x1, y1, style.background);
                canvas.centered_text(
                    cell,
                    (x0 + x1) / 2.0,
                    (y0 + y1) / 2.0,
                    style.font_size,
                    style.bold,
                    style.text_color,
                );
            }
        }

        for row_index in 0..table.row_count() {
            let y0 = top + row_height * row_index as f64;
            for window in column_edges.windows(2) {
                canvas.stroke_rect(window[0], y0, window[1], y0 + row_height, grid_width, grid);
            }
        }

        let rule_y = top + row_height;
        canvas.horizontal_line(
            left,
            right,
            rule_y,
            f64::from(points_to_pixels(HEADER_RULE_WIDTH)),
            grid,
        );
    }
}

impl DocumentRenderer for RasterRenderer {
    fn format_name(&self) -> &'static str {
        "PNG"
    }

    fn extension(&self) -> &'static str {
        "png"
    }

    fn render(
        &self,
        layout: &Layout<'_>,
        table: &PricingTable,
        output_path: &Path,
    ) -> Result<PathBuf> {
        let canvas = self.compose(layout, table)?;
        let cropped = crop_to_content(&canvas);
        cropped
            .save_with_format(output_path, ImageFormat::Png)
            .map_err(|err| match err {
                ImageError::IoError(source) => Error::io(output_path, source),
                other => Error::image(output_path, other),
            })?;

        info!(
            "PNG created: {} ({}x{})",
            output_path.display(),
            cropped.width(),
            cropped.height()
        );
        Ok(output_path.to_path_buf())
    }
}
