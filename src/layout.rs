//! Layout policy shared by the PDF and raster renderers.
//!
//! Everything in here is a pure function of the brand, the product name and
//! the table dimensions. The renderers only translate these values into
//! their own coordinate systems, so both outputs stay visually consistent.

use crate::brand::{Brand, BrandColor};
use crate::error::{Error, Result};
use crate::table::PricingTable;

/// Title font size in the paginated document, in points.
pub const PAGE_TITLE_FONT_SIZE: f64 = 24.0;
/// Title font size on the raster canvas, in points.
pub const CANVAS_TITLE_FONT_SIZE: f64 = 28.0;
/// Header row font size, in points.
pub const HEADER_FONT_SIZE: f64 = 14.0;
/// Data row font size, in points.
pub const DATA_FONT_SIZE: f64 = 12.0;
/// Footer font size, in points.
pub const FOOTER_FONT_SIZE: f64 = 10.0;
/// Padding above and below header text, in points.
pub const HEADER_PADDING: f64 = 16.0;
/// Padding above and below data text, in points.
pub const DATA_PADDING: f64 = 12.0;
/// Width of every grid line, in points.
pub const GRID_LINE_WIDTH: f64 = 1.0;
/// Width of the rule drawn under the header row, in points.
pub const HEADER_RULE_WIDTH: f64 = 2.0;

/// Fixed widths for the common column counts plus the rule for the rest.
struct WidthScheme {
    label: f64,
    total: f64,
    two: [f64; 2],
    three: [f64; 3],
    four: [f64; 4],
}

/// Absolute widths in inches for the paginated document.
const PAGE_WIDTHS: WidthScheme = WidthScheme {
    label: 2.5,
    total: 6.5,
    two: [2.5, 4.0],
    three: [2.5, 2.0, 2.0],
    four: [2.5, 1.33, 1.33, 1.34],
};

/// Fractions of the table box on the raster canvas.
const CANVAS_WIDTHS: WidthScheme = WidthScheme {
    label: 0.3,
    total: 1.0,
    two: [0.35, 0.65],
    three: [0.3, 0.35, 0.35],
    four: [0.3, 0.23, 0.23, 0.24],
};

fn scheme_widths(scheme: &WidthScheme, column_count: usize) -> Vec<f64> {
    match column_count {
        0 => Vec::new(),
        // A lone label column owns the whole table width.
        1 => vec![scheme.total],
        2 => scheme.two.to_vec(),
        3 => scheme.three.to_vec(),
        4 => scheme.four.to_vec(),
        n => {
            let share = (scheme.total - scheme.label) / (n - 1) as f64;
            std::iter::once(scheme.label)
                .chain(std::iter::repeat(share).take(n - 1))
                .collect()
        }
    }
}

fn checked_widths(scheme: &WidthScheme, column_count: usize) -> Result<Vec<f64>> {
    if column_count == 0 {
        return Err(Error::invalid_input(
            "column widths requested for a table with zero columns",
        ));
    }
    Ok(scheme_widths(scheme, column_count))
}

/// Column widths in inches for the paginated document; they always add up
/// to the 6.5 inch content width.
pub fn page_column_widths(column_count: usize) -> Result<Vec<f64>> {
    checked_widths(&PAGE_WIDTHS, column_count)
}

/// Column widths as fractions of the canvas table box; they always add up
/// to `1.0`.
pub fn canvas_column_widths(column_count: usize) -> Result<Vec<f64>> {
    checked_widths(&CANVAS_WIDTHS, column_count)
}

/// Resolved appearance of a single table cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellStyle {
    /// Fill behind the cell text.
    pub background: BrandColor,
    /// Text color.
    pub text_color: BrandColor,
    /// Whether the bold face is used.
    pub bold: bool,
    /// Font size in points.
    pub font_size: f64,
    /// Padding above and below the text in points.
    pub vertical_padding: f64,
}

/// Layout parameters for one document.
#[derive(Clone, Debug)]
pub struct Layout<'a> {
    brand: &'a Brand,
    title: String,
    column_count: usize,
    row_count: usize,
}

impl<'a> Layout<'a> {
    /// Derives the layout for `product_name` and `table`.
    pub fn new(brand: &'a Brand, product_name: &str, table: &PricingTable) -> Self {
        Self {
            brand,
            title: format!("{product_name} Price Brackets"),
            column_count: table.column_count(),
            row_count: table.row_count(),
        }
    }

    /// Brand the layout was derived from.
    pub fn brand(&self) -> &'a Brand {
        self.brand
    }

    /// Document title, `"{product} Price Brackets"`.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Number of table columns.
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Number of table rows including the header.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Column widths in inches, see [`page_column_widths`].
    pub fn page_column_widths(&self) -> Vec<f64> {
        scheme_widths(&PAGE_WIDTHS, self.column_count)
    }

    /// Column widths as fractions, see [`canvas_column_widths`].
    pub fn canvas_column_widths(&self) -> Vec<f64> {
        scheme_widths(&CANVAS_WIDTHS, self.column_count)
    }

    /// Background of table row `row` (0 is the header).
    ///
    /// Data rows alternate strictly on their 1-based number: odd rows are
    /// white and even rows use the light brand color.
    pub fn row_background(&self, row: usize) -> BrandColor {
        match row {
            0 => self.brand.header(),
            n if n % 2 == 1 => BrandColor::WHITE,
            _ => self.brand.light(),
        }
    }

    /// Style of the cell at `row`, `column`. Content never affects the
    /// result.
    pub fn cell_style(&self, row: usize, column: usize) -> CellStyle {
        if row == 0 {
            CellStyle {
                background: self.row_background(0),
                text_color: BrandColor::WHITE,
                bold: true,
                font_size: HEADER_FONT_SIZE,
                vertical_padding: HEADER_PADDING,
            }
        } else {
            CellStyle {
                background: self.row_background(row),
                text_color: BrandColor::BLACK,
                bold: column == 0,
                font_size: DATA_FONT_SIZE,
                vertical_padding: DATA_PADDING,
            }
        }
    }

    /// Color of the grid lines and the header rule.
    pub fn grid_color(&self) -> BrandColor {
        self.brand.primary()
    }

    /// Color of the title and footer text.
    pub fn text_color(&self) -> BrandColor {
        self.brand.primary()
    }

    /// The two footer lines.
    pub fn footer_lines(&self) -> [String; 2] {
        self.brand.contact().footer_lines()
    }
}
