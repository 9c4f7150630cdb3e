//! Branded price bracket documents.
//!
//! A [`PricingTable`] is rendered twice: as a paginated letter-size PDF and
//! as a single landscape PNG. Both outputs share the styling rules in
//! [`layout`] and the colors and contact details of a [`Brand`].
//!
//! The free functions use the process-wide brand from
//! [`brand::process_brand`]; use [`PriceBracketGenerator`] for anything else.

pub mod brand;
pub mod error;
pub mod fonts;
pub mod generator;
pub mod layout;
pub mod logo;
pub mod render;
pub mod sample;
pub mod table;

use std::path::{Path, PathBuf};

pub use brand::{Brand, BrandColor, ContactInfo};
pub use error::{Error, Result};
pub use generator::{GeneratedDocuments, PriceBracketGenerator};
pub use layout::{CellStyle, Layout};
pub use render::{DocumentRenderer, PdfRenderer, RasterRenderer};
pub use table::{PricingTable, PricingTableBuilder};

/// Directory the command line tool writes into when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";

fn process_generator() -> PriceBracketGenerator {
    PriceBracketGenerator::new(brand::process_brand().clone())
}

/// Writes the PDF price bracket for `product_name` to `output_path`.
pub fn generate_pdf(
    product_name: &str,
    table: &PricingTable,
    output_path: impl AsRef<Path>,
) -> Result<PathBuf> {
    process_generator().generate_pdf(product_name, table, output_path)
}

/// Writes the PNG price bracket for `product_name` to `output_path`.
pub fn generate_png(
    product_name: &str,
    table: &PricingTable,
    output_path: impl AsRef<Path>,
) -> Result<PathBuf> {
    process_generator().generate_png(product_name, table, output_path)
}

/// Writes `{name}_Price_Brackets.pdf` and `.png` into `output_dir`.
pub fn generate_both(
    product_name: &str,
    table: &PricingTable,
    output_dir: impl AsRef<Path>,
) -> Result<GeneratedDocuments> {
    process_generator().generate(product_name, table, output_dir)
}
