//! Produces the PDF and PNG pair for one product.

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::brand::Brand;
use crate::error::Result;
use crate::layout::Layout;
use crate::render::{DocumentRenderer, PdfRenderer, RasterRenderer};
use crate::table::PricingTable;

const FILE_SUFFIX: &str = "_Price_Brackets";

/// Replaces spaces and path separators in `product_name` with underscores.
pub fn safe_file_stem(product_name: &str) -> String {
    product_name
        .chars()
        .map(|ch| match ch {
            ' ' | '/' | '\\' => '_',
            other => other,
        })
        .collect()
}

/// Paths of the two documents written by [`PriceBracketGenerator::generate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedDocuments {
    pub pdf: PathBuf,
    pub png: PathBuf,
}

/// Renders price brackets with a fixed [`Brand`].
#[derive(Clone, Debug, Default)]
pub struct PriceBracketGenerator {
    brand: Brand,
    pdf: PdfRenderer,
    raster: RasterRenderer,
}

impl PriceBracketGenerator {
    /// Creates a generator for `brand`.
    pub fn new(brand: Brand) -> Self {
        Self {
            brand,
            pdf: PdfRenderer::new(),
            raster: RasterRenderer::new(),
        }
    }

    pub fn brand(&self) -> &Brand {
        &self.brand
    }

    /// Writes the paginated PDF for `product_name` to `output_path`.
    pub fn generate_pdf(
        &self,
        product_name: &str,
        table: &PricingTable,
        output_path: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        self.render_with(&self.pdf, product_name, table, output_path.as_ref())
    }

    /// Writes the single-canvas PNG for `product_name` to `output_path`.
    pub fn generate_png(
        &self,
        product_name: &str,
        table: &PricingTable,
        output_path: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        self.render_with(&self.raster, product_name, table, output_path.as_ref())
    }

    /// Writes both documents into `output_dir`, which must already exist.
    ///
    /// The PDF is rendered first; if it fails the PNG is not attempted.
    pub fn generate(
        &self,
        product_name: &str,
        table: &PricingTable,
        output_dir: impl AsRef<Path>,
    ) -> Result<GeneratedDocuments> {
        let output_dir = output_dir.as_ref();
        let stem = format!("{}{FILE_SUFFIX}", safe_file_stem(product_name));
        let layout = Layout::new(&self.brand, product_name, table);

        let target = |renderer: &dyn DocumentRenderer| {
            output_dir.join(format!("{stem}.{}", renderer.extension()))
        };
        let pdf = render_layout(&self.pdf, &layout, table, &target(&self.pdf))?;
        let png = render_layout(&self.raster, &layout, table, &target(&self.raster))?;

        info!("Price brackets for '{}' written to {}", product_name, output_dir.display());
        Ok(GeneratedDocuments { pdf, png })
    }

    fn render_with(
        &self,
        renderer: &dyn DocumentRenderer,
        product_name: &str,
        table: &PricingTable,
        output_path: &Path,
    ) -> Result<PathBuf> {
        let layout = Layout::new(&self.brand, product_name, table);
        render_layout(renderer, &layout, table, output_path)
    }
}

fn render_layout(
    renderer: &dyn DocumentRenderer,
    layout: &Layout<'_>,
    table: &PricingTable,
    output_path: &Path,
) -> Result<PathBuf> {
    debug!(
        "Rendering {} for '{}' to {}",
        renderer.format_name(),
        layout.title(),
        output_path.display()
    );
    renderer.render(layout, table, output_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stems_replace_spaces_and_separators() {
        assert_eq!(safe_file_stem("ESD Mat Roll"), "ESD_Mat_Roll");
        assert_eq!(safe_file_stem("A/B C"), "A_B_C");
        assert_eq!(safe_file_stem(r"Left\Right"), "Left_Right");
        assert_eq!(safe_file_stem("Plain"), "Plain");
    }

    #[test]
    fn default_generator_uses_default_brand() {
        assert_eq!(PriceBracketGenerator::default().brand(), &Brand::default());
    }

    #[test]
    fn missing_output_dir_fails_before_png() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("not-created");
        let table = PricingTable::try_from([["Size", "Price"], ["1", "$1"]]).unwrap();
        let generator = PriceBracketGenerator::new(
            Brand::default().with_logo_path(dir.path().join("no-logo.png")),
        );

        let err = generator.generate("Widget", &table, &missing).unwrap_err();
        assert!(matches!(err, crate::Error::Io { .. }), "{err}");
        assert!(!missing.join("Widget_Price_Brackets.png").exists());
    }
}
