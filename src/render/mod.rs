//! Output-format specific renderers.
//!
//! Both renderers consume the same [`Layout`] and [`PricingTable`] and
//! write one file each. They hold no state between calls, so a single
//! renderer value can be reused for any number of documents.

pub mod pdf;
pub mod raster;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::layout::Layout;
use crate::table::PricingTable;

pub use pdf::PdfRenderer;
pub use raster::RasterRenderer;

/// A renderer that turns a laid-out pricing table into a file.
pub trait DocumentRenderer {
    /// Human readable format name used in log messages.
    fn format_name(&self) -> &'static str;

    /// File extension (without the dot) of the produced documents.
    fn extension(&self) -> &'static str;

    /// Renders `table` to `output_path`, replacing any existing file, and
    /// returns the path that was written.
    fn render(
        &self,
        layout: &Layout<'_>,
        table: &PricingTable,
        output_path: &Path,
    ) -> Result<PathBuf>;
}
