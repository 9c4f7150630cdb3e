//! Error type shared by the table model, the renderers and the generator.

use std::io;
use std::path::{Path, PathBuf};

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures surfaced while validating input or producing documents.
///
/// Nothing is retried: the first failure is returned to the caller and any
/// partially written output file is left in place.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The pricing table or brand configuration is malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A filesystem operation failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path that was being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// The PDF backend failed to compose or encode the document.
    #[error("PDF rendering failed: {0}")]
    Pdf(#[from] printpdf::Error),

    /// An image could not be decoded or encoded.
    #[error("image error at {}: {source}", path.display())]
    Image {
        /// Path of the image being decoded or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: image::ImageError,
    },

    /// No usable TrueType font family was found for raster text.
    #[error("font loading failed: {0}")]
    FontLoad(String),
}

impl Error {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub(crate) fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub(crate) fn image(path: impl AsRef<Path>, source: image::ImageError) -> Self {
        Self::Image {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Returns `true` when the error stems from missing or unreadable fonts.
    pub fn is_font_error(&self) -> bool {
        matches!(self, Self::FontLoad(_))
    }
}
