//! Loading of the optional brand logo.
//!
//! A missing logo file is not an error: both renderers simply leave the
//! logo out. A file that exists but cannot be decoded is reported.

use std::path::Path;

use image::{DynamicImage, Rgb, RgbImage};
use log::debug;

use crate::error::{Error, Result};

/// Decodes the image at `path`, guessing the format from its contents.
pub fn decode_image_from_path(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let path = path.as_ref();
    let reader = image::io::Reader::open(path).map_err(|err| Error::io(path, err))?;
    reader
        .with_guessed_format()
        .map_err(|err| Error::io(path, err))?
        .decode()
        .map_err(|err| Error::image(path, err))
}

/// Composites any alpha channel onto white and returns an opaque RGB image.
///
/// The PDF backend embeds raw RGB samples and the canvas is opaque white,
/// so transparent logo pixels must end up white in both outputs.
pub fn flatten_onto_white(image: &DynamicImage) -> RgbImage {
    let rgba = image.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let alpha = u16::from(a);
        let blend = |channel: u8| {
            ((u16::from(channel) * alpha + 255 * (255 - alpha) + 127) / 255) as u8
        };
        Rgb([blend(r), blend(g), blend(b)])
    })
}

/// Loads the logo at `path` if the file exists.
pub fn load_logo(path: &Path) -> Result<Option<RgbImage>> {
    if !path.is_file() {
        debug!("Logo not found at {}; skipping", path.display());
        return Ok(None);
    }

    let image = decode_image_from_path(path)?;
    Ok(Some(flatten_onto_white(&image)))
}
