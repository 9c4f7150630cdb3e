//! Font lookup for the price bracket renderers.
//!
//! The PDF renderer uses the built-in Helvetica faces and only needs their
//! character widths ([`helvetica`]). The raster renderer draws glyphs itself
//! and needs a TrueType regular/bold pair, resolved from the first directory
//! in the search order that contains one of the known file name pairs:
//!
//! 1. `PRICE_BRACKETS_FONTS_DIR`
//! 2. `assets/fonts` next to the running executable
//! 3. `assets/fonts` in this crate (bundled DejaVu Sans)
//! 4. well-known system font directories

pub mod helvetica;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use rusttype::Font;

use crate::error::{Error, Result};

/// Environment variable naming an extra font directory searched first.
pub const FONTS_DIR_ENV: &str = "PRICE_BRACKETS_FONTS_DIR";

/// Regular/bold file name pairs accepted in a font directory, in order of
/// preference.
const FONT_FILE_PAIRS: &[(&str, &str)] = &[
    ("DejaVuSans.ttf", "DejaVuSans-Bold.ttf"),
    ("LiberationSans-Regular.ttf", "LiberationSans-Bold.ttf"),
    ("Roboto-Regular.ttf", "Roboto-Bold.ttf"),
    ("Arial.ttf", "Arial Bold.ttf"),
    ("arial.ttf", "arialbd.ttf"),
];

const SYSTEM_FONT_DIRECTORIES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu",
    "/usr/share/fonts/dejavu",
    "/usr/share/fonts/TTF",
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/liberation-sans",
    "/usr/local/share/fonts",
    "/Library/Fonts",
    "/System/Library/Fonts/Supplemental",
];

/// A regular and a bold face used for raster text.
pub struct FontFamily {
    /// Face for regular text.
    pub regular: Font<'static>,
    /// Face for bold text.
    pub bold: Font<'static>,
}

impl FontFamily {
    /// Returns the bold or regular face.
    pub fn face(&self, bold: bool) -> &Font<'static> {
        if bold {
            &self.bold
        } else {
            &self.regular
        }
    }
}

/// Directory holding the fonts bundled with this crate.
pub fn bundled_fonts_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts")
}

fn push_unique(candidates: &mut Vec<PathBuf>, candidate: PathBuf) {
    if !candidates.iter().any(|existing| existing == &candidate) {
        candidates.push(candidate);
    }
}

fn font_directory_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = env::var_os(FONTS_DIR_ENV) {
        if !path.is_empty() {
            candidates.push(PathBuf::from(path));
        }
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            push_unique(&mut candidates, bin_dir.join("assets/fonts"));
        }
    }

    push_unique(&mut candidates, bundled_fonts_dir());

    for dir in SYSTEM_FONT_DIRECTORIES {
        push_unique(&mut candidates, PathBuf::from(dir));
    }

    #[cfg(windows)]
    {
        for var in ["WINDIR", "SystemRoot"] {
            if let Some(root) = env::var_os(var) {
                push_unique(&mut candidates, PathBuf::from(root).join("Fonts"));
            }
        }
    }

    candidates
}

fn find_pair(directory: &Path) -> Option<(PathBuf, PathBuf)> {
    FONT_FILE_PAIRS.iter().find_map(|(regular, bold)| {
        let regular = directory.join(regular);
        let bold = directory.join(bold);
        (regular.is_file() && bold.is_file()).then_some((regular, bold))
    })
}

fn resolve_font_pair() -> Result<(PathBuf, PathBuf)> {
    let mut attempts = Vec::new();

    for candidate in font_directory_candidates() {
        if !candidate.is_dir() {
            attempts.push(format!("{} (directory missing)", candidate.display()));
            continue;
        }

        match find_pair(&candidate) {
            Some(pair) => {
                debug!("Using fonts from {}", candidate.display());
                return Ok(pair);
            }
            None => attempts.push(format!("{} (no regular/bold pair)", candidate.display())),
        }
    }

    Err(Error::FontLoad(format!(
        "no TrueType regular/bold pair found. Checked: {}. Set {} to a directory containing one.",
        attempts.join(", "),
        FONTS_DIR_ENV
    )))
}

fn load_face(path: &Path) -> Result<Font<'static>> {
    let bytes = fs::read(path).map_err(|err| Error::io(path, err))?;
    Font::try_from_vec(bytes).ok_or_else(|| {
        Error::FontLoad(format!("{} is not a usable TrueType font", path.display()))
    })
}

/// Loads the raster font family following the search order described in
/// the module documentation.
pub fn default_font_family() -> Result<FontFamily> {
    let (regular_path, bold_path) = resolve_font_pair()?;
    let regular = load_face(&regular_path)?;
    let bold = match load_face(&bold_path) {
        Ok(bold) => bold,
        Err(err) => {
            warn!(
                "Bold face {} unusable ({}); falling back to {}",
                bold_path.display(),
                err,
                regular_path.display()
            );
            load_face(&regular_path)?
        }
    };
    Ok(FontFamily { regular, bold })
}

/// Indicates whether [`default_font_family`] can find a font pair.
pub fn default_fonts_available() -> bool {
    resolve_font_pair().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_directory_is_searched() {
        assert!(font_directory_candidates().contains(&bundled_fonts_dir()));
    }

    #[test]
    fn candidates_are_unique() {
        let candidates = font_directory_candidates();
        for (index, candidate) in candidates.iter().enumerate() {
            assert!(
                !candidates[index + 1..].contains(candidate),
                "{} listed twice",
                candidate.display()
            );
        }
    }

    #[test]
    fn directory_without_pair_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("DejaVuSans.ttf"), b"regular only").unwrap();
        assert!(find_pair(dir.path()).is_none());

        fs::write(dir.path().join("DejaVuSans-Bold.ttf"), b"bold").unwrap();
        let (regular, bold) = find_pair(dir.path()).unwrap();
        assert!(regular.ends_with("DejaVuSans.ttf"));
        assert!(bold.ends_with("DejaVuSans-Bold.ttf"));
    }

    #[test]
    fn invalid_font_bytes_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        fs::write(&path, b"not a font").unwrap();
        assert!(load_face(&path).unwrap_err().is_font_error());
    }
}
