//! Brand configuration applied to every generated document.
//!
//! A [`Brand`] is built once (usually through [`Brand::from_env`]) and then
//! shared by reference with both renderers. It never changes after
//! construction; the `with_*` methods return new values.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use log::debug;

use crate::error::{Error, Result};

/// Environment variable that overrides the logo location.
pub const LOGO_PATH_ENV: &str = "PRICE_BRACKETS_LOGO_PATH";

/// Logo location used when nothing else is configured.
pub const DEFAULT_LOGO_PATH: &str =
    "/mnt/skills/user/elimstat-brand-guidelines/ElimstatBlueSimple.png";

/// An opaque 8-bit sRGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BrandColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl BrandColor {
    /// Pure white.
    pub const WHITE: BrandColor = BrandColor::new(0xff, 0xff, 0xff);
    /// Pure black.
    pub const BLACK: BrandColor = BrandColor::new(0x00, 0x00, 0x00);

    /// Creates a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a `#RRGGBB` (or `RRGGBB`) hex string.
    pub fn from_hex(value: &str) -> Result<Self> {
        let digits = value.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(Error::invalid_input(format!(
                "color '{value}' is not of the form #RRGGBB"
            )));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| {
                Error::invalid_input(format!("color '{value}' contains non-hex digits"))
            })
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Returns the channels as fractions in `0.0..=1.0`.
    pub fn to_unit_rgb(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }
}

impl fmt::Display for BrandColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Contact details printed in the document footer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactInfo {
    /// Sales phone number.
    pub phone: String,
    /// Fax number.
    pub fax: String,
    /// Sales email address.
    pub email: String,
    /// Postal address.
    pub address: String,
}

impl ContactInfo {
    /// Returns the two footer lines: phone/fax/email, then the postal address.
    pub fn footer_lines(&self) -> [String; 2] {
        [
            format!(
                "Phone: {}  |  Fax: {}  |  Email: {}",
                self.phone, self.fax, self.email
            ),
            self.address.clone(),
        ]
    }
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            phone: "(937) 993-0300".to_owned(),
            fax: "(937) 324-8753".to_owned(),
            email: "sales@elimstat.com".to_owned(),
            address: "888 Dayton Street Suite 105, Yellow Springs, Ohio 45387".to_owned(),
        }
    }
}

/// Colors, logo and contact details shared by both renderers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Brand {
    primary: BrandColor,
    light: BrandColor,
    header: BrandColor,
    logo_path: PathBuf,
    contact: ContactInfo,
}

impl Default for Brand {
    fn default() -> Self {
        Self {
            primary: BrandColor::new(0x18, 0x41, 0x87),
            light: BrandColor::new(0xe6, 0xf5, 0xff),
            header: BrandColor::new(0x0a, 0x30, 0x8c),
            logo_path: PathBuf::from(DEFAULT_LOGO_PATH),
            contact: ContactInfo::default(),
        }
    }
}

impl Brand {
    /// Builds the default brand, taking the logo path from
    /// [`LOGO_PATH_ENV`] when it is set to a non-empty value.
    pub fn from_env() -> Self {
        let brand = Self::default();
        match env::var_os(LOGO_PATH_ENV) {
            Some(path) if !path.is_empty() => {
                debug!("Using logo path from {}: {:?}", LOGO_PATH_ENV, path);
                brand.with_logo_path(path)
            }
            _ => brand,
        }
    }

    /// Builds a brand from hex color strings and the default contact details.
    pub fn from_hex_colors(primary: &str, light: &str, header: &str) -> Result<Self> {
        Ok(Self {
            primary: BrandColor::from_hex(primary)?,
            light: BrandColor::from_hex(light)?,
            header: BrandColor::from_hex(header)?,
            ..Self::default()
        })
    }

    /// Returns a copy of the brand that reads its logo from `path`.
    pub fn with_logo_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.logo_path = path.into();
        self
    }

    /// Returns a copy of the brand with different contact details.
    pub fn with_contact(mut self, contact: ContactInfo) -> Self {
        self.contact = contact;
        self
    }

    /// Primary color used for the title, grid lines and footer.
    pub fn primary(&self) -> BrandColor {
        self.primary
    }

    /// Light accent used for every even data row.
    pub fn light(&self) -> BrandColor {
        self.light
    }

    /// Background of the header row.
    pub fn header(&self) -> BrandColor {
        self.header
    }

    /// Configured logo location. The file may not exist.
    pub fn logo_path(&self) -> &Path {
        &self.logo_path
    }

    /// Footer contact details.
    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }
}

/// Process-wide brand used by the free `generate_*` functions.
///
/// Built from [`Brand::from_env`] on first use and never rebuilt, so later
/// changes to the environment have no effect.
pub fn process_brand() -> &'static Brand {
    static BRAND: OnceLock<Brand> = OnceLock::new();
    BRAND.get_or_init(Brand::from_env)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(
            BrandColor::from_hex("#184187").unwrap(),
            BrandColor::new(0x18, 0x41, 0x87)
        );
        assert_eq!(
            BrandColor::from_hex("e6f5ff").unwrap(),
            BrandColor::new(0xe6, 0xf5, 0xff)
        );
    }

    #[test]
    fn rejects_malformed_hex_colors() {
        for value in ["", "#12345", "#1234567", "#GG0000", "#ééé"] {
            let err = BrandColor::from_hex(value).unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "{value}: {err}");
        }
    }

    #[test]
    fn default_brand_matches_hex_constants() {
        let parsed = Brand::from_hex_colors("#184187", "#e6f5ff", "#0A308C").unwrap();
        assert_eq!(parsed, Brand::default());
        assert_eq!(Brand::default().header().to_string(), "#0A308C");
    }

    #[test]
    fn footer_lines_join_contact_fields() {
        let [first, second] = ContactInfo::default().footer_lines();
        assert_eq!(
            first,
            "Phone: (937) 993-0300  |  Fax: (937) 324-8753  |  Email: sales@elimstat.com"
        );
        assert_eq!(
            second,
            "888 Dayton Street Suite 105, Yellow Springs, Ohio 45387"
        );
    }

    #[test]
    fn process_brand_is_built_once() {
        assert!(std::ptr::eq(process_brand(), process_brand()));
    }

    #[test]
    fn with_logo_path_leaves_colors_untouched() {
        let brand = Brand::default().with_logo_path("/tmp/logo.png");
        assert_eq!(brand.logo_path(), Path::new("/tmp/logo.png"));
        assert_eq!(brand.primary(), Brand::default().primary());
    }
}
