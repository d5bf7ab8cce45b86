//! Color modes understood by the decoder.

use std::fmt;

use crate::error::Error;

/// Supported color modes, all with 8-bit samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ColorMode {
    /// RGB, 3 bytes per pixel (PNG color type 2).
    Truecolor = 2,
    /// RGBA, 4 bytes per pixel (PNG color type 6).
    TruecolorAlpha = 6,
}

impl ColorMode {
    /// Returns the number of bytes per pixel for this color mode.
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            ColorMode::Truecolor => 3,
            ColorMode::TruecolorAlpha => 4,
        }
    }

    /// Returns the PNG color type value.
    #[inline]
    pub const fn png_color_type(self) -> u8 {
        self as u8
    }

    /// Whether the last channel of each pixel is alpha.
    #[inline]
    pub const fn has_alpha(self) -> bool {
        matches!(self, ColorMode::TruecolorAlpha)
    }
}

impl TryFrom<u8> for ColorMode {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(ColorMode::Truecolor),
            6 => Ok(ColorMode::TruecolorAlpha),
            0 => Err(Error::UnsupportedFormat("grayscale images".into())),
            3 => Err(Error::UnsupportedFormat("palette images".into())),
            4 => Err(Error::UnsupportedFormat("grayscale+alpha images".into())),
            other => Err(Error::UnsupportedFormat(format!("color type {other}"))),
        }
    }
}

impl From<ColorMode> for u8 {
    fn from(mode: ColorMode) -> Self {
        mode.png_color_type()
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorMode::Truecolor => f.write_str("RGB"),
            ColorMode::TruecolorAlpha => f.write_str("RGBA"),
        }
    }
}
