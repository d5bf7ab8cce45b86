//! Decode pipeline: chunks, header, inflate, unfilter, reshape.
//!
//! Each stage takes ownership of the previous stage's output, so a failure
//! anywhere returns an error and nothing else.

use std::path::Path;

use crate::chunk;
use crate::error::{Error, Result};
use crate::filter;
use crate::inflate::inflate_with_limit;
use crate::raster::{assemble, Raster};
use crate::store::{self, ImageHeader};

/// Default maximum width or height (16 million pixels per side).
pub const MAX_DIMENSION: u32 = 1 << 24;

/// Decoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Largest accepted width or height.
    pub max_dimension: u32,
    /// Reject bit depths other than 8 and non-zero compression, filter and
    /// interlace methods instead of ignoring them.
    pub strict_header: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_dimension: MAX_DIMENSION,
            strict_header: false,
        }
    }
}

impl DecodeOptions {
    /// Header method fields are read and ignored (matches the default).
    pub fn permissive() -> Self {
        Self::default()
    }

    /// Only 8-bit, method 0, non-interlaced images are accepted.
    pub fn strict() -> Self {
        Self {
            strict_header: true,
            ..Self::default()
        }
    }

    /// Set the largest accepted width or height.
    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension;
        self
    }
}

/// Decode a PNG held in memory with default options.
pub fn decode(data: &[u8]) -> Result<Raster> {
    decode_with_options(data, &DecodeOptions::default())
}

/// Decode a PNG held in memory.
pub fn decode_with_options(data: &[u8], options: &DecodeOptions) -> Result<Raster> {
    let chunks = chunk::parse(data)?;
    let (header, compressed) = store::extract(chunks)?;
    let expected = validate_header(&header, options)?;

    let filtered = inflate_with_limit(&compressed, expected.saturating_add(1))?;
    drop(compressed);

    let reconstructed = filter::reconstruct(
        &filtered,
        header.width,
        header.height,
        header.bytes_per_pixel(),
    )?;
    drop(filtered);

    assemble(reconstructed, header.width, header.height, header.color_mode)
}

/// Read a file and decode it with the given options.
pub fn decode_file<P: AsRef<Path>>(path: P, options: &DecodeOptions) -> Result<Raster> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| Error::Io(format!("{}: {e}", path.display())))?;
    log::debug!("read {} bytes from {}", data.len(), path.display());
    decode_with_options(&data, options)
}

/// Check header limits and return the expected filtered stream length.
fn validate_header(header: &ImageHeader, options: &DecodeOptions) -> Result<usize> {
    if header.width > options.max_dimension || header.height > options.max_dimension {
        return Err(Error::ImageTooLarge {
            width: header.width,
            height: header.height,
            max: options.max_dimension,
        });
    }
    if options.strict_header {
        header.validate_strict()?;
    }

    filter::filtered_len(header.width, header.height, header.bytes_per_pixel()).ok_or(
        Error::ImageTooLarge {
            width: header.width,
            height: header.height,
            max: options.max_dimension,
        },
    )
}
