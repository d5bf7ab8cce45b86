//! Header extraction and data chunk collection.

use crate::chunk::{read_u32_be, Chunk, ChunkType};
use crate::color::ColorMode;
use crate::error::{Error, Result};

/// Minimum IHDR payload: width, height, bit depth, color type.
const IHDR_MIN_LEN: usize = 10;

/// Image metadata from the IHDR chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Bits per sample as declared.
    pub bit_depth: u8,
    /// Color mode (only truecolor with or without alpha is accepted).
    pub color_mode: ColorMode,
    /// Compression method byte, 0 when the payload stops before it.
    pub compression_method: u8,
    /// Filter method byte, 0 when the payload stops before it.
    pub filter_method: u8,
    /// Interlace method byte, 0 when the payload stops before it.
    pub interlace_method: u8,
}

impl ImageHeader {
    /// Parse an IHDR payload. Bytes past the fields read here are ignored.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        if payload.len() < IHDR_MIN_LEN {
            return Err(Error::Format(format!(
                "IHDR payload is {} bytes, need at least {IHDR_MIN_LEN}",
                payload.len()
            )));
        }
        let optional = |i: usize| payload.get(i).copied().unwrap_or(0);

        Ok(ImageHeader {
            width: read_u32_be(payload, 0),
            height: read_u32_be(payload, 4),
            bit_depth: payload[8],
            color_mode: ColorMode::try_from(payload[9])?,
            compression_method: optional(10),
            filter_method: optional(11),
            interlace_method: optional(12),
        })
    }

    /// Bytes per pixel for the color mode.
    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        self.color_mode.bytes_per_pixel()
    }

    /// Reject anything but 8-bit, method 0, non-interlaced images.
    pub fn validate_strict(&self) -> Result<()> {
        if self.bit_depth != 8 {
            return Err(Error::UnsupportedFormat(format!(
                "bit depth {}",
                self.bit_depth
            )));
        }
        if self.compression_method != 0 {
            return Err(Error::UnsupportedFormat(format!(
                "compression method {}",
                self.compression_method
            )));
        }
        if self.filter_method != 0 {
            return Err(Error::UnsupportedFormat(format!(
                "filter method {}",
                self.filter_method
            )));
        }
        if self.interlace_method != 0 {
            return Err(Error::UnsupportedFormat("interlaced images".into()));
        }
        Ok(())
    }
}

/// Split a chunk sequence into the image header and the compressed stream.
///
/// The header comes from the first IHDR chunk. Every IDAT payload is appended
/// in encounter order; their total length is not checked here.
pub fn extract(chunks: Vec<Chunk<'_>>) -> Result<(ImageHeader, Vec<u8>)> {
    let ihdr = chunks
        .iter()
        .find(|c| c.chunk_type == ChunkType::IHDR)
        .ok_or_else(|| Error::Format("missing IHDR chunk".into()))?;
    let header = ImageHeader::parse(ihdr.data)?;

    let idat_len: usize = chunks
        .iter()
        .filter(|c| c.chunk_type == ChunkType::IDAT)
        .map(|c| c.data.len())
        .sum();
    let mut compressed = Vec::with_capacity(idat_len);
    for chunk in chunks.iter().filter(|c| c.chunk_type == ChunkType::IDAT) {
        compressed.extend_from_slice(chunk.data);
    }

    log::debug!(
        "header: {}x{} {} depth {}, {} compressed bytes",
        header.width,
        header.height,
        header.color_mode,
        header.bit_depth,
        compressed.len()
    );
    Ok((header, compressed))
}
