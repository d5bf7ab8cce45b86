//! Decoded pixel grid.

use std::ops::Index;

use crate::color::ColorMode;
use crate::error::{Error, Result};

/// A decoded image: `height` rows of `width` pixels of `channels()` bytes.
///
/// Samples are stored row-major with channels interleaved, so flat index `i`
/// is row `i / (width * bpp)`, column `(i / bpp) % width`, channel `i % bpp`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    color_mode: ColorMode,
    data: Vec<u8>,
}

/// Reshape a reconstructed buffer into a raster.
///
/// The buffer must hold exactly `height * width * bpp` bytes; nothing is
/// truncated or padded.
pub fn assemble(
    buffer: Vec<u8>,
    width: u32,
    height: u32,
    color_mode: ColorMode,
) -> Result<Raster> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(color_mode.bytes_per_pixel()))
        .ok_or(Error::ShapeMismatch {
            expected: usize::MAX,
            actual: buffer.len(),
        })?;
    if buffer.len() != expected {
        return Err(Error::ShapeMismatch {
            expected,
            actual: buffer.len(),
        });
    }

    log::debug!(
        "assembled {width}x{height}x{} raster",
        color_mode.bytes_per_pixel()
    );
    Ok(Raster {
        width,
        height,
        color_mode,
        data: buffer,
    })
}

impl Raster {
    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Color mode of the samples.
    #[inline]
    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    /// Bytes per pixel.
    #[inline]
    pub fn channels(&self) -> usize {
        self.color_mode.bytes_per_pixel()
    }

    /// `[height, width, channels]`.
    pub fn shape(&self) -> [usize; 3] {
        [self.height as usize, self.width as usize, self.channels()]
    }

    #[inline]
    fn row_len(&self) -> usize {
        self.width as usize * self.channels()
    }

    /// One sample, or `None` when any coordinate is out of range.
    pub fn get(&self, row: usize, col: usize, channel: usize) -> Option<u8> {
        self.pixel(row, col)?.get(channel).copied()
    }

    /// All channels of one pixel, or `None` when out of range.
    pub fn pixel(&self, row: usize, col: usize) -> Option<&[u8]> {
        if row >= self.height as usize || col >= self.width as usize {
            return None;
        }
        let bpp = self.channels();
        let start = row * self.row_len() + col * bpp;
        Some(&self.data[start..start + bpp])
    }

    /// Iterate rows top to bottom, each `width * channels()` bytes.
    pub fn rows(&self) -> Rows<'_> {
        Rows {
            data: &self.data,
            row_len: self.row_len(),
            remaining: self.height as usize,
        }
    }

    /// Flat sample bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the raster, returning the flat sample bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Copy into a nested `[row][column][channel]` grid.
    pub fn to_nested(&self) -> Vec<Vec<Vec<u8>>> {
        let bpp = self.channels();
        let width = self.width as usize;
        (0..self.height as usize)
            .map(|row| {
                let start = row * self.row_len();
                (0..width)
                    .map(|col| {
                        let at = start + col * bpp;
                        self.data[at..at + bpp].to_vec()
                    })
                    .collect()
            })
            .collect()
    }
}

impl Index<(usize, usize)> for Raster {
    type Output = [u8];

    /// Pixel at `(row, col)`. Panics when out of range.
    fn index(&self, (row, col): (usize, usize)) -> &[u8] {
        match self.pixel(row, col) {
            Some(px) => px,
            None => panic!(
                "pixel ({row}, {col}) out of range for {}x{} raster",
                self.width, self.height
            ),
        }
    }
}

/// Iterator over raster rows.
#[derive(Debug, Clone)]
pub struct Rows<'a> {
    data: &'a [u8],
    row_len: usize,
    remaining: usize,
}

impl<'a> Iterator for Rows<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let (row, rest) = self.data.split_at(self.row_len);
        self.data = rest;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Rows<'_> {}
