//! Scanline filter reconstruction.
//!
//! Each row of the decompressed stream starts with a filter selector byte
//! followed by `width * bpp` filtered bytes. Rows are reconstructed in order
//! into a single output buffer; every neighbor read (left, up, upper-left)
//! comes from bytes that buffer already holds in reconstructed form.

use std::fmt;

use crate::error::{Error, Result};

/// Scanline filter type selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FilterType {
    /// Raw bytes.
    None = 0,
    /// Difference from the byte one pixel to the left.
    Sub = 1,
    /// Difference from the byte above.
    Up = 2,
    /// Difference from the floor average of left and above.
    Average = 3,
    /// Difference from the Paeth predictor of left, above and upper-left.
    Paeth = 4,
}

impl FilterType {
    /// All selectors in numeric order.
    pub const ALL: [FilterType; 5] = [
        FilterType::None,
        FilterType::Sub,
        FilterType::Up,
        FilterType::Average,
        FilterType::Paeth,
    ];

    /// Decode a selector byte, returning `None` outside 0-4.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(FilterType::None),
            1 => Some(FilterType::Sub),
            2 => Some(FilterType::Up),
            3 => Some(FilterType::Average),
            4 => Some(FilterType::Paeth),
            _ => None,
        }
    }
}

impl From<FilterType> for u8 {
    fn from(filter: FilterType) -> Self {
        filter as u8
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterType::None => "None",
            FilterType::Sub => "Sub",
            FilterType::Up => "Up",
            FilterType::Average => "Average",
            FilterType::Paeth => "Paeth",
        };
        f.write_str(name)
    }
}

/// Length of the filtered stream for an image: one selector plus the row
/// bytes, per row. `None` on overflow.
pub fn filtered_len(width: u32, height: u32, bytes_per_pixel: usize) -> Option<usize> {
    (width as usize)
        .checked_mul(bytes_per_pixel)?
        .checked_add(1)?
        .checked_mul(height as usize)
}

/// Reconstruct every row of a filtered stream.
///
/// `filtered` must hold exactly `height * (1 + width * bytes_per_pixel)`
/// bytes. Returns the `height * width * bytes_per_pixel` reconstructed sample
/// bytes with selector bytes removed. A shape whose stream length overflows
/// `usize` reports `OutOfData` with `expected: usize::MAX`.
pub fn reconstruct(
    filtered: &[u8],
    width: u32,
    height: u32,
    bytes_per_pixel: usize,
) -> Result<Vec<u8>> {
    let expected = filtered_len(width, height, bytes_per_pixel).ok_or(Error::OutOfData {
        expected: usize::MAX,
        actual: filtered.len(),
    })?;
    let row_bytes = width as usize * bytes_per_pixel;

    if filtered.len() < expected {
        return Err(Error::OutOfData {
            expected,
            actual: filtered.len(),
        });
    }
    if filtered.len() > expected {
        return Err(Error::ExcessData {
            expected,
            actual: filtered.len(),
        });
    }

    let height = height as usize;
    let mut output = vec![0u8; row_bytes * height];
    let zero_row = vec![0u8; row_bytes];

    for (y, line) in filtered.chunks_exact(row_bytes + 1).enumerate() {
        let filter = FilterType::from_u8(line[0])
            .ok_or(Error::UnsupportedFilter { filter: line[0], row: y })?;

        let (done, rest) = output.split_at_mut(y * row_bytes);
        let prev = if y == 0 {
            &zero_row[..]
        } else {
            &done[(y - 1) * row_bytes..]
        };
        let row = &mut rest[..row_bytes];
        row.copy_from_slice(&line[1..]);

        log::trace!("row {y}: {filter}");
        unfilter_row(filter, row, prev, bytes_per_pixel);
    }

    Ok(output)
}

/// Reverse one row's filter in place.
///
/// `row` holds the filtered bytes on entry and the reconstructed bytes on
/// return. It is processed left to right, so `row[i - bpp]` is always
/// reconstructed by the time byte `i` reads it. `prev` is the reconstructed
/// row above (all zero for the first row).
pub fn unfilter_row(filter: FilterType, row: &mut [u8], prev: &[u8], bpp: usize) {
    debug_assert_eq!(row.len(), prev.len());
    match filter {
        FilterType::None => {}
        FilterType::Sub => {
            for i in bpp..row.len() {
                row[i] = row[i].wrapping_add(row[i - bpp]);
            }
        }
        FilterType::Up => {
            for (byte, &above) in row.iter_mut().zip(prev) {
                *byte = byte.wrapping_add(above);
            }
        }
        FilterType::Average => {
            for i in 0..row.len() {
                let left = if i >= bpp { row[i - bpp] as u16 } else { 0 };
                let above = prev[i] as u16;
                row[i] = row[i].wrapping_add(((left + above) / 2) as u8);
            }
        }
        FilterType::Paeth => {
            for i in 0..row.len() {
                let (left, upper_left) = if i >= bpp {
                    (row[i - bpp], prev[i - bpp])
                } else {
                    (0, 0)
                };
                row[i] = row[i].wrapping_add(paeth_predictor(left, prev[i], upper_left));
            }
        }
    }
}

/// Paeth predictor: whichever of left `a`, above `b`, upper-left `c` is
/// closest to `a + b - c`, ties resolved in the order `a`, `b`, `c`.
#[inline]
pub fn paeth_predictor(a: u8, b: u8, c: u8) -> u8 {
    let p = a as i16 + b as i16 - c as i16;
    let pa = (p - a as i16).abs();
    let pb = (p - b as i16).abs();
    let pc = (p - c as i16).abs();

    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}
