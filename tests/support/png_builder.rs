//! Minimal PNG writer for tests.
//!
//! Applies forward scanline filters, compresses with `flate2` and frames the
//! result in chunks. Trailers are zero since the decoder does not check CRCs.

#![allow(dead_code)]

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use pngrid::chunk::PNG_SIGNATURE;
use pngrid::filter::{paeth_predictor, FilterType};

/// Apply one filter to `row`, appending the filtered bytes to `output`.
pub fn filter_row(filter: FilterType, row: &[u8], prev: &[u8], bpp: usize, output: &mut Vec<u8>) {
    for (i, &byte) in row.iter().enumerate() {
        let left = if i >= bpp { row[i - bpp] } else { 0 };
        let above = prev[i];
        let upper_left = if i >= bpp { prev[i - bpp] } else { 0 };
        let predicted = match filter {
            FilterType::None => 0,
            FilterType::Sub => left,
            FilterType::Up => above,
            FilterType::Average => ((left as u16 + above as u16) / 2) as u8,
            FilterType::Paeth => paeth_predictor(left, above, upper_left),
        };
        output.push(byte.wrapping_sub(predicted));
    }
}

/// Filter a whole image, prefixing each row with the selector `choose(y)`.
pub fn filter_image(
    pixels: &[u8],
    width: u32,
    height: u32,
    bpp: usize,
    choose: impl Fn(usize) -> FilterType,
) -> Vec<u8> {
    let row_bytes = width as usize * bpp;
    let zero_row = vec![0u8; row_bytes];
    let mut output = Vec::with_capacity((row_bytes + 1) * height as usize);
    for y in 0..height as usize {
        let row = &pixels[y * row_bytes..(y + 1) * row_bytes];
        let prev = if y == 0 {
            &zero_row[..]
        } else {
            &pixels[(y - 1) * row_bytes..y * row_bytes]
        };
        let filter = choose(y);
        output.push(u8::from(filter));
        filter_row(filter, row, prev, bpp, &mut output);
    }
    output
}

/// zlib-compress a byte stream.
pub fn zlib(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).expect("zlib write");
    encoder.finish().expect("zlib finish")
}

/// Append a chunk with a zero trailer.
pub fn push_chunk(output: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    output.extend_from_slice(&(data.len() as u32).to_be_bytes());
    output.extend_from_slice(chunk_type);
    output.extend_from_slice(data);
    output.extend_from_slice(&[0; 4]);
}

/// IHDR payload for an 8-bit non-interlaced image.
pub fn ihdr(width: u32, height: u32, color_type: u8) -> Vec<u8> {
    let mut out = Vec::with_capacity(13);
    out.extend_from_slice(&width.to_be_bytes());
    out.extend_from_slice(&height.to_be_bytes());
    out.extend_from_slice(&[8, color_type, 0, 0, 0]);
    out
}

/// Builder for PNG files around an already filtered stream.
#[derive(Debug, Clone)]
pub struct PngBuilder {
    width: u32,
    height: u32,
    color_type: u8,
    filtered: Vec<u8>,
    idat_split: Option<usize>,
    before_idat: Vec<([u8; 4], Vec<u8>)>,
    after_idat: Vec<([u8; 4], Vec<u8>)>,
}

impl PngBuilder {
    /// Start from a filtered stream (selector bytes included).
    pub fn new(width: u32, height: u32, color_type: u8, filtered: Vec<u8>) -> Self {
        Self {
            width,
            height,
            color_type,
            filtered,
            idat_split: None,
            before_idat: Vec::new(),
            after_idat: Vec::new(),
        }
    }

    /// Filter raw pixels with the per-row selector and start from the result.
    pub fn from_pixels(
        pixels: &[u8],
        width: u32,
        height: u32,
        color_type: u8,
        choose: impl Fn(usize) -> FilterType,
    ) -> Self {
        let bpp = if color_type == 6 { 4 } else { 3 };
        let filtered = filter_image(pixels, width, height, bpp, choose);
        Self::new(width, height, color_type, filtered)
    }

    /// Split the compressed stream into IDAT chunks of at most `size` bytes.
    pub fn idat_split(mut self, size: usize) -> Self {
        self.idat_split = Some(size.max(1));
        self
    }

    /// Insert an extra chunk between IHDR and the first IDAT.
    pub fn chunk_before_idat(mut self, chunk_type: &[u8; 4], data: &[u8]) -> Self {
        self.before_idat.push((*chunk_type, data.to_vec()));
        self
    }

    /// Insert an extra chunk between the last IDAT and IEND.
    pub fn chunk_after_idat(mut self, chunk_type: &[u8; 4], data: &[u8]) -> Self {
        self.after_idat.push((*chunk_type, data.to_vec()));
        self
    }

    /// Serialize the file.
    pub fn build(&self) -> Vec<u8> {
        let compressed = zlib(&self.filtered);
        let mut data = PNG_SIGNATURE.to_vec();
        push_chunk(&mut data, b"IHDR", &ihdr(self.width, self.height, self.color_type));
        for (tag, payload) in &self.before_idat {
            push_chunk(&mut data, tag, payload);
        }
        match self.idat_split {
            Some(size) => {
                for piece in compressed.chunks(size) {
                    push_chunk(&mut data, b"IDAT", piece);
                }
            }
            None => push_chunk(&mut data, b"IDAT", &compressed),
        }
        for (tag, payload) in &self.after_idat {
            push_chunk(&mut data, tag, payload);
        }
        push_chunk(&mut data, b"IEND", &[]);
        data
    }
}
