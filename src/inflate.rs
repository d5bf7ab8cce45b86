//! zlib decompression of the concatenated IDAT stream.
//!
//! Thin wrapper over `flate2`; the inflate algorithm itself is not part of
//! this crate.

use std::io::Read;

use flate2::read::ZlibDecoder;

use crate::error::{Error, Result};

/// Inflate a complete zlib stream.
pub fn inflate(compressed: &[u8]) -> Result<Vec<u8>> {
    inflate_with_limit(compressed, usize::MAX)
}

/// Inflate a zlib stream, stopping once `limit` bytes have been produced.
///
/// Callers that know the expected size pass `expected + 1` so an oversized
/// stream is detected without inflating all of it.
pub fn inflate_with_limit(compressed: &[u8], limit: usize) -> Result<Vec<u8>> {
    if compressed.is_empty() {
        return Err(Error::Decompression("no compressed data".into()));
    }

    let capacity = limit.min(compressed.len().saturating_mul(4));
    let mut output = Vec::with_capacity(capacity);
    let limit = u64::try_from(limit).unwrap_or(u64::MAX);
    ZlibDecoder::new(compressed)
        .take(limit)
        .read_to_end(&mut output)
        .map_err(|e| Error::Decompression(e.to_string()))?;

    log::debug!(
        "inflated {} bytes into {} bytes",
        compressed.len(),
        output.len()
    );
    Ok(output)
}
