//! PNG chunk framing.
//!
//! A PNG file is an 8-byte signature followed by chunks laid out as
//! `length (u32 BE) | type (4 ASCII bytes) | payload | CRC (4 bytes)`.
//! The reader walks them with a cursor over the borrowed input; payloads are
//! never copied and the CRC trailer is consumed but not checked.

use std::fmt;

use crate::error::{Error, Result};

/// PNG file signature (magic bytes).
pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Bytes of framing around every payload: length, type and trailer.
pub const CHUNK_OVERHEAD: usize = 12;

/// Four-byte chunk type tag.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkType(pub [u8; 4]);

impl ChunkType {
    /// Image header.
    pub const IHDR: ChunkType = ChunkType(*b"IHDR");
    /// Image data.
    pub const IDAT: ChunkType = ChunkType(*b"IDAT");
    /// Image trailer.
    pub const IEND: ChunkType = ChunkType(*b"IEND");

    /// Raw tag bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Critical chunks have an uppercase first letter (bit 5 clear).
    #[inline]
    pub const fn is_critical(&self) -> bool {
        self.0[0] & 0x20 == 0
    }

    /// Ancillary chunks may be skipped by decoders that do not know them.
    #[inline]
    pub const fn is_ancillary(&self) -> bool {
        !self.is_critical()
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkType({self})")
    }
}

/// One chunk, borrowing its payload from the input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// Declared payload length.
    pub length: u32,
    /// Type tag.
    pub chunk_type: ChunkType,
    /// Payload, exactly `length` bytes.
    pub data: &'a [u8],
    /// Trailer bytes (CRC in a well-formed file), not validated.
    pub crc: [u8; 4],
    /// Offset of the length field within the input.
    pub offset: usize,
}

impl Chunk<'_> {
    /// Bytes the chunk occupies in the stream (`length + 12`).
    #[inline]
    pub fn encoded_len(&self) -> usize {
        self.data.len() + CHUNK_OVERHEAD
    }
}

#[inline]
pub(crate) fn read_u32_be(bytes: &[u8], at: usize) -> u32 {
    u32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Verify the 8-byte signature at the start of `data`.
pub fn check_signature(data: &[u8]) -> Result<()> {
    if data.len() < PNG_SIGNATURE.len() || data[..PNG_SIGNATURE.len()] != PNG_SIGNATURE {
        return Err(Error::Format("invalid PNG signature".into()));
    }
    Ok(())
}

/// Lazy chunk iterator over a PNG byte buffer.
///
/// Yields chunks in file order until the input is exhausted. The first framing
/// error is yielded once and ends the iteration.
#[derive(Debug, Clone)]
pub struct ChunkReader<'a> {
    data: &'a [u8],
    pos: usize,
    done: bool,
}

impl<'a> ChunkReader<'a> {
    /// Check the signature and position the cursor on the first chunk.
    pub fn new(data: &'a [u8]) -> Result<Self> {
        check_signature(data)?;
        Ok(Self {
            data,
            pos: PNG_SIGNATURE.len(),
            done: false,
        })
    }

    /// Offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn read_chunk(&mut self) -> Result<Chunk<'a>> {
        let offset = self.pos;
        let available = self.data.len() - offset;
        if available < 8 {
            return Err(Error::TruncatedInput {
                offset,
                needed: CHUNK_OVERHEAD,
                available,
            });
        }

        let length = read_u32_be(self.data, offset);
        let needed = (length as usize)
            .checked_add(CHUNK_OVERHEAD)
            .unwrap_or(usize::MAX);
        if needed > available {
            return Err(Error::TruncatedInput {
                offset,
                needed,
                available,
            });
        }

        let type_start = offset + 4;
        let data_start = offset + 8;
        let data_end = data_start + length as usize;
        let chunk_type = ChunkType([
            self.data[type_start],
            self.data[type_start + 1],
            self.data[type_start + 2],
            self.data[type_start + 3],
        ]);
        let crc = [
            self.data[data_end],
            self.data[data_end + 1],
            self.data[data_end + 2],
            self.data[data_end + 3],
        ];

        self.pos = offset + needed;
        log::trace!("chunk {chunk_type} at offset {offset}, {length} bytes");

        Ok(Chunk {
            length,
            chunk_type,
            data: &self.data[data_start..data_end],
            crc,
            offset,
        })
    }
}

impl<'a> Iterator for ChunkReader<'a> {
    type Item = Result<Chunk<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.pos >= self.data.len() {
            return None;
        }
        let chunk = self.read_chunk();
        if chunk.is_err() {
            self.done = true;
        }
        Some(chunk)
    }
}

/// Parse a whole PNG buffer into its chunks.
///
/// Fails without returning any chunk if the signature is wrong or any chunk
/// overruns the buffer.
pub fn parse(data: &[u8]) -> Result<Vec<Chunk<'_>>> {
    let chunks = ChunkReader::new(data)?.collect::<Result<Vec<_>>>()?;
    log::debug!("parsed {} chunks from {} bytes", chunks.len(), data.len());
    Ok(chunks)
}
