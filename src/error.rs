//! Error types for the pngrid decoder.

use std::fmt;

/// Result type alias for pngrid operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding a PNG into a raster.
///
/// Decoding is all-or-nothing: the first violation found is returned and no
/// partial raster is ever produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Bad signature, missing header chunk, or malformed header payload.
    Format(String),
    /// Chunk framing runs past the end of the input.
    TruncatedInput {
        /// Offset of the chunk whose framing overruns the buffer.
        offset: usize,
        /// Bytes the chunk needs from `offset` onwards.
        needed: usize,
        /// Bytes actually left from `offset` onwards.
        available: usize,
    },
    /// Color mode, bit depth or header method outside the supported set.
    UnsupportedFormat(String),
    /// The concatenated data chunks are not a valid zlib stream.
    Decompression(String),
    /// A row selector outside 0-4.
    UnsupportedFilter {
        /// The selector byte found.
        filter: u8,
        /// Index of the row carrying it.
        row: usize,
    },
    /// Decompressed stream shorter than `height * (1 + width * bpp)`.
    OutOfData {
        /// Number of bytes the rows require.
        expected: usize,
        /// Number of bytes available.
        actual: usize,
    },
    /// Decompressed stream longer than `height * (1 + width * bpp)`.
    ExcessData {
        /// Number of bytes the rows require.
        expected: usize,
        /// Number of bytes available (may stop at `expected + 1`).
        actual: usize,
    },
    /// Reconstructed buffer length does not match `height * width * bpp`.
    ShapeMismatch {
        /// Number of bytes the shape requires.
        expected: usize,
        /// Number of bytes provided.
        actual: usize,
    },
    /// Image dimensions exceed the configured maximum.
    ImageTooLarge {
        /// Image width.
        width: u32,
        /// Image height.
        height: u32,
        /// Maximum supported dimension.
        max: u32,
    },
    /// Reading the input file failed.
    Io(String),
}

impl Error {
    /// Short name of the error category, as reported by the command line tool.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Format(_) => "FormatError",
            Error::TruncatedInput { .. } => "TruncatedInputError",
            Error::UnsupportedFormat(_) => "UnsupportedFormatError",
            Error::Decompression(_) => "DecompressionError",
            Error::UnsupportedFilter { .. } => "UnsupportedFilterError",
            Error::OutOfData { .. } => "OutOfDataError",
            Error::ExcessData { .. } => "ExcessDataError",
            Error::ShapeMismatch { .. } => "ShapeMismatchError",
            Error::ImageTooLarge { .. } => "ImageTooLargeError",
            Error::Io(_) => "IoError",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Format(msg) => write!(f, "invalid PNG: {msg}"),
            Error::TruncatedInput {
                offset,
                needed,
                available,
            } => write!(
                f,
                "truncated chunk at offset {offset}: needs {needed} bytes, {available} left"
            ),
            Error::UnsupportedFormat(msg) => write!(f, "unsupported format: {msg}"),
            Error::Decompression(msg) => write!(f, "decompression failed: {msg}"),
            Error::UnsupportedFilter { filter, row } => {
                write!(f, "unsupported filter type {filter} on row {row}")
            }
            Error::OutOfData { expected, actual } => write!(
                f,
                "decompressed data too short: expected {expected} bytes, got {actual}"
            ),
            Error::ExcessData { expected, actual } => write!(
                f,
                "decompressed data too long: expected {expected} bytes, got at least {actual}"
            ),
            Error::ShapeMismatch { expected, actual } => write!(
                f,
                "pixel buffer does not fit the image shape: expected {expected} bytes, got {actual}"
            ),
            Error::ImageTooLarge { width, height, max } => {
                write!(f, "image {width}x{height} exceeds maximum dimension {max}")
            }
            Error::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
