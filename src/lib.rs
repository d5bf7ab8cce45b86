//! # pngrid
//!
//! Decode 8-bit truecolor PNG files into a `[row][column][channel]` grid of
//! samples.
//!
//! The decoder is a straight pipeline, each stage usable on its own:
//!
//! 1. [`chunk::parse`] checks the signature and splits the file into chunks.
//! 2. [`store::extract`] reads the IHDR header and joins the IDAT payloads.
//! 3. [`inflate::inflate`] decompresses the zlib stream.
//! 4. [`filter::reconstruct`] reverses the per-row scanline filters.
//! 5. [`raster::assemble`] reshapes the samples into a [`Raster`].
//!
//! Supported: color types 2 (RGB) and 6 (RGBA) at 8 bits per sample,
//! non-interlaced. CRCs are not checked.
//!
//! ## Example
//!
//! ```no_run
//! let bytes = std::fs::read("image.png").unwrap();
//! let raster = pngrid::decode(&bytes).unwrap();
//! println!("{}x{} {}", raster.width(), raster.height(), raster.color_mode());
//! let [r, g, b] = [0, 1, 2].map(|c| raster.get(0, 0, c).unwrap());
//! println!("top-left pixel: {r} {g} {b}");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod chunk;
pub mod color;
pub mod decode;
pub mod error;
pub mod filter;
pub mod inflate;
pub mod raster;
pub mod store;

pub use color::ColorMode;
pub use decode::{decode, decode_file, decode_with_options, DecodeOptions};
pub use error::{Error, Result};
pub use raster::Raster;
pub use store::ImageHeader;
