//! Fuzz target for PNG decoding.
//!
//! Tests that decoding arbitrary bytes returns an error or a raster whose
//! shape matches its header, and never panics.

#![no_main]

use libfuzzer_sys::fuzz_target;
use pngrid::{DecodeOptions, Error};

fuzz_target!(|data: &[u8]| {
    // Keep allocations small; huge headers fail before inflating.
    let options = DecodeOptions::default().with_max_dimension(4096);

    match pngrid::decode_with_options(data, &options) {
        Ok(raster) => {
            let [h, w, c] = raster.shape();
            assert_eq!(raster.as_bytes().len(), h * w * c);
        }
        Err(Error::Io(_)) => unreachable!("decoding from memory does no I/O"),
        Err(_) => {}
    }
});
