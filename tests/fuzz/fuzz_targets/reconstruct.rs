//! Fuzz target for scanline reconstruction.
//!
//! Feeds structured filtered streams straight to the reconstructor.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pngrid::filter::{filtered_len, reconstruct};
use pngrid::Error;

/// Structured input for reconstruction fuzzing.
#[derive(Arbitrary, Debug)]
struct ReconstructInput {
    /// Image width (clamped to 0-63)
    width: u8,
    /// Image height (clamped to 0-63)
    height: u8,
    /// Alpha channel present
    alpha: bool,
    /// Filtered stream, selector bytes included
    data: Vec<u8>,
}

fuzz_target!(|input: ReconstructInput| {
    let width = (input.width % 64) as u32;
    let height = (input.height % 64) as u32;
    let bpp = if input.alpha { 4 } else { 3 };
    let expected = filtered_len(width, height, bpp).unwrap();

    match reconstruct(&input.data, width, height, bpp) {
        Ok(out) => {
            assert_eq!(input.data.len(), expected);
            assert_eq!(out.len(), width as usize * height as usize * bpp);
        }
        Err(Error::OutOfData { .. }) => assert!(input.data.len() < expected),
        Err(Error::ExcessData { .. }) => assert!(input.data.len() > expected),
        Err(Error::UnsupportedFilter { filter, .. }) => assert!(filter > 4),
        Err(e) => panic!("unexpected error: {e}"),
    }
});
