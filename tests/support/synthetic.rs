//! Synthetic test image generation.
//!
//! Deterministic RGB/RGBA patterns, interleaved row-major, for feeding the
//! PNG builder. `channels` is 3 or 4; the fourth channel is alpha.

#![allow(dead_code)]

/// Solid color image; alpha (if any) is opaque.
pub fn solid(width: u32, height: u32, channels: usize, rgb: [u8; 3]) -> Vec<u8> {
    let pixel_count = (width * height) as usize;
    let mut pixels = Vec::with_capacity(pixel_count * channels);
    for _ in 0..pixel_count {
        push_pixel(&mut pixels, channels, rgb, 255);
    }
    pixels
}

/// Red horizontal, green vertical, blue diagonal; alpha ramps down the rows.
pub fn gradient(width: u32, height: u32, channels: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((width * height) as usize * channels);
    for y in 0..height {
        let alpha = 255 - ((y * 255) / height.max(1)) as u8;
        for x in 0..width {
            let r = ((x * 255) / width.max(1)) as u8;
            let g = ((y * 255) / height.max(1)) as u8;
            let b = (((x + y) * 127) / (width + height).max(1)) as u8;
            push_pixel(&mut pixels, channels, [r, g, b], alpha);
        }
    }
    pixels
}

/// Two-color checkerboard with square cells.
pub fn checkerboard(width: u32, height: u32, channels: usize, cell_size: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((width * height) as usize * channels);
    let cell_size = cell_size.max(1);
    for y in 0..height {
        for x in 0..width {
            let v = if ((x / cell_size) + (y / cell_size)) % 2 == 0 {
                255
            } else {
                0
            };
            push_pixel(&mut pixels, channels, [v, v, v], 255 - v / 2);
        }
    }
    pixels
}

/// Pseudo-random noise from a simple LCG, deterministic for a seed.
pub fn noise(width: u32, height: u32, channels: usize, seed: u32) -> Vec<u8> {
    let len = (width * height) as usize * channels;
    let mut pixels = Vec::with_capacity(len);
    let mut state = seed;
    for _ in 0..len {
        state = state.wrapping_mul(1103515245).wrapping_add(12345);
        pixels.push((state >> 16) as u8);
    }
    pixels
}

fn push_pixel(pixels: &mut Vec<u8>, channels: usize, rgb: [u8; 3], alpha: u8) {
    pixels.extend_from_slice(&rgb);
    if channels == 4 {
        pixels.push(alpha);
    }
}
