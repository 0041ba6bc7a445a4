//! Image obfuscation pipeline.
//!
//! A single fixed algorithm driven by an integer key:
//!
//! 1. Flatten the RGB8 buffer to per-pixel triples and reorder them with a
//!    key-seeded permutation over the pixel count.
//! 2. Split into R/G/B planes and XOR each with its key-derived byte mask.
//! 3. Re-emit the planes in the fixed rotated order G, B, R.
//!
//! The channel rotation is part of the obfuscation, not cosmetics; restore
//! reads the rotated planes back rather than fixing the order. Output is
//! always written as PNG by the caller; a lossy format would destroy the
//! exact byte values the inverse transform depends on.

use image::{DynamicImage, RgbImage};

use crate::error::ObfuscationError;
use crate::permute::{self, Seed};

/// Per-channel mask offsets for R, G, B. Compatibility constants.
const CHANNEL_OFFSETS: [u64; 3] = [37, 117, 231];

/// Derives the R/G/B byte masks from the key.
fn channel_masks(key: u64) -> [u8; 3] {
    [
        (key.wrapping_add(CHANNEL_OFFSETS[0]) % 256) as u8,
        (key.wrapping_add(CHANNEL_OFFSETS[1]) % 256) as u8,
        (key.wrapping_add(CHANNEL_OFFSETS[2]) % 256) as u8,
    ]
}

/// Normalizes any decoded raster to the RGB8 layout the pipeline operates
/// on. Grayscale input is broadcast across the three channels; alpha is
/// dropped.
pub fn normalize(image: &DynamicImage) -> RgbImage {
    image.to_rgb8()
}

/// Obfuscates an RGB8 image, returning the scrambled image and the pixel
/// permutation needed to invert it.
///
/// The input is borrowed; a new buffer is returned.
pub fn obfuscate(image: &RgbImage, key: u64) -> (RgbImage, Vec<u32>) {
    let (width, height) = image.dimensions();

    // Step 1: permute whole pixels.
    let pixels: Vec<[u8; 3]> = image.pixels().map(|p| p.0).collect();
    let permutation = permute::generate(pixels.len(), Seed::from_int(key));
    let shuffled = permute::apply(&pixels, &permutation);

    // Steps 2-3: mask each channel, emit planes rotated to G, B, R.
    let [r_mask, g_mask, b_mask] = channel_masks(key);
    let mut out = Vec::with_capacity(shuffled.len() * 3);
    for [r, g, b] in shuffled {
        out.push(g ^ g_mask);
        out.push(b ^ b_mask);
        out.push(r ^ r_mask);
    }

    let scrambled =
        RgbImage::from_raw(width, height, out).expect("buffer length matches dimensions");
    (scrambled, permutation)
}

/// Restores an image scrambled by [`obfuscate`], given the same key and the
/// sidecar permutation.
pub fn restore(
    image: &RgbImage,
    key: u64,
    permutation: &[u32],
) -> Result<RgbImage, ObfuscationError> {
    let (width, height) = image.dimensions();
    let pixels = (width as usize) * (height as usize);

    if permutation.len() != pixels {
        return Err(ObfuscationError::DimensionMismatch {
            width,
            height,
            pixels,
            permutation: permutation.len(),
        });
    }
    if !permute::is_permutation(permutation) {
        return Err(ObfuscationError::InvalidMetadata {
            field: "permutation_key",
            expected: format!("a bijection over 0..{pixels}"),
            actual: "out-of-range or duplicate indices".to_string(),
        });
    }

    // Steps 3-2 in reverse: undo the G, B, R rotation and the masks.
    let [r_mask, g_mask, b_mask] = channel_masks(key);
    let shuffled: Vec<[u8; 3]> = image
        .pixels()
        .map(|p| {
            let [g, b, r] = p.0;
            [r ^ r_mask, g ^ g_mask, b ^ b_mask]
        })
        .collect();

    // Step 1 in reverse: gather through the rank inverse.
    let restored = permute::apply(&shuffled, &permute::invert(permutation));

    let mut out = Vec::with_capacity(restored.len() * 3);
    for [r, g, b] in restored {
        out.push(r);
        out.push(g);
        out.push(b);
    }

    Ok(RgbImage::from_raw(width, height, out).expect("buffer length matches dimensions"))
}
