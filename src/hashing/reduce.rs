//! Square reduction of decoded images.
//!
//! # Overview
//!
//! [`reduce`] shrinks an arbitrary-aspect image to a small square grid in
//! one pass: center-crop to the shortest dimension, then nearest-neighbor
//! resample into the target size. No smoothing filter is applied; only the
//! coarse brightness layout matters to the fingerprint, so sample picking
//! beats interpolation on speed without hurting grouping quality.
//!
//! Sample coordinates that land outside the crop reflect back in across
//! the nearest edge (tile-flip), so edge cells mirror the image content
//! instead of repeating the border pixel.

use super::grid::PixelGrid;

/// Resize and center-crop an image into a `size x size` grid.
///
/// The centered `shortest x shortest` square of the source is resampled
/// with nearest-neighbor picking. The output is always exactly
/// `size x size`, regardless of the input aspect ratio; a 1x1 source is
/// valid and simply repeats its single pixel.
///
/// # Arguments
///
/// * `source` - Decoded image grid, at least 1x1
/// * `size` - Output side length
#[must_use]
pub fn reduce(source: &PixelGrid, size: u32) -> PixelGrid {
    let shortest = source.width().min(source.height());
    let x_offset = (source.width() - shortest) / 2;
    let y_offset = (source.height() - shortest) / 2;

    let mut pixels = Vec::with_capacity(size as usize * size as usize);
    for dy in 0..size {
        let sy = mirror(nearest(dy, shortest, size), shortest);
        for dx in 0..size {
            let sx = mirror(nearest(dx, shortest, size), shortest);
            pixels.push(source.get(x_offset + sx, y_offset + sy));
        }
    }

    PixelGrid::new(size, size, pixels)
}

/// Nearest source index for destination index `dst`.
///
/// Rounds to the closest source sample center; the result can land one
/// step past the end of the source range when upscaling, which the
/// caller folds back in with [`mirror`].
fn nearest(dst: u32, src_len: u32, dst_len: u32) -> u32 {
    let scaled = u64::from(dst) * u64::from(src_len) + u64::from(dst_len / 2);
    (scaled / u64::from(dst_len)) as u32
}

/// Reflect an index into `[0, len)` with tile-flip periodicity.
///
/// Index `len` maps to `len - 1`, `len + 1` to `len - 2`, and so on; the
/// pattern repeats with period `2 * len`.
fn mirror(idx: u32, len: u32) -> u32 {
    let period = 2 * len;
    let p = idx % period;
    if p < len {
        p
    } else {
        period - 1 - p
    }
}
