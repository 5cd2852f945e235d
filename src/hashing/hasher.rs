//! Average-threshold fingerprint computation.
//!
//! # Overview
//!
//! A reduced square grid is collapsed to a 32-bit fingerprint in two
//! passes: first every cell is converted to an 8-bit gray tone
//! (`0.3 R + 0.59 G + 0.11 B`, truncated) and summed, then each cell is
//! compared against the integer average and the comparison results are
//! packed into a `u32`. Two photos are duplicates exactly when their
//! fingerprints are bit-identical; there is no distance metric.
//!
//! The cell-to-bit mapping is `32 - k / pixels_per_bit` for cell index
//! `k`, reduced modulo 32. The raw value reaches 32 at `k = 0` and goes
//! negative once `k / pixels_per_bit` exceeds 32, so several cells can
//! alias onto one bit position. That aliasing is an accepted lossy
//! property of the fixed 32-bit output.

use super::grid::PixelGrid;
use super::{Fingerprint, FingerprintError, MAX_DETAIL_SIZE, MIN_DETAIL_SIZE};

/// Check a detail size against the supported `[4, 64]` range.
///
/// # Errors
///
/// Returns [`FingerprintError::DetailSizeOutOfRange`] for values outside
/// the range. Out-of-range values are never clamped: they signal a
/// configuration mistake and must surface to the caller.
pub fn validate_detail_size(detail_size: u32) -> Result<(), FingerprintError> {
    if (MIN_DETAIL_SIZE..=MAX_DETAIL_SIZE).contains(&detail_size) {
        Ok(())
    } else {
        Err(FingerprintError::DetailSizeOutOfRange(detail_size))
    }
}

/// Compute the fingerprint of a reduced `detail_size x detail_size` grid.
///
/// Deterministic: identical grids always produce identical fingerprints.
/// Gray tones are truncated to integers before summing, and the average
/// uses integer division, so no floating-point state leaks into the
/// result.
///
/// # Arguments
///
/// * `grid` - Square grid produced by [`reduce`](crate::hashing::reduce)
/// * `detail_size` - Side length of `grid`
///
/// # Errors
///
/// Returns [`FingerprintError::DetailSizeOutOfRange`] if `detail_size`
/// is outside `[4, 64]`.
pub fn hash_grid(grid: &PixelGrid, detail_size: u32) -> Result<Fingerprint, FingerprintError> {
    validate_detail_size(detail_size)?;
    debug_assert_eq!(grid.width(), detail_size, "grid width must match detail size");
    debug_assert_eq!(grid.height(), detail_size, "grid height must match detail size");

    let cell_count = detail_size * detail_size;
    let pixels_per_bit = (cell_count / 32).max(1);

    let mut tones = Vec::with_capacity(cell_count as usize);
    let mut sum: u64 = 0;
    for y in 0..detail_size {
        for x in 0..detail_size {
            let [r, g, b] = grid.get(x, y);
            let tone = gray_tone(r, g, b);
            sum += u64::from(tone);
            tones.push(tone);
        }
    }

    let average = sum / u64::from(cell_count);

    let mut hash: Fingerprint = 0;
    for (k, &tone) in tones.iter().enumerate() {
        if u64::from(tone) >= average {
            hash |= 1 << bit_position(k as u32, pixels_per_bit);
        }
    }

    Ok(hash)
}

/// Bit position for cell index `k`.
///
/// `32 - k / pixels_per_bit` reduced into `[0, 32)`: index 32 (at
/// `k = 0`) lands on bit 0, and negative raw indices wrap the same way.
fn bit_position(k: u32, pixels_per_bit: u32) -> u32 {
    (32 - i64::from(k / pixels_per_bit)).rem_euclid(32) as u32
}

/// Gray tone of one RGB sample, truncated to 8 bits.
///
/// Green-dominant weighting, matching human luminance sensitivity.
fn gray_tone(r: u8, g: u8, b: u8) -> u8 {
    (f64::from(r) * 0.3 + f64::from(g) * 0.59 + f64::from(b) * 0.11) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_tone_weighting() {
        assert_eq!(gray_tone(0, 0, 0), 0);
        assert_eq!(gray_tone(255, 255, 255), 255);
        // Pure channels: truncated weighted values.
        assert_eq!(gray_tone(255, 0, 0), 76); // 255 * 0.3 = 76.5
        assert_eq!(gray_tone(0, 255, 0), 150); // 255 * 0.59 = 150.45
        assert_eq!(gray_tone(0, 0, 255), 28); // 255 * 0.11 = 28.05
    }

    #[test]
    fn test_bit_position_top_index_aliases_bit_zero() {
        // k = 0 gives raw index 32, one past the top of a u32.
        assert_eq!(bit_position(0, 1), 0);
        assert_eq!(bit_position(1, 1), 31);
        assert_eq!(bit_position(32, 1), 0);
        // Raw index goes negative for large k and keeps wrapping.
        assert_eq!(bit_position(33, 1), 31);
        assert_eq!(bit_position(40, 2), 12);
    }

    #[test]
    fn test_validate_detail_size_range() {
        assert!(validate_detail_size(3).is_err());
        assert!(validate_detail_size(4).is_ok());
        assert!(validate_detail_size(64).is_ok());
        assert!(validate_detail_size(65).is_err());
        assert!(validate_detail_size(0).is_err());
    }

    #[test]
    fn test_hash_grid_rejects_out_of_range_detail_size() {
        let grid = PixelGrid::filled(8, 8, [0, 0, 0]);
        let err = hash_grid(&grid, 3).unwrap_err();
        assert!(matches!(err, FingerprintError::DetailSizeOutOfRange(3)));
    }

    #[test]
    fn test_hash_grid_uniform_image_sets_all_reachable_bits() {
        // Every tone equals the average, and >= includes equality, so
        // every reachable bit position is set. For detail size 4 the
        // 16 cells map to bits 17..=31 plus bit 0 (the alias of raw
        // index 32).
        let grid = PixelGrid::filled(4, 4, [200, 200, 200]);
        let hash = hash_grid(&grid, 4).unwrap();
        assert_eq!(hash, 0xFFFE_0001);
    }

    #[test]
    fn test_hash_grid_uniform_color_independent() {
        // Any uniform color yields the same all-reachable-bits value.
        let a = hash_grid(&PixelGrid::filled(4, 4, [0, 0, 0]), 4).unwrap();
        let b = hash_grid(&PixelGrid::filled(4, 4, [255, 0, 0]), 4).unwrap();
        let c = hash_grid(&PixelGrid::filled(4, 4, [13, 200, 77]), 4).unwrap();
        assert_eq!(a, 0xFFFE_0001);
        assert_eq!(b, a);
        assert_eq!(c, a);
    }

    #[test]
    fn test_hash_grid_deterministic() {
        let pixels: Vec<[u8; 3]> = (0..64)
            .map(|i| [(i * 3) as u8, (i * 7) as u8, (i * 11) as u8])
            .collect();
        let grid = PixelGrid::new(8, 8, pixels);

        let first = hash_grid(&grid, 8).unwrap();
        for _ in 0..10 {
            assert_eq!(hash_grid(&grid, 8).unwrap(), first);
        }
    }

    #[test]
    fn test_hash_grid_distinguishes_light_layouts() {
        // Top half bright vs bottom half bright: thresholding must land
        // on different bit patterns.
        let mut top = Vec::new();
        let mut bottom = Vec::new();
        for y in 0..8 {
            for _x in 0..8 {
                let bright = [230, 230, 230];
                let dark = [20, 20, 20];
                top.push(if y < 4 { bright } else { dark });
                bottom.push(if y < 4 { dark } else { bright });
            }
        }
        let hash_top = hash_grid(&PixelGrid::new(8, 8, top), 8).unwrap();
        let hash_bottom = hash_grid(&PixelGrid::new(8, 8, bottom), 8).unwrap();
        assert_ne!(hash_top, hash_bottom);
    }

    #[test]
    fn test_hash_grid_pixels_per_bit_floor() {
        // detail 8 -> 64 cells -> 2 cells per bit; detail 5 -> 25 cells
        // -> floor(25 / 32) = 0, lifted to 1.
        let grid8 = PixelGrid::filled(8, 8, [100, 100, 100]);
        let grid5 = PixelGrid::filled(5, 5, [100, 100, 100]);
        assert!(hash_grid(&grid8, 8).is_ok());
        assert!(hash_grid(&grid5, 5).is_ok());
    }

    #[test]
    fn test_hash_grid_max_detail_size() {
        let grid = PixelGrid::filled(64, 64, [128, 128, 128]);
        assert!(hash_grid(&grid, 64).is_ok());
    }
}
