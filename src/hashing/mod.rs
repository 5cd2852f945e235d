//! Perceptual fingerprinting core.
//!
//! # Overview
//!
//! This module reduces a decoded photo to a 32-bit perceptual
//! fingerprint:
//!
//! 1. [`reduce`]: center-crop to a square and nearest-neighbor resample
//!    to `detail_size x detail_size` (see [`reduce`] for the edge
//!    policy).
//! 2. [`hash_grid`]: grayscale each cell, threshold against the grid's
//!    average tone, and pack the comparison bits into a [`Fingerprint`].
//!
//! Visually identical photos (same image saved twice, recompressed, or
//! trivially rescaled) collapse to the same fingerprint; grouping then
//! reduces to exact integer equality. The pipeline is pure and
//! stateless: both stages are safe to run per-file across a thread pool
//! with no shared mutable state.
//!
//! # Example
//!
//! ```
//! use picdupe::hashing::{fingerprint, PixelGrid};
//!
//! let photo = PixelGrid::filled(100, 60, [180, 40, 90]);
//! let fp = fingerprint(&photo, 8).unwrap();
//! assert_eq!(fingerprint(&photo, 8).unwrap(), fp);
//! ```

pub mod grid;
pub mod hasher;
pub mod reduce;

pub use grid::PixelGrid;
pub use hasher::{hash_grid, validate_detail_size};
pub use reduce::reduce;

use thiserror::Error;

/// A 32-bit perceptual fingerprint.
///
/// Bit `i` records whether the corresponding grid cell's gray tone was
/// at least the grid's average tone. Equality is the only comparison
/// that matters: identical fingerprints mean duplicate photos.
pub type Fingerprint = u32;

/// Smallest supported detail size.
pub const MIN_DETAIL_SIZE: u32 = 4;

/// Largest supported detail size.
pub const MAX_DETAIL_SIZE: u32 = 64;

/// Default detail size when none is configured.
pub const DEFAULT_DETAIL_SIZE: u32 = 8;

/// Errors from the fingerprinting core.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FingerprintError {
    /// The configured detail size is outside the supported range.
    #[error("detail size {0} is out of range ({MIN_DETAIL_SIZE}..={MAX_DETAIL_SIZE})")]
    DetailSizeOutOfRange(u32),
}

/// Compute the fingerprint of a decoded photo.
///
/// Composition of [`reduce`] and [`hash_grid`]. The detail size is
/// validated up front so a misconfiguration fails before any resampling
/// work happens.
///
/// # Arguments
///
/// * `image` - Decoded photo, at least 1x1
/// * `detail_size` - Square grid side length, in `[4, 64]`
///
/// # Errors
///
/// Returns [`FingerprintError::DetailSizeOutOfRange`] if `detail_size`
/// is outside `[4, 64]`.
pub fn fingerprint(image: &PixelGrid, detail_size: u32) -> Result<Fingerprint, FingerprintError> {
    validate_detail_size(detail_size)?;
    let grid = reduce(image, detail_size);
    hash_grid(&grid, detail_size)
}

/// Fingerprint as a fixed-width hex string, for reports.
#[must_use]
pub fn fingerprint_hex(fp: Fingerprint) -> String {
    format!("{:08x}", fp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_validates_before_reducing() {
        let photo = PixelGrid::filled(10, 10, [50, 50, 50]);
        assert_eq!(
            fingerprint(&photo, 65),
            Err(FingerprintError::DetailSizeOutOfRange(65))
        );
        assert_eq!(
            fingerprint(&photo, 0),
            Err(FingerprintError::DetailSizeOutOfRange(0))
        );
    }

    #[test]
    fn test_fingerprint_accepts_range_bounds() {
        let photo = PixelGrid::filled(100, 80, [50, 120, 200]);
        assert!(fingerprint(&photo, 4).is_ok());
        assert!(fingerprint(&photo, 64).is_ok());
    }

    #[test]
    fn test_fingerprint_deterministic_across_calls() {
        let pixels: Vec<[u8; 3]> = (0..30 * 20)
            .map(|i| [(i % 251) as u8, (i % 241) as u8, (i % 239) as u8])
            .collect();
        let photo = PixelGrid::new(30, 20, pixels);

        let first = fingerprint(&photo, 9).unwrap();
        assert_eq!(fingerprint(&photo, 9).unwrap(), first);
    }

    #[test]
    fn test_fingerprint_hex_width() {
        assert_eq!(fingerprint_hex(0), "00000000");
        assert_eq!(fingerprint_hex(0xFFFE_0001), "fffe0001");
    }

    #[test]
    fn test_error_message_names_range() {
        let err = FingerprintError::DetailSizeOutOfRange(99);
        assert_eq!(err.to_string(), "detail size 99 is out of range (4..=64)");
    }
}
