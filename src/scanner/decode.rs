//! Image decoding collaborator.
//!
//! Thin wrapper over the `image` crate that turns a file path into an
//! owned [`PixelGrid`] plus the original pixel area. Decode failures are
//! per-file and recoverable: the pipeline marks the record invalid and
//! moves on.

use std::path::Path;

use thiserror::Error;

use crate::hashing::PixelGrid;

/// Failed to read or decode a candidate file.
#[derive(Debug, Error)]
#[error("failed to decode {path}: {source}")]
pub struct DecodeError {
    /// Path of the file that failed to decode.
    pub path: String,
    /// The underlying decoder error.
    #[source]
    pub source: image::ImageError,
}

/// A successfully decoded photo.
#[derive(Debug, Clone)]
pub struct DecodedPhoto {
    /// Owned RGB pixel grid.
    pub grid: PixelGrid,
    /// Width x height of the original image, used as the canonical-copy
    /// tie-break when grouping.
    pub pixel_area: u64,
}

/// Decode a raster image file into an owned pixel grid.
///
/// # Errors
///
/// Returns [`DecodeError`] if the file is missing, unreadable, corrupt,
/// or not a supported raster format.
pub fn decode(path: &Path) -> Result<DecodedPhoto, DecodeError> {
    let img = image::open(path)
        .map_err(|source| DecodeError {
            path: path.display().to_string(),
            source,
        })?
        .to_rgb8();

    let pixel_area = u64::from(img.width()) * u64::from(img.height());
    Ok(DecodedPhoto {
        grid: PixelGrid::from_image(&img),
        pixel_area,
    })
}
