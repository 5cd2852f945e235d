//! Owned pixel grid used by the fingerprinting pipeline.
//!
//! Decoded images are copied into a [`PixelGrid`] before any sampling
//! happens, so all downstream access is bounds-checked indexing into an
//! owned buffer rather than raw pointer walks over a decoder-owned
//! bitmap. Row stride is implicit: the buffer is exactly
//! `width * height` RGB triples in row-major order.

use image::RgbImage;

/// Immutable width x height grid of 8-bit RGB samples.
///
/// Invariants: `width > 0`, `height > 0`, and the backing buffer holds
/// exactly `width * height` pixels. Grids produced by
/// [`reduce`](crate::hashing::reduce) are always square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl PixelGrid {
    /// Create a grid from a row-major pixel buffer.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions are zero or the buffer length does not
    /// equal `width * height`.
    #[must_use]
    pub fn new(width: u32, height: u32, pixels: Vec<[u8; 3]>) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be non-zero");
        assert_eq!(
            pixels.len(),
            width as usize * height as usize,
            "pixel buffer length must match grid dimensions"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a grid filled with a single color.
    ///
    /// Mostly useful in tests and benchmarks.
    #[must_use]
    pub fn filled(width: u32, height: u32, color: [u8; 3]) -> Self {
        Self::new(
            width,
            height,
            vec![color; width as usize * height as usize],
        )
    }

    /// Copy a decoded image into an owned grid.
    #[must_use]
    pub fn from_image(img: &RgbImage) -> Self {
        let pixels = img.pixels().map(|p| p.0).collect();
        Self::new(img.width(), img.height(), pixels)
    }

    /// Grid width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels (`width * height`).
    #[must_use]
    pub fn pixel_area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// The RGB sample at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the grid.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        assert!(x < self.width && y < self.height, "pixel coordinate out of bounds");
        self.pixels[y as usize * self.width as usize + x as usize]
    }
}
