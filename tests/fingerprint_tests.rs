use picdupe::hashing::{
    fingerprint, hash_grid, reduce, FingerprintError, PixelGrid, MAX_DETAIL_SIZE,
    MIN_DETAIL_SIZE,
};

fn gradient_grid(width: u32, height: u32) -> PixelGrid {
    let pixels = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                [
                    (x % 256) as u8,
                    (y % 256) as u8,
                    ((x * y) % 256) as u8,
                ]
            })
        })
        .collect();
    PixelGrid::new(width, height, pixels)
}

#[test]
fn test_repeated_hashing_is_deterministic() {
    let photo = gradient_grid(123, 77);

    for detail_size in [4, 8, 9, 16, 64] {
        let first = fingerprint(&photo, detail_size).unwrap();
        for _ in 0..5 {
            assert_eq!(
                fingerprint(&photo, detail_size).unwrap(),
                first,
                "detail size {} drifted",
                detail_size
            );
        }
    }
}

#[test]
fn test_detail_size_bounds_are_inclusive() {
    let photo = gradient_grid(50, 50);

    assert!(fingerprint(&photo, MIN_DETAIL_SIZE).is_ok());
    assert!(fingerprint(&photo, MAX_DETAIL_SIZE).is_ok());

    assert_eq!(
        fingerprint(&photo, MIN_DETAIL_SIZE - 1),
        Err(FingerprintError::DetailSizeOutOfRange(3))
    );
    assert_eq!(
        fingerprint(&photo, MAX_DETAIL_SIZE + 1),
        Err(FingerprintError::DetailSizeOutOfRange(65))
    );
}

#[test]
fn test_reduce_output_is_square_for_extreme_aspect_ratios() {
    for (width, height) in [(1, 1), (4000, 10), (10, 4000)] {
        let photo = gradient_grid(width, height);
        for size in [4, 8, 64] {
            let reduced = reduce(&photo, size);
            assert_eq!(reduced.width(), size, "{}x{} at size {}", width, height, size);
            assert_eq!(reduced.height(), size, "{}x{} at size {}", width, height, size);
        }
    }
}

#[test]
fn test_uniform_image_sets_every_reachable_bit() {
    // Every gray tone equals the average and the threshold comparison
    // includes equality, so each cell contributes a set bit.
    for color in [[0, 0, 0], [255, 255, 255], [17, 130, 201]] {
        let photo = PixelGrid::filled(32, 32, color);

        // Detail 4: 16 cells land on bits 17..=31 plus bit 0.
        assert_eq!(fingerprint(&photo, 4).unwrap(), 0xFFFE_0001);

        // Detail 8: 64 cells cover all 32 bit positions.
        assert_eq!(fingerprint(&photo, 8).unwrap(), 0xFFFF_FFFF);
    }
}

#[test]
fn test_cell_zero_lands_on_bit_zero() {
    // The raw bit index for the first cell is 32, one past the top of
    // the fingerprint; it wraps to bit 0. A grid whose only bright cell
    // is the first one pins that placement.
    let mut pixels = vec![[0u8, 0, 0]; 16];
    pixels[0] = [255, 255, 255];
    let grid = PixelGrid::new(4, 4, pixels);

    let fp = hash_grid(&grid, 4).unwrap();
    assert_eq!(fp & 1, 1, "first cell must set bit 0, got {:08x}", fp);
    // The dark cells (tone 0 < average) contribute nothing.
    assert_eq!(fp, 1);
}

#[test]
fn test_hashing_reduced_grid_matches_composed_fingerprint() {
    let photo = gradient_grid(200, 150);

    for detail_size in [4, 9, 32] {
        let reduced = reduce(&photo, detail_size);
        assert_eq!(
            hash_grid(&reduced, detail_size).unwrap(),
            fingerprint(&photo, detail_size).unwrap()
        );
    }
}

#[test]
fn test_fingerprint_survives_exact_rescale() {
    // Nearest-neighbor reduction of an image against a 2x pixel-doubled
    // version lands on the same samples, so the fingerprints agree.
    let small = gradient_grid(32, 32);
    let doubled_pixels = (0..64)
        .flat_map(|y| (0..64).map(move |x| (x, y)))
        .map(|(x, y)| small.get(x / 2, y / 2))
        .collect();
    let doubled = PixelGrid::new(64, 64, doubled_pixels);

    assert_eq!(
        fingerprint(&small, 8).unwrap(),
        fingerprint(&doubled, 8).unwrap()
    );
}

#[test]
fn test_distinct_layouts_produce_distinct_fingerprints() {
    let left_bright = PixelGrid::new(
        16,
        16,
        (0..16 * 16)
            .map(|i| if i % 16 < 8 { [240, 240, 240] } else { [10, 10, 10] })
            .collect(),
    );
    let top_bright = PixelGrid::new(
        16,
        16,
        (0..16 * 16)
            .map(|i| if i / 16 < 8 { [240, 240, 240] } else { [10, 10, 10] })
            .collect(),
    );

    assert_ne!(
        fingerprint(&left_bright, 8).unwrap(),
        fingerprint(&top_bright, 8).unwrap()
    );
}
