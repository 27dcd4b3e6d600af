//! Tests for tile decoding, resizing and order-preserving batch loading

#[cfg(test)]
mod tests {
    use crate::fixtures::{PALETTE, assert_close, quadrant_image, write_palette_set};
    use image::codecs::jpeg::JpegEncoder;
    use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
    use photocollage::CollageError;
    use photocollage::collage::tiles::{
        ProcessingMode, load_oriented, load_tile, load_tiles, make_tile,
    };
    use photocollage::io::progress::TileProgress;
    use std::num::NonZeroUsize;
    use std::path::Path;

    const GREEN: [u8; 3] = [0, 255, 0];
    const BLUE: [u8; 3] = [0, 0, 255];

    /// APP1 segment carrying a little-endian TIFF block with one Orientation tag
    fn exif_orientation_segment(orientation: u16) -> Vec<u8> {
        let mut tiff = b"II*\0".to_vec();
        tiff.extend_from_slice(&8_u32.to_le_bytes());
        tiff.extend_from_slice(&1_u16.to_le_bytes());
        // Tag 0x0112, type SHORT, one value, padded to four bytes
        tiff.extend_from_slice(&0x0112_u16.to_le_bytes());
        tiff.extend_from_slice(&3_u16.to_le_bytes());
        tiff.extend_from_slice(&1_u32.to_le_bytes());
        tiff.extend_from_slice(&u32::from(orientation).to_le_bytes());
        tiff.extend_from_slice(&0_u32.to_le_bytes());

        let length = u16::try_from(2 + 6 + tiff.len()).unwrap();
        let mut segment = vec![0xFF, 0xE1];
        segment.extend_from_slice(&length.to_be_bytes());
        segment.extend_from_slice(b"Exif\0\0");
        segment.extend_from_slice(&tiff);
        segment
    }

    /// Write a 64×32 JPEG, green on the left half and blue on the right
    fn write_split_jpeg(path: &Path, orientation: Option<u16>) {
        let raster = RgbImage::from_fn(64, 32, |x, _| Rgb(if x < 32 { GREEN } else { BLUE }));
        let mut encoded = Vec::new();
        JpegEncoder::new_with_quality(&mut encoded, 100)
            .encode_image(&raster)
            .unwrap();

        // Metadata segments follow the start-of-image marker
        let (start, rest) = encoded.split_at(2);
        let mut file = start.to_vec();
        if let Some(orientation) = orientation {
            file.extend(exif_orientation_segment(orientation));
        }
        file.extend_from_slice(rest);
        std::fs::write(path, file).unwrap();
    }

    /// Lossy-codec colour comparison
    fn assert_near(actual: Rgb<u8>, expected: [u8; 3]) {
        for (a, e) in actual.0.iter().zip(expected) {
            assert!(
                a.abs_diff(e) <= 24,
                "pixel {actual:?} is not near {expected:?}"
            );
        }
    }

    // Tests 600x400 source becomes an undistorted 100x100 tile
    // Verified by resizing without cropping first
    #[test]
    fn test_make_tile_crops_then_resizes() {
        let image = DynamicImage::ImageRgb8(quadrant_image());

        let tile = make_tile(&image, 100);

        assert_eq!(tile.dimensions(), (100, 100));
        assert_close(*tile.get_pixel(0, 0), [0, 255, 0]);
        assert_close(*tile.get_pixel(99, 0), [0, 0, 255]);
        assert_close(*tile.get_pixel(0, 99), [255, 255, 0]);
        assert_close(*tile.get_pixel(99, 99), [255, 0, 255]);
    }

    // Tests enlarging a small crop still yields the exact tile size
    // Verified by using a fit resize that rounds dimensions
    #[test]
    fn test_make_tile_upscales() {
        let image = DynamicImage::new_rgb8(7, 3);

        let tile = make_tile(&image, 20);

        assert_eq!(tile.dimensions(), (20, 20));
    }

    // Tests decoding a file keeps its upright dimensions
    // Verified by transposing the decoded image
    #[test]
    fn test_load_oriented_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_palette_set(dir.path(), 2);

        let image = load_oriented(&paths[1]).unwrap();

        assert_eq!(GenericImageView::dimensions(&image), (24, 40));
    }

    // Tests EXIF orientation turns a landscape raster upright before cropping
    // Verified by skipping apply_orientation
    #[test]
    fn test_load_oriented_applies_exif_rotation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rotated.jpg");
        write_split_jpeg(&path, Some(6));

        let image = load_oriented(&path).unwrap();
        assert_eq!(GenericImageView::dimensions(&image), (32, 64));

        // Rotated clockwise, the green left half becomes the top half
        let tile = make_tile(&image, 32);
        assert_near(*tile.get_pixel(16, 4), GREEN);
        assert_near(*tile.get_pixel(16, 27), BLUE);
    }

    // Tests a JPEG without orientation metadata is left as stored
    // Verified by always rotating JPEG sources
    #[test]
    fn test_load_oriented_without_exif() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.jpg");
        write_split_jpeg(&path, None);

        let image = load_oriented(&path).unwrap();
        assert_eq!(GenericImageView::dimensions(&image), (64, 32));

        let tile = make_tile(&image, 32);
        assert_near(*tile.get_pixel(4, 16), GREEN);
        assert_near(*tile.get_pixel(27, 16), BLUE);
    }

    // Tests undecodable file reports the offending path
    // Verified by dropping the path from the error
    #[test]
    fn test_load_tile_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"definitely not a jpeg").unwrap();

        let result = load_tile(&path, 8);

        assert!(matches!(
            result,
            Err(CollageError::ImageDecode { path: failed, .. }) if failed == path
        ));
    }

    // Tests sequential and parallel loading return tiles in input order
    // Verified by collecting parallel results in completion order
    #[test]
    fn test_load_tiles_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = write_palette_set(dir.path(), 9);
        paths.reverse();

        let modes = [
            ProcessingMode::Sequential,
            ProcessingMode::Parallel { threads: None },
            ProcessingMode::Parallel {
                threads: NonZeroUsize::new(3),
            },
        ];

        for mode in modes {
            let tiles = load_tiles(&paths, 6, mode, &TileProgress::hidden()).unwrap();
            assert_eq!(tiles.len(), 9);
            for (tile, color) in tiles.iter().zip(PALETTE.iter().take(9).rev()) {
                assert_eq!(tile.dimensions(), (6, 6));
                assert_close(*tile.get_pixel(3, 3), *color);
            }
        }
    }

    // Tests one bad file fails the whole batch in both modes
    // Verified by filtering out failed tiles
    #[test]
    fn test_load_tiles_aborts_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = write_palette_set(dir.path(), 3);
        let broken = dir.path().join("broken.png");
        std::fs::write(&broken, b"garbage").unwrap();
        paths.push(broken);

        let modes = [
            ProcessingMode::Sequential,
            ProcessingMode::Parallel { threads: None },
        ];

        for mode in modes {
            let result = load_tiles(&paths, 4, mode, &TileProgress::hidden());
            assert!(matches!(result, Err(CollageError::ImageDecode { .. })));
        }
    }

    // Tests each loaded tile advances the progress tracker once from any worker
    // Verified by ticking progress before loading
    #[test]
    fn test_load_tiles_reports_progress() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_palette_set(dir.path(), 4);
        let modes = [
            ProcessingMode::Sequential,
            ProcessingMode::Parallel { threads: None },
        ];

        for mode in modes {
            let progress = TileProgress::hidden();
            load_tiles(&paths, 4, mode, &progress).unwrap();
            assert_eq!(progress.position(), 4);
        }
    }

    // Tests tiles decode on the calling thread unless parallel is requested
    // Verified by defaulting to the global rayon pool
    #[test]
    fn test_default_mode_is_sequential() {
        assert_eq!(ProcessingMode::default(), ProcessingMode::Sequential);
    }
}
