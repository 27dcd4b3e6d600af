//! Tests for saving collages including format selection and JPEG density

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use photocollage::CollageError;
    use photocollage::io::image::{SaveOptions, save_collage};

    const JFIF_MARKER: &[u8] = b"JFIF\0";

    fn sample() -> RgbImage {
        RgbImage::from_fn(16, 16, |x, y| Rgb([(x * 16) as u8, (y * 16) as u8, 64]))
    }

    // Units byte and X/Y density follow the marker and the two version bytes
    fn jfif_density(bytes: &[u8]) -> (u8, u16, u16) {
        let start = bytes
            .windows(JFIF_MARKER.len())
            .position(|w| w == JFIF_MARKER)
            .unwrap()
            + JFIF_MARKER.len()
            + 2;
        let field = &bytes[start..start + 5];
        (
            field[0],
            u16::from_be_bytes([field[1], field[2]]),
            u16::from_be_bytes([field[3], field[4]]),
        )
    }

    // Tests JPEG output carries a 300x300 DPI density by default
    // Verified by skipping set_pixel_density
    #[test]
    fn test_jpeg_has_dpi() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("collage.jpg");

        save_collage(&sample(), &path, &SaveOptions::default()).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(jfif_density(&bytes), (1, 300, 300));
        assert_eq!(image::open(&path).unwrap().to_rgb8().dimensions(), (16, 16));
    }

    // Tests density can be omitted
    // Verified by always writing the DPI
    #[test]
    fn test_jpeg_without_dpi() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.jpeg");
        let options = SaveOptions {
            dpi: None,
            ..SaveOptions::default()
        };

        save_collage(&sample(), &path, &options).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_ne!(jfif_density(&bytes).0, 1);
    }

    // Tests lossless formats round-trip pixels exactly and create parents
    // Verified by removing create_dir_all
    #[test]
    fn test_png_lossless_in_new_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("collage.png");

        save_collage(&sample(), &path, &SaveOptions::default()).unwrap();

        assert_eq!(image::open(&path).unwrap().to_rgb8(), sample());
    }

    // Tests unknown extensions are rejected without creating a file
    // Verified by defaulting unknown extensions to PNG
    #[test]
    fn test_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("collage.xyz");

        let result = save_collage(&sample(), &path, &SaveOptions::default());

        assert!(matches!(result, Err(CollageError::ImageExport { .. })));
        assert!(!path.exists());
    }

    // Tests out of range JPEG quality is rejected
    // Verified by removing the quality range check
    #[test]
    fn test_invalid_quality() {
        let dir = tempfile::tempdir().unwrap();
        let options = SaveOptions {
            jpeg_quality: 0,
            ..SaveOptions::default()
        };

        let result = save_collage(&sample(), &dir.path().join("q.jpg"), &options);

        assert!(matches!(
            result,
            Err(CollageError::InvalidParameter {
                parameter: "jpeg_quality",
                ..
            })
        ));
    }
}
