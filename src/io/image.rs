//! Writing finished collages to disk

use crate::io::configuration::{DEFAULT_JPEG_QUALITY, OUTPUT_DPI};
use crate::io::error::{CollageError, Result, invalid_parameter};
use image::codecs::jpeg::{JpegEncoder, PixelDensity};
use image::{ImageError, ImageFormat, RgbImage};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Encoding options for [`save_collage`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaveOptions {
    /// Pixel density tag, written for JPEG output only
    pub dpi: Option<u16>,
    /// JPEG quality, 1 to 100
    pub jpeg_quality: u8,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            dpi: Some(OUTPUT_DPI),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Save a composite, picking the format from the file extension
///
/// Missing parent directories are created first.
///
/// # Errors
///
/// Returns an error if:
/// - The JPEG quality is outside 1..=100
/// - The extension does not name a supported format
/// - The parent directory cannot be created
/// - Encoding or writing the file fails
pub fn save_collage(collage: &RgbImage, path: &Path, options: &SaveOptions) -> Result<()> {
    if !(1..=100).contains(&options.jpeg_quality) {
        return Err(invalid_parameter(
            "jpeg_quality",
            &options.jpeg_quality,
            &"must be between 1 and 100",
        ));
    }

    let export_error = |source| CollageError::ImageExport {
        path: path.to_path_buf(),
        source,
    };

    let format = ImageFormat::from_path(path).map_err(export_error)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| CollageError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    if format == ImageFormat::Jpeg {
        let file = File::create(path).map_err(|e| CollageError::FileSystem {
            path: path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;
        let mut writer = BufWriter::new(file);

        {
            let mut encoder = JpegEncoder::new_with_quality(&mut writer, options.jpeg_quality);
            if let Some(dpi) = options.dpi {
                encoder.set_pixel_density(PixelDensity::dpi(dpi));
            }
            encoder.encode_image(collage).map_err(export_error)?;
        }
        writer
            .flush()
            .map_err(|e| export_error(ImageError::IoError(e)))?;
    } else {
        collage
            .save_with_format(path, format)
            .map_err(export_error)?;
    }

    info!("saved collage to {}", path.display());
    Ok(())
}
