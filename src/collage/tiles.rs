//! Per-image tile pipeline: decode, orient, square-crop, resize

use crate::collage::crop::crop_to_square;
use crate::io::configuration::RESIZE_FILTER;
use crate::io::error::{Result, WithImagePath, invalid_parameter};
use crate::io::progress::TileProgress;
use image::{DynamicImage, GenericImageView, ImageDecoder, ImageReader, RgbImage};
use log::debug;
use rayon::prelude::*;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// How the per-image stage is scheduled
///
/// Passed explicitly into every build; there is no process-wide setting.
/// Builds decode sequentially unless a parallel mode is requested.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProcessingMode {
    /// Decode tiles one after another on the calling thread
    #[default]
    Sequential,
    /// Decode tiles on a rayon pool
    Parallel {
        /// Worker count; `None` uses the global pool sized to logical cores
        threads: Option<NonZeroUsize>,
    },
}

/// Decode an image and rotate it upright according to its metadata
///
/// # Errors
///
/// Returns an error if the file cannot be opened, its format is not
/// recognised, or decoding fails
pub fn load_oriented(path: &Path) -> Result<DynamicImage> {
    let mut decoder = ImageReader::open(path)
        .with_image_path(path)?
        .with_guessed_format()
        .with_image_path(path)?
        .into_decoder()
        .with_image_path(path)?;
    let orientation = decoder.orientation().with_image_path(path)?;

    let mut image = DynamicImage::from_decoder(decoder).with_image_path(path)?;
    image.apply_orientation(orientation);
    Ok(image)
}

/// Turn an upright image into a `tile_size` × `tile_size` RGB tile
pub fn make_tile(image: &DynamicImage, tile_size: u32) -> RgbImage {
    let square = crop_to_square(image);
    if GenericImageView::dimensions(&square) == (tile_size, tile_size) {
        return square.to_rgb8();
    }
    // The crop is already square, so an exact resize cannot distort it
    square
        .resize_exact(tile_size, tile_size, RESIZE_FILTER)
        .to_rgb8()
}

/// Load one source file as a finished tile
///
/// # Errors
///
/// Returns an error if the image cannot be decoded
pub fn load_tile(path: &Path, tile_size: u32) -> Result<RgbImage> {
    let image = load_oriented(path)?;
    Ok(make_tile(&image, tile_size))
}

/// Load every path as a tile, keeping the input order
///
/// Output slot `i` always holds the tile for `paths[i]`, whatever order the
/// workers finish in. The first decode failure aborts the whole batch.
///
/// # Errors
///
/// Returns an error if:
/// - Any image cannot be decoded
/// - A dedicated worker pool cannot be started
pub fn load_tiles(
    paths: &[PathBuf],
    tile_size: u32,
    mode: ProcessingMode,
    progress: &TileProgress,
) -> Result<Vec<RgbImage>> {
    debug!("loading {} tiles at {tile_size}px ({mode:?})", paths.len());

    let load = |path: &PathBuf| {
        let tile = load_tile(path, tile_size);
        progress.tile_done();
        tile
    };

    match mode {
        ProcessingMode::Sequential => paths.iter().map(load).collect(),
        // Indexed collect writes each result into its submission slot
        ProcessingMode::Parallel { threads: None } => paths.par_iter().map(load).collect(),
        ProcessingMode::Parallel {
            threads: Some(threads),
        } => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads.get())
                .build()
                .map_err(|e| invalid_parameter("threads", &threads, &e))?;
            pool.install(|| paths.par_iter().map(load).collect())
        }
    }
}
