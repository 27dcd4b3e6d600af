//! Collage assembly: enumerate, shuffle, load tiles, paste into a square grid
//!
//! The eligible image count must fill the grid exactly. This is checked before
//! any tile is decoded or placed, so a mismatched directory never produces a
//! truncated or partially filled collage.

use crate::collage::source::SourceImageSet;
use crate::collage::tiles::{ProcessingMode, load_tiles};
use crate::io::configuration::MAX_COLLAGE_BYTES;
use crate::io::error::{CollageError, Result, invalid_parameter};
use crate::io::image::{SaveOptions, save_collage};
use crate::io::progress::TileProgress;
use image::{RgbImage, imageops};
use log::info;
use rand::Rng;
use std::path::{Path, PathBuf};

/// Builds square-grid collages from a directory of photos
#[derive(Clone)]
pub struct CollageBuilder {
    tile_size: u32,
    grid_dimension: u32,
    mode: ProcessingMode,
    progress: TileProgress,
}

impl CollageBuilder {
    /// Create a builder for a `grid_dimension` × `grid_dimension` grid of
    /// `tile_size` pixel tiles
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `tile_size` or `grid_dimension` is zero
    /// - The resulting RGB composite would exceed [`MAX_COLLAGE_BYTES`]
    pub fn new(tile_size: u32, grid_dimension: u32) -> Result<Self> {
        if tile_size == 0 {
            return Err(invalid_parameter(
                "tile_size",
                &tile_size,
                &"must be positive",
            ));
        }
        if grid_dimension == 0 {
            return Err(invalid_parameter(
                "grid_dimension",
                &grid_dimension,
                &"must be positive",
            ));
        }
        collage_edge(tile_size, grid_dimension)?;

        Ok(Self {
            tile_size,
            grid_dimension,
            mode: ProcessingMode::default(),
            progress: TileProgress::hidden(),
        })
    }

    /// Create a builder from the overall collage edge instead of the tile size
    ///
    /// The tile size is `collage_edge / grid_dimension`; any remainder is
    /// dropped, so the composite may be slightly smaller than requested.
    ///
    /// # Errors
    ///
    /// Returns an error if `grid_dimension` is zero or the edge is too small
    /// to give every tile at least one pixel
    pub fn from_collage_edge(collage_edge: u32, grid_dimension: u32) -> Result<Self> {
        if grid_dimension == 0 {
            return Err(invalid_parameter(
                "grid_dimension",
                &grid_dimension,
                &"must be positive",
            ));
        }
        let tile_size = collage_edge / grid_dimension;
        if tile_size == 0 {
            return Err(invalid_parameter(
                "collage_edge",
                &collage_edge,
                &format!("too small for a {grid_dimension}x{grid_dimension} grid"),
            ));
        }
        Self::new(tile_size, grid_dimension)
    }

    /// Choose how tiles are decoded
    #[must_use]
    pub const fn with_mode(mut self, mode: ProcessingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Report tile loading on the given progress tracker
    #[must_use]
    pub fn with_progress(mut self, progress: TileProgress) -> Self {
        self.progress = progress;
        self
    }

    /// Edge length of each tile in pixels
    pub const fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Number of tiles per row and column
    pub const fn grid_dimension(&self) -> u32 {
        self.grid_dimension
    }

    /// Configured decode scheduling
    pub const fn mode(&self) -> ProcessingMode {
        self.mode
    }

    /// Edge length of the finished collage in pixels
    pub const fn collage_edge(&self) -> u32 {
        self.tile_size * self.grid_dimension
    }

    /// Build a collage from `directory` with an unseeded shuffle
    ///
    /// # Errors
    ///
    /// See [`CollageBuilder::build_with_rng`]
    pub fn build(&self, directory: &Path) -> Result<RgbImage> {
        self.build_with_rng(directory, &mut rand::rng())
    }

    /// Build a collage from `directory`, shuffling with `rng`
    ///
    /// A seeded `rng` makes tile placement reproducible.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `directory` is missing or unreadable
    /// - It holds no eligible images
    /// - The eligible count is not exactly `grid_dimension²`
    /// - Any selected image fails to decode
    pub fn build_with_rng<R: Rng + ?Sized>(
        &self,
        directory: &Path,
        rng: &mut R,
    ) -> Result<RgbImage> {
        self.build_from_sources(SourceImageSet::scan(directory)?, rng)
    }

    /// Build a collage from an already scanned source set, shuffling with `rng`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The set is empty
    /// - Its count is not exactly `grid_dimension²`
    /// - Any selected image fails to decode
    pub fn build_from_sources<R: Rng + ?Sized>(
        &self,
        mut sources: SourceImageSet,
        rng: &mut R,
    ) -> Result<RgbImage> {
        sources.require_grid(self.grid_dimension)?;
        sources.shuffle(rng);
        self.build_from_paths(&sources.into_paths())
    }

    /// Build a collage from paths already in placement order
    ///
    /// Path `i` lands in row `i / n`, column `i % n`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path count is not exactly `grid_dimension²` or
    /// any image fails to decode
    pub fn build_from_paths(&self, paths: &[PathBuf]) -> Result<RgbImage> {
        let expected = self.tile_count();
        if paths.len() != expected {
            return Err(CollageError::ImageCountMismatch {
                found: paths.len(),
                expected: Some(expected),
            });
        }

        info!(
            "building {edge}x{edge} collage from {expected} tiles",
            edge = self.collage_edge()
        );

        self.progress.set_total(expected);
        let tiles = load_tiles(paths, self.tile_size, self.mode, &self.progress);
        self.progress.finish();

        compose(&tiles?, self.tile_size, self.grid_dimension)
    }

    const fn tile_count(&self) -> usize {
        self.grid_dimension as usize * self.grid_dimension as usize
    }
}

fn collage_edge(tile_size: u32, grid_dimension: u32) -> Result<u32> {
    tile_size
        .checked_mul(grid_dimension)
        .filter(|edge| collage_bytes(*edge) <= MAX_COLLAGE_BYTES)
        .ok_or_else(|| {
            invalid_parameter(
                "tile_size",
                &tile_size,
                &format!(
                    "a {grid_dimension}x{grid_dimension} grid would exceed the {MAX_COLLAGE_BYTES} byte collage limit"
                ),
            )
        })
}

// Three bytes per RGB pixel
fn collage_bytes(edge: u32) -> u64 {
    u64::from(edge).pow(2) * 3
}

/// Paste tiles into a fresh RGB composite in row-major order
///
/// Tile `i` is placed at pixel offset `(col * tile_size, row * tile_size)`
/// with `row = i / grid_dimension` and `col = i % grid_dimension`.
///
/// # Errors
///
/// Returns an error if:
/// - `tile_size` or `grid_dimension` is zero
/// - The tile count is not exactly `grid_dimension²`
/// - A tile is not `tile_size` × `tile_size`
/// - The composite would exceed [`MAX_COLLAGE_BYTES`]
pub fn compose(tiles: &[RgbImage], tile_size: u32, grid_dimension: u32) -> Result<RgbImage> {
    if tile_size == 0 || grid_dimension == 0 {
        return Err(invalid_parameter(
            "grid",
            &format!("{grid_dimension}x{tile_size}px"),
            &"tile size and grid dimension must be positive",
        ));
    }
    let expected = grid_dimension as usize * grid_dimension as usize;
    if tiles.len() != expected {
        return Err(CollageError::ImageCountMismatch {
            found: tiles.len(),
            expected: Some(expected),
        });
    }
    let edge = collage_edge(tile_size, grid_dimension)?;

    let mut composite = RgbImage::new(edge, edge);
    for (index, tile) in tiles.iter().enumerate() {
        if tile.dimensions() != (tile_size, tile_size) {
            let (width, height) = tile.dimensions();
            return Err(invalid_parameter(
                "tile",
                &format!("{width}x{height}"),
                &format!("tile {index} must be {tile_size}x{tile_size}"),
            ));
        }

        let index = index as u32;
        let row = index / grid_dimension;
        let col = index % grid_dimension;
        imageops::replace(
            &mut composite,
            tile,
            i64::from(col * tile_size),
            i64::from(row * tile_size),
        );
    }

    Ok(composite)
}

/// Build a collage from `directory` with an unseeded shuffle, decoding tiles
/// sequentially
///
/// # Errors
///
/// Returns an error for invalid parameters or any build failure described on
/// [`CollageBuilder::build_with_rng`]
pub fn build_collage(directory: &Path, tile_size: u32, grid_dimension: u32) -> Result<RgbImage> {
    CollageBuilder::new(tile_size, grid_dimension)?.build(directory)
}

/// Build a collage sized by its overall edge and write it to `output_path`
///
/// Returns the composite that was saved.
///
/// # Errors
///
/// Returns an error for invalid parameters, any build failure, or a failure
/// to write the output file
pub fn create_collage(
    directory: &Path,
    output_path: &Path,
    collage_edge: u32,
    grid_dimension: u32,
    options: &SaveOptions,
) -> Result<RgbImage> {
    let collage =
        CollageBuilder::from_collage_edge(collage_edge, grid_dimension)?.build(directory)?;
    save_collage(&collage, output_path, options)?;
    Ok(collage)
}
