//! Command-line front end for building and saving a collage

use crate::collage::builder::CollageBuilder;
use crate::collage::source::SourceImageSet;
use crate::collage::tiles::ProcessingMode;
use crate::io::configuration::{
    DEFAULT_COLLAGE_EDGE, DEFAULT_JPEG_QUALITY, DEFAULT_OUTPUT_PATH, OUTPUT_DPI,
};
use crate::io::error::Result;
use crate::io::image::{SaveOptions, save_collage};
use crate::io::progress::TileProgress;
use clap::Parser;
use log::{LevelFilter, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "photocollage")]
#[command(
    author,
    version,
    about = "Arrange a folder of photos into a shuffled square collage"
)]
/// Command-line arguments for the collage tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Folder containing the source photos
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Where to write the collage; the format follows the extension
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Tiles per row and column (inferred from the photo count if omitted)
    #[arg(short, long)]
    pub grid: Option<u32>,

    /// Edge length of each tile in pixels
    #[arg(short, long, conflicts_with = "edge")]
    pub tile_size: Option<u32>,

    /// Edge length of the whole collage in pixels
    #[arg(short, long)]
    pub edge: Option<u32>,

    /// Seed for a reproducible arrangement
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Decode photos on a pool sized to the logical core count
    #[arg(short, long)]
    pub parallel: bool,

    /// Decode photos on this many threads (implies --parallel)
    #[arg(short, long)]
    pub jobs: Option<NonZeroUsize>,

    /// Pixel density written into JPEG output
    #[arg(long, default_value_t = OUTPUT_DPI, conflicts_with = "no_dpi")]
    pub dpi: u16,

    /// Omit the pixel density tag
    #[arg(long)]
    pub no_dpi: bool,

    /// JPEG quality (1-100)
    #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log build details
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Decode scheduling selected by `--parallel` and `--jobs`
    ///
    /// Photos are decoded sequentially unless either flag is given.
    pub const fn processing_mode(&self) -> ProcessingMode {
        if self.parallel || self.jobs.is_some() {
            ProcessingMode::Parallel { threads: self.jobs }
        } else {
            ProcessingMode::Sequential
        }
    }

    /// Encoding options selected by `--dpi`, `--no-dpi` and `--quality`
    pub const fn save_options(&self) -> SaveOptions {
        SaveOptions {
            dpi: if self.no_dpi { None } else { Some(self.dpi) },
            jpeg_quality: self.quality,
        }
    }

    /// Default log level when `RUST_LOG` is not set
    pub const fn log_level(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Error
        } else if self.verbose {
            LevelFilter::Info
        } else {
            LevelFilter::Warn
        }
    }
}

/// Runs one build-and-save cycle for the parsed arguments
pub struct CollageRunner {
    cli: Cli,
}

impl CollageRunner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Build the collage and save it, returning the output path
    ///
    /// # Errors
    ///
    /// Returns an error if the source folder is unusable, the parameters are
    /// invalid, any photo fails to decode, or the output cannot be written
    pub fn run(&self) -> Result<PathBuf> {
        let sources = SourceImageSet::scan(&self.cli.source)?;
        let builder = self.builder_for(&sources)?;

        let mut rng = self
            .cli
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let collage = builder.build_from_sources(sources, &mut rng)?;

        save_collage(&collage, &self.cli.output, &self.cli.save_options())?;

        // Allow print for user feedback on success
        #[allow(clippy::print_stdout)]
        if !self.cli.quiet {
            println!("Collage saved to {}", self.cli.output.display());
        }

        Ok(self.cli.output.clone())
    }

    /// Resolve grid and tile size, inferring the grid from `sources` when
    /// `--grid` is absent
    ///
    /// # Errors
    ///
    /// Returns an error if the grid cannot be inferred or the sizes are invalid
    pub fn builder_for(&self, sources: &SourceImageSet) -> Result<CollageBuilder> {
        let grid_dimension = match self.cli.grid {
            Some(grid_dimension) => grid_dimension,
            None => sources.inferred_grid_dimension()?,
        };
        info!("using a {grid_dimension}x{grid_dimension} grid");

        let builder = match self.cli.tile_size {
            Some(tile_size) => CollageBuilder::new(tile_size, grid_dimension)?,
            None => CollageBuilder::from_collage_edge(
                self.cli.edge.unwrap_or(DEFAULT_COLLAGE_EDGE),
                grid_dimension,
            )?,
        };

        let progress = if self.cli.should_show_progress() {
            TileProgress::new(sources.len())
        } else {
            TileProgress::hidden()
        };

        Ok(builder
            .with_mode(self.cli.processing_mode())
            .with_progress(progress))
    }
}
