//! Shuffled square-grid photo collages
//!
//! Every eligible photo in a folder is oriented upright, cropped to its
//! centered square, resized to a common tile size and pasted into an N×N grid
//! in random order. The image count must be exactly N².

#![forbid(unsafe_code)]

/// Collage assembly: source discovery, tile loading and placement
pub mod collage;
/// Input/output operations and error handling
pub mod io;

pub use collage::{CollageBuilder, ProcessingMode, build_collage, create_collage};
pub use io::error::{CollageError, Result};
