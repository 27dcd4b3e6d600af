//! Square-grid collage assembly from a directory of photos

/// Collage builder, tile placement and the build entry points
pub mod builder;
/// Centered square cropping
pub mod crop;
/// Eligible source image discovery
pub mod source;
/// Per-image decode, crop and resize, sequential or parallel
pub mod tiles;

pub use builder::{CollageBuilder, build_collage, compose, create_collage};
pub use tiles::ProcessingMode;
