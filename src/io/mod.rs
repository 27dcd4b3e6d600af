//! Command-line handling, configuration, errors, progress and image export

/// Command-line interface
pub mod cli;
/// Defaults and fixed processing parameters
pub mod configuration;
/// Error types
pub mod error;
/// Saving collages to disk
pub mod image;
/// Progress reporting
pub mod progress;
