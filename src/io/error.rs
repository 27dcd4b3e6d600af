//! Error types for collage building and saving

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all collage operations
///
/// Every failure aborts the whole build. A single undecodable tile is never
/// skipped and no partial collage is produced.
#[derive(Debug)]
pub enum CollageError {
    /// Source directory does not exist or is not a directory
    DirectoryNotFound {
        /// Path that was requested as the image source
        path: PathBuf,
    },

    /// Source directory exists but could not be listed
    DirectoryRead {
        /// Directory being listed
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Source directory holds no eligible images
    NoImagesFound {
        /// Directory that was scanned
        path: PathBuf,
    },

    /// Eligible image count does not fill the grid exactly
    ImageCountMismatch {
        /// Number of eligible images found
        found: usize,
        /// Required count (N²), or `None` when the grid was to be inferred
        /// and the count is not a perfect square
        expected: Option<usize>,
    },

    /// A selected source image could not be opened or decoded
    ImageDecode {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Build or save parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save the composite to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for CollageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectoryNotFound { path } => {
                write!(f, "Source directory '{}' does not exist", path.display())
            }
            Self::DirectoryRead { path, source } => {
                write!(
                    f,
                    "Failed to read source directory '{}': {source}",
                    path.display()
                )
            }
            Self::NoImagesFound { path } => {
                write!(f, "No images found in '{}'", path.display())
            }
            Self::ImageCountMismatch {
                found,
                expected: Some(expected),
            } => {
                write!(
                    f,
                    "Found {found} images but the grid needs exactly {expected}"
                )
            }
            Self::ImageCountMismatch {
                found,
                expected: None,
            } => {
                write!(
                    f,
                    "Found {found} images, which is not a perfect square and cannot fill a square grid"
                )
            }
            Self::ImageDecode { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for CollageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageDecode { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::DirectoryRead { source, .. } | Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for collage results
pub type Result<T> = std::result::Result<T, CollageError>;

/// Attaches the offending file path to raw imaging-library errors
pub trait WithImagePath<T> {
    /// Convert a decoding failure into [`CollageError::ImageDecode`] for `path`
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_image_path(self, path: &Path) -> Result<T>;
}

impl<T> WithImagePath<T> for std::result::Result<T, image::ImageError> {
    fn with_image_path(self, path: &Path) -> Result<T> {
        self.map_err(|source| CollageError::ImageDecode {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl<T> WithImagePath<T> for std::io::Result<T> {
    fn with_image_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| CollageError::ImageDecode {
            path: path.to_path_buf(),
            source: image::ImageError::IoError(e),
        })
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> CollageError {
    CollageError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
