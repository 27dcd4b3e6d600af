//! Discovery of eligible source images in a directory

use crate::io::configuration::IMAGE_EXTENSIONS;
use crate::io::error::{CollageError, Result};
use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use std::path::{Path, PathBuf};

/// Check whether a file name qualifies as a collage source
///
/// Hidden files (leading dot) are rejected; the extension must be in
/// [`IMAGE_EXTENSIONS`], compared case-insensitively.
pub fn is_eligible(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    // Names need not be UTF-8; only the extension is compared as text
    if name.as_encoded_bytes().starts_with(b".") {
        return false;
    }

    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Eligible image paths found in one directory, rescanned on every build
#[derive(Clone, Debug)]
pub struct SourceImageSet {
    directory: PathBuf,
    paths: Vec<PathBuf>,
}

impl SourceImageSet {
    /// List the eligible images directly inside `directory`
    ///
    /// Subdirectories are not descended into. Paths are sorted so that a
    /// seeded shuffle is reproducible regardless of listing order.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `directory` does not exist or is not a directory
    /// - The directory or one of its entries cannot be read
    pub fn scan(directory: &Path) -> Result<Self> {
        if !directory.is_dir() {
            return Err(CollageError::DirectoryNotFound {
                path: directory.to_path_buf(),
            });
        }

        let read_error = |source| CollageError::DirectoryRead {
            path: directory.to_path_buf(),
            source,
        };

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(directory).map_err(read_error)? {
            let entry = entry.map_err(read_error)?;
            let path = entry.path();
            if path.is_file() && is_eligible(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        debug!(
            "found {} eligible images in {}",
            paths.len(),
            directory.display()
        );

        Ok(Self {
            directory: directory.to_path_buf(),
            paths,
        })
    }

    /// Directory this set was scanned from
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Eligible paths in their current order
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Number of eligible images
    pub const fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether no eligible image was found
    pub const fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Uniformly permute the paths with the given random source
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.paths.shuffle(rng);
    }

    /// Consume the set, yielding its paths in their current order
    pub fn into_paths(self) -> Vec<PathBuf> {
        self.paths
    }

    /// Ensure the set fills an `n` × `n` grid exactly
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The set is empty
    /// - The image count is not exactly `n²`
    pub fn require_grid(&self, grid_dimension: u32) -> Result<()> {
        self.require_non_empty()?;

        let expected = (grid_dimension as usize).saturating_mul(grid_dimension as usize);
        if self.len() == expected {
            Ok(())
        } else {
            Err(CollageError::ImageCountMismatch {
                found: self.len(),
                expected: Some(expected),
            })
        }
    }

    /// Grid dimension implied by the image count
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The set is empty
    /// - The image count is not a perfect square
    pub fn inferred_grid_dimension(&self) -> Result<u32> {
        self.require_non_empty()?;

        let count = self.len();
        let root = count.isqrt();
        match u32::try_from(root) {
            Ok(dimension) if root * root == count => Ok(dimension),
            _ => Err(CollageError::ImageCountMismatch {
                found: count,
                expected: None,
            }),
        }
    }

    fn require_non_empty(&self) -> Result<()> {
        if self.is_empty() {
            Err(CollageError::NoImagesFound {
                path: self.directory.clone(),
            })
        } else {
            Ok(())
        }
    }
}
