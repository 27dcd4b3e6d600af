//! Terminal progress reporting for tile loading

use crate::io::configuration::PROGRESS_TEMPLATE;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static TILE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(PROGRESS_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar advanced once per finished tile
///
/// Cloning yields a handle to the same bar, so worker threads can each hold
/// one and tick it as their tiles complete.
#[derive(Clone)]
pub struct TileProgress {
    bar: ProgressBar,
}

impl Default for TileProgress {
    fn default() -> Self {
        Self::hidden()
    }
}

impl TileProgress {
    /// Create a visible progress bar for `tile_count` tiles
    pub fn new(tile_count: usize) -> Self {
        let bar = ProgressBar::new(tile_count as u64);
        bar.set_style(TILE_STYLE.clone());
        Self { bar }
    }

    /// Create a progress tracker that draws nothing
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Reset the expected tile count
    pub fn set_total(&self, tile_count: usize) {
        self.bar.set_length(tile_count as u64);
    }

    /// Record one finished tile
    pub fn tile_done(&self) {
        self.bar.inc(1);
    }

    /// Number of tiles recorded so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
