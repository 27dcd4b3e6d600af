//! Collage defaults and fixed processing parameters

use image::imageops::FilterType;

/// Recognised image extensions, matched case-insensitively
pub const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "bmp", "webp"];

// Defaults match the original desktop tool: a 2800px square split 7 ways
/// Default edge length of the whole collage in pixels
pub const DEFAULT_COLLAGE_EDGE: u32 = 2800;
/// Default number of tiles per row and column
pub const DEFAULT_GRID_DIMENSION: u32 = 7;
/// Default location for the saved collage
pub const DEFAULT_OUTPUT_PATH: &str = "./output/collage.jpg";

// Safety limit; the composite is allocated in one piece
/// Maximum size of the RGB composite in bytes (1 GiB)
pub const MAX_COLLAGE_BYTES: u64 = 1 << 30;

/// Resampling filter used when shrinking square crops to tile size
pub const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

// Print-oriented output settings
/// Pixel density written into JPEG output
pub const OUTPUT_DPI: u16 = 300;
/// Default JPEG encoding quality
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

// Progress bar display settings
/// Template for the tile loading progress bar
pub const PROGRESS_TEMPLATE: &str = "[{elapsed_precise}] Tiles: [{bar:40.cyan/blue}] {pos}/{len}";
