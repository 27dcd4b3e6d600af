//! Centered square cropping of arbitrary-aspect images

use image::{DynamicImage, GenericImageView};

/// Pixel rectangle of a centered square crop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropBounds {
    /// Leftmost column kept
    pub left: u32,
    /// Topmost row kept
    pub top: u32,
    /// Edge length of the square, `min(width, height)`
    pub size: u32,
}

impl CropBounds {
    /// Column one past the last kept pixel
    pub const fn right(&self) -> u32 {
        self.left + self.size
    }

    /// Row one past the last kept pixel
    pub const fn bottom(&self) -> u32 {
        self.top + self.size
    }
}

/// Compute the centered square inside a `width` × `height` raster
///
/// Offsets use floor division, so when the leftover is odd the extra pixel is
/// trimmed from the right or bottom.
pub const fn square_bounds(width: u32, height: u32) -> CropBounds {
    let size = if width < height { width } else { height };
    CropBounds {
        left: (width - size) / 2,
        top: (height - size) / 2,
        size,
    }
}

/// Crop `image` to its centered square
///
/// Callers apply orientation metadata first so the bounds are computed on the
/// upright pixel grid.
pub fn crop_to_square(image: &DynamicImage) -> DynamicImage {
    let (width, height) = GenericImageView::dimensions(image);
    let bounds = square_bounds(width, height);
    if bounds.size == width && bounds.size == height {
        return image.clone();
    }
    image.crop_imm(bounds.left, bounds.top, bounds.size, bounds.size)
}
