//! Raster → binary stroke mask.
//!
//! Three fixed steps, none of which smooths the input:
//! 1. grayscale conversion (`grayscale`), compositing transparency onto white
//!    paper;
//! 2. adaptive mean thresholding (`threshold`) over a square window, so uneven
//!    lighting across the page does not swallow faint strokes;
//! 3. morphological closing (`morphology`) with a small square element to
//!    bridge pen-lift gaps.
//!
//! The result is a [`StrokeMask`] of the input's size where ink is 255.

mod grayscale;
mod morphology;
mod threshold;

pub use grayscale::to_grayscale;
pub use morphology::close_strokes;
pub use threshold::adaptive_threshold;

use crate::image::ImageRgba8;
use image::GrayImage;
use serde::{Deserialize, Serialize};

/// Intensity assigned to ink pixels in the mask.
pub const INK: u8 = 255;

/// Knobs of the preprocessing stage.
///
/// - `block_size`: side of the square thresholding window (odd, ≥ 3).
/// - `offset`: constant subtracted from the local mean; a pixel is ink when it
///   is darker than `mean - offset`.
/// - `close_radius`: Chebyshev radius of the closing element (`1` ⇒ 3×3,
///   `0` disables closing).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessOptions {
    pub block_size: u32,
    pub offset: i32,
    pub close_radius: u8,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            block_size: 11,
            offset: 2,
            close_radius: 1,
        }
    }
}

/// Binary ink mask with the same dimensions as the input note.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrokeMask {
    image: GrayImage,
}

impl StrokeMask {
    pub fn from_gray(image: GrayImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    #[inline]
    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        self.image.get_pixel(x, y)[0] != 0
    }

    pub fn ink_pixels(&self) -> usize {
        self.image.as_raw().iter().filter(|&&v| v != 0).count()
    }

    pub fn as_gray(&self) -> &GrayImage {
        &self.image
    }
}

/// Run the full preprocessing chain on a validated input view.
pub fn binarize(input: ImageRgba8<'_>, options: &PreprocessOptions) -> StrokeMask {
    let gray = to_grayscale(input);
    let thresholded = adaptive_threshold(&gray, options.block_size, options.offset);
    StrokeMask::from_gray(close_strokes(&thresholded, options.close_radius))
}
