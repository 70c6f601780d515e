use imageproc::distance_transform::Norm;
use imageproc::morphology::close;
use image::GrayImage;

/// Morphological closing (dilate, then erode) with a square element of
/// Chebyshev radius `radius`. Bridges gaps narrower than the element without
/// changing the outline of strokes that are already solid.
pub fn close_strokes(mask: &GrayImage, radius: u8) -> GrayImage {
    if radius == 0 {
        return mask.clone();
    }
    close(mask, Norm::LInf, radius)
}
