use crate::image::{GrayImageU8, ImageRgba8};

// Rec. 601 luma weights in thousandths; integer math keeps the output exact.
const WR: u32 = 299;
const WG: u32 = 587;
const WB: u32 = 114;

/// Convert to 8-bit luma. Transparent pixels are composited onto white
/// paper so that a cut-out note reads as blank background.
pub fn to_grayscale(input: ImageRgba8<'_>) -> GrayImageU8 {
    let mut out = Vec::with_capacity(input.w * input.h);
    for y in 0..input.h {
        for px in input.row(y).chunks_exact(ImageRgba8::CHANNELS) {
            let luma = (WR * px[0] as u32 + WG * px[1] as u32 + WB * px[2] as u32 + 500) / 1000;
            let alpha = px[3] as u32;
            let composited = (luma * alpha + 255 * (255 - alpha) + 127) / 255;
            out.push(composited as u8);
        }
    }
    GrayImageU8::new(input.w, input.h, out)
}
