//! Adaptive mean threshold backed by an integral image.
//!
//! For every pixel the mean of the `block_size × block_size` window centred
//! on it is computed in O(1); windows are clipped at the border and the mean
//! uses the clipped pixel count. A pixel becomes ink (255) when it is
//! strictly darker than `mean - offset`, so a perfectly uniform page never
//! produces ink.

use super::INK;
use crate::image::ImageView;
use image::{GrayImage, Luma};
use imageproc::definitions::Image;
use imageproc::integral_image::{integral_image, sum_image_pixels};

pub fn adaptive_threshold<I>(gray: &I, block_size: u32, offset: i32) -> GrayImage
where
    I: ImageView<Pixel = u8>,
{
    let w = gray.width();
    let h = gray.height();
    let mut out = GrayImage::new(w as u32, h as u32);
    if w == 0 || h == 0 {
        return out;
    }

    let luma = GrayImage::from_fn(w as u32, h as u32, |x, y| {
        Luma([gray.row(y as usize)[x as usize]])
    });
    let integral: Image<Luma<u64>> = integral_image::<_, u64>(&luma);
    let radius = (block_size.max(1) / 2) as usize;

    for (y, row) in gray.rows().enumerate() {
        let y0 = y.saturating_sub(radius);
        let y1 = (y + radius).min(h - 1);
        for (x, &value) in row.iter().enumerate() {
            let x0 = x.saturating_sub(radius);
            let x1 = (x + radius).min(w - 1);
            let [sum] = sum_image_pixels(&integral, x0 as u32, y0 as u32, x1 as u32, y1 as u32);
            let count = ((x1 - x0 + 1) * (y1 - y0 + 1)) as i64;
            // value < sum / count - offset, without the division
            if (value as i64 + offset as i64) * count < sum as i64 {
                out.put_pixel(x as u32, y as u32, Luma([INK]));
            }
        }
    }
    out
}
