//! Borrowed RGBA8 view over a decoded note.
//!
//! The pipeline never mutates the input: crops copy colour channels straight
//! from this view.

use crate::error::ExtractError;
use image::RgbaImage;

/// Row-major RGBA8 pixels; `stride` counts bytes between rows (≥ `4 * w`).
#[derive(Clone, Copy, Debug)]
pub struct ImageRgba8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize,
    pub data: &'a [u8],
}

impl<'a> ImageRgba8<'a> {
    pub const CHANNELS: usize = 4;

    /// Tightly packed view over an `image` crate buffer.
    pub fn from_rgba(image: &'a RgbaImage) -> Self {
        let w = image.width() as usize;
        Self {
            w,
            h: image.height() as usize,
            stride: w * Self::CHANNELS,
            data: image.as_raw(),
        }
    }

    /// Reject degenerate dimensions and buffers too short for the declared
    /// geometry.
    pub fn validate(&self) -> Result<(), ExtractError> {
        if self.w == 0 || self.h == 0 {
            return Err(ExtractError::invalid_input(format!(
                "degenerate dimensions {}x{}",
                self.w, self.h
            )));
        }
        if self.w > u32::MAX as usize || self.h > u32::MAX as usize {
            return Err(ExtractError::invalid_input(format!(
                "dimensions {}x{} exceed the supported range",
                self.w, self.h
            )));
        }
        let row_bytes = self.w.checked_mul(Self::CHANNELS).ok_or_else(|| {
            ExtractError::invalid_input(format!("row of {} pixels overflows", self.w))
        })?;
        if self.stride < row_bytes {
            return Err(ExtractError::invalid_input(format!(
                "stride {} is smaller than a row of {} bytes",
                self.stride, row_bytes
            )));
        }
        let required = (self.h - 1)
            .checked_mul(self.stride)
            .and_then(|n| n.checked_add(row_bytes))
            .ok_or_else(|| {
                ExtractError::invalid_input(format!(
                    "{} rows of stride {} overflow the address space",
                    self.h, self.stride
                ))
            })?;
        if self.data.len() < required {
            return Err(ExtractError::invalid_input(format!(
                "buffer holds {} bytes, {}x{} needs {}",
                self.data.len(),
                self.w,
                self.h,
                required
            )));
        }
        Ok(())
    }

    /// Row `y` as `4 * w` interleaved bytes.
    #[inline]
    pub fn row(&self, y: usize) -> &'a [u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w * Self::CHANNELS]
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = y * self.stride + x * Self::CHANNELS;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Owned copy, used by debug rendering.
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.w as u32, self.h as u32, |x, y| {
            image::Rgba(self.pixel(x as usize, y as usize))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_and_short_buffers() {
        let data = vec![0u8; 16];
        let empty = ImageRgba8 {
            w: 0,
            h: 4,
            stride: 0,
            data: &data,
        };
        assert!(matches!(
            empty.validate(),
            Err(ExtractError::InvalidInput { .. })
        ));

        let short = ImageRgba8 {
            w: 4,
            h: 4,
            stride: 16,
            data: &data,
        };
        assert!(short.validate().is_err());

        let narrow = ImageRgba8 {
            w: 4,
            h: 1,
            stride: 8,
            data: &data,
        };
        assert!(narrow.validate().is_err());

        let ok = ImageRgba8 {
            w: 2,
            h: 2,
            stride: 8,
            data: &data,
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn oversized_geometry_is_invalid_input() {
        let data = vec![0u8; 16];
        let huge_stride = ImageRgba8 {
            w: 2,
            h: 3,
            stride: usize::MAX / 2,
            data: &data,
        };
        assert!(matches!(
            huge_stride.validate(),
            Err(ExtractError::InvalidInput { .. })
        ));

        let huge_width = ImageRgba8 {
            w: usize::MAX / 2,
            h: 1,
            stride: usize::MAX,
            data: &data,
        };
        assert!(matches!(
            huge_width.validate(),
            Err(ExtractError::InvalidInput { .. })
        ));
    }

    #[test]
    fn strided_pixels_are_addressed_by_row() {
        let mut data = vec![0u8; 2 * 12];
        data[12..16].copy_from_slice(&[1, 2, 3, 4]);
        let view = ImageRgba8 {
            w: 2,
            h: 2,
            stride: 12,
            data: &data,
        };
        assert_eq!(view.pixel(0, 1), [1, 2, 3, 4]);
        assert_eq!(view.row(1).len(), 8);
    }
}
