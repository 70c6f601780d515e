#![allow(dead_code)]

use image::{Rgba, RgbaImage};

pub const PAPER: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const INK: Rgba<u8> = Rgba([20, 30, 90, 255]);

/// Synthetic handwritten note: white paper, dark blue strokes.
pub struct Note {
    image: RgbaImage,
}

impl Note {
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "note dimensions must be positive");
        Self {
            image: RgbaImage::from_pixel(width, height, PAPER),
        }
    }

    fn ink(&mut self, x: i64, y: i64) {
        if x >= 0 && y >= 0 && (x as u32) < self.image.width() && (y as u32) < self.image.height()
        {
            self.image.put_pixel(x as u32, y as u32, INK);
        }
    }

    fn fill(&mut self, x0: u32, y0: u32, x1: u32, y1: u32) {
        for y in y0..y1 {
            for x in x0..x1 {
                self.ink(x as i64, y as i64);
            }
        }
    }

    /// Axis-aligned rectangle outline covering `[x, x + w) × [y, y + h)`.
    pub fn rect(mut self, x: u32, y: u32, w: u32, h: u32, stroke: u32) -> Self {
        self.fill(x, y, x + w, y + stroke);
        self.fill(x, y + h - stroke, x + w, y + h);
        self.fill(x, y, x + stroke, y + h);
        self.fill(x + w - stroke, y, x + w, y + h);
        self
    }

    /// Circle outline of outer radius `r`.
    pub fn ring(mut self, cx: i64, cy: i64, r: i64, stroke: i64) -> Self {
        let inner = r - stroke;
        for y in cy - r..=cy + r {
            for x in cx - r..=cx + r {
                let d2 = (x - cx).pow(2) + (y - cy).pow(2);
                if d2 <= r * r && d2 > inner * inner {
                    self.ink(x, y);
                }
            }
        }
        self
    }

    /// Sinusoidal scribble starting at column `x0`, drawn with a 3×3 pen.
    pub fn wave(mut self, x0: u32, len: u32, cy: f64, amplitude: f64, period: f64) -> Self {
        let mut prev: Option<i64> = None;
        for x in x0..x0 + len {
            let t = (x - x0) as f64;
            let y = (cy + amplitude * (2.0 * std::f64::consts::PI * t / period).sin()).round()
                as i64;
            let (lo, hi) = match prev {
                Some(p) => (p.min(y), p.max(y)),
                None => (y, y),
            };
            for yy in lo - 1..=hi + 1 {
                for xx in x as i64 - 1..=x as i64 + 1 {
                    self.ink(xx, yy);
                }
            }
            prev = Some(y);
        }
        self
    }

    /// Horizontal arrow pointing right, 3 px shaft, head of size `head`.
    pub fn arrow(mut self, x0: u32, x1: u32, y: u32, head: u32) -> Self {
        self.fill(x0, y - 1, x1 + 1, y + 2);
        for k in 0..=head as i64 {
            for d in -1..=1 {
                self.ink(x1 as i64 - k + d, y as i64 - k);
                self.ink(x1 as i64 - k + d, y as i64 + k);
            }
        }
        self
    }

    pub fn build(self) -> RgbaImage {
        self.image
    }
}

/// Standard 60×40 rectangle with a 3 px stroke.
pub fn rect_note(width: u32, height: u32, x: u32, y: u32) -> RgbaImage {
    Note::new(width, height).rect(x, y, 60, 40, 3).build()
}
