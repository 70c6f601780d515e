use serde::{Deserialize, Serialize};

/// Identifier of a stroke component within a single run.
///
/// Ids are dense (`0..n`) and follow the raster order in which the first
/// pixel of each component is met, so they are stable for identical input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(pub u32);

/// Classification label attached to every stroke component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Handwriting,
    Diagram,
}

/// Axis-aligned pixel rectangle `[x, x + w) × [y, y + h)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl BoundingBox {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Smallest box covering the inclusive pixel range `[x0, x1] × [y0, y1]`.
    pub fn from_inclusive(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self {
            x: x0,
            y: y0,
            w: x1 - x0 + 1,
            h: y1 - y0 + 1,
        }
    }

    #[inline]
    pub fn right(&self) -> u32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y + self.h
    }

    #[inline]
    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Centre in continuous pixel coordinates.
    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.w as f64 * 0.5,
            self.y as f64 + self.h as f64 * 0.5,
        )
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x0 = self.x.min(other.x);
        let y0 = self.y.min(other.y);
        let x1 = self.right().max(other.right());
        let y1 = self.bottom().max(other.bottom());
        BoundingBox::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Expand by `padding` on every side and clip to a `width × height` image.
    pub fn padded(&self, padding: u32, width: u32, height: u32) -> BoundingBox {
        let x0 = self.x.saturating_sub(padding);
        let y0 = self.y.saturating_sub(padding);
        let x1 = self.right().saturating_add(padding).min(width);
        let y1 = self.bottom().saturating_add(padding).min(height);
        BoundingBox::new(x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
    }

    pub fn intersection_area(&self, other: &BoundingBox) -> u64 {
        let w = self
            .right()
            .min(other.right())
            .saturating_sub(self.x.max(other.x));
        let h = self
            .bottom()
            .min(other.bottom())
            .saturating_sub(self.y.max(other.y));
        w as u64 * h as u64
    }

    /// True when the two boxes share at least one pixel.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.intersection_area(other) > 0
    }

    /// Distance between the closest pixel centres of two boxes (0 when they
    /// overlap).
    pub fn gap(&self, other: &BoundingBox) -> f64 {
        let dx = axis_gap(self.x, self.right(), other.x, other.right());
        let dy = axis_gap(self.y, self.bottom(), other.y, other.bottom());
        (dx * dx + dy * dy).sqrt()
    }

    /// Euclidean distance from a pixel centre to the nearest pixel of the box.
    pub fn distance_to_point(&self, px: i32, py: i32) -> f64 {
        if self.is_empty() {
            return f64::INFINITY;
        }
        let x0 = self.x as i64;
        let y0 = self.y as i64;
        let x1 = self.right() as i64 - 1;
        let y1 = self.bottom() as i64 - 1;
        let (px, py) = (px as i64, py as i64);
        let dx = (x0 - px).max(0).max(px - x1) as f64;
        let dy = (y0 - py).max(0).max(py - y1) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn contains_point(&self, px: i32, py: i32) -> bool {
        px >= self.x as i32
            && py >= self.y as i32
            && px < self.right() as i32
            && py < self.bottom() as i32
    }

    /// Manifest form `[x, y, w, h]`.
    pub fn to_array(&self) -> [u32; 4] {
        [self.x, self.y, self.w, self.h]
    }
}

/// Pixel-distance between two half-open intervals along one axis.
fn axis_gap(a0: u32, a1: u32, b0: u32, b1: u32) -> f64 {
    if a1 <= b0 {
        (b0 - a1 + 1) as f64
    } else if b1 <= a0 {
        (a0 - b1 + 1) as f64
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_clips_to_image_bounds() {
        let b = BoundingBox::new(2, 50, 10, 10);
        assert_eq!(b.padded(3, 100, 100), BoundingBox::new(0, 47, 15, 16));
        assert_eq!(b.padded(3, 14, 61), BoundingBox::new(0, 47, 14, 14));
    }

    #[test]
    fn touching_boxes_do_not_intersect() {
        let a = BoundingBox::new(0, 0, 10, 10);
        let b = BoundingBox::new(10, 0, 10, 10);
        assert!(!a.intersects(&b));
        assert_eq!(a.intersection_area(&b), 0);
        assert!(a.intersects(&BoundingBox::new(9, 9, 2, 2)));
    }

    #[test]
    fn gap_measures_pixel_distance() {
        let a = BoundingBox::new(0, 0, 10, 10);
        // last pixel column of `a` is 9, first of `b` is 20
        let b = BoundingBox::new(20, 0, 5, 5);
        assert_eq!(a.gap(&b), 11.0);
        assert_eq!(a.gap(&BoundingBox::new(5, 5, 10, 10)), 0.0);
        assert_eq!(a.distance_to_point(12, 9), 3.0);
        assert_eq!(a.distance_to_point(4, 4), 0.0);
    }

    #[test]
    fn union_covers_both() {
        let a = BoundingBox::new(5, 5, 10, 10);
        let b = BoundingBox::new(30, 2, 4, 4);
        assert_eq!(a.union(&b), BoundingBox::new(5, 2, 29, 13));
    }
}
