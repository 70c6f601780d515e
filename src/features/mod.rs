//! Stroke mask → stroke components with geometric descriptors.
//!
//! Components are the 8-connected ink regions of the mask. For each one the
//! outer border and its hole borders are traced, the border-enclosed area is
//! compared against `min_contour_area` (smaller regions count as noise), and
//! the survivors are annotated once with [`Descriptors`]. Descriptor
//! computation is independent per component and runs on the rayon pool;
//! output order is the raster order of each component's first pixel.

mod component;
pub mod geometry;

pub use component::{Descriptors, StrokeComponent};
pub use geometry::ArrowheadProfile;

use crate::preprocess::StrokeMask;
use crate::types::{BoundingBox, ComponentId, Label};
use image::imageops::replace;
use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType, Contour};
use imageproc::point::Point;
use imageproc::region_labelling::{connected_components, Connectivity};
use rayon::prelude::*;

/// Output of the feature stage.
#[derive(Clone, Debug, Default)]
pub struct FeatureSet {
    pub components: Vec<StrokeComponent>,
    /// Ink regions dropped for being smaller than the area threshold.
    pub discarded: usize,
}

#[derive(Clone, Copy)]
struct PixelStats {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
    count: u32,
}

#[derive(Default)]
struct Borders {
    outer: Vec<Point<i32>>,
    holes: Vec<Vec<Point<i32>>>,
}

struct RawComponent {
    bbox: BoundingBox,
    ink_area: u32,
    borders: Borders,
}

pub fn extract_components(mask: &StrokeMask, min_contour_area: f64) -> FeatureSet {
    let gray = mask.as_gray();
    let labels = connected_components(gray, Connectivity::Eight, Luma([0u8]));

    // Per-label pixel statistics, labels listed in first-pixel raster order.
    let max_label = labels.pixels().map(|p| p[0]).max().unwrap_or(0) as usize;
    let mut stats: Vec<Option<PixelStats>> = vec![None; max_label + 1];
    let mut order = Vec::new();
    for (x, y, px) in labels.enumerate_pixels() {
        let label = px[0] as usize;
        if label == 0 {
            continue;
        }
        if let Some(s) = stats[label].as_mut() {
            s.x0 = s.x0.min(x);
            s.x1 = s.x1.max(x);
            s.y1 = s.y1.max(y);
            s.count += 1;
        } else {
            order.push(label);
            stats[label] = Some(PixelStats {
                x0: x,
                y0: y,
                x1: x,
                y1: y,
                count: 1,
            });
        }
    }

    let mut borders: Vec<Borders> = (0..=max_label).map(|_| Borders::default()).collect();
    for contour in trace_borders(gray) {
        let Some(first) = contour.points.first() else {
            continue;
        };
        let label = labels.get_pixel(first.x as u32, first.y as u32)[0] as usize;
        if label == 0 {
            continue;
        }
        let entry = &mut borders[label];
        match contour.border_type {
            BorderType::Outer => {
                if contour.points.len() > entry.outer.len() {
                    entry.outer = contour.points;
                }
            }
            BorderType::Hole => entry.holes.push(contour.points),
        }
    }

    let mut discarded = 0;
    let mut raw = Vec::new();
    for label in order {
        let Some(s) = stats[label] else { continue };
        let b = std::mem::take(&mut borders[label]);
        if b.outer.is_empty() || geometry::polygon_area(&b.outer) < min_contour_area {
            discarded += 1;
            continue;
        }
        raw.push(RawComponent {
            bbox: BoundingBox::from_inclusive(s.x0, s.y0, s.x1, s.y1),
            ink_area: s.count,
            borders: b,
        });
    }

    let components = raw
        .into_par_iter()
        .enumerate()
        .map(|(i, c)| {
            let descriptors = Descriptors::compute(&c.borders.outer, &c.borders.holes, c.ink_area);
            StrokeComponent {
                id: ComponentId(i as u32),
                bbox: c.bbox,
                boundary: c.borders.outer,
                holes: c.borders.holes,
                descriptors,
                label: Label::Handwriting,
                confidence: 0.0,
            }
        })
        .collect();

    FeatureSet {
        components,
        discarded,
    }
}

/// Border following over the mask framed by one background pixel.
///
/// Ink in column 0 would otherwise start its outer border as a hole.
/// Points come back in mask coordinates.
fn trace_borders(gray: &GrayImage) -> Vec<Contour<i32>> {
    let mut framed = GrayImage::new(gray.width() + 2, gray.height() + 2);
    replace(&mut framed, gray, 1, 1);
    let mut contours = find_contours::<i32>(&framed);
    for contour in &mut contours {
        for p in &mut contour.points {
            p.x -= 1;
            p.y -= 1;
        }
    }
    contours
}
