//! Border-to-border distances between stroke components.
//!
//! Distances are Euclidean between pixel centres of traced border points
//! (outer and hole borders). Bounding-box gaps give a lower bound and prune
//! most pairs before any point is visited.

use crate::features::StrokeComponent;
use crate::types::BoundingBox;

/// Smallest border distance between `a` and `b` if it is `<= limit`.
pub fn border_distance_within(
    a: &StrokeComponent,
    b: &StrokeComponent,
    limit: f64,
) -> Option<f64> {
    if a.bbox.gap(&b.bbox) > limit {
        return None;
    }
    let limit_sq = limit * limit;
    let mut best = f64::INFINITY;
    for p in a.border_points() {
        if b.bbox.distance_to_point(p.x, p.y) > limit {
            continue;
        }
        for q in b.border_points() {
            let dx = (p.x - q.x) as f64;
            let dy = (p.y - q.y) as f64;
            let d = dx * dx + dy * dy;
            if d < best {
                best = d;
            }
        }
    }
    (best <= limit_sq).then(|| best.sqrt())
}

/// Smallest distance from `bbox` to a border point of `component` if it is
/// `<= limit`.
pub fn box_distance_within(
    bbox: &BoundingBox,
    component: &StrokeComponent,
    limit: f64,
) -> Option<f64> {
    if bbox.gap(&component.bbox) > limit {
        return None;
    }
    let best = component
        .border_points()
        .map(|p| bbox.distance_to_point(p.x, p.y))
        .fold(f64::INFINITY, f64::min);
    (best <= limit).then_some(best)
}
