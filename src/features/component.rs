use super::geometry::{
    arrowhead_profile, closed_length, curvature_stats, curvature_step, hull_area, polygon_area,
    principal_axes, signed_area, simplify_closed, turning_angles, ArrowheadProfile,
};
use crate::types::{BoundingBox, ComponentId, Label};
use imageproc::point::Point;
use serde::Serialize;
use std::f64::consts::PI;

/// Douglas–Peucker tolerance as a fraction of the perimeter.
const SIMPLIFY_FRACTION: f64 = 0.02;
/// Minimum principal-axis ratio before the arrowhead profile is measured.
const MIN_ARROW_ELONGATION: f64 = 2.5;

/// Geometric descriptors computed once per component.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Descriptors {
    /// Area enclosed by the outer border (px²).
    pub area: f64,
    /// Number of ink pixels in the component.
    pub ink_area: u32,
    pub perimeter: f64,
    /// `4π·area / perimeter²`, clamped to `[0, 1]`.
    pub circularity: f64,
    /// Area over convex-hull area.
    pub solidity: f64,
    /// Largest hole area over `area`.
    pub hole_ratio: f64,
    /// Vertex count of the simplified border polygon.
    pub edge_count: u32,
    /// Simplified polygon perimeter over the traced perimeter.
    pub straightness: f64,
    pub curvature_variance: f64,
    pub reversal_count: u32,
    pub elongation: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrowhead: Option<ArrowheadProfile>,
}

impl Descriptors {
    pub fn compute(boundary: &[Point<i32>], holes: &[Vec<Point<i32>>], ink_area: u32) -> Self {
        let signed = signed_area(boundary);
        let area = signed.abs();
        let perimeter = closed_length(boundary);
        let circularity = if perimeter > 0.0 {
            (4.0 * PI * area / (perimeter * perimeter)).min(1.0)
        } else {
            0.0
        };
        let hull = hull_area(boundary);
        let solidity = if hull > 0.0 {
            (area / hull).min(1.0)
        } else {
            0.0
        };
        let largest_hole = holes
            .iter()
            .map(|h| polygon_area(h))
            .fold(0.0, f64::max);
        let hole_ratio = if area > 0.0 {
            (largest_hole / area).min(1.0)
        } else {
            0.0
        };

        let simplified = simplify_closed(boundary, (SIMPLIFY_FRACTION * perimeter).max(1.0));
        let straightness = if perimeter > 0.0 {
            (closed_length(&simplified) / perimeter).min(1.0)
        } else {
            0.0
        };

        let angles = turning_angles(boundary, curvature_step(boundary.len()));
        let curvature = curvature_stats(&angles, signed);

        let axes = principal_axes(boundary);
        let elongation = axes.map_or(1.0, |a| a.elongation);
        let arrowhead = axes
            .filter(|a| a.elongation >= MIN_ARROW_ELONGATION)
            .and_then(|a| arrowhead_profile(boundary, &a));

        Self {
            area,
            ink_area,
            perimeter,
            circularity,
            solidity,
            hole_ratio,
            edge_count: simplified.len() as u32,
            straightness,
            curvature_variance: curvature.variance,
            reversal_count: curvature.reversals,
            elongation,
            arrowhead,
        }
    }
}

/// One connected ink region of the stroke mask.
///
/// Created by [`extract_components`](super::extract_components) with
/// `label = Handwriting` and `confidence = 0`; the classifier fills both in.
#[derive(Clone, Debug)]
pub struct StrokeComponent {
    pub id: ComponentId,
    pub bbox: BoundingBox,
    /// Outer border, pixel centres in trace order.
    pub boundary: Vec<Point<i32>>,
    /// Inner borders, one per enclosed hole.
    pub holes: Vec<Vec<Point<i32>>>,
    pub descriptors: Descriptors,
    pub label: Label,
    pub confidence: f64,
}

impl StrokeComponent {
    pub fn is_diagram(&self) -> bool {
        self.label == Label::Diagram
    }

    /// Every traced border pixel, outer first.
    pub fn border_points(&self) -> impl Iterator<Item = &Point<i32>> + '_ {
        self.boundary.iter().chain(self.holes.iter().flatten())
    }
}
