//! Boundary-polygon measurements used by the component descriptors.
//!
//! All functions take the closed outer border produced by the contour tracer
//! (pixel centres, no repeated closing point).

use imageproc::geometry::{approximate_polygon_dp, arc_length, convex_hull};
use imageproc::point::Point;
use nalgebra::{Matrix2, SymmetricEigen, Vector2};
use serde::Serialize;

/// Turning angle (radians) that opens a high-curvature run.
const RUN_START: f64 = 0.5;
/// Turning angle below which an open run ends.
const RUN_HOLD: f64 = 0.25;
/// Number of slices along the major axis for the arrowhead profile.
const PROFILE_BINS: usize = 10;

/// Shoelace area; positive for counter-clockwise order in y-up coordinates.
pub fn signed_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let n = points.len();
    let twice: i64 = (0..n)
        .map(|i| {
            let p = points[i];
            let q = points[(i + 1) % n];
            p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64
        })
        .sum();
    twice as f64 * 0.5
}

#[inline]
pub fn polygon_area(points: &[Point<i32>]) -> f64 {
    signed_area(points).abs()
}

pub fn closed_length(points: &[Point<i32>]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    arc_length(points, true)
}

pub fn hull_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    polygon_area(&convex_hull(points))
}

/// Douglas–Peucker simplification of a closed border.
///
/// The ring is cut at its first point and at the point farthest from it, and
/// each half is simplified as an open curve. The result carries no repeated
/// closing vertex.
pub fn simplify_closed(points: &[Point<i32>], epsilon: f64) -> Vec<Point<i32>> {
    if points.len() < 3 || epsilon <= 0.0 {
        return points.to_vec();
    }
    let start = points[0];
    let split = points
        .iter()
        .enumerate()
        .max_by_key(|(i, p)| {
            let dx = (p.x - start.x) as i64;
            let dy = (p.y - start.y) as i64;
            // earliest index wins ties
            (dx * dx + dy * dy, std::cmp::Reverse(*i))
        })
        .map(|(i, _)| i)
        .unwrap_or(0);
    if split == 0 {
        return vec![start];
    }

    let mut back_half = points[split..].to_vec();
    back_half.push(start);

    let mut simplified = approximate_polygon_dp(&points[..=split], epsilon, false);
    let tail = approximate_polygon_dp(&back_half, epsilon, false);
    simplified.pop();
    simplified.extend_from_slice(&tail[..tail.len().saturating_sub(1)]);
    simplified
}

/// Turning angle at every border point, measured between the chords to the
/// points `step` positions behind and ahead.
pub fn turning_angles(points: &[Point<i32>], step: usize) -> Vec<f64> {
    let n = points.len();
    if step == 0 || n < 2 * step + 1 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let prev = points[(i + n - step) % n];
            let cur = points[i];
            let next = points[(i + step) % n];
            let ax = (cur.x - prev.x) as f64;
            let ay = (cur.y - prev.y) as f64;
            let bx = (next.x - cur.x) as f64;
            let by = (next.y - cur.y) as f64;
            (ax * by - ay * bx).atan2(ax * bx + ay * by)
        })
        .collect()
}

/// Chord offset used for turning angles on a border of `len` points.
pub fn curvature_step(len: usize) -> usize {
    ((len as f64 / 32.0).round() as usize).clamp(3, 12)
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CurvatureStats {
    pub variance: f64,
    /// Sign changes between consecutive high-curvature runs around the ring.
    pub reversals: u32,
}

/// Summarise turning angles. `orientation` is the sign of the border's
/// signed area, so convex turns count as positive whatever the trace
/// direction.
pub fn curvature_stats(angles: &[f64], orientation: f64) -> CurvatureStats {
    if angles.is_empty() {
        return CurvatureStats::default();
    }
    let sign = if orientation < 0.0 { -1.0 } else { 1.0 };
    let n = angles.len() as f64;
    let mean = angles.iter().map(|a| a * sign).sum::<f64>() / n;
    let variance = angles
        .iter()
        .map(|a| {
            let d = a * sign - mean;
            d * d
        })
        .sum::<f64>()
        / n;

    let mut runs: Vec<bool> = Vec::new();
    let mut open: Option<bool> = None;
    for &raw in angles {
        let theta = raw * sign;
        let positive = theta > 0.0;
        match open {
            Some(run) if run == positive && theta.abs() >= RUN_HOLD => {}
            _ => {
                open = None;
                if theta.abs() >= RUN_START {
                    open = Some(positive);
                    runs.push(positive);
                }
            }
        }
    }

    let reversals = if runs.len() < 2 {
        0
    } else {
        (0..runs.len())
            .filter(|&i| runs[i] != runs[(i + 1) % runs.len()])
            .count() as u32
    };
    CurvatureStats {
        variance,
        reversals,
    }
}

/// Principal axes of the border point cloud.
#[derive(Clone, Copy, Debug)]
pub struct PrincipalAxes {
    pub centroid: Vector2<f64>,
    pub major: Vector2<f64>,
    pub minor: Vector2<f64>,
    /// `sqrt(λmax / λmin)`.
    pub elongation: f64,
}

pub fn principal_axes(points: &[Point<i32>]) -> Option<PrincipalAxes> {
    if points.len() < 3 {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x as f64, sy + p.y as f64));
    let centroid = Vector2::new(sx / n, sy / n);
    let mut cov = Matrix2::zeros();
    for p in points {
        let d = Vector2::new(p.x as f64, p.y as f64) - centroid;
        cov += d * d.transpose();
    }
    cov /= n;

    let eig = SymmetricEigen::new(cov);
    let (imax, imin) = if eig.eigenvalues[0] >= eig.eigenvalues[1] {
        (0, 1)
    } else {
        (1, 0)
    };
    let lmax = eig.eigenvalues[imax];
    if lmax <= f64::EPSILON {
        return None;
    }
    let lmin = eig.eigenvalues[imin].max(1e-3);
    Some(PrincipalAxes {
        centroid,
        major: eig.eigenvectors.column(imax).into_owned(),
        minor: eig.eigenvectors.column(imin).into_owned(),
        elongation: (lmax / lmin).sqrt(),
    })
}

/// Width profile of an elongated stroke along its major axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ArrowheadProfile {
    /// Extent along the major axis.
    pub length: f64,
    /// Median width over the middle slices.
    pub shaft_width: f64,
    /// Widest end slice relative to the shaft.
    pub end_flare: f64,
}

pub fn arrowhead_profile(points: &[Point<i32>], axes: &PrincipalAxes) -> Option<ArrowheadProfile> {
    let projected: Vec<(f64, f64)> = points
        .iter()
        .map(|p| {
            let d = Vector2::new(p.x as f64, p.y as f64) - axes.centroid;
            (d.dot(&axes.major), d.dot(&axes.minor))
        })
        .collect();
    let (umin, umax) = projected
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(u, _)| {
            (lo.min(u), hi.max(u))
        });
    let length = umax - umin;
    if !length.is_finite() || length < PROFILE_BINS as f64 {
        return None;
    }

    let mut spans = [(f64::INFINITY, f64::NEG_INFINITY); PROFILE_BINS];
    for &(u, v) in &projected {
        let bin = (((u - umin) / length) * PROFILE_BINS as f64) as usize;
        let span = &mut spans[bin.min(PROFILE_BINS - 1)];
        span.0 = span.0.min(v);
        span.1 = span.1.max(v);
    }
    let widths: Vec<f64> = spans
        .iter()
        .map(|&(lo, hi)| if hi >= lo { hi - lo } else { 0.0 })
        .collect();

    let mut middle = widths[2..PROFILE_BINS - 2].to_vec();
    middle.sort_by(|a, b| a.total_cmp(b));
    let mid = middle.len() / 2;
    let shaft_width = ((middle[mid - 1] + middle[mid]) * 0.5).max(1.0);
    let end_width = widths[0].max(widths[PROFILE_BINS - 1]);

    Some(ArrowheadProfile {
        length,
        shaft_width,
        end_flare: end_width / shaft_width,
    })
}
