//! Independent heuristics voting on "is this stroke part of a drawing".
//!
//! Every scorer returns a vote in `[-1, 1]`; positive scorers only vote in
//! `[0, 1]`, negative ones only in `[-1, 0]`. The classifier multiplies each
//! vote by the scorer's weight.

use super::neighbourhood::Neighbourhood;
use super::ScorerWeights;
use crate::features::StrokeComponent;

pub trait Scorer: Send + Sync {
    fn name(&self) -> &'static str;
    fn weight(&self) -> f64;
    fn vote(&self, component: &StrokeComponent, context: &Neighbourhood) -> f64;
}

#[inline]
fn unit(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

/// Border well approximated by a few straight edges.
pub struct Straightness {
    pub weight: f64,
}

impl Scorer for Straightness {
    fn name(&self) -> &'static str {
        "straightness"
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn vote(&self, component: &StrokeComponent, _context: &Neighbourhood) -> f64 {
        let d = &component.descriptors;
        let edges = d.edge_count as f64;
        let edge_factor = if edges <= 12.0 {
            1.0
        } else {
            unit(1.0 - (edges - 12.0) / 12.0)
        };
        unit((d.straightness - 0.75) / 0.2) * edge_factor
    }
}

/// Closed outline around a large, convex hole.
pub struct Enclosure {
    pub weight: f64,
}

impl Scorer for Enclosure {
    fn name(&self) -> &'static str {
        "enclosure"
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn vote(&self, component: &StrokeComponent, _context: &Neighbourhood) -> f64 {
        let d = &component.descriptors;
        unit((d.hole_ratio - 0.3) / 0.4) * unit((d.solidity - 0.75) / 0.2)
    }
}

/// Thin shaft that flares at one end.
pub struct Arrowhead {
    pub weight: f64,
}

impl Scorer for Arrowhead {
    fn name(&self) -> &'static str {
        "arrowhead"
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn vote(&self, component: &StrokeComponent, _context: &Neighbourhood) -> f64 {
        match component.descriptors.arrowhead {
            Some(p) if p.shaft_width <= (0.12 * p.length).max(8.0) => {
                unit((p.end_flare - 1.8) / 1.5)
            }
            _ => 0.0,
        }
    }
}

/// Frequent changes of turning direction, typical of cursive strokes.
pub struct CurvatureIrregularity {
    pub weight: f64,
}

impl Scorer for CurvatureIrregularity {
    fn name(&self) -> &'static str {
        "curvature_irregularity"
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn vote(&self, component: &StrokeComponent, _context: &Neighbourhood) -> f64 {
        let d = &component.descriptors;
        let reversals = unit((d.reversal_count as f64 - 4.0) / 12.0);
        let spread = unit((d.curvature_variance - 0.3) / 0.5);
        -unit(reversals + 0.25 * spread)
    }
}

/// Similar-sized neighbours side by side with ragged bottoms, as in a line of
/// handwriting. Isolated components never receive this penalty.
pub struct BaselineIrregularity {
    pub weight: f64,
}

impl Scorer for BaselineIrregularity {
    fn name(&self) -> &'static str {
        "baseline_irregularity"
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn vote(&self, _component: &StrokeComponent, context: &Neighbourhood) -> f64 {
        if context.is_isolated() {
            return 0.0;
        }
        let mut score = (context.line_mates.len() as f64 / 3.0).min(1.0);

        let boxes = || std::iter::once(&context.bbox).chain(context.line_mates.iter());
        let (lo, hi) = boxes().fold((u32::MAX, 0u32), |(lo, hi), b| {
            (lo.min(b.bottom()), hi.max(b.bottom()))
        });
        let count = context.line_mates.len() as f64 + 1.0;
        let mean_height = boxes().map(|b| b.h as f64).sum::<f64>() / count;
        if mean_height > 0.0 && ((hi - lo) as f64 / mean_height) < 0.02 {
            // bottoms aligned within 2% of the mean height
            score *= 0.25;
        }
        -score
    }
}

pub fn default_scorers(weights: &ScorerWeights) -> Vec<Box<dyn Scorer>> {
    vec![
        Box::new(Straightness {
            weight: weights.straightness,
        }),
        Box::new(Enclosure {
            weight: weights.enclosure,
        }),
        Box::new(Arrowhead {
            weight: weights.arrowhead,
        }),
        Box::new(CurvatureIrregularity {
            weight: weights.curvature_irregularity,
        }),
        Box::new(BaselineIrregularity {
            weight: weights.baseline_irregularity,
        }),
    ]
}
