use crate::features::StrokeComponent;
use crate::types::BoundingBox;

/// Minimum vertical overlap, as a fraction of the shorter box.
const MIN_VERTICAL_OVERLAP: f64 = 0.5;
/// Accepted height ratio between line mates.
const HEIGHT_RATIO: (f64, f64) = (0.5, 2.0);
/// Maximum horizontal gap, as a multiple of the taller box.
const MAX_GAP_FACTOR: f64 = 1.5;

/// Components sitting on the same text line as the one being scored.
#[derive(Clone, Debug, Default)]
pub struct Neighbourhood {
    pub bbox: BoundingBox,
    pub line_mates: Vec<BoundingBox>,
}

impl Neighbourhood {
    pub fn isolated(bbox: BoundingBox) -> Self {
        Self {
            bbox,
            line_mates: Vec::new(),
        }
    }

    pub fn is_isolated(&self) -> bool {
        self.line_mates.is_empty()
    }
}

/// Line mates of every component, independent of labels.
pub fn line_neighbourhoods(components: &[StrokeComponent]) -> Vec<Neighbourhood> {
    components
        .iter()
        .enumerate()
        .map(|(i, c)| Neighbourhood {
            bbox: c.bbox,
            line_mates: components
                .iter()
                .enumerate()
                .filter(|&(j, other)| j != i && on_same_line(&c.bbox, &other.bbox))
                .map(|(_, other)| other.bbox)
                .collect(),
        })
        .collect()
}

fn on_same_line(a: &BoundingBox, b: &BoundingBox) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    let (ha, hb) = (a.h as f64, b.h as f64);
    let ratio = ha / hb;
    if ratio < HEIGHT_RATIO.0 || ratio > HEIGHT_RATIO.1 {
        return false;
    }
    let overlap = a.bottom().min(b.bottom()).saturating_sub(a.y.max(b.y)) as f64;
    if overlap < MIN_VERTICAL_OVERLAP * ha.min(hb) {
        return false;
    }
    let gap = if a.right() <= b.x {
        b.x - a.right()
    } else if b.right() <= a.x {
        a.x - b.right()
    } else {
        0
    };
    gap as f64 <= MAX_GAP_FACTOR * ha.max(hb)
}
