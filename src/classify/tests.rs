use super::scorers::{BaselineIrregularity, CurvatureIrregularity};
use super::*;
use crate::features::{ArrowheadProfile, Descriptors};
use crate::types::BoundingBox;

fn plain() -> Descriptors {
    Descriptors {
        area: 2000.0,
        ink_area: 600,
        perimeter: 200.0,
        circularity: 0.6,
        solidity: 1.0,
        hole_ratio: 0.0,
        edge_count: 4,
        straightness: 0.0,
        curvature_variance: 0.1,
        reversal_count: 0,
        elongation: 1.5,
        arrowhead: None,
    }
}

fn component(id: u32, bbox: BoundingBox, descriptors: Descriptors) -> StrokeComponent {
    StrokeComponent {
        id: ComponentId(id),
        bbox,
        boundary: Vec::new(),
        holes: Vec::new(),
        descriptors,
        label: Label::Handwriting,
        confidence: 0.0,
    }
}

fn score_alone(descriptors: Descriptors) -> ScoreCard {
    let bbox = BoundingBox::new(10, 10, 60, 40);
    let c = component(0, bbox, descriptors);
    Classifier::new(&ClassifierOptions::default()).score(&c, &Neighbourhood::isolated(bbox))
}

#[test]
fn closed_rectangle_is_a_confident_diagram() {
    let card = score_alone(Descriptors {
        straightness: 1.0,
        hole_ratio: 0.84,
        ..plain()
    });
    assert_eq!(card.label, Label::Diagram);
    assert!((card.confidence - 0.95).abs() < 1e-9, "{}", card.confidence);
    assert!(!card.indecisive);
    assert_eq!(card.votes.len(), 5);
}

#[test]
fn straight_stroke_alone_stays_handwriting() {
    let card = score_alone(Descriptors {
        straightness: 1.0,
        ..plain()
    });
    assert!((card.confidence - 0.6).abs() < 1e-9);
    assert!(card.indecisive);
    assert_eq!(card.label, Label::Handwriting);
}

#[test]
fn arrow_with_flared_head_is_a_diagram() {
    let card = score_alone(Descriptors {
        straightness: 0.98,
        edge_count: 7,
        solidity: 0.3,
        reversal_count: 4,
        curvature_variance: 0.3,
        elongation: 8.0,
        arrowhead: Some(ArrowheadProfile {
            length: 175.0,
            shaft_width: 3.0,
            end_flare: 10.0,
        }),
        ..plain()
    });
    assert_eq!(card.label, Label::Diagram);
    assert!(card.confidence > 0.85);
}

#[test]
fn wiggly_scribble_scores_zero() {
    let card = score_alone(Descriptors {
        straightness: 0.4,
        edge_count: 3,
        reversal_count: 40,
        curvature_variance: 0.9,
        ..plain()
    });
    assert_eq!(card.confidence, 0.0);
    assert_eq!(card.label, Label::Handwriting);
    assert!(!card.indecisive);
}

#[test]
fn curvature_penalty_grows_with_reversals() {
    let scorer = CurvatureIrregularity { weight: 0.45 };
    let ctx = Neighbourhood::default();
    let calm = component(0, BoundingBox::default(), plain());
    let busy = component(
        1,
        BoundingBox::default(),
        Descriptors {
            reversal_count: 10,
            ..plain()
        },
    );
    assert_eq!(scorer.vote(&calm, &ctx), 0.0);
    assert!((scorer.vote(&busy, &ctx) + 0.5).abs() < 1e-9);
}

#[test]
fn aligned_bottoms_soften_the_baseline_penalty() {
    let scorer = BaselineIrregularity { weight: 0.25 };
    let c = component(0, BoundingBox::new(0, 0, 20, 20), plain());
    let ragged = Neighbourhood {
        bbox: c.bbox,
        line_mates: vec![
            BoundingBox::new(25, 4, 20, 24),
            BoundingBox::new(50, 0, 20, 17),
            BoundingBox::new(75, 2, 20, 22),
        ],
    };
    let aligned = Neighbourhood {
        bbox: c.bbox,
        line_mates: vec![
            BoundingBox::new(25, 0, 20, 20),
            BoundingBox::new(50, 0, 20, 20),
            BoundingBox::new(75, 0, 20, 20),
        ],
    };
    assert_eq!(scorer.vote(&c, &ragged), -1.0);
    assert_eq!(scorer.vote(&c, &aligned), -0.25);
    assert_eq!(scorer.vote(&c, &Neighbourhood::isolated(c.bbox)), 0.0);
}

#[test]
fn handwriting_neighbours_pull_a_shape_below_the_band() {
    let boxy = Descriptors {
        hole_ratio: 0.8,
        ..plain()
    };
    let mut components = vec![
        component(0, BoundingBox::new(0, 100, 20, 20), boxy.clone()),
        component(1, BoundingBox::new(25, 102, 20, 24), boxy.clone()),
        component(2, BoundingBox::new(50, 98, 20, 18), boxy.clone()),
        component(3, BoundingBox::new(75, 101, 20, 22), boxy.clone()),
        component(4, BoundingBox::new(400, 400, 20, 22), boxy),
    ];
    let cards = classify_components(&mut components, &ClassifierOptions::default());
    assert_eq!(cards.len(), 5);

    assert_eq!(components[1].label, Label::Handwriting);
    assert!((components[1].confidence - 0.4).abs() < 1e-9);
    assert_eq!(components[4].label, Label::Diagram);
    assert!((components[4].confidence - 0.65).abs() < 1e-9);
    assert_eq!(cards[4].component, ComponentId(4));
}
