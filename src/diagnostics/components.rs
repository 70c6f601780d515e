use crate::classify::{ScoreCard, Vote};
use crate::features::{Descriptors, StrokeComponent};
use crate::types::{BoundingBox, ComponentId, Label};
use serde::Serialize;

/// Classification record of one stroke component.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSample {
    pub id: ComponentId,
    pub bbox: BoundingBox,
    pub label: Label,
    pub confidence: f64,
    pub indecisive: bool,
    pub votes: Vec<Vote>,
    pub descriptors: Descriptors,
}

impl ComponentSample {
    pub fn from_scored(component: &StrokeComponent, card: &ScoreCard) -> Self {
        Self {
            id: component.id,
            bbox: component.bbox,
            label: card.label,
            confidence: card.confidence,
            indecisive: card.indecisive,
            votes: card.votes.clone(),
            descriptors: component.descriptors.clone(),
        }
    }
}

/// Label counts over a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelCounts {
    pub handwriting: usize,
    pub diagram: usize,
    pub indecisive: usize,
}

impl LabelCounts {
    pub fn tally(samples: &[ComponentSample]) -> Self {
        samples.iter().fold(Self::default(), |mut acc, s| {
            match s.label {
                Label::Handwriting => acc.handwriting += 1,
                Label::Diagram => acc.diagram += 1,
            }
            if s.indecisive {
                acc.indecisive += 1;
            }
            acc
        })
    }
}
