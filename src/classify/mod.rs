//! Stroke component → label + diagram confidence.
//!
//! A fixed set of [`Scorer`]s each cast a signed vote; the confidence is
//! `bias + Σ weight·vote` clamped to `[0, 1]`. Components above the
//! indecisive band become diagrams, everything else (the band included)
//! stays handwriting. Scoring is a pure function of the descriptors, the
//! line neighbourhood and the options.

mod neighbourhood;
pub mod scorers;

pub use neighbourhood::{line_neighbourhoods, Neighbourhood};
pub use scorers::{default_scorers, Scorer};

use crate::features::StrokeComponent;
use crate::types::{ComponentId, Label};
use serde::{Deserialize, Serialize};

/// Weight magnitudes of the built-in scorers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerWeights {
    pub straightness: f64,
    pub enclosure: f64,
    pub arrowhead: f64,
    pub curvature_irregularity: f64,
    pub baseline_irregularity: f64,
}

impl Default for ScorerWeights {
    fn default() -> Self {
        Self {
            straightness: 0.3,
            enclosure: 0.35,
            arrowhead: 0.3,
            curvature_irregularity: 0.45,
            baseline_irregularity: 0.25,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierOptions {
    /// Confidence before any vote.
    pub bias: f64,
    pub weights: ScorerWeights,
    /// `[low, high]`; confidence inside resolves to handwriting.
    pub indecisive_band: [f64; 2],
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            bias: 0.3,
            weights: ScorerWeights::default(),
            indecisive_band: [0.4, 0.6],
        }
    }
}

/// One scorer's contribution.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Vote {
    pub scorer: &'static str,
    pub vote: f64,
    pub weight: f64,
}

/// Full scoring record for one component.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoreCard {
    pub component: ComponentId,
    pub votes: Vec<Vote>,
    pub confidence: f64,
    pub label: Label,
    /// Confidence fell inside the indecisive band.
    pub indecisive: bool,
}

pub struct Classifier {
    scorers: Vec<Box<dyn Scorer>>,
    bias: f64,
    band: [f64; 2],
}

impl Classifier {
    pub fn new(options: &ClassifierOptions) -> Self {
        Self::with_scorers(options, default_scorers(&options.weights))
    }

    pub fn with_scorers(options: &ClassifierOptions, scorers: Vec<Box<dyn Scorer>>) -> Self {
        Self {
            scorers,
            bias: options.bias,
            band: options.indecisive_band,
        }
    }

    pub fn score(&self, component: &StrokeComponent, context: &Neighbourhood) -> ScoreCard {
        let votes: Vec<Vote> = self
            .scorers
            .iter()
            .map(|s| Vote {
                scorer: s.name(),
                vote: s.vote(component, context),
                weight: s.weight(),
            })
            .collect();
        let raw = votes
            .iter()
            .fold(self.bias, |acc, v| acc + v.weight * v.vote);
        let confidence = raw.clamp(0.0, 1.0);
        let indecisive = confidence >= self.band[0] && confidence <= self.band[1];
        let label = if confidence > self.band[1] {
            Label::Diagram
        } else {
            Label::Handwriting
        };
        ScoreCard {
            component: component.id,
            votes,
            confidence,
            label,
            indecisive,
        }
    }
}

/// Label every component in place and return the per-component score cards.
pub fn classify_components(
    components: &mut [StrokeComponent],
    options: &ClassifierOptions,
) -> Vec<ScoreCard> {
    let classifier = Classifier::new(options);
    let neighbourhoods = line_neighbourhoods(components);
    let cards: Vec<ScoreCard> = components
        .iter()
        .zip(&neighbourhoods)
        .map(|(c, n)| classifier.score(c, n))
        .collect();
    for (component, card) in components.iter_mut().zip(&cards) {
        component.label = card.label;
        component.confidence = card.confidence;
    }
    cards
}

#[cfg(test)]
mod tests;
