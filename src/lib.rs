#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod types;

// Stage modules – callable on their own, but the extractor is the usual entry.
pub mod classify;
pub mod cluster;
pub mod debug;
pub mod extract;
pub mod features;
pub mod preprocess;

// --- High-level re-exports -------------------------------------------------

// Main entry points: extractor + results.
pub use crate::detector::{DiagramExtractor, ExtractionConfig, ExtractionOutcome};
pub use crate::error::{ExtractError, ExtractionWarning};
pub use crate::extract::{ExtractedDiagram, Manifest, ManifestEntry};
pub use crate::types::{BoundingBox, ComponentId, Label};

// High-level diagnostics returned with every outcome.
pub use crate::diagnostics::PipelineTrace;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use diagram_extractor::prelude::*;
///
/// # fn main() -> Result<(), ExtractError> {
/// let (w, h) = (320usize, 240usize);
/// let pixels = vec![255u8; w * h * 4];
/// let note = ImageRgba8 { w, h, stride: w * 4, data: &pixels };
///
/// let extractor = DiagramExtractor::new(ExtractionConfig {
///     padding: 5,
///     ..Default::default()
/// })?;
///
/// let outcome = extractor.process(note, "blank.png")?;
/// println!("diagrams={} total_ms={:.3}", outcome.diagrams.len(), outcome.trace.timings.total_ms);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ImageRgba8;
    pub use crate::{DiagramExtractor, ExtractError, ExtractionConfig, ExtractionOutcome};
}

// --- Stage-level API (for tools & advanced users) ---------------------------

pub mod stages {
    // Stage runners.
    pub use crate::classify::classify_components;
    pub use crate::cluster::cluster_diagrams;
    pub use crate::extract::{build_manifest, extract_diagrams};
    pub use crate::features::extract_components;
    pub use crate::preprocess::binarize;

    // Stage outputs.
    pub use crate::classify::ScoreCard;
    pub use crate::cluster::{Clustering, DiagramCluster, RejectedCluster, RejectionReason};
    pub use crate::extract::Extraction;
    pub use crate::features::{FeatureSet, StrokeComponent};
    pub use crate::preprocess::StrokeMask;

    // Structured diagnostics types.
    pub use crate::diagnostics::{
        ClusterSample, ComponentSample, InputDescriptor, LabelCounts, Stage, StageTiming,
        TimingBreakdown,
    };
}
