//! Structured record of what the extractor did on one note.
//!
//! [`PipelineTrace`] is returned with every [`ExtractionOutcome`](crate::ExtractionOutcome):
//! per-component scores and votes, every cluster decision with its
//! rejection reason, crop statistics and per-stage timings. Everything but
//! the timings is deterministic for a given input and configuration.

pub mod clusters;
pub mod components;
pub mod pipeline;
pub mod timing;

pub use clusters::ClusterSample;
pub use components::{ComponentSample, LabelCounts};
pub use pipeline::{InputDescriptor, PipelineTrace};
pub use timing::{Stage, StageTiming, TimingBreakdown};
