//! Extractor orchestrating the five stages on one decoded note.
//!
//! Overview
//! - Binarises the note with a local-mean threshold and a small closing.
//! - Traces 8-connected ink components and annotates them with geometric
//!   descriptors; components below the contour-area threshold are noise.
//! - Scores every component with the weighted scorer set and labels it
//!   diagram or handwriting.
//! - Groups diagram components by border proximity, pads and disjoints the
//!   cluster boxes, drops clusters touching handwriting, caps and orders the
//!   rest.
//! - Crops each retained cluster into a transparent RGBA image and builds
//!   the manifest.
//!
//! Modules
//! - [`params`] – [`ExtractionConfig`] and its validation.
//! - `pipeline` – the [`DiagramExtractor`] implementation.

pub mod params;
mod pipeline;

pub use params::ExtractionConfig;
pub use pipeline::{DiagramExtractor, ExtractionOutcome};
