//! Extraction pipeline driving one note end-to-end.
//!
//! The [`DiagramExtractor`] holds a validated configuration and no other
//! state, so one instance can serve any number of notes, from any number of
//! threads.
//!
//! Typical usage:
//! ```no_run
//! use diagram_extractor::{DiagramExtractor, ExtractionConfig};
//! use diagram_extractor::image::ImageRgba8;
//!
//! # fn example(note: &image::RgbaImage) -> Result<(), diagram_extractor::ExtractError> {
//! let extractor = DiagramExtractor::new(ExtractionConfig::default())?;
//! let outcome = extractor.process(ImageRgba8::from_rgba(note), "note.png")?;
//! for entry in &outcome.manifest.diagrams {
//!     println!("{} {:?} {:.3}", entry.file, entry.bbox, entry.confidence);
//! }
//! # Ok(())
//! # }
//! ```
use super::params::ExtractionConfig;
use crate::classify::classify_components;
use crate::cluster::cluster_diagrams;
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{ComponentSample, InputDescriptor, PipelineTrace, Stage};
use crate::error::{ExtractError, ExtractionWarning};
use crate::extract::{build_manifest, extract_diagrams, ExtractedDiagram, Manifest};
use crate::features::extract_components;
use crate::image::io::decode_raster;
use crate::image::ImageRgba8;
use crate::preprocess::{binarize, StrokeMask};
use log::{debug, info};
use std::time::Instant;

/// Everything one run produces.
#[derive(Clone, Debug)]
pub struct ExtractionOutcome {
    pub manifest: Manifest,
    /// Crops in manifest order.
    pub diagrams: Vec<ExtractedDiagram>,
    pub warnings: Vec<ExtractionWarning>,
    pub trace: PipelineTrace,
    /// Binary ink mask the stages worked on.
    pub mask: StrokeMask,
}

impl ExtractionOutcome {
    pub fn is_empty(&self) -> bool {
        self.diagrams.is_empty()
    }
}

/// Handwritten-note diagram extractor.
#[derive(Clone, Debug)]
pub struct DiagramExtractor {
    config: ExtractionConfig,
}

impl DiagramExtractor {
    /// Validate `config` and build an extractor around it.
    pub fn new(config: ExtractionConfig) -> Result<Self, ExtractError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Decode an encoded raster and run the pipeline on it.
    pub fn process_encoded(
        &self,
        bytes: &[u8],
        original_file: &str,
    ) -> Result<ExtractionOutcome, ExtractError> {
        let decoded = decode_raster(bytes)?;
        self.process(ImageRgba8::from_rgba(&decoded), original_file)
    }

    /// Run all stages on `input`. `original_file` only names the note in the
    /// manifest.
    pub fn process(
        &self,
        input: ImageRgba8<'_>,
        original_file: &str,
    ) -> Result<ExtractionOutcome, ExtractError> {
        input.validate()?;
        let (width, height) = (input.w, input.h);
        debug!(
            "DiagramExtractor::process start file={} w={} h={}",
            original_file, width, height
        );
        let total_start = Instant::now();
        let config = &self.config;

        let stage_start = Instant::now();
        let mask = binarize(input, &config.preprocess);
        let preprocess_ms = elapsed_ms(stage_start);
        let mut trace = PipelineTrace::new(InputDescriptor {
            width,
            height,
            ink_pixels: mask.ink_pixels(),
        });
        trace.timings.push(Stage::Preprocess, preprocess_ms);
        debug!(
            "[preprocess] ink_pixels={} elapsed_ms={:.3}",
            trace.input.ink_pixels, preprocess_ms
        );

        let stage_start = Instant::now();
        let features = extract_components(&mask, config.min_contour_area);
        let features_ms = elapsed_ms(stage_start);
        trace.timings.push(Stage::Features, features_ms);
        debug!(
            "[features] kept={} discarded={} elapsed_ms={:.3}",
            features.components.len(),
            features.discarded,
            features_ms
        );
        let mut components = features.components;

        let stage_start = Instant::now();
        let cards = classify_components(&mut components, &config.classifier);
        let classify_ms = elapsed_ms(stage_start);
        trace.timings.push(Stage::Classify, classify_ms);
        let samples: Vec<ComponentSample> = components
            .iter()
            .zip(&cards)
            .map(|(component, card)| ComponentSample::from_scored(component, card))
            .collect();
        trace.record_components(samples, features.discarded);
        debug!(
            "[classify] diagram={} handwriting={} indecisive={} elapsed_ms={:.3}",
            trace.labels.diagram, trace.labels.handwriting, trace.labels.indecisive, classify_ms
        );

        let stage_start = Instant::now();
        let clustering = cluster_diagrams(
            &components,
            width as u32,
            height as u32,
            &config.cluster_options(),
        );
        let cluster_ms = elapsed_ms(stage_start);
        trace.timings.push(Stage::Cluster, cluster_ms);
        debug!(
            "[cluster] groups={} merges={} retained={} rejected={} elapsed_ms={:.3}",
            clustering.proximity_groups,
            clustering.overlap_merges,
            clustering.clusters.len(),
            clustering.rejected.len(),
            cluster_ms
        );

        let stage_start = Instant::now();
        let extraction = extract_diagrams(input, &mask, &clustering.clusters);
        let manifest = build_manifest(original_file, &extraction.diagrams);
        let extract_ms = elapsed_ms(stage_start);
        trace.timings.push(Stage::Extract, extract_ms);
        trace.record_clusters(&clustering, &extraction);
        trace.timings.total_ms = elapsed_ms(total_start);
        debug!("[extract] {}", trace.summary());
        info!(
            "{}: {} diagram(s) extracted in {:.1} ms",
            original_file,
            extraction.diagrams.len(),
            trace.timings.total_ms
        );

        Ok(ExtractionOutcome {
            manifest,
            diagrams: extraction.diagrams,
            warnings: extraction.warnings,
            trace,
            mask,
        })
    }
}
