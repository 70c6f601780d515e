use super::{ClusterSample, ComponentSample, LabelCounts, TimingBreakdown};
use crate::cluster::Clustering;
use crate::error::ExtractionWarning;
use crate::extract::Extraction;
use serde::Serialize;

/// End-to-end record of one extraction run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    /// Ink regions dropped by the contour-area filter.
    pub discarded_components: usize,
    pub labels: LabelCounts,
    pub components: Vec<ComponentSample>,
    pub proximity_groups: usize,
    pub overlap_merges: usize,
    /// Emitted clusters in output order, then rejected ones.
    pub clusters: Vec<ClusterSample>,
    pub warnings: Vec<ExtractionWarning>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub ink_pixels: usize,
}

impl PipelineTrace {
    pub fn new(input: InputDescriptor) -> Self {
        Self {
            input,
            timings: TimingBreakdown::default(),
            discarded_components: 0,
            labels: LabelCounts::default(),
            components: Vec::new(),
            proximity_groups: 0,
            overlap_merges: 0,
            clusters: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn record_components(&mut self, samples: Vec<ComponentSample>, discarded: usize) {
        self.labels = LabelCounts::tally(&samples);
        self.components = samples;
        self.discarded_components = discarded;
    }

    /// Record every cluster decision. Crops are matched to clusters by
    /// their member lists, so skipped clusters carry no file.
    pub fn record_clusters(&mut self, clustering: &Clustering, extraction: &Extraction) {
        self.proximity_groups = clustering.proximity_groups;
        self.overlap_merges = clustering.overlap_merges;
        self.clusters = clustering
            .clusters
            .iter()
            .map(|cluster| {
                let crop = extraction
                    .diagrams
                    .iter()
                    .find(|d| d.members == cluster.members);
                ClusterSample::retained(cluster, crop)
            })
            .chain(clustering.rejected.iter().map(ClusterSample::rejected))
            .collect();
        self.warnings = extraction.warnings.clone();
    }

    pub fn emitted(&self) -> impl Iterator<Item = &ClusterSample> + '_ {
        self.clusters.iter().filter(|c| c.is_emitted())
    }

    pub fn rejected(&self) -> impl Iterator<Item = &ClusterSample> + '_ {
        self.clusters.iter().filter(|c| c.rejection.is_some())
    }

    /// One-line summary for log output.
    pub fn summary(&self) -> String {
        format!(
            "{}x{} ink={} components={} (discarded {}, diagram {}, handwriting {}) \
             groups={} merges={} emitted={} rejected={} warnings={} total={:.1}ms",
            self.input.width,
            self.input.height,
            self.input.ink_pixels,
            self.components.len(),
            self.discarded_components,
            self.labels.diagram,
            self.labels.handwriting,
            self.proximity_groups,
            self.overlap_merges,
            self.emitted().count(),
            self.rejected().count(),
            self.warnings.len(),
            self.timings.total_ms,
        )
    }
}
