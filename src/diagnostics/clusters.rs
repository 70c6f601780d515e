use crate::cluster::{DiagramCluster, RejectedCluster, RejectionReason};
use crate::extract::{CropStats, ExtractedDiagram};
use crate::types::{BoundingBox, ComponentId};
use serde::Serialize;

/// Fate of one cluster built during a run.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSample {
    pub members: Vec<ComponentId>,
    pub bbox: BoundingBox,
    pub padded: BoundingBox,
    pub confidence: f64,
    /// Output file name when the cluster was emitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<CropStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<RejectionReason>,
}

impl ClusterSample {
    pub fn retained(cluster: &DiagramCluster, crop: Option<&ExtractedDiagram>) -> Self {
        Self {
            members: cluster.members.clone(),
            bbox: cluster.bbox,
            padded: cluster.padded,
            confidence: cluster.confidence,
            file: crop.map(|d| d.file.clone()),
            stats: crop.map(|d| d.stats),
            rejection: None,
        }
    }

    pub fn rejected(rejected: &RejectedCluster) -> Self {
        let cluster = &rejected.cluster;
        Self {
            members: cluster.members.clone(),
            bbox: cluster.bbox,
            padded: cluster.padded,
            confidence: cluster.confidence,
            file: None,
            stats: None,
            rejection: Some(rejected.reason),
        }
    }

    pub fn is_emitted(&self) -> bool {
        self.file.is_some()
    }
}
