use super::ExtractedDiagram;
use serde::{Deserialize, Serialize};

pub const NO_DIAGRAMS_MESSAGE: &str = "No diagrams detected";

/// Manifest describing the crops taken from one note.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub original_file: String,
    pub diagrams: Vec<ManifestEntry>,
    /// Present only when `diagrams` is empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub file: String,
    /// `[x, y, w, h]` in original image coordinates.
    pub bbox: [u32; 4],
    pub confidence: f64,
}

impl Manifest {
    pub fn is_empty(&self) -> bool {
        self.diagrams.is_empty()
    }
}

pub fn build_manifest(original_file: &str, diagrams: &[ExtractedDiagram]) -> Manifest {
    let entries: Vec<ManifestEntry> = diagrams
        .iter()
        .map(|d| ManifestEntry {
            file: d.file.clone(),
            bbox: d.bbox.to_array(),
            confidence: round3(d.confidence),
        })
        .collect();
    let message = entries
        .is_empty()
        .then(|| NO_DIAGRAMS_MESSAGE.to_string());
    Manifest {
        original_file: original_file.to_string(),
        diagrams: entries,
        message,
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}
