//! Error and warning types shared by the pipeline and the file layer.
//!
//! Fatal conditions (unreadable input, invalid configuration) surface as
//! [`ExtractError`]. Problems confined to a single cluster never abort a run;
//! they are reported as [`ExtractionWarning`] values next to the result.

use crate::config::ConfigError;
use crate::types::BoundingBox;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("invalid input image: {reason}")]
    InvalidInput { reason: String },

    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),

    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize {what}: {source}")]
    Serialize {
        what: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ExtractError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

/// Non-fatal problem recorded while emitting a single cluster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractionWarning {
    /// The padded box collapsed to zero width or height after clipping.
    DegenerateCrop { position: usize, bbox: BoundingBox },
    /// The padded box lies (partially) outside the source raster.
    CropOutOfBounds { position: usize, bbox: BoundingBox },
}

impl std::fmt::Display for ExtractionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DegenerateCrop { position, bbox } => write!(
                f,
                "cluster {position} skipped: degenerate crop {}x{} at ({}, {})",
                bbox.w, bbox.h, bbox.x, bbox.y
            ),
            Self::CropOutOfBounds { position, bbox } => write!(
                f,
                "cluster {position} skipped: crop {}x{} at ({}, {}) exceeds the image",
                bbox.w, bbox.h, bbox.x, bbox.y
            ),
        }
    }
}
