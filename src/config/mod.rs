//! Loading [`ExtractionConfig`] from JSON files and environment variables.
//!
//! Precedence, lowest first: built-in defaults, the JSON file (missing keys
//! keep their defaults), environment overrides. The result is validated
//! before it reaches the pipeline.
//!
//! Recognised environment variables: `MIN_CONTOUR_AREA`,
//! `CLUSTERING_PROXIMITY`, `PADDING`, `MAX_DIAGRAMS`,
//! `DIAGRAM_SORTING_METHOD`.

use crate::cluster::SortingMethod;
use crate::detector::ExtractionConfig;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("unknown sorting method {0:?} (expected \"reading_order\" or \"area\")")]
    UnknownSortingMethod(String),
}

impl ConfigError {
    pub(crate) fn invalid(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl FromStr for SortingMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reading_order" => Ok(Self::ReadingOrder),
            "area" => Ok(Self::Area),
            other => Err(ConfigError::UnknownSortingMethod(other.to_string())),
        }
    }
}

pub fn load_config(path: &Path) -> Result<ExtractionConfig, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Apply overrides from `lookup` (usually the process environment).
pub fn apply_env_overrides<F>(
    mut config: ExtractionConfig,
    lookup: F,
) -> Result<ExtractionConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("MIN_CONTOUR_AREA") {
        config.min_contour_area = parse_var("MIN_CONTOUR_AREA", &v)?;
    }
    if let Some(v) = lookup("CLUSTERING_PROXIMITY") {
        config.clustering_proximity = parse_var("CLUSTERING_PROXIMITY", &v)?;
    }
    if let Some(v) = lookup("PADDING") {
        config.padding = parse_var("PADDING", &v)?;
    }
    if let Some(v) = lookup("MAX_DIAGRAMS") {
        config.max_diagrams = parse_var("MAX_DIAGRAMS", &v)?;
    }
    if let Some(v) = lookup("DIAGRAM_SORTING_METHOD") {
        config.sorting_method = v.parse()?;
    }
    Ok(config)
}

/// Defaults or `path`, then the process environment, then validation.
pub fn resolve_config(path: Option<&Path>) -> Result<ExtractionConfig, ConfigError> {
    let base = match path {
        Some(p) => load_config(p)?,
        None => ExtractionConfig::default(),
    };
    let config = apply_env_overrides(base, |key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::invalid(key, format!("{raw:?}: {e}")))
}
