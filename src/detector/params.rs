//! Run-wide configuration of the extractor.
//!
//! Every field has a default, so a JSON file only needs the keys it
//! changes. [`ExtractionConfig::validate`] is run by
//! [`DiagramExtractor::new`](super::DiagramExtractor::new); the stages never
//! see an unchecked value.

use crate::classify::ClassifierOptions;
use crate::cluster::{ClusterOptions, SortingMethod};
use crate::config::ConfigError;
use crate::preprocess::PreprocessOptions;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Components whose outer border encloses less than this (px²) are noise.
    pub min_contour_area: f64,
    /// Maximum border distance (px) joining two diagram components, and the
    /// clearance a cluster must keep from handwriting.
    pub clustering_proximity: f64,
    /// Margin (px) added around each cluster before cropping.
    pub padding: u32,
    /// Upper bound on emitted diagrams.
    pub max_diagrams: usize,
    pub sorting_method: SortingMethod,
    /// Clusters with a lower mean confidence are not emitted.
    pub min_confidence: f64,
    pub preprocess: PreprocessOptions,
    pub classifier: ClassifierOptions,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_contour_area: 750.0,
            clustering_proximity: 25.0,
            padding: 3,
            max_diagrams: 10,
            sorting_method: SortingMethod::ReadingOrder,
            min_confidence: 0.0,
            preprocess: PreprocessOptions::default(),
            classifier: ClassifierOptions::default(),
        }
    }
}

impl ExtractionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("min_contour_area", self.min_contour_area)?;
        non_negative("clustering_proximity", self.clustering_proximity)?;
        if self.max_diagrams < 1 {
            return Err(ConfigError::invalid("max_diagrams", "must be at least 1"));
        }
        unit_interval("min_confidence", self.min_confidence)?;

        let block = self.preprocess.block_size;
        if block < 3 || block % 2 == 0 {
            return Err(ConfigError::invalid(
                "preprocess.block_size",
                format!("{block} is not an odd number ≥ 3"),
            ));
        }

        let classifier = &self.classifier;
        let [low, high] = classifier.indecisive_band;
        unit_interval("classifier.indecisive_band", low)?;
        unit_interval("classifier.indecisive_band", high)?;
        if low > high {
            return Err(ConfigError::invalid(
                "classifier.indecisive_band",
                format!("[{low}, {high}] is not ordered"),
            ));
        }
        finite("classifier.bias", classifier.bias)?;
        let w = &classifier.weights;
        for (key, value) in [
            ("classifier.weights.straightness", w.straightness),
            ("classifier.weights.enclosure", w.enclosure),
            ("classifier.weights.arrowhead", w.arrowhead),
            (
                "classifier.weights.curvature_irregularity",
                w.curvature_irregularity,
            ),
            (
                "classifier.weights.baseline_irregularity",
                w.baseline_irregularity,
            ),
        ] {
            finite(key, value)?;
        }
        Ok(())
    }

    pub fn cluster_options(&self) -> ClusterOptions {
        ClusterOptions {
            proximity: self.clustering_proximity,
            padding: self.padding,
            max_diagrams: self.max_diagrams,
            sorting: self.sorting_method,
            min_confidence: self.min_confidence,
        }
    }
}

fn finite(key: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(key, format!("{value} is not finite")))
    }
}

fn non_negative(key: &str, value: f64) -> Result<(), ConfigError> {
    finite(key, value)?;
    if value < 0.0 {
        return Err(ConfigError::invalid(key, format!("{value} is negative")));
    }
    Ok(())
}

fn unit_interval(key: &str, value: f64) -> Result<(), ConfigError> {
    finite(key, value)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::invalid(
            key,
            format!("{value} is outside [0, 1]"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    type Mutation = Box<dyn Fn(&mut ExtractionConfig)>;

    #[test]
    fn defaults_are_valid() {
        let config = ExtractionConfig::default();
        assert!(config.validate().is_ok());
        let opts = config.cluster_options();
        assert_eq!(opts.proximity, 25.0);
        assert_eq!(opts.padding, 3);
        assert_eq!(opts.max_diagrams, 10);
        assert_eq!(opts.sorting, SortingMethod::ReadingOrder);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let cases: Vec<(&str, Mutation)> = vec![
            ("max_diagrams", Box::new(|c| c.max_diagrams = 0)),
            ("min_contour_area", Box::new(|c| c.min_contour_area = -1.0)),
            (
                "clustering_proximity",
                Box::new(|c| c.clustering_proximity = f64::NAN),
            ),
            ("min_confidence", Box::new(|c| c.min_confidence = 1.5)),
            (
                "preprocess.block_size",
                Box::new(|c| c.preprocess.block_size = 10),
            ),
            (
                "preprocess.block_size",
                Box::new(|c| c.preprocess.block_size = 1),
            ),
            (
                "classifier.indecisive_band",
                Box::new(|c| c.classifier.indecisive_band = [0.7, 0.3]),
            ),
            (
                "classifier.weights.enclosure",
                Box::new(|c| c.classifier.weights.enclosure = f64::INFINITY),
            ),
        ];
        for (expected, mutate) in cases {
            let mut config = ExtractionConfig::default();
            mutate(&mut config);
            match config.validate() {
                Err(ConfigError::InvalidValue { key, .. }) => assert_eq!(key, expected),
                other => panic!("{expected}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn sorting_method_round_trips_in_snake_case() {
        let config = ExtractionConfig {
            sorting_method: SortingMethod::Area,
            ..ExtractionConfig::default()
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["sorting_method"], "area");
        let back: ExtractionConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }
}
