//! Classifier snapshots
//!
//! A snapshot stores what is needed to restore a trained classifier without
//! training again: the serialised backend model and the label and feature
//! layout it was trained with. The data sets and the transformer are not part
//! of it and have to be supplied when restoring.

use crate::classifier::backend::ForestParameters;
use crate::classifier::metrics::ForestErrorReport;
use crate::core::{ClassifierError, Result, SwotError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Serializable state of a trained decision forest classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierSnapshot {
    /// Backend specific serialised model
    pub model: String,
    /// Class labels in identifier order
    pub label_values: Vec<String>,
    /// Width of the encoded feature vectors, label excluded
    pub feature_count: usize,
    pub parameters: ForestParameters,
    pub error_report: ForestErrorReport,
    pub metadata: SnapshotMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    /// Library version used to create the snapshot
    pub library_version: String,
    pub created_at: DateTime<Utc>,
}

impl SnapshotMetadata {
    pub fn now() -> Self {
        Self {
            library_version: env!("CARGO_PKG_VERSION").to_string(),
            created_at: Utc::now(),
        }
    }
}

impl ClassifierSnapshot {
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|_| SwotError::Classifier(ClassifierError::SerializationFailed))
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|_| SwotError::Classifier(ClassifierError::DeserializationFailed))
    }

    /// Save snapshot to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path).map_err(SwotError::IoError)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|_| SwotError::Classifier(ClassifierError::SerializationFailed))?;
        writer.flush().map_err(SwotError::IoError)
    }

    /// Load snapshot from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(SwotError::IoError)?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|_| SwotError::Classifier(ClassifierError::DeserializationFailed))
    }

    /// Human readable summary
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let in_sample = &self.error_report.in_sample;
        let out_of_bag = &self.error_report.out_of_bag;

        let _ = writeln!(out, "=== Decision Forest Snapshot ===");
        let _ = writeln!(out, "Labels: {}", self.label_values.join(", "));
        let _ = writeln!(out, "Features: {}", self.feature_count);
        let _ = writeln!(out, "Trees: {}", self.parameters.tree_count);
        let _ = writeln!(out, "Sample Ratio: {}", self.parameters.sample_ratio);
        let _ = writeln!(out, "Library Version: {}", self.metadata.library_version);
        let _ = writeln!(out, "Created: {}", self.metadata.created_at.to_rfc3339());
        let _ = writeln!(out, "Error Rates (in sample / out of bag):");
        for (name, a, b) in [
            (
                "Relative class error",
                in_sample.relative_class_error,
                out_of_bag.relative_class_error,
            ),
            (
                "Cross-entropy",
                in_sample.average_cross_entropy,
                out_of_bag.average_cross_entropy,
            ),
            (
                "RMS error",
                in_sample.root_mean_square_error,
                out_of_bag.root_mean_square_error,
            ),
            ("Average error", in_sample.average_error, out_of_bag.average_error),
            (
                "Average relative error",
                in_sample.average_relative_error,
                out_of_bag.average_relative_error,
            ),
        ] {
            let _ = writeln!(out, "  {name}: {a:.6} / {b:.6}");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::metrics::ErrorRates;
    use tempfile::NamedTempFile;

    fn snapshot() -> ClassifierSnapshot {
        ClassifierSnapshot {
            model: "{\"centroids\":[[0.0],[1.0]]}".to_string(),
            label_values: vec!["no".to_string(), "yes".to_string()],
            feature_count: 1,
            parameters: ForestParameters::default().with_tree_count(50),
            error_report: ForestErrorReport {
                in_sample: ErrorRates {
                    relative_class_error: 0.1,
                    ..ErrorRates::default()
                },
                out_of_bag: ErrorRates {
                    relative_class_error: 0.25,
                    ..ErrorRates::default()
                },
            },
            metadata: SnapshotMetadata::now(),
        }
    }

    #[test]
    fn test_snapshot_file_round_trip() -> Result<()> {
        let snapshot = snapshot();
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        snapshot.save_to_file(temp_file.path())?;

        let loaded = ClassifierSnapshot::load_from_file(temp_file.path())?;
        assert_eq!(loaded, snapshot);
        assert_eq!(loaded.metadata.library_version, env!("CARGO_PKG_VERSION"));
        Ok(())
    }

    #[test]
    fn test_corrupt_snapshot() {
        assert!(matches!(
            ClassifierSnapshot::from_json_str("{\"model\": 3}"),
            Err(SwotError::Classifier(ClassifierError::DeserializationFailed))
        ));
        assert!(matches!(
            ClassifierSnapshot::load_from_file("/nonexistent/snapshot.json"),
            Err(SwotError::IoError(_))
        ));
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_write_error_is_reported() {
        // The snapshot fits in the write buffer, so the error surfaces on flush
        assert!(matches!(
            snapshot().save_to_file("/dev/full"),
            Err(SwotError::IoError(_))
        ));
    }

    #[test]
    fn test_summary() {
        let summary = snapshot().summary();
        assert!(summary.contains("Labels: no, yes"));
        assert!(summary.contains("Trees: 50"));
        assert!(summary.contains("Relative class error: 0.100000 / 0.250000"));
    }
}
