//! Boundary to the decision forest implementation
//!
//! Tree induction lives behind [`ForestBackend`]. The classifier hands it an
//! encoded [`TrainingMatrix`] and gets back a [`ForestModel`] producing class
//! posteriors, together with the error report of the training run.

use crate::classifier::metrics::ForestErrorReport;
use crate::classifier::DEFAULT_TREE_COUNT;
use crate::core::{ClassifierError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fraction of the training set each tree is grown on
pub const DEFAULT_SAMPLE_RATIO: f64 = 0.66;

/// Forest training parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestParameters {
    pub tree_count: usize,
    pub sample_ratio: f64,
}

impl Default for ForestParameters {
    fn default() -> Self {
        Self {
            tree_count: DEFAULT_TREE_COUNT,
            sample_ratio: DEFAULT_SAMPLE_RATIO,
        }
    }
}

impl ForestParameters {
    pub fn with_tree_count(mut self, tree_count: usize) -> Self {
        self.tree_count = tree_count;
        self
    }

    pub fn with_sample_ratio(mut self, sample_ratio: f64) -> Self {
        self.sample_ratio = sample_ratio;
        self
    }

    /// At least one tree, sample ratio in (0, 1]
    pub fn validate(&self) -> Result<()> {
        if self.tree_count == 0 || !(self.sample_ratio > 0.0 && self.sample_ratio <= 1.0) {
            return Err(ClassifierError::InvalidParamCount.into());
        }
        Ok(())
    }
}

/// Encoded training data: features followed by the class identifier, one row per record
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingMatrix {
    rows: Vec<Vec<f64>>,
    feature_count: usize,
    class_count: usize,
}

impl TrainingMatrix {
    /// Every row must have `feature_count + 1` entries, the last one a class
    /// identifier in `[0, class_count)`.
    pub fn new(rows: Vec<Vec<f64>>, feature_count: usize, class_count: usize) -> Result<Self> {
        for row in &rows {
            if row.len() != feature_count + 1 {
                return Err(ClassifierError::InvalidParamCount.into());
            }
            let label = row[feature_count];
            if !(label >= 0.0 && label.fract() == 0.0 && (label as usize) < class_count) {
                return Err(ClassifierError::InvalidClassIndex.into());
            }
        }
        Ok(Self {
            rows,
            feature_count,
            class_count,
        })
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn features(&self, i: usize) -> &[f64] {
        &self.rows[i][..self.feature_count]
    }

    pub fn label(&self, i: usize) -> usize {
        self.rows[i][self.feature_count] as usize
    }

    pub fn labels(&self) -> Vec<usize> {
        (0..self.rows.len()).map(|i| self.label(i)).collect()
    }

    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    pub fn class_count(&self) -> usize {
        self.class_count
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A trained forest
pub trait ForestModel: fmt::Debug + Send + Sync {
    /// One probability per class for an encoded feature vector
    fn posterior_probabilities(&self, features: &[f64]) -> Result<Vec<f64>>;

    /// Serialised form accepted by [`ForestBackend::deserialize_model`].
    /// Failures should be reported as [`ClassifierError::SerializationFailed`].
    fn serialize(&self) -> Result<String>;
}

pub trait ForestBackend {
    type Model: ForestModel;

    fn train(
        &self,
        matrix: &TrainingMatrix,
        parameters: &ForestParameters,
    ) -> Result<(Self::Model, ForestErrorReport)>;

    /// Failures should be reported as [`ClassifierError::DeserializationFailed`].
    fn deserialize_model(&self, serialized: &str) -> Result<Self::Model>;
}
