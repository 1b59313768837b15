//! Tabular data sets, nominal feature encoding and a decision forest classifier
//!
//! Data sets hold typed rows with categorical, integral, floating point,
//! binary and custom object columns. Dimension mappers expand input columns
//! into derived ones, transformers turn datums into real valued feature
//! vectors, and classifiers built on a pluggable forest backend predict
//! labels from those vectors.

pub mod classifier;
pub mod core;
pub mod data;
pub mod mapper;
pub mod persistence;
pub mod transform;
pub mod utils;

// Re-export main types for convenience
pub use crate::classifier::{
    DatumClassifier, DecisionForestClassifier, ErrorRates, ForestBackend, ForestErrorReport,
    ForestModel, ForestParameters, ProbabilisticClassifier, TrainingMatrix,
};
pub use crate::core::error::*;
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::data::{Category, CsvOptions, DataTable, DataTableRow};
pub use crate::mapper::{DimensionMapper, ExpansionRule, MappingRules, NamedColumnDimensionMapper};
pub use crate::persistence::ClassifierSnapshot;
pub use crate::transform::{DataSetTransformer, NominalEncoder, NominalTransformer};

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
