//! Error types for the data model, the encoding pipeline and the classifier boundary

use crate::core::types::ColumnType;
use thiserror::Error;

/// Failures reported by a forest backend or by the classifier wrapping it.
///
/// The discriminants are stable integer codes so that backends reporting
/// numeric status codes can be mapped without loss.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierError {
    #[error("unclassified backend failure")]
    Unknown,

    #[error("class index outside the range of known labels")]
    InvalidClassIndex,

    #[error("backend rejected the training parameters")]
    InvalidParamCount,

    #[error("model serialization failed")]
    SerializationFailed,

    #[error("model deserialization failed")]
    DeserializationFailed,
}

impl ClassifierError {
    /// Numeric status code of the failure
    pub fn code(&self) -> i32 {
        match self {
            ClassifierError::Unknown => 0,
            ClassifierError::InvalidClassIndex => -2,
            ClassifierError::InvalidParamCount => -1,
            ClassifierError::SerializationFailed => -100,
            ClassifierError::DeserializationFailed => -101,
        }
    }

    /// Map a backend status code back to an error. Unrecognised codes are `Unknown`.
    pub fn from_code(code: i32) -> Self {
        match code {
            -2 => ClassifierError::InvalidClassIndex,
            -1 => ClassifierError::InvalidParamCount,
            -100 => ClassifierError::SerializationFailed,
            -101 => ClassifierError::DeserializationFailed,
            _ => ClassifierError::Unknown,
        }
    }
}

#[derive(Error, Debug)]
pub enum SwotError {
    #[error("Column type mismatch: expected {expected:?}, got {actual:?}")]
    SchemaMismatch {
        expected: Vec<ColumnType>,
        actual: Vec<ColumnType>,
    },

    #[error("Value {value} is not compatible with column {column} of type {column_type:?}")]
    TypeMismatch {
        column: usize,
        column_type: ColumnType,
        value: String,
    },

    #[error("Column index {index} out of range for {column_count} columns")]
    ColumnOutOfRange { index: usize, column_count: usize },

    #[error("Datum index {index} out of range for {datum_count} rows")]
    DatumOutOfRange { index: usize, datum_count: usize },

    #[error("Column type code {0} has no storage class")]
    UnknownColumnType(u64),

    #[error("Category '{0}' has already been added")]
    DuplicateCategory(String),

    #[error("No category named '{0}'")]
    UnknownCategory(String),

    #[error("Value '{value}' is not part of category '{category}'")]
    UnknownCategoryValue { category: String, value: String },

    #[error("Column {column} is not categorical")]
    NotCategorical { column: usize },

    #[error("Column {column} is already assigned to category '{category}'")]
    CategoryAlreadyAssigned { column: usize, category: String },

    #[error("Categorical column {column} has no category assigned")]
    UnassignedCategory { column: usize },

    #[error("No column named '{0}'")]
    UnknownColumnName(String),

    #[error("Column name '{0}' is used more than once")]
    DuplicateColumnName(String),

    #[error("Got {names} column names for {columns} column types")]
    ColumnNameCountMismatch { names: usize, columns: usize },

    #[error("Column names are not defined for this data set")]
    MissingColumnNames,

    #[error("Label column {column} is invalid: {reason}")]
    InvalidLabelColumn { column: usize, reason: String },

    #[error("Data set has no label column")]
    Unlabelled,

    #[error("Datum does not belong to this data set")]
    ForeignDatum,

    #[error("Datum has already been appended to a data set")]
    DatumAlreadyOwned,

    #[error("No mapping rule for input column '{0}'")]
    MissingMappingRule(String),

    #[error("Mapping rule for '{column}' is inconsistent: {reason}")]
    InvalidMappingRule { column: String, reason: String },

    #[error("Mapping rule for '{column}' produced {actual} values, expected {expected}")]
    MappedValueCountMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid dictionary representation: {0}")]
    InvalidDictionary(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Classifier error (code {code}): {0}", code = .0.code())]
    Classifier(#[from] ClassifierError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl SwotError {
    /// Whether the error is a programming error in the caller (a broken contract)
    /// rather than a recoverable runtime failure.
    pub fn is_contract_violation(&self) -> bool {
        !matches!(
            self,
            SwotError::Classifier(_)
                | SwotError::IoError(_)
                | SwotError::JsonError(_)
                | SwotError::ParseError(_)
                | SwotError::InvalidDictionary(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SwotError>;
