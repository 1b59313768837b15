//! Core type definitions: column types, cell values and data set identity

use crate::core::error::{Result, SwotError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// JSON object used for dictionary representations
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// The kind of data held by a column.
///
/// Serialized as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub enum ColumnType {
    Unknown,
    Categorical,
    Integral,
    FloatingPoint,
    Binary,
    CustomObject,
}

/// Storage family backing a column type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageClass {
    /// Category values, stored as strings
    Text,
    /// Signed integers
    Integer,
    /// Double precision floats
    Real,
    /// true / false
    Boolean,
    /// Values implementing [`DatumEncodable`]
    Object,
}

impl ColumnType {
    /// Integer code of the column type
    pub fn code(&self) -> u64 {
        match self {
            ColumnType::Unknown => 0,
            ColumnType::Categorical => 1,
            ColumnType::Integral => 2,
            ColumnType::FloatingPoint => 3,
            ColumnType::Binary => 4,
            ColumnType::CustomObject => 5,
        }
    }

    /// Resolve a column type from its integer code
    pub fn from_code(code: u64) -> Result<Self> {
        match code {
            0 => Ok(ColumnType::Unknown),
            1 => Ok(ColumnType::Categorical),
            2 => Ok(ColumnType::Integral),
            3 => Ok(ColumnType::FloatingPoint),
            4 => Ok(ColumnType::Binary),
            5 => Ok(ColumnType::CustomObject),
            other => Err(SwotError::UnknownColumnType(other)),
        }
    }

    /// The storage class for the column type. `Unknown` has none.
    pub fn storage_class(&self) -> Result<StorageClass> {
        match self {
            ColumnType::Unknown => Err(SwotError::UnknownColumnType(self.code())),
            ColumnType::Categorical => Ok(StorageClass::Text),
            ColumnType::Integral => Ok(StorageClass::Integer),
            ColumnType::FloatingPoint => Ok(StorageClass::Real),
            ColumnType::Binary => Ok(StorageClass::Boolean),
            ColumnType::CustomObject => Ok(StorageClass::Object),
        }
    }

    /// Whether values of this type are rendered as strings
    pub fn is_string_typed(&self) -> bool {
        matches!(self, ColumnType::Categorical)
    }
}

impl TryFrom<u64> for ColumnType {
    type Error = SwotError;

    fn try_from(code: u64) -> Result<Self> {
        Self::from_code(code)
    }
}

impl From<ColumnType> for u64 {
    fn from(column_type: ColumnType) -> Self {
        column_type.code()
    }
}

/// Custom objects stored in `CustomObject` columns.
pub trait DatumEncodable: Send + Sync + fmt::Debug {
    /// A JSON encodable dictionary representation of the object
    fn dictionary_representation(&self) -> JsonMap;

    /// Single real value used when the object participates in a numeric encoding
    fn real_value_representation(&self) -> f32;
}

/// A single cell of a datum
#[derive(Clone)]
pub enum Value {
    Missing,
    Categorical(String),
    Integral(i64),
    FloatingPoint(f64),
    Binary(bool),
    CustomObject(Arc<dyn DatumEncodable>),
}

impl Value {
    /// Shorthand for a categorical value
    pub fn category(value: impl Into<String>) -> Self {
        Value::Categorical(value.into())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Column type of the value, `None` for missing entries
    pub fn column_type(&self) -> Option<ColumnType> {
        match self {
            Value::Missing => None,
            Value::Categorical(_) => Some(ColumnType::Categorical),
            Value::Integral(_) => Some(ColumnType::Integral),
            Value::FloatingPoint(_) => Some(ColumnType::FloatingPoint),
            Value::Binary(_) => Some(ColumnType::Binary),
            Value::CustomObject(_) => Some(ColumnType::CustomObject),
        }
    }

    /// Missing entries fit any column; anything else only fits its own type.
    pub fn is_compatible_with(&self, column_type: ColumnType) -> bool {
        match self.column_type() {
            None => true,
            Some(own) => own == column_type,
        }
    }

    /// The category string of a categorical value
    pub fn as_category(&self) -> Option<&str> {
        match self {
            Value::Categorical(s) => Some(s),
            _ => None,
        }
    }

    /// Real valued projection of scalar values. Categorical and missing values have none.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Integral(i) => Some(*i as f64),
            Value::FloatingPoint(f) => Some(*f),
            Value::Binary(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::CustomObject(object) => Some(object.real_value_representation() as f64),
            Value::Missing | Value::Categorical(_) => None,
        }
    }

    /// JSON form used in dictionary representations
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Missing => serde_json::Value::Null,
            Value::Categorical(s) => serde_json::Value::String(s.clone()),
            Value::Integral(i) => serde_json::Value::from(*i),
            // Non-finite floats have no JSON form.
            Value::FloatingPoint(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Binary(b) => serde_json::Value::Bool(*b),
            Value::CustomObject(object) => {
                serde_json::Value::Object(object.dictionary_representation())
            }
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Missing, Value::Missing) => true,
            (Value::Categorical(a), Value::Categorical(b)) => a == b,
            (Value::Integral(a), Value::Integral(b)) => a == b,
            (Value::FloatingPoint(a), Value::FloatingPoint(b)) => a == b,
            (Value::Binary(a), Value::Binary(b)) => a == b,
            (Value::CustomObject(a), Value::CustomObject(b)) => {
                a.dictionary_representation() == b.dictionary_representation()
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => write!(f, "Missing"),
            Value::Categorical(s) => write!(f, "Categorical({s:?})"),
            Value::Integral(i) => write!(f, "Integral({i})"),
            Value::FloatingPoint(x) => write!(f, "FloatingPoint({x})"),
            Value::Binary(b) => write!(f, "Binary({b})"),
            Value::CustomObject(object) => write!(f, "CustomObject({object:?})"),
        }
    }
}

/// Plain text rendering as used in CSV output. Missing values render empty.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => Ok(()),
            Value::Categorical(s) => write!(f, "{s}"),
            Value::Integral(i) => write!(f, "{i}"),
            Value::FloatingPoint(x) => write!(f, "{x}"),
            Value::Binary(b) => write!(f, "{}", u8::from(*b)),
            Value::CustomObject(object) => write!(f, "{}", object.real_value_representation()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Categorical(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Categorical(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integral(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::FloatingPoint(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Binary(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Missing)
    }
}

/// Identity of a data set, used by rows as a non-owning back-reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataSetId(u64);

impl DataSetId {
    /// Allocate a process-wide unique identifier
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Association with a row of some data set, e.g. the source row of a mapped row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DatumRef {
    pub data_set: DataSetId,
    pub index: usize,
}
