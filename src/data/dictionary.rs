//! Dictionary (JSON object) representation of data sets
//!
//! Layout:
//!
//! ```text
//! {
//!   "columnTypes": [1, 3],
//!   "data": [{"0": "red", "1": 3.5}, {"0": null, "1": 1.0}],
//!   "labelColumnIndex": 0,                      (optional)
//!   "columnNames": ["color", "size"],           (optional)
//!   "categories": {"color": ["blue", "red"]},   (optional)
//!   "categoryAssignments": {"0": "color"}       (optional)
//! }
//! ```
//!
//! Row objects are keyed by column index; column names are accepted on input
//! when `columnNames` is present. `null` marks a missing value.

use crate::core::{
    ColumnType, DataSet, DatumEncodable, JsonMap, Result, SwotError, TrainingInstructions, Value,
};
use crate::data::{DataTable, DataTableRow};
use serde_json::Value as Json;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::sync::Arc;

pub const COLUMN_TYPES_KEY: &str = "columnTypes";
pub const DATA_KEY: &str = "data";
pub const LABEL_COLUMN_INDEX_KEY: &str = "labelColumnIndex";
pub const COLUMN_NAMES_KEY: &str = "columnNames";
pub const CATEGORIES_KEY: &str = "categories";
pub const CATEGORY_ASSIGNMENTS_KEY: &str = "categoryAssignments";

/// Rebuilds custom objects from their dictionary representation
pub trait CustomObjectDecoder {
    fn decode(&self, column: usize, dict: &JsonMap) -> Result<Arc<dyn DatumEncodable>>;
}

impl<F> CustomObjectDecoder for F
where
    F: Fn(usize, &JsonMap) -> Result<Arc<dyn DatumEncodable>>,
{
    fn decode(&self, column: usize, dict: &JsonMap) -> Result<Arc<dyn DatumEncodable>> {
        self(column, dict)
    }
}

/// Decoder for data without custom object values
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectCustomObjects;

impl CustomObjectDecoder for RejectCustomObjects {
    fn decode(&self, column: usize, _dict: &JsonMap) -> Result<Arc<dyn DatumEncodable>> {
        Err(SwotError::InvalidDictionary(format!(
            "no decoder for the custom object in column {column}"
        )))
    }
}

/// Decode a JSON value for a column of the given type
pub fn decode_value(
    json: &Json,
    column_type: ColumnType,
    column: usize,
    decoder: &dyn CustomObjectDecoder,
) -> Result<Value> {
    if json.is_null() {
        return Ok(Value::Missing);
    }

    let invalid = || {
        SwotError::InvalidDictionary(format!(
            "value {json} does not fit column {column} of type {column_type:?}"
        ))
    };

    match column_type {
        ColumnType::Unknown => Err(SwotError::UnknownColumnType(column_type.code())),
        ColumnType::Categorical => json
            .as_str()
            .map(|s| Value::Categorical(s.to_string()))
            .ok_or_else(invalid),
        ColumnType::Integral => match json.as_i64() {
            Some(i) => Ok(Value::Integral(i)),
            None => json
                .as_f64()
                // i64::MAX rounds up to 2^63, which is out of range
                .filter(|f| f.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(f))
                .map(|f| Value::Integral(f as i64))
                .ok_or_else(invalid),
        },
        ColumnType::FloatingPoint => json
            .as_f64()
            .map(Value::FloatingPoint)
            .ok_or_else(invalid),
        ColumnType::Binary => match json {
            Json::Bool(b) => Ok(Value::Binary(*b)),
            Json::Number(n) => match n.as_i64() {
                Some(0) => Ok(Value::Binary(false)),
                Some(1) => Ok(Value::Binary(true)),
                _ => Err(invalid()),
            },
            _ => Err(invalid()),
        },
        ColumnType::CustomObject => match json {
            Json::Object(map) => Ok(Value::CustomObject(decoder.decode(column, map)?)),
            _ => Err(invalid()),
        },
    }
}

impl DataTable {
    /// Initialise a data table from a dictionary formatted like
    /// [`DataSet::dictionary_representation`]. Custom object columns are rejected.
    pub fn from_dictionary_representation(dict: &JsonMap) -> Result<Self> {
        Self::from_dictionary_representation_with_decoder(dict, &RejectCustomObjects)
    }

    /// Initialise a data table from a dictionary, decoding custom objects with `decoder`
    pub fn from_dictionary_representation_with_decoder(
        dict: &JsonMap,
        decoder: &dyn CustomObjectDecoder,
    ) -> Result<Self> {
        let column_types: Vec<ColumnType> = serde_json::from_value(
            dict.get(COLUMN_TYPES_KEY)
                .cloned()
                .ok_or_else(|| missing_key(COLUMN_TYPES_KEY))?,
        )?;

        let rows = dict
            .get(DATA_KEY)
            .and_then(Json::as_array)
            .ok_or_else(|| missing_key(DATA_KEY))?;

        let column_names: Option<Vec<String>> = match dict.get(COLUMN_NAMES_KEY) {
            None | Some(Json::Null) => None,
            Some(names) => Some(serde_json::from_value(names.clone())?),
        };

        let label_column_index = match dict.get(LABEL_COLUMN_INDEX_KEY) {
            None | Some(Json::Null) => None,
            Some(index) => Some(index.as_u64().ok_or_else(|| {
                SwotError::InvalidDictionary(format!("{LABEL_COLUMN_INDEX_KEY} must be unsigned"))
            })? as usize),
        };

        let mut table = DataTable::new(
            column_types.clone(),
            column_names.clone(),
            label_column_index,
            rows.len(),
        )?;

        if let Some(categories) = dict.get(CATEGORIES_KEY).and_then(Json::as_object) {
            for (name, values) in categories {
                let values: Vec<String> = serde_json::from_value(values.clone())?;
                table.add_category_with_name(name, values)?;
            }
        }

        if let Some(assignments) = dict.get(CATEGORY_ASSIGNMENTS_KEY).and_then(Json::as_object) {
            for (column, name) in assignments {
                let column = column.parse::<usize>().map_err(|_| {
                    SwotError::InvalidDictionary(format!("invalid column index '{column}'"))
                })?;
                let name = name.as_str().ok_or_else(|| {
                    SwotError::InvalidDictionary("category names must be strings".to_string())
                })?;
                table.assign_category_with_name(name, column)?;
            }
        }

        for row in rows {
            let row = row.as_object().ok_or_else(|| {
                SwotError::InvalidDictionary("rows must be objects".to_string())
            })?;
            table.append_datum(DataTableRow::from_dictionary_representation(
                row,
                column_types.clone(),
                column_names.as_deref(),
                decoder,
            )?)?;
        }

        Ok(table)
    }

    /// Parse a data table from dictionary JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let dict: JsonMap = serde_json::from_str(json)?;
        Self::from_dictionary_representation(&dict)
    }

    /// Load a data table from a JSON file holding its dictionary representation
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(SwotError::IoError)?;
        let mut json = String::new();
        BufReader::new(file)
            .read_to_string(&mut json)
            .map_err(SwotError::IoError)?;
        Self::from_json_str(&json)
    }

    /// Save the dictionary representation as pretty printed JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path).map_err(SwotError::IoError)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.dictionary_representation())?;
        writer.flush().map_err(SwotError::IoError)
    }

    pub(crate) fn build_dictionary_representation(&self) -> JsonMap {
        let mut dict = JsonMap::new();
        dict.insert(
            COLUMN_TYPES_KEY.to_string(),
            Json::from(
                self.column_types()
                    .iter()
                    .map(ColumnType::code)
                    .collect::<Vec<_>>(),
            ),
        );
        dict.insert(
            DATA_KEY.to_string(),
            Json::Array(
                self.array_of_dictionaries_representation()
                    .into_iter()
                    .map(Json::Object)
                    .collect(),
            ),
        );

        if let Some(label) = self.label_column_index() {
            dict.insert(LABEL_COLUMN_INDEX_KEY.to_string(), Json::from(label));
        }

        if let Some(names) = self.column_names() {
            dict.insert(COLUMN_NAMES_KEY.to_string(), Json::from(names.to_vec()));
        }

        let registry = self.category_registry();
        if !registry.is_empty() {
            let categories: JsonMap = registry
                .categories()
                .map(|category| {
                    (
                        category.name().to_string(),
                        Json::from(category.values().to_vec()),
                    )
                })
                .collect();
            dict.insert(CATEGORIES_KEY.to_string(), Json::Object(categories));

            let assignments: JsonMap = registry
                .assignments()
                .map(|(column, name)| (column.to_string(), Json::from(name)))
                .collect();
            dict.insert(CATEGORY_ASSIGNMENTS_KEY.to_string(), Json::Object(assignments));
        }

        dict
    }
}

fn missing_key(key: &str) -> SwotError {
    SwotError::InvalidDictionary(format!("missing required key '{key}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Datum;
    use serde_json::json;

    #[derive(Debug)]
    struct Point {
        x: f32,
    }

    impl DatumEncodable for Point {
        fn dictionary_representation(&self) -> JsonMap {
            let mut map = JsonMap::new();
            map.insert("x".to_string(), json!(self.x));
            map
        }

        fn real_value_representation(&self) -> f32 {
            self.x
        }
    }

    fn decode_point(_column: usize, dict: &JsonMap) -> Result<Arc<dyn DatumEncodable>> {
        let x = dict
            .get("x")
            .and_then(Json::as_f64)
            .ok_or_else(|| SwotError::InvalidDictionary("point without x".to_string()))?;
        Ok(Arc::new(Point { x: x as f32 }))
    }

    #[test]
    fn test_decode_scalars() {
        let d = &RejectCustomObjects;
        assert_eq!(
            decode_value(&json!(null), ColumnType::Integral, 0, d).unwrap(),
            Value::Missing
        );
        assert_eq!(
            decode_value(&json!(4), ColumnType::Integral, 0, d).unwrap(),
            Value::Integral(4)
        );
        assert_eq!(
            decode_value(&json!(4.0), ColumnType::Integral, 0, d).unwrap(),
            Value::Integral(4)
        );
        assert!(decode_value(&json!(4.5), ColumnType::Integral, 0, d).is_err());
        assert_eq!(
            decode_value(&json!(-9.0e18), ColumnType::Integral, 0, d).unwrap(),
            Value::Integral(-9_000_000_000_000_000_000)
        );
        for out_of_range in [json!(1e300), json!(-1e300), json!(9.3e18)] {
            assert!(matches!(
                decode_value(&out_of_range, ColumnType::Integral, 0, d),
                Err(SwotError::InvalidDictionary(_))
            ));
        }
        assert_eq!(
            decode_value(&json!(2), ColumnType::FloatingPoint, 0, d).unwrap(),
            Value::FloatingPoint(2.0)
        );
        assert_eq!(
            decode_value(&json!(1), ColumnType::Binary, 0, d).unwrap(),
            Value::Binary(true)
        );
        assert!(decode_value(&json!(2), ColumnType::Binary, 0, d).is_err());
        assert!(decode_value(&json!(3), ColumnType::Categorical, 0, d).is_err());
        assert!(decode_value(&json!({"x": 1}), ColumnType::CustomObject, 0, d).is_err());
    }

    #[test]
    fn test_table_round_trip() {
        let dict = json!({
            "columnTypes": [1, 3, 4, 2],
            "columnNames": ["color", "size", "shiny", "count"],
            "labelColumnIndex": 0,
            "categories": {"color": ["red", "blue"]},
            "categoryAssignments": {"0": "color"},
            "data": [
                {"0": "red", "1": 3.5, "2": true, "3": 7},
                {"color": "blue", "size": null, "shiny": 0},
            ]
        });
        let table = DataTable::from_dictionary_representation(dict.as_object().unwrap()).unwrap();

        assert_eq!(table.datum_count(), 2);
        assert_eq!(table.label_column_index(), Some(0));
        assert!(table.datum_at_index(1).value_for_column(1).is_missing());
        assert!(table.datum_at_index(1).value_for_column(3).is_missing());
        assert_eq!(table.label_values(), vec!["blue".to_string(), "red".to_string()]);

        let rebuilt =
            DataTable::from_dictionary_representation(&table.dictionary_representation()).unwrap();
        assert_eq!(rebuilt.column_types(), table.column_types());
        assert_eq!(rebuilt.label_column_index(), table.label_column_index());
        assert_eq!(rebuilt.datum_array(), table.datum_array());
        assert_eq!(rebuilt.category_registry(), table.category_registry());
    }

    #[test]
    fn test_custom_objects_need_decoder() {
        let dict = json!({
            "columnTypes": [5],
            "data": [{"0": {"x": 2.5}}]
        });
        let dict = dict.as_object().unwrap();
        assert!(DataTable::from_dictionary_representation(dict).is_err());

        let table =
            DataTable::from_dictionary_representation_with_decoder(dict, &decode_point).unwrap();
        let value = table.datum_at_index(0).value_for_column(0);
        assert_eq!(value.as_real(), Some(2.5));
        assert_eq!(
            table.dictionary_representation()["data"],
            json!([{"0": {"x": 2.5}}])
        );
    }

    #[test]
    fn test_missing_required_keys() {
        let dict = json!({"columnTypes": [1]});
        assert!(matches!(
            DataTable::from_dictionary_representation(dict.as_object().unwrap()),
            Err(SwotError::InvalidDictionary(_))
        ));
    }

    #[test]
    fn test_file_round_trip() {
        let table = DataTable::from_json_str(
            r#"{"columnTypes": [2, 3], "data": [{"0": 1, "1": 0.5}, {"0": 2, "1": null}]}"#,
        )
        .unwrap();
        let file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        table.save_to_file(file.path()).unwrap();
        let loaded = DataTable::from_file(file.path()).unwrap();
        assert_eq!(loaded.datum_array(), table.datum_array());
        assert_eq!(loaded.label_column_index(), None);
    }

    #[test]
    fn test_non_finite_floats_load_as_missing() {
        let types = vec![ColumnType::FloatingPoint];
        let mut table = DataTable::with_column_types(types.clone()).unwrap();
        for f in [f64::NAN, f64::INFINITY, 1.5] {
            table
                .append_datum(DataTableRow::new(vec![Value::from(f)], types.clone()).unwrap())
                .unwrap();
        }

        let dict = table.dictionary_representation();
        let loaded = DataTable::from_dictionary_representation(&dict).unwrap();
        assert!(loaded.datum_at_index(0).value_for_column(0).is_missing());
        assert!(loaded.datum_at_index(1).value_for_column(0).is_missing());
        assert_eq!(
            loaded.datum_at_index(2).value_for_column(0),
            &Value::FloatingPoint(1.5)
        );
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_save_reports_write_errors() {
        let table = DataTable::from_json_str(r#"{"columnTypes": [2], "data": [{"0": 1}]}"#)
            .unwrap();
        assert!(matches!(
            table.save_to_file("/dev/full"),
            Err(SwotError::IoError(_))
        ));
    }
}
