//! Concrete datum implementation stored by [`DataTable`](crate::data::DataTable)

use crate::core::{
    ColumnType, CsvRepresentable, DataSetId, Datum, DatumRef, JsonMap, RealNumberRepresentable,
    RelatedDatum, Result, SwotError, TrainableDataSet, Value,
};
use crate::data::csv::render_field;
use crate::data::dictionary::{decode_value, CustomObjectDecoder};
use crate::transform::{NominalEncoder, DEFAULT_MISSING_VALUE};
use std::sync::OnceLock;

/// A row of typed values.
///
/// The owning data set is recorded once, when the row is appended. Clones are
/// unowned so they can be appended elsewhere.
#[derive(Debug)]
pub struct DataTableRow {
    values: Vec<Value>,
    column_types: Vec<ColumnType>,
    data_set: OnceLock<DataSetId>,
    related: Option<DatumRef>,
}

impl DataTableRow {
    /// Create a row. Every value must be missing or match its column type.
    pub fn new(values: Vec<Value>, column_types: Vec<ColumnType>) -> Result<Self> {
        if values.len() != column_types.len() {
            return Err(SwotError::SchemaMismatch {
                actual: values
                    .iter()
                    .map(|v| v.column_type().unwrap_or(ColumnType::Unknown))
                    .collect(),
                expected: column_types,
            });
        }

        for (column, (value, column_type)) in values.iter().zip(&column_types).enumerate() {
            check_compatible(value, *column_type, column)?;
        }

        Ok(Self {
            values,
            column_types,
            data_set: OnceLock::new(),
            related: None,
        })
    }

    /// Rebuild a row from its dictionary representation.
    ///
    /// Keys are column indices; when `column_names` is given, column names are
    /// accepted too. Absent keys are missing values.
    pub fn from_dictionary_representation(
        dict: &JsonMap,
        column_types: Vec<ColumnType>,
        column_names: Option<&[String]>,
        decoder: &dyn CustomObjectDecoder,
    ) -> Result<Self> {
        let mut values = vec![Value::Missing; column_types.len()];

        for (key, json) in dict {
            let column = match key.parse::<usize>() {
                Ok(index) => index,
                Err(_) => column_names
                    .and_then(|names| names.iter().position(|name| name == key))
                    .ok_or_else(|| SwotError::UnknownColumnName(key.clone()))?,
            };
            let column_type = *column_types.get(column).ok_or(SwotError::ColumnOutOfRange {
                index: column,
                column_count: column_types.len(),
            })?;
            values[column] = decode_value(json, column_type, column, decoder)?;
        }

        Self::new(values, column_types)
    }

    /// Values in column order
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Record the owning data set. Only the data set calls this, once.
    pub(crate) fn attach(&self, data_set: DataSetId) -> Result<()> {
        self.data_set
            .set(data_set)
            .map_err(|_| SwotError::DatumAlreadyOwned)
    }

    /// Copy of this row already owned by `data_set`
    pub(crate) fn clone_owned_by(&self, data_set: DataSetId) -> Self {
        Self {
            data_set: OnceLock::from(data_set),
            ..self.clone()
        }
    }
}

fn check_compatible(value: &Value, column_type: ColumnType, column: usize) -> Result<()> {
    if value.is_compatible_with(column_type) {
        Ok(())
    } else {
        Err(SwotError::TypeMismatch {
            column,
            column_type,
            value: format!("{value:?}"),
        })
    }
}

impl Clone for DataTableRow {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            column_types: self.column_types.clone(),
            data_set: OnceLock::new(),
            related: self.related,
        }
    }
}

impl PartialEq for DataTableRow {
    fn eq(&self, other: &Self) -> bool {
        self.column_types == other.column_types && self.values == other.values
    }
}

impl Datum for DataTableRow {
    fn data_set_id(&self) -> Option<DataSetId> {
        self.data_set.get().copied()
    }

    fn column_types(&self) -> &[ColumnType] {
        &self.column_types
    }

    fn value_for_column(&self, index: usize) -> &Value {
        &self.values[index]
    }

    fn set_value(&mut self, value: Value, column: usize) -> Result<()> {
        let column_type = *self
            .column_types
            .get(column)
            .ok_or(SwotError::ColumnOutOfRange {
                index: column,
                column_count: self.column_types.len(),
            })?;
        check_compatible(&value, column_type, column)?;
        self.values[column] = value;
        Ok(())
    }

    fn dictionary_representation(&self) -> JsonMap {
        self.values
            .iter()
            .enumerate()
            .map(|(i, value)| (i.to_string(), value.to_json()))
            .collect()
    }

    fn as_real_number_representable(&self) -> Option<&dyn RealNumberRepresentable> {
        Some(self)
    }

    fn as_csv_representable(&self) -> Option<&dyn CsvRepresentable> {
        Some(self)
    }

    fn as_related(&self) -> Option<&dyn RelatedDatum> {
        Some(self)
    }

    fn as_related_mut(&mut self) -> Option<&mut dyn RelatedDatum> {
        Some(self)
    }
}

impl RealNumberRepresentable for DataTableRow {
    fn real_number_representation(
        &self,
        data_set: &dyn TrainableDataSet<Row = DataTableRow>,
        including_label: bool,
    ) -> Result<Vec<f64>> {
        if self.data_set_id() != Some(data_set.id()) {
            return Err(SwotError::ForeignDatum);
        }
        NominalEncoder::new(data_set, DEFAULT_MISSING_VALUE)?.encode(self, including_label)
    }
}

impl CsvRepresentable for DataTableRow {
    fn csv_representation(&self, delimiter: &str, quote_strings: bool) -> String {
        self.values
            .iter()
            .zip(&self.column_types)
            .map(|(value, column_type)| render_field(value, *column_type, quote_strings))
            .collect::<Vec<_>>()
            .join(delimiter)
    }
}

impl RelatedDatum for DataTableRow {
    fn related_datum(&self) -> Option<DatumRef> {
        self.related
    }

    fn set_related_datum(&mut self, related: Option<DatumRef>) {
        self.related = related;
    }
}
