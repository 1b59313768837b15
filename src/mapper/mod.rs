//! Dimension mappers
//!
//! A dimension mapper maps the columns of an input data set to the columns of
//! an output data set. Every input column maps to one or more output columns,
//! so the mapped data set has at least as many dimensions as the input.

pub mod named_column;

pub use self::named_column::{ExpansionRule, MappingRules, NamedColumnDimensionMapper};

use crate::core::{ColumnType, DataSet, Datum, Result, SwotError, Value};
use crate::data::{DataTable, DataTableRow};
use std::sync::Arc;

pub trait DimensionMapper: Send + Sync {
    /// The data set whose dimensions are mapped
    fn input_data_set(&self) -> &Arc<DataTable>;

    /// Column types of the output dimensions an input column maps to
    fn column_types_for_mapped_dimensions_for_column(&self, column: usize)
        -> Result<&[ColumnType]>;

    /// Column names of the output dimensions an input column maps to
    fn column_names_for_mapped_dimensions_for_column(&self, column: usize) -> Result<&[String]>;

    /// Map one input value of a column to the values of its output dimensions
    fn values_for_mapped_value(&self, column: usize, value: &Value) -> Result<Vec<Value>>;

    /// The mapped data set, computed on first request
    fn mapped_data_set(&self) -> Result<Arc<DataTable>>;

    fn mapped_dimensionality_for_column_at_input_data_set_index(
        &self,
        column: usize,
    ) -> Result<usize> {
        Ok(self.column_types_for_mapped_dimensions_for_column(column)?.len())
    }

    /// Number of dimensions in the output
    fn mapped_dimensionality(&self) -> usize {
        (0..self.input_data_set().column_count())
            .filter_map(|column| {
                self.mapped_dimensionality_for_column_at_input_data_set_index(column)
                    .ok()
            })
            .sum()
    }

    /// Column types of the mapped data set
    fn mapped_column_types(&self) -> Result<Vec<ColumnType>> {
        let mut column_types = Vec::with_capacity(self.mapped_dimensionality());
        for column in 0..self.input_data_set().column_count() {
            column_types
                .extend_from_slice(self.column_types_for_mapped_dimensions_for_column(column)?);
        }
        Ok(column_types)
    }

    /// The mapped values of the value at datum row x column of the input data set
    fn values_for_mapped_dimensions_for_datum(
        &self,
        datum_index: usize,
        column: usize,
    ) -> Result<Vec<Value>> {
        let input = self.input_data_set();
        if datum_index >= input.datum_count() {
            return Err(SwotError::DatumOutOfRange {
                index: datum_index,
                datum_count: input.datum_count(),
            });
        }
        if column >= input.column_count() {
            return Err(SwotError::ColumnOutOfRange {
                index: column,
                column_count: input.column_count(),
            });
        }
        let value = input.datum_at_index(datum_index).value_for_column(column);
        self.values_for_mapped_value(column, value)
    }

    /// Map a datum with the input schema to a new, unowned row with the mapped schema
    fn map_datum(&self, datum: &dyn Datum) -> Result<DataTableRow> {
        let input = self.input_data_set();
        if datum.column_types() != input.column_types() {
            return Err(SwotError::SchemaMismatch {
                expected: input.column_types().to_vec(),
                actual: datum.column_types().to_vec(),
            });
        }

        let mut values = Vec::with_capacity(self.mapped_dimensionality());
        for column in 0..input.column_count() {
            let expected = self.mapped_dimensionality_for_column_at_input_data_set_index(column)?;
            let mapped = self.values_for_mapped_value(column, datum.value_for_column(column))?;
            if mapped.len() != expected {
                return Err(SwotError::MappedValueCountMismatch {
                    column: input
                        .name_for_column(column)
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("column{column}")),
                    expected,
                    actual: mapped.len(),
                });
            }
            values.extend(mapped);
        }

        DataTableRow::new(values, self.mapped_column_types()?)
    }
}
