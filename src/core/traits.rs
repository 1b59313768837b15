//! Core traits: data sets, datum rows and their optional capabilities

use crate::core::{ColumnType, DataSetId, DatumRef, JsonMap, Result, Value};
use std::fmt;

/// A single row of a data set.
pub trait Datum: fmt::Debug {
    /// Back-reference to the owning data set, set once when the datum is appended
    fn data_set_id(&self) -> Option<DataSetId>;

    /// Column types of the datum. Every datum in a data set has the same column types.
    fn column_types(&self) -> &[ColumnType];

    fn column_count(&self) -> usize {
        self.column_types().len()
    }

    /// Value stored in a column, [`Value::Missing`] for missing entries.
    ///
    /// # Panics
    /// Panics if index >= column_count()
    fn value_for_column(&self, index: usize) -> &Value;

    /// Replace the value of a column. `Value::Missing` marks the entry missing.
    fn set_value(&mut self, value: Value, column: usize) -> Result<()>;

    /// Values keyed by column index
    fn dictionary_representation(&self) -> JsonMap;

    fn as_real_number_representable(&self) -> Option<&dyn RealNumberRepresentable> {
        None
    }

    fn as_csv_representable(&self) -> Option<&dyn CsvRepresentable> {
        None
    }

    fn as_related(&self) -> Option<&dyn RelatedDatum> {
        None
    }

    fn as_related_mut(&mut self) -> Option<&mut dyn RelatedDatum> {
        None
    }
}

/// Datum kinds that can encode themselves as a real valued feature vector.
pub trait RealNumberRepresentable {
    /// Nominal encoding of the datum against its owning data set.
    /// The returned buffer is owned by the caller.
    fn real_number_representation(
        &self,
        data_set: &dyn TrainableDataSet<Row = crate::data::DataTableRow>,
        including_label: bool,
    ) -> Result<Vec<f64>>;
}

/// Datum kinds that can render themselves as a delimited text line.
pub trait CsvRepresentable {
    fn csv_representation(&self, delimiter: &str, quote_strings: bool) -> String;
}

/// Datum kinds that record which other datum they were derived from.
pub trait RelatedDatum {
    fn related_datum(&self) -> Option<DatumRef>;

    fn set_related_datum(&mut self, related: Option<DatumRef>);
}

/// Objects that can be thought of as a set of rows and columns.
pub trait DataSet {
    type Row: Datum;

    fn id(&self) -> DataSetId;

    fn datum_count(&self) -> usize;

    fn column_count(&self) -> usize {
        self.column_types().len()
    }

    /// The column types every datum in the data set must match
    fn column_types(&self) -> &[ColumnType];

    /// # Panics
    /// Panics if i >= datum_count()
    fn datum_at_index(&self, i: usize) -> &Self::Row;

    fn append_datum(&mut self, datum: Self::Row) -> Result<()>;

    /// All the values of a category in their natural sorting order
    fn values_for_category_with_name(&self, category_name: &str) -> Result<&[String]>;

    /// Index of a value within the sorted values of a category
    fn index_for_category_value(&self, value: &str, category_name: &str) -> Result<usize>;

    /// Name of the category assigned to a categorical column
    fn category_name_for_column_at_index(&self, index: usize) -> Result<&str>;

    fn add_category_with_name(&mut self, category_name: &str, values: Vec<String>) -> Result<()>;

    fn assign_category_with_name(&mut self, category_name: &str, index: usize) -> Result<()>;

    fn values_for_column(&self, column_index: usize) -> Result<Vec<Value>>;

    /// Name of a column, `None` when the data set has no column names
    fn name_for_column(&self, column_index: usize) -> Option<&str>;

    fn type_for_column(&self, index: usize) -> Result<ColumnType>;

    /// Index of the unique column with the given name
    fn index_for_column_with_name(&self, column_name: &str) -> Result<usize>;

    /// Per-row dictionaries keyed by column index
    fn array_of_dictionaries_representation(&self) -> Vec<JsonMap> {
        (0..self.datum_count())
            .map(|i| self.datum_at_index(i).dictionary_representation())
            .collect()
    }

    /// Dictionary with the required keys `columnTypes` and `data`
    fn dictionary_representation(&self) -> JsonMap;
}

/// Metadata about training data for a classifier.
pub trait TrainingInstructions {
    /// Column index of the class label, `None` for unlabelled data
    fn label_column_index(&self) -> Option<usize>;

    /// All possible class labels in their natural sorting order
    fn label_values(&self) -> Vec<String>;

    fn label_count(&self) -> usize {
        self.label_values().len()
    }

    /// Number of feature columns, excluding the label column if present
    fn feature_count(&self) -> usize;

    /// String representation of the label with the given identifier
    fn label_at_index(&self, class_label_value_index: usize) -> Result<String>;

    /// Sorted position of the datum's label value, `None` if missing or unknown
    fn label_identifier_for_datum(&self, datum: &dyn Datum) -> Option<usize>;

    /// Column types of the training data
    fn training_column_types(&self) -> Vec<ColumnType>;
}

/// A data set that can be used for training a classifier.
pub trait TrainableDataSet: DataSet + TrainingInstructions {
    /// Whether a label column is defined and at least one datum has a label value
    fn is_labelled(&self) -> bool;

    fn csv_representation_with_delimiter(
        &self,
        delimiter: &str,
        quote_strings: bool,
        include_header: bool,
    ) -> Result<String>;
}
