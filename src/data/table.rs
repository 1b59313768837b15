//! In-memory data table: the concrete trainable data set
//!
//! Before a table can be used with a transformer or classifier, every
//! categorical column has to be assigned to a category. Once handed over
//! (wrapped in an `Arc`) the table is no longer mutable.

use crate::core::{
    ClassifierError, ColumnType, DataSet, DataSetId, Datum, JsonMap, Result, SwotError,
    TrainableDataSet, TrainingInstructions, Value,
};
use crate::data::category::CategoryRegistry;
use crate::data::csv::render_table;
use crate::data::DataTableRow;
use log::debug;
use std::collections::HashSet;

#[derive(Debug)]
pub struct DataTable {
    id: DataSetId,
    column_types: Vec<ColumnType>,
    schema_fixed: bool,
    column_names: Option<Vec<String>>,
    label_column_index: Option<usize>,
    rows: Vec<DataTableRow>,
    categories: CategoryRegistry,
}

impl DataTable {
    /// Create an empty table with a fixed schema.
    ///
    /// `column_names`, when given, must be unique and match `column_types` in
    /// length. The label column, when given, must be categorical.
    pub fn new(
        column_types: Vec<ColumnType>,
        column_names: Option<Vec<String>>,
        label_column_index: Option<usize>,
        capacity: usize,
    ) -> Result<Self> {
        validate_schema(&column_types)?;

        if let Some(names) = &column_names {
            validate_column_names(names, column_types.len())?;
        }

        let mut table = Self {
            id: DataSetId::next(),
            column_types,
            schema_fixed: true,
            column_names,
            label_column_index: None,
            rows: Vec::with_capacity(capacity),
            categories: CategoryRegistry::new(),
        };
        table.set_label_column_index(label_column_index)?;
        Ok(table)
    }

    /// Shorthand for an unnamed, unlabelled table with the given column types
    pub fn with_column_types(column_types: Vec<ColumnType>) -> Result<Self> {
        Self::new(column_types, None, None, 0)
    }

    /// A table whose schema is fixed by the first appended datum
    pub fn empty() -> Self {
        Self {
            id: DataSetId::next(),
            column_types: Vec::new(),
            schema_fixed: false,
            column_names: None,
            label_column_index: None,
            rows: Vec::new(),
            categories: CategoryRegistry::new(),
        }
    }

    /// Designate the class label column. It must be categorical.
    pub fn set_label_column_index(&mut self, label_column_index: Option<usize>) -> Result<()> {
        if let Some(column) = label_column_index {
            match self.column_types.get(column) {
                Some(ColumnType::Categorical) => {}
                Some(other) => {
                    return Err(SwotError::InvalidLabelColumn {
                        column,
                        reason: format!("column type is {other:?}, expected Categorical"),
                    })
                }
                None => {
                    return Err(SwotError::InvalidLabelColumn {
                        column,
                        reason: format!("only {} columns", self.column_types.len()),
                    })
                }
            }
        }
        self.label_column_index = label_column_index;
        Ok(())
    }

    /// Name the columns of a table. Names must be unique.
    pub fn set_column_names(&mut self, column_names: Vec<String>) -> Result<()> {
        validate_column_names(&column_names, self.column_types.len())?;
        self.column_names = Some(column_names);
        Ok(())
    }

    pub fn column_names(&self) -> Option<&[String]> {
        self.column_names.as_deref()
    }

    /// All rows in insertion order
    pub fn datum_array(&self) -> &[DataTableRow] {
        &self.rows
    }

    /// Mutable access to a row. Values can change, the schema cannot.
    ///
    /// # Panics
    /// Panics if i >= datum_count()
    pub fn datum_at_index_mut(&mut self, i: usize) -> &mut DataTableRow {
        &mut self.rows[i]
    }

    pub fn category_registry(&self) -> &CategoryRegistry {
        &self.categories
    }

    /// Check that the table can be encoded: every categorical column has a
    /// category and every categorical value present belongs to it.
    pub fn check_ready_for_classification(&self) -> Result<()> {
        for (column, column_type) in self.column_types.iter().enumerate() {
            if *column_type != ColumnType::Categorical {
                continue;
            }
            let category = self
                .categories
                .for_column(column)
                .ok_or(SwotError::UnassignedCategory { column })?;

            for row in &self.rows {
                if let Some(value) = row.value_for_column(column).as_category() {
                    if category.index_of(value).is_none() {
                        return Err(SwotError::UnknownCategoryValue {
                            category: category.name().to_string(),
                            value: value.to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Add and assign a category for every unassigned categorical column, made
    /// of the distinct values present in that column. Categories are named
    /// after their column, or `column<i>` when the table has no column names.
    pub fn add_observed_categories(&mut self) -> Result<()> {
        for column in 0..self.column_types.len() {
            if self.column_types[column] != ColumnType::Categorical
                || self.categories.assigned_name(column).is_some()
            {
                continue;
            }

            let name = self
                .name_for_column(column)
                .map(str::to_string)
                .unwrap_or_else(|| format!("column{column}"));
            let values: Vec<String> = self
                .rows
                .iter()
                .filter_map(|row| row.value_for_column(column).as_category())
                .map(str::to_string)
                .collect();

            debug!(
                "Observed category '{name}' for column {column} from {} rows",
                self.rows.len()
            );
            self.categories.add(&name, values)?;
            self.categories.assign(&name, column)?;
        }
        Ok(())
    }

    fn check_column(&self, index: usize) -> Result<ColumnType> {
        self.column_types
            .get(index)
            .copied()
            .ok_or(SwotError::ColumnOutOfRange {
                index,
                column_count: self.column_types.len(),
            })
    }
}

/// A copy is a new data set: it gets its own identity and owns copies of the rows.
impl Clone for DataTable {
    fn clone(&self) -> Self {
        let id = DataSetId::next();
        let rows = self.rows.iter().map(|row| row.clone_owned_by(id)).collect();

        Self {
            id,
            column_types: self.column_types.clone(),
            schema_fixed: self.schema_fixed,
            column_names: self.column_names.clone(),
            label_column_index: self.label_column_index,
            rows,
            categories: self.categories.clone(),
        }
    }
}

fn validate_schema(column_types: &[ColumnType]) -> Result<()> {
    for column_type in column_types {
        column_type.storage_class()?;
    }
    Ok(())
}

fn validate_column_names(names: &[String], column_count: usize) -> Result<()> {
    if names.len() != column_count {
        return Err(SwotError::ColumnNameCountMismatch {
            names: names.len(),
            columns: column_count,
        });
    }
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.as_str()) {
            return Err(SwotError::DuplicateColumnName(name.clone()));
        }
    }
    Ok(())
}

impl DataSet for DataTable {
    type Row = DataTableRow;

    fn id(&self) -> DataSetId {
        self.id
    }

    fn datum_count(&self) -> usize {
        self.rows.len()
    }

    fn column_types(&self) -> &[ColumnType] {
        &self.column_types
    }

    fn datum_at_index(&self, i: usize) -> &DataTableRow {
        &self.rows[i]
    }

    /// Append a datum. The first datum of a table created with [`DataTable::empty`]
    /// fixes the schema; every other datum must match it.
    fn append_datum(&mut self, datum: DataTableRow) -> Result<()> {
        if !self.schema_fixed {
            validate_schema(datum.column_types())?;
        } else if datum.column_types() != self.column_types.as_slice() {
            return Err(SwotError::SchemaMismatch {
                expected: self.column_types.clone(),
                actual: datum.column_types().to_vec(),
            });
        }

        datum.attach(self.id)?;

        if !self.schema_fixed {
            self.column_types = datum.column_types().to_vec();
            self.schema_fixed = true;
        }
        self.rows.push(datum);
        Ok(())
    }

    fn values_for_category_with_name(&self, category_name: &str) -> Result<&[String]> {
        Ok(self.categories.get(category_name)?.values())
    }

    fn index_for_category_value(&self, value: &str, category_name: &str) -> Result<usize> {
        self.categories.index_of(category_name, value)
    }

    fn category_name_for_column_at_index(&self, index: usize) -> Result<&str> {
        if self.check_column(index)? != ColumnType::Categorical {
            return Err(SwotError::NotCategorical { column: index });
        }
        self.categories
            .assigned_name(index)
            .ok_or(SwotError::UnassignedCategory { column: index })
    }

    fn add_category_with_name(&mut self, category_name: &str, values: Vec<String>) -> Result<()> {
        self.categories.add(category_name, values)
    }

    fn assign_category_with_name(&mut self, category_name: &str, index: usize) -> Result<()> {
        if !self.categories.contains(category_name) {
            return Err(SwotError::UnknownCategory(category_name.to_string()));
        }
        if self.check_column(index)? != ColumnType::Categorical {
            return Err(SwotError::NotCategorical { column: index });
        }
        self.categories.assign(category_name, index)
    }

    fn values_for_column(&self, column_index: usize) -> Result<Vec<Value>> {
        self.check_column(column_index)?;
        Ok(self
            .rows
            .iter()
            .map(|row| row.value_for_column(column_index).clone())
            .collect())
    }

    fn name_for_column(&self, column_index: usize) -> Option<&str> {
        self.column_names
            .as_ref()
            .and_then(|names| names.get(column_index))
            .map(String::as_str)
    }

    fn type_for_column(&self, index: usize) -> Result<ColumnType> {
        self.check_column(index)
    }

    fn index_for_column_with_name(&self, column_name: &str) -> Result<usize> {
        self.column_names
            .as_ref()
            .and_then(|names| names.iter().position(|name| name == column_name))
            .ok_or_else(|| SwotError::UnknownColumnName(column_name.to_string()))
    }

    fn dictionary_representation(&self) -> JsonMap {
        self.build_dictionary_representation()
    }
}

impl TrainingInstructions for DataTable {
    fn label_column_index(&self) -> Option<usize> {
        self.label_column_index
    }

    fn label_values(&self) -> Vec<String> {
        self.label_column_index
            .and_then(|column| self.categories.for_column(column))
            .map(|category| category.values().to_vec())
            .unwrap_or_default()
    }

    fn feature_count(&self) -> usize {
        match self.label_column_index {
            Some(_) => self.column_types.len() - 1,
            None => self.column_types.len(),
        }
    }

    fn label_at_index(&self, class_label_value_index: usize) -> Result<String> {
        self.label_values()
            .into_iter()
            .nth(class_label_value_index)
            .ok_or(SwotError::Classifier(ClassifierError::InvalidClassIndex))
    }

    fn label_identifier_for_datum(&self, datum: &dyn Datum) -> Option<usize> {
        let column = self.label_column_index?;
        if column >= datum.column_count() {
            return None;
        }
        let value = datum.value_for_column(column).as_category()?;
        self.categories.for_column(column)?.index_of(value)
    }

    fn training_column_types(&self) -> Vec<ColumnType> {
        self.column_types.clone()
    }
}

impl TrainableDataSet for DataTable {
    fn is_labelled(&self) -> bool {
        match self.label_column_index {
            Some(column) => self
                .rows
                .iter()
                .any(|row| !row.value_for_column(column).is_missing()),
            None => false,
        }
    }

    fn csv_representation_with_delimiter(
        &self,
        delimiter: &str,
        quote_strings: bool,
        include_header: bool,
    ) -> Result<String> {
        render_table(self, delimiter, quote_strings, include_header)
    }
}
