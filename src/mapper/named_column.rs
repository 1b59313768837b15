//! Dimension mapping driven by an explicit rule table keyed by input column name

use crate::core::{
    ColumnType, DataSet, DatumRef, RelatedDatum, Result, SwotError, TrainingInstructions, Value,
};
use crate::data::{Category, DataTable};
use crate::mapper::DimensionMapper;
use log::debug;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Expands one input value to the values of the output columns of a rule.
/// Missing input values are passed to the expander too.
pub type ValueExpander = dyn Fn(&Value) -> Result<Vec<Value>> + Send + Sync;

/// How one input column maps to its output columns
#[derive(Clone)]
pub struct ExpansionRule {
    input_column: String,
    column_types: Vec<ColumnType>,
    column_names: Vec<String>,
    categories: Vec<Option<Category>>,
    expander: Arc<ValueExpander>,
}

impl ExpansionRule {
    /// Create a rule for the input column `input_column`.
    ///
    /// There has to be at least one output column, one name per output type,
    /// and names must be unique.
    pub fn new<F>(
        input_column: impl Into<String>,
        column_types: Vec<ColumnType>,
        column_names: Vec<String>,
        expander: F,
    ) -> Result<Self>
    where
        F: Fn(&Value) -> Result<Vec<Value>> + Send + Sync + 'static,
    {
        let input_column = input_column.into();
        let invalid = |reason: String| SwotError::InvalidMappingRule {
            column: input_column.clone(),
            reason,
        };

        if column_types.is_empty() {
            return Err(invalid("no output columns".to_string()));
        }
        if column_names.len() != column_types.len() {
            return Err(invalid(format!(
                "{} names for {} output columns",
                column_names.len(),
                column_types.len()
            )));
        }
        if column_types.contains(&ColumnType::Unknown) {
            return Err(invalid("output column of unknown type".to_string()));
        }
        let mut seen = HashSet::new();
        if let Some(name) = column_names.iter().find(|name| !seen.insert(name.as_str())) {
            return Err(invalid(format!("output name '{name}' used more than once")));
        }

        Ok(Self {
            categories: vec![None; column_types.len()],
            input_column,
            column_types,
            column_names,
            expander: Arc::new(expander),
        })
    }

    /// Pass a column through unchanged, keeping its name and type
    pub fn identity(input_column: impl Into<String>, column_type: ColumnType) -> Self {
        let input_column = input_column.into();
        Self {
            column_names: vec![input_column.clone()],
            input_column,
            column_types: vec![column_type],
            categories: vec![None],
            expander: Arc::new(|value: &Value| -> Result<Vec<Value>> {
                Ok(vec![value.clone()])
            }),
        }
    }

    /// Declare the category of a categorical output column
    pub fn with_category(
        mut self,
        output: usize,
        name: impl Into<String>,
        values: Vec<String>,
    ) -> Result<Self> {
        match self.column_types.get(output) {
            Some(ColumnType::Categorical) => {
                self.categories[output] = Some(Category::new(name, values));
                Ok(self)
            }
            Some(other) => Err(SwotError::InvalidMappingRule {
                column: self.input_column.clone(),
                reason: format!("output column {output} is {other:?}, not categorical"),
            }),
            None => Err(SwotError::InvalidMappingRule {
                column: self.input_column.clone(),
                reason: format!("no output column {output}"),
            }),
        }
    }

    pub fn input_column(&self) -> &str {
        &self.input_column
    }

    pub fn column_types(&self) -> &[ColumnType] {
        &self.column_types
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn dimensionality(&self) -> usize {
        self.column_types.len()
    }

    pub fn category_for_output(&self, output: usize) -> Option<&Category> {
        self.categories.get(output).and_then(Option::as_ref)
    }

    /// Apply the expander, checking it produced one value per output column
    pub fn expand(&self, value: &Value) -> Result<Vec<Value>> {
        let values = (self.expander)(value)?;
        if values.len() != self.column_types.len() {
            return Err(SwotError::MappedValueCountMismatch {
                column: self.input_column.clone(),
                expected: self.column_types.len(),
                actual: values.len(),
            });
        }
        Ok(values)
    }
}

impl fmt::Debug for ExpansionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpansionRule")
            .field("input_column", &self.input_column)
            .field("column_types", &self.column_types)
            .field("column_names", &self.column_names)
            .field("categories", &self.categories)
            .finish_non_exhaustive()
    }
}

/// Expansion rules keyed by input column name
#[derive(Debug, Clone, Default)]
pub struct MappingRules {
    rules: BTreeMap<String, ExpansionRule>,
}

impl MappingRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule, replacing an earlier rule for the same input column
    pub fn with_rule(mut self, rule: ExpansionRule) -> Self {
        self.insert(rule);
        self
    }

    pub fn insert(&mut self, rule: ExpansionRule) -> Option<ExpansionRule> {
        self.rules.insert(rule.input_column.clone(), rule)
    }

    pub fn get(&self, input_column: &str) -> Option<&ExpansionRule> {
        self.rules.get(input_column)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Maps every named input column with the rule registered for its name.
///
/// The mapped data set keeps the input categories, carries the label column
/// across when its rule maps it to a single categorical column, and links
/// every mapped row to its source row.
#[derive(Debug)]
pub struct NamedColumnDimensionMapper {
    input: Arc<DataTable>,
    rules: Vec<ExpansionRule>,
    mapped: OnceLock<Arc<DataTable>>,
}

impl NamedColumnDimensionMapper {
    /// Every input column needs a name and a rule for that name.
    pub fn new(input: Arc<DataTable>, mut rules: MappingRules) -> Result<Self> {
        let names = input.column_names().ok_or(SwotError::MissingColumnNames)?;
        let column_rules = names
            .iter()
            .map(|name| {
                rules
                    .rules
                    .remove(name)
                    .ok_or_else(|| SwotError::MissingMappingRule(name.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        if !rules.is_empty() {
            debug!(
                "Ignoring {} mapping rules without input column: {:?}",
                rules.len(),
                rules.rules.keys().collect::<Vec<_>>()
            );
        }

        Ok(Self {
            input,
            rules: column_rules,
            mapped: OnceLock::new(),
        })
    }

    fn rule(&self, column: usize) -> Result<&ExpansionRule> {
        self.rules.get(column).ok_or(SwotError::ColumnOutOfRange {
            index: column,
            column_count: self.rules.len(),
        })
    }

    fn build_mapped_data_set(&self) -> Result<DataTable> {
        let input = self.input.as_ref();
        let offsets: Vec<usize> = self
            .rules
            .iter()
            .scan(0, |offset, rule| {
                let start = *offset;
                *offset += rule.dimensionality();
                Some(start)
            })
            .collect();

        let label_column = input.label_column_index().and_then(|label| {
            (self.rules[label].column_types() == [ColumnType::Categorical]).then(|| offsets[label])
        });
        if label_column.is_none() && input.label_column_index().is_some() {
            debug!("Label column is not mapped one to one, mapped data set is unlabelled");
        }

        let column_names = self
            .rules
            .iter()
            .flat_map(|rule| rule.column_names().iter().cloned())
            .collect();
        let mut table = DataTable::new(
            self.mapped_column_types()?,
            Some(column_names),
            label_column,
            input.datum_count(),
        )?;

        for category in input.category_registry().categories() {
            table.add_category_with_name(category.name(), category.values().to_vec())?;
        }

        for (column, rule) in self.rules.iter().enumerate() {
            for (output, column_type) in rule.column_types().iter().enumerate() {
                if *column_type != ColumnType::Categorical {
                    continue;
                }
                let target = offsets[column] + output;

                if let Some(category) = rule.category_for_output(output) {
                    let existing = table
                        .category_registry()
                        .get(category.name())
                        .ok()
                        .map(|c| c.values().to_vec());
                    match existing {
                        None => table
                            .add_category_with_name(category.name(), category.values().to_vec())?,
                        Some(values) if values == category.values() => {}
                        Some(_) => {
                            return Err(SwotError::DuplicateCategory(category.name().to_string()))
                        }
                    }
                    table.assign_category_with_name(category.name(), target)?;
                } else if rule.dimensionality() == 1 {
                    if let Some(name) = input.category_registry().assigned_name(column) {
                        table.assign_category_with_name(name, target)?;
                    }
                }
            }
        }

        for (index, datum) in input.datum_array().iter().enumerate() {
            let mut row = self.map_datum(datum)?;
            row.set_related_datum(Some(DatumRef {
                data_set: input.id(),
                index,
            }));
            table.append_datum(row)?;
        }

        debug!(
            "Mapped {} columns to {} over {} datums",
            input.column_count(),
            table.column_count(),
            table.datum_count()
        );
        Ok(table)
    }
}

impl DimensionMapper for NamedColumnDimensionMapper {
    fn input_data_set(&self) -> &Arc<DataTable> {
        &self.input
    }

    fn column_types_for_mapped_dimensions_for_column(
        &self,
        column: usize,
    ) -> Result<&[ColumnType]> {
        Ok(self.rule(column)?.column_types())
    }

    fn column_names_for_mapped_dimensions_for_column(&self, column: usize) -> Result<&[String]> {
        Ok(self.rule(column)?.column_names())
    }

    fn values_for_mapped_value(&self, column: usize, value: &Value) -> Result<Vec<Value>> {
        self.rule(column)?.expand(value)
    }

    fn mapped_data_set(&self) -> Result<Arc<DataTable>> {
        if let Some(mapped) = self.mapped.get() {
            return Ok(Arc::clone(mapped));
        }
        let mapped = Arc::new(self.build_mapped_data_set()?);
        Ok(Arc::clone(self.mapped.get_or_init(|| mapped)))
    }
}
