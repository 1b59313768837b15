//! Named categories and their assignment to columns
//!
//! A category is a sorted set of distinct strings. The position of a value in
//! that sorted set is its stable index, which is what the nominal encoding and
//! the label identifiers are built from.

use crate::core::{Result, SwotError};
use std::collections::BTreeMap;

/// A named, immutable, sorted set of distinct category values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    name: String,
    values: Vec<String>,
}

impl Category {
    /// Create a category. Values are sorted and duplicates dropped.
    pub fn new(name: impl Into<String>, mut values: Vec<String>) -> Self {
        values.sort();
        values.dedup();
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Values in their natural sorting order
    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Index of a value in the sorted value sequence
    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.values
            .binary_search_by(|probe| probe.as_str().cmp(value))
            .ok()
    }

    pub fn value_at(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }
}

/// Categories of a data set, unique by name, and the columns assigned to them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryRegistry {
    categories: BTreeMap<String, Category>,
    assignments: BTreeMap<usize, String>,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a category. Category names are unique within a registry.
    pub fn add(&mut self, name: &str, values: Vec<String>) -> Result<()> {
        if self.categories.contains_key(name) {
            return Err(SwotError::DuplicateCategory(name.to_string()));
        }
        self.categories
            .insert(name.to_string(), Category::new(name, values));
        Ok(())
    }

    /// Assign a previously added category to a column.
    ///
    /// Column type checks are the caller's concern since the registry does not
    /// know the schema.
    pub fn assign(&mut self, name: &str, column: usize) -> Result<()> {
        if !self.categories.contains_key(name) {
            return Err(SwotError::UnknownCategory(name.to_string()));
        }
        if let Some(existing) = self.assignments.get(&column) {
            return Err(SwotError::CategoryAlreadyAssigned {
                column,
                category: existing.clone(),
            });
        }
        self.assignments.insert(column, name.to_string());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&Category> {
        self.categories
            .get(name)
            .ok_or_else(|| SwotError::UnknownCategory(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.categories.contains_key(name)
    }

    /// Category assigned to a column, if any
    pub fn for_column(&self, column: usize) -> Option<&Category> {
        self.assignments
            .get(&column)
            .and_then(|name| self.categories.get(name))
    }

    pub fn assigned_name(&self, column: usize) -> Option<&str> {
        self.assignments.get(&column).map(String::as_str)
    }

    pub fn index_of(&self, name: &str, value: &str) -> Result<usize> {
        self.get(name)?
            .index_of(value)
            .ok_or_else(|| SwotError::UnknownCategoryValue {
                category: name.to_string(),
                value: value.to_string(),
            })
    }

    /// Categories ordered by name
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.values()
    }

    /// Column assignments ordered by column index
    pub fn assignments(&self) -> impl Iterator<Item = (usize, &str)> {
        self.assignments
            .iter()
            .map(|(column, name)| (*column, name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
