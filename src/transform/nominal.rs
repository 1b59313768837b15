//! Nominal (one-hot) encoding
//!
//! Column layout, in column order with the label column left out:
//!
//! | column type      | slots | content                                 |
//! |------------------|-------|-----------------------------------------|
//! | categorical      | k     | indicator of the value's sorted index   |
//! | binary           | 1     | 0 or 1                                  |
//! | integral, float  | 1     | the value                               |
//! | custom object    | 1     | its real value representation           |
//!
//! A missing entry fills all slots of its column with the missing value. With
//! the label included, the label identifier is appended as the last slot.

use crate::core::{ColumnType, DataSet, Datum, Result, SwotError, TrainableDataSet};
use crate::data::DataTable;
use crate::mapper::DimensionMapper;
use crate::transform::{DataSetTransformer, DEFAULT_MISSING_VALUE};
use log::debug;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
enum Slots {
    Indicator { category: String, values: Vec<String> },
    Scalar,
}

#[derive(Debug, Clone, PartialEq)]
struct ColumnLayout {
    column: usize,
    slots: Slots,
}

impl ColumnLayout {
    fn width(&self) -> usize {
        match &self.slots {
            Slots::Indicator { values, .. } => values.len(),
            Slots::Scalar => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct LabelLayout {
    column: usize,
    category: String,
    values: Vec<String>,
}

/// Column layout of a data set, computed once and applied to any datum with
/// the same schema.
#[derive(Debug, Clone, PartialEq)]
pub struct NominalEncoder {
    column_types: Vec<ColumnType>,
    columns: Vec<ColumnLayout>,
    label: Option<LabelLayout>,
    feature_width: usize,
    missing_value: f64,
}

impl NominalEncoder {
    /// Compute the layout of a data set. Fails if a categorical column has no
    /// category assigned.
    pub fn new<D: TrainableDataSet + ?Sized>(data_set: &D, missing_value: f64) -> Result<Self> {
        let label_column = data_set.label_column_index();
        let mut columns = Vec::with_capacity(data_set.column_count());
        let mut label = None;

        for (column, column_type) in data_set.column_types().iter().enumerate() {
            if Some(column) == label_column {
                let category = data_set.category_name_for_column_at_index(column)?;
                label = Some(LabelLayout {
                    column,
                    category: category.to_string(),
                    values: data_set.values_for_category_with_name(category)?.to_vec(),
                });
                continue;
            }

            let slots = match column_type {
                ColumnType::Categorical => {
                    let category = data_set.category_name_for_column_at_index(column)?;
                    Slots::Indicator {
                        category: category.to_string(),
                        values: data_set.values_for_category_with_name(category)?.to_vec(),
                    }
                }
                ColumnType::Unknown => {
                    return Err(SwotError::UnknownColumnType(column_type.code()));
                }
                _ => Slots::Scalar,
            };
            columns.push(ColumnLayout { column, slots });
        }

        let feature_width = columns.iter().map(ColumnLayout::width).sum();
        debug!(
            "Nominal layout: {} columns -> {} features, label column {:?}",
            data_set.column_count(),
            feature_width,
            label_column
        );

        Ok(Self {
            column_types: data_set.column_types().to_vec(),
            columns,
            label,
            feature_width,
            missing_value,
        })
    }

    /// Number of feature slots, label excluded
    pub fn feature_width(&self) -> usize {
        self.feature_width
    }

    pub fn width(&self, including_label: bool) -> usize {
        if including_label && self.label.is_some() {
            self.feature_width + 1
        } else {
            self.feature_width
        }
    }

    pub fn missing_value(&self) -> f64 {
        self.missing_value
    }

    pub fn column_types(&self) -> &[ColumnType] {
        &self.column_types
    }

    /// Encode a datum. Its schema must be the one the layout was computed for.
    pub fn encode(&self, datum: &dyn Datum, including_label: bool) -> Result<Vec<f64>> {
        if datum.column_types() != self.column_types.as_slice() {
            return Err(SwotError::SchemaMismatch {
                expected: self.column_types.clone(),
                actual: datum.column_types().to_vec(),
            });
        }

        let label = match (including_label, &self.label) {
            (false, _) => None,
            (true, Some(label)) => Some(label),
            (true, None) => return Err(SwotError::Unlabelled),
        };

        let mut encoded = Vec::with_capacity(self.width(including_label));
        for layout in &self.columns {
            let value = datum.value_for_column(layout.column);
            if value.is_missing() {
                encoded.extend(std::iter::repeat(self.missing_value).take(layout.width()));
                continue;
            }

            match &layout.slots {
                Slots::Indicator { category, values } => {
                    let index = category_index(values, category, value.as_category())?;
                    encoded.extend((0..values.len()).map(|i| if i == index { 1.0 } else { 0.0 }));
                }
                Slots::Scalar => {
                    let real = value.as_real().ok_or_else(|| SwotError::TypeMismatch {
                        column: layout.column,
                        column_type: self.column_types[layout.column],
                        value: format!("{value:?}"),
                    })?;
                    encoded.push(real);
                }
            }
        }

        if let Some(label) = label {
            let value = datum.value_for_column(label.column);
            if value.is_missing() {
                encoded.push(self.missing_value);
            } else {
                let index = category_index(&label.values, &label.category, value.as_category())?;
                encoded.push(index as f64);
            }
        }

        Ok(encoded)
    }
}

fn category_index(values: &[String], category: &str, value: Option<&str>) -> Result<usize> {
    let value = value.unwrap_or_default();
    values
        .binary_search_by(|probe| probe.as_str().cmp(value))
        .map_err(|_| SwotError::UnknownCategoryValue {
            category: category.to_string(),
            value: value.to_string(),
        })
}

/// Transformer applying the nominal encoding to a data set, optionally after
/// mapping it to more dimensions.
pub struct NominalTransformer {
    data_set: Arc<DataTable>,
    encoding_data_set: Arc<DataTable>,
    mapper: Option<Box<dyn DimensionMapper>>,
    encoder: NominalEncoder,
}

impl NominalTransformer {
    /// Bind a transformer to a data set
    pub fn new(data_set: Arc<DataTable>) -> Result<Self> {
        let encoder = NominalEncoder::new(data_set.as_ref(), DEFAULT_MISSING_VALUE)?;
        Ok(Self {
            encoding_data_set: Arc::clone(&data_set),
            data_set,
            mapper: None,
            encoder,
        })
    }

    /// Bind a transformer to the input data set of a mapper. Datums are mapped
    /// before they are encoded.
    pub fn with_mapper<M: DimensionMapper + 'static>(mapper: M) -> Result<Self> {
        let data_set = Arc::clone(mapper.input_data_set());
        let encoding_data_set = mapper.mapped_data_set()?;
        let encoder = NominalEncoder::new(encoding_data_set.as_ref(), DEFAULT_MISSING_VALUE)?;
        Ok(Self {
            data_set,
            encoding_data_set,
            mapper: Some(Box::new(mapper)),
            encoder,
        })
    }

    /// Use another value for missing entries
    pub fn with_missing_value(mut self, missing_value: f64) -> Self {
        self.encoder.missing_value = missing_value;
        self
    }

    pub fn encoder(&self) -> &NominalEncoder {
        &self.encoder
    }
}

impl std::fmt::Debug for NominalTransformer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NominalTransformer")
            .field("data_set", &self.data_set.id())
            .field("encoding_data_set", &self.encoding_data_set.id())
            .field("mapped", &self.mapper.is_some())
            .field("encoder", &self.encoder)
            .finish()
    }
}

impl DataSetTransformer for NominalTransformer {
    fn data_set(&self) -> &Arc<DataTable> {
        &self.data_set
    }

    fn encoding_data_set(&self) -> &Arc<DataTable> {
        &self.encoding_data_set
    }

    fn mapper(&self) -> Option<&dyn DimensionMapper> {
        self.mapper.as_deref()
    }

    fn encoded_width(&self, including_label: bool) -> usize {
        self.encoder.width(including_label)
    }

    fn encode_datum(&self, datum: &dyn Datum, including_label: bool) -> Result<Vec<f64>> {
        self.encoder.encode(datum, including_label)
    }
}
