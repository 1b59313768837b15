//! Real number transforms of data sets
//!
//! A transformer is bound to one immutable data set (and optionally a
//! dimension mapper) and turns datums into real valued feature vectors for a
//! classifier backend.

pub mod nominal;

pub use self::nominal::{NominalEncoder, NominalTransformer};

use crate::core::{DataSet, Datum, Result, SwotError, TrainingInstructions};
use crate::data::DataTable;
use crate::mapper::DimensionMapper;
use log::warn;
use std::sync::Arc;

/// Value written to every slot of a missing entry
pub const DEFAULT_MISSING_VALUE: f64 = f64::NAN;

pub trait DataSetTransformer {
    /// The data set the transformer was bound to
    fn data_set(&self) -> &Arc<DataTable>;

    /// The data set whose layout the encoding follows: the mapped data set
    /// when a mapper is in use, the bound data set otherwise
    fn encoding_data_set(&self) -> &Arc<DataTable>;

    fn mapper(&self) -> Option<&dyn DimensionMapper> {
        None
    }

    fn training_instructions(&self) -> &dyn TrainingInstructions {
        self.encoding_data_set().as_ref()
    }

    /// Length of every vector produced by the transformer
    fn encoded_width(&self, including_label: bool) -> usize;

    /// Encode a datum that already has the layout of [`encoding_data_set`](Self::encoding_data_set)
    fn encode_datum(&self, datum: &dyn Datum, including_label: bool) -> Result<Vec<f64>>;

    /// Transform a datum with the schema of the bound data set into real values.
    /// The returned buffer is owned by the caller.
    fn real_number_transform(&self, datum: &dyn Datum, including_label: bool) -> Result<Vec<f64>> {
        match self.mapper() {
            Some(mapper) => self.encode_datum(&mapper.map_datum(datum)?, including_label),
            None => self.encode_datum(datum, including_label),
        }
    }

    /// Encode every datum of the encoding data set.
    ///
    /// With `including_label`, datums without a recognised label are skipped.
    fn transform_data_set(&self, including_label: bool) -> Result<Vec<Vec<f64>>> {
        let data_set = self.encoding_data_set();
        let instructions = self.training_instructions();
        if including_label && instructions.label_column_index().is_none() {
            return Err(SwotError::Unlabelled);
        }

        let mut rows = Vec::with_capacity(data_set.datum_count());
        let mut skipped = 0;
        for datum in data_set.datum_array() {
            if including_label && instructions.label_identifier_for_datum(datum).is_none() {
                skipped += 1;
                continue;
            }
            rows.push(self.encode_datum(datum, including_label)?);
        }

        if skipped > 0 {
            warn!(
                "Skipped {skipped} of {} datums without a recognised label",
                data_set.datum_count()
            );
        }
        Ok(rows)
    }
}
