//! Data set implementations
//!
//! [`DataTable`] is the in-memory trainable data set, made of
//! [`DataTableRow`]s, with its categories and its dictionary and delimited
//! text representations.

pub mod category;
pub mod csv;
pub mod dictionary;
pub mod row;
pub mod table;

pub use self::category::{Category, CategoryRegistry};
pub use self::csv::{parse_csv, CsvOptions};
pub use self::dictionary::{CustomObjectDecoder, RejectCustomObjects};
pub use self::row::DataTableRow;
pub use self::table::DataTable;
