//! Symbol data model
//!
//! - [`SymbolRecord`]: one row of the definition table
//! - [`SymbolTable`]: the sorted, immutable dataset
//! - [`Selection`] / [`RecordFilter`]: which rows a table includes

pub mod dataset;
pub mod record;

pub use dataset::{RowSchema, SymbolTable, KNOWN_COLUMNS, REQUIRED_COLUMNS};
pub use record::{RecordFilter, RecordFlag, Selection, SymbolClass, SymbolRecord, UnknownClass};
