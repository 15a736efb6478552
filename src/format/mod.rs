//! LaTeX output formatting
//!
//! - [`table`]: the three-column nomenclature table formatter
//! - [`macros`]: symbol macro definitions
//! - [`document`]: complete output documents

pub mod document;
pub mod macros;
pub mod table;

pub use document::{DocumentBuilder, Subsection};
pub use macros::{MacroCommand, MacroEmitter};
pub use table::{ColumnWidths, Grouping, TableFormatter, TableLayout};
