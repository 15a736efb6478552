//! # nomtex
//!
//! Generates LaTeX nomenclature tables and symbol macro definitions from a
//! spreadsheet of symbol definitions.
//!
//! ## Features
//!
//! - **Nomenclature**: Sets, Parameters and Decision Variables tables per
//!   document section, with spacing between sort groups
//! - **Macros**: `\newcommand` definitions for every flagged symbol
//! - **Appendix**: a flat table of additional symbols
//! - **Inputs**: `.xlsx`, `.xls`, `.ods` (feature `spreadsheet`) and `.csv`
//!
//! ## Usage Example
//!
//! ```rust
//! use nomtex::{render_table, Selection, SymbolClass, SymbolRecord};
//!
//! let records = vec![
//!     SymbolRecord::new(SymbolClass::Set, r"\G", "generators").with_sort("1_a"),
//!     SymbolRecord::new(SymbolClass::Param, r"\c", "cost")
//!         .with_sort("1_b")
//!         .with_unit("EUR"),
//! ];
//!
//! let table = render_table(&records, &Selection::class(SymbolClass::Set));
//! assert!(table.contains(r"$\G"));
//! assert!(!table.contains(r"$\c"));
//! ```
//!
//! ### Whole documents
//!
//! ```rust
//! use nomtex::{GeneratorConfig, Generator, MemoryOutputWriter, SymbolTable};
//! use nomtex::source::delimited::read_csv;
//!
//! let csv = "class,latexcommand,latex,description,unit,sort,math_symbols,1_SPINE\n\
//!            Set,\\sG,\\mathcal{G},generators,,1_a,1,1\n";
//! let table = SymbolTable::from_raw(&read_csv(csv.as_bytes()).unwrap()).unwrap();
//!
//! let config = GeneratorConfig::default();
//! let mut writer = MemoryOutputWriter::new();
//! Generator::new(&config).generate(&table, &mut writer).unwrap();
//!
//! let nomenclature = writer.get("00_nomenclature.tex").unwrap();
//! assert!(nomenclature.contains(r"\subsection*{Sets}"));
//! ```

/// Generator configuration
pub mod config;

/// LaTeX formatting - tables, macros, documents
pub mod format;

/// Generation driver
pub mod generate;

/// Symbol data model
pub mod model;

/// Tabular input sources
pub mod source;

/// Utility modules
pub mod utils;

pub use config::GeneratorConfig;
pub use format::{
    ColumnWidths, DocumentBuilder, Grouping, MacroCommand, MacroEmitter, TableFormatter,
    TableLayout,
};
pub use generate::{Generator, OutputFile, OutputKind};
pub use model::{RecordFilter, RecordFlag, Selection, SymbolClass, SymbolRecord, SymbolTable};

// Re-export utilities
pub use utils::diagnostics;
pub use utils::error::{NomenclatureError, NomenclatureResult};
pub use utils::files::{MemoryOutputWriter, OutputWriter, StdOutputWriter};

/// Render one nomenclature table with the default layout.
///
/// Grouping follows the selected class: set tables are flat, every other
/// class gets spacing between sort groups.
pub fn render_table<'r, I>(records: I, selection: &Selection) -> String
where
    I: IntoIterator<Item = &'r SymbolRecord>,
{
    let grouping = match selection.class {
        Some(class) if !class.is_grouped() => Grouping::Flat,
        Some(_) => Grouping::ByGroupKey,
        None => Grouping::Flat,
    };
    TableFormatter::default().render(records, selection, grouping)
}

/// Render `\newcommand` definitions for every record flagged `math_symbols`
pub fn render_macros<'r, I>(records: I) -> String
where
    I: IntoIterator<Item = &'r SymbolRecord>,
{
    let mut out = MacroEmitter::default()
        .render_lines(records, &Selection::flag(RecordFlag::MathSymbols))
        .join("\n");
    out.push('\n');
    out
}
