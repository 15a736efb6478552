//! Error handling for nomenclature generation
//!
//! Every failure is fatal: loading, validating and writing either succeed
//! completely or stop the run with one of these errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::{SymbolClass, SymbolRecord};

/// Nomenclature generation error type
#[derive(Debug, Error)]
pub enum NomenclatureError {
    /// A required column is absent from the header row
    #[error("missing required column '{column}'")]
    MissingColumn { column: String },

    /// The input has no header row at all
    #[error("input table is empty")]
    EmptyTable,

    /// A data row could not be turned into a symbol record
    #[error("invalid row {row}: {message}")]
    InvalidRow { row: usize, message: String },

    /// A row rendered in a grouped table has no group segment in `sort`
    #[error("sort key '{sort}' of {class} '{command}' has no group segment (expected e.g. '1_group')")]
    MissingGroupKey {
        class: SymbolClass,
        command: String,
        sort: String,
    },

    /// Input file extension is not a known tabular format
    #[error("unsupported input format '{extension}' for {}", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// Requested worksheet does not exist
    #[error("worksheet '{0}' not found")]
    SheetNotFound(String),

    /// Spreadsheet could not be opened or decoded
    #[cfg(feature = "spreadsheet")]
    #[error("failed to read spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// CSV input could not be decoded
    #[error("failed to read csv: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration file could not be parsed
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error (reading input or writing output)
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for nomenclature operations
pub type NomenclatureResult<T> = Result<T, NomenclatureError>;

// Convenience constructors for errors
impl NomenclatureError {
    pub fn missing_column(column: impl Into<String>) -> Self {
        NomenclatureError::MissingColumn {
            column: column.into(),
        }
    }

    /// `row` is the 1-indexed spreadsheet row, header included
    pub fn invalid_row(row: usize, message: impl Into<String>) -> Self {
        NomenclatureError::InvalidRow {
            row,
            message: message.into(),
        }
    }

    pub fn missing_group_key(record: &SymbolRecord) -> Self {
        NomenclatureError::MissingGroupKey {
            class: record.class,
            command: record.latexcommand.clone(),
            sort: record.sort.clone(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        NomenclatureError::InvalidConfig(message.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        NomenclatureError::Io {
            path: path.into(),
            source,
        }
    }
}
