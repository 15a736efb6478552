//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Diagnostics for symbol definition tables
//! - Output writers for generated documents
//! - Error types and result types

pub mod diagnostics;
pub mod error;
pub mod files;

// Re-export commonly used items
pub use diagnostics::{check_table, format_diagnostics, CheckResult, Diagnostic, DiagnosticLevel};
pub use error::{NomenclatureError, NomenclatureResult};
pub use files::{MemoryOutputWriter, OutputWriter, StdOutputWriter};
