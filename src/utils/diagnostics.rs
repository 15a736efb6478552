//! Symbol table diagnostics
//!
//! Checks a raw definition table before generation and reports every
//! problem at once instead of stopping at the first malformed row:
//!
//! - rows that cannot be converted (unknown class, missing group key, ...)
//! - duplicate `latexcommand` within a class
//! - macro rows without an expansion
//! - rows that belong to no section
//!
//! ## Example
//!
//! ```rust
//! use nomtex::diagnostics::check_table;
//! use nomtex::source::RawTable;
//!
//! let mut raw = RawTable::new(
//!     ["class", "latexcommand", "description", "sort"]
//!         .map(String::from)
//!         .to_vec(),
//! );
//! raw.push_row(["Foo", r"\x", "x", "1_a"].map(String::from).to_vec());
//!
//! let result = check_table(&raw);
//! assert!(result.has_errors());
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::model::{RowSchema, SymbolClass, SymbolRecord};
use crate::source::RawTable;
use crate::utils::error::NomenclatureError;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// Informational note
    Info,
    /// Warning - output is generated but probably not what was intended
    Warning,
    /// Error - generation will fail or produce invalid LaTeX
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Human-readable message
    pub message: String,
    /// Source row (1-indexed, header is row 1)
    pub row: Option<usize>,
    /// Column concerned
    pub column: Option<String>,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            row: None,
            column: None,
            suggestion: None,
        }
    }

    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: level: message
        //         --> row 12, column 'sort'
        //         = help: suggestion
        write!(f, "{}: {}", self.level, self.message)?;

        match (self.row, &self.column) {
            (Some(row), Some(col)) => write!(f, "\n  --> row {}, column '{}'", row, col)?,
            (Some(row), None) => write!(f, "\n  --> row {}", row)?,
            (None, Some(col)) => write!(f, "\n  --> column '{}'", col)?,
            (None, None) => {}
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  = help: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Check result with summary
#[derive(Debug, Default)]
pub struct CheckResult {
    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Number of errors
    pub errors: usize,
    /// Number of warnings
    pub warnings: usize,
    /// Number of info messages
    pub infos: usize,
    /// Rows converted successfully
    pub records: usize,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diag: Diagnostic) {
        match diag.level {
            DiagnosticLevel::Error => self.errors += 1,
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        self.diagnostics.push(diag);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Check if there are any issues at all
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        if self.errors > 0 {
            parts.push(format!(
                "{} error{}",
                self.errors,
                if self.errors == 1 { "" } else { "s" }
            ));
        }
        if self.warnings > 0 {
            parts.push(format!(
                "{} warning{}",
                self.warnings,
                if self.warnings == 1 { "" } else { "s" }
            ));
        }
        if self.infos > 0 {
            parts.push(format!(
                "{} note{}",
                self.infos,
                if self.infos == 1 { "" } else { "s" }
            ));
        }

        let issues = if parts.is_empty() {
            "no issues found".to_string()
        } else {
            parts.join(", ")
        };
        format!("{} record(s), {}", self.records, issues)
    }
}

/// Check a raw definition table for issues
pub fn check_table(raw: &RawTable) -> CheckResult {
    let mut result = CheckResult::new();

    let schema = match RowSchema::from_headers(raw) {
        Ok(schema) => schema,
        Err(err) => {
            let mut diag = Diagnostic::new(DiagnosticLevel::Error, err.to_string()).with_row(1);
            if let NomenclatureError::MissingColumn { column } = &err {
                diag = diag
                    .with_column(column.clone())
                    .with_suggestion("add the column to the header row");
            }
            result.add(diag);
            return result;
        }
    };

    if schema.section_columns().next().is_none() {
        result.add(
            Diagnostic::new(
                DiagnosticLevel::Warning,
                "no section columns found; the nomenclature will be empty",
            )
            .with_row(1)
            .with_suggestion("add a flag column per document section, e.g. '1_SPINE'"),
        );
    }

    let mut records: Vec<(usize, SymbolRecord)> = Vec::new();
    for (idx, row) in raw.rows.iter().enumerate() {
        let row_number = idx + 2;
        match schema.record(row, row_number) {
            Ok(Some(record)) => records.push((row_number, record)),
            Ok(None) => {}
            Err(err) => result.add(
                Diagnostic::new(DiagnosticLevel::Error, message_of(&err)).with_row(row_number),
            ),
        }
    }
    result.records = records.len();

    check_duplicates(&records, &mut result);
    for (row, record) in &records {
        check_record(*row, record, &mut result);
    }

    result
}

fn message_of(err: &NomenclatureError) -> String {
    match err {
        NomenclatureError::InvalidRow { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

/// Report commands defined twice within one class
fn check_duplicates(records: &[(usize, SymbolRecord)], result: &mut CheckResult) {
    let mut seen: HashMap<(SymbolClass, &str), usize> = HashMap::new();
    for (row, record) in records {
        let key = (record.class, record.latexcommand.as_str());
        if let Some(first) = seen.get(&key) {
            result.add(
                Diagnostic::new(
                    DiagnosticLevel::Error,
                    format!(
                        "duplicate {} command '{}' (first defined in row {})",
                        record.class, record.latexcommand, first
                    ),
                )
                .with_row(*row)
                .with_column("latexcommand"),
            );
        } else {
            seen.insert(key, *row);
        }
    }
}

fn check_record(row: usize, record: &SymbolRecord, result: &mut CheckResult) {
    if record.math_symbols && record.latex.trim().is_empty() {
        result.add(
            Diagnostic::new(
                DiagnosticLevel::Error,
                format!(
                    "'{}' is flagged math_symbols but has no expansion",
                    record.latexcommand
                ),
            )
            .with_row(row)
            .with_column("latex")
            .with_suggestion("fill in 'latex' or clear 'math_symbols'"),
        );
    }

    let in_any_section = record.sections.values().any(|flag| *flag);
    if record.class.is_grouped() && in_any_section && record.group_key().is_none() {
        result.add(
            Diagnostic::new(
                DiagnosticLevel::Error,
                format!(
                    "sort key '{}' of {} '{}' has no group segment",
                    record.sort, record.class, record.latexcommand
                ),
            )
            .with_row(row)
            .with_column("sort")
            .with_suggestion("use '<order>_<group>', e.g. '10_cost'"),
        );
    }

    if !record.latexcommand.starts_with('\\') {
        result.add(
            Diagnostic::new(
                DiagnosticLevel::Warning,
                format!("command '{}' does not start with '\\'", record.latexcommand),
            )
            .with_row(row)
            .with_column("latexcommand"),
        );
    }

    if record.description.trim().is_empty() {
        result.add(
            Diagnostic::new(
                DiagnosticLevel::Warning,
                format!("'{}' has an empty description", record.latexcommand),
            )
            .with_row(row)
            .with_column("description"),
        );
    }

    if !in_any_section && !record.nomenclature_appendix && !record.math_symbols {
        result.add(
            Diagnostic::new(
                DiagnosticLevel::Info,
                format!("'{}' is not used by any output", record.latexcommand),
            )
            .with_row(row),
        );
    }
}

/// Format diagnostics for display
pub fn format_diagnostics(result: &CheckResult, use_color: bool) -> String {
    let mut output = String::new();

    for diag in &result.diagnostics {
        if use_color {
            let color = match diag.level {
                DiagnosticLevel::Error => "\x1b[31m",   // Red
                DiagnosticLevel::Warning => "\x1b[33m", // Yellow
                DiagnosticLevel::Info => "\x1b[34m",    // Blue
            };
            output.push_str(color);
            output.push_str(&format!("{}", diag));
            output.push_str("\x1b[0m\n\n");
        } else {
            output.push_str(&format!("{}\n\n", diag));
        }
    }

    // Summary
    if use_color {
        if result.has_errors() {
            output.push_str("\x1b[31m");
        } else if result.warnings > 0 {
            output.push_str("\x1b[33m");
        } else {
            output.push_str("\x1b[32m");
        }
    }

    output.push_str(&format!("Summary: {}", result.summary()));

    if use_color {
        output.push_str("\x1b[0m");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::delimited::read_csv;

    fn check(csv: &str) -> CheckResult {
        check_table(&read_csv(csv.as_bytes()).unwrap())
    }

    #[test]
    fn test_clean_table() {
        let result = check(
            "class,latexcommand,latex,description,sort,math_symbols,1_SPINE\n\
             Set,\\sG,\\mathcal{G},generators,1_a,1,1\n",
        );
        assert!(result.is_empty(), "{:?}", result.diagnostics);
        assert_eq!(result.records, 1);
        assert_eq!(result.summary(), "1 record(s), no issues found");
    }

    #[test]
    fn test_missing_column() {
        let result = check("class,latexcommand,sort\nSet,\\G,1_a\n");
        assert!(result.has_errors());
        assert_eq!(result.diagnostics[0].column.as_deref(), Some("description"));
    }

    #[test]
    fn test_all_bad_rows_are_reported() {
        let result = check(
            "class,latexcommand,description,sort,1_SPINE\n\
             Foo,\\a,a,1_a,1\n\
             Param,\\b,b,2,1\n\
             Set,\\c,c,3_a,1\n",
        );
        assert_eq!(result.errors, 2);
        assert_eq!(result.records, 2);
        assert_eq!(result.diagnostics[0].row, Some(2));
        assert_eq!(result.diagnostics[1].row, Some(3));
        assert_eq!(result.diagnostics[1].column.as_deref(), Some("sort"));
    }

    #[test]
    fn test_missing_group_key_outside_sections_is_not_reported() {
        let result = check(
            "class,latexcommand,latex,description,sort,math_symbols,1_SPINE\n\
             Aux,\\aX,x,aux,99,1,0\n\
             Set,\\sG,G,generators,7,1,1\n",
        );
        assert!(!result.has_errors(), "{:?}", result.diagnostics);
    }

    #[test]
    fn test_duplicate_command_within_class() {
        let result = check(
            "class,latexcommand,description,sort,1_SPINE\n\
             Param,\\c,cost,1_a,1\n\
             Var,\\c,not a clash,2_a,1\n\
             Param,\\c,cost again,3_a,1\n",
        );
        assert_eq!(result.errors, 1);
        let diag = &result.diagnostics[0];
        assert_eq!(diag.row, Some(4));
        assert!(diag.message.contains("row 2"));
    }

    #[test]
    fn test_math_symbol_without_expansion() {
        let result = check(
            "class,latexcommand,latex,description,sort,math_symbols,1_SPINE\n\
             Set,\\sG,,generators,1_a,1,1\n",
        );
        assert!(result.has_errors());
        assert_eq!(result.diagnostics[0].column.as_deref(), Some("latex"));
    }

    #[test]
    fn test_unused_record_is_a_note() {
        let result = check(
            "class,latexcommand,description,sort,1_SPINE\n\
             Set,\\sG,generators,1_a,0\n",
        );
        assert!(!result.has_errors());
        assert_eq!(result.infos, 1);
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::new(DiagnosticLevel::Warning, "empty description")
            .with_row(12)
            .with_column("description")
            .with_suggestion("describe the symbol");
        let text = diag.to_string();
        assert!(text.starts_with("warning: empty description"));
        assert!(text.contains("row 12, column 'description'"));
        assert!(text.contains("help: describe the symbol"));
    }

    #[test]
    fn test_format_diagnostics_without_color() {
        let result = check("class,latexcommand,sort\nSet,\\G,1_a\n");
        let text = format_diagnostics(&result, false);
        assert!(!text.contains("\x1b["));
        assert!(text.ends_with("Summary: 0 record(s), 1 error"));
    }
}
