//! Symbol macro definitions
//!
//! Each record flagged `math_symbols` becomes one definition binding its
//! `latexcommand` to its `latex` expansion:
//!
//! ```text
//! \newcommand{\vFlow}{v^{flow}}
//! \newcommand{\pCost}[1][t]{c_{#1}}
//! ```

use std::fmt;

use serde::Deserialize;

use crate::model::{RecordFilter, SymbolRecord};

/// Definition command used for every macro
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MacroCommand {
    #[default]
    NewCommand,
    RenewCommand,
    ProvideCommand,
}

impl MacroCommand {
    pub fn as_str(self) -> &'static str {
        match self {
            MacroCommand::NewCommand => "newcommand",
            MacroCommand::RenewCommand => "renewcommand",
            MacroCommand::ProvideCommand => "providecommand",
        }
    }
}

impl fmt::Display for MacroCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emits macro definitions, one line per selected record
#[derive(Debug, Clone, Copy, Default)]
pub struct MacroEmitter {
    command: MacroCommand,
}

impl MacroEmitter {
    pub fn new(command: MacroCommand) -> Self {
        Self { command }
    }

    pub fn command(&self) -> MacroCommand {
        self.command
    }

    /// One definition; records with an `optional` value take one optional
    /// argument defaulting to it
    pub fn format_definition(&self, record: &SymbolRecord) -> String {
        if record.optional.is_empty() {
            format!(
                "\\{}{{{}}}{{{}}}",
                self.command, record.latexcommand, record.latex
            )
        } else {
            format!(
                "\\{}{{{}}}[1][{}]{{{}}}",
                self.command, record.latexcommand, record.optional, record.latex
            )
        }
    }

    pub fn render_lines<'r, I, F>(&self, records: I, filter: &F) -> Vec<String>
    where
        I: IntoIterator<Item = &'r SymbolRecord>,
        F: RecordFilter + ?Sized,
    {
        records
            .into_iter()
            .filter(|r| filter.accepts(r))
            .map(|r| self.format_definition(r))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RecordFlag, Selection, SymbolClass};

    #[test]
    fn test_plain_definition() {
        let rec = SymbolRecord::new(SymbolClass::Var, r"\vFlow", "flow").with_latex("v^{flow}");
        assert_eq!(
            MacroEmitter::default().format_definition(&rec),
            r"\newcommand{\vFlow}{v^{flow}}"
        );
    }

    #[test]
    fn test_optional_argument_definition() {
        let rec = SymbolRecord::new(SymbolClass::Param, r"\pCost", "cost")
            .with_latex("c_{#1}")
            .with_optional("t");
        assert_eq!(
            MacroEmitter::new(MacroCommand::RenewCommand).format_definition(&rec),
            r"\renewcommand{\pCost}[1][t]{c_{#1}}"
        );
    }

    #[test]
    fn test_only_math_symbol_rows_are_emitted() {
        let records = vec![
            SymbolRecord::new(SymbolClass::Set, r"\sG", "g")
                .with_latex(r"\mathcal{G}")
                .math_symbol(),
            SymbolRecord::new(SymbolClass::Set, r"\sN", "n").with_latex(r"\mathcal{N}"),
            SymbolRecord::new(SymbolClass::Var, r"\vX", "x")
                .with_latex("x")
                .math_symbol(),
        ];
        let lines = MacroEmitter::default()
            .render_lines(&records, &Selection::flag(RecordFlag::MathSymbols));
        assert_eq!(
            lines,
            vec![
                r"\newcommand{\sG}{\mathcal{G}}".to_string(),
                r"\newcommand{\vX}{x}".to_string(),
            ]
        );
    }
}
