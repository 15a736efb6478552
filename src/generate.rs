//! Generation driver
//!
//! Loads the symbol table, builds every enabled document and hands them to
//! an [`OutputWriter`]. Any failure aborts the run; files written before
//! the failure are left in place.

use std::fmt;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::GeneratorConfig;
use crate::format::document::DocumentBuilder;
use crate::model::SymbolTable;
use crate::source::load_table;
use crate::utils::error::{NomenclatureError, NomenclatureResult};
use crate::utils::files::{alternate_name, with_stem_suffix, OutputWriter};

/// The documents a run can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    MathSymbols,
    Nomenclature,
    Appendix,
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputKind::MathSymbols => write!(f, "math symbols"),
            OutputKind::Nomenclature => write!(f, "nomenclature"),
            OutputKind::Appendix => write!(f, "appendix"),
        }
    }
}

/// A rendered document and the file name it is written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub kind: OutputKind,
    pub name: String,
    pub contents: String,
}

pub struct Generator<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// File name for a document.
    ///
    /// The macro file takes the configured suffix; the nomenclature and
    /// appendix switch to their `_alt` name when `replace` is off.
    pub fn output_name(&self, kind: OutputKind) -> String {
        let config = self.config;
        match kind {
            OutputKind::MathSymbols => with_stem_suffix(&config.macros.file, &config.macros.suffix),
            OutputKind::Nomenclature if config.replace => config.nomenclature.file.clone(),
            OutputKind::Nomenclature => alternate_name(&config.nomenclature.file),
            OutputKind::Appendix if config.replace => config.appendix.file.clone(),
            OutputKind::Appendix => alternate_name(&config.appendix.file),
        }
    }

    /// Read and convert the configured input
    pub fn load(&self) -> NomenclatureResult<SymbolTable> {
        let input = self
            .config
            .input
            .as_ref()
            .ok_or_else(|| NomenclatureError::invalid_config("no input table given"))?;
        let raw = load_table(input, self.config.sheet.as_deref())?;
        SymbolTable::from_raw(&raw)
    }

    /// Render every enabled document, in write order
    pub fn plan(&self, table: &SymbolTable) -> NomenclatureResult<Vec<OutputFile>> {
        let outputs = self.config.outputs;
        let builder = DocumentBuilder::new(self.config);
        let mut files = Vec::new();

        if outputs.commands {
            files.push(self.output(OutputKind::MathSymbols, builder.math_symbols(table)));
        }
        if outputs.nomenclature {
            files.push(self.output(OutputKind::Nomenclature, builder.nomenclature(table)?));
        }
        if outputs.appendix {
            files.push(self.output(OutputKind::Appendix, builder.appendix(table)));
        }

        if files.is_empty() {
            warn!("all outputs are disabled; nothing to generate");
        }
        Ok(files)
    }

    fn output(&self, kind: OutputKind, contents: String) -> OutputFile {
        OutputFile {
            kind,
            name: self.output_name(kind),
            contents,
        }
    }

    /// Write planned files, stopping at the first failure
    pub fn write<W>(&self, files: &[OutputFile], writer: &mut W) -> NomenclatureResult<Vec<PathBuf>>
    where
        W: OutputWriter + ?Sized,
    {
        let mut written = Vec::with_capacity(files.len());
        for file in files {
            let path = writer.write_file(&file.name, &file.contents)?;
            info!(kind = %file.kind, path = %path.display(), "generated");
            written.push(path);
        }
        Ok(written)
    }

    /// Plan and write all documents for an already loaded table
    pub fn generate<W>(&self, table: &SymbolTable, writer: &mut W) -> NomenclatureResult<Vec<PathBuf>>
    where
        W: OutputWriter + ?Sized,
    {
        let files = self.plan(table)?;
        self.write(&files, writer)
    }

    /// Load the input and write all documents
    pub fn run<W>(&self, writer: &mut W) -> NomenclatureResult<Vec<PathBuf>>
    where
        W: OutputWriter + ?Sized,
    {
        let table = self.load()?;
        info!(records = table.len(), "loaded symbol table");
        self.generate(&table, writer)
    }
}
