//! Complete output documents
//!
//! Assembles the nomenclature, the appendix and the macro file from the
//! table and macro formatters. Documents are plain `String`s; writing them
//! is left to [`crate::generate`].

use crate::config::GeneratorConfig;
use crate::format::macros::MacroEmitter;
use crate::format::table::{Grouping, TableFormatter};
use crate::model::{RecordFilter, RecordFlag, Selection, SymbolClass, SymbolTable};
use crate::utils::error::{NomenclatureError, NomenclatureResult};

/// Width of the `%` rule around banner comments
pub const BANNER_WIDTH: usize = 75;

/// One table of the nomenclature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subsection {
    /// Text of the banner comment
    pub banner: &'static str,
    /// Heading printed in the document
    pub title: &'static str,
    pub class: SymbolClass,
    /// Extra flag a record must carry
    pub requires: Option<RecordFlag>,
}

impl Subsection {
    pub fn grouping(&self) -> Grouping {
        if self.class.is_grouped() {
            Grouping::ByGroupKey
        } else {
            Grouping::Flat
        }
    }

    pub fn selection(&self, section: &str) -> Selection {
        let selection = Selection::class(self.class).in_section(section);
        match self.requires {
            Some(flag) => selection.with_flag(flag),
            None => selection,
        }
    }
}

pub const SETS: Subsection = Subsection {
    banner: "Sets",
    title: "Sets",
    class: SymbolClass::Set,
    requires: None,
};

pub const PARAMETERS: Subsection = Subsection {
    banner: "Parameters",
    title: "Parameters",
    class: SymbolClass::Param,
    requires: None,
};

pub const VARIABLES: Subsection = Subsection {
    banner: "Variables",
    title: "Decision Variables",
    class: SymbolClass::Var,
    requires: None,
};

pub const DUALS: Subsection = Subsection {
    banner: "Dual variables",
    title: "Dual Variables",
    class: SymbolClass::Dual,
    requires: None,
};

pub const AUXILIARIES: Subsection = Subsection {
    banner: "Auxiliaries",
    title: "Auxiliaries",
    class: SymbolClass::Aux,
    requires: Some(RecordFlag::Nomenclature),
};

/// `%`-rule, `% title`, `%`-rule
pub fn banner(title: &str) -> Vec<String> {
    let rule = "%".repeat(BANNER_WIDTH);
    vec![rule.clone(), format!("% {}", title), rule]
}

pub fn tex_root_line(root: &str) -> String {
    format!("%!TEX root = {}", root)
}

/// Dimension registers used by the table column specifications.
/// `\colc` takes whatever text width `\cola` and `\colb` leave over.
pub fn column_definitions(cola: &str, colb: &str) -> Vec<String> {
    vec![
        r"\newcount\totalcol".to_string(),
        r"\totalcol = 3".to_string(),
        r"\newdimen\cola".to_string(),
        format!(r"\cola = {}", cola),
        r"\newdimen\colb".to_string(),
        format!(r"\colb = {}", colb),
        r"\newdimen\colc".to_string(),
        r"\colc =\dimexpr\textwidth -\tabcolsep *\totalcol * 2 -\arrayrulewidth * (1 +\totalcol)-\cola -\colb\relax".to_string(),
    ]
}

fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Builds the documents of one run from a shared configuration
pub struct DocumentBuilder<'a> {
    config: &'a GeneratorConfig,
    tables: TableFormatter,
}

impl<'a> DocumentBuilder<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self {
            config,
            tables: TableFormatter::new(config.layout.clone()),
        }
    }

    /// Subsections rendered for every section, in order
    pub fn subsections(&self) -> Vec<Subsection> {
        let mut subsections = vec![SETS, PARAMETERS, VARIABLES];
        if self.config.nomenclature.include_duals {
            subsections.push(DUALS);
        }
        if self.config.nomenclature.include_auxiliaries {
            subsections.push(AUXILIARIES);
        }
        subsections
    }

    /// The macro definition file
    pub fn math_symbols(&self, table: &SymbolTable) -> String {
        let mut lines = vec![tex_root_line(&self.config.tex_root)];
        lines.extend(
            MacroEmitter::new(self.config.macros.command)
                .render_lines(table, &Selection::flag(RecordFlag::MathSymbols)),
        );
        finish(lines)
    }

    /// The nomenclature: one block of subsections per section.
    ///
    /// Section headings are only printed when more than one section is
    /// rendered; a single section goes straight into its subsections.
    /// Fails on a configured section the table lacks, and on a row of a
    /// grouped table without a group key.
    pub fn nomenclature(&self, table: &SymbolTable) -> NomenclatureResult<String> {
        let config = &self.config.nomenclature;
        let mut lines = vec![tex_root_line(&self.config.tex_root)];
        lines.extend(banner(&config.title));
        lines.push(format!(r"\section*{{{}}}", config.title));
        lines.extend(column_definitions(&config.cola, &config.colb));

        let sections = self.config.resolve_sections(table)?;
        let headed = sections.len() > 1;
        for (key, title) in &sections {
            if headed {
                lines.extend(banner(title));
                lines.push(format!(r"\pdfbookmark[section]{{{}}}{{{}}}", title, key));
                lines.push(format!(r"\section*{{{}}}\label{{nom:{}}}", title, key));
            }
            for subsection in self.subsections() {
                let selection = subsection.selection(key);
                if subsection.grouping() == Grouping::ByGroupKey {
                    let ungrouped = table
                        .iter()
                        .find(|r| selection.accepts(r) && r.group_key().is_none());
                    if let Some(record) = ungrouped {
                        return Err(NomenclatureError::missing_group_key(record));
                    }
                }

                lines.extend(banner(subsection.banner));
                lines.push(format!(r"\subsection*{{{}}}", subsection.title));
                lines.push(r"\vspace{-1em}".to_string());
                lines.extend(
                    self.tables
                        .render_lines(table, &selection, subsection.grouping()),
                );
                lines.push(String::new());
            }
        }

        Ok(finish(lines))
    }

    /// The appendix: one flat table of all records flagged
    /// `nomenclature_appendix`, regardless of class or section
    pub fn appendix(&self, table: &SymbolTable) -> String {
        let config = &self.config.appendix;
        let mut lines = vec![tex_root_line(self.config.appendix_tex_root())];
        lines.extend(banner(&config.title));
        lines.push(format!(r"\section*{{{}}}", config.title));
        if config.add_to_toc {
            lines.push(format!(
                r"\addcontentsline{{toc}}{{section}}{{{}}}",
                config.title
            ));
        }
        lines.push(String::new());
        lines.extend(column_definitions(&config.cola, &config.colb));
        lines.extend(self.tables.render_lines(
            table,
            &Selection::flag(RecordFlag::Appendix),
            Grouping::Flat,
        ));
        lines.push(String::new());
        finish(lines)
    }
}
