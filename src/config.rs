//! Generator configuration
//!
//! All settings have defaults, so an empty TOML file is a valid
//! configuration. A full file looks like:
//!
//! ```toml
//! input = "00_nomenclature_definition.xlsx"
//! output_dir = "."
//! tex_root = "SPINE_model_equations.tex"
//! replace = true
//!
//! [outputs]
//! commands = true
//! nomenclature = true
//! appendix = false
//!
//! [macros]
//! command = "newcommand"
//! file = "00_math_symbols.tex"
//!
//! [nomenclature]
//! cola = "6cm"
//! colb = "0cm"
//! sections = { "1_SPINE" = "SpineOpt model" }
//!
//! [layout]
//! environment = "longtable"
//! group_spacing = "0.5em"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::format::macros::MacroCommand;
use crate::format::table::TableLayout;
use crate::model::SymbolTable;
use crate::utils::error::{NomenclatureError, NomenclatureResult};

/// Which documents a run produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSelection {
    /// Symbol macro definitions
    pub commands: bool,
    /// The nomenclature document
    pub nomenclature: bool,
    /// The additional-nomenclature appendix
    pub appendix: bool,
}

impl Default for OutputSelection {
    fn default() -> Self {
        Self {
            commands: true,
            nomenclature: true,
            appendix: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MacroConfig {
    pub command: MacroCommand,
    pub file: String,
    /// Inserted before the extension, e.g. `1_det` gives `00_math_symbols1_det.tex`
    pub suffix: String,
}

impl Default for MacroConfig {
    fn default() -> Self {
        Self {
            command: MacroCommand::NewCommand,
            file: "00_math_symbols.tex".to_string(),
            suffix: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NomenclatureConfig {
    pub file: String,
    pub title: String,
    /// Width of the symbol column
    pub cola: String,
    /// Width of the unit column
    pub colb: String,
    /// Section flag column -> heading. Empty means every section column
    /// of the input, titled by its own name.
    pub sections: BTreeMap<String, String>,
    pub include_duals: bool,
    pub include_auxiliaries: bool,
}

impl Default for NomenclatureConfig {
    fn default() -> Self {
        Self {
            file: "00_nomenclature.tex".to_string(),
            title: "Nomenclature".to_string(),
            cola: "6cm".to_string(),
            colb: "0cm".to_string(),
            sections: BTreeMap::new(),
            include_duals: false,
            include_auxiliaries: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppendixConfig {
    pub file: String,
    pub title: String,
    /// Overrides the top-level `tex_root`
    pub tex_root: Option<String>,
    pub cola: String,
    pub colb: String,
    /// Emit `\addcontentsline` for the appendix heading
    pub add_to_toc: bool,
}

impl Default for AppendixConfig {
    fn default() -> Self {
        Self {
            file: "A_nomenclature_additional.tex".to_string(),
            title: "Additional Nomenclature".to_string(),
            tex_root: None,
            cola: "1.3cm".to_string(),
            colb: "1.6cm".to_string(),
            add_to_toc: true,
        }
    }
}

/// Complete generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Symbol definition table (`.xlsx`, `.xls`, `.ods` or `.csv`)
    pub input: Option<PathBuf>,
    /// Worksheet name; the first sheet when unset
    pub sheet: Option<String>,
    pub output_dir: PathBuf,
    /// Document named in the `%!TEX root` line of every output
    pub tex_root: String,
    /// Overwrite outputs; when false, `X.tex` is written as `X_alt.tex`
    pub replace: bool,
    pub outputs: OutputSelection,
    pub macros: MacroConfig,
    pub nomenclature: NomenclatureConfig,
    pub appendix: AppendixConfig,
    pub layout: TableLayout,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            input: None,
            sheet: None,
            output_dir: PathBuf::from("."),
            tex_root: "main.tex".to_string(),
            replace: true,
            outputs: OutputSelection::default(),
            macros: MacroConfig::default(),
            nomenclature: NomenclatureConfig::default(),
            appendix: AppendixConfig::default(),
            layout: TableLayout::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the appendix document
    pub fn appendix_only() -> Self {
        Self {
            outputs: OutputSelection {
                commands: false,
                nomenclature: false,
                appendix: true,
            },
            ..Default::default()
        }
    }

    /// Only the macro definitions
    pub fn commands_only() -> Self {
        Self {
            outputs: OutputSelection {
                commands: true,
                nomenclature: false,
                appendix: false,
            },
            ..Default::default()
        }
    }

    pub fn from_toml_str(input: &str) -> NomenclatureResult<Self> {
        let config: GeneratorConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file. Relative `input` and `output_dir` paths are
    /// resolved against the file's directory.
    pub fn from_path(path: impl AsRef<Path>) -> NomenclatureResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| NomenclatureError::io(path, e))?;
        let mut config = Self::from_toml_str(&text)?;

        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Some(input) = config.input.as_mut().filter(|p| p.is_relative()) {
                *input = base.join(&*input);
            }
            if config.output_dir.is_relative() {
                config.output_dir = base.join(&config.output_dir);
            }
        }

        Ok(config)
    }

    pub fn validate(&self) -> NomenclatureResult<()> {
        let files = [
            ("macros.file", &self.macros.file),
            ("nomenclature.file", &self.nomenclature.file),
            ("appendix.file", &self.appendix.file),
        ];
        for (key, file) in files {
            if file.trim().is_empty() {
                return Err(NomenclatureError::invalid_config(format!(
                    "'{}' must not be empty",
                    key
                )));
            }
        }

        if self.layout.environment.trim().is_empty() {
            return Err(NomenclatureError::invalid_config(
                "'layout.environment' must not be empty",
            ));
        }

        if let Some(key) = self.nomenclature.sections.keys().find(|k| k.trim().is_empty()) {
            return Err(NomenclatureError::invalid_config(format!(
                "empty section key in 'nomenclature.sections' (title '{}')",
                self.nomenclature.sections[key]
            )));
        }

        Ok(())
    }

    /// Sections rendered in the nomenclature, as `(column, title)` in
    /// ascending column order.
    ///
    /// A configured section must be a flag column of the table.
    pub fn resolve_sections(
        &self,
        table: &SymbolTable,
    ) -> NomenclatureResult<Vec<(String, String)>> {
        if self.nomenclature.sections.is_empty() {
            let mut keys: Vec<String> = table.sections().to_vec();
            keys.sort();
            return Ok(keys.into_iter().map(|k| (k.clone(), k)).collect());
        }

        self.nomenclature
            .sections
            .iter()
            .map(|(key, title)| {
                if table.sections().contains(key) {
                    Ok((key.clone(), title.clone()))
                } else {
                    Err(NomenclatureError::missing_column(key.as_str()))
                }
            })
            .collect()
    }

    /// Root document for the appendix
    pub fn appendix_tex_root(&self) -> &str {
        self.appendix.tex_root.as_deref().unwrap_or(&self.tex_root)
    }
}
