//! Output file handling
//!
//! Generated documents go through the `OutputWriter` trait so the same
//! driver can write to disk (CLI) or into memory (tests, dry runs).

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::debug;

use super::error::{NomenclatureError, NomenclatureResult};

/// Sink for generated documents
pub trait OutputWriter {
    /// Write one file, replacing any previous content.
    /// Returns where the file ended up.
    fn write_file(&mut self, name: &str, contents: &str) -> NomenclatureResult<PathBuf>;
}

/// Writes files below a base directory, creating missing directories
pub struct StdOutputWriter {
    base_directory: PathBuf,
}

impl StdOutputWriter {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_directory: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_directory
    }
}

impl OutputWriter for StdOutputWriter {
    fn write_file(&mut self, name: &str, contents: &str) -> NomenclatureResult<PathBuf> {
        let path = self.base_directory.join(name);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| NomenclatureError::io(parent, e))?;
        }
        fs::write(&path, contents).map_err(|e| NomenclatureError::io(&path, e))?;
        debug!(path = %path.display(), bytes = contents.len(), "wrote file");
        Ok(path)
    }
}

/// Keeps written files in memory, in write order
#[derive(Debug, Default)]
pub struct MemoryOutputWriter {
    files: IndexMap<String, String>,
}

impl MemoryOutputWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.files.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl OutputWriter for MemoryOutputWriter {
    fn write_file(&mut self, name: &str, contents: &str) -> NomenclatureResult<PathBuf> {
        self.files.insert(name.to_string(), contents.to_string());
        Ok(PathBuf::from(name))
    }
}

/// `X.tex` -> `X<suffix>.tex`. Names without an extension get the suffix appended.
pub fn with_stem_suffix(name: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        return name.to_string();
    }
    let file_start = name.rfind(['/', '\\']).map_or(0, |i| i + 1);
    match name[file_start..].rfind('.') {
        Some(dot) if dot > 0 => {
            let dot = file_start + dot;
            format!("{}{}{}", &name[..dot], suffix, &name[dot..])
        }
        _ => format!("{}{}", name, suffix),
    }
}

/// Name used when outputs must not overwrite: `X.tex` -> `X_alt.tex`
pub fn alternate_name(name: &str) -> String {
    with_stem_suffix(name, "_alt")
}
