//! Tabular input sources
//!
//! Every loader produces a [`RawTable`]: a header row plus data rows whose
//! cells are already normalised to strings (empty cells become `""`).
//! Turning those strings into symbol records is the job of
//! [`crate::model::SymbolTable`].

use std::path::Path;

use crate::utils::error::{NomenclatureError, NomenclatureResult};

pub mod delimited;
#[cfg(feature = "spreadsheet")]
pub mod spreadsheet;

/// Header plus string cells, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Index of a header, matched after trimming
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Input formats recognised by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Spreadsheet,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> NomenclatureResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match extension.as_str() {
            "csv" => Ok(InputFormat::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(InputFormat::Spreadsheet),
            _ => Err(NomenclatureError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

/// Load the symbol table from a `.csv` file or a spreadsheet.
///
/// `sheet` selects a worksheet by name; the first worksheet is used
/// otherwise. It is ignored for CSV input.
pub fn load_table(path: impl AsRef<Path>, sheet: Option<&str>) -> NomenclatureResult<RawTable> {
    let path = path.as_ref();
    match InputFormat::from_path(path)? {
        InputFormat::Csv => delimited::read_csv_path(path),
        #[cfg(feature = "spreadsheet")]
        InputFormat::Spreadsheet => spreadsheet::read_spreadsheet_path(path, sheet),
        #[cfg(not(feature = "spreadsheet"))]
        InputFormat::Spreadsheet => {
            let _ = sheet;
            Err(NomenclatureError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: "spreadsheet (built without the `spreadsheet` feature)".to_string(),
            })
        }
    }
}

/// Render a float cell the way it reads in the sheet: `1.0` becomes `1`
pub(crate) fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Interpret a normalised cell as a flag.
/// Numbers equal to 1 (`1`, `1.0`) and `true`, `yes`, `x` (case-insensitive)
/// are true, everything else false.
pub fn parse_flag(cell: &str) -> bool {
    let cell = cell.trim();
    cell.parse::<f64>().map_or(false, |n| n == 1.0)
        || cell.eq_ignore_ascii_case("true")
        || cell.eq_ignore_ascii_case("yes")
        || cell.eq_ignore_ascii_case("x")
}

/// Whether a cell reads as a flag value of either polarity.
/// Blank cells count, since they mean false.
pub fn is_flag_value(cell: &str) -> bool {
    let cell = cell.trim();
    cell.is_empty()
        || cell.parse::<f64>().map_or(false, |n| n == 0.0 || n == 1.0)
        || ["true", "false", "yes", "no", "x"]
            .iter()
            .any(|word| cell.eq_ignore_ascii_case(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(0.5), "0.5");
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" TRUE "));
        assert!(parse_flag("x"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
        assert!(!parse_flag("false"));
    }

    #[test]
    fn test_parse_flag_numeric_text() {
        // pandas writes flag columns as floats when exporting csv
        assert!(parse_flag("1.0"));
        assert!(parse_flag(" 1.0 "));
        assert!(!parse_flag("0.0"));
        assert!(!parse_flag("2"));
        assert!(!parse_flag("NaN"));
    }

    #[test]
    fn test_is_flag_value() {
        for cell in ["", "0", "1", "1.0", "0.0", "x", "No", "TRUE"] {
            assert!(is_flag_value(cell), "{:?}", cell);
        }
        for cell in ["2", "see eq. 3", "Unnamed: 0", "-1"] {
            assert!(!is_flag_value(cell), "{:?}", cell);
        }
    }

    #[test]
    fn test_input_format_from_extension() {
        assert_eq!(
            InputFormat::from_path(Path::new("symbols.CSV")).unwrap(),
            InputFormat::Csv
        );
        assert_eq!(
            InputFormat::from_path(Path::new("00_nomenclature_definition.xlsx")).unwrap(),
            InputFormat::Spreadsheet
        );
        assert!(matches!(
            InputFormat::from_path(Path::new("symbols.json")),
            Err(NomenclatureError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_raw_table_column_lookup() {
        let table = RawTable::new(vec!["class".into(), " sort ".into()]);
        assert_eq!(table.column("sort"), Some(1));
        assert_eq!(table.column("unit"), None);
        assert!(table.is_empty());
    }
}
