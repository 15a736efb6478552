//! The in-memory symbol table
//!
//! Rows are converted once, sorted by their `sort` column, and never
//! modified afterwards.

use std::cmp::Ordering;

use indexmap::IndexMap;
use tracing::{debug, warn};

use super::record::{SymbolClass, SymbolRecord};
use crate::source::{is_flag_value, parse_flag, RawTable};
use crate::utils::error::{NomenclatureError, NomenclatureResult};

/// Columns that must be present in the header row
pub const REQUIRED_COLUMNS: [&str; 4] = ["class", "latexcommand", "description", "sort"];

/// Columns with a fixed meaning. Every other non-empty header whose cells
/// are all flag values is a section flag.
pub const KNOWN_COLUMNS: [&str; 10] = [
    "class",
    "latexcommand",
    "latex",
    "description",
    "unit",
    "sort",
    "optional",
    "math_symbols",
    "nomenclature",
    "nomenclature_appendix",
];

/// Column positions resolved from a header row
#[derive(Debug, Clone)]
pub struct RowSchema {
    class: usize,
    latexcommand: usize,
    description: usize,
    sort: usize,
    latex: Option<usize>,
    unit: Option<usize>,
    optional: Option<usize>,
    math_symbols: Option<usize>,
    nomenclature: Option<usize>,
    nomenclature_appendix: Option<usize>,
    sections: Vec<(String, usize)>,
}

impl RowSchema {
    pub fn from_headers(table: &RawTable) -> NomenclatureResult<Self> {
        let required =
            |name: &str| table.column(name).ok_or_else(|| NomenclatureError::missing_column(name));

        let mut sections = Vec::new();
        for (idx, header) in table.headers.iter().enumerate() {
            let header = header.trim();
            if header.is_empty() || KNOWN_COLUMNS.contains(&header) {
                continue;
            }
            let flags_only = table
                .rows
                .iter()
                .all(|row| row.get(idx).map_or(true, |cell| is_flag_value(cell)));
            if flags_only {
                sections.push((header.to_string(), idx));
            } else {
                debug!(column = header, "ignoring column with non-flag values");
            }
        }

        Ok(Self {
            class: required("class")?,
            latexcommand: required("latexcommand")?,
            description: required("description")?,
            sort: required("sort")?,
            latex: table.column("latex"),
            unit: table.column("unit"),
            optional: table.column("optional"),
            math_symbols: table.column("math_symbols"),
            nomenclature: table.column("nomenclature"),
            nomenclature_appendix: table.column("nomenclature_appendix"),
            sections,
        })
    }

    /// Section flag columns in header order
    pub fn section_columns(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|(name, _)| name.as_str())
    }

    /// Convert one data row.
    ///
    /// Returns `Ok(None)` for a row whose cells are all blank. `row_number`
    /// is the 1-indexed line in the source, used for error messages.
    pub fn record(
        &self,
        cells: &[String],
        row_number: usize,
    ) -> NomenclatureResult<Option<SymbolRecord>> {
        if cells.iter().all(|c| c.trim().is_empty()) {
            return Ok(None);
        }

        let cell = |idx: usize| cells.get(idx).map(String::as_str).unwrap_or("");
        let opt_cell = |idx: Option<usize>| idx.map(cell).unwrap_or("");

        let class: SymbolClass = cell(self.class)
            .parse()
            .map_err(|e: super::record::UnknownClass| {
                NomenclatureError::invalid_row(row_number, e.to_string())
            })?;

        let latexcommand = cell(self.latexcommand).trim();
        if latexcommand.is_empty() {
            return Err(NomenclatureError::invalid_row(
                row_number,
                "empty 'latexcommand'",
            ));
        }

        let sort = cell(self.sort).trim().to_string();

        let sections: IndexMap<String, bool> = self
            .sections
            .iter()
            .map(|(name, idx)| (name.clone(), parse_flag(cell(*idx))))
            .collect();

        Ok(Some(SymbolRecord {
            class,
            latexcommand: latexcommand.to_string(),
            latex: opt_cell(self.latex).to_string(),
            description: cell(self.description).to_string(),
            unit: opt_cell(self.unit).to_string(),
            sort,
            optional: opt_cell(self.optional).to_string(),
            math_symbols: parse_flag(opt_cell(self.math_symbols)),
            nomenclature: self.nomenclature.map_or(true, |idx| parse_flag(cell(idx))),
            nomenclature_appendix: parse_flag(opt_cell(self.nomenclature_appendix)),
            sections,
        }))
    }
}

/// Ordered, immutable collection of symbol records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    records: Vec<SymbolRecord>,
    sections: Vec<String>,
}

impl SymbolTable {
    /// Build from raw rows, failing on the first malformed row
    pub fn from_raw(table: &RawTable) -> NomenclatureResult<Self> {
        let schema = RowSchema::from_headers(table)?;

        let mut records = Vec::with_capacity(table.len());
        for (idx, row) in table.rows.iter().enumerate() {
            // header is line 1
            let row_number = idx + 2;
            match schema.record(row, row_number)? {
                Some(record) => records.push(record),
                None => warn!(row = row_number, "skipping blank row"),
            }
        }

        let sections = schema.section_columns().map(str::to_string).collect();
        let symbols = Self::with_sections(records, sections);
        debug!(
            records = symbols.len(),
            sections = ?symbols.sections,
            "symbol table ready"
        );
        Ok(symbols)
    }

    /// Build from records; section columns are collected from the records
    pub fn from_records(records: Vec<SymbolRecord>) -> Self {
        let mut sections: Vec<String> = Vec::new();
        for key in records.iter().flat_map(|r| r.sections.keys()) {
            if !sections.contains(key) {
                sections.push(key.clone());
            }
        }
        Self::with_sections(records, sections)
    }

    fn with_sections(mut records: Vec<SymbolRecord>, sections: Vec<String>) -> Self {
        // stable: rows sharing a sort key keep their file order
        records.sort_by(|a, b| compare_sort_keys(&a.sort, &b.sort));
        Self { records, sections }
    }

    pub fn records(&self) -> &[SymbolRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SymbolRecord> {
        self.records.iter()
    }

    /// Names of the section flag columns, in header order
    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Order two `sort` cells. Numeric keys compare by value and come before
/// text keys; text keys compare lexicographically.
pub fn compare_sort_keys(a: &str, b: &str) -> Ordering {
    let number = |key: &str| key.parse::<f64>().ok().filter(|n| !n.is_nan());
    match (number(a), number(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

impl<'a> IntoIterator for &'a SymbolTable {
    type Item = &'a SymbolRecord;
    type IntoIter = std::slice::Iter<'a, SymbolRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::delimited::read_csv;

    const SAMPLE: &str = "\
class,latexcommand,latex,description,unit,sort,optional,math_symbols,1_SPINE,3_stoch
Param,\\pCost,c,cost,EUR,2_cost,,1,1,0
Set,\\sG,\\mathcal{G},generators,,1_a,,1,1,1
Var,\\vFlow,v^{flow},flow,MW,3_flow,t,0,1,
";

    fn sample() -> RawTable {
        read_csv(SAMPLE.as_bytes()).unwrap()
    }

    #[test]
    fn test_from_raw_sorts_by_sort_key() {
        let table = SymbolTable::from_raw(&sample()).unwrap();
        let commands: Vec<_> = table.iter().map(|r| r.latexcommand.as_str()).collect();
        assert_eq!(commands, vec![r"\sG", r"\pCost", r"\vFlow"]);
    }

    #[test]
    fn test_from_raw_reads_fields_and_flags() {
        let table = SymbolTable::from_raw(&sample()).unwrap();
        let flow = &table.records()[2];
        assert_eq!(flow.class, SymbolClass::Var);
        assert_eq!(flow.latex, "v^{flow}");
        assert_eq!(flow.unit, "MW");
        assert_eq!(flow.optional, "t");
        assert!(!flow.math_symbols);
        assert!(flow.in_section("1_SPINE"));
        assert!(!flow.in_section("3_stoch"));
        // no `nomenclature` column
        assert!(flow.nomenclature);
        assert!(!flow.nomenclature_appendix);
    }

    #[test]
    fn test_section_columns_in_header_order() {
        let table = SymbolTable::from_raw(&sample()).unwrap();
        assert_eq!(table.sections(), &["1_SPINE", "3_stoch"]);
    }

    #[test]
    fn test_missing_required_column() {
        let raw = read_csv("class,latexcommand,description\nSet,\\G,g\n".as_bytes()).unwrap();
        let err = SymbolTable::from_raw(&raw).unwrap_err();
        assert!(matches!(
            err,
            NomenclatureError::MissingColumn { ref column } if column == "sort"
        ));
    }

    #[test]
    fn test_unknown_class_reports_row() {
        let raw = read_csv(
            "class,latexcommand,description,sort\nSet,\\G,g,1_a\nFoo,\\x,x,1_b\n".as_bytes(),
        )
        .unwrap();
        let err = SymbolTable::from_raw(&raw).unwrap_err();
        assert!(matches!(err, NomenclatureError::InvalidRow { row: 3, .. }));
    }

    #[test]
    fn test_rows_without_group_segment_load() {
        // only a grouped table that renders the row can reject it
        let raw = read_csv(
            "class,latexcommand,description,sort,nomenclature\nParam,\\c,cost,7,1\nAux,\\aX,aux,99,0\n"
                .as_bytes(),
        )
        .unwrap();
        let table = SymbolTable::from_raw(&raw).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].group_key(), None);
    }

    #[test]
    fn test_text_columns_are_not_sections() {
        let raw = read_csv(
            "class,latexcommand,description,sort,notes,Unnamed: 0,1_SPINE,3_stoch\n\
             Set,\\G,g,1_a,see chapter 2,0,1.0,\n\
             Set,\\N,n,1_b,,1,0.0,\n\
             Set,\\T,t,1_c,,2,x,\n"
                .as_bytes(),
        )
        .unwrap();
        let table = SymbolTable::from_raw(&raw).unwrap();
        assert_eq!(table.sections(), &["1_SPINE", "3_stoch"]);
        assert!(table.records()[0].in_section("1_SPINE"));
        assert!(!table.records()[1].in_section("1_SPINE"));
        assert!(!table.records()[0].sections.contains_key("notes"));
    }

    #[test]
    fn test_numeric_sort_keys_compare_by_value() {
        let raw = read_csv(
            "class,latexcommand,description,sort\nSet,\\b,b,10\nSet,\\a,a,2\nSet,\\c,c,1_a\n"
                .as_bytes(),
        )
        .unwrap();
        let table = SymbolTable::from_raw(&raw).unwrap();
        let commands: Vec<_> = table.iter().map(|r| r.latexcommand.as_str()).collect();
        assert_eq!(commands, vec![r"\a", r"\b", r"\c"]);
    }

    #[test]
    fn test_compare_sort_keys() {
        assert_eq!(compare_sort_keys("2", "10"), Ordering::Less);
        assert_eq!(compare_sort_keys("2.5", "2"), Ordering::Greater);
        assert_eq!(compare_sort_keys("10_a", "2_a"), Ordering::Less);
        assert_eq!(compare_sort_keys("99", "1_a"), Ordering::Less);
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let raw = read_csv("class,latexcommand,description,sort\n,,,\nSet,\\G,g,1_a\n".as_bytes())
            .unwrap();
        assert_eq!(SymbolTable::from_raw(&raw).unwrap().len(), 1);
    }

    #[test]
    fn test_equal_sort_keys_keep_input_order() {
        let records = vec![
            SymbolRecord::new(SymbolClass::Param, r"\b", "second").with_sort("1_x"),
            SymbolRecord::new(SymbolClass::Param, r"\a", "first").with_sort("1_x"),
            SymbolRecord::new(SymbolClass::Param, r"\z", "zero").with_sort("0_x"),
        ];
        let table = SymbolTable::from_records(records);
        let commands: Vec<_> = table.iter().map(|r| r.latexcommand.as_str()).collect();
        assert_eq!(commands, vec![r"\z", r"\b", r"\a"]);
    }
}
