//! Symbol records and record selection

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

/// Category of a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolClass {
    /// Index sets
    Set,
    /// Model parameters
    Param,
    /// Decision variables
    Var,
    /// Dual variables
    Dual,
    /// Auxiliary expressions
    Aux,
}

impl SymbolClass {
    pub const ALL: [SymbolClass; 5] = [
        SymbolClass::Set,
        SymbolClass::Param,
        SymbolClass::Var,
        SymbolClass::Dual,
        SymbolClass::Aux,
    ];

    /// Name as it appears in the `class` column
    pub fn as_str(self) -> &'static str {
        match self {
            SymbolClass::Set => "Set",
            SymbolClass::Param => "Param",
            SymbolClass::Var => "Var",
            SymbolClass::Dual => "Dual",
            SymbolClass::Aux => "Aux",
        }
    }

    /// Whether tables of this class insert spacing between sort groups.
    /// Sets are listed flat.
    pub fn is_grouped(self) -> bool {
        !matches!(self, SymbolClass::Set)
    }
}

impl fmt::Display for SymbolClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a `class` cell names no known class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownClass(pub String);

impl fmt::Display for UnknownClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown class '{}' (expected one of Set, Param, Var, Dual, Aux)",
            self.0
        )
    }
}

impl std::error::Error for UnknownClass {}

impl FromStr for SymbolClass {
    type Err = UnknownClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        SymbolClass::ALL
            .into_iter()
            .find(|class| class.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownClass(trimmed.to_string()))
    }
}

/// One row of the symbol definition table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolRecord {
    pub class: SymbolClass,
    /// Command name, e.g. `\vFlow`
    pub latexcommand: String,
    /// Expansion bound to `latexcommand` in macro definitions
    pub latex: String,
    pub description: String,
    pub unit: String,
    /// Manual ordering key; the second `_` segment is the group key
    pub sort: String,
    /// Default argument for macro definitions taking an optional argument
    pub optional: String,
    pub math_symbols: bool,
    pub nomenclature: bool,
    pub nomenclature_appendix: bool,
    /// Section membership flags in header order
    pub sections: IndexMap<String, bool>,
}

impl SymbolRecord {
    /// Create a record with every optional field empty
    pub fn new(
        class: SymbolClass,
        latexcommand: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            class,
            latexcommand: latexcommand.into(),
            latex: String::new(),
            description: description.into(),
            unit: String::new(),
            sort: String::new(),
            optional: String::new(),
            math_symbols: false,
            nomenclature: true,
            nomenclature_appendix: false,
            sections: IndexMap::new(),
        }
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = sort.into();
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_latex(mut self, latex: impl Into<String>) -> Self {
        self.latex = latex.into();
        self
    }

    pub fn with_optional(mut self, optional: impl Into<String>) -> Self {
        self.optional = optional.into();
        self
    }

    /// Mark the record for macro-command emission
    pub fn math_symbol(mut self) -> Self {
        self.math_symbols = true;
        self
    }

    pub fn in_appendix(mut self) -> Self {
        self.nomenclature_appendix = true;
        self
    }

    pub fn with_nomenclature(mut self, nomenclature: bool) -> Self {
        self.nomenclature = nomenclature;
        self
    }

    pub fn with_section(mut self, key: impl Into<String>) -> Self {
        self.sections.insert(key.into(), true);
        self
    }

    /// Group key: the second `_`-delimited segment of `sort`
    pub fn group_key(&self) -> Option<&str> {
        self.sort.split('_').nth(1)
    }

    pub fn in_section(&self, key: &str) -> bool {
        self.sections.get(key).copied().unwrap_or(false)
    }

    pub fn has_flag(&self, flag: RecordFlag) -> bool {
        match flag {
            RecordFlag::MathSymbols => self.math_symbols,
            RecordFlag::Nomenclature => self.nomenclature,
            RecordFlag::Appendix => self.nomenclature_appendix,
        }
    }
}

/// Boolean columns with a fixed meaning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFlag {
    MathSymbols,
    Nomenclature,
    Appendix,
}

/// Predicate deciding which records a table or macro list includes
pub trait RecordFilter {
    fn accepts(&self, record: &SymbolRecord) -> bool;
}

impl<F> RecordFilter for F
where
    F: Fn(&SymbolRecord) -> bool,
{
    fn accepts(&self, record: &SymbolRecord) -> bool {
        self(record)
    }
}

/// Declarative record filter: class, section and required flags.
/// An unset criterion matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub class: Option<SymbolClass>,
    pub section: Option<String>,
    pub flags: Vec<RecordFlag>,
}

impl Selection {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn class(class: SymbolClass) -> Self {
        Self {
            class: Some(class),
            ..Default::default()
        }
    }

    pub fn flag(flag: RecordFlag) -> Self {
        Self {
            flags: vec![flag],
            ..Default::default()
        }
    }

    pub fn in_section(mut self, key: impl Into<String>) -> Self {
        self.section = Some(key.into());
        self
    }

    pub fn with_flag(mut self, flag: RecordFlag) -> Self {
        self.flags.push(flag);
        self
    }
}

impl RecordFilter for Selection {
    fn accepts(&self, record: &SymbolRecord) -> bool {
        self.class.map_or(true, |class| record.class == class)
            && self
                .section
                .as_deref()
                .map_or(true, |key| record.in_section(key))
            && self.flags.iter().all(|flag| record.has_flag(*flag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_parsing() {
        assert_eq!("Set".parse::<SymbolClass>(), Ok(SymbolClass::Set));
        assert_eq!(" param ".parse::<SymbolClass>(), Ok(SymbolClass::Param));
        assert_eq!("VAR".parse::<SymbolClass>(), Ok(SymbolClass::Var));
        let err = "Constraint".parse::<SymbolClass>().unwrap_err();
        assert!(err.to_string().contains("Constraint"));
    }

    #[test]
    fn test_group_key() {
        let rec = SymbolRecord::new(SymbolClass::Param, r"\c", "cost").with_sort("2_cost_a");
        assert_eq!(rec.group_key(), Some("cost"));

        let rec = rec.with_sort("10");
        assert_eq!(rec.group_key(), None);

        let rec = rec.with_sort("3_");
        assert_eq!(rec.group_key(), Some(""));
    }

    #[test]
    fn test_selection_matches_class_and_section() {
        let rec = SymbolRecord::new(SymbolClass::Var, r"\vFlow", "flow").with_section("1_SPINE");

        assert!(Selection::class(SymbolClass::Var).accepts(&rec));
        assert!(Selection::class(SymbolClass::Var)
            .in_section("1_SPINE")
            .accepts(&rec));
        assert!(!Selection::class(SymbolClass::Var)
            .in_section("3_stoch")
            .accepts(&rec));
        assert!(!Selection::class(SymbolClass::Param).accepts(&rec));
        assert!(Selection::all().accepts(&rec));
    }

    #[test]
    fn test_selection_flags() {
        let rec = SymbolRecord::new(SymbolClass::Aux, r"\aX", "aux").with_nomenclature(false);
        assert!(!Selection::class(SymbolClass::Aux)
            .with_flag(RecordFlag::Nomenclature)
            .accepts(&rec));
        assert!(!Selection::flag(RecordFlag::MathSymbols).accepts(&rec));
        assert!(Selection::flag(RecordFlag::MathSymbols).accepts(&rec.clone().math_symbol()));
    }

    #[test]
    fn test_closure_filter() {
        let rec = SymbolRecord::new(SymbolClass::Set, r"\G", "generators");
        let filter = |r: &SymbolRecord| r.latexcommand == r"\G";
        assert!(filter.accepts(&rec));
    }
}
