//! Three-column nomenclature tables
//!
//! A table is an opening `\begin{longtable}` line, one line per selected
//! record and a closing line. Grouped tables put vertical space between
//! runs of records whose group key (second `_` segment of `sort`) differs:
//!
//! ```text
//!     \begin{longtable}{p{\cola} p{\colc} >{...}p{\colb}}
//!         $\pCost$    & cost        & EUR \\[0.5em]
//!
//!         $\pDemand$  & demand      & MW  \\
//!     \end{longtable}
//! ```

use serde::Deserialize;

use crate::model::{RecordFilter, SymbolRecord};

/// Minimum character widths of the three row fields.
///
/// Padding only aligns the generated source; it has no effect on the
/// typeset document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnWidths {
    pub command: usize,
    pub description: usize,
    pub unit: usize,
}

impl Default for ColumnWidths {
    fn default() -> Self {
        Self {
            command: 15,
            description: 60,
            unit: 15,
        }
    }
}

impl ColumnWidths {
    /// No padding at all
    pub fn compact() -> Self {
        Self {
            command: 0,
            description: 0,
            unit: 0,
        }
    }
}

/// Static table layout
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableLayout {
    /// Table environment, e.g. `longtable` or `tabular`
    pub environment: String,
    /// LaTeX column specifications for command, description and unit
    pub columns: [String; 3],
    pub widths: ColumnWidths,
    /// Extra space inserted at a group break
    pub group_spacing: String,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            environment: "longtable".to_string(),
            columns: [
                r"p{\cola}".to_string(),
                r"p{\colc}".to_string(),
                r">{\small\raggedleft\arraybackslash\itshape}p{\colb}".to_string(),
            ],
            widths: ColumnWidths::default(),
            group_spacing: "0.5em".to_string(),
        }
    }
}

/// Whether a table separates sort groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// Plain list
    Flat,
    /// Insert spacing where the group key changes
    ByGroupKey,
}

/// Renders records as table lines
#[derive(Debug, Clone, Default)]
pub struct TableFormatter {
    layout: TableLayout,
}

impl TableFormatter {
    pub fn new(layout: TableLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &TableLayout {
        &self.layout
    }

    pub fn begin_line(&self) -> String {
        let [first, second, third] = &self.layout.columns;
        format!(
            "\t\\begin{{{}}}{{{} {} {}}}",
            self.layout.environment, first, second, third
        )
    }

    pub fn end_line(&self) -> String {
        format!("\t\\end{{{}}}", self.layout.environment)
    }

    /// The spacing directive appended to a row's `\\` at a group break
    pub fn spacing_directive(&self) -> String {
        format!("[{}]", self.layout.group_spacing)
    }

    /// `\t\t$<cmd>$\t& <description>\t& <unit>\\` with padded fields
    pub fn format_row(&self, record: &SymbolRecord) -> String {
        let widths = self.layout.widths;
        format!(
            "\t\t${:<cw$}$\t& {:<dw$}\t& {:<uw$}\\\\",
            record.latexcommand,
            record.description,
            record.unit,
            cw = widths.command,
            dw = widths.description,
            uw = widths.unit,
        )
    }

    /// Render the selected records, in input order, as table lines.
    ///
    /// With [`Grouping::ByGroupKey`] the previous row's group key is carried
    /// across rows; when it differs from the current row's key the spacing
    /// directive is appended to the previous row and a blank line follows.
    pub fn render_lines<'r, I, F>(&self, records: I, filter: &F, grouping: Grouping) -> Vec<String>
    where
        I: IntoIterator<Item = &'r SymbolRecord>,
        F: RecordFilter + ?Sized,
    {
        let mut lines = vec![self.begin_line()];
        let mut current_group: Option<&str> = None;

        for record in records.into_iter().filter(|r| filter.accepts(r)) {
            if grouping == Grouping::ByGroupKey {
                let group = record.group_key().unwrap_or("");
                if current_group.is_some_and(|prev| prev != group) {
                    if let Some(previous_row) = lines.last_mut() {
                        previous_row.push_str(&self.spacing_directive());
                    }
                    lines.push(String::new());
                }
                current_group = Some(group);
            }
            lines.push(self.format_row(record));
        }

        lines.push(self.end_line());
        lines
    }

    /// [`Self::render_lines`] joined with newlines, with a trailing newline
    pub fn render<'r, I, F>(&self, records: I, filter: &F, grouping: Grouping) -> String
    where
        I: IntoIterator<Item = &'r SymbolRecord>,
        F: RecordFilter + ?Sized,
    {
        let mut out = self.render_lines(records, filter, grouping).join("\n");
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Selection, SymbolClass};
    use pretty_assertions::assert_eq;

    fn param(cmd: &str, sort: &str) -> SymbolRecord {
        SymbolRecord::new(SymbolClass::Param, cmd, "d").with_sort(sort)
    }

    fn compact() -> TableFormatter {
        TableFormatter::new(TableLayout {
            widths: ColumnWidths::compact(),
            ..Default::default()
        })
    }

    fn is_row(line: &str) -> bool {
        line.starts_with("\t\t$")
    }

    #[test]
    fn test_begin_and_end_lines() {
        let fmt = TableFormatter::default();
        assert_eq!(
            fmt.begin_line(),
            "\t\\begin{longtable}{p{\\cola} p{\\colc} >{\\small\\raggedleft\\arraybackslash\\itshape}p{\\colb}}"
        );
        assert_eq!(fmt.end_line(), "\t\\end{longtable}");
    }

    #[test]
    fn test_row_padding() {
        let fmt = TableFormatter::default();
        let rec = SymbolRecord::new(SymbolClass::Param, r"\c", "cost").with_unit("EUR");
        let row = fmt.format_row(&rec);
        assert_eq!(
            row,
            format!(
                "\t\t${:<15}$\t& {:<60}\t& {:<15}\\\\",
                r"\c", "cost", "EUR"
            )
        );
        assert_eq!(row.len(), 2 + 1 + 15 + 1 + 1 + 2 + 60 + 1 + 2 + 15 + 2);
    }

    #[test]
    fn test_long_fields_are_not_truncated() {
        let fmt = compact();
        let long = "x".repeat(100);
        let rec = SymbolRecord::new(SymbolClass::Set, r"\G", long.clone());
        assert!(fmt.format_row(&rec).contains(&long));
    }

    #[test]
    fn test_set_example_yields_single_row() {
        let records = vec![
            SymbolRecord::new(SymbolClass::Set, r"\G", "generators").with_sort("1_a"),
            SymbolRecord::new(SymbolClass::Param, r"\c", "cost")
                .with_sort("1_b")
                .with_unit("EUR"),
        ];
        let lines = compact().render_lines(
            &records,
            &Selection::class(SymbolClass::Set),
            Grouping::Flat,
        );
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "\t\t$\\G$\t& generators\t& \\\\");
    }

    #[test]
    fn test_flat_tables_never_insert_spacing() {
        let records = vec![param(r"\a", "1_x"), param(r"\b", "2_y")];
        let out = compact().render(&records, &Selection::all(), Grouping::Flat);
        assert!(!out.contains("[0.5em]"));
        assert_eq!(out.lines().filter(|l| l.is_empty()).count(), 0);
    }

    #[test]
    fn test_group_break_only_on_change() {
        let records = vec![
            param(r"\a", "1_x"),
            param(r"\b", "2_x"),
            param(r"\c", "3_y"),
            param(r"\d", "4_x"),
        ];
        let lines = compact().render_lines(&records, &Selection::all(), Grouping::ByGroupKey);
        assert_eq!(
            lines,
            vec![
                compact().begin_line(),
                "\t\t$\\a$\t& d\t& \\\\".to_string(),
                "\t\t$\\b$\t& d\t& \\\\[0.5em]".to_string(),
                String::new(),
                "\t\t$\\c$\t& d\t& \\\\[0.5em]".to_string(),
                String::new(),
                "\t\t$\\d$\t& d\t& \\\\".to_string(),
                compact().end_line(),
            ]
        );
    }

    #[test]
    fn test_group_compares_with_previous_emitted_row() {
        // the Var row sits between two params of group `x` but is filtered out
        let records = vec![
            param(r"\a", "1_x"),
            SymbolRecord::new(SymbolClass::Var, r"\v", "v").with_sort("2_y"),
            param(r"\b", "3_x"),
        ];
        let out = compact().render(
            &records,
            &Selection::class(SymbolClass::Param),
            Grouping::ByGroupKey,
        );
        assert!(!out.contains("[0.5em]"));
    }

    #[test]
    fn test_row_count_matches_selection() {
        let records: Vec<_> = (0..12)
            .map(|i| {
                let class = if i % 3 == 0 {
                    SymbolClass::Var
                } else {
                    SymbolClass::Param
                };
                SymbolRecord::new(class, format!(r"\s{i}"), "d").with_sort(format!("{i:02}_g{}", i / 4))
            })
            .collect();
        let selection = Selection::class(SymbolClass::Param);
        let lines = TableFormatter::default().render_lines(&records, &selection, Grouping::ByGroupKey);
        let expected = records.iter().filter(|r| selection.accepts(r)).count();
        assert_eq!(lines.iter().filter(|l| is_row(l)).count(), expected);
    }

    #[test]
    fn test_rows_keep_input_order() {
        let records = vec![param(r"\z", "9_a"), param(r"\a", "1_a"), param(r"\m", "5_a")];
        let lines = compact().render_lines(&records, &Selection::all(), Grouping::ByGroupKey);
        let rows: Vec<_> = lines.iter().filter(|l| is_row(l)).collect();
        assert!(rows[0].contains(r"\z"));
        assert!(rows[1].contains(r"\a"));
        assert!(rows[2].contains(r"\m"));
    }

    #[test]
    fn test_empty_selection_renders_empty_table() {
        let records = vec![param(r"\a", "1_x")];
        let lines = compact().render_lines(
            &records,
            &Selection::class(SymbolClass::Dual),
            Grouping::ByGroupKey,
        );
        assert_eq!(lines, vec![compact().begin_line(), compact().end_line()]);
    }

    #[test]
    fn test_render_is_deterministic() {
        let records = vec![param(r"\a", "1_x"), param(r"\b", "2_y")];
        let fmt = TableFormatter::default();
        let first = fmt.render(&records, &Selection::all(), Grouping::ByGroupKey);
        let second = fmt.render(&records, &Selection::all(), Grouping::ByGroupKey);
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_environment_and_spacing() {
        let fmt = TableFormatter::new(TableLayout {
            environment: "tabular".to_string(),
            group_spacing: "1ex".to_string(),
            widths: ColumnWidths::compact(),
            ..Default::default()
        });
        let records = vec![param(r"\a", "1_x"), param(r"\b", "2_y")];
        let out = fmt.render(&records, &Selection::all(), Grouping::ByGroupKey);
        assert!(out.starts_with("\t\\begin{tabular}"));
        assert!(out.contains("\\\\[1ex]\n\n"));
        assert!(out.ends_with("\t\\end{tabular}\n"));
    }
}
