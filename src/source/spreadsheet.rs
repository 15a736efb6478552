//! Spreadsheet input (`.xlsx`, `.xls`, `.ods`, ...) via calamine

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use tracing::debug;

use super::{format_number, RawTable};
use crate::utils::error::{NomenclatureError, NomenclatureResult};

/// Read one worksheet; the first row is the header.
///
/// `sheet` picks a worksheet by name, defaulting to the first one.
pub fn read_spreadsheet_path(
    path: impl AsRef<Path>,
    sheet: Option<&str>,
) -> NomenclatureResult<RawTable> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names().to_owned();

    let sheet_name = match sheet {
        Some(name) => sheet_names
            .iter()
            .find(|s| s.as_str() == name)
            .cloned()
            .ok_or_else(|| NomenclatureError::SheetNotFound(name.to_string()))?,
        None => sheet_names
            .first()
            .cloned()
            .ok_or(NomenclatureError::EmptyTable)?,
    };

    let range = workbook.worksheet_range(&sheet_name)?;
    let mut rows = range.rows();

    let headers: Vec<String> = match rows.next() {
        Some(header) => header.iter().map(cell_to_string).collect(),
        None => return Err(NomenclatureError::EmptyTable),
    };

    let mut table = RawTable::new(headers);
    for row in rows {
        table.push_row(row.iter().map(cell_to_string).collect());
    }

    debug!(
        path = %path.display(),
        sheet = %sheet_name,
        rows = table.len(),
        "loaded worksheet"
    );
    Ok(table)
}

/// Normalise a cell to text; empty cells become empty strings
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => format_number(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Error(_) => String::new(),
        other => other.to_string(),
    }
}
