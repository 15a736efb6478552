//! CSV input

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use super::RawTable;
use crate::utils::error::{NomenclatureError, NomenclatureResult};

/// Read a CSV file whose first record is the header row
pub fn read_csv_path(path: impl AsRef<Path>) -> NomenclatureResult<RawTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| NomenclatureError::io(path, e))?;
    let table = read_csv(file)?;
    debug!(path = %path.display(), rows = table.len(), "loaded csv");
    Ok(table)
}

/// Read CSV from any reader. Short rows are padded with empty cells.
pub fn read_csv<R: Read>(reader: R) -> NomenclatureResult<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(NomenclatureError::EmptyTable);
    }

    let mut table = RawTable::new(headers);
    let width = table.headers.len();
    for record in reader.records() {
        let record = record?;
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(width.max(row.len()), String::new());
        table.push_row(row);
    }

    Ok(table)
}
