//! CSV export of the full display table.

use thiserror::Error;

use crate::report::types::{DisplayRow, COLUMNS};

pub const CSV_FILE_NAME: &str = "data_kripto_realtime.csv";
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("csv buffer flush failed: {0}")]
    Flush(String),
}

/// Header row plus one line per row, in table order. Absent numbers are empty fields.
///
/// The header is written explicitly so an empty table still yields a valid file.
pub fn to_csv(rows: &[DisplayRow]) -> Result<Vec<u8>, ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::with_capacity(64 * (rows.len() + 1)));

    wtr.write_record(COLUMNS)?;
    for row in rows {
        wtr.serialize(row)?;
    }

    wtr.into_inner().map_err(|e| ExportError::Flush(e.to_string()))
}

/// Parse a previously exported file back into rows.
pub fn from_csv(bytes: &[u8]) -> Result<Vec<DisplayRow>, ExportError> {
    let mut rdr = csv::Reader::from_reader(bytes);
    let rows = rdr.deserialize().collect::<Result<Vec<DisplayRow>, _>>()?;
    Ok(rows)
}
