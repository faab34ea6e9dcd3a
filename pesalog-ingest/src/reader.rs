//! CSV decoding: one exported statement file → raw rows keyed by header.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

use crate::types::RawRow;

/// Read an exported CSV statement into raw rows.
///
/// The first record is taken as the header; each later record becomes a
/// label → value map. Ragged rows are tolerated (`flexible`): missing
/// trailing cells simply resolve as absent fields downstream.
pub fn read_csv_file(path: impl AsRef<Path>) -> Result<Vec<RawRow>> {
    let file = std::fs::File::open(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;
    read_csv_rows(file)
}

/// Same as [`read_csv_file`] for any reader (uploads, tests).
pub fn read_csv_rows(input: impl Read) -> Result<Vec<RawRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(input);

    let headers = rdr.headers().context("reading CSV header")?.clone();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.context("reading CSV record")?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(label, value)| (label.trim().to_string(), value.to_string()))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}
