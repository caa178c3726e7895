//! Spreadsheet export of a result table
//!
//! CSV with the fixed column header and one row per listing; no index column.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::{RESULT_COLUMNS, ResultTable};

/// Write `table` as CSV to any writer
///
/// Headers come from the serde names on `ResultRow`; an empty table still
/// gets the header line.
pub fn write_csv<W: Write>(table: &ResultTable, writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);

    if table.rows.is_empty() {
        csv_writer.write_record(RESULT_COLUMNS)?;
    }
    for row in &table.rows {
        csv_writer.serialize(row)?;
    }

    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Write `table` as CSV to `path`, replacing any existing file
pub fn write_csv_file(table: &ResultTable, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    write_csv(table, file)?;
    tracing::info!("Exported {} rows to {}", table.rows.len(), path.display());
    Ok(())
}
