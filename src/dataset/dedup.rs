//! In-place deduplication of a brand dataset
//!
//! Duplicates arise when listings shift between pages while the crawl is in
//! flight, so adjacent pages can both return the same listing. Identity is
//! the `link` column.

use crate::{FleetError, Result};
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

/// Removes duplicate rows from a dataset file, keeping first occurrences
///
/// The column schema is read from the file's own header so the operation is
/// schema-preserving regardless of which optional columns are present. Rows
/// keep their original order; for each distinct `link` value only the first
/// row survives. Running this twice on the same file is a no-op.
pub fn dedup_dataset(path: &Path) -> Result<()> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new().delimiter(b'\t').from_reader(file);

    let headers = reader.headers()?.clone();
    let link_index = headers
        .iter()
        .position(|column| column == "link")
        .ok_or_else(|| FleetError::MissingColumn {
            path: path.to_path_buf(),
            column: "link".to_string(),
        })?;

    let mut seen = HashSet::new();
    let mut unique_rows = Vec::new();

    for row in reader.records() {
        let row = row?;
        let link = row.get(link_index).unwrap_or("").to_string();
        if seen.insert(link) {
            unique_rows.push(row);
        }
    }
    drop(reader);

    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new().delimiter(b'\t').from_writer(file);

    writer.write_record(&headers)?;
    for row in &unique_rows {
        writer.write_record(row)?;
    }

    writer.flush()?;
    Ok(())
}
