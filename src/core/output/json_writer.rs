//! JSON output writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::models::OutputConfig;
use crate::error::ChatlensError;
use crate::record::Record;

use super::ExportRow;

/// Writes records to a JSON file as a pretty-printed array.
///
/// # Format
/// ```json
/// [
///   {"timestamp": "2024-06-15 12:30:00", "user": "Alice", "text": "Hello", "is_media": false},
///   {"timestamp": null, "user": "—system—", "text": "preamble", "is_media": false}
/// ]
/// ```
pub fn write_json(
    records: &[Record],
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<(), ChatlensError> {
    let rows: Vec<ExportRow<'_>> = records.iter().map(|r| ExportRow::new(r, config)).collect();
    let mut writer = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer_pretty(&mut writer, &rows)?;
    writer.flush()?;
    Ok(())
}

/// Converts records to a JSON array string.
pub fn to_json(records: &[Record], config: &OutputConfig) -> Result<String, ChatlensError> {
    let rows: Vec<ExportRow<'_>> = records.iter().map(|r| ExportRow::new(r, config)).collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}
