//! JSON Lines output writer: one object per line, no enclosing array.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::models::OutputConfig;
use crate::error::ChatlensError;
use crate::record::Record;

use super::ExportRow;

/// Writes records to a JSONL file.
pub fn write_jsonl(
    records: &[Record],
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<(), ChatlensError> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(&mut writer, records, config)?;
    writer.flush()?;
    Ok(())
}

/// Converts records to a JSONL string.
pub fn to_jsonl(records: &[Record], config: &OutputConfig) -> Result<String, ChatlensError> {
    let mut buf = Vec::new();
    write_lines(&mut buf, records, config)?;
    String::from_utf8(buf).map_err(|e| ChatlensError::invalid_format("jsonl", e.to_string()))
}

fn write_lines<W: Write>(
    writer: &mut W,
    records: &[Record],
    config: &OutputConfig,
) -> Result<(), ChatlensError> {
    for record in records {
        serde_json::to_writer(&mut *writer, &ExportRow::new(record, config))?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_to_jsonl_one_object_per_line() {
        let records = vec![
            Record::new("Alice", "line one\nline two"),
            Record::new("Bob", "<Media omitted>").with_media(true),
        ];
        let jsonl = to_jsonl(&records, &OutputConfig::new()).unwrap();

        let lines: Vec<&str> = jsonl.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["text"], "line one\nline two");
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["is_media"], true);
    }

    #[test]
    fn test_write_jsonl_file() {
        let temp_file = NamedTempFile::new().unwrap();
        write_jsonl(&[Record::new("A", "x")], temp_file.path(), &OutputConfig::new()).unwrap();
        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.ends_with('\n'));
        assert!(content.contains(r#""user":"A""#));
    }

    #[test]
    fn test_empty_is_empty_string() {
        assert!(to_jsonl(&[], &OutputConfig::new()).unwrap().is_empty());
    }
}
