//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::core::models::OutputConfig;
use crate::error::ChatlensError;
use crate::record::Record;

use super::{BASE_COLUMNS, DERIVED_COLUMNS, format_timestamp};

/// Writes records as delimited text.
///
/// # Format
/// - Delimiter: `OutputConfig::delimiter` (default `,`)
/// - Columns: `timestamp`, `user`, `text`, `is_media`
///   - With derived fields: `date`, `hour`, `weekday`, `is_system` appended
/// - Quoting: only where needed; embedded quotes are doubled
/// - Encoding: UTF-8
pub fn write_csv(
    records: &[Record],
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<(), ChatlensError> {
    let file = File::create(output_path)?;
    write_to(file, records, config)
}

/// Converts records to a CSV string.
///
/// Same format as [`write_csv`], but returns a `String`.
pub fn to_csv(records: &[Record], config: &OutputConfig) -> Result<String, ChatlensError> {
    let mut buf = Vec::new();
    write_to(&mut buf, records, config)?;
    String::from_utf8(buf).map_err(|e| ChatlensError::invalid_format("csv", e.to_string()))
}

fn write_to<W: Write>(
    sink: W,
    records: &[Record],
    config: &OutputConfig,
) -> Result<(), ChatlensError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .from_writer(sink);

    writer.write_record(build_header(config))?;
    for record in records {
        writer.write_record(build_row(record, config))?;
    }

    writer.flush()?;
    Ok(())
}

fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = BASE_COLUMNS.to_vec();
    if config.include_derived {
        header.extend(DERIVED_COLUMNS);
    }
    header
}

fn build_row(record: &Record, config: &OutputConfig) -> Vec<String> {
    let mut row = vec![
        format_timestamp(record.timestamp).unwrap_or_default(),
        record.user.clone(),
        record.text.clone(),
        record.is_media.to_string(),
    ];

    if config.include_derived {
        row.push(record.date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default());
        row.push(record.hour.map(|h| h.to_string()).unwrap_or_default());
        row.push(record.weekday_name().unwrap_or_default().to_string());
        row.push(record.is_system.to_string());
    }

    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::NamedTempFile;

    fn ts_record() -> Record {
        let ts = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        Record::new("Alice", "Hello").with_timestamp(ts)
    }

    #[test]
    fn test_write_csv_basic() {
        let records = vec![ts_record(), Record::new("Bob", "Hi there")];

        let temp_file = NamedTempFile::new().unwrap();
        write_csv(&records, temp_file.path(), &OutputConfig::new()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("timestamp,user,text,is_media"));
        assert_eq!(lines.next(), Some("2024-06-15 12:30:00,Alice,Hello,false"));
        assert_eq!(lines.next(), Some(",Bob,Hi there,false"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_multiline_text_is_quoted() {
        let records = vec![Record::new("Alice", "line one\nline two")];
        let csv = to_csv(&records, &OutputConfig::new()).unwrap();
        assert!(csv.contains("\"line one\nline two\""));
    }

    #[test]
    fn test_derived_columns() {
        let csv = to_csv(&[ts_record()], &OutputConfig::new().with_derived()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("timestamp,user,text,is_media,date,hour,weekday,is_system")
        );
        assert_eq!(
            lines.next(),
            Some("2024-06-15 12:30:00,Alice,Hello,false,2024-06-15,12,Saturday,false")
        );
    }

    #[test]
    fn test_custom_delimiter() {
        let csv = to_csv(&[Record::new("A", "x;y")], &OutputConfig::new().with_delimiter(b';'))
            .unwrap();
        assert!(csv.starts_with("timestamp;user;text;is_media"));
        assert!(csv.contains(";A;\"x;y\";false"));
    }

    #[test]
    fn test_empty_records_header_only() {
        let csv = to_csv(&[], &OutputConfig::new()).unwrap();
        assert_eq!(csv, "timestamp,user,text,is_media\n");
    }
}
