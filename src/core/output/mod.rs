//! Export writers.
//!
//! Every format projects records onto the same columns:
//!
//! | Column | Value |
//! |--------|-------|
//! | `timestamp` | `YYYY-MM-DD HH:MM:SS`, empty/`null` when absent |
//! | `user` | author or system sentinel |
//! | `text` | message body |
//! | `is_media` | media marker flag |
//!
//! With [`OutputConfig::include_derived`](crate::core::models::OutputConfig)
//! the columns `date`, `hour`, `weekday` and `is_system` follow.
//!
//! - [`write_csv`] / [`to_csv`] - delimited text, requires `csv-output`
//! - [`write_json`] / [`to_json`] - JSON array, requires `json-output`
//! - [`write_jsonl`] / [`to_jsonl`] - one JSON object per line, requires `json-output`
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatlens::Result<()> {
//! use chatlens::core::output::{to_csv, to_jsonl};
//! use chatlens::core::models::OutputConfig;
//! use chatlens::Record;
//!
//! let records = vec![Record::new("Alice", "Hello, \"world\"")];
//!
//! let csv = to_csv(&records, &OutputConfig::new())?;
//! assert!(csv.starts_with("timestamp,user,text,is_media\n"));
//! assert!(csv.contains(r#",Alice,"Hello, ""world""",false"#));
//!
//! let jsonl = to_jsonl(&records, &OutputConfig::new())?;
//! assert_eq!(jsonl.lines().count(), 1);
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};

use chrono::NaiveDateTime;
#[cfg(feature = "json-output")]
use serde::Serialize;

#[cfg(feature = "json-output")]
use crate::core::models::OutputConfig;
#[cfg(feature = "json-output")]
use crate::record::Record;

/// Timestamp layout used by every exporter.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Base columns, in order.
pub const BASE_COLUMNS: [&str; 4] = ["timestamp", "user", "text", "is_media"];

/// Columns appended when derived fields are requested.
pub const DERIVED_COLUMNS: [&str; 4] = ["date", "hour", "weekday", "is_system"];

pub(crate) fn format_timestamp(ts: Option<NaiveDateTime>) -> Option<String> {
    ts.map(|t| t.format(TIMESTAMP_FORMAT).to_string())
}

/// One exported object, shared by the JSON and JSON Lines writers.
#[cfg(feature = "json-output")]
#[derive(Serialize)]
pub(crate) struct ExportRow<'a> {
    timestamp: Option<String>,
    user: &'a str,
    text: &'a str,
    is_media: bool,
    #[serde(flatten)]
    derived: Option<DerivedFields>,
}

#[cfg(feature = "json-output")]
#[derive(Serialize)]
struct DerivedFields {
    date: Option<String>,
    hour: Option<u32>,
    weekday: Option<&'static str>,
    is_system: bool,
}

#[cfg(feature = "json-output")]
impl<'a> ExportRow<'a> {
    pub(crate) fn new(record: &'a Record, config: &OutputConfig) -> Self {
        Self {
            timestamp: format_timestamp(record.timestamp),
            user: &record.user,
            text: &record.text,
            is_media: record.is_media,
            derived: config.include_derived.then(|| DerivedFields {
                date: record.date.map(|d| d.format("%Y-%m-%d").to_string()),
                hour: record.hour,
                weekday: record.weekday_name(),
                is_system: record.is_system,
            }),
        }
    }
}
