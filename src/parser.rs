//! Entry point for parsing WhatsApp text exports.
//!
//! [`ChatParser`] runs the whole pipeline: physical lines are reassembled
//! into entries by the [accumulator](crate::parsing::accumulator), then
//! normalized into [`Record`]s. Parsing content never fails; only reading a
//! file can.
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> chatlens::Result<()> {
//! use chatlens::parser::ChatParser;
//! use chatlens::core::FilterConfig;
//!
//! let parser = ChatParser::new();
//!
//! // Parse the whole export into memory
//! let log = parser.parse("_chat.txt")?.ensure_not_empty(None)?;
//! println!("{} records from {:?}", log.len(), log.participants());
//!
//! // Or stream records one at a time
//! for record in parser.stream("_chat.txt")? {
//!     let record = record?;
//!     println!("{}: {}", record.user, record.text);
//! }
//! # Ok(())
//! # }
//! ```

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::ParserConfig;
use crate::core::filter::{FilterConfig, apply_filters};
use crate::core::models::LogicalEntry;
use crate::core::normalizer::normalize_entry;
use crate::core::stats::{ChatStats, participants};
use crate::error::{ChatlensError, Result};
use crate::parsing::accumulator::{Accumulator, Entries};
use crate::record::Record;

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Parser for WhatsApp chat exports.
///
/// # Example
///
/// ```rust
/// use chatlens::parser::ChatParser;
///
/// let content = "[1/15/25, 10:30:45] Alice: Hello\n\
///                how are you?\n\
///                [1/15/25, 10:31:00] Bob: <attached: 00000012-PHOTO.jpg>";
///
/// let log = ChatParser::new().parse_str(content);
/// assert_eq!(log.len(), 2);
/// assert_eq!(log.records()[0].text, "Hello\nhow are you?");
/// assert!(log.records()[1].is_media);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChatParser {
    config: ParserConfig,
}

impl ChatParser {
    /// Creates a parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the parser configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Reassembles content into logical entries without normalizing them.
    pub fn entries(&self, content: &str) -> Vec<LogicalEntry> {
        Entries::new(content.lines()).collect()
    }

    /// Parses export content held in memory.
    pub fn parse_str(&self, content: &str) -> ChatLog {
        let records: Vec<Record> = Entries::new(content.lines())
            .map(|entry| normalize_entry(entry, &self.config))
            .collect();

        let log = ChatLog::new(records);
        log.log_summary();
        log
    }

    /// Reads and parses an export file.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::Io`] if the file can't be read.
    pub fn parse(&self, path: impl AsRef<Path>) -> Result<ChatLog> {
        let content = fs::read_to_string(path)?;
        Ok(self.parse_str(&content))
    }

    /// Opens an export file for lazy, line-by-line parsing.
    ///
    /// Yields the same records as [`parse`](Self::parse), one at a time.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::Io`] if the file can't be opened. Read errors
    /// during iteration are yielded as `Err` items.
    pub fn stream(&self, path: impl AsRef<Path>) -> Result<RecordStream<BufReader<File>>> {
        let file = File::open(path)?;
        let file_size = file.metadata().map(|m| m.len()).ok();
        let reader = BufReader::with_capacity(READ_BUFFER_SIZE, file);
        Ok(RecordStream::new(reader, self.config.clone()).with_total_bytes(file_size))
    }

    /// Lazy parsing over any buffered reader.
    pub fn stream_reader<R: BufRead>(&self, reader: R) -> RecordStream<R> {
        RecordStream::new(reader, self.config.clone())
    }
}

/// Iterator yielding records from a buffered reader.
pub struct RecordStream<R> {
    reader: R,
    config: ParserConfig,
    acc: Option<Accumulator>,
    line_buffer: String,
    bytes_read: u64,
    total_bytes: Option<u64>,
}

impl<R: BufRead> RecordStream<R> {
    fn new(reader: R, config: ParserConfig) -> Self {
        Self {
            reader,
            config,
            acc: Some(Accumulator::new()),
            line_buffer: String::with_capacity(4096),
            bytes_read: 0,
            total_bytes: None,
        }
    }

    fn with_total_bytes(mut self, total: Option<u64>) -> Self {
        self.total_bytes = total;
        self
    }

    /// Bytes consumed from the reader so far.
    pub fn bytes_processed(&self) -> u64 {
        self.bytes_read
    }

    /// Progress as a percentage (0.0 - 100.0), when the input size is known.
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> Option<f64> {
        match self.total_bytes {
            Some(total) if total > 0 => Some(self.bytes_read as f64 / total as f64 * 100.0),
            _ => None,
        }
    }
}

impl<R: BufRead> Iterator for RecordStream<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let acc = self.acc.as_mut()?;
        loop {
            self.line_buffer.clear();
            match self.reader.read_line(&mut self.line_buffer) {
                Ok(0) => {
                    let last = self.acc.take().and_then(Accumulator::finish)?;
                    return Some(Ok(normalize_entry(last, &self.config)));
                }
                Ok(n) => {
                    self.bytes_read += n as u64;
                    let line = self.line_buffer.trim_end_matches(['\n', '\r']);
                    if let Some(sealed) = acc.push_line(line) {
                        return Some(Ok(normalize_entry(sealed, &self.config)));
                    }
                }
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

/// The parsed record set, in order of appearance.
///
/// An empty log is a normal result, not an error; use
/// [`ensure_not_empty`](Self::ensure_not_empty) to turn it into one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatLog {
    records: Vec<Record>,
}

impl ChatLog {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Sorted unique authors, excluding the system sentinel.
    pub fn participants(&self) -> Vec<String> {
        participants(&self.records)
    }

    pub fn stats(&self) -> ChatStats {
        ChatStats::from_records(&self.records)
    }

    /// Applies filters, consuming the log.
    #[must_use]
    pub fn filter(self, config: &FilterConfig) -> Self {
        Self::new(apply_filters(self.records, config))
    }

    /// Escalates the "nothing parsed" condition to an error.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::EmptyExport`] if the log has no records.
    pub fn ensure_not_empty(self, path: Option<PathBuf>) -> Result<Self> {
        if self.is_empty() {
            warn!(path = ?path, "no messages parsed");
            return Err(ChatlensError::empty_export(path));
        }
        Ok(self)
    }

    fn log_summary(&self) {
        let untimed = self.records.iter().filter(|r| r.timestamp.is_none()).count();
        let system = self.records.iter().filter(|r| r.is_system).count();
        info!(records = self.len(), system, untimed, "parsed export");
    }
}

impl IntoIterator for ChatLog {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a ChatLog {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
