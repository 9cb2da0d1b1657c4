//! Core data models: reconstructed chat entries and output settings.

use serde::{Deserialize, Serialize};

/// One chat event reassembled from one or more physical lines.
///
/// Produced by the [line accumulator](crate::parsing::accumulator) and
/// consumed by the [record normalizer](crate::core::normalizer). `text` holds
/// the header line's body followed by every continuation line, joined with
/// `\n`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LogicalEntry {
    /// Timestamp exactly as written; empty for orphan lines.
    pub raw_timestamp: String,
    /// Sender name; `None` for system entries.
    pub author: Option<String>,
    /// Message body.
    pub text: String,
    /// `true` when no author applies.
    pub is_system: bool,
    /// Filename from an `<attached: …>` header line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
}

impl LogicalEntry {
    /// Creates a user-authored entry.
    pub fn message(
        raw_timestamp: impl Into<String>,
        author: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            raw_timestamp: raw_timestamp.into(),
            author: Some(author.into()),
            text: text.into(),
            is_system: false,
            attachment: None,
        }
    }

    /// Creates a system entry (no author).
    pub fn system(raw_timestamp: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            raw_timestamp: raw_timestamp.into(),
            author: None,
            text: text.into(),
            is_system: true,
            attachment: None,
        }
    }

    /// Creates an entry for a line seen before any header: no timestamp,
    /// no author, treated as a system note.
    pub fn orphan(text: impl Into<String>) -> Self {
        Self::system("", text)
    }

    /// Builder-style method to set the attachment filename.
    #[must_use]
    pub fn with_attachment(mut self, filename: impl Into<String>) -> Self {
        self.attachment = Some(filename.into());
        self
    }

    /// Appends a continuation line, separated by `\n` unless the text is
    /// still empty.
    pub fn push_line(&mut self, line: &str) {
        if !self.text.is_empty() {
            self.text.push('\n');
        }
        self.text.push_str(line);
    }

    /// Appends a bare line break (a blank line inside the message).
    pub fn push_blank(&mut self) {
        self.text.push('\n');
    }
}

/// Configuration for exported output.
///
/// The base projection is always `timestamp, user, text, is_media`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Field delimiter for CSV output (default: `,`)
    pub delimiter: u8,
    /// Also emit `date`, `hour`, `weekday` and `is_system`
    pub include_derived: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            include_derived: false,
        }
    }
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_derived(mut self) -> Self {
        self.include_derived = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_line_no_leading_newline() {
        let mut entry = LogicalEntry::orphan("");
        entry.push_line("first");
        entry.push_line("second");
        assert_eq!(entry.text, "first\nsecond");
    }

    #[test]
    fn test_push_blank_then_line() {
        let mut entry = LogicalEntry::message("1/1/25, 10:00:00", "Alice", "hello");
        entry.push_blank();
        entry.push_line("world");
        assert_eq!(entry.text, "hello\n\nworld");
    }

    #[test]
    fn test_orphan_shape() {
        let entry = LogicalEntry::orphan("preamble");
        assert_eq!(entry.raw_timestamp, "");
        assert!(entry.author.is_none());
        assert!(entry.is_system);
    }

    #[test]
    fn test_output_config_builder() {
        let config = OutputConfig::new().with_delimiter(b';').with_derived();
        assert_eq!(config.delimiter, b';');
        assert!(config.include_derived);
        assert_eq!(OutputConfig::default().delimiter, b',');
    }
}
