//! Line accumulation: physical lines in, logical entries out.
//!
//! Messages can span several physical lines, and nothing about a
//! continuation line says which message it belongs to. The accumulator
//! walks the lines left to right holding at most one open entry:
//!
//! - a blank line appends `\n` to the open entry (or is dropped)
//! - a header line seals the open entry and opens a new one
//! - any other line is appended to the open entry, or opens an orphan
//!   system entry when nothing is open yet
//!
//! Headers are recognized on the [cleaned](clean_line) line, but body lines
//! are kept as written apart from a BOM, line endings and surrounding
//! spaces. Tabs and directional marks inside a message survive.
//!
//! A body line that happens to look exactly like a header will start a new
//! entry. There is no lookahead to tell the two apart.

use tracing::{debug, trace};

use crate::core::models::LogicalEntry;

use super::header::{clean_line, match_header};

/// Single-pass state machine holding the currently open entry.
///
/// # Example
///
/// ```rust
/// use chatlens::parsing::Accumulator;
///
/// let mut acc = Accumulator::new();
/// assert!(acc.push_line("[1/1/25, 10:00:00] Alice: hello").is_none());
/// assert!(acc.push_line("world").is_none());
///
/// let sealed = acc.push_line("[1/1/25, 10:01:00] Bob: hi").unwrap();
/// assert_eq!(sealed.text, "hello\nworld");
///
/// let last = acc.finish().unwrap();
/// assert_eq!(last.text, "hi");
/// ```
#[derive(Debug, Default)]
pub struct Accumulator {
    current: Option<LogicalEntry>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one physical line. Returns the previously open entry when this
    /// line seals it.
    pub fn push_line(&mut self, raw: &str) -> Option<LogicalEntry> {
        let line = body_line(raw);

        if line.is_empty() {
            if let Some(entry) = self.current.as_mut() {
                entry.push_blank();
            }
            return None;
        }

        if let Some(header) = match_header(clean_line(line)) {
            trace!(kind = %header.kind, "header");
            return self.current.replace(header.into_entry());
        }

        match self.current.as_mut() {
            Some(entry) => {
                trace!("continuation");
                entry.push_line(line);
            }
            None => {
                debug!(line, "orphan line before first header");
                self.current = Some(LogicalEntry::orphan(line));
            }
        }
        None
    }

    /// Returns `true` while an entry is open.
    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Seals and returns the open entry, if any.
    pub fn finish(self) -> Option<LogicalEntry> {
        self.current
    }
}

/// Trims what export tooling adds around a line, nothing more.
fn body_line(raw: &str) -> &str {
    raw.trim_matches(['\u{feff}', '\n', '\r', ' '])
}

/// Reassembles a whole export into logical entries.
///
/// # Example
///
/// ```rust
/// use chatlens::parsing::accumulate;
///
/// let entries = accumulate("[1/1/25, 10:00:00] Alice: hello\n\nworld");
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].text, "hello\n\nworld");
/// ```
pub fn accumulate(text: &str) -> Vec<LogicalEntry> {
    Entries::new(text.lines()).collect()
}

/// Lazy iterator adapter over any source of lines.
///
/// Yields each entry as soon as the next header (or the end of input)
/// seals it, so memory use is bounded by the longest single message.
#[derive(Debug)]
pub struct Entries<I> {
    lines: I,
    acc: Option<Accumulator>,
}

impl<I> Entries<I> {
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            acc: Some(Accumulator::new()),
        }
    }
}

impl<I, S> Iterator for Entries<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = LogicalEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let acc = self.acc.as_mut()?;
        for line in self.lines.by_ref() {
            if let Some(sealed) = acc.push_line(line.as_ref()) {
                return Some(sealed);
            }
        }
        self.acc.take().and_then(Accumulator::finish)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(accumulate("").is_empty());
        assert!(accumulate("\n\n  \n").is_empty());
    }

    #[test]
    fn test_continuation_merging() {
        let entries = accumulate("[1/1/25, 10:00:00] Alice: hello\nworld");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "hello\nworld");
        assert_eq!(entries[0].author.as_deref(), Some("Alice"));
    }

    #[test]
    fn test_blank_line_preserved() {
        let entries = accumulate("[1/1/25, 10:00:00] Alice: hello\n\nworld");
        assert_eq!(entries[0].text, "hello\n\nworld");
    }

    #[test]
    fn test_trailing_blank_lines_kept() {
        let entries = accumulate("[1/1/25, 10:00:00] Alice: hello\n\n");
        assert_eq!(entries[0].text, "hello\n");
    }

    #[test]
    fn test_orphan_then_header() {
        let entries = accumulate("random preamble line\n[1/1/25, 10:00:00] Alice: hi");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].raw_timestamp, "");
        assert!(entries[0].is_system);
        assert_eq!(entries[0].text, "random preamble line");
        assert_eq!(entries[1].text, "hi");
    }

    #[test]
    fn test_orphan_absorbs_following_lines() {
        let entries = accumulate("line one\nline two");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "line one\nline two");
    }

    #[test]
    fn test_empty_body_header_continuation_has_no_leading_newline() {
        let entries = accumulate("[1/1/25, 10:00:00] Alice:\nsecond line");
        assert_eq!(entries[0].text, "second line");
    }

    #[test]
    fn test_system_line_seals_previous() {
        let input = "01.01.2024, 12:34 - Alice: hi\n01.01.2024, 12:35 - Bob left";
        let entries = accumulate(input);
        assert_eq!(entries.len(), 2);
        assert!(!entries[0].is_system);
        assert!(entries[1].is_system);
        assert_eq!(entries[1].text, "Bob left");
    }

    #[test]
    fn test_crlf_and_zero_width_marks() {
        let input = "\u{feff}[1/1/25, 10:00:00] Alice: hi\r\n\u{200e}more\r\n";
        let entries = accumulate(input);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "hi\n\u{200e}more");
    }

    #[test]
    fn test_tab_indented_continuation_kept() {
        let entries = accumulate("[1/1/25, 10:00:00] Alice: code\n\tindented\n  spaced ");
        assert_eq!(entries[0].text, "code\n\tindented\nspaced");
    }

    #[test]
    fn test_mark_only_line_is_not_blank() {
        let entries = accumulate("[1/1/25, 10:00:00] Alice: a\n\u{200f}\nb");
        assert_eq!(entries[0].text, "a\n\u{200f}\nb");
    }

    #[test]
    fn test_header_behind_marks_still_recognized() {
        let entries = accumulate("[1/1/25, 10:00:00] Alice: a\n\u{200e}[1/1/25, 10:01:00] Bob: b");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].author.as_deref(), Some("Bob"));
    }

    #[test]
    fn test_entries_iterator_is_lazy() {
        let lines = vec![
            "[1/1/25, 10:00:00] Alice: one",
            "[1/1/25, 10:01:00] Bob: two",
            "[1/1/25, 10:02:00] Carol: three",
        ];
        let mut iter = Entries::new(lines.into_iter());
        assert_eq!(iter.next().unwrap().text, "one");
        assert_eq!(iter.next().unwrap().text, "two");
        assert_eq!(iter.next().unwrap().text, "three");
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_accumulator_finish_empty() {
        let acc = Accumulator::new();
        assert!(!acc.is_open());
        assert!(acc.finish().is_none());
    }
}
