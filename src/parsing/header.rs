//! Header recognition for WhatsApp text exports.
//!
//! A header line starts a new chat entry. Exports from different platforms
//! and locales shape the header differently, so a line is tried against an
//! ordered list of recognizers, most specific first, and the first match
//! wins:
//!
//! | # | Kind | Examples |
//! |---|------|----------|
//! | 1 | [`BracketedSeconds`](HeaderKind::BracketedSeconds) | `[1/15/25, 10:30:45] Alice: Hi` |
//! | 2 | [`Attachment`](HeaderKind::Attachment) | `[1/15/25, 10:30:45] Alice: <attached: 00001-PHOTO.jpg>` |
//! | 3 | [`Dashed`](HeaderKind::Dashed) | `15.01.2025, 10:30 - Alice: Hi`, `1/15/25, 10:30:45 PM - Alice: Hi` |
//! | 4 | [`Bracketed`](HeaderKind::Bracketed) | `[15.01.2025, 10:30] Alice: Hi`, `[1/15/25, 10:30:45 AM] Alice: Hi` |
//! | 5 | [`Generic`](HeaderKind::Generic) | same shape as 3 |
//! | 6 | [`System`](HeaderKind::System) | `15.01.2025, 10:30 - Alice created group "Trip"`, `15.01.25, 10:30:45 PM - Bob left` |
//!
//! Recognizers 3 to 6 take dot or slash dates, optional seconds and an
//! optional 12-hour suffix (`AM`, `pm`). Recognizers 1 and 2 take only the
//! slash date with seconds and no suffix.
//!
//! Authors are a non-empty, colon-free run of characters; the message body is
//! the rest of the line. Recognizers 1 and 2 share one line shape and are
//! told apart by the body: a well-formed `<attached: …>` body belongs to 2,
//! everything else to 1, so no line matches both. Every other author-bearing
//! recognizer also extracts the filename from an attachment body, so the
//! entry text is the canonical `<attached: filename>` whatever the header
//! shape.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::core::models::LogicalEntry;

/// Invisible marks WhatsApp sprinkles around headers and attachment markers.
pub const ZERO_WIDTH_MARKS: &[char] = &['\u{200e}', '\u{200f}', '\u{200b}', '\u{feff}'];

// Bracketed iOS timestamp with seconds: 1/15/25, 10:30:45
const DT_WITH_SECONDS: &str = r"\d{1,2}/\d{1,2}/\d{2,4},?\s+\d{1,2}:\d{2}:\d{2}";

// Dot or slash date, optional seconds, optional 12-hour suffix: 15.01.2025, 10:30 PM
const DT_FLEXIBLE: &str =
    r"\d{1,2}[./]\d{1,2}[./]\d{2,4},?\s+\d{1,2}:\d{2}(?::\d{2})?(?:\s*[APap][Mm])?";

/// The recognizer variants, in matching order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderKind {
    /// `[D/M/YY, H:MM:SS] Author: message`
    BracketedSeconds,
    /// `[D/M/YY, H:MM:SS] Author: <attached: filename>`
    Attachment,
    /// `D.M.YYYY, H:MM[ AM/PM] - Author: message`
    Dashed,
    /// `[D.M.YYYY, H:MM[ AM/PM]] Author: message`
    Bracketed,
    /// Fallback with the same shape as [`Dashed`](HeaderKind::Dashed).
    Generic,
    /// `D.M.YYYY, H:MM[ AM/PM] - message` (no author)
    System,
}

impl HeaderKind {
    /// All recognizers in the order they are tried.
    pub const ALL: [HeaderKind; 6] = [
        HeaderKind::BracketedSeconds,
        HeaderKind::Attachment,
        HeaderKind::Dashed,
        HeaderKind::Bracketed,
        HeaderKind::Generic,
        HeaderKind::System,
    ];

    /// Returns the line pattern for this recognizer.
    pub fn pattern(self) -> String {
        match self {
            HeaderKind::BracketedSeconds | HeaderKind::Attachment => format!(
                r"^\[(?P<dt>{DT_WITH_SECONDS})\]\s+(?P<author>[^:]+):(?:\s+(?P<body>.*))?$"
            ),
            HeaderKind::Dashed | HeaderKind::Generic => format!(
                r"^(?P<dt>{DT_FLEXIBLE})\s+-\s+(?P<author>[^:]+):(?:\s+(?P<body>.*))?$"
            ),
            HeaderKind::Bracketed => format!(
                r"^\[(?P<dt>{DT_FLEXIBLE})\]\s+(?P<author>[^:]+):(?:\s+(?P<body>.*))?$"
            ),
            HeaderKind::System => format!(r"^(?P<dt>{DT_FLEXIBLE})\s+-\s+(?P<body>.+)$"),
        }
    }

    /// Returns `true` if headers of this kind carry an author.
    pub fn has_author(self) -> bool {
        !matches!(self, HeaderKind::System)
    }

    /// Short identifier used in logs.
    pub fn name(self) -> &'static str {
        match self {
            HeaderKind::BracketedSeconds => "bracketed-seconds",
            HeaderKind::Attachment => "attachment",
            HeaderKind::Dashed => "dashed",
            HeaderKind::Bracketed => "bracketed",
            HeaderKind::Generic => "generic",
            HeaderKind::System => "system",
        }
    }
}

impl std::fmt::Display for HeaderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Fields extracted from a recognized header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderMatch<'a> {
    /// Which recognizer matched.
    pub kind: HeaderKind,
    /// Timestamp as written, without brackets.
    pub raw_timestamp: &'a str,
    /// Trimmed author; `None` for system lines.
    pub author: Option<&'a str>,
    /// Message body as written (rest of the line).
    pub body: &'a str,
    /// Attachment filename when the body is an `<attached: …>` marker.
    pub attachment: Option<&'a str>,
}

impl<'a> HeaderMatch<'a> {
    /// Returns `true` for lines without an author.
    pub fn is_system(&self) -> bool {
        self.author.is_none()
    }

    /// The entry text: the canonical `<attached: filename>` for attachment
    /// lines, the body otherwise.
    pub fn text(&self) -> Cow<'a, str> {
        match self.attachment {
            Some(filename) => Cow::Owned(format!("<attached: {filename}>")),
            None => Cow::Borrowed(self.body),
        }
    }

    /// Opens a new entry from this header.
    pub fn into_entry(self) -> LogicalEntry {
        let text = self.text().into_owned();
        let entry = match self.author {
            Some(author) => LogicalEntry::message(self.raw_timestamp, author, text),
            None => LogicalEntry::system(self.raw_timestamp, text),
        };
        match self.attachment {
            Some(filename) => entry.with_attachment(filename),
            None => entry,
        }
    }
}

/// A compiled recognizer: one kind, one regex.
struct Recognizer {
    kind: HeaderKind,
    regex: Regex,
}

impl Recognizer {
    fn new(kind: HeaderKind) -> Self {
        Self {
            kind,
            regex: Regex::new(&kind.pattern()).expect("valid header regex"),
        }
    }

    fn recognize<'a>(&self, line: &'a str) -> Option<HeaderMatch<'a>> {
        let caps = self.regex.captures(line)?;
        let raw_timestamp = caps.name("dt")?.as_str();
        let body = group(&caps, "body");

        let author = if self.kind.has_author() {
            let author = group(&caps, "author").trim();
            if author.is_empty() {
                return None;
            }
            Some(author)
        } else {
            None
        };

        let attachment = match self.kind {
            HeaderKind::BracketedSeconds => {
                // Well-formed attachment bodies belong to the next recognizer
                if attachment_filename(body).is_some() {
                    return None;
                }
                None
            }
            HeaderKind::Attachment => Some(attachment_filename(body)?),
            HeaderKind::Dashed | HeaderKind::Bracketed | HeaderKind::Generic => {
                attachment_filename(body)
            }
            HeaderKind::System => None,
        };

        Some(HeaderMatch {
            kind: self.kind,
            raw_timestamp,
            author,
            body,
            attachment,
        })
    }
}

fn group<'a>(caps: &Captures<'a>, name: &str) -> &'a str {
    caps.name(name).map_or("", |m| m.as_str())
}

fn recognizers() -> &'static [Recognizer] {
    static RECOGNIZERS: OnceLock<Vec<Recognizer>> = OnceLock::new();
    RECOGNIZERS.get_or_init(|| HeaderKind::ALL.iter().map(|&k| Recognizer::new(k)).collect())
}

fn attachment_re() -> &'static Regex {
    static ATTACHMENT_RE: OnceLock<Regex> = OnceLock::new();
    ATTACHMENT_RE.get_or_init(|| {
        Regex::new(r"^[\u{200e}\u{200f}\u{200b}]*<attached:\s+(?P<filename>[^>]+)>$")
            .expect("valid attachment regex")
    })
}

/// Extracts the filename from an `<attached: filename>` body.
///
/// Returns `None` when the marker is absent or malformed (no filename, no
/// closing `>`, or trailing text after it).
pub fn attachment_filename(body: &str) -> Option<&str> {
    let caps = attachment_re().captures(body)?;
    let filename = caps.name("filename")?.as_str().trim_end();
    (!filename.is_empty()).then_some(filename)
}

/// Strips boundary whitespace and zero-width marks from a physical line.
pub fn clean_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || ZERO_WIDTH_MARKS.contains(&c))
}

/// Tries every recognizer in order and returns the first match.
///
/// `line` should already be [cleaned](clean_line).
///
/// # Example
///
/// ```rust
/// use chatlens::parsing::header::{HeaderKind, match_header};
///
/// let m = match_header("[1/1/25, 10:00:00] Bob: <attached: photo.jpg>").unwrap();
/// assert_eq!(m.kind, HeaderKind::Attachment);
/// assert_eq!(m.attachment, Some("photo.jpg"));
///
/// assert!(match_header("just some text").is_none());
/// ```
pub fn match_header(line: &str) -> Option<HeaderMatch<'_>> {
    recognizers().iter().find_map(|r| r.recognize(line))
}

/// Runs a single recognizer against a line.
pub fn recognize(kind: HeaderKind, line: &str) -> Option<HeaderMatch<'_>> {
    recognizers()
        .iter()
        .find(|r| r.kind == kind)
        .and_then(|r| r.recognize(line))
}
