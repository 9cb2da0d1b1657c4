//! # Chatlens
//!
//! A Rust library for turning WhatsApp text exports into structured,
//! queryable records.
//!
//! ## Overview
//!
//! A WhatsApp export is a plain text file where one message may span many
//! lines and the header shape depends on the exporting device and locale.
//! Chatlens:
//!
//! - recognizes iOS and Android header formats, with or without seconds and
//!   12-hour suffixes
//! - reassembles multi-line messages, keeping paragraph breaks
//! - separates user messages, system notices and media placeholders
//! - normalizes timestamps and derives date, hour and weekday
//! - filters by participant, date range, text and system flag
//! - aggregates per-user counts, daily activity and a weekday/hour heatmap
//! - exports to CSV, JSON or JSON Lines
//!
//! Parsing never fails on content: unrecognized lines become continuations,
//! bad timestamps become absent ones. Only I/O and user input can error.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatlens::prelude::*;
//!
//! let export = "\
//! [1/15/25, 10:30:45] Alice: Dinner at 8?
//! [1/15/25, 10:31:02] Bob: Sure
//! bring the board game
//! [1/15/25, 10:32:00] Bob: <attached: 00000012-PHOTO.jpg>";
//!
//! let log = ChatParser::new().parse_str(export);
//! assert_eq!(log.participants(), vec!["Alice", "Bob"]);
//!
//! let bobs = log.filter(&FilterConfig::new().with_participant("Bob"));
//! assert_eq!(bobs.len(), 2);
//! assert_eq!(bobs.records()[0].text, "Sure\nbring the board game");
//! assert!(bobs.records()[1].is_media);
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`ChatParser`](parser::ChatParser) and [`ChatLog`]
//! - [`parsing`] - header matching, timestamp normalization, line accumulation
//! - [`core`] - normalization, filtering, statistics, output writers
//! - [`record`] - the [`Record`] type and [`SYSTEM_USER`] sentinel
//! - [`config`] - [`ParserConfig`](config::ParserConfig)
//! - [`format`] - [`OutputFormat`](format::OutputFormat) dispatch
//! - [`error`] - [`ChatlensError`] and [`Result`]
//! - [`prelude`] - convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod parser;
pub mod parsing;
pub mod record;

pub use error::{ChatlensError, Result};
pub use parser::ChatLog;
pub use record::{Record, SYSTEM_USER};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatlens::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ChatlensError, Result};
    pub use crate::record::{Record, SYSTEM_USER};

    pub use crate::config::{DatePreference, ParserConfig};
    pub use crate::parser::{ChatLog, ChatParser};

    pub use crate::core::filter::{FilterConfig, apply_filters, filter_records};
    pub use crate::core::models::{LogicalEntry, OutputConfig};
    pub use crate::core::stats::{ChatStats, participants};

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};

    pub use crate::format::{OutputFormat, to_format_string, write_to_format};
}
