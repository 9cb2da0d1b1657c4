//! Line-level parsing: header recognition, timestamp normalization and
//! reassembly of multi-line messages.
//!
//! - [`header`] - ordered header recognizers and line cleanup
//! - [`timestamp`] - raw header timestamps to [`NaiveDateTime`](chrono::NaiveDateTime)
//! - [`accumulator`] - physical lines to [`LogicalEntry`](crate::core::models::LogicalEntry) values

pub mod accumulator;
pub mod header;
pub mod timestamp;

pub use accumulator::{Accumulator, Entries, accumulate};
pub use header::{HeaderKind, HeaderMatch, attachment_filename, clean_line, match_header};
pub use timestamp::{normalize_timestamp, normalize_timestamp_with};
