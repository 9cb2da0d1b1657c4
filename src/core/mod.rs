//! Record-level processing.
//!
//! This module contains:
//! - [`models`] - [`LogicalEntry`](models::LogicalEntry) and [`OutputConfig`]
//! - [`normalizer`] - entries to [`Record`](crate::Record)s
//! - [`filter`] - participant, date, text and system filters
//! - [`stats`] - per-user counts, daily activity and heatmap
//! - [`output`] - format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! use chatlens::core::{FilterConfig, ChatStats, apply_filters};
//! use chatlens::parser::ChatParser;
//!
//! let log = ChatParser::new().parse_str("[1/1/25, 10:00:00] Alice: hello");
//! let stats = ChatStats::from_records(log.records());
//! let visible = apply_filters(log.into_records(), &FilterConfig::new().with_include_system(false));
//! assert_eq!(visible.len(), stats.total_messages);
//! ```

pub mod filter;
pub mod models;
pub mod normalizer;
pub mod output;
pub mod stats;

pub use filter::{FilterConfig, apply_filters, filter_records};
pub use models::{LogicalEntry, OutputConfig};
pub use normalizer::{normalize_entries, normalize_entry};
pub use stats::{ChatStats, participants};

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
