//! Command-line argument definition using clap.
//!
//! [`Args`] maps flags onto the library's [`ParserConfig`], [`FilterConfig`]
//! and [`OutputConfig`] so the binary stays a thin wrapper.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{DatePreference, ParserConfig};
use crate::core::filter::FilterConfig;
use crate::core::models::OutputConfig;
use crate::error::ChatlensError;
use crate::format::OutputFormat;

/// Default output path; its extension follows `--format`.
pub const DEFAULT_OUTPUT: &str = "chat_export.csv";

/// Parse WhatsApp chat exports into filterable, analyzable records.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatlens")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatlens _chat.txt
    chatlens _chat.txt -o alice.json --from Alice --after 2024-01-01
    chatlens _chat.txt -f jsonl --derived --include-system
    chatlens _chat.txt -q \"dinner\" --stats
    chatlens _chat.txt --day-first --config markers.json -vv")]
pub struct Args {
    /// Path to the exported chat (.txt)
    pub input: PathBuf,

    /// Path to output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Keep only messages from this participant (repeatable)
    #[arg(long = "from", value_name = "USER")]
    pub participants: Vec<String>,

    /// Keep messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Keep messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Keep messages containing this text (case-insensitive, literal)
    #[arg(short, long, value_name = "TEXT")]
    pub query: Option<String>,

    /// Keep system messages (joins, leaves, encryption notices)
    #[arg(long)]
    pub include_system: bool,

    /// Read ambiguous dates such as 3/4/25 as day/month
    #[arg(long)]
    pub day_first: bool,

    /// JSON parser configuration (media markers, system user, date order)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Add date, hour, weekday and is_system columns
    #[arg(long)]
    pub derived: bool,

    /// Print per-user and activity statistics
    #[arg(long)]
    pub stats: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Builds the parser configuration, seeding it from `--config` if given.
    pub fn parser_config(&self) -> Result<ParserConfig, ChatlensError> {
        let config = match &self.config {
            Some(path) => ParserConfig::from_json_file(path)?,
            None => ParserConfig::default(),
        };
        Ok(if self.day_first {
            config.with_date_preference(DatePreference::DayFirst)
        } else {
            config
        })
    }

    /// Builds the filter configuration. System records are dropped unless
    /// `--include-system` is set.
    pub fn filter_config(&self) -> Result<FilterConfig, ChatlensError> {
        let mut filter = FilterConfig::new()
            .with_participants(self.participants.iter().cloned())
            .with_include_system(self.include_system);

        if let Some(after) = &self.after {
            filter = filter.with_date_from(after)?;
        }
        if let Some(before) = &self.before {
            filter = filter.with_date_to(before)?;
        }
        if let Some(query) = &self.query {
            filter = filter.with_query(query.clone());
        }
        Ok(filter)
    }

    pub fn output_config(&self) -> OutputConfig {
        let config = OutputConfig::new();
        if self.derived { config.with_derived() } else { config }
    }

    /// The output path, with the extension adjusted to `--format` when the
    /// default path is in use.
    pub fn output_path(&self) -> PathBuf {
        if self.output.as_os_str() != DEFAULT_OUTPUT {
            return self.output.clone();
        }
        self.output.with_extension(self.format.extension())
    }

    /// Default log filter for the `-v` count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("chatlens").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["chat.txt"]);
        assert_eq!(args.input, PathBuf::from("chat.txt"));
        assert_eq!(args.format, OutputFormat::Csv);
        assert_eq!(args.output_path(), PathBuf::from("chat_export.csv"));
        assert_eq!(args.log_level(), "warn");

        let filter = args.filter_config().unwrap();
        assert_eq!(filter.include_system, Some(false));
        assert!(filter.participants.is_empty());
    }

    #[test]
    fn test_output_extension_follows_format() {
        let args = parse(&["chat.txt", "-f", "jsonl"]);
        assert_eq!(args.output_path(), PathBuf::from("chat_export.jsonl"));

        let args = parse(&["chat.txt", "-f", "json", "-o", "mine.out"]);
        assert_eq!(args.output_path(), PathBuf::from("mine.out"));
    }

    #[test]
    fn test_ndjson_alias() {
        assert_eq!(parse(&["c.txt", "-f", "ndjson"]).format, OutputFormat::Jsonl);
    }

    #[test]
    fn test_filters_from_flags() {
        let args = parse(&[
            "chat.txt", "--from", "Alice", "--from", "Bob", "--after", "2024-01-01", "-q", "foo",
            "--include-system",
        ]);
        let filter = args.filter_config().unwrap();
        assert_eq!(filter.participants.len(), 2);
        assert!(filter.after.is_some());
        assert_eq!(filter.query.as_deref(), Some("foo"));
        assert_eq!(filter.include_system, Some(true));
    }

    #[test]
    fn test_bad_date_rejected() {
        let args = parse(&["chat.txt", "--before", "yesterday"]);
        assert!(args.filter_config().unwrap_err().is_invalid_date());
    }

    #[test]
    fn test_day_first_and_verbosity() {
        let args = parse(&["chat.txt", "--day-first", "-vv", "--derived"]);
        assert_eq!(args.parser_config().unwrap().date_preference, DatePreference::DayFirst);
        assert_eq!(args.log_level(), "trace");
        assert!(args.output_config().include_derived);
    }
}
