//! Filter records by participant, date range, text and system flag.
//!
//! This module provides [`FilterConfig`] for defining filter criteria and
//! [`apply_filters`] / [`filter_records`] for applying them.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Participants | [`with_participant`](FilterConfig::with_participant) | Records whose `user` is in the set |
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Records on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Records on or before date |
//! | Query | [`with_query`](FilterConfig::with_query) | Case-insensitive literal text match |
//! | System | [`with_include_system`](FilterConfig::with_include_system) | Keep or drop system records |
//!
//! # Examples
//!
//! ```
//! use chatlens::core::filter::{FilterConfig, apply_filters};
//! use chatlens::Record;
//!
//! let records = vec![
//!     Record::new("Alice", "Foo fighters tonight?"),
//!     Record::new("Bob", "foo!"),
//!     Record::new("Alice", "bar"),
//! ];
//!
//! let config = FilterConfig::new().with_participant("Alice").with_query("FOO");
//! let filtered = apply_filters(records, &config);
//!
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].text, "Foo fighters tonight?");
//! ```
//!
//! # Behavior Notes
//!
//! - Every filter is optional; an empty participant set or empty query is a no-op
//! - Records without timestamps are **excluded** when a date filter is active
//! - The query is matched literally: `.` and `*` are not wildcards
//! - Filters combine with AND logic and keep the original order

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::ChatlensError;
use crate::record::Record;

/// Configuration for filtering records.
///
/// # Examples
///
/// ```
/// use chatlens::core::filter::FilterConfig;
///
/// # fn main() -> chatlens::Result<()> {
/// let config = FilterConfig::new()
///     .with_participants(["Alice", "Bob"])
///     .with_date_from("2024-01-01")?
///     .with_date_to("2024-12-31")?
///     .with_include_system(false);
/// assert!(config.is_active());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Keep only records whose `user` is in this set (empty: everyone).
    pub participants: BTreeSet<String>,

    /// Keep only records at or after this time.
    pub after: Option<NaiveDateTime>,

    /// Keep only records at or before this time.
    pub before: Option<NaiveDateTime>,

    /// Keep only records whose text contains this string, ignoring case.
    pub query: Option<String>,

    /// `Some(false)` drops system records; `None` and `Some(true)` keep them.
    pub include_system: Option<bool>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration; every record passes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one participant to the allowed set.
    #[must_use]
    pub fn with_participant(mut self, user: impl Into<String>) -> Self {
        self.participants.insert(user.into());
        self
    }

    /// Adds several participants to the allowed set.
    #[must_use]
    pub fn with_participants<I, S>(mut self, users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.participants.extend(users.into_iter().map(Into::into));
        self
    }

    /// Sets the start date filter (inclusive, from midnight).
    ///
    /// Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self, ChatlensError> {
        self.after = Some(parse_date(date_str)?.and_time(NaiveTime::MIN));
        Ok(self)
    }

    /// Sets the end date filter (inclusive, through the end of the day).
    ///
    /// Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self, ChatlensError> {
        self.before = Some(end_of_day(parse_date(date_str)?));
        Ok(self)
    }

    /// Sets an inclusive date range from calendar dates.
    #[must_use]
    pub fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.after = Some(start.and_time(NaiveTime::MIN));
        self.before = Some(end_of_day(end));
        self
    }

    /// Sets the start timestamp directly.
    #[must_use]
    pub fn with_after(mut self, dt: NaiveDateTime) -> Self {
        self.after = Some(dt);
        self
    }

    /// Sets the end timestamp directly.
    #[must_use]
    pub fn with_before(mut self, dt: NaiveDateTime) -> Self {
        self.before = Some(dt);
        self
    }

    /// Sets the text query. An empty string clears it.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.query = (!query.is_empty()).then_some(query);
        self
    }

    /// Keeps (`true`) or drops (`false`) system records.
    #[must_use]
    pub fn with_include_system(mut self, include: bool) -> Self {
        self.include_system = Some(include);
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        !self.participants.is_empty()
            || self.has_date_filter()
            || self.query.as_deref().is_some_and(|q| !q.is_empty())
            || self.include_system == Some(false)
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns `true` if `record` passes every active filter.
    ///
    /// Compiles the query on each call; prefer [`apply_filters`] or
    /// [`filter_records`] for whole collections.
    pub fn matches(&self, record: &Record) -> bool {
        Predicate::new(self).matches(record)
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate, ChatlensError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| ChatlensError::invalid_date(date_str))
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + chrono::Duration::seconds(86_399)
}

/// A [`FilterConfig`] with its query compiled once.
struct Predicate<'a> {
    config: &'a FilterConfig,
    query: Option<Query>,
}

enum Query {
    Regex(Regex),
    Lowercase(String),
}

impl<'a> Predicate<'a> {
    fn new(config: &'a FilterConfig) -> Self {
        let query = config.query.as_deref().filter(|q| !q.is_empty()).map(|q| {
            RegexBuilder::new(&regex::escape(q))
                .case_insensitive(true)
                .build()
                .map_or_else(|_| Query::Lowercase(q.to_lowercase()), Query::Regex)
        });
        Self { config, query }
    }

    fn matches(&self, record: &Record) -> bool {
        let config = self.config;

        if config.include_system == Some(false) && record.is_system {
            return false;
        }

        if !config.participants.is_empty() && !config.participants.contains(&record.user) {
            return false;
        }

        if config.has_date_filter() {
            let Some(ts) = record.timestamp else {
                return false;
            };
            if config.after.is_some_and(|after| ts < after) {
                return false;
            }
            if config.before.is_some_and(|before| ts > before) {
                return false;
            }
        }

        match &self.query {
            Some(Query::Regex(re)) => re.is_match(&record.text),
            Some(Query::Lowercase(q)) => record.text.to_lowercase().contains(q.as_str()),
            None => true,
        }
    }
}

/// Filters records, consuming the input.
///
/// Returns the records that match all active filters, in their original
/// order. With no active filters the input is returned unchanged.
pub fn apply_filters(records: Vec<Record>, config: &FilterConfig) -> Vec<Record> {
    if !config.is_active() {
        return records;
    }

    let predicate = Predicate::new(config);
    records.into_iter().filter(|r| predicate.matches(r)).collect()
}

/// Filters records by reference, returning a view in original order.
pub fn filter_records<'r>(records: &'r [Record], config: &FilterConfig) -> Vec<&'r Record> {
    let predicate = Predicate::new(config);
    records.iter().filter(|r| predicate.matches(r)).collect()
}
