//! The normalized, queryable chat record.
//!
//! A [`Record`] is the projection of one reconstructed chat entry: the
//! normalized timestamp and the calendar fields derived from it, the author
//! (or the [`SYSTEM_USER`] sentinel), the message text and the media flag.
//!
//! # Examples
//!
//! ```
//! use chatlens::Record;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap().and_hms_opt(21, 15, 0).unwrap();
//! let record = Record::new("Alice", "Hello").with_timestamp(ts);
//!
//! assert_eq!(record.hour, Some(21));
//! assert_eq!(record.weekday_name(), Some("Monday"));
//! assert!(!record.is_system);
//! ```
//!
//! ## Serialization
//!
//! ```
//! use chatlens::Record;
//!
//! let record = Record::system("Messages are end-to-end encrypted.");
//! let json = serde_json::to_string(&record)?;
//! let parsed: Record = serde_json::from_str(&json)?;
//!
//! assert_eq!(record, parsed);
//! # Ok::<(), serde_json::Error>(())
//! ```

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// Placeholder `user` for entries that have no author (system notices and
/// orphan lines).
pub const SYSTEM_USER: &str = "—system—";

/// A normalized chat record.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `timestamp` | `Option<NaiveDateTime>` | Header time as written, no timezone applied |
/// | `user` | `String` | Author, or the system sentinel; never empty |
/// | `text` | `String` | Message body, may contain `\n` |
/// | `is_system` | `bool` | No author applies |
/// | `date` / `hour` / `weekday` | `Option<_>` | Derived from `timestamp` |
/// | `is_media` | `bool` | Text contains a media marker |
/// | `attachment` | `Option<String>` | Filename from an `<attached: …>` line |
///
/// `date`, `hour` and `weekday` are present exactly when `timestamp` is.
/// Use [`with_timestamp`](Self::with_timestamp) rather than assigning the
/// fields individually to keep them consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// When the message was sent, as literally written in the export.
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,

    /// Author name, or the sentinel for unattributed records.
    pub user: String,

    /// Message body.
    pub text: String,

    /// `true` when no author applies.
    pub is_system: bool,

    /// Calendar date of `timestamp`.
    #[serde(default)]
    pub date: Option<NaiveDate>,

    /// Hour of day (0-23) of `timestamp`.
    #[serde(default)]
    pub hour: Option<u32>,

    /// Day of the week of `timestamp`, serialized by full English name.
    #[serde(default, with = "weekday_name")]
    pub weekday: Option<Weekday>,

    /// `true` when `text` contains a media placeholder.
    pub is_media: bool,

    /// Attached filename, when the entry was an attachment line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
}

impl Record {
    /// Creates a user-authored record with no timestamp.
    pub fn new(user: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            timestamp: None,
            user: user.into(),
            text: text.into(),
            is_system: false,
            date: None,
            hour: None,
            weekday: None,
            is_media: false,
            attachment: None,
        }
    }

    /// Creates a system record attributed to [`SYSTEM_USER`].
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            is_system: true,
            ..Self::new(SYSTEM_USER, text)
        }
    }

    /// Sets the timestamp together with its derived calendar fields.
    #[must_use]
    pub fn with_timestamp(mut self, ts: NaiveDateTime) -> Self {
        self.set_timestamp(Some(ts));
        self
    }

    /// Sets the media flag.
    #[must_use]
    pub fn with_media(mut self, is_media: bool) -> Self {
        self.is_media = is_media;
        self
    }

    /// Sets the attachment filename.
    #[must_use]
    pub fn with_attachment(mut self, filename: impl Into<String>) -> Self {
        self.attachment = Some(filename.into());
        self
    }

    /// Replaces the timestamp, recomputing or clearing the derived fields.
    pub fn set_timestamp(&mut self, ts: Option<NaiveDateTime>) {
        self.timestamp = ts;
        self.date = ts.map(|t| t.date());
        self.hour = ts.map(|t| t.hour());
        self.weekday = ts.map(|t| t.weekday());
    }

    /// Returns the weekday as a full English name (`"Monday"`, ...).
    pub fn weekday_name(&self) -> Option<&'static str> {
        self.weekday.map(weekday_name::full_name)
    }

    /// Returns `true` if the derived calendar fields agree with `timestamp`.
    pub fn has_consistent_calendar(&self) -> bool {
        match self.timestamp {
            Some(ts) => {
                self.date == Some(ts.date())
                    && self.hour == Some(ts.hour())
                    && self.weekday == Some(ts.weekday())
            }
            None => self.date.is_none() && self.hour.is_none() && self.weekday.is_none(),
        }
    }
}

/// Serde adapter writing `Option<Weekday>` as `"Monday"`..`"Sunday"`.
mod weekday_name {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn full_name(day: Weekday) -> &'static str {
        match day {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }

    pub fn serialize<S: Serializer>(day: &Option<Weekday>, s: S) -> Result<S::Ok, S::Error> {
        match day {
            Some(d) => s.serialize_some(full_name(*d)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Weekday>, D::Error> {
        let name: Option<String> = Option::deserialize(d)?;
        name.map(|n| n.parse::<Weekday>().map_err(serde::de::Error::custom))
            .transpose()
    }
}
