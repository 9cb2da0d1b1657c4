//! Parser configuration.
//!
//! [`ParserConfig`] holds the tables the parser classifies against: the
//! media-placeholder markers, the sentinel used as `user` for unattributed
//! records, and the day/month preference for ambiguous dates. It carries no
//! CLI framework dependencies and can be built in code or loaded from JSON.
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::{DatePreference, ParserConfig};
//! use chatlens::parser::ChatParser;
//!
//! let config = ParserConfig::new()
//!     .with_media_marker("<Fichier omis>")
//!     .with_date_preference(DatePreference::DayFirst);
//!
//! let parser = ChatParser::with_config(config);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ChatlensError;
use crate::record::SYSTEM_USER;

/// Media placeholders emitted by WhatsApp exports in the locales we know of.
///
/// `<attached:` covers the iOS attachment lines regardless of filename.
pub const DEFAULT_MEDIA_MARKERS: &[&str] = &[
    "<Media omitted>",
    "<Медиафайл опущен>",
    "<Arquivo de mídia omitido>",
    "<Archivo omitido>",
    "<attached:",
];

/// Order in which ambiguous numeric dates are interpreted.
///
/// Both orders are always tried; this only picks which one wins when both
/// produce a valid calendar date (e.g. `3/4/25`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePreference {
    /// Try month-before-day first, then day-before-month.
    #[default]
    MonthFirst,
    /// Try day-before-month first, then month-before-day.
    DayFirst,
}

/// Configuration for parsing and classifying a chat export.
///
/// # Example
///
/// ```rust
/// use chatlens::config::ParserConfig;
///
/// let config = ParserConfig::from_json_str(r#"{"system_user": "(system)"}"#)?;
/// assert_eq!(config.system_user, "(system)");
/// // Unspecified fields keep their defaults
/// assert!(config.is_media("<Media omitted>"));
/// # Ok::<(), chatlens::ChatlensError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Substrings that mark a message as media (default: [`DEFAULT_MEDIA_MARKERS`])
    pub media_markers: Vec<String>,

    /// Value used for `user` when an entry has no author (default: [`SYSTEM_USER`])
    pub system_user: String,

    /// Which interpretation wins for ambiguous dates (default: month first)
    pub date_preference: DatePreference,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            media_markers: DEFAULT_MEDIA_MARKERS
                .iter()
                .map(|m| (*m).to_string())
                .collect(),
            system_user: SYSTEM_USER.to_string(),
            date_preference: DatePreference::default(),
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration from a JSON file.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ChatlensError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        Self::parse_json(&content)
            .map_err(|e| ChatlensError::invalid_config(e, Some(path.to_path_buf())))
    }

    /// Parses a configuration from a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self, ChatlensError> {
        Self::parse_json(content).map_err(|e| ChatlensError::invalid_config(e, None))
    }

    fn parse_json(content: &str) -> Result<Self, String> {
        let config: Self = serde_json::from_str(content).map_err(|e| e.to_string())?;
        if config.system_user.trim().is_empty() {
            return Err("system_user must not be empty".to_string());
        }
        if config.media_markers.iter().any(String::is_empty) {
            return Err("media_markers must not contain empty strings".to_string());
        }
        Ok(config)
    }

    /// Adds a media marker to the existing set.
    #[must_use]
    pub fn with_media_marker(mut self, marker: impl Into<String>) -> Self {
        let marker = marker.into();
        if !marker.is_empty() && !self.media_markers.contains(&marker) {
            self.media_markers.push(marker);
        }
        self
    }

    /// Replaces the whole media marker set.
    #[must_use]
    pub fn with_media_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.media_markers = markers
            .into_iter()
            .map(Into::into)
            .filter(|m: &String| !m.is_empty())
            .collect();
        self
    }

    /// Sets the sentinel used for unattributed records.
    ///
    /// Blank values are ignored so that `user` is never empty.
    #[must_use]
    pub fn with_system_user(mut self, user: impl Into<String>) -> Self {
        let user = user.into();
        if !user.trim().is_empty() {
            self.system_user = user;
        }
        self
    }

    /// Sets the day/month preference for ambiguous dates.
    #[must_use]
    pub fn with_date_preference(mut self, preference: DatePreference) -> Self {
        self.date_preference = preference;
        self
    }

    /// Returns `true` if `text` contains any configured media marker.
    pub fn is_media(&self, text: &str) -> bool {
        self.media_markers.iter().any(|m| text.contains(m.as_str()))
    }
}
