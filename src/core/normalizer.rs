//! Logical entries to normalized [`Record`]s.

use crate::config::ParserConfig;
use crate::core::models::LogicalEntry;
use crate::parsing::timestamp::normalize_timestamp_with;
use crate::record::Record;

/// Converts one entry into a record.
///
/// The timestamp is normalized with the configured date preference, and the
/// calendar fields follow from it. Entries without an author get the
/// configured sentinel as `user`. The media flag is a plain substring check
/// against the configured markers, independent of how the header was
/// classified.
///
/// # Example
///
/// ```rust
/// use chatlens::config::ParserConfig;
/// use chatlens::core::models::LogicalEntry;
/// use chatlens::core::normalizer::normalize_entry;
///
/// let entry = LogicalEntry::message("1/1/25, 10:00:00", "Bob", "<attached: photo.jpg>")
///     .with_attachment("photo.jpg");
/// let record = normalize_entry(entry, &ParserConfig::default());
///
/// assert!(record.is_media);
/// assert_eq!(record.hour, Some(10));
/// assert_eq!(record.attachment.as_deref(), Some("photo.jpg"));
/// ```
pub fn normalize_entry(entry: LogicalEntry, config: &ParserConfig) -> Record {
    let timestamp = normalize_timestamp_with(&entry.raw_timestamp, config.date_preference);

    let user = entry
        .author
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map_or_else(|| config.system_user.clone(), str::to_string);

    let mut record = Record {
        is_media: config.is_media(&entry.text),
        is_system: entry.is_system,
        attachment: entry.attachment,
        ..Record::new(user, entry.text)
    };
    record.set_timestamp(timestamp);
    record
}

/// Converts every entry, keeping order.
pub fn normalize_entries(entries: Vec<LogicalEntry>, config: &ParserConfig) -> Vec<Record> {
    entries
        .into_iter()
        .map(|e| normalize_entry(e, config))
        .collect()
}
