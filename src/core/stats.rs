//! Aggregates over a record set: per-user counts, activity by day and a
//! weekday/hour heatmap.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use serde::Serialize;

use crate::record::{Record, SYSTEM_USER};

/// Counts per weekday (Monday first) and hour.
pub type Heatmap = [[usize; 24]; 7];

/// Summary numbers for a record set.
///
/// Records without a timestamp count toward `total_messages`, `per_user`,
/// `media_count` and `system_count`, but not toward `daily`, `heatmap`,
/// `days_covered` or the `first`/`last` bounds.
///
/// # Example
///
/// ```rust
/// use chatlens::core::stats::ChatStats;
/// use chatlens::parser::ChatParser;
///
/// let log = ChatParser::new().parse_str(
///     "[1/6/25, 21:15:00] Alice: hi\n[1/6/25, 21:16:00] Bob: <attached: a.jpg>",
/// );
/// let stats = ChatStats::from_records(log.records());
///
/// assert_eq!(stats.total_messages, 2);
/// assert_eq!(stats.media_count, 1);
/// assert_eq!(stats.days_covered, 1);
/// assert_eq!(stats.activity(chrono::Weekday::Mon, 21), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChatStats {
    pub total_messages: usize,
    /// Messages per author, sentinel excluded.
    pub per_user: BTreeMap<String, usize>,
    pub media_count: usize,
    pub system_count: usize,
    /// Distinct calendar dates with at least one message.
    pub days_covered: usize,
    pub daily: BTreeMap<NaiveDate, usize>,
    pub heatmap: Heatmap,
    pub first: Option<NaiveDateTime>,
    pub last: Option<NaiveDateTime>,
}

impl ChatStats {
    /// Computes statistics in one pass.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut stats = Self::default();

        for record in records {
            stats.total_messages += 1;
            if record.is_media {
                stats.media_count += 1;
            }
            if record.is_system {
                stats.system_count += 1;
            }
            if !record.is_system && record.user != SYSTEM_USER {
                *stats.per_user.entry(record.user.clone()).or_default() += 1;
            }

            if let Some(ts) = record.timestamp {
                stats.first = Some(stats.first.map_or(ts, |f| f.min(ts)));
                stats.last = Some(stats.last.map_or(ts, |l| l.max(ts)));
            }
            if let Some(date) = record.date {
                *stats.daily.entry(date).or_default() += 1;
            }
            if let (Some(day), Some(hour)) = (record.weekday, record.hour) {
                if let Some(slot) = usize::try_from(hour).ok().filter(|h| *h < 24) {
                    stats.heatmap[day.num_days_from_monday() as usize][slot] += 1;
                }
            }
        }

        stats.days_covered = stats.daily.len();
        stats
    }

    /// Number of distinct authors.
    pub fn participant_count(&self) -> usize {
        self.per_user.len()
    }

    /// Messages sent on `day` during `hour`.
    pub fn activity(&self, day: Weekday, hour: u32) -> usize {
        usize::try_from(hour)
            .ok()
            .and_then(|h| self.heatmap[day.num_days_from_monday() as usize].get(h))
            .copied()
            .unwrap_or(0)
    }

    /// Authors ordered by message count, most active first. Ties keep
    /// alphabetical order.
    pub fn top_users(&self) -> Vec<(&str, usize)> {
        let mut users: Vec<_> = self.per_user.iter().map(|(u, c)| (u.as_str(), *c)).collect();
        users.sort_by(|a, b| b.1.cmp(&a.1));
        users
    }

    /// Share of messages that are media, in percent.
    #[allow(clippy::cast_precision_loss)]
    pub fn media_ratio(&self) -> f64 {
        if self.total_messages == 0 {
            return 0.0;
        }
        self.media_count as f64 / self.total_messages as f64 * 100.0
    }
}

/// Sorted unique authors, excluding the system sentinel.
pub fn participants<'a, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .filter(|r| !r.is_system && r.user != SYSTEM_USER)
        .map(|r| r.user.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
