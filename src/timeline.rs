//! Grouping messages into calendar days.
//!
//! This is the last pipeline stage. Messages are stable-sorted by timestamp
//! and bucketed by date; the resulting [`TimelineEntry`] records are the
//! shape the viewer reads:
//!
//! ```json
//! [
//!   {
//!     "date": "09/01/2025",
//!     "messages": [
//!       {"type": "text", "time": "5:59:40 PM", "sender": "Alice",
//!        "content": "...", "is_video": true,
//!        "video_url": "https://www.youtube.com/watch?v=abc123", "image_url": null}
//!     ]
//!   }
//! ]
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ParserConfig;
use crate::index::LinkDateIndex;
use crate::message::{Message, MessageKind};
use crate::transcript::LinkReport;

/// Day key layout, e.g. `09/01/2025`.
pub const DAY_KEY_FORMAT: &str = "%m/%d/%Y";

/// Formats a date as a day key.
pub fn day_key(date: NaiveDate) -> String {
    date.format(DAY_KEY_FORMAT).to_string()
}

/// One message as written to the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub time: String,
    pub sender: String,
    pub content: String,
    pub is_video: bool,
    pub video_url: Option<String>,
    pub image_url: Option<String>,
    /// Ordering key; not part of the serialized record.
    #[serde(skip)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl TimelineEntry {
    fn from_message(msg: Message, config: &ParserConfig) -> Self {
        let kind = if msg.kind == MessageKind::Text && is_long_post(&msg.body, config) {
            MessageKind::Transcript
        } else {
            msg.kind
        };

        let content = match (msg.kind, &msg.media_path) {
            (MessageKind::Image, Some(path)) => path.clone(),
            _ => msg.body,
        };

        Self {
            kind,
            time: msg.display_time,
            sender: msg.sender,
            content,
            is_video: msg.link_url.is_some(),
            video_url: msg.link_url,
            image_url: msg.media_path,
            timestamp: Some(msg.timestamp),
        }
    }
}

/// Returns true for reposted long-form text that should render as a transcript.
///
/// ```
/// use chatline::config::ParserConfig;
/// use chatline::timeline::is_long_post;
///
/// let config = ParserConfig::default();
/// assert!(is_long_post("... lots of text ... END OF POST", &config));
/// assert!(!is_long_post("short note", &config));
/// ```
pub fn is_long_post(body: &str, config: &ParserConfig) -> bool {
    if !config.reclassify_long_posts {
        return false;
    }
    let lower = body.to_lowercase();
    let has_marker = lower.contains("end of post") || lower.contains("end of blog");
    let banner = config.welcome_banner.to_lowercase();
    has_marker && (banner.is_empty() || !lower.contains(&banner))
}

/// All messages of one calendar day, in chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayGroup {
    /// Day key in `MM/DD/YYYY` form
    pub date: String,
    pub messages: Vec<TimelineEntry>,
}

impl DayGroup {
    /// Parses the day key back into a date.
    pub fn naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DAY_KEY_FORMAT).ok()
    }
}

/// Counts describing a timeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimelineStats {
    pub days: usize,
    pub messages: usize,
    pub text: usize,
    pub images: usize,
    pub video_files: usize,
    pub transcripts: usize,
    /// Messages carrying a video link
    pub videos: usize,
}

impl TimelineStats {
    /// Share of messages that are transcripts, in percent.
    pub fn transcript_ratio(&self) -> f64 {
        if self.messages == 0 {
            return 0.0;
        }
        self.transcripts as f64 / self.messages as f64 * 100.0
    }
}

/// The parsed, day-grouped timeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    pub days: Vec<DayGroup>,
    /// What happened to transcript blocks during linking
    pub link_report: LinkReport,
    /// First-seen dates of shared videos, when an original export was given
    pub link_dates: Option<LinkDateIndex>,
}

impl Timeline {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Iterates over every entry in order.
    pub fn entries(&self) -> impl Iterator<Item = &TimelineEntry> {
        self.days.iter().flat_map(|day| day.messages.iter())
    }

    /// Returns the group for a `MM/DD/YYYY` key.
    pub fn day(&self, key: &str) -> Option<&DayGroup> {
        self.days.iter().find(|day| day.date == key)
    }

    pub fn stats(&self) -> TimelineStats {
        let mut stats = TimelineStats {
            days: self.days.len(),
            ..TimelineStats::default()
        };
        for entry in self.entries() {
            stats.messages += 1;
            match entry.kind {
                MessageKind::Text => stats.text += 1,
                MessageKind::Image => stats.images += 1,
                MessageKind::VideoFile => stats.video_files += 1,
                MessageKind::Transcript => stats.transcripts += 1,
            }
            if entry.is_video {
                stats.videos += 1;
            }
        }
        stats
    }
}

/// Sorts, groups by day and converts messages to timeline entries.
///
/// The sort is stable, so messages sharing a timestamp keep their input
/// order. Days come out in calendar order.
pub fn group_by_day(mut messages: Vec<Message>, config: &ParserConfig) -> Vec<DayGroup> {
    messages.sort_by_key(|msg| msg.timestamp);

    let mut days: BTreeMap<NaiveDate, Vec<TimelineEntry>> = BTreeMap::new();
    for msg in messages {
        let date = msg.timestamp.date_naive();
        days.entry(date)
            .or_default()
            .push(TimelineEntry::from_message(msg, config));
    }

    days.into_iter()
        .map(|(date, messages)| DayGroup {
            date: day_key(date),
            messages,
        })
        .collect()
}
