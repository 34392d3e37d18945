//! First-seen dates of shared videos.
//!
//! The chat given to the parser may be a trimmed or hand-edited copy. The
//! original, unfiltered export still records when each video was first
//! posted; this index recovers that. It's informational and never affects
//! parsing, so it is built separately and handed to
//! [`TimelineParser::with_link_index`](crate::TimelineParser::with_link_index).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::parsing::link::video_id;
use crate::timeline::day_key;

static HEAD_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(\d{1,2})/(\d{1,2})/(\d{2}|\d{4}),").expect("head date pattern is valid")
});

/// Video id → date the video was first shared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkDateIndex {
    dates: BTreeMap<String, NaiveDate>,
}

/// Parses the `M/D/YY` or `M/D/YYYY` date from a head line.
fn line_date(line: &str) -> Option<NaiveDate> {
    let caps = HEAD_DATE_RE.captures(line)?;
    let month: u32 = caps.get(1)?.as_str().parse().ok()?;
    let day: u32 = caps.get(2)?.as_str().parse().ok()?;
    let year_str = caps.get(3)?.as_str();
    let mut year: i32 = year_str.parse().ok()?;
    if year_str.len() == 2 {
        year += 2000;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

impl LinkDateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the index from the text of an original export.
    ///
    /// ```
    /// use chatline::index::LinkDateIndex;
    ///
    /// let index = LinkDateIndex::from_export(
    ///     "[9/28/25, 8:00:00 AM] Alice: https://youtu.be/abc123",
    /// );
    /// assert_eq!(index.day_key("abc123").as_deref(), Some("09/28/2025"));
    /// ```
    pub fn from_export(text: &str) -> Self {
        let mut index = Self::new();
        for line in text.lines() {
            if !(line.contains("youtu") && line.contains("http")) {
                continue;
            }
            let (Some(date), Some(id)) = (line_date(line), video_id(line)) else {
                continue;
            };
            index.record(id, date);
        }
        debug!(entries = index.len(), "built link date index");
        index
    }

    /// Builds the index from a file. A missing file yields an empty index.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(path = %path.display(), "original export not found, skipping link date index");
            return Ok(Self::new());
        }
        let text = fs::read_to_string(path)?;
        Ok(Self::from_export(&text))
    }

    /// Records a sighting. Earlier sightings are kept.
    pub fn record(&mut self, video_id: impl Into<String>, date: NaiveDate) {
        self.dates.entry(video_id.into()).or_insert(date);
    }

    pub fn get(&self, video_id: &str) -> Option<NaiveDate> {
        self.dates.get(video_id).copied()
    }

    /// First-seen date as a `MM/DD/YYYY` day key.
    pub fn day_key(&self, video_id: &str) -> Option<String> {
        self.get(video_id).map(day_key)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, NaiveDate)> {
        self.dates.iter().map(|(id, date)| (id.as_str(), *date))
    }
}
