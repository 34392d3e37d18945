//! Configuration for the timeline parser.
//!
//! # Example
//!
//! ```rust
//! use chatline::config::ParserConfig;
//! use chatline::TimelineParser;
//!
//! let config = ParserConfig::new()
//!     .with_media_prefix("/media")
//!     .with_transcript_sender("Transcript Bot");
//!
//! let parser = TimelineParser::with_config(config);
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChatlineError, Result};

/// What to use as the timestamp when a message header carries a date/time
/// that none of the supported layouts can parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFallback {
    /// Use the wall-clock time at the moment the line is parsed.
    #[default]
    Now,
    /// Use a fixed instant. Makes degraded parses reproducible.
    Fixed(DateTime<Utc>),
}

impl DateFallback {
    /// Resolves the fallback to a concrete timestamp.
    pub fn resolve(self) -> DateTime<Utc> {
        match self {
            DateFallback::Now => Utc::now(),
            DateFallback::Fixed(ts) => ts,
        }
    }
}

/// Configuration for [`TimelineParser`](crate::TimelineParser).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Static root that attachment filenames are joined onto (default: `/static`)
    pub media_prefix: String,

    /// Sender label for linked transcripts (default: `Archive Bot`)
    pub transcript_sender: String,

    /// Display time for linked transcripts (default: `Transcript`)
    pub transcript_time_label: String,

    /// Offset of a transcript from its anchor message, in ms (default: 1000)
    pub transcript_offset_ms: i64,

    /// Offset of a link-split sibling from the message it splits from, in ms (default: 1)
    pub split_offset_ms: i64,

    /// Drop join/leave/added/security-code notices (default: true)
    pub skip_system_messages: bool,

    /// Reclassify "end of post" reposts as transcripts (default: true)
    pub reclassify_long_posts: bool,

    /// Phrase that exempts a message from long-post reclassification
    pub welcome_banner: String,

    /// Timestamp used when a header date cannot be parsed (default: now)
    pub date_fallback: DateFallback,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            media_prefix: "/static".to_string(),
            transcript_sender: "Archive Bot".to_string(),
            transcript_time_label: "Transcript".to_string(),
            transcript_offset_ms: 1000,
            split_offset_ms: 1,
            skip_system_messages: true,
            reclassify_long_posts: true,
            welcome_banner: "welcome to the group".to_string(),
            date_fallback: DateFallback::Now,
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the static root used for attachment paths.
    #[must_use]
    pub fn with_media_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.media_prefix = prefix.into();
        self
    }

    /// Sets the sender label used for transcripts.
    #[must_use]
    pub fn with_transcript_sender(mut self, sender: impl Into<String>) -> Self {
        self.transcript_sender = sender.into();
        self
    }

    /// Sets the display time label used for transcripts.
    #[must_use]
    pub fn with_transcript_time_label(mut self, label: impl Into<String>) -> Self {
        self.transcript_time_label = label.into();
        self
    }

    /// Sets the transcript offset in milliseconds.
    #[must_use]
    pub fn with_transcript_offset_ms(mut self, ms: i64) -> Self {
        self.transcript_offset_ms = ms;
        self
    }

    /// Sets the link-split offset in milliseconds.
    #[must_use]
    pub fn with_split_offset_ms(mut self, ms: i64) -> Self {
        self.split_offset_ms = ms;
        self
    }

    /// Sets whether system notices are dropped.
    #[must_use]
    pub fn with_skip_system_messages(mut self, skip: bool) -> Self {
        self.skip_system_messages = skip;
        self
    }

    /// Sets whether "end of post" messages are reclassified as transcripts.
    #[must_use]
    pub fn with_reclassify_long_posts(mut self, enabled: bool) -> Self {
        self.reclassify_long_posts = enabled;
        self
    }

    /// Sets the welcome-banner phrase exempt from reclassification.
    #[must_use]
    pub fn with_welcome_banner(mut self, phrase: impl Into<String>) -> Self {
        self.welcome_banner = phrase.into();
        self
    }

    /// Sets the fallback policy for unparseable header dates.
    #[must_use]
    pub fn with_date_fallback(mut self, fallback: DateFallback) -> Self {
        self.date_fallback = fallback;
        self
    }

    pub fn transcript_offset(&self) -> Duration {
        Duration::milliseconds(self.transcript_offset_ms)
    }

    pub fn split_offset(&self) -> Duration {
        Duration::milliseconds(self.split_offset_ms)
    }

    /// Checks that the offsets keep split siblings and transcripts ordered.
    ///
    /// A split sibling must land strictly after its source message and
    /// strictly before that message's transcript.
    pub fn validate(&self) -> Result<()> {
        if self.split_offset_ms <= 0 {
            return Err(ChatlineError::invalid_config(
                "split_offset_ms",
                format!("must be positive, got {}", self.split_offset_ms),
            ));
        }
        if self.transcript_offset_ms <= self.split_offset_ms {
            return Err(ChatlineError::invalid_config(
                "transcript_offset_ms",
                format!(
                    "must be greater than split_offset_ms ({}), got {}",
                    self.split_offset_ms, self.transcript_offset_ms
                ),
            ));
        }
        Ok(())
    }
}
