//! The message record produced by the assembler.
//!
//! A [`Message`] is the working representation used between assembly,
//! transcript linking and grouping. The record the viewer consumes is
//! [`TimelineEntry`](crate::timeline::TimelineEntry), derived from it at
//! grouping time.
//!
//! # Example
//!
//! ```
//! use chatline::{Message, MessageKind};
//! use chrono::{TimeZone, Utc};
//!
//! let ts = Utc.with_ymd_and_hms(2025, 9, 1, 17, 59, 40).unwrap();
//! let msg = Message::new("Alice", "Check this out", ts, "5:59:40 PM")
//!     .with_link("https://www.youtube.com/watch?v=abc123");
//!
//! assert_eq!(msg.kind, MessageKind::Text);
//! assert!(msg.has_link());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a message carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Plain text, possibly with a video link
    #[default]
    Text,
    /// Image attachment
    Image,
    /// Video file attachment
    VideoFile,
    /// Long-form transcript text
    Transcript,
}

impl MessageKind {
    /// Returns true for attachment kinds.
    pub fn is_attachment(self) -> bool {
        matches!(self, MessageKind::Image | MessageKind::VideoFile)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Text => "text",
            MessageKind::Image => "image",
            MessageKind::VideoFile => "video_file",
            MessageKind::Transcript => "transcript",
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chat message or linked transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub kind: MessageKind,

    /// Absolute time used for ordering and day grouping.
    pub timestamp: DateTime<Utc>,

    /// Time of day as written in the export, or the transcript label.
    pub display_time: String,

    /// Author name, trimmed.
    pub sender: String,

    /// Message content. Continuation lines are joined with `\n`.
    pub body: String,

    /// Canonical watch URL of the first recognized video link.
    pub link_url: Option<String>,

    /// Resolved static path of an attachment.
    pub media_path: Option<String>,
}

impl Message {
    /// Creates a text message without link or attachment.
    pub fn new(
        sender: impl Into<String>,
        body: impl Into<String>,
        timestamp: DateTime<Utc>,
        display_time: impl Into<String>,
    ) -> Self {
        Self {
            kind: MessageKind::Text,
            timestamp,
            display_time: display_time.into(),
            sender: sender.into(),
            body: body.into(),
            link_url: None,
            media_path: None,
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    #[must_use]
    pub fn with_kind(mut self, kind: MessageKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_link(mut self, url: impl Into<String>) -> Self {
        self.link_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_media_path(mut self, path: impl Into<String>) -> Self {
        self.media_path = Some(path.into());
        self
    }

    /// Returns true if a recognized video link was found.
    pub fn has_link(&self) -> bool {
        self.link_url.is_some()
    }

    /// Returns the canonical link, if any.
    pub fn link_url(&self) -> Option<&str> {
        self.link_url.as_deref()
    }
}
