//! # Chatline
//!
//! Turns an exported WhatsApp chat into a day-grouped timeline for a viewer,
//! with video transcripts attached to the messages that shared the video.
//!
//! ## Overview
//!
//! The input is the `_chat.txt` of a WhatsApp export
//! (`[9/1/25, 5:59:40 PM] Alice: message` lines), optionally followed by
//! transcript blocks separated by a line of `=` characters. Chatline:
//!
//! - joins multi-line messages and classifies `<attached: ...>` media
//! - drops join/leave/added/security-code notices
//! - canonicalizes YouTube links and splits messages that carry two videos
//! - links each transcript to the first message that shared its video
//! - sorts everything and groups it by calendar day
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatline::prelude::*;
//! use std::path::Path;
//!
//! fn main() -> Result<()> {
//!     let parser = TimelineParser::new();
//!     let timeline = parser.parse_with_sidecar(
//!         Path::new("_chat.txt"),
//!         Some(Path::new("youtube_transcripts.txt")),
//!     )?;
//!
//!     write_json(&timeline, Path::new("timeline.json"), true)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`TimelineParser`], the whole pipeline
//! - [`parsing`] - line classification, links, attachments, system notices, assembly
//! - [`transcript`] - in-band and sidecar transcript blocks, anchor linking
//! - [`timeline`] - day grouping and the output record
//! - [`index`] - first-seen dates of videos from the original export
//! - [`config`] - [`ParserConfig`]
//! - [`output`] - JSON writers
//! - [`error`] - [`ChatlineError`], [`Result`]

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod index;
pub mod message;
#[cfg(feature = "json-output")]
pub mod output;
pub mod parser;
pub mod parsing;
pub mod timeline;
pub mod transcript;

// Re-export the main types at the crate root for convenience
pub use config::ParserConfig;
pub use error::{ChatlineError, Result};
pub use message::{Message, MessageKind};
pub use parser::TimelineParser;
pub use timeline::{DayGroup, Timeline, TimelineEntry};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatline::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{DateFallback, ParserConfig};
    pub use crate::error::{ChatlineError, Result};
    pub use crate::index::LinkDateIndex;
    pub use crate::message::{Message, MessageKind};
    pub use crate::parser::TimelineParser;
    pub use crate::timeline::{DayGroup, Timeline, TimelineEntry, TimelineStats};
    pub use crate::transcript::LinkReport;

    #[cfg(feature = "json-output")]
    pub use crate::output::{to_json, write_json};
}
