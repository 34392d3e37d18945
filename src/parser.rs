//! The end-to-end parser: chat export in, [`Timeline`] out.
//!
//! # Example
//!
//! ```rust
//! use chatline::TimelineParser;
//!
//! let export = "[9/1/25, 5:59:40 PM] Alice: Check this out https://youtu.be/abc123\n\
//!               [9/1/25, 5:59:41 PM] Bob: nice";
//!
//! let timeline = TimelineParser::new().parse_str(export);
//! assert_eq!(timeline.days.len(), 1);
//! assert_eq!(timeline.days[0].date, "09/01/2025");
//! assert_eq!(timeline.days[0].messages.len(), 2);
//! ```
//!
//! # Pipeline
//!
//! 1. The export is split at the first transcript separator.
//! 2. The chat part is assembled into messages
//!    ([`MessageAssembler`](crate::parsing::MessageAssembler)).
//! 3. In-band transcript blocks, then sidecar blocks, are linked to the
//!    messages that shared their video
//!    ([`link_transcripts`](crate::transcript::link_transcripts)).
//! 4. Messages are sorted and grouped by day
//!    ([`group_by_day`](crate::timeline::group_by_day)).

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::config::ParserConfig;
use crate::error::{ChatlineError, Result};
use crate::index::LinkDateIndex;
use crate::parsing::assemble;
use crate::timeline::{Timeline, group_by_day};
use crate::transcript::{link_transcripts, parse_inband, parse_sidecar, split_export};

/// Parser for exported chats with appended video transcripts.
#[derive(Debug, Clone, Default)]
pub struct TimelineParser {
    config: ParserConfig,
    link_index: Option<LinkDateIndex>,
}

impl TimelineParser {
    /// Creates a parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            link_index: None,
        }
    }

    /// Creates a parser after checking the configuration.
    pub fn try_with_config(config: ParserConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    /// Attaches a first-seen date index; it is carried into every timeline.
    #[must_use]
    pub fn with_link_index(mut self, index: LinkDateIndex) -> Self {
        self.link_index = Some(index);
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn link_index(&self) -> Option<&LinkDateIndex> {
        self.link_index.as_ref()
    }

    /// Parses an export held in memory.
    pub fn parse_str(&self, content: &str) -> Timeline {
        self.parse_str_with_sidecar(content, None)
    }

    /// Parses an export plus the text of a sidecar transcripts file.
    ///
    /// In-band transcripts take precedence; sidecar blocks only fill in
    /// anchors that have none.
    pub fn parse_str_with_sidecar(&self, content: &str, sidecar: Option<&str>) -> Timeline {
        let (chat, sections) = split_export(content);

        let assembly = assemble(chat, &self.config);
        let stats = assembly.stats;

        let mut blocks = parse_inband(&sections);
        let inband_count = blocks.len();
        if let Some(text) = sidecar {
            blocks.extend(parse_sidecar(text));
        }

        let (messages, link_report) = link_transcripts(assembly.messages, blocks, &self.config);
        let days = group_by_day(messages, &self.config);

        let timeline = Timeline {
            days,
            link_report,
            link_dates: self.link_index.clone(),
        };

        info!(
            heads = stats.heads,
            suppressed = stats.suppressed,
            splits = stats.splits,
            date_fallbacks = stats.date_fallbacks,
            inband_blocks = inband_count,
            linked = timeline.link_report.linked,
            orphaned = timeline.link_report.orphaned.len(),
            days = timeline.days.len(),
            "parsed chat export"
        );

        timeline
    }

    /// Parses an export file.
    ///
    /// Fails with [`ChatlineError::MissingSource`] if the file doesn't exist.
    pub fn parse(&self, path: &Path) -> Result<Timeline> {
        self.parse_with_sidecar(path, None)
    }

    /// Parses an export file and an optional sidecar transcripts file.
    ///
    /// A missing sidecar is not an error: it is logged and skipped.
    pub fn parse_with_sidecar(&self, path: &Path, sidecar: Option<&Path>) -> Result<Timeline> {
        let content = read_source(path)?;

        let sidecar_text = match sidecar {
            Some(side) if side.exists() => Some(fs::read_to_string(side)?),
            Some(side) => {
                warn!(path = %side.display(), "transcript sidecar not found, skipping");
                None
            }
            None => None,
        };

        Ok(self.parse_str_with_sidecar(&content, sidecar_text.as_deref()))
    }
}

fn read_source(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ChatlineError::missing_source(path));
    }
    Ok(fs::read_to_string(path)?)
}
