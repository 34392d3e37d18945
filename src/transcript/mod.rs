//! Linking transcripts to the message that shared their video.
//!
//! Each chat message carrying a canonical video link is a potential
//! *anchor*; the first message to carry a given video wins. A transcript
//! block whose video matches an anchor becomes a `transcript` message placed
//! right after the anchor, timestamped a fixed offset later. Every in-band
//! block is linked; a sidecar block only fills in an anchor that has no
//! in-band transcript. Blocks without an anchor are dropped and listed in
//! the [`LinkReport`].
//!
//! - [`inband`] - blocks appended to the chat export
//! - [`sidecar`] - blocks from a separate transcripts file
//! - [`clean`] - text cleanup shared by both

pub mod clean;
pub mod inband;
pub mod sidecar;

use std::collections::HashMap;

use tracing::debug;

use crate::config::ParserConfig;
use crate::message::{Message, MessageKind};
use crate::parsing::link::video_id;

pub use inband::{TRANSCRIPT_SEPARATOR, parse_inband, split_export};
pub use sidecar::{SidecarReader, parse_sidecar};

/// Where a transcript block came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockSource {
    InBand,
    Sidecar,
}

/// A cleaned transcript block and the video it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptBlock {
    pub video_id: Option<String>,
    pub body: String,
    pub source: BlockSource,
}

/// Outcome of a linking pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkReport {
    /// Transcripts attached to an anchor
    pub linked: usize,
    /// Sidecar blocks for an anchor already covered in-band
    pub duplicates: usize,
    /// Blocks with no video id or an empty body
    pub unidentified: usize,
    /// Video ids of blocks with no anchor message, in input order
    pub orphaned: Vec<String>,
}

impl LinkReport {
    /// Total number of blocks that were not attached.
    pub fn dropped(&self) -> usize {
        self.duplicates + self.unidentified + self.orphaned.len()
    }
}

/// Maps each video id to the index of the first message carrying it.
pub fn anchor_map(messages: &[Message]) -> HashMap<String, usize> {
    let mut anchors = HashMap::new();
    for (idx, msg) in messages.iter().enumerate() {
        if msg.kind == MessageKind::Transcript {
            continue;
        }
        if let Some(id) = msg.link_url().and_then(video_id) {
            anchors.entry(id.to_string()).or_insert(idx);
        }
    }
    anchors
}

fn transcript_for(anchor: &Message, body: String, config: &ParserConfig) -> Message {
    Message {
        kind: MessageKind::Transcript,
        timestamp: anchor.timestamp + config.transcript_offset(),
        display_time: config.transcript_time_label.clone(),
        sender: config.transcript_sender.clone(),
        body,
        link_url: None,
        media_path: None,
    }
}

/// Attaches transcript blocks to their anchor messages.
///
/// Transcripts are inserted directly after their anchor, in block order,
/// which keeps them ahead of an unrelated message that happens to share
/// their timestamp.
pub fn link_transcripts(
    messages: Vec<Message>,
    blocks: impl IntoIterator<Item = TranscriptBlock>,
    config: &ParserConfig,
) -> (Vec<Message>, LinkReport) {
    let anchors = anchor_map(&messages);
    let mut attached: Vec<Vec<Message>> = vec![Vec::new(); messages.len()];
    let mut covered_inband = vec![false; messages.len()];
    let mut report = LinkReport::default();

    for block in blocks {
        let Some(id) = block.video_id.filter(|_| !block.body.trim().is_empty()) else {
            report.unidentified += 1;
            continue;
        };

        let Some(&idx) = anchors.get(&id) else {
            debug!(video_id = %id, source = ?block.source, "dropping transcript without anchor");
            report.orphaned.push(id);
            continue;
        };

        match block.source {
            BlockSource::InBand => covered_inband[idx] = true,
            BlockSource::Sidecar if covered_inband[idx] => {
                debug!(video_id = %id, "anchor already has an in-band transcript");
                report.duplicates += 1;
                continue;
            }
            BlockSource::Sidecar => {}
        }

        attached[idx].push(transcript_for(&messages[idx], block.body, config));
        report.linked += 1;
    }

    let mut linked = Vec::with_capacity(messages.len() + report.linked);
    for (msg, transcripts) in messages.into_iter().zip(attached) {
        linked.push(msg);
        linked.extend(transcripts);
    }

    (linked, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn at(sec: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 1, 17, 59, sec).unwrap()
    }

    fn block(id: &str, body: &str, source: BlockSource) -> TranscriptBlock {
        TranscriptBlock {
            video_id: Some(id.to_string()),
            body: body.to_string(),
            source,
        }
    }

    fn sample() -> Vec<Message> {
        vec![
            Message::new("Alice", "https://youtu.be/abc", at(40), "5:59:40 PM")
                .with_link("https://www.youtube.com/watch?v=abc"),
            Message::new("Bob", "nice", at(41), "5:59:41 PM"),
            Message::new("Carol", "again", at(42), "5:59:42 PM")
                .with_link("https://www.youtube.com/watch?v=abc"),
        ]
    }

    #[test]
    fn test_first_seen_anchor() {
        let anchors = anchor_map(&sample());
        assert_eq!(anchors.get("abc"), Some(&0));
        assert_eq!(anchors.len(), 1);
    }

    #[test]
    fn test_transcript_inserted_after_anchor() {
        let config = ParserConfig::default();
        let (msgs, report) =
            link_transcripts(sample(), vec![block("abc", "words", BlockSource::InBand)], &config);

        assert_eq!(msgs.len(), 4);
        assert_eq!(msgs[1].kind, MessageKind::Transcript);
        assert_eq!(msgs[1].sender, "Archive Bot");
        assert_eq!(msgs[1].display_time, "Transcript");
        assert_eq!(msgs[1].timestamp, at(40) + Duration::seconds(1));
        assert!(msgs[1].link_url.is_none());
        assert_eq!(report.linked, 1);
    }

    #[test]
    fn test_orphans_and_duplicates_reported() {
        let config = ParserConfig::default();
        let blocks = vec![
            block("abc", "first", BlockSource::InBand),
            block("abc", "second", BlockSource::Sidecar),
            block("zzz", "lost", BlockSource::Sidecar),
            TranscriptBlock {
                video_id: None,
                body: "no id".to_string(),
                source: BlockSource::InBand,
            },
        ];
        let (msgs, report) = link_transcripts(sample(), blocks, &config);

        assert_eq!(msgs.len(), 4);
        assert_eq!(msgs[1].body, "first");
        assert_eq!(report.duplicates, 1);
        assert_eq!(report.orphaned, vec!["zzz".to_string()]);
        assert_eq!(report.unidentified, 1);
        assert_eq!(report.dropped(), 3);
    }

    #[test]
    fn test_every_inband_block_links() {
        let config = ParserConfig::default();
        let blocks = vec![
            block("abc", "part one", BlockSource::InBand),
            block("abc", "part two", BlockSource::InBand),
        ];
        let (msgs, report) = link_transcripts(sample(), blocks, &config);

        let bodies: Vec<_> = msgs.iter().map(|m| m.body.as_str()).collect();
        assert_eq!(
            bodies,
            ["https://youtu.be/abc", "part one", "part two", "nice", "again"]
        );
        assert_eq!(report.linked, 2);
        assert_eq!(report.duplicates, 0);
    }

    #[test]
    fn test_sidecar_only_fills_uncovered_anchors() {
        let config = ParserConfig::default();
        let mut messages = sample();
        messages.push(
            Message::new("Dan", "https://youtu.be/def", at(50), "5:59:50 PM")
                .with_link("https://www.youtube.com/watch?v=def"),
        );
        let blocks = vec![
            block("abc", "in-band", BlockSource::InBand),
            block("abc", "sidecar abc", BlockSource::Sidecar),
            block("def", "sidecar def", BlockSource::Sidecar),
        ];
        let (msgs, report) = link_transcripts(messages, blocks, &config);

        let transcripts: Vec<_> = msgs
            .iter()
            .filter(|m| m.kind == MessageKind::Transcript)
            .map(|m| m.body.as_str())
            .collect();
        assert_eq!(transcripts, ["in-band", "sidecar def"]);
        assert_eq!(report.duplicates, 1);
    }

    #[test]
    fn test_empty_body_not_linked() {
        let config = ParserConfig::default();
        let (msgs, report) =
            link_transcripts(sample(), vec![block("abc", "  ", BlockSource::Sidecar)], &config);
        assert_eq!(msgs.len(), 3);
        assert_eq!(report.unidentified, 1);
    }

    #[test]
    fn test_no_blocks_is_identity() {
        let config = ParserConfig::default();
        let (msgs, report) = link_transcripts(sample(), Vec::new(), &config);
        assert_eq!(msgs, sample());
        assert_eq!(report, LinkReport::default());
    }
}
