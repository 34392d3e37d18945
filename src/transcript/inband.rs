//! Transcript blocks appended to the chat export itself.
//!
//! Everything after the first separator line belongs to the transcript
//! section. A separator is any line made only of `=` characters; exports
//! use [`TRANSCRIPT_SEPARATOR`], but shorter rules are accepted too. A
//! transcript is written as a header section followed by a content
//! section:
//!
//! ```text
//! ================================================================
//! [Video Transcript] Title
//! URL: https://youtu.be/abc123
//! ================================================================
//! 00:00:01.000 hello world
//! ```
//!
//! so splitting on the separator alone would tear header and captions
//! apart. Sections without a header or `URL:` line are glued onto the
//! preceding block.

use super::clean::{HEADER_MARKER, clean_rich, is_separator_line};
use super::{BlockSource, TranscriptBlock};
use crate::parsing::link::{URL_MARKER, extract_video_id};

/// Separator line between the chat and its transcripts, and between blocks.
pub const TRANSCRIPT_SEPARATOR: &str =
    "================================================================";

/// Splits an export into its chat part and the transcript sections.
///
/// The chat ends at the first separator line; every later separator line
/// starts a new section. Separator lines themselves are not part of any
/// slice.
///
/// ```
/// use chatline::transcript::inband::{split_export, TRANSCRIPT_SEPARATOR};
///
/// let text = format!("chat\n{TRANSCRIPT_SEPARATOR}\nblock");
/// let (chat, sections) = split_export(&text);
/// assert_eq!(chat.trim(), "chat");
/// assert_eq!(sections.len(), 1);
///
/// let (chat, sections) = split_export("chat\n====\nheader\n====\ncaptions");
/// assert_eq!(chat, "chat\n");
/// assert_eq!(sections, ["header\n", "captions"]);
/// ```
pub fn split_export(content: &str) -> (&str, Vec<&str>) {
    let mut chat_end = None;
    let mut sections = Vec::new();
    let mut section_start = 0;
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();
        if !is_separator_line(line) {
            continue;
        }
        match chat_end {
            None => chat_end = Some(line_start),
            Some(_) => sections.push(&content[section_start..line_start]),
        }
        section_start = offset;
    }

    match chat_end {
        Some(end) => {
            sections.push(&content[section_start..]);
            (&content[..end], sections)
        }
        None => (content, Vec::new()),
    }
}

fn starts_block(section: &str) -> bool {
    section.lines().map(str::trim).any(|line| {
        line.starts_with(URL_MARKER) || line.starts_with(HEADER_MARKER)
    })
}

/// Regroups separator-delimited sections into whole transcript blocks.
pub fn group_sections(sections: &[&str]) -> Vec<String> {
    let mut blocks: Vec<String> = Vec::new();

    for section in sections {
        let section = section.trim();
        if section.is_empty() {
            continue;
        }

        match blocks.last_mut() {
            Some(current) if !starts_block(section) => {
                current.push('\n');
                current.push_str(section);
            }
            _ => blocks.push(section.to_string()),
        }
    }

    blocks
}

/// Extracts the transcript blocks embedded in a chat export.
pub fn parse_inband(sections: &[&str]) -> Vec<TranscriptBlock> {
    group_sections(sections)
        .into_iter()
        .map(|block| TranscriptBlock {
            video_id: extract_video_id(&block),
            body: clean_rich(&block),
            source: BlockSource::InBand,
        })
        .collect()
}
