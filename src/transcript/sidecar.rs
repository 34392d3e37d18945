//! Transcripts from a separate file in the same block format.
//!
//! The file is read as a small state machine over lines. A `URL:` line
//! closes the pending block and opens a new one keyed by its video id;
//! header and separator lines are skipped; every other line is caption
//! content for the pending block. Content before the first `URL:` line has
//! no owner and is discarded.

use super::clean::{HEADER_MARKER, clean_plain, is_separator_line};
use super::inband::TRANSCRIPT_SEPARATOR;
use super::{BlockSource, TranscriptBlock};
use crate::parsing::link::{URL_MARKER, extract_video_id};

/// Line-by-line reader for sidecar transcript files.
#[derive(Debug, Default)]
pub struct SidecarReader {
    pending_id: Option<String>,
    content: Vec<String>,
    blocks: Vec<TranscriptBlock>,
}

impl SidecarReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, line: &str) {
        if line.contains(URL_MARKER) {
            self.flush();
            self.pending_id = extract_video_id(line);
            return;
        }

        if line.contains(HEADER_MARKER)
            || line.contains(TRANSCRIPT_SEPARATOR)
            || is_separator_line(line)
        {
            return;
        }

        if self.pending_id.is_some() {
            self.content.push(line.to_string());
        }
    }

    fn flush(&mut self) {
        let content = std::mem::take(&mut self.content);
        let Some(video_id) = self.pending_id.take() else {
            return;
        };

        let body = clean_plain(&content.join("\n"));
        if body.is_empty() {
            return;
        }

        self.blocks.push(TranscriptBlock {
            video_id: Some(video_id),
            body,
            source: BlockSource::Sidecar,
        });
    }

    /// Flushes the last pending block and returns everything read.
    pub fn finish(mut self) -> Vec<TranscriptBlock> {
        self.flush();
        self.blocks
    }
}

/// Parses a whole sidecar file.
///
/// ```
/// use chatline::transcript::sidecar::parse_sidecar;
///
/// let blocks = parse_sidecar("URL: https://youtu.be/abc123\n00:00:01.000 hello");
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].body, "hello");
/// ```
pub fn parse_sidecar(text: &str) -> Vec<TranscriptBlock> {
    let mut reader = SidecarReader::new();
    for line in text.lines() {
        reader.push_line(line);
    }
    reader.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_block_flushed_without_trailing_blank() {
        let text = format!(
            "{TRANSCRIPT_SEPARATOR}\n[Video Transcript] A\nURL: https://youtu.be/aaa\n{TRANSCRIPT_SEPARATOR}\n00:00:01.000 alpha\n\n\
             {TRANSCRIPT_SEPARATOR}\n[Video Transcript] B\nURL: https://youtu.be/bbb\n{TRANSCRIPT_SEPARATOR}\n00:00:01.000 beta"
        );
        let blocks = parse_sidecar(&text);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].video_id.as_deref(), Some("aaa"));
        assert_eq!(blocks[0].body, "alpha");
        assert_eq!(blocks[1].video_id.as_deref(), Some("bbb"));
        assert_eq!(blocks[1].body, "beta");
        assert!(blocks.iter().all(|b| b.source == BlockSource::Sidecar));
    }

    #[test]
    fn test_content_before_url_discarded() {
        let blocks = parse_sidecar("orphan words\nURL: https://youtu.be/abc\nkept");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].body, "kept");
    }

    #[test]
    fn test_empty_block_skipped() {
        let blocks = parse_sidecar("URL: https://youtu.be/empty\n\n   \nURL: https://youtu.be/full\ntext");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].video_id.as_deref(), Some("full"));
    }

    #[test]
    fn test_non_video_url_ignored() {
        let blocks = parse_sidecar("URL: https://example.com/page\nsome text");
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_multiline_content_joined() {
        let blocks = parse_sidecar("URL: https://youtu.be/x\n00:00:01.000 one\n00:00:02.000 two\nthree");
        assert_eq!(blocks[0].body, "one two three");
    }
}
