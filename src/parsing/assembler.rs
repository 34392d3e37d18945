//! Message assembly from classified lines.
//!
//! The assembler keeps an ordered list of messages and only ever touches
//! the last one when a continuation line arrives. A continuation that
//! brings a second, different video link is split into a sibling message
//! instead of being merged, so each link stays attached to its own entry.

use tracing::debug;

use super::attachment;
use super::line::{HeadLine, LineKind, classify, clean_line, parse_timestamp};
use super::link::extract_link;
use super::system::detect_system_notice;
use crate::config::ParserConfig;
use crate::message::{Message, MessageKind};

/// Counters describing what happened during assembly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblyStats {
    /// Head lines seen, including suppressed ones
    pub heads: usize,
    /// System notices dropped
    pub suppressed: usize,
    /// Continuation lines merged into the previous message
    pub merged_lines: usize,
    /// Sibling messages created by link splitting
    pub splits: usize,
    /// Continuation lines with no previous message to attach to
    pub orphan_lines: usize,
    /// Heads whose date/time fell back to the configured fallback
    pub date_fallbacks: usize,
    /// Attachments with an unrecognized extension, kept as text
    pub unknown_attachments: usize,
}

/// Output of [`MessageAssembler::finish`].
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub messages: Vec<Message>,
    pub stats: AssemblyStats,
}

/// Builds messages line by line.
///
/// # Example
///
/// ```
/// use chatline::config::ParserConfig;
/// use chatline::parsing::MessageAssembler;
///
/// let config = ParserConfig::default();
/// let mut assembler = MessageAssembler::new(&config);
/// assembler.push_line("[9/1/25, 5:59:40 PM] Alice: first line");
/// assembler.push_line("second line");
///
/// let assembly = assembler.finish();
/// assert_eq!(assembly.messages.len(), 1);
/// assert_eq!(assembly.messages[0].body, "first line\nsecond line");
/// ```
pub struct MessageAssembler<'a> {
    config: &'a ParserConfig,
    messages: Vec<Message>,
    stats: AssemblyStats,
}

impl<'a> MessageAssembler<'a> {
    pub fn new(config: &'a ParserConfig) -> Self {
        Self {
            config,
            messages: Vec::new(),
            stats: AssemblyStats::default(),
        }
    }

    /// Feeds one raw line. Blank lines are ignored.
    pub fn push_line(&mut self, raw: &str) {
        let line = clean_line(raw);
        if line.is_empty() {
            return;
        }

        match classify(&line) {
            LineKind::Head(head) => self.start_message(&head),
            LineKind::Continuation(text) => self.continue_message(text),
        }
    }

    /// Feeds every line of `text`.
    pub fn push_text(&mut self, text: &str) {
        for line in text.lines() {
            self.push_line(line);
        }
    }

    pub fn finish(self) -> Assembly {
        Assembly {
            messages: self.messages,
            stats: self.stats,
        }
    }

    fn start_message(&mut self, head: &HeadLine<'_>) {
        self.stats.heads += 1;

        let timestamp = match parse_timestamp(head.date, head.time) {
            Some(ts) => ts,
            None => {
                self.stats.date_fallbacks += 1;
                debug!(date = head.date, time = head.time, "unparseable header date, using fallback");
                self.config.date_fallback.resolve()
            }
        };

        let mut message = Message::new(head.sender, head.body, timestamp, head.time);

        if let Some(att) = attachment::detect(head.body, &self.config.media_prefix) {
            if att.kind == MessageKind::Text {
                self.stats.unknown_attachments += 1;
                debug!(filename = %att.filename, "unrecognized attachment extension, keeping as text");
            }
            message.kind = att.kind;
            message.body = match (&att.media_path, att.body.is_empty()) {
                (Some(path), true) => path.clone(),
                _ => att.body,
            };
            message.media_path = att.media_path;
        } else {
            if self.config.skip_system_messages {
                if let Some(notice) = detect_system_notice(head.body) {
                    self.stats.suppressed += 1;
                    debug!(sender = head.sender, ?notice, "dropping system notice");
                    return;
                }
            }
            message.link_url = extract_link(head.body);
        }

        self.messages.push(message);
    }

    fn continue_message(&mut self, text: &str) {
        let split_offset = self.config.split_offset();

        let Some(last) = self.messages.last_mut() else {
            self.stats.orphan_lines += 1;
            return;
        };

        let line_link = extract_link(text);

        if let (Some(previous), Some(new_link)) = (last.link_url.as_deref(), line_link.as_deref()) {
            if previous != new_link {
                let sibling = Message {
                    kind: MessageKind::Text,
                    timestamp: last.timestamp + split_offset,
                    display_time: last.display_time.clone(),
                    sender: last.sender.clone(),
                    body: text.to_string(),
                    link_url: line_link,
                    media_path: None,
                };
                debug!(sender = %sibling.sender, link = ?sibling.link_url, "splitting continuation with a new link");
                self.stats.splits += 1;
                self.messages.push(sibling);
                return;
            }
        }

        if !last.body.is_empty() {
            last.body.push('\n');
        }
        last.body.push_str(text);
        self.stats.merged_lines += 1;

        if last.link_url.is_none() && last.kind == MessageKind::Text {
            last.link_url = extract_link(&last.body);
        }
    }
}

/// Assembles all lines of `text` in one call.
pub fn assemble(text: &str, config: &ParserConfig) -> Assembly {
    let mut assembler = MessageAssembler::new(config);
    assembler.push_text(text);
    assembler.finish()
}
