//! Transcript block cleaning.
//!
//! Two renderings exist. [`clean_plain`] collapses a block to a single
//! paragraph and is used for sidecar transcripts. [`clean_rich`] keeps the
//! header and source link as markdown and gives every caption line its own
//! paragraph; it is used for blocks embedded in the chat export.

use std::sync::LazyLock;

use regex::Regex;

use crate::parsing::link::URL_MARKER;

/// Header line that precedes each transcript.
pub const HEADER_MARKER: &str = "[Video Transcript]";

static TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{2}:\d{2}:\d{2}\S*(?:\s+|$)").expect("caption timestamp pattern is valid")
});

/// Strips a leading `HH:MM:SS...` caption timestamp token.
///
/// ```
/// use chatline::transcript::clean::strip_caption_timestamp;
///
/// assert_eq!(strip_caption_timestamp("00:00:17.250 so today"), "so today");
/// assert_eq!(strip_caption_timestamp("no stamp"), "no stamp");
/// ```
pub fn strip_caption_timestamp(line: &str) -> &str {
    match TIMESTAMP_RE.find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    }
}

/// Returns true for a rule line made only of `=` characters.
pub fn is_separator_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 3 && trimmed.chars().all(|c| c == '=')
}

fn caption_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(strip_caption_timestamp)
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

/// Joins caption lines with single spaces, dropping blanks and timestamps.
pub fn clean_plain(text: &str) -> String {
    caption_lines(text).collect::<Vec<_>>().join(" ")
}

fn capitalize_first(line: &str) -> String {
    let mut chars = line.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => first.to_uppercase().chain(chars).collect(),
        _ => line.to_string(),
    }
}

/// Renders a block as markdown.
///
/// - `URL: u` becomes `**Source URL:** [u](u)`
/// - `[Video Transcript] Title` becomes a `###` heading
/// - rule lines are dropped
/// - every other line ends in a paragraph break, with a leading caption
///   timestamp removed
///
/// A line is capitalized only when it starts with a lowercase letter as
/// written, so a timestamped caption keeps its original case.
///
/// ```
/// use chatline::transcript::clean::clean_rich;
///
/// assert_eq!(clean_rich("00:00:01.000 hello world"), "hello world\n\n");
/// assert_eq!(clean_rich("plain words"), "Plain words\n\n");
/// ```
pub fn clean_rich(text: &str) -> String {
    let mut out = String::new();

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if let Some(url) = line.strip_prefix(URL_MARKER) {
            let url = url.trim();
            out.push_str(&format!("**Source URL:** [{url}]({url})\n"));
            continue;
        }
        if line.starts_with(HEADER_MARKER) {
            out.push_str(&format!("### {line}\n"));
            continue;
        }
        if line.starts_with("===") {
            continue;
        }

        let line = capitalize_first(line);
        let caption = strip_caption_timestamp(&line).trim();
        if caption.is_empty() {
            continue;
        }
        out.push_str(caption);
        out.push_str("\n\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_timestamp_variants() {
        assert_eq!(strip_caption_timestamp("00:00:01.000 hello world"), "hello world");
        assert_eq!(strip_caption_timestamp("01:02:03 hi"), "hi");
        assert_eq!(strip_caption_timestamp("00:00:01.000"), "");
        assert_eq!(strip_caption_timestamp("1:02:03 not a token"), "1:02:03 not a token");
    }

    #[test]
    fn test_clean_plain() {
        let block = "00:00:01.000 hello\n\n00:00:02.500 world\n   \nplain line";
        assert_eq!(clean_plain(block), "hello world plain line");
    }

    #[test]
    fn test_clean_plain_drops_stamp_only_lines() {
        assert_eq!(clean_plain("00:00:01.000\n00:00:02.000 text"), "text");
    }

    #[test]
    fn test_clean_rich() {
        let block = "[Video Transcript] Title\nURL: https://youtu.be/abc123\n===\n00:00:01.000 hello world\nÉcole is fine";
        let rich = clean_rich(block);
        assert_eq!(
            rich,
            "### [Video Transcript] Title\n\
             **Source URL:** [https://youtu.be/abc123](https://youtu.be/abc123)\n\
             hello world\n\n\
             École is fine\n\n"
        );
    }

    #[test]
    fn test_clean_rich_case_follows_raw_line() {
        let rich = clean_rich("00:00:02.000 so today\nuntimed line\n00:00:03.000\n");
        assert_eq!(rich, "so today\n\nUntimed line\n\n");
    }

    #[test]
    fn test_capitalize_unicode() {
        assert_eq!(capitalize_first("élan"), "Élan");
        assert_eq!(capitalize_first("Already"), "Already");
        assert_eq!(capitalize_first("42 things"), "42 things");
    }

    #[test]
    fn test_separator_line() {
        assert!(is_separator_line("====="));
        assert!(is_separator_line("  ===  "));
        assert!(!is_separator_line("=="));
        assert!(!is_separator_line("a === b"));
    }
}
