//! Line classification: message heads vs continuation lines.
//!
//! A head line looks like
//! `[9/1/25, 5:59:40 PM] Alice: Check this out`. Anything else continues
//! the previous message.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;

static HEAD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\[(\d{1,2}/\d{1,2}/(?:\d{4}|\d{2})),\s*(\d{1,2}:\d{2}:\d{2}\s?[APap][Mm])\]\s*(.*?):\s*(.*)$",
    )
    .expect("head pattern is valid")
});

/// 12-hour layouts tried in order; the first successful parse wins.
const DATETIME_FORMATS: &[&str] = &[
    "%m/%d/%y %I:%M:%S %p",
    "%m/%d/%Y %I:%M:%S %p",
    "%d/%m/%y %I:%M:%S %p",
    "%d/%m/%Y %I:%M:%S %p",
];

/// The parts of a message head line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadLine<'a> {
    pub date: &'a str,
    pub time: &'a str,
    pub sender: &'a str,
    pub body: &'a str,
}

/// Result of classifying one cleaned line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Starts a new message.
    Head(HeadLine<'a>),
    /// Belongs to the previous message.
    Continuation(&'a str),
}

/// Returns true for characters that never carry content in an export:
/// C0/C1 controls plus the zero-width and bidi formatting marks.
pub fn is_invisible_control(c: char) -> bool {
    c.is_control()
        || matches!(
            c,
            '\u{00AD}'
                | '\u{061C}'
                | '\u{180E}'
                | '\u{200B}'..='\u{200F}'
                | '\u{202A}'..='\u{202E}'
                | '\u{2060}'..='\u{2064}'
                | '\u{2066}'..='\u{206F}'
                | '\u{FEFF}'
                | '\u{FFF9}'..='\u{FFFB}'
        )
}

/// Removes every invisible control character from `text`.
pub fn strip_controls(text: &str) -> String {
    text.chars().filter(|&c| !is_invisible_control(c)).collect()
}

/// Trims a raw line and removes direction marks and other control characters.
pub fn clean_line(raw: &str) -> String {
    strip_controls(raw).trim().to_string()
}

/// Classifies an already cleaned line.
///
/// ```
/// use chatline::parsing::line::{classify, LineKind};
///
/// let line = "[9/1/25, 5:59:40 PM] Alice: hello";
/// assert!(matches!(classify(line), LineKind::Head(h) if h.sender == "Alice"));
/// assert!(matches!(classify("just more text"), LineKind::Continuation(_)));
/// ```
pub fn classify(line: &str) -> LineKind<'_> {
    match HEAD_RE.captures(line) {
        Some(caps) => {
            let get = |i: usize| caps.get(i).map_or("", |m| m.as_str());
            LineKind::Head(HeadLine {
                date: get(1),
                time: get(2),
                sender: get(3).trim(),
                body: get(4),
            })
        }
        None => LineKind::Continuation(line),
    }
}

/// Normalizes `5:59:40PM` / `5:59:40 pm` / `5:59:40\u{202F}PM` to `5:59:40 PM`.
fn normalize_time(time: &str) -> String {
    let compact: String = time.chars().filter(|c| !c.is_whitespace()).collect();
    let split = compact.len().saturating_sub(2);
    let (clock, marker) = compact.split_at(split);
    format!("{} {}", clock, marker.to_ascii_uppercase())
}

/// Parses the date and time of a head line.
///
/// Tries month/day before day/month and 2-digit before 4-digit years.
/// Returns `None` when no layout fits; callers apply a
/// [`DateFallback`](crate::config::DateFallback).
pub fn parse_timestamp(date: &str, time: &str) -> Option<DateTime<Utc>> {
    let datetime_str = format!("{} {}", date.trim(), normalize_time(time));

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&datetime_str, fmt).ok())
        .map(|naive| naive.and_utc())
}
