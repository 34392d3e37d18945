//! YouTube link recognition and canonicalization.
//!
//! Three link forms are recognized:
//! - `https://www.youtube.com/watch?v=ID`
//! - `https://youtu.be/ID`
//! - `https://www.youtube.com/embed/ID`
//!
//! All of them canonicalize to the watch form, which is what messages and
//! transcript blocks are joined on.

use std::sync::LazyLock;

use regex::Regex;

/// Literal marker that introduces a labeled link line.
pub const URL_MARKER: &str = "URL:";

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://(?:www\.)?(?:youtube\.com/(?:watch\?v=|embed/)|youtu\.be/)([\w\-]+)")
        .expect("link pattern is valid")
});

static VIDEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:v=|youtu\.be/|embed/)([\w\-]+)").expect("video id pattern is valid")
});

/// Builds the canonical watch URL for a video identifier.
pub fn canonical_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

/// Returns the video identifier referenced by any recognized link form.
///
/// ```
/// use chatline::parsing::video_id;
///
/// assert_eq!(video_id("https://youtu.be/abc123"), Some("abc123"));
/// assert_eq!(video_id("https://example.com"), None);
/// ```
pub fn video_id(url: &str) -> Option<&str> {
    VIDEO_ID_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Returns the canonical form of the first recognized video link in `text`.
///
/// If no direct link is present but the text has a `URL:` label, the first
/// token after the label is used: canonicalized when it is a recognized
/// link form, returned verbatim when it at least looks like a URL.
///
/// ```
/// use chatline::parsing::extract_link;
///
/// assert_eq!(
///     extract_link("see https://youtu.be/abc123 now").as_deref(),
///     Some("https://www.youtube.com/watch?v=abc123")
/// );
/// assert_eq!(extract_link("no links here"), None);
/// ```
pub fn extract_link(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }

    if let Some(id) = LINK_RE.captures(text).and_then(|caps| caps.get(1)) {
        return Some(canonical_url(id.as_str()));
    }

    let idx = text.find(URL_MARKER)?;
    let token = text[idx + URL_MARKER.len()..].split_whitespace().next()?;
    if !token.contains("http") {
        return None;
    }

    match video_id(token) {
        Some(id) => Some(canonical_url(id)),
        None => Some(token.to_string()),
    }
}

/// Returns the video identifier of the first recognized link in `text`.
pub fn extract_video_id(text: &str) -> Option<String> {
    extract_link(text).and_then(|url| video_id(&url).map(str::to_string))
}
