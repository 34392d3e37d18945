//! `<attached: filename>` tag detection.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::message::MessageKind;

static ATTACHED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<attached:\s*(.*?)>").expect("attachment pattern is valid"));

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov"];

/// An attachment found in a message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// `Image`, `VideoFile`, or `Text` for unrecognized extensions.
    pub kind: MessageKind,
    pub filename: String,
    /// Static path; `None` when the extension is unrecognized.
    pub media_path: Option<String>,
    /// The body with the tag removed and trimmed.
    pub body: String,
}

/// Maps a filename to an attachment kind by extension (case-insensitive).
pub fn classify_extension(filename: &str) -> MessageKind {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        MessageKind::Image
    } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        MessageKind::VideoFile
    } else {
        MessageKind::Text
    }
}

/// Joins a filename onto the static media root.
pub fn media_path(prefix: &str, filename: &str) -> String {
    format!("{}/{}", prefix.trim_end_matches('/'), filename)
}

/// Detects an attachment tag in `body`.
///
/// Returns `None` when the body has no tag at all.
///
/// ```
/// use chatline::MessageKind;
/// use chatline::parsing::attachment::detect;
///
/// let att = detect("<attached: 00000012-PHOTO-2025-09-01.jpg>", "/static").unwrap();
/// assert_eq!(att.kind, MessageKind::Image);
/// assert_eq!(att.media_path.as_deref(), Some("/static/00000012-PHOTO-2025-09-01.jpg"));
/// ```
pub fn detect(body: &str, prefix: &str) -> Option<Attachment> {
    let caps = ATTACHED_RE.captures(body)?;
    let tag = caps.get(0)?.as_str();
    let filename = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();

    let kind = classify_extension(&filename);
    let media_path = kind.is_attachment().then(|| media_path(prefix, &filename));
    let body = body.replacen(tag, "", 1).trim().to_string();

    Some(Attachment {
        kind,
        filename,
        media_path,
        body,
    })
}
