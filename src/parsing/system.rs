//! System notice detection.
//!
//! WhatsApp writes membership and security events as if they were regular
//! messages from the affected participant. These are dropped before
//! assembly.

use std::sync::LazyLock;

use regex::Regex;

use super::line::strip_controls;

static ADDED_HANDLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\badded\s*[+~]").expect("added pattern is valid"));

/// Why a body was classified as a system notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemNotice {
    /// "joined using this group's invite link"
    JoinedViaInvite,
    /// "security code changed"
    SecurityCodeChanged,
    /// a body that is exactly "left"
    Left,
    /// "added +15551234567", "added ~handle" or "added you"
    Added,
}

/// Classifies a message body as a system notice.
///
/// Control characters are removed first so zero-width characters can't be
/// used to slip a notice past the filter.
///
/// ```
/// use chatline::parsing::system::{detect_system_notice, SystemNotice};
///
/// assert_eq!(detect_system_notice("left"), Some(SystemNotice::Left));
/// assert_eq!(detect_system_notice("I left early"), None);
/// ```
pub fn detect_system_notice(body: &str) -> Option<SystemNotice> {
    let cleaned = strip_controls(body);
    let lower = cleaned.to_lowercase();

    if lower.contains("joined using this group's invite link")
        || lower.contains("joined using this group\u{2019}s invite link")
    {
        return Some(SystemNotice::JoinedViaInvite);
    }
    if lower.contains("security code changed") {
        return Some(SystemNotice::SecurityCodeChanged);
    }
    if lower.trim() == "left" {
        return Some(SystemNotice::Left);
    }
    if lower.contains("added") && (ADDED_HANDLE_RE.is_match(&cleaned) || lower.contains("added you"))
    {
        return Some(SystemNotice::Added);
    }

    None
}

/// Returns true if `body` is a system notice.
pub fn is_system_notice(body: &str) -> bool {
    detect_system_notice(body).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invite_join() {
        assert_eq!(
            detect_system_notice("joined using this group's invite link"),
            Some(SystemNotice::JoinedViaInvite)
        );
        assert_eq!(
            detect_system_notice("Joined using this group\u{2019}s invite link"),
            Some(SystemNotice::JoinedViaInvite)
        );
    }

    #[test]
    fn test_security_code() {
        assert_eq!(
            detect_system_notice("Your security code changed. Tap to learn more."),
            Some(SystemNotice::SecurityCodeChanged)
        );
    }

    #[test]
    fn test_left_exact_only() {
        assert!(is_system_notice("left"));
        assert!(is_system_notice("  Left "));
        assert!(!is_system_notice("left the book on the table"));
    }

    #[test]
    fn test_added() {
        assert!(is_system_notice("added +15551234567"));
        assert!(is_system_notice("added +1 555 123 4567"));
        assert!(is_system_notice("added ~ Priya"));
        assert!(is_system_notice("Alice added you"));
        assert!(!is_system_notice("I added salt to the soup"));
    }

    #[test]
    fn test_zero_width_evasion() {
        assert!(is_system_notice("le\u{200b}ft"));
        assert!(is_system_notice("security\u{200d} code changed"));
        assert!(is_system_notice("add\u{200c}ed +4412345"));
    }

    #[test]
    fn test_regular_text() {
        assert!(!is_system_notice("Hello everyone!"));
        assert!(!is_system_notice("<Media omitted>"));
    }
}
