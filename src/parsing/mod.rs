//! Line-level parsing of a chat export.
//!
//! - [`link`] - video link recognition and canonicalization
//! - [`line`] - head/continuation classification and header dates
//! - [`attachment`] - `<attached: ...>` tags
//! - [`system`] - membership and security notices
//! - [`assembler`] - builds [`Message`](crate::Message)s from lines

pub mod assembler;
pub mod attachment;
pub mod line;
pub mod link;
pub mod system;

pub use assembler::{Assembly, AssemblyStats, MessageAssembler, assemble};
pub use line::{LineKind, classify, clean_line, parse_timestamp};
pub use link::{canonical_url, extract_link, extract_video_id, video_id};
pub use system::{SystemNotice, is_system_notice};
