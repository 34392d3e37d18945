//! JSON output for the viewer.
//!
//! The timeline is written as a top-level array of day groups. Keys and
//! `type` values are a fixed contract with the viewer; see
//! [`TimelineEntry`](crate::timeline::TimelineEntry).

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::index::LinkDateIndex;
use crate::timeline::{Timeline, day_key};

/// Converts a timeline to a JSON string.
///
/// ```rust
/// use chatline::TimelineParser;
/// use chatline::output::to_json;
///
/// let timeline = TimelineParser::new().parse_str("[9/1/25, 5:59:41 PM] Bob: nice");
/// let json = to_json(&timeline, false)?;
/// assert!(json.starts_with(r#"[{"date":"09/01/2025","messages":["#));
/// # Ok::<(), chatline::ChatlineError>(())
/// ```
pub fn to_json(timeline: &Timeline, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(&timeline.days)?
    } else {
        serde_json::to_string(&timeline.days)?
    };
    Ok(json)
}

/// Writes a timeline to a JSON file.
pub fn write_json(timeline: &Timeline, path: &Path, pretty: bool) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, &timeline.days)?;
    } else {
        serde_json::to_writer(&mut writer, &timeline.days)?;
    }
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Converts a link date index to `{"video_id": "MM/DD/YYYY"}` JSON.
pub fn index_to_json(index: &LinkDateIndex) -> Result<String> {
    let keyed: BTreeMap<&str, String> = index.iter().map(|(id, date)| (id, day_key(date))).collect();
    Ok(serde_json::to_string_pretty(&keyed)?)
}

/// Writes a link date index to a JSON file.
pub fn write_index_json(index: &LinkDateIndex, path: &Path) -> Result<()> {
    let json = index_to_json(index)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}
