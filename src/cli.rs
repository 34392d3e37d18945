//! Command-line interface definition using clap.

use std::path::PathBuf;

use clap::Parser;

use crate::config::ParserConfig;

/// Environment variable holding a tracing filter expression.
pub const LOG_ENV: &str = "CHATLINE_LOG";

/// Convert a WhatsApp chat export with video transcripts into a
/// day-grouped timeline JSON for the viewer.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatline")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatline _chat.txt
    chatline _chat.txt -o public/timeline.json --transcripts youtube_transcripts.txt
    chatline trimmed_chat.txt --original _chat.txt --index-output video_dates.json
    CHATLINE_LOG=debug chatline _chat.txt --compact")]
pub struct Args {
    /// Path to the chat export (_chat.txt)
    pub input: PathBuf,

    /// Path to the output timeline JSON
    #[arg(short, long, default_value = "timeline.json")]
    pub output: PathBuf,

    /// Transcript file in the same block format, used for videos whose
    /// transcript isn't embedded in the export
    #[arg(short = 't', long, value_name = "FILE")]
    pub transcripts: Option<PathBuf>,

    /// Original unfiltered export, scanned for first-seen video dates
    #[arg(long, value_name = "FILE")]
    pub original: Option<PathBuf>,

    /// Where to write the video date index (requires --original)
    #[arg(long, value_name = "FILE", requires = "original")]
    pub index_output: Option<PathBuf>,

    /// Static root for attachment paths
    #[arg(long, default_value = "/static")]
    pub media_prefix: String,

    /// Keep system notices (joins, leaves, security codes)
    #[arg(long)]
    pub keep_system: bool,

    /// Don't reclassify "end of post" reposts as transcripts
    #[arg(long)]
    pub no_reclassify: bool,

    /// Write compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,

    /// Log filter, overridden by CHATLINE_LOG (e.g. "debug", "chatline=trace")
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Args {
    /// Builds the parser configuration from the flags.
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig::new()
            .with_media_prefix(self.media_prefix.clone())
            .with_skip_system_messages(!self.keep_system)
            .with_reclassify_long_posts(!self.no_reclassify)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["chatline", "_chat.txt"]).unwrap();
        assert_eq!(args.input, PathBuf::from("_chat.txt"));
        assert_eq!(args.output, PathBuf::from("timeline.json"));
        assert!(args.transcripts.is_none());
        assert!(!args.compact);

        let config = args.parser_config();
        assert!(config.skip_system_messages);
        assert_eq!(config.media_prefix, "/static");
    }

    #[test]
    fn test_flags() {
        let args = Args::try_parse_from([
            "chatline",
            "chat.txt",
            "-o",
            "out.json",
            "-t",
            "yt.txt",
            "--media-prefix",
            "/media",
            "--keep-system",
            "--no-reclassify",
        ])
        .unwrap();
        assert_eq!(args.transcripts, Some(PathBuf::from("yt.txt")));

        let config = args.parser_config();
        assert_eq!(config.media_prefix, "/media");
        assert!(!config.skip_system_messages);
        assert!(!config.reclassify_long_posts);
    }

    #[test]
    fn test_index_output_requires_original() {
        assert!(Args::try_parse_from(["chatline", "chat.txt", "--index-output", "i.json"]).is_err());
        assert!(
            Args::try_parse_from([
                "chatline",
                "chat.txt",
                "--original",
                "o.txt",
                "--index-output",
                "i.json"
            ])
            .is_ok()
        );
    }
}
