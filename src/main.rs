//! # chatline CLI
//!
//! Command-line interface for the chatline library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use chatline::cli::{Args, LOG_ENV};
use chatline::index::LinkDateIndex;
use chatline::output::{write_index_json, write_json};
use chatline::{ChatlineError, TimelineParser};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(&args.log_level);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(log_level: &str) {
    let filter = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(f) => f,
        Err(_) => match log_level.parse::<EnvFilter>() {
            Ok(f) => f,
            Err(e) => {
                eprintln!(
                    "WARN: '{}' is not a valid log filter ({}); falling back to 'info'",
                    log_level, e
                );
                EnvFilter::new("info")
            }
        },
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), ChatlineError> {
    let total_start = Instant::now();

    println!("🗂  chatline v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:       {}", args.input.display());
    if let Some(ref transcripts) = args.transcripts {
        println!("📝 Transcripts: {}", transcripts.display());
    }
    if let Some(ref original) = args.original {
        println!("📜 Original:    {}", original.display());
    }
    println!("💾 Output:      {}", args.output.display());
    println!();

    let config = args.parser_config();
    debug!(?config, "parser configuration");
    let mut parser = TimelineParser::try_with_config(config)?;

    if let Some(ref original) = args.original {
        let index = LinkDateIndex::from_path(original)?;
        println!("📅 Indexed {} shared videos", index.len());
        parser = parser.with_link_index(index);
    }

    println!("⏳ Parsing...");
    let parse_start = Instant::now();
    let timeline = parser.parse_with_sidecar(&args.input, args.transcripts.as_deref())?;
    let stats = timeline.stats();
    println!(
        "   Found {} messages over {} days ({:.2}s)",
        stats.messages,
        stats.days,
        parse_start.elapsed().as_secs_f64()
    );

    println!("💾 Writing JSON...");
    write_json(&timeline, &args.output, !args.compact)?;

    if let (Some(index_path), Some(index)) = (&args.index_output, &timeline.link_dates) {
        write_index_json(index, index_path)?;
        println!("   Video dates saved to {}", index_path.display());
    }

    let report = &timeline.link_report;
    info!(
        linked = report.linked,
        dropped = report.dropped(),
        "transcript linking finished"
    );

    println!();
    println!("✅ Done! Output saved to {}", args.output.display());

    println!();
    println!("📊 Summary:");
    println!("   Days:         {}", stats.days);
    println!("   Messages:     {}", stats.messages);
    println!("   Text:         {}", stats.text);
    println!("   Images:       {}", stats.images);
    println!("   Video files:  {}", stats.video_files);
    println!("   Videos:       {}", stats.videos);
    println!(
        "   Transcripts:  {} ({:.1}% of messages)",
        stats.transcripts,
        stats.transcript_ratio()
    );
    if !report.orphaned.is_empty() {
        println!(
            "   Unlinked:     {} transcript(s) without a matching message",
            report.orphaned.len()
        );
    }

    println!();
    println!("⚡ Total time: {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}
