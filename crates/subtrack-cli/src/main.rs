//! `subtrack`: inspect a multi-track ASS script
//!
//! Loads one script and answers the questions a player would ask of it:
//! which tracks exist, what shows at a given time, where the neighbouring
//! sentences start.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, LevelFilter};
use subtrack_core::{
    utils::{decode_time, format_time},
    NavigationConfig, ParserConfig, SubtitleTimeline,
};

#[derive(Subcommand, Debug)]
enum Commands {
    /// Summarize the script: tracks, events, skipped lines
    Stats {
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Also list every skipped line
        #[arg(short, long)]
        issues: bool,
    },

    /// List tracks with their style and event count
    Tracks {
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,
    },

    /// Show what is on screen at a time, grouped by track
    At {
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Time as seconds (`12.5`) or ASS timestamp (`0:00:12.50`)
        #[arg(value_name = "TIME")]
        time: String,
    },

    /// Show the sentences around a time on one track
    Nav {
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Time as seconds or ASS timestamp
        #[arg(value_name = "TIME")]
        time: String,

        /// Track to navigate, the main track when omitted
        #[arg(short, long)]
        track: Option<String>,

        /// Merge gap tolerance in seconds
        #[arg(long, default_value_t = subtrack_core::timeline::config::DEFAULT_MERGE_GAP_TOLERANCE)]
        merge_gap: f64,
    },

    /// Find dialogue containing a phrase
    Search {
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        #[arg(value_name = "QUERY")]
        query: String,
    },
}

/// Subtrack - multi-track subtitle inspector
#[derive(Parser, Debug)]
#[command(name = "subtrack")]
#[command(version)]
#[command(about = "Inspect multi-track ASS dialogue for language-learning playback")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

fn main() -> Result<()> {
    let options = CommandLineOptions::parse();
    init_logging(options.verbose);

    match options.command {
        Commands::Stats { script, issues } => stats(&script, issues),
        Commands::Tracks { script } => tracks(&script),
        Commands::At { script, time } => at(&script, &time),
        Commands::Nav {
            script,
            time,
            track,
            merge_gap,
        } => nav(&script, &time, track.as_deref(), merge_gap),
        Commands::Search { script, query } => search(&script, &query),
    }
}

/// Install env_logger; `RUST_LOG` overrides the verbosity flag
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load(path: &Path, navigation: NavigationConfig) -> Result<SubtitleTimeline> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let mut timeline = SubtitleTimeline::with_config(ParserConfig::default(), navigation)?;
    let stats = timeline
        .try_parse_bytes(&bytes)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    debug!("loaded {}: {stats}", path.display());
    Ok(timeline)
}

/// Accept plain seconds or an ASS timestamp
fn parse_time(raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|t| t.is_finite())
        .or_else(|| decode_time(raw))
        .with_context(|| format!("Invalid time '{raw}'"))
}

fn stats(path: &Path, list_issues: bool) -> Result<()> {
    let timeline = load(path, NavigationConfig::default())?;
    let stats = timeline.stats();

    if let Some(title) = timeline.metadata().title() {
        println!("Title:   {title}");
    }
    println!("Events:  {}", stats.total_events);
    println!("Tracks:  {} ({})", stats.track_count, stats.track_names.join(", "));
    println!("Styles:  {}", stats.style_count);
    println!("Length:  {}", format_time(stats.max_end_time));
    println!("Ready:   {}", stats.ready);
    println!("Issues:  {} ({} warnings or worse)", stats.issue_count, stats.error_count);

    if list_issues {
        for issue in timeline.issues() {
            println!("  {issue}");
        }
    }
    Ok(())
}

fn tracks(path: &Path) -> Result<()> {
    let timeline = load(path, NavigationConfig::default())?;

    for track in timeline.available_tracks() {
        let count = timeline.events_on_track(track).len();
        match timeline.style_of(track) {
            Some(style) => println!(
                "{track:<16} {count:>6} events  {} {}",
                style.display_color, style.font_size_css
            ),
            None => println!("{track:<16} {count:>6} events  (no style)"),
        }
    }
    Ok(())
}

fn at(path: &Path, raw_time: &str) -> Result<()> {
    let time = parse_time(raw_time)?;
    let timeline = load(path, NavigationConfig::default())?;

    let groups = timeline.active_events_by_track(time);
    if groups.is_empty() {
        println!("Nothing on screen at {}", format_time(time));
    }
    for (track, events) in groups.iter() {
        println!("[{track}]");
        for event in events {
            println!(
                "  {} -> {}  {}",
                event.start_raw,
                event.end_raw,
                event.clean_text.replace('\n', " / ")
            );
        }
    }
    Ok(())
}

fn nav(path: &Path, raw_time: &str, track: Option<&str>, merge_gap: f64) -> Result<()> {
    let time = parse_time(raw_time)?;
    let config = NavigationConfig::default().with_merge_gap_tolerance(merge_gap);
    let timeline = load(path, config)?;

    let show = |label: &str, value: Option<f64>| match value {
        Some(t) => println!("{label:<9}{}", format_time(t)),
        None => println!("{label:<9}-"),
    };

    show("previous", timeline.prev_event_time_on(time, track));
    match timeline.navigable_event_at(time, track) {
        Some(current) => println!(
            "current  {} -> {}  {} ({} merged)",
            format_time(current.start),
            format_time(current.end),
            current.text().replace('\n', " / "),
            current.merged_count
        ),
        None => println!("current  -"),
    }
    show("next", timeline.next_event_time_on(time, track));
    Ok(())
}

fn search(path: &Path, query: &str) -> Result<()> {
    let timeline = load(path, NavigationConfig::default())?;

    let hits = timeline.search(query);
    for event in &hits {
        println!(
            "{} [{}] {}",
            event.start_raw,
            event.track,
            event.clean_text.replace('\n', " / ")
        );
    }
    println!("{} match(es)", hits.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        CommandLineOptions::command().debug_assert();
    }

    #[test]
    fn times_accept_both_forms() {
        assert_eq!(parse_time("12.5").unwrap(), 12.5);
        assert_eq!(parse_time("0:00:12.50").unwrap(), 12.5);
        assert!(parse_time("soon").is_err());
    }
}
