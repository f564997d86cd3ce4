// kara_explore - poke at a catalogue from the terminal
// Prints exactly the sections the browse screen would render

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use kara_explore::{
    catalogue::load_catalogue,
    config::Config,
    explore::{explore, filter_token, grouper::sorted_values, room_track_list, track_info, Section, TrackGrouper},
};

#[derive(Parser)]
#[command(name = "kara_explore")]
#[command(about = "Browse a karaoke catalogue by search text and tag filters")]
struct Args {
    /// Path to tracks.json
    catalogue: PathBuf,

    /// Filter token, eg "category:anime" (repeatable, applied in order)
    #[arg(short, long = "filter")]
    filters: Vec<String>,

    /// Free text search; "tag:value" words become filters
    #[arg(short, long, default_value = "")]
    search: String,

    /// Config file to use instead of the user config dir
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write daily rotated logs here instead of stderr
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Print sections as JSON
    #[arg(long)]
    json: bool,
}

fn init_logging(log_dir: Option<&PathBuf>) -> Result<()> {
    // Base filter: info level for general logs, debug for kara_explore
    let base_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,kara_explore=debug"));

    match log_dir {
        Some(log_dir) => {
            std::fs::create_dir_all(log_dir)?;
            let file_appender = tracing_appender::rolling::daily(log_dir, "kara_explore.log");
            let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

            let subscriber = tracing_subscriber::fmt()
                .with_writer(file_writer)
                .with_target(true)
                .with_ansi(false)
                .with_env_filter(base_filter)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;

            // Keep the writer alive for the life of the process
            std::mem::forget(guard);
        }
        None => {
            let subscriber = tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_env_filter(base_filter)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    Ok(())
}

fn print_section(filters: &[String], heading: &str, section: &Section) {
    println!("== {} ==", heading);
    match section {
        Section::Tracks(tracks) => {
            for track in tracks {
                let info = track_info(filters, track);
                if info.is_empty() {
                    println!("  {}", track.title());
                } else {
                    println!("  {}  ({})", track.title(), info);
                }
            }
        }
        Section::Filters(values) => {
            for value in sorted_values(values) {
                println!("  {} [{}]", filter_token(heading, value), values[value]);
            }
        }
        Section::Groups(groups) => {
            for (letter, values) in groups {
                let names: Vec<&str> = sorted_values(values);
                println!("  {}: {}", letter, names.join(", "));
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_dir.as_ref())?;

    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => Config::load()?,
    };
    debug!(?config, "Config loaded");

    let catalogue = load_catalogue(&args.catalogue)
        .with_context(|| format!("loading catalogue {}", args.catalogue.display()))?;
    let tracks = room_track_list(&catalogue, &config.room.hidden_tags, &config.room.forced_tags);
    info!("{} of {} tracks visible in this room", tracks.len(), catalogue.len());

    let grouper = TrackGrouper::new(config.explore.clone());
    let sections = explore(&grouper, &tracks, &args.filters, &args.search);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&sections)?);
    } else {
        for (heading, section) in &sections {
            print_section(&args.filters, heading, section);
        }
    }

    Ok(())
}
