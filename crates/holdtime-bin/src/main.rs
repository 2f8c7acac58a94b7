// holdtime: per-lane hold-time histograms for osu!mania replays.

mod logging;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};

use holdtime_core::{AppConfig, AppState, Report};
use output::{has_replay_extension, numbered_output};

#[derive(Parser, Debug)]
#[command(name = "holdtime", about = "Hold-time histograms for osu!mania replays")]
struct Args {
    /// Replay files (.osr) to analyse, in order.
    replays: Vec<PathBuf>,

    /// Path to config JSON file.
    #[arg(long, env = "HOLDTIME_CONFIG", default_value = "holdtime.json")]
    config: PathBuf,

    /// Write the histogram chart as PNG to this path.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the report as JSON instead of a table.
    #[arg(long)]
    json: bool,

    /// Write the effective config back to the config path.
    #[arg(long)]
    save_config: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_logging(args.verbose);

    let config = AppConfig::load_from(&args.config)
        .with_context(|| format!("Failed to load config {}", args.config.display()))?;
    if args.save_config {
        config.save_to(&args.config)?;
        info!("Saved config to {}", args.config.display());
    }

    let mut state = AppState::new();

    if args.replays.is_empty() {
        // Same notice as pressing generate before choosing a file.
        if let Err(e) = state.generate(&config) {
            warn!("{e}");
        }
        return Ok(());
    }

    let total = args.replays.len();
    for (index, path) in args.replays.iter().enumerate() {
        if !has_replay_extension(path) {
            warn!("{} does not look like an .osr replay", path.display());
        }

        if let Err(e) = state.load(path) {
            error!("{}: {e}", path.display());
            continue;
        }

        match state.generate(&config) {
            Ok(report) => {
                if let Err(e) = emit(&report, &args, &config, index, total) {
                    error!("{e:#}");
                }
            }
            Err(e) => warn!("{e}"),
        }
    }

    Ok(())
}

fn emit(
    report: &Report,
    args: &Args,
    config: &AppConfig,
    index: usize,
    total: usize,
) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", report.to_table());
        for summary in &report.summaries {
            info!("{}", summary.legend_label());
        }
    }

    if let Some(base) = &args.output {
        report.save_png(&numbered_output(base, index, total), &config.chart)?;
    }
    Ok(())
}
