//! statusline CLI: Render hook event feeds as a compact glyph timeline

use clap::{Args, Parser, Subcommand};
use statusline_engine::{
    classify, engine_version, group_into_runs, read_events, tail, HookEvent, TimelineConfig,
};
use statusline_tui::{to_ansi, tui_version, EventTimeline, Renderable};
use std::fmt::Display;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "STATUSLINE_LOG";

/// Width used when neither `--width` nor `COLUMNS` is set.
const DEFAULT_WIDTH: usize = 80;

/// Render assistant hook events as a status-line timeline
#[derive(Parser)]
#[command(name = "statusline")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the timeline (default when no command specified)
    Render(RenderArgs),

    /// Print classified runs for a feed
    Runs {
        /// Event feed file, or `-` for stdin
        #[arg(long)]
        events: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the default configuration as JSON
    Config,
}

#[derive(Args, Default)]
struct RenderArgs {
    /// Event feed file, or `-` for stdin
    #[arg(long)]
    events: Option<PathBuf>,

    /// Timeline configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Available width in cells (default: $COLUMNS or 80)
    #[arg(long)]
    width: Option<usize>,

    /// Fill the width, right-anchoring the timeline
    #[arg(long)]
    expand: bool,

    /// Show at most this many recent events, 0 for all (default: from config)
    #[arg(long)]
    limit: Option<usize>,

    /// Print without ANSI colors
    #[arg(long)]
    no_color: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);
    debug!(versions = %component_versions(), "Starting statusline");

    match cli.command {
        None => cmd_render(RenderArgs::default()),
        Some(Commands::Render(args)) => cmd_render(args),
        Some(Commands::Runs { events, json }) => cmd_runs(events.as_deref(), json),
        Some(Commands::Config) => cmd_config(),
    }
}

/// Install a stderr subscriber; stdout carries the status line.
fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Library versions, logged at startup under `--debug`.
fn component_versions() -> String {
    format!("engine {}, tui {}", engine_version(), tui_version())
}

/// Print an error and exit with status 1.
fn fail(context: &str, err: impl Display) -> ! {
    eprintln!("statusline: {context}: {err}");
    std::process::exit(1);
}

fn load_config(path: Option<&Path>) -> TimelineConfig {
    match path {
        Some(path) => TimelineConfig::load(path)
            .unwrap_or_else(|e| fail(&format!("config {}", path.display()), e)),
        None => TimelineConfig::default(),
    }
}

fn load_events(path: Option<&Path>) -> Vec<HookEvent> {
    let result = match path {
        None => read_events(io::stdin().lock()),
        Some(path) if path == Path::new("-") => read_events(io::stdin().lock()),
        Some(path) => match File::open(path) {
            Ok(file) => read_events(file),
            Err(e) => fail(&format!("events {}", path.display()), e),
        },
    };
    result.unwrap_or_else(|e| fail("events", e))
}

/// Width from `--width`, then `COLUMNS`, then the default.
fn resolve_width(width: Option<usize>, columns: Option<&str>) -> usize {
    width
        .or_else(|| columns.and_then(|c| c.trim().parse().ok()))
        .unwrap_or(DEFAULT_WIDTH)
}

fn cmd_render(args: RenderArgs) {
    let config = load_config(args.config.as_deref());
    let events = load_events(args.events.as_deref());

    // Expanding shows the whole feed; otherwise only the most recent events.
    let events = if args.expand {
        &events[..]
    } else {
        tail(&events, args.limit.unwrap_or(config.limit))
    };

    let Some(timeline) = EventTimeline::new(events, &config) else {
        debug!("Nothing to render");
        return;
    };
    let timeline = timeline.expand(args.expand);

    let columns = std::env::var("COLUMNS").ok();
    let available = resolve_width(args.width, columns.as_deref());
    let width = available
        .min(timeline.measure(available).maximum)
        .max(timeline.frame_width());
    debug!(available, width, "Rendering timeline");

    let line = timeline.render_line(width);
    println!("{}", to_ansi(&line, !args.no_color));
}

fn cmd_runs(path: Option<&Path>, json: bool) {
    let events = load_events(path);
    let runs = group_into_runs(classify(&events));

    if json {
        match serde_json::to_string_pretty(&runs) {
            Ok(out) => println!("{out}"),
            Err(e) => fail("runs", e),
        }
        return;
    }

    for run in &runs {
        let names: Vec<&str> = run.events.iter().map(|e| e.effective_event.as_str()).collect();
        let context = format!("{:?}", run.context).to_lowercase();
        match &run.agent_id {
            Some(agent) => println!("{context:<8} [{agent}] {}", names.join(" ")),
            None => println!("{context:<8} {}", names.join(" ")),
        }
    }
}

fn cmd_config() {
    match serde_json::to_string_pretty(&TimelineConfig::default()) {
        Ok(out) => println!("{out}"),
        Err(e) => fail("config", e),
    }
}
