//! statusline-engine: Headless event-timeline logic for the statusline
//!
//! This crate provides the style-free half of the event timeline:
//! - Hook event data model and feed parsing
//! - Single-pass classification (StopUndone, inferred interrupts)
//! - Grouping classified events into context runs
//! - The timeline configuration bundle

pub mod classify;
pub mod config;
pub mod event;
pub mod feed;
pub mod runs;

// Re-export commonly used types
pub use classify::classify;
pub use config::{
    Backgrounds, ConfigError, IconMode, IconSpec, LineBars, RunBrackets, TimelineConfig,
};
pub use event::{names, ClassifiedEvent, HookEvent};
pub use feed::{parse_events, read_events, tail, FeedError};
pub use runs::{group_into_runs, Run, RunContext};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
