//! statusline-tui: Styled event timeline for the statusline
//!
//! This crate provides the rendering half of the event timeline, including:
//! - Icon presets and color parsing
//! - Per-event glyphs, run rendering and left-cropping composition
//! - The [`EventTimeline`] renderable and ratatui widget
//! - ANSI materialization for printing a rendered line

pub mod text;
pub mod theme;
#[cfg(test)]
pub mod test_utils;
pub mod timeline;

pub use statusline_engine;
pub use text::{plain_text, to_ansi};
pub use timeline::{EventTimeline, Measurement, Renderable};

use statusline_engine::{HookEvent, TimelineConfig};

/// Render a feed as one printable line.
///
/// Returns `None` when nothing in the feed is drawn.
///
/// # Panics
///
/// Panics if `width` is narrower than the configured frame glyphs.
pub fn render_status_line(
    events: &[HookEvent],
    config: &TimelineConfig,
    width: usize,
    expand: bool,
    color: bool,
) -> Option<String> {
    let timeline = EventTimeline::new(events, config)?.expand(expand);
    let line = timeline.render_line(width);
    Some(to_ansi(&line, color))
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
