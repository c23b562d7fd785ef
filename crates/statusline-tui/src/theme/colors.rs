//! Color strings from configuration to ratatui styles.
//!
//! Accepts anything ratatui's color parser does: names (`red`, `lightblue`,
//! `darkgray`), hex (`#2a3a2a`) and palette indices (`208`).

use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};
use statusline_engine::IconSpec;
use tracing::warn;

/// Parse a configured color. Empty strings mean "no color".
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match Color::from_str(value) {
        Ok(color) => Some(color),
        Err(_) => {
            warn!(color = value, "Ignoring unparseable color");
            None
        }
    }
}

/// Background-only style for a configured color.
pub fn background(value: &str) -> Style {
    parse_color(value).map_or_else(Style::default, |color| Style::default().bg(color))
}

/// Foreground style for a configured icon.
pub fn icon_style(spec: &IconSpec) -> Style {
    let mut style = spec
        .fg()
        .and_then(parse_color)
        .map_or_else(Style::default, |color| Style::default().fg(color));
    if spec.is_bold() {
        style = style.add_modifier(Modifier::BOLD);
    }
    style
}
