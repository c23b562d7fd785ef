//! Test utilities for statusline-tui rendering tests.
//!
//! This module provides fixture configurations and buffer-to-string
//! conversion for snapshot testing.

use ratatui::buffer::Buffer;
use statusline_engine::{IconMode, TimelineConfig};

/// Default configuration with the ASCII icon preset, so snapshots stay
/// readable and independent of installed fonts.
pub fn ascii_config() -> TimelineConfig {
    TimelineConfig {
        icon_mode: IconMode::Ascii,
        ..TimelineConfig::default()
    }
}

/// Convert a buffer to a string representation for snapshot testing.
///
/// Each row becomes a line with trailing whitespace trimmed.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            let cell = buffer.cell((x, y)).unwrap();
            result.push_str(cell.symbol());
        }
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    if result.ends_with('\n') {
        result.pop();
    }

    result
}
