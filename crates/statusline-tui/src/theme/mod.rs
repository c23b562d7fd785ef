//! Theme components for the timeline.
//!
//! This module provides:
//! - [`IconSet`] - Built-in icon tables with Nerd/Unicode/ASCII modes
//! - Color parsing from configuration strings to ratatui styles

pub mod colors;
mod icons;

pub use icons::IconSet;
