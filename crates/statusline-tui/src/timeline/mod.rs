//! Event timeline rendering.
//!
//! This module provides:
//! - [`GlyphResolver`] - Maps one classified event to a styled [`Glyph`]
//! - [`render_run`] - Draws a run with brackets, padding and background
//! - [`TruncateLeft`] - Crops styled content from the left to a cell budget
//! - [`EventTimeline`] - The full pipeline as a [`Renderable`] and ratatui widget

mod compositor;
mod glyph;
mod run;
mod widget;

pub use compositor::{Measurement, Renderable, TruncateLeft};
pub use glyph::{
    bucket, parse_line_counts, Glyph, GlyphKind, GlyphResolver, BULLET, EDIT_FALLBACK, EMPTY_BAR,
};
pub use run::{render_run, RunStyle};
pub use widget::EventTimeline;
