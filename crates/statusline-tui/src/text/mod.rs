//! Text rendering utilities.
//!
//! This module provides shared text functionality:
//! - [`visual_width`], [`crop_left`] - Cell-width measurement and grapheme-safe cropping
//! - [`to_ansi`], [`plain_text`] - Materializing styled lines for output

mod ansi;
mod width;

pub use ansi::{plain_text, to_ansi};
pub use width::{crop_left, visual_width};
