//! Text width and cropping utilities.
//!
//! Provides unicode-aware text width calculation and grapheme-safe cropping.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Get the visual width of a string in terminal cells.
///
/// Accounts for wide characters (CJK, emoji) that take 2 cells and
/// combining marks that take none.
pub fn visual_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Keep the rightmost graphemes of `s` that fit in `max_width` cells.
///
/// Returns the kept text and its width. The width can be one less than
/// `max_width` when a wide grapheme straddles the cut; it is never split.
///
/// The kept suffix is measured as a whole, since adjacent graphemes can
/// render narrower together than apart (Arabic lam-alef).
pub fn crop_left(s: &str, max_width: usize) -> (&str, usize) {
    let mut start = s.len();

    for (idx, _) in s.grapheme_indices(true).rev() {
        if visual_width(&s[idx..]) > max_width {
            break;
        }
        start = idx;
    }

    let kept = &s[start..];
    (kept, visual_width(kept))
}
