//! Left-cropping styled content to a cell budget.
//!
//! Layout is two-phase: a parent first asks every child for its
//! [`Measurement`], assigns widths, then asks each child to render at the
//! width it was given. [`TruncateLeft`] answers both against the same
//! content, keeping the most recent (rightmost) cells when it must crop.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::text::{crop_left, visual_width};

/// Width range a renderable accepts, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    pub minimum: usize,
    pub maximum: usize,
}

impl Measurement {
    /// A box that is exactly `width` cells.
    pub fn fixed(width: usize) -> Self {
        Self {
            minimum: width,
            maximum: width,
        }
    }
}

/// Something a row layout can size and then draw as one line.
pub trait Renderable {
    /// Report the acceptable width range given the widest the parent offers.
    fn measure(&self, max_width: usize) -> Measurement;

    /// Render at an assigned width.
    fn render_line(&self, width: usize) -> Line<'static>;
}

/// Styled content that crops from the left when it does not fit.
///
/// With `expand` set, content narrower than the assigned width is left-padded
/// so it stays right-anchored and the output fills the width exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct TruncateLeft {
    spans: Vec<Span<'static>>,
    widths: Vec<usize>,
    style: Style,
    width: usize,
    expand: bool,
}

impl TruncateLeft {
    /// Wrap a line. Span widths are measured once here.
    pub fn new(line: Line<'static>) -> Self {
        let widths: Vec<usize> = line.spans.iter().map(|s| visual_width(&s.content)).collect();
        Self {
            width: widths.iter().sum(),
            widths,
            style: line.style,
            spans: line.spans,
            expand: false,
        }
    }

    /// Set whether to fill the assigned width.
    #[must_use]
    pub fn expand(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }

    /// Width of the full content in cells.
    pub fn content_width(&self) -> usize {
        self.width
    }

    /// Keep the rightmost `available` cells.
    ///
    /// Whole spans are kept right to left while they fit; the first span that
    /// overflows keeps its rightmost cells in its own style and everything
    /// before it is dropped. A wide grapheme straddling the cut is replaced
    /// by a space so the result is exactly `available` cells.
    fn crop(&self, available: usize) -> Vec<Span<'static>> {
        let mut remaining = available;
        let mut kept = Vec::new();

        for (span, &width) in self.spans.iter().zip(&self.widths).rev() {
            if width <= remaining {
                kept.push(span.clone());
                remaining -= width;
                continue;
            }
            if remaining > 0 {
                let (tail, tail_width) = crop_left(&span.content, remaining);
                let text = format!("{}{tail}", " ".repeat(remaining - tail_width));
                kept.push(Span::styled(text, span.style));
            }
            break;
        }

        kept.reverse();
        kept
    }
}

impl Renderable for TruncateLeft {
    fn measure(&self, max_width: usize) -> Measurement {
        if self.expand {
            Measurement {
                minimum: 0,
                maximum: max_width,
            }
        } else {
            Measurement::fixed(self.width)
        }
    }

    fn render_line(&self, width: usize) -> Line<'static> {
        let spans = if self.width > width {
            self.crop(width)
        } else if self.expand && self.width < width {
            let mut spans = Vec::with_capacity(self.spans.len() + 1);
            spans.push(Span::raw(" ".repeat(width - self.width)));
            spans.extend(self.spans.iter().cloned());
            spans
        } else {
            self.spans.clone()
        };
        Line::from(spans).style(self.style)
    }
}
