//! The composed event timeline.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};
use statusline_engine::{classify, group_into_runs, HookEvent, TimelineConfig};
use tracing::debug;

use super::compositor::{Measurement, Renderable, TruncateLeft};
use super::glyph::GlyphResolver;
use super::run::{render_run, RunStyle};
use crate::text::visual_width;
use crate::theme::colors::background;

/// Event timeline: `left` + background + cropped runs + `right`.
///
/// Built fresh from a feed on every refresh; holds no state between calls.
#[derive(Debug, Clone)]
pub struct EventTimeline {
    content: TruncateLeft,
    left: String,
    right: String,
    background: Style,
    runs: usize,
    expand: bool,
}

impl EventTimeline {
    /// Classify, group and render a feed.
    ///
    /// Returns `None` when nothing in the feed resolves to a glyph.
    pub fn new(events: &[HookEvent], config: &TimelineConfig) -> Option<Self> {
        let classified = classify(events);
        let runs = group_into_runs(classified);
        let resolver = GlyphResolver::new(config);

        let rendered: Vec<Vec<Span<'static>>> = runs
            .iter()
            .filter_map(|run| render_run(run, &resolver, &RunStyle::for_context(config, run.context)))
            .collect();
        debug!(
            events = events.len(),
            runs = runs.len(),
            drawn = rendered.len(),
            "Composed event timeline"
        );
        if rendered.is_empty() {
            return None;
        }

        Some(Self {
            runs: rendered.len(),
            content: TruncateLeft::new(Line::from(rendered.concat())),
            left: config.left.clone(),
            right: config.right.clone(),
            background: config.background.as_deref().map(background).unwrap_or_default(),
            expand: false,
        })
    }

    /// Set whether to fill the assigned width.
    #[must_use]
    pub fn expand(mut self, expand: bool) -> Self {
        self.content = self.content.expand(expand);
        self.expand = expand;
        self
    }

    /// Number of runs that produced glyphs.
    pub fn run_count(&self) -> usize {
        self.runs
    }

    /// Width of the outer frame glyphs.
    pub fn frame_width(&self) -> usize {
        visual_width(&self.left) + visual_width(&self.right)
    }

    /// Width of the uncropped runs, without the frame.
    pub fn content_width(&self) -> usize {
        self.content.content_width()
    }
}

impl Renderable for EventTimeline {
    fn measure(&self, max_width: usize) -> Measurement {
        let frame = self.frame_width();
        if self.expand {
            Measurement {
                minimum: frame,
                maximum: max_width.max(frame),
            }
        } else {
            Measurement::fixed(frame + self.content_width())
        }
    }

    /// # Panics
    ///
    /// Panics if `width` cannot fit the frame glyphs.
    fn render_line(&self, width: usize) -> Line<'static> {
        let frame = self.frame_width();
        assert!(
            width >= frame,
            "timeline width {width} is narrower than its frame ({frame})"
        );

        let inner = self.content.render_line(width - frame);
        let inner_style = inner.style;
        let mut spans = Vec::with_capacity(inner.spans.len() + 2);
        if !self.left.is_empty() {
            spans.push(Span::raw(self.left.clone()));
        }
        spans.extend(inner.spans.into_iter().map(|span| {
            let style = self.background.patch(inner_style).patch(span.style);
            Span::styled(span.content, style)
        }));
        if !self.right.is_empty() {
            spans.push(Span::raw(self.right.clone()));
        }
        Line::from(spans)
    }
}

impl Widget for &EventTimeline {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let width = usize::from(area.width).max(self.frame_width());
        let line = self.render_line(width);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
