//! Rendering one run as a bracketed, padded, background-styled span list.

use ratatui::style::Style;
use ratatui::text::Span;
use statusline_engine::{Run, RunContext, TimelineConfig};

use super::glyph::{Glyph, GlyphResolver};
use crate::theme::colors::background;

/// Per-context styling for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStyle {
    pub background: Style,
    pub open: String,
    pub close: String,
    pub spacing: usize,
}

impl RunStyle {
    /// Style for a context under a configuration.
    pub fn for_context(config: &TimelineConfig, context: RunContext) -> Self {
        let (open, close) = config.brackets_for(context);
        Self {
            background: background(config.background_for(context)),
            open: open.to_string(),
            close: close.to_string(),
            spacing: config.spacing,
        }
    }

    /// Padding around a run's glyphs: spacing rounded up to even.
    ///
    /// Half goes on each side, so two adjacent runs never show a wider gap
    /// than `spacing` rounded up.
    pub fn boundary_padding(&self) -> usize {
        self.spacing + self.spacing % 2
    }
}

/// Render a run as `[open][pad]glyph[spacing]glyph...[pad][close]`.
///
/// The background covers everything between the brackets. A glyph's own
/// style wins where it sets a background (edit bars). Returns `None` when no
/// event in the run resolves to a glyph.
pub fn render_run(
    run: &Run,
    resolver: &GlyphResolver,
    style: &RunStyle,
) -> Option<Vec<Span<'static>>> {
    let glyphs: Vec<Glyph> = run.events.iter().filter_map(|e| resolver.resolve(e)).collect();
    if glyphs.is_empty() {
        return None;
    }

    let half = style.boundary_padding() / 2;
    let mut spans = Vec::with_capacity(glyphs.len() * 2 + 4);

    if !style.open.is_empty() {
        spans.push(Span::raw(style.open.clone()));
    }
    if half > 0 {
        spans.push(Span::styled(" ".repeat(half), style.background));
    }
    for (i, glyph) in glyphs.into_iter().enumerate() {
        if i > 0 && style.spacing > 0 {
            spans.push(Span::styled(" ".repeat(style.spacing), style.background));
        }
        spans.extend(
            glyph
                .spans
                .into_iter()
                .map(|span| Span::styled(span.content, style.background.patch(span.style))),
        );
    }
    if half > 0 {
        spans.push(Span::styled(" ".repeat(half), style.background));
    }
    if !style.close.is_empty() {
        spans.push(Span::raw(style.close.clone()));
    }
    Some(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;
    use statusline_engine::{classify, group_into_runs, names, HookEvent, IconMode};

    fn ascii_config() -> TimelineConfig {
        TimelineConfig {
            icon_mode: IconMode::Ascii,
            ..TimelineConfig::default()
        }
    }

    fn text(spans: &[Span<'_>]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn main_run(events: &[HookEvent]) -> Run {
        let runs = group_into_runs(classify(events));
        assert_eq!(runs.len(), 1);
        runs.into_iter().next().unwrap()
    }

    #[test]
    fn test_boundary_padding_rounds_up_to_even() {
        let padding = |spacing| {
            RunStyle {
                background: Style::default(),
                open: String::new(),
                close: String::new(),
                spacing,
            }
            .boundary_padding()
        };
        assert_eq!(padding(0), 0);
        assert_eq!(padding(1), 2);
        assert_eq!(padding(2), 2);
        assert_eq!(padding(3), 4);
    }

    #[test]
    fn test_spacing_and_padding() {
        let config = ascii_config();
        let run = main_run(&[HookEvent::tool("Read"), HookEvent::tool("Write")]);
        let style = RunStyle::for_context(&config, run.context);
        let spans = render_run(&run, &GlyphResolver::new(&config), &style).unwrap();
        assert_eq!(text(&spans), " R W ");
    }

    #[test]
    fn test_brackets_are_unstyled() {
        let config = TimelineConfig {
            brackets: true,
            spacing: 0,
            ..ascii_config()
        };
        let run = main_run(&[HookEvent::tool("Read"), HookEvent::new(names::STOP)]);
        let style = RunStyle::for_context(&config, run.context);
        let spans = render_run(&run, &GlyphResolver::new(&config), &style).unwrap();

        assert_eq!(text(&spans), "[RS]");
        let bg = Color::Rgb(0x2a, 0x3a, 0x2a);
        assert_eq!(spans[0].style, Style::default());
        assert_eq!(spans[1].style.bg, Some(bg));
        assert_eq!(spans[2].style.bg, Some(bg));
        assert_eq!(spans[3].style, Style::default());
    }

    #[test]
    fn test_glyph_style_wins_over_background() {
        let config = TimelineConfig {
            spacing: 0,
            ..ascii_config()
        };
        let run = main_run(&[HookEvent::tool("Edit").with_extra("+3-0")]);
        let style = RunStyle::for_context(&config, run.context);
        let spans = render_run(&run, &GlyphResolver::new(&config), &style).unwrap();

        assert_eq!(text(&spans), "E▃\u{a0}");
        assert_eq!(spans[0].style.bg, Some(Color::Rgb(0x2a, 0x3a, 0x2a)));
        assert_eq!(spans[1].style.bg, Some(Color::Rgb(0x4c, 0x4d, 0x4e)));
    }

    #[test]
    fn test_run_without_glyphs_is_dropped() {
        let config = TimelineConfig {
            brackets: true,
            ..ascii_config()
        };
        let run = main_run(&[HookEvent::new("Notification"), HookEvent::new("PreCompact")]);
        let style = RunStyle::for_context(&config, run.context);
        assert_eq!(render_run(&run, &GlyphResolver::new(&config), &style), None);
    }

    #[test]
    fn test_undrawn_events_leave_no_gap() {
        let config = ascii_config();
        let run = main_run(&[
            HookEvent::tool("Read"),
            HookEvent::new("Notification"),
            HookEvent::tool("Read"),
        ]);
        let style = RunStyle::for_context(&config, run.context);
        let spans = render_run(&run, &GlyphResolver::new(&config), &style).unwrap();
        assert_eq!(text(&spans), " R R ");
    }
}
