//! Per-event glyph resolution.
//!
//! Every classified event maps to at most one [`Glyph`]. Resolution is
//! total: unknown tools fall back to a bullet and unknown events resolve to
//! nothing, so a malformed feed can never fail a render.

use std::collections::BTreeMap;

use ratatui::style::{Color, Style};
use ratatui::text::Span;
use statusline_engine::{names, ClassifiedEvent, IconSpec, TimelineConfig};

use crate::text::visual_width;
use crate::theme::colors::{background, icon_style};
use crate::theme::IconSet;

/// Placeholder drawn for a zero line count. Takes a cell, shows nothing.
pub const EMPTY_BAR: char = '\u{a0}';

/// Fallback for tools without a configured icon.
pub const BULLET: &str = "•";

/// Fallback for the Edit tool when no icon is configured.
pub const EDIT_FALLBACK: &str = "✏";

const TASK_UPDATE: &str = "TaskUpdate";
const TASK_UPDATE_COMPLETED: &str = "TaskUpdate:completed";
const TASK_UPDATE_OTHER: &str = "TaskUpdate:other";

/// How an event is drawn, selected by event name, tool and extra.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphKind {
    /// `PostToolUseFailure` carrying the interrupt flag.
    Interrupt,
    /// Bash tool use; icon picked by command.
    Bash,
    /// Edit tool use; icon plus line-count bars.
    Edit,
    /// Everything else: a tool or event icon lookup.
    Icon,
}

impl GlyphKind {
    /// Pick the kind for an event. First match wins.
    pub fn of(event: &ClassifiedEvent) -> Self {
        if event.raw.is_interrupt_failure() {
            return Self::Interrupt;
        }
        if event.is_tool_use() {
            return match event.tool() {
                Some("Bash") => Self::Bash,
                Some("Edit") => Self::Edit,
                _ => Self::Icon,
            };
        }
        Self::Icon
    }
}

/// One or more styled spans with a cached cell width.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub spans: Vec<Span<'static>>,
    pub width: usize,
}

impl Glyph {
    /// Build a glyph, measuring its spans.
    pub fn new(spans: Vec<Span<'static>>) -> Self {
        let width = spans.iter().map(|span| visual_width(&span.content)).sum();
        Self { spans, width }
    }

    /// Concatenated glyph text.
    pub fn text(&self) -> String {
        self.spans.iter().map(|span| span.content.as_ref()).collect()
    }
}

#[derive(Debug, Clone)]
struct Icon {
    text: String,
    style: Style,
}

impl Icon {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            style: Style::default(),
        }
    }

    fn span(&self) -> Span<'static> {
        Span::styled(self.text.clone(), self.style)
    }
}

/// Resolves classified events to glyphs for one configuration.
#[derive(Debug, Clone)]
pub struct GlyphResolver {
    tool_icons: BTreeMap<String, Icon>,
    event_icons: BTreeMap<String, Icon>,
    bash_icons: BTreeMap<String, Icon>,
    bar_chars: Vec<char>,
    bar_thresholds: Vec<i64>,
    bar_background: Style,
}

impl GlyphResolver {
    /// Layer the configured icon overrides over the preset for its icon mode.
    pub fn new(config: &TimelineConfig) -> Self {
        let preset = IconSet::new(config.icon_mode);
        Self {
            tool_icons: merge_icons(preset.tool_icons(), &config.tool_icons),
            event_icons: merge_icons(preset.event_icons(), &config.event_icons),
            bash_icons: merge_icons(preset.bash_icons(), &config.bash_icons),
            bar_chars: config.line_bars.char_list(),
            bar_thresholds: config.line_bars.thresholds.clone(),
            bar_background: background(&config.backgrounds.edit_bar),
        }
    }

    /// Resolve one event. `None` means the event is not drawn.
    pub fn resolve(&self, event: &ClassifiedEvent) -> Option<Glyph> {
        let spans = match GlyphKind::of(event) {
            GlyphKind::Interrupt => vec![self.event_icons.get(names::INTERRUPT)?.span()],
            GlyphKind::Bash => vec![self.bash_icon(event.extra()).span()],
            GlyphKind::Edit => self.edit_spans(event.extra()),
            GlyphKind::Icon if event.is_tool_use() => vec![self.tool_icon(event).span()],
            GlyphKind::Icon => vec![self.event_icons.get(&event.effective_event)?.span()],
        };
        Some(Glyph::new(spans))
    }

    fn bash_icon(&self, extra: Option<&str>) -> Icon {
        extra
            .and_then(|command| command.split_whitespace().next())
            .and_then(|word| word.rsplit('/').next())
            .and_then(|name| self.bash_icons.get(name))
            .or_else(|| self.tool_icons.get("Bash"))
            .cloned()
            .unwrap_or_else(|| Icon::plain(BULLET))
    }

    fn tool_icon(&self, event: &ClassifiedEvent) -> Icon {
        let tool = event.tool().unwrap_or_default();
        let status_key = match (tool, event.extra().and_then(|e| e.strip_prefix("status="))) {
            (TASK_UPDATE, Some("completed")) => Some(TASK_UPDATE_COMPLETED),
            (TASK_UPDATE, Some(_)) => Some(TASK_UPDATE_OTHER),
            _ => None,
        };
        status_key
            .and_then(|key| self.tool_icons.get(key))
            .or_else(|| self.tool_icons.get(tool))
            .cloned()
            .unwrap_or_else(|| Icon::plain(BULLET))
    }

    fn edit_spans(&self, extra: Option<&str>) -> Vec<Span<'static>> {
        let icon = self
            .tool_icons
            .get("Edit")
            .cloned()
            .unwrap_or_else(|| Icon::plain(EDIT_FALLBACK));
        let mut spans = vec![icon.span()];

        if let Some((added, removed)) = extra.and_then(parse_line_counts) {
            for (count, color) in [(added, Color::Green), (removed, Color::Red)] {
                let bar = bucket(count, &self.bar_thresholds, &self.bar_chars);
                let style = Style::default().fg(color).patch(self.bar_background);
                spans.push(Span::styled(bar.to_string(), style));
            }
        }
        spans
    }
}

/// Preset icons with overrides applied. Empty text removes an icon.
fn merge_icons(
    mut preset: BTreeMap<String, IconSpec>,
    overrides: &BTreeMap<String, IconSpec>,
) -> BTreeMap<String, Icon> {
    preset.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    preset
        .into_iter()
        .filter(|(_, spec)| !spec.text().is_empty())
        .map(|(name, spec)| {
            let icon = Icon {
                text: spec.text().to_string(),
                style: icon_style(&spec),
            };
            (name, icon)
        })
        .collect()
}

/// Parse an Edit `extra` of the form `+<added>-<removed>`.
///
/// Empty counts are zero and pieces past the second are ignored. Returns
/// `None` when the prefix is missing or a count is not an integer.
pub fn parse_line_counts(extra: &str) -> Option<(i64, i64)> {
    let mut pieces = extra.strip_prefix('+')?.split('-');
    let added = parse_count(pieces.next().unwrap_or_default())?;
    let removed = parse_count(pieces.next().unwrap_or_default())?;
    Some((added, removed))
}

fn parse_count(piece: &str) -> Option<i64> {
    if piece.is_empty() {
        return Some(0);
    }
    piece.trim().parse().ok()
}

/// Bar character for a line count.
///
/// Counts of zero or less draw [`EMPTY_BAR`]. Otherwise the first bucket
/// whose threshold exceeds `n` wins, and counts past every threshold clamp
/// to the last character.
///
/// # Panics
///
/// Panics if `thresholds` and `chars` differ in length or are empty.
pub fn bucket(n: i64, thresholds: &[i64], chars: &[char]) -> char {
    assert_eq!(
        thresholds.len(),
        chars.len(),
        "line bar thresholds and chars must have the same length"
    );
    assert!(!chars.is_empty(), "line bars need at least one bucket");

    if n <= 0 {
        return EMPTY_BAR;
    }
    thresholds
        .iter()
        .zip(chars)
        .find(|(threshold, _)| n < **threshold)
        .map_or(chars[chars.len() - 1], |(_, c)| *c)
}
