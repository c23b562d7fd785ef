//! Built-in icon tables for Nerd Fonts, Unicode, and ASCII fallback.
//!
//! Many Nerd Font glyphs draw wider than the single cell the terminal
//! reserves for them, so every Nerd icon carries a trailing space as part of
//! the icon itself.

use std::collections::BTreeMap;

use statusline_engine::{names, IconMode, IconSpec};

/// Icon preset for a mode.
#[derive(Debug, Clone)]
pub struct IconSet {
    mode: IconMode,
}

impl Default for IconSet {
    fn default() -> Self {
        Self::new(IconMode::default())
    }
}

/// One preset entry: name, Nerd glyph, Unicode glyph, ASCII glyph, color.
type Entry = (&'static str, &'static str, &'static str, &'static str, &'static str);

const TOOL_ICONS: &[Entry] = &[
    ("Bash", "\u{ea85} ", "$", "$", "darkgray"),
    ("Edit", "\u{f4d2} ", "✎", "E", "yellow"),
    ("Write", "\u{ea7f} ", "✚", "W", "green"),
    ("Read", "\u{f0dca} ", "◉", "R", "cyan"),
    ("Glob", "\u{f002} ", "⌕", "G", "blue"),
    ("Grep", "\u{f002} ", "⌕", "?", "blue"),
    ("Task", "\u{eab3} ", "☰", "T", "magenta"),
    ("TaskUpdate", "\u{f0ae} ", "☐", "t", "yellow"),
    ("TaskUpdate:completed", "\u{f058} ", "✓", "v", "green"),
    ("TaskUpdate:other", "\u{f110} ", "~", "~", "yellow"),
    ("WebFetch", "\u{eb01} ", "◎", "@", "cyan"),
    ("WebSearch", "\u{eb01} ", "◎", "@", "cyan"),
];

const BASH_ICONS: &[Entry] = &[
    ("git", "\u{e702} ", "±", "g", "#f05032"),
    ("cargo", "\u{e7a8} ", "⚙", "c", "#dea584"),
    ("uv", "\u{e73c} ", "π", "p", "green"),
    ("python", "\u{e73c} ", "π", "p", "green"),
    ("python3", "\u{e73c} ", "π", "p", "green"),
    ("pytest", "\u{e87a} ", "✔", "t", "yellow"),
    ("npm", "\u{e71e} ", "⬢", "n", "red"),
    ("node", "\u{e71e} ", "⬢", "n", "green"),
    ("docker", "\u{e7b0} ", "▣", "d", "#2496ed"),
    ("make", "\u{f0ad} ", "⚒", "m", "darkgray"),
    ("sqlite3", "\u{f472} ", "⛁", "q", "blue"),
    ("sleep", "\u{f04b2} ", "z", "z", "yellow"),
    ("rm", "\u{f01b4} ", "✂", "x", "red"),
];

const EVENT_ICONS: &[Entry] = &[
    (names::SUBAGENT_START, "\u{f0443} ", "▶", ">", "blue"),
    (names::SUBAGENT_STOP, "\u{f0441} ", "◀", "<", "blue"),
    (names::USER_PROMPT_SUBMIT, "\u{f007} ", "»", "U", "white"),
    (names::STOP, "\u{f4f0} ", "✓", "S", "green"),
    (names::STOP_UNDONE, "\u{f0e2} ", "↺", "~", "yellow"),
    (names::INTERRUPT, "\u{e009} ", "✗", "X", "red"),
];

impl IconSet {
    /// Create a new icon set with the specified mode.
    pub fn new(mode: IconMode) -> Self {
        Self { mode }
    }

    /// Get the current icon mode.
    pub fn mode(&self) -> IconMode {
        self.mode
    }

    /// Tool icons keyed by tool name.
    pub fn tool_icons(&self) -> BTreeMap<String, IconSpec> {
        self.table(TOOL_ICONS)
    }

    /// Bash command icons keyed by command basename.
    pub fn bash_icons(&self) -> BTreeMap<String, IconSpec> {
        self.table(BASH_ICONS)
    }

    /// Event icons keyed by effective event name.
    pub fn event_icons(&self) -> BTreeMap<String, IconSpec> {
        self.table(EVENT_ICONS)
    }

    fn table(&self, entries: &[Entry]) -> BTreeMap<String, IconSpec> {
        entries
            .iter()
            .map(|&(name, nerd, unicode, ascii, color)| {
                let text = match self.mode {
                    IconMode::Nerd => nerd,
                    IconMode::Unicode => unicode,
                    IconMode::Ascii => ascii,
                };
                let spec = if name == names::SUBAGENT_START || name == names::SUBAGENT_STOP {
                    IconSpec::bold(text, color)
                } else {
                    IconSpec::colored(text, color)
                };
                (name.to_string(), spec)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_nerd() {
        let icons = IconSet::default();
        assert_eq!(icons.mode(), IconMode::Nerd);
    }

    #[test]
    fn test_nerd_icons_carry_trailing_space() {
        let icons = IconSet::new(IconMode::Nerd);
        for spec in icons.tool_icons().values().chain(icons.event_icons().values()) {
            assert!(spec.text().ends_with(' '), "{spec:?}");
        }
    }

    #[test]
    fn test_ascii_icons() {
        let icons = IconSet::new(IconMode::Ascii);
        assert_eq!(icons.tool_icons()["Read"].text(), "R");
        assert_eq!(icons.event_icons()["Stop"].text(), "S");
        assert_eq!(icons.bash_icons()["git"].text(), "g");
    }

    #[test]
    fn test_unicode_icons() {
        let icons = IconSet::new(IconMode::Unicode);
        assert_eq!(icons.event_icons()["Stop"].text(), "✓");
        assert_eq!(icons.event_icons()["Interrupt"].text(), "✗");
    }

    #[test]
    fn test_every_synthetic_event_has_an_icon() {
        for mode in [IconMode::Nerd, IconMode::Unicode, IconMode::Ascii] {
            let events = IconSet::new(mode).event_icons();
            assert!(events.contains_key(names::STOP_UNDONE));
            assert!(events.contains_key(names::INTERRUPT));
        }
    }

    #[test]
    fn test_ascii_event_icons_do_not_collide() {
        let events = IconSet::new(IconMode::Ascii).event_icons();
        let mut texts: Vec<&str> = events.values().map(IconSpec::text).collect();
        texts.sort_unstable();
        texts.dedup();
        assert_eq!(texts.len(), events.len());
    }

    #[test]
    fn test_subagent_markers_are_bold() {
        let events = IconSet::new(IconMode::Ascii).event_icons();
        assert!(events[names::SUBAGENT_START].is_bold());
        assert!(!events[names::STOP].is_bold());
    }
}
