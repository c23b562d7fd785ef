//! Configuration types for the event timeline.
//!
//! This module defines the resolved configuration bundle the timeline
//! consumes: icon tables, per-context backgrounds and brackets, spacing,
//! outer frame, and line-count bars.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Main configuration for the event timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// Built-in icon preset the icon tables are layered over.
    #[serde(default)]
    pub icon_mode: IconMode,

    /// Tool icon overrides, keyed by tool name (e.g. "Read", "TaskUpdate:completed").
    #[serde(default)]
    pub tool_icons: BTreeMap<String, IconSpec>,

    /// Event icon overrides, keyed by effective event name.
    #[serde(default)]
    pub event_icons: BTreeMap<String, IconSpec>,

    /// Bash command icon overrides, keyed by command basename.
    #[serde(default)]
    pub bash_icons: BTreeMap<String, IconSpec>,

    /// Per-context background colors.
    #[serde(default)]
    pub backgrounds: Backgrounds,

    /// Whether each run is wrapped in its context's bracket pair.
    #[serde(default)]
    pub brackets: bool,

    /// Bracket pairs per context.
    #[serde(default)]
    pub run_brackets: RunBrackets,

    /// Cells between glyphs inside a run.
    #[serde(default = "default_spacing")]
    pub spacing: usize,

    /// Outer frame glyph on the left.
    #[serde(default = "default_left")]
    pub left: String,

    /// Outer frame glyph on the right.
    #[serde(default = "default_right")]
    pub right: String,

    /// Background behind the whole timeline (between the frame glyphs).
    #[serde(default)]
    pub background: Option<String>,

    /// Line-count bars for Edit events.
    #[serde(default)]
    pub line_bars: LineBars,

    /// Number of most recent events to show when not expanding.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_spacing() -> usize {
    1
}

fn default_left() -> String {
    "[".into()
}

fn default_right() -> String {
    "]".into()
}

fn default_limit() -> usize {
    30
}

/// Icon preset selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IconMode {
    /// Nerd Font icons (default, richest experience).
    #[default]
    Nerd,
    /// Standard Unicode symbols.
    Unicode,
    /// ASCII-only fallback.
    Ascii,
}

/// One configured icon: text plus optional foreground styling.
///
/// Deserializes from either a bare string or `{ "text": ..., "fg": ..., "bold": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IconSpec {
    Plain(String),
    Styled {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fg: Option<String>,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        bold: bool,
    },
}

impl IconSpec {
    /// An icon with a foreground color.
    pub fn colored(text: impl Into<String>, fg: impl Into<String>) -> Self {
        Self::Styled {
            text: text.into(),
            fg: Some(fg.into()),
            bold: false,
        }
    }

    /// An icon with a bold foreground color.
    pub fn bold(text: impl Into<String>, fg: impl Into<String>) -> Self {
        Self::Styled {
            text: text.into(),
            fg: Some(fg.into()),
            bold: true,
        }
    }

    /// Icon text.
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text) | Self::Styled { text, .. } => text,
        }
    }

    /// Foreground color string, if any.
    pub fn fg(&self) -> Option<&str> {
        match self {
            Self::Plain(_) => None,
            Self::Styled { fg, .. } => fg.as_deref(),
        }
    }

    /// Whether the icon is bold.
    pub fn is_bold(&self) -> bool {
        matches!(self, Self::Styled { bold: true, .. })
    }
}

impl From<&str> for IconSpec {
    fn from(text: &str) -> Self {
        Self::Plain(text.into())
    }
}

/// Background colors per run context, plus the edit-bar cell background.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backgrounds {
    #[serde(default = "default_main_bg")]
    pub main: String,
    #[serde(default = "default_user_bg")]
    pub user: String,
    #[serde(default = "default_subagent_bg")]
    pub subagent: String,
    #[serde(default = "default_edit_bar_bg")]
    pub edit_bar: String,
}

fn default_main_bg() -> String {
    "#2a3a2a".into()
}

fn default_user_bg() -> String {
    "#3a2a2a".into()
}

fn default_subagent_bg() -> String {
    "#2a2a3a".into()
}

fn default_edit_bar_bg() -> String {
    "#4c4d4e".into()
}

impl Default for Backgrounds {
    fn default() -> Self {
        Self {
            main: default_main_bg(),
            user: default_user_bg(),
            subagent: default_subagent_bg(),
            edit_bar: default_edit_bar_bg(),
        }
    }
}

/// Open/close bracket pair per run context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunBrackets {
    #[serde(default = "default_main_brackets")]
    pub main: (String, String),
    #[serde(default = "default_user_brackets")]
    pub user: (String, String),
    #[serde(default = "default_subagent_brackets")]
    pub subagent: (String, String),
}

fn default_main_brackets() -> (String, String) {
    ("[".into(), "]".into())
}

fn default_user_brackets() -> (String, String) {
    ("(".into(), ")".into())
}

fn default_subagent_brackets() -> (String, String) {
    ("<".into(), ">".into())
}

impl Default for RunBrackets {
    fn default() -> Self {
        Self {
            main: default_main_brackets(),
            user: default_user_brackets(),
            subagent: default_subagent_brackets(),
        }
    }
}

/// Line-count bar buckets for Edit events.
///
/// `thresholds[i]` is the exclusive upper bound of the bucket drawn with the
/// i-th character of `chars`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineBars {
    #[serde(default = "default_line_bar_chars")]
    pub chars: String,
    #[serde(default = "default_line_bar_thresholds")]
    pub thresholds: Vec<i64>,
}

fn default_line_bar_chars() -> String {
    "▂▃▄▅▆▇█".into()
}

fn default_line_bar_thresholds() -> Vec<i64> {
    vec![1, 6, 16, 31, 51, 101, 201]
}

impl Default for LineBars {
    fn default() -> Self {
        Self {
            chars: default_line_bar_chars(),
            thresholds: default_line_bar_thresholds(),
        }
    }
}

impl LineBars {
    /// Bar characters as a slice-friendly vector.
    pub fn char_list(&self) -> Vec<char> {
        self.chars.chars().collect()
    }

    /// Check that chars and thresholds line up.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let chars = self.chars.chars().count();
        if chars == 0 {
            return Err(ConfigError::Invalid("line_bars.chars is empty".into()));
        }
        if chars != self.thresholds.len() {
            return Err(ConfigError::Invalid(format!(
                "line_bars has {chars} chars but {} thresholds",
                self.thresholds.len()
            )));
        }
        if self.thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::Invalid(
                "line_bars.thresholds must be strictly increasing".into(),
            ));
        }
        Ok(())
    }
}

impl TimelineConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config: Self = serde_json::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Check invariants that rendering relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.line_bars.validate()
    }

    /// Bracket pair for a context, or empty strings when brackets are off.
    pub fn brackets_for(&self, context: crate::RunContext) -> (&str, &str) {
        if !self.brackets {
            return ("", "");
        }
        let (open, close) = match context {
            crate::RunContext::Main => &self.run_brackets.main,
            crate::RunContext::User => &self.run_brackets.user,
            crate::RunContext::Subagent => &self.run_brackets.subagent,
        };
        (open, close)
    }

    /// Background color string for a context.
    pub fn background_for(&self, context: crate::RunContext) -> &str {
        match context {
            crate::RunContext::Main => &self.backgrounds.main,
            crate::RunContext::User => &self.backgrounds.user,
            crate::RunContext::Subagent => &self.backgrounds.subagent,
        }
    }
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            icon_mode: IconMode::default(),
            tool_icons: BTreeMap::new(),
            event_icons: BTreeMap::new(),
            bash_icons: BTreeMap::new(),
            backgrounds: Backgrounds::default(),
            brackets: false,
            run_brackets: RunBrackets::default(),
            spacing: default_spacing(),
            left: default_left(),
            right: default_right(),
            background: None,
            line_bars: LineBars::default(),
            limit: default_limit(),
        }
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Config parsed but violates a rendering invariant.
    #[error("Invalid config: {0}")]
    Invalid(String),
}
