//! Hook event types.
//!
//! Hook events are the raw records the host emits for every assistant action:
//! - Tool use (`PostToolUse`, `PostToolUseFailure`)
//! - Prompt submission (`UserPromptSubmit`)
//! - Turn stops (`Stop`)
//! - Subagent lifecycle (`SubagentStart`, `SubagentStop`)

use serde::{Deserialize, Deserializer, Serialize};

/// Event name constants as emitted by the host.
pub mod names {
    pub const POST_TOOL_USE: &str = "PostToolUse";
    pub const POST_TOOL_USE_FAILURE: &str = "PostToolUseFailure";
    pub const USER_PROMPT_SUBMIT: &str = "UserPromptSubmit";
    pub const STOP: &str = "Stop";
    pub const SUBAGENT_START: &str = "SubagentStart";
    pub const SUBAGENT_STOP: &str = "SubagentStop";

    /// Synthetic: a `Stop` that a hook cancelled before the turn really ended.
    pub const STOP_UNDONE: &str = "StopUndone";
    /// Synthetic: a turn that ended without a `Stop`.
    pub const INTERRUPT: &str = "Interrupt";

    /// `extra` value marking a `PostToolUseFailure` as a user interrupt.
    pub const INTERRUPT_EXTRA: &str = "interrupt";
}

/// A raw hook event, oldest-first in a feed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HookEvent {
    /// Event name (e.g. "PostToolUse", "Stop"). Legacy tool records leave it empty.
    #[serde(default, alias = "event_name", deserialize_with = "null_as_empty")]
    pub event: String,
    /// Tool name for tool-use events.
    #[serde(default, alias = "tool_name")]
    pub tool: Option<String>,
    /// Subagent that produced the event, if any.
    #[serde(default)]
    pub agent_id: Option<String>,
    /// Event-specific detail (bash command line, "+N-M" edit counts, ...).
    #[serde(default)]
    pub extra: Option<String>,
}

/// Missing and `null` event names both read as empty.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl HookEvent {
    /// Create an event with only a name.
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            ..Self::default()
        }
    }

    /// Create a `PostToolUse` event for a tool.
    pub fn tool(tool: impl Into<String>) -> Self {
        Self {
            event: names::POST_TOOL_USE.into(),
            tool: Some(tool.into()),
            ..Self::default()
        }
    }

    /// Set the `extra` field.
    #[must_use]
    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = Some(extra.into());
        self
    }

    /// Set the subagent id.
    #[must_use]
    pub fn with_agent(mut self, agent_id: impl Into<String>) -> Self {
        self.agent_id = Some(agent_id.into());
        self
    }

    /// Whether this is an explicit user interrupt (`PostToolUseFailure` + "interrupt").
    pub fn is_interrupt_failure(&self) -> bool {
        self.event == names::POST_TOOL_USE_FAILURE
            && self.extra.as_deref() == Some(names::INTERRUPT_EXTRA)
    }

    /// The tool name, if set and non-empty.
    pub fn tool_name(&self) -> Option<&str> {
        self.tool.as_deref().filter(|t| !t.is_empty())
    }
}

/// A hook event annotated by the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedEvent {
    /// The original event.
    #[serde(flatten)]
    pub raw: HookEvent,
    /// `raw.event`, or "StopUndone" / "Interrupt" when overridden.
    pub effective_event: String,
    /// Inserted by the classifier rather than read from the feed.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub synthetic: bool,
}

impl ClassifiedEvent {
    /// Classify an event as itself.
    pub fn new(raw: HookEvent) -> Self {
        let effective_event = raw.event.clone();
        Self {
            raw,
            effective_event,
            synthetic: false,
        }
    }

    /// Classify an event with an overridden effective name.
    pub fn with_effective(raw: HookEvent, effective_event: impl Into<String>) -> Self {
        Self {
            raw,
            effective_event: effective_event.into(),
            synthetic: false,
        }
    }

    /// The synthetic interrupt the classifier inserts before an unterminated prompt.
    pub fn synthetic_interrupt() -> Self {
        Self {
            raw: HookEvent::new(names::INTERRUPT),
            effective_event: names::INTERRUPT.into(),
            synthetic: true,
        }
    }

    /// Original event name.
    pub fn event(&self) -> &str {
        &self.raw.event
    }

    /// Tool name, if set and non-empty.
    pub fn tool(&self) -> Option<&str> {
        self.raw.tool_name()
    }

    /// The `extra` field.
    pub fn extra(&self) -> Option<&str> {
        self.raw.extra.as_deref()
    }

    /// Whether this event is a tool invocation (`PostToolUse` or legacy unnamed record).
    pub fn is_tool_use(&self) -> bool {
        self.tool().is_some()
            && (self.raw.event == names::POST_TOOL_USE || self.raw.event.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_event_defaults_to_event() {
        let classified = ClassifiedEvent::new(HookEvent::new("Stop"));
        assert_eq!(classified.effective_event, "Stop");
        assert!(!classified.synthetic);
    }

    #[test]
    fn test_effective_event_can_be_overridden() {
        let classified = ClassifiedEvent::with_effective(HookEvent::new("Stop"), "StopUndone");
        assert_eq!(classified.event(), "Stop");
        assert_eq!(classified.effective_event, "StopUndone");
    }

    #[test]
    fn test_interrupt_failure_detection() {
        let event = HookEvent::new(names::POST_TOOL_USE_FAILURE).with_extra("interrupt");
        assert!(event.is_interrupt_failure());

        let other = HookEvent::new(names::POST_TOOL_USE_FAILURE).with_extra("timeout");
        assert!(!other.is_interrupt_failure());
    }

    #[test]
    fn test_empty_tool_is_not_a_tool() {
        let mut event = HookEvent::tool("");
        assert_eq!(event.tool_name(), None);
        event.tool = Some("Read".into());
        assert_eq!(event.tool_name(), Some("Read"));
    }

    #[test]
    fn test_tool_use_with_empty_event_name() {
        let mut raw = HookEvent::tool("Read");
        raw.event = String::new();
        assert!(ClassifiedEvent::new(raw).is_tool_use());
    }

    #[test]
    fn test_deserialize_aliases() {
        let json = r#"{"event_name": "PostToolUse", "tool_name": "Bash", "extra": "git status"}"#;
        let event: HookEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.event, "PostToolUse");
        assert_eq!(event.tool.as_deref(), Some("Bash"));
        assert_eq!(event.agent_id, None);
    }

    #[test]
    fn test_null_event_name_reads_as_empty() {
        let event: HookEvent = serde_json::from_str(r#"{"event": null, "tool": "Read"}"#).unwrap();
        assert_eq!(event.event, "");
        assert!(ClassifiedEvent::new(event).is_tool_use());

        let event: HookEvent = serde_json::from_str(r#"{"tool": "Read"}"#).unwrap();
        assert_eq!(event.event, "");
    }
}
