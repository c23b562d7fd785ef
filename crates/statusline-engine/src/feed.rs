//! Reading hook event feeds.
//!
//! A feed is either one JSON array or JSON lines. Each record is an object
//! (`{"event": ..., "tool": ..., "agent_id": ..., "extra": ...}`) or a
//! 4-tuple `[event, tool, agent_id, extra]`.

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::event::HookEvent;

/// Error type for feed parsing.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EventRecord {
    Tuple(Option<String>, Option<String>, Option<String>, Option<String>),
    Object(HookEvent),
}

impl From<EventRecord> for HookEvent {
    fn from(record: EventRecord) -> Self {
        match record {
            EventRecord::Tuple(event, tool, agent_id, extra) => Self {
                event: event.unwrap_or_default(),
                tool,
                agent_id,
                extra,
            },
            EventRecord::Object(event) => event,
        }
    }
}

/// Parse a feed from text.
///
/// Input that parses as an array of records is a JSON array feed. Otherwise
/// it is JSON lines: blank lines are ignored and malformed lines are skipped
/// with a warning. An array that fails to parse is an error unless its first
/// line is itself a record (a tuple line).
pub fn parse_events(input: &str) -> Result<Vec<HookEvent>, FeedError> {
    let trimmed = input.trim_start();
    if trimmed.starts_with('[') {
        match serde_json::from_str::<Vec<EventRecord>>(trimmed) {
            Ok(records) => return Ok(records.into_iter().map(HookEvent::from).collect()),
            Err(e) if !first_line_is_record(trimmed) => return Err(e.into()),
            Err(_) => {}
        }
    }

    let mut events = Vec::new();
    for (idx, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<EventRecord>(line) {
            Ok(record) => events.push(record.into()),
            Err(e) => warn!(line = idx + 1, error = %e, "Skipping malformed event record"),
        }
    }
    Ok(events)
}

fn first_line_is_record(input: &str) -> bool {
    input
        .lines()
        .next()
        .is_some_and(|line| serde_json::from_str::<EventRecord>(line.trim()).is_ok())
}

/// Read and parse a feed from any reader.
pub fn read_events(mut reader: impl std::io::Read) -> Result<Vec<HookEvent>, FeedError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse_events(&input)
}

/// The last `limit` events of a feed. A limit of zero keeps every event.
pub fn tail(events: &[HookEvent], limit: usize) -> &[HookEvent] {
    if limit == 0 {
        return events;
    }
    &events[events.len().saturating_sub(limit)..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_array_of_objects() {
        let input = r#"[
            {"event": "UserPromptSubmit"},
            {"event": "PostToolUse", "tool": "Read"},
            {"event": "Stop"}
        ]"#;
        let events = parse_events(input).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[1], HookEvent::tool("Read"));
    }

    #[test]
    fn test_parse_array_of_tuples() {
        let input = r#"[["PostToolUse", "Bash", null, "git status"], ["Stop", null, null, null]]"#;
        let events = parse_events(input).unwrap();
        assert_eq!(events[0], HookEvent::tool("Bash").with_extra("git status"));
        assert_eq!(events[1], HookEvent::new("Stop"));
    }

    #[test]
    fn test_parse_json_lines_mixed_forms() {
        let input = "\
{\"event\": \"UserPromptSubmit\"}

[\"PostToolUse\", \"Edit\", \"a1\", \"+3-1\"]
";
        let events = parse_events(input).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].agent_id.as_deref(), Some("a1"));
        assert_eq!(events[1].extra.as_deref(), Some("+3-1"));
    }

    #[test]
    fn test_json_lines_skip_malformed() {
        let input = "{\"event\": \"Stop\"}\nnot json\n{\"tool\": \"Read\"}\n{\"event\": \"Stop\"}\n";
        let events = parse_events(input).unwrap();
        assert_eq!(events.len(), 3);
        // Legacy tool records carry no event name.
        assert_eq!(events[1].event, "");
        assert_eq!(events[1].tool.as_deref(), Some("Read"));
    }

    #[test]
    fn test_parse_null_event_name() {
        let array = r#"[{"event": null, "tool": "Read"}, [null, "Grep", null, null], {"event": "Stop"}]"#;
        let events = parse_events(array).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].event, "");
        assert_eq!(events[0].tool.as_deref(), Some("Read"));
        assert_eq!(events[1].event, "");
        assert_eq!(events[1].tool.as_deref(), Some("Grep"));

        let lines = "{\"event\": null, \"tool\": \"Read\"}\n[null, \"Grep\", null, null]\n{\"event\": \"Stop\"}\n";
        let events = parse_events(lines).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].tool.as_deref(), Some("Read"));
        assert_eq!(events[1].event, "");
    }

    #[test]
    fn test_tuple_lines_with_spaced_bracket() {
        let input = "[ \"UserPromptSubmit\", null, null, null]\n[ \"Stop\", null, null, null]\n";
        let events = parse_events(input).unwrap();
        assert_eq!(
            events,
            vec![HookEvent::new("UserPromptSubmit"), HookEvent::new("Stop")]
        );
    }

    #[test]
    fn test_single_line_array_of_objects() {
        let input = r#"[{"event": "Stop"}, {"event": "Stop"}, {"event": "Stop"}, {"event": "Stop"}]"#;
        assert_eq!(parse_events(input).unwrap().len(), 4);
    }

    #[test]
    fn test_malformed_array_is_an_error() {
        assert!(matches!(parse_events("[{\"event\": 1}]"), Err(FeedError::Json(_))));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_events("").unwrap().is_empty());
        assert!(parse_events("  \n\n").unwrap().is_empty());
    }

    #[test]
    fn test_read_events_from_reader() {
        let events = read_events("{\"event\": \"Stop\"}".as_bytes()).unwrap();
        assert_eq!(events, vec![HookEvent::new("Stop")]);
    }

    #[test]
    fn test_tail() {
        let events: Vec<HookEvent> = ["A", "B", "C", "D"].into_iter().map(HookEvent::new).collect();
        assert_eq!(tail(&events, 2), &events[2..]);
        assert_eq!(tail(&events, 10), &events[..]);
        assert_eq!(tail(&events, 0), &events[..]);
        assert!(tail(&[], 3).is_empty());
    }
}
