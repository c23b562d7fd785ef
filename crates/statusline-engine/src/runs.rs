//! Grouping classified events into runs.
//!
//! A run is a maximal contiguous sequence of events that share a rendering
//! context. Subagent lifecycle and subagent tool use stay inside the
//! surrounding main run; their own glyphs mark them.

use serde::Serialize;

use crate::event::{names, ClassifiedEvent};

/// Rendering context of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunContext {
    /// Assistant activity: tool use, stops, subagent markers.
    Main,
    /// Prompt submissions and interrupts.
    User,
    /// Subagent activity. Styled separately when a caller builds such runs.
    Subagent,
}

impl RunContext {
    /// Context for a single classified event.
    pub fn of(event: &ClassifiedEvent) -> Self {
        let effective = event.effective_event.as_str();
        if effective == names::USER_PROMPT_SUBMIT
            || effective == names::INTERRUPT
            || event.raw.is_interrupt_failure()
        {
            Self::User
        } else {
            Self::Main
        }
    }
}

/// A contiguous sequence of events in one context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Run {
    pub context: RunContext,
    pub events: Vec<ClassifiedEvent>,
    /// Shared subagent id when every event in the run carries the same one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
}

impl Run {
    fn start(context: RunContext, event: ClassifiedEvent) -> Self {
        Self {
            context,
            events: vec![event],
            agent_id: None,
        }
    }

    fn finish(mut self) -> Self {
        let first = self.events.first().and_then(|e| e.raw.agent_id.clone());
        if first.is_some() && self.events.iter().all(|e| e.raw.agent_id == first) {
            self.agent_id = first;
        }
        self
    }
}

/// Partition classified events into runs.
///
/// Concatenating the events of every returned run reproduces `events`
/// exactly. Synthetic interrupts always sit alone in their run.
pub fn group_into_runs(events: Vec<ClassifiedEvent>) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    let mut current: Option<Run> = None;

    for event in events {
        let context = RunContext::of(&event);
        current = match current {
            Some(mut run)
                if run.context == context
                    && !event.synthetic
                    && !run.events.last().is_some_and(|prev| prev.synthetic) =>
            {
                run.events.push(event);
                Some(run)
            }
            previous => {
                runs.extend(previous.map(Run::finish));
                Some(Run::start(context, event))
            }
        };
    }
    runs.extend(current.map(Run::finish));
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::event::HookEvent;

    fn shape(runs: &[Run]) -> Vec<(RunContext, Vec<&str>)> {
        runs.iter()
            .map(|r| {
                (
                    r.context,
                    r.events.iter().map(|e| e.effective_event.as_str()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_empty_input_has_no_runs() {
        assert!(group_into_runs(Vec::new()).is_empty());
    }

    #[test]
    fn test_simple_turn() {
        let events = [
            HookEvent::new(names::USER_PROMPT_SUBMIT),
            HookEvent::tool("Read"),
            HookEvent::new(names::STOP),
        ];
        let runs = group_into_runs(classify(&events));
        assert_eq!(
            shape(&runs),
            [
                (RunContext::User, vec!["UserPromptSubmit"]),
                (RunContext::Main, vec!["PostToolUse", "Stop"]),
            ]
        );
    }

    #[test]
    fn test_interrupt_is_its_own_run() {
        let events = [
            HookEvent::new(names::USER_PROMPT_SUBMIT),
            HookEvent::tool("Read"),
            HookEvent::new(names::USER_PROMPT_SUBMIT),
            HookEvent::new(names::STOP),
        ];
        let runs = group_into_runs(classify(&events));
        assert_eq!(
            shape(&runs),
            [
                (RunContext::User, vec!["UserPromptSubmit"]),
                (RunContext::Main, vec!["PostToolUse"]),
                (RunContext::User, vec!["Interrupt"]),
                (RunContext::User, vec!["UserPromptSubmit"]),
                (RunContext::Main, vec!["Stop"]),
            ]
        );
    }

    #[test]
    fn test_explicit_interrupt_is_user_context() {
        let events = [
            HookEvent::tool("Read"),
            HookEvent::new(names::POST_TOOL_USE_FAILURE).with_extra("interrupt"),
            HookEvent::new(names::USER_PROMPT_SUBMIT),
        ];
        let runs = group_into_runs(classify(&events));
        assert_eq!(
            shape(&runs),
            [
                (RunContext::Main, vec!["PostToolUse"]),
                (RunContext::User, vec!["PostToolUseFailure", "UserPromptSubmit"]),
            ]
        );
    }

    #[test]
    fn test_subagent_events_stay_in_main_run() {
        let events = [
            HookEvent::new(names::USER_PROMPT_SUBMIT),
            HookEvent::new(names::SUBAGENT_START).with_agent("a1"),
            HookEvent::tool("Read").with_agent("a1"),
            HookEvent::new(names::SUBAGENT_STOP).with_agent("a1"),
            HookEvent::new(names::STOP),
        ];
        let runs = group_into_runs(classify(&events));
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1].context, RunContext::Main);
        assert_eq!(runs[1].events.len(), 4);
        assert_eq!(runs[1].agent_id, None);
    }

    #[test]
    fn test_shared_agent_id_is_recorded() {
        let events = [
            HookEvent::tool("Read").with_agent("a1"),
            HookEvent::tool("Grep").with_agent("a1"),
        ];
        let runs = group_into_runs(classify(&events));
        assert_eq!(runs[0].agent_id.as_deref(), Some("a1"));
    }

    #[test]
    fn test_partition_reproduces_classified_events() {
        let vocabulary = [
            HookEvent::new(names::USER_PROMPT_SUBMIT),
            HookEvent::tool("Read"),
            HookEvent::new(names::STOP),
            HookEvent::new(names::SUBAGENT_START),
            HookEvent::new(names::SUBAGENT_STOP),
            HookEvent::new(names::POST_TOOL_USE_FAILURE).with_extra("interrupt"),
        ];
        // Every feed of length 4 over the vocabulary.
        let n = vocabulary.len();
        for code in 0..n.pow(4) {
            let feed: Vec<HookEvent> = (0..4)
                .map(|digit| vocabulary[(code / n.pow(digit)) % n].clone())
                .collect();
            let classified = classify(&feed);
            let runs = group_into_runs(classified.clone());

            let flattened: Vec<ClassifiedEvent> =
                runs.iter().flat_map(|r| r.events.clone()).collect();
            assert_eq!(flattened, classified, "feed: {feed:?}");

            for run in &runs {
                assert!(!run.events.is_empty());
                assert!(run.events.iter().all(|e| RunContext::of(e) == run.context));
                if run.events.iter().any(|e| e.synthetic) {
                    assert_eq!(run.events.len(), 1);
                }
            }
        }
    }
}
