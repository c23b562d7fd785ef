//! Single-pass classification of a hook event feed.
//!
//! The feed is usually a tail slice of a session, so it may start mid-turn.
//! Classification infers what the flat log does not say directly:
//! - `Stop` events that a hook cancelled (more tool use followed) become `StopUndone`
//! - A prompt submitted while a turn was still open gets a synthetic `Interrupt`
//! - A `SubagentStop` fired together with `Stop` is dropped

use tracing::debug;

use crate::event::{names, ClassifiedEvent, HookEvent};

/// Rolling state carried through the fold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ClassifierState<'a> {
    in_turn: bool,
    subagent_depth: usize,
    prev_event: Option<&'a str>,
}

impl<'a> ClassifierState<'a> {
    fn seed(events: &[HookEvent]) -> Self {
        Self {
            in_turn: events
                .first()
                .is_some_and(|e| e.event != names::USER_PROMPT_SUBMIT),
            subagent_depth: 0,
            prev_event: None,
        }
    }

    /// State after `event` has been emitted.
    fn advance(self, event: &'a HookEvent) -> Self {
        let mut next = Self {
            prev_event: Some(event.event.as_str()),
            ..self
        };
        match event.event.as_str() {
            names::USER_PROMPT_SUBMIT => next.in_turn = true,
            names::STOP if self.subagent_depth == 0 => next.in_turn = false,
            names::SUBAGENT_START => next.subagent_depth += 1,
            names::SUBAGENT_STOP => next.subagent_depth = self.subagent_depth.saturating_sub(1),
            _ if event.is_interrupt_failure() && self.subagent_depth == 0 => next.in_turn = false,
            _ => {}
        }
        next
    }
}

/// Classify a feed, oldest-first.
///
/// The output has one entry per input event, minus skipped `SubagentStop`
/// duplicates, plus one synthetic `Interrupt` per unterminated turn.
pub fn classify(events: &[HookEvent]) -> Vec<ClassifiedEvent> {
    let (_, classified) = events.iter().enumerate().fold(
        (ClassifierState::seed(events), Vec::with_capacity(events.len())),
        |(mut state, mut out), (i, event)| {
            if event.event == names::SUBAGENT_STOP && state.prev_event == Some(names::STOP) {
                state.prev_event = Some(event.event.as_str());
                return (state, out);
            }

            if event.event == names::USER_PROMPT_SUBMIT
                && state.in_turn
                && state.subagent_depth == 0
            {
                out.push(ClassifiedEvent::synthetic_interrupt());
                state.in_turn = false;
            }

            let classified = if event.event == names::STOP && is_stop_undone(&events[i + 1..]) {
                ClassifiedEvent::with_effective(event.clone(), names::STOP_UNDONE)
            } else {
                ClassifiedEvent::new(event.clone())
            };
            out.push(classified);

            (state.advance(event), out)
        },
    );
    debug!(
        raw = events.len(),
        classified = classified.len(),
        "Classified hook events"
    );
    classified
}

/// Whether a `Stop` followed by `rest` was cancelled.
///
/// Only `SubagentStop` is skipped in the lookahead; the next event after that
/// must exist and not be a prompt or another stop.
fn is_stop_undone(rest: &[HookEvent]) -> bool {
    rest.iter()
        .find(|e| e.event != names::SUBAGENT_STOP)
        .is_some_and(|next| {
            next.event != names::USER_PROMPT_SUBMIT && next.event != names::STOP
        })
}
