//! Recording notification sink.

use scenario_core::{ElementKind, ElementState, StateObserver};

/// A single recorded state-change notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateChange {
    /// Name of the element that changed.
    pub name: String,
    /// Kind of the element.
    pub kind: ElementKind,
    /// State after the transition was applied.
    pub state: ElementState,
}

impl StateChange {
    /// The `(kind, state)` integer codes as seen by embedding APIs.
    pub fn codes(&self) -> (i32, i32) {
        (self.kind.code(), self.state.code())
    }
}

/// A [`StateObserver`] that records every notification in order.
///
/// Useful as the host-facing notification sink and as the recording
/// observer in integration-style tests.
#[derive(Debug, Default)]
pub struct StateChangeLog {
    changes: Vec<StateChange>,
}

impl StateChangeLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded changes, oldest first.
    #[inline]
    pub fn changes(&self) -> &[StateChange] {
        &self.changes
    }

    /// Number of recorded changes.
    #[inline]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// True when nothing has been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Discards all recorded changes.
    pub fn clear(&mut self) {
        self.changes.clear();
    }
}

impl StateObserver for StateChangeLog {
    fn on_state_change(&mut self, name: &str, kind: ElementKind, state: ElementState) {
        self.changes.push(StateChange {
            name: name.to_string(),
            kind,
            state,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenario_core::{Action, Event, UserDefinedAction};

    #[test]
    fn records_event_activation_in_order() {
        let mut log = StateChangeLog::new();
        let mut event = Event::new("cut-in").with_max_executions(1);
        event.add_action(Action::user_defined(
            "lane_change",
            UserDefinedAction::new("tag", "payload"),
        ));

        event.start(0.0, 0.1, &mut log);
        for action in event.actions_mut() {
            action.end(1.0, &mut log);
        }
        event.update_state(1.0, &mut log);

        let names: Vec<&str> = log.changes().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["cut-in", "lane_change", "lane_change", "cut-in"]);

        assert_eq!(
            log.changes()[0].codes(),
            (ElementKind::Event.code(), ElementState::Running.code())
        );
        assert_eq!(
            log.changes()[3].codes(),
            (ElementKind::Event.code(), ElementState::Complete.code())
        );
    }

    #[test]
    fn clear_empties_the_log() {
        let mut log = StateChangeLog::new();
        let mut event = Event::new("ev");
        event.start(0.0, 0.1, &mut log);
        assert!(!log.is_empty());

        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
    }
}
