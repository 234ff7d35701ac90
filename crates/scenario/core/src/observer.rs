//! Change notification for element state transitions.
//!
//! Every successful transition reports `(name, kind, state)` to a
//! [`StateObserver`] handle threaded explicitly through the lifecycle
//! calls. There is no process-wide registration and no event queue:
//! exactly one observer per call chain, injected by the host (or a test).

use crate::element::{ElementKind, ElementState};

/// Receiver for element state-change notifications.
///
/// Invoked after every applied transition, including ones that leave the
/// state value unchanged (a Standby → Standby skip is still reported).
/// Sinks needing the wire representation use [`ElementKind::code`] and
/// [`ElementState::code`].
///
/// Observers are pure: an implementation must not trigger new transitions
/// on the tree synchronously from inside the callback.
pub trait StateObserver {
    /// Called with the element's name, kind, and freshly applied state.
    fn on_state_change(&mut self, name: &str, kind: ElementKind, state: ElementState);
}

/// The unregistered sink: notifications are silently skipped.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl StateObserver for NullObserver {
    #[inline]
    fn on_state_change(&mut self, _name: &str, _kind: ElementKind, _state: ElementState) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Element, ElementKind, ElementState};

    #[derive(Default)]
    struct Recorder {
        changes: Vec<(String, i32, i32)>,
    }

    impl StateObserver for Recorder {
        fn on_state_change(&mut self, name: &str, kind: ElementKind, state: ElementState) {
            self.changes.push((name.to_string(), kind.code(), state.code()));
        }
    }

    #[test]
    fn start_end_produces_two_notifications_in_order() {
        let mut recorder = Recorder::default();
        let mut e = Element::new(ElementKind::Action, "X");

        e.start(0.0, 0.1, &mut recorder);
        e.end(1.0, &mut recorder);

        assert_eq!(
            recorder.changes,
            vec![
                ("X".to_string(), ElementKind::Action.code(), ElementState::Running.code()),
                ("X".to_string(), ElementKind::Action.code(), ElementState::Complete.code()),
            ]
        );
    }

    #[test]
    fn invalid_request_emits_no_notification() {
        let mut recorder = Recorder::default();
        let mut e = Element::new(ElementKind::Action, "X");
        e.stop(&mut recorder);
        assert_eq!(recorder.changes.len(), 1);

        // Start from Complete is a no-op: nothing further recorded.
        e.start(0.0, 0.1, &mut recorder);
        assert_eq!(recorder.changes.len(), 1);
    }

    #[test]
    fn skip_rearm_is_still_reported() {
        let mut recorder = Recorder::default();
        let mut e = Element::new(ElementKind::Event, "ev");
        e.standby(&mut recorder);
        assert_eq!(
            recorder.changes,
            vec![("ev".to_string(), ElementKind::Event.code(), ElementState::Standby.code())]
        );
    }

    #[test]
    fn reset_is_silent() {
        let mut recorder = Recorder::default();
        let mut e = Element::new(ElementKind::Event, "ev");
        e.start(0.0, 0.1, &mut recorder);
        let before = recorder.changes.len();
        e.reset();
        assert_eq!(recorder.changes.len(), before);
    }
}
