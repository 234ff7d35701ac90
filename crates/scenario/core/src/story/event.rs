//! Events: repeatable containers of actions.

use crate::action::Action;
use crate::element::{Element, ElementKind, ElementState};
use crate::observer::StateObserver;

/// How a starting event relates to other events already running on the
/// same maneuver.
///
/// Arbitration between events belongs to the trigger evaluator; the core
/// only carries the authored value.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EventPriority {
    /// Stop conflicting events, then start this one.
    Overwrite,
    /// Skip this event while a conflicting one is running.
    Skip,
    /// Run alongside whatever else is running.
    #[default]
    Parallel,
}

/// A repeatable container of actions.
///
/// An event owns its actions exclusively. Starting the event starts every
/// action (actions carry no triggers of their own); once all actions are
/// complete the event ends, settling back in Standby while under its
/// execution limit.
#[derive(Debug)]
pub struct Event {
    element: Element,
    priority: EventPriority,
    actions: Vec<Action>,
}

impl Event {
    /// Creates an empty event with default (parallel) priority.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            element: Element::new(ElementKind::Event, name),
            priority: EventPriority::default(),
            actions: Vec::new(),
        }
    }

    /// Sets the authored priority (builder pattern).
    #[must_use]
    pub fn with_priority(mut self, priority: EventPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Bounds the number of executions (builder pattern).
    #[must_use]
    pub fn with_max_executions(mut self, max: u32) -> Self {
        self.element = self.element.with_max_executions(max);
        self
    }

    /// Adds an action to the event.
    pub fn add_action(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// The authored priority.
    #[inline]
    pub fn priority(&self) -> EventPriority {
        self.priority
    }

    /// The event's actions.
    #[inline]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Mutable access for the orchestrator's per-tick action stepping.
    #[inline]
    pub fn actions_mut(&mut self) -> &mut [Action] {
        &mut self.actions
    }

    /// The underlying element state machine.
    #[inline]
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Mutable access for orchestrators driving transitions directly.
    #[inline]
    pub fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }

    /// Identifier used for diagnostics and notification.
    #[inline]
    pub fn name(&self) -> &str {
        self.element.name()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.element.is_active()
    }

    #[inline]
    pub fn is_triggable(&self) -> bool {
        self.element.is_triggable()
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.element.state() == ElementState::Complete
    }

    /// True once every action has reached Complete.
    pub fn all_actions_complete(&self) -> bool {
        self.actions.iter().all(Action::is_complete)
    }

    /// Starts the event and cascades into its actions.
    ///
    /// Actions left in Complete by a previous execution cycle are reset
    /// first so the new cycle runs them again. An illegal request records
    /// the usual diagnostic and does not cascade.
    pub fn start(&mut self, sim_time: f64, dt: f64, observer: &mut dyn StateObserver) {
        if !self.element.is_triggable() {
            self.element.start(sim_time, dt, observer);
            return;
        }
        self.element.start(sim_time, dt, observer);
        for action in &mut self.actions {
            if action.is_complete() {
                action.reset();
            }
            action.start(sim_time, dt, observer);
        }
    }

    /// Ends still-running actions, then resolves the event itself
    /// (repeat check included).
    pub fn end(&mut self, sim_time: f64, observer: &mut dyn StateObserver) {
        for action in &mut self.actions {
            if action.element().state() == ElementState::Running {
                action.end(sim_time, observer);
            }
        }
        self.element.end(sim_time, observer);
    }

    /// Forces the event and its unfinished actions to Complete.
    pub fn stop(&mut self, observer: &mut dyn StateObserver) {
        for action in &mut self.actions {
            if !action.is_complete() {
                action.stop(observer);
            }
        }
        self.element.stop(observer);
    }

    /// Bottom-up per-tick update.
    ///
    /// Children housekeep first; the event then observes their
    /// post-transition state and ends itself once all actions are
    /// complete. An event with no actions completes on the tick it
    /// starts.
    pub fn update_state(&mut self, sim_time: f64, observer: &mut dyn StateObserver) {
        for action in &mut self.actions {
            action.update_state();
        }
        if self.element.is_active() && self.all_actions_complete() {
            self.element.end(sim_time, observer);
        }
        self.element.update_state();
    }

    /// Recursively returns the event and its actions to their pristine
    /// pre-run state.
    pub fn reset(&mut self) {
        for action in &mut self.actions {
            action.reset();
        }
        self.element.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Action, UserDefinedAction};
    use crate::element::Transition;
    use crate::observer::NullObserver;

    fn action(name: &str) -> Action {
        Action::user_defined(name, UserDefinedAction::new("tag", "payload"))
    }

    fn two_action_event() -> Event {
        // Authored scenarios default to a single execution.
        let mut event = Event::new("ev").with_max_executions(1);
        event.add_action(action("a1"));
        event.add_action(action("a2"));
        event
    }

    #[test]
    fn start_cascades_to_actions() {
        let mut obs = NullObserver;
        let mut event = two_action_event();
        event.start(0.0, 0.1, &mut obs);

        assert!(event.is_active());
        assert!(event.actions().iter().all(Action::is_active));
    }

    #[test]
    fn invalid_start_does_not_cascade() {
        let mut obs = NullObserver;
        let mut event = two_action_event();
        event.stop(&mut obs);

        event.start(0.0, 0.1, &mut obs);
        assert!(event.is_complete());
        assert_eq!(event.element().execution_count(), 0);
    }

    #[test]
    fn completes_when_all_actions_complete() {
        let mut obs = NullObserver;
        let mut event = two_action_event();
        event.start(0.0, 0.1, &mut obs);

        // Orchestrator ends the actions; aggregation ends the event in
        // the same tick, observing post-transition child state.
        for a in event.actions_mut() {
            a.end(1.0, &mut obs);
        }
        event.update_state(1.0, &mut obs);
        assert!(event.is_complete());
        assert_eq!(event.element().transition(), Some(Transition::End));
    }

    #[test]
    fn repeat_cycle_rearms_completed_actions() {
        let mut obs = NullObserver;
        let mut event = two_action_event().with_max_executions(2);

        event.start(0.0, 0.1, &mut obs);
        for a in event.actions_mut() {
            a.end(1.0, &mut obs);
        }
        event.update_state(1.0, &mut obs);
        assert_eq!(event.element().state(), ElementState::Standby);

        // Second cycle: actions were Complete, start re-arms and reruns.
        event.start(2.0, 0.1, &mut obs);
        assert!(event.actions().iter().all(Action::is_active));
        for a in event.actions_mut() {
            a.end(3.0, &mut obs);
        }
        event.update_state(3.0, &mut obs);
        assert!(event.is_complete());
        assert_eq!(event.element().execution_count(), 2);
    }

    #[test]
    fn stop_forces_unfinished_actions_complete() {
        let mut obs = NullObserver;
        let mut event = two_action_event();
        event.start(0.0, 0.1, &mut obs);
        event.stop(&mut obs);

        assert!(event.is_complete());
        assert!(event.actions().iter().all(Action::is_complete));
    }

    #[test]
    fn empty_event_completes_on_activation_tick() {
        let mut obs = NullObserver;
        let mut event = Event::new("empty").with_max_executions(1);
        event.start(0.0, 0.1, &mut obs);
        event.update_state(0.0, &mut obs);
        assert!(event.is_complete());
    }

    #[test]
    fn reset_is_recursive() {
        let mut obs = NullObserver;
        let mut event = two_action_event();
        event.start(0.0, 0.1, &mut obs);
        event.stop(&mut obs);

        event.reset();
        assert!(event.is_triggable());
        assert_eq!(event.element().execution_count(), 0);
        assert!(event.actions().iter().all(Action::is_triggable));
    }

    #[test]
    fn priority_defaults_to_parallel() {
        assert_eq!(Event::new("ev").priority(), EventPriority::Parallel);
        let ev = Event::new("ev").with_priority(EventPriority::Overwrite);
        assert_eq!(ev.priority(), EventPriority::Overwrite);
    }
}
