//! Maneuvers and maneuver groups.

use crate::element::{Element, ElementKind, ElementState};
use crate::observer::StateObserver;
use crate::story::event::Event;

/// A container of trigger-gated events.
///
/// Starting a maneuver does not start its events — each event waits for
/// its own trigger — but it does re-arm events left in Complete by a
/// previous execution cycle of the owning maneuver group.
#[derive(Debug)]
pub struct Maneuver {
    element: Element,
    events: Vec<Event>,
}

impl Maneuver {
    /// Creates an empty maneuver.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            element: Element::new(ElementKind::Maneuver, name),
            events: Vec::new(),
        }
    }

    /// Adds an event to the maneuver.
    pub fn add_event(&mut self, event: Event) {
        self.events.push(event);
    }

    /// The maneuver's events.
    #[inline]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Mutable access for the trigger evaluator and orchestrator.
    #[inline]
    pub fn events_mut(&mut self) -> &mut [Event] {
        &mut self.events
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

    /// True while any event is actively executing.
    pub fn is_any_event_active(&self) -> bool {
        self.events.iter().any(Event::is_active)
    }

    /// True once every event has reached Complete.
    pub fn all_events_complete(&self) -> bool {
        self.events.iter().all(Event::is_complete)
    }

    /// Starts the maneuver. Events stay in Standby awaiting their
    /// triggers; completed leftovers from a previous cycle are re-armed.
    pub fn start(&mut self, sim_time: f64, dt: f64, observer: &mut dyn StateObserver) {
        if !self.element.is_triggable() {
            self.element.start(sim_time, dt, observer);
            return;
        }
        self.element.start(sim_time, dt, observer);
        for event in &mut self.events {
            if event.is_complete() {
                event.reset();
            }
        }
    }

    /// Ends still-running events, then the maneuver itself.
    pub fn end(&mut self, sim_time: f64, observer: &mut dyn StateObserver) {
        for event in &mut self.events {
            if event.element().state() == ElementState::Running {
                event.end(sim_time, observer);
            }
        }
        self.element.end(sim_time, observer);
    }

    /// Forces the maneuver and its unfinished events to Complete.
    pub fn stop(&mut self, observer: &mut dyn StateObserver) {
        for event in &mut self.events {
            if !event.is_complete() {
                event.stop(observer);
            }
        }
        self.element.stop(observer);
    }

    /// Bottom-up per-tick update: events first, then completion
    /// aggregation, then own housekeeping.
    pub fn update_state(&mut self, sim_time: f64, observer: &mut dyn StateObserver) {
        for event in &mut self.events {
            event.update_state(sim_time, observer);
        }
        if self.element.is_active() && self.all_events_complete() {
            self.element.end(sim_time, observer);
        }
        self.element.update_state();
    }

    /// Recursively returns the maneuver and its events to their pristine
    /// pre-run state.
    pub fn reset(&mut self) {
        for event in &mut self.events {
            event.reset();
        }
        self.element.reset();
    }
}

/// A repeatable container of maneuvers.
///
/// Maneuvers carry no triggers, so starting the group cascades into
/// them. While under its execution limit a finished group settles back
/// in Standby; the next start re-arms and reruns its subtree.
#[derive(Debug)]
pub struct ManeuverGroup {
    element: Element,
    maneuvers: Vec<Maneuver>,
}

impl ManeuverGroup {
    /// Creates an empty maneuver group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            element: Element::new(ElementKind::ManeuverGroup, name),
            maneuvers: Vec::new(),
        }
    }

    /// Bounds the number of executions (builder pattern).
    #[must_use]
    pub fn with_max_executions(mut self, max: u32) -> Self {
        self.element = self.element.with_max_executions(max);
        self
    }

    /// Adds a maneuver to the group.
    pub fn add_maneuver(&mut self, maneuver: Maneuver) {
        self.maneuvers.push(maneuver);
    }

    /// The group's maneuvers.
    #[inline]
    pub fn maneuvers(&self) -> &[Maneuver] {
        &self.maneuvers
    }

    /// Mutable access for the trigger evaluator and orchestrator.
    #[inline]
    pub fn maneuvers_mut(&mut self) -> &mut [Maneuver] {
        &mut self.maneuvers
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

    /// True once every maneuver has reached Complete.
    pub fn all_maneuvers_complete(&self) -> bool {
        self.maneuvers.iter().all(Maneuver::is_complete)
    }

    /// Starts the group and cascades into its maneuvers.
    pub fn start(&mut self, sim_time: f64, dt: f64, observer: &mut dyn StateObserver) {
        if !self.element.is_triggable() {
            self.element.start(sim_time, dt, observer);
            return;
        }
        self.element.start(sim_time, dt, observer);
        for maneuver in &mut self.maneuvers {
            if maneuver.is_complete() {
                maneuver.reset();
            }
            maneuver.start(sim_time, dt, observer);
        }
    }

    /// Ends still-running maneuvers, then resolves the group itself
    /// (repeat check included).
    pub fn end(&mut self, sim_time: f64, observer: &mut dyn StateObserver) {
        for maneuver in &mut self.maneuvers {
            if maneuver.element().state() == ElementState::Running {
                maneuver.end(sim_time, observer);
            }
        }
        self.element.end(sim_time, observer);
    }

    /// Forces the group and its unfinished maneuvers to Complete.
    pub fn stop(&mut self, observer: &mut dyn StateObserver) {
        for maneuver in &mut self.maneuvers {
            if !maneuver.is_complete() {
                maneuver.stop(observer);
            }
        }
        self.element.stop(observer);
    }

    /// Bottom-up per-tick update: maneuvers first, then completion
    /// aggregation, then own housekeeping.
    pub fn update_state(&mut self, sim_time: f64, observer: &mut dyn StateObserver) {
        for maneuver in &mut self.maneuvers {
            maneuver.update_state(sim_time, observer);
        }
        if self.element.is_active() && self.all_maneuvers_complete() {
            self.element.end(sim_time, observer);
        }
        self.element.update_state();
    }

    /// Recursively returns the group and its subtree to their pristine
    /// pre-run state.
    pub fn reset(&mut self) {
        for maneuver in &mut self.maneuvers {
            maneuver.reset();
        }
        self.element.reset();
    }
}
