//! Acts: trigger-gated containers of maneuver groups.

use crate::element::{Element, ElementKind, ElementState};
use crate::observer::StateObserver;
use crate::story::maneuver::ManeuverGroup;

/// A container of maneuver groups, started by its own trigger.
///
/// Maneuver groups carry no triggers, so starting the act cascades into
/// them (and through them into their maneuvers). Events deeper down stay
/// trigger-gated.
#[derive(Debug)]
pub struct Act {
    element: Element,
    groups: Vec<ManeuverGroup>,
}

impl Act {
    /// Creates an empty act.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            element: Element::new(ElementKind::Act, name),
            groups: Vec::new(),
        }
    }

    /// Adds a maneuver group to the act.
    pub fn add_group(&mut self, group: ManeuverGroup) {
        self.groups.push(group);
    }

    /// The act's maneuver groups.
    #[inline]
    pub fn groups(&self) -> &[ManeuverGroup] {
        &self.groups
    }

    /// Mutable access for the trigger evaluator and orchestrator.
    #[inline]
    pub fn groups_mut(&mut self) -> &mut [ManeuverGroup] {
        &mut self.groups
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

    /// True once every maneuver group has reached Complete.
    pub fn all_groups_complete(&self) -> bool {
        self.groups.iter().all(ManeuverGroup::is_complete)
    }

    /// Starts the act and cascades into its maneuver groups.
    pub fn start(&mut self, sim_time: f64, dt: f64, observer: &mut dyn StateObserver) {
        if !self.element.is_triggable() {
            self.element.start(sim_time, dt, observer);
            return;
        }
        self.element.start(sim_time, dt, observer);
        for group in &mut self.groups {
            if group.is_complete() {
                group.reset();
            }
            group.start(sim_time, dt, observer);
        }
    }

    /// Ends still-running maneuver groups, then the act itself.
    pub fn end(&mut self, sim_time: f64, observer: &mut dyn StateObserver) {
        for group in &mut self.groups {
            if group.element().state() == ElementState::Running {
                group.end(sim_time, observer);
            }
        }
        self.element.end(sim_time, observer);
    }

    /// Forces the act and its unfinished subtree to Complete.
    pub fn stop(&mut self, observer: &mut dyn StateObserver) {
        for group in &mut self.groups {
            if !group.is_complete() {
                group.stop(observer);
            }
        }
        self.element.stop(observer);
    }

    /// Bottom-up per-tick update: groups first, then completion
    /// aggregation, then own housekeeping.
    pub fn update_state(&mut self, sim_time: f64, observer: &mut dyn StateObserver) {
        for group in &mut self.groups {
            group.update_state(sim_time, observer);
        }
        if self.element.is_active() && self.all_groups_complete() {
            self.element.end(sim_time, observer);
        }
        self.element.update_state();
    }

    /// Recursively returns the act and its subtree to their pristine
    /// pre-run state.
    pub fn reset(&mut self) {
        for group in &mut self.groups {
            group.reset();
        }
        self.element.reset();
    }
}
