//! Action domain - the executable leaves of the story tree.
//!
//! An [`Action`] pairs the shared element state machine with a concrete
//! behavior, dispatched over a closed set of variants:
//! - `UserDefined`: an opaque tag/payload pair handed to an external
//!   handler (the demonstrated concrete variant)
//! - `External`: the seam for third-party behaviors implementing
//!   [`ExternalAction`]
//!
//! Lifecycle (`start`/`end`/`stop`) is driven externally by the
//! orchestrator; variants may intercept lifecycle calls for side effects
//! but always delegate to the element transition logic. `step` performs
//! the per-tick work and never changes lifecycle state itself.

pub mod user;

pub use user::UserDefinedAction;

use core::fmt;

use crate::element::{Element, ElementKind, ElementState, Transition};
use crate::observer::StateObserver;

/// Provenance of an action.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum OriginKind {
    /// Engine-global action (environment, traffic, parameters).
    Global,
    /// Authored action interpreted by an external handler.
    UserDefined,
    /// Internal action bound to a specific entity.
    Private,
}

/// A third-party action behavior plugged into the story tree.
///
/// Implementations own whatever external state they act on (entity
/// handles, routing data); the core never touches it. Cloning is an
/// explicit operation so ownership of externally referenced state stays
/// visible at the call site.
pub trait ExternalAction: Send + Sync {
    /// Stable textual tag identifying the concrete action kind.
    fn type_name(&self) -> &str;

    /// Per-tick update, called only while the owning action is active.
    ///
    /// Must not change lifecycle state; side effects are confined to the
    /// external state this behavior owns.
    fn step(&mut self, sim_time: f64, dt: f64);

    /// Deep-copies this behavior for tree duplication.
    fn duplicate(&self) -> Box<dyn ExternalAction>;

    /// Optional intercept invoked when a start is requested, before the
    /// element transition logic runs.
    fn on_start(&mut self, _sim_time: f64, _dt: f64) {}
}

/// Concrete behavior carried by an [`Action`].
pub enum ActionBehavior {
    /// Opaque tag/payload pair dispatched to an external handler.
    UserDefined(UserDefinedAction),
    /// Third-party behavior behind the [`ExternalAction`] seam.
    External {
        origin: OriginKind,
        behavior: Box<dyn ExternalAction>,
    },
}

impl fmt::Debug for ActionBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserDefined(action) => f.debug_tuple("UserDefined").field(action).finish(),
            Self::External { origin, behavior } => f
                .debug_struct("External")
                .field("origin", origin)
                .field("type_name", &behavior.type_name())
                .finish(),
        }
    }
}

/// Executable leaf of the story tree.
#[derive(Debug)]
pub struct Action {
    element: Element,
    behavior: ActionBehavior,
}

impl Action {
    /// Creates a user-defined action.
    pub fn user_defined(name: impl Into<String>, action: UserDefinedAction) -> Self {
        Self {
            element: Element::new(ElementKind::Action, name),
            behavior: ActionBehavior::UserDefined(action),
        }
    }

    /// Creates an action around a third-party behavior.
    pub fn external(
        name: impl Into<String>,
        origin: OriginKind,
        behavior: Box<dyn ExternalAction>,
    ) -> Self {
        Self {
            element: Element::new(ElementKind::Action, name),
            behavior: ActionBehavior::External { origin, behavior },
        }
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

    /// The action's provenance.
    pub fn origin(&self) -> OriginKind {
        match &self.behavior {
            ActionBehavior::UserDefined(_) => OriginKind::UserDefined,
            ActionBehavior::External { origin, .. } => *origin,
        }
    }

    /// Stable textual tag of the concrete variant.
    pub fn type_name(&self) -> &str {
        match &self.behavior {
            ActionBehavior::UserDefined(action) => action.type_name(),
            ActionBehavior::External { behavior, .. } => behavior.type_name(),
        }
    }

    /// Requests a start, running the variant intercept first.
    ///
    /// The intercept is side-effect only; the element transition logic
    /// alone decides whether the request is legal.
    pub fn start(&mut self, sim_time: f64, dt: f64, observer: &mut dyn StateObserver) {
        match &mut self.behavior {
            ActionBehavior::UserDefined(action) => {
                tracing::info!(
                    action = %self.element.name(),
                    type_tag = %action.type_tag,
                    payload = %action.payload,
                    "starting user defined action"
                );
            }
            ActionBehavior::External { behavior, .. } => behavior.on_start(sim_time, dt),
        }
        self.element.start(sim_time, dt, observer);
    }

    /// Requests natural completion. Actions are single-shot: this always
    /// settles in Complete when legal.
    pub fn end(&mut self, sim_time: f64, observer: &mut dyn StateObserver) {
        self.element.end(sim_time, observer);
    }

    /// Requests forced termination.
    pub fn stop(&mut self, observer: &mut dyn StateObserver) {
        self.element.stop(observer);
    }

    /// Returns the action to its pristine pre-run state.
    pub fn reset(&mut self) {
        self.element.reset();
    }

    /// Per-tick transition housekeeping, see [`Element::update_state`].
    pub fn update_state(&mut self) {
        self.element.update_state();
    }

    /// Whether the action is actively executing this tick.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.element.is_active()
    }

    /// Whether the action is eligible for a start request.
    #[inline]
    pub fn is_triggable(&self) -> bool {
        self.element.is_triggable()
    }

    /// Whether the action has reached Complete. The orchestrator uses
    /// this to decide when to request `end` on the owning event.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.element.state() == ElementState::Complete
    }

    /// Per-tick update, dispatched to the concrete variant.
    ///
    /// Callers invoke this only while [`Action::is_active`] holds.
    pub fn step(&mut self, sim_time: f64, dt: f64) {
        match &mut self.behavior {
            ActionBehavior::UserDefined(action) => action.step(sim_time, dt),
            ActionBehavior::External { behavior, .. } => behavior.step(sim_time, dt),
        }
    }

    /// Deep-copies the action for tree duplication.
    ///
    /// The copy carries the same name and behavior payload but starts
    /// pristine in Standby, ready for its own run.
    pub fn duplicate(&self) -> Self {
        let behavior = match &self.behavior {
            ActionBehavior::UserDefined(action) => ActionBehavior::UserDefined(action.clone()),
            ActionBehavior::External { origin, behavior } => ActionBehavior::External {
                origin: *origin,
                behavior: behavior.duplicate(),
            },
        };
        let mut element = self.element.clone();
        element.reset();
        Self { element, behavior }
    }

    /// Last transition applied to the underlying element.
    #[inline]
    pub fn transition(&self) -> Option<Transition> {
        self.element.transition()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NullObserver;

    struct CountingAction {
        steps: u32,
        starts: u32,
    }

    impl ExternalAction for CountingAction {
        fn type_name(&self) -> &str {
            "CountingAction"
        }

        fn step(&mut self, _sim_time: f64, _dt: f64) {
            self.steps += 1;
        }

        fn duplicate(&self) -> Box<dyn ExternalAction> {
            Box::new(CountingAction {
                steps: self.steps,
                starts: self.starts,
            })
        }

        fn on_start(&mut self, _sim_time: f64, _dt: f64) {
            self.starts += 1;
        }
    }

    fn counting(name: &str) -> Action {
        Action::external(
            name,
            OriginKind::Private,
            Box::new(CountingAction { steps: 0, starts: 0 }),
        )
    }

    #[test]
    fn user_defined_action_runs_through_lifecycle() {
        let mut obs = NullObserver;
        let mut action = Action::user_defined(
            "honk",
            UserDefinedAction::new("sound/horn", "duration=2.0"),
        );

        assert_eq!(action.origin(), OriginKind::UserDefined);
        assert_eq!(action.type_name(), "UserDefinedAction");
        assert!(action.is_triggable());
        assert!(!action.is_complete());

        action.start(0.0, 0.1, &mut obs);
        assert!(action.is_active());

        action.step(0.1, 0.1); // no-op for the user-defined variant

        action.end(0.2, &mut obs);
        assert!(action.is_complete());
        assert!(!action.is_active());
    }

    #[test]
    fn external_intercept_runs_before_transition() {
        let mut obs = NullObserver;
        let mut action = counting("count");

        action.start(0.0, 0.1, &mut obs);
        action.step(0.1, 0.1);
        action.step(0.2, 0.1);

        let ActionBehavior::External { behavior, .. } = &action.behavior else {
            panic!("expected external variant");
        };
        assert_eq!(behavior.type_name(), "CountingAction");
        assert_eq!(action.element().execution_count(), 1);
    }

    #[test]
    fn intercept_never_bypasses_legality() {
        let mut obs = NullObserver;
        let mut action = counting("count");
        action.stop(&mut obs);

        // The intercept may fire, but the transition stays illegal.
        action.start(0.0, 0.1, &mut obs);
        assert!(action.is_complete());
        assert_eq!(action.element().execution_count(), 0);
    }

    #[test]
    fn duplicate_copies_payload_but_starts_pristine() {
        let mut obs = NullObserver;
        let mut action = Action::user_defined(
            "honk",
            UserDefinedAction::new("sound/horn", "duration=2.0"),
        );
        action.start(0.0, 0.1, &mut obs);
        action.end(0.2, &mut obs);

        let copy = action.duplicate();
        assert_eq!(copy.name(), "honk");
        assert_eq!(copy.type_name(), "UserDefinedAction");
        assert!(copy.is_triggable());
        assert_eq!(copy.element().execution_count(), 0);

        // The original is untouched by duplication.
        assert!(action.is_complete());
    }

    #[test]
    fn external_origin_is_preserved() {
        let action = Action::external(
            "env",
            OriginKind::Global,
            Box::new(CountingAction { steps: 0, starts: 0 }),
        );
        assert_eq!(action.origin(), OriginKind::Global);
        assert_eq!(action.duplicate().origin(), OriginKind::Global);
    }
}
