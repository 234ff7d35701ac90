//! Story-element lifecycle state machine.
//!
//! Every node in the story tree — from the story board down to individual
//! actions — shares the same lifecycle: it waits in standby, runs, and
//! completes. Transitions are *requests* interpreted against the current
//! state, not unconditional writes: an out-of-order request is logged and
//! ignored, so multiple independent callers (trigger evaluator, parent
//! container, external API) can drive the same element within one tick
//! without corrupting it.

use crate::observer::StateObserver;

/// Kind of a story-tree node, fixed at construction.
///
/// The discriminants are stable integer codes exposed to notification
/// sinks; changing them alters the embedding API.
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
#[repr(i32)]
pub enum ElementKind {
    /// Root of the story tree.
    StoryBoard = 1,
    /// A story groups acts.
    Story = 2,
    /// An act groups maneuver groups.
    Act = 3,
    /// A maneuver group groups maneuvers and may repeat.
    ManeuverGroup = 4,
    /// A maneuver groups events.
    Maneuver = 5,
    /// An event groups actions and may repeat.
    Event = 6,
    /// A leaf action performing simulation work each tick.
    Action = 7,
}

impl ElementKind {
    /// Returns the stable integer code sent to notification sinks.
    #[inline]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Returns true for kinds that carry a repeat-execution attribute.
    ///
    /// Repeatable kinds cycle Standby → Running → Standby until their
    /// execution limit is reached; all other kinds run once and complete.
    #[inline]
    pub const fn is_repeatable(self) -> bool {
        matches!(self, ElementKind::ManeuverGroup | ElementKind::Event)
    }
}

/// Externally observable lifecycle stage of an element.
///
/// No sequence of operations ever produces a value outside these three.
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
#[repr(i32)]
pub enum ElementState {
    /// Armed and waiting for a start request.
    Standby = 1,
    /// Actively executing.
    Running = 2,
    /// Finished, either naturally or by force.
    Complete = 3,
}

impl ElementState {
    /// Returns the stable integer code sent to notification sinks.
    #[inline]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Last transition applied to an element.
///
/// A transition is valid for the tick in which it was set plus one
/// housekeeping cycle; [`Element::update_state`] clears it afterwards. The
/// absence of a transition is modeled as `Option::None` on the element.
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
pub enum Transition {
    /// Standby → Running.
    Start,
    /// Natural completion; repeatable kinds may settle back in Standby.
    End,
    /// Forced termination, straight to Complete.
    Stop,
    /// Considered but kept idle: an explicit Standby → Standby re-arm.
    Skip,
}

/// A node of the story tree: state, transition, and execution counters.
///
/// Elements are created once when the scenario tree is built and live for
/// the whole simulation; [`Element::reset`] returns one to its pristine
/// pre-run state without reallocation, enabling scenario restart.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    kind: ElementKind,
    name: String,
    state: ElementState,
    transition: Option<Transition>,
    execution_count: u32,
    max_executions: Option<u32>,
    /// State changed this tick; keeps the transition visible one more
    /// housekeeping cycle so containers don't miss it on the activation
    /// frame.
    changed: bool,
}

impl Element {
    /// Creates an element in Standby with no executions and no bound.
    pub fn new(kind: ElementKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            state: ElementState::Standby,
            transition: None,
            execution_count: 0,
            max_executions: None,
            changed: false,
        }
    }

    /// Bounds the number of executions (builder pattern).
    ///
    /// Only meaningful for repeatable kinds; other kinds complete after
    /// their first execution regardless.
    #[must_use]
    pub fn with_max_executions(mut self, max: u32) -> Self {
        self.max_executions = Some(max);
        self
    }

    /// The element's kind, fixed at construction.
    #[inline]
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Identifier used for diagnostics and notification.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current lifecycle stage.
    #[inline]
    pub fn state(&self) -> ElementState {
        self.state
    }

    /// Last transition applied, if still within its visibility window.
    #[inline]
    pub fn transition(&self) -> Option<Transition> {
        self.transition
    }

    /// Number of times this element has been started.
    #[inline]
    pub fn execution_count(&self) -> u32 {
        self.execution_count
    }

    /// Execution bound, `None` meaning unbounded.
    #[inline]
    pub fn max_executions(&self) -> Option<u32> {
        self.max_executions
    }

    /// Whether the element is actively executing this tick.
    ///
    /// An element mid-exit is never reported active: even though `state`
    /// may still read Running for one tick, a pending End or Stop
    /// transition excludes it.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == ElementState::Running
            && !matches!(
                self.transition,
                Some(Transition::End) | Some(Transition::Stop)
            )
    }

    /// Whether the element is eligible for a start request.
    #[inline]
    pub fn is_triggable(&self) -> bool {
        self.state == ElementState::Standby
    }

    /// Whether the element has reached Complete.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.state == ElementState::Complete
    }

    /// Requests a start: legal only from Standby.
    ///
    /// On success the element moves to Running and its execution count is
    /// incremented. An illegal request changes nothing; a diagnostic is
    /// logged and the caller may retry later or ignore.
    pub fn start(&mut self, _sim_time: f64, _dt: f64, observer: &mut dyn StateObserver) {
        if self.state == ElementState::Standby {
            self.transition = Some(Transition::Start);
            self.set_state(ElementState::Running, observer);
            self.execution_count += 1;
        } else {
            tracing::warn!(
                element = %self.name,
                from = %self.state,
                "invalid start transition request, state unchanged"
            );
        }
    }

    /// Requests forced termination: legal from Standby or Running.
    ///
    /// This is the cancellation primitive: it forces the element to
    /// Complete regardless of pending triggers or execution limits.
    pub fn stop(&mut self, observer: &mut dyn StateObserver) {
        if matches!(self.state, ElementState::Standby | ElementState::Running) {
            self.transition = Some(Transition::Stop);
            self.set_state(ElementState::Complete, observer);
        } else {
            tracing::warn!(
                element = %self.name,
                from = %self.state,
                "invalid stop transition request, state unchanged"
            );
        }
    }

    /// Requests natural completion: legal from Running or Standby.
    ///
    /// Standby is allowed because atomic elements may complete without
    /// ever running. Repeatable kinds under their execution limit settle
    /// back in Standby, eligible to run again; everything else settles in
    /// Complete.
    pub fn end(&mut self, _sim_time: f64, observer: &mut dyn StateObserver) {
        if matches!(self.state, ElementState::Running | ElementState::Standby) {
            self.transition = Some(Transition::End);

            if self.kind.is_repeatable() {
                match self.max_executions {
                    Some(max) if self.execution_count >= max => {
                        tracing::info!(
                            element = %self.name,
                            executions = self.execution_count,
                            "element complete after reaching execution limit"
                        );
                        self.set_state(ElementState::Complete, observer);
                    }
                    _ => self.set_state(ElementState::Standby, observer),
                }
            } else {
                // No repeat attribute: execute once.
                self.set_state(ElementState::Complete, observer);
            }
        } else {
            tracing::warn!(
                element = %self.name,
                from = %self.state,
                "invalid end transition request, state unchanged"
            );
        }
    }

    /// Re-arms the element without ending the scenario run.
    ///
    /// From Standby this records a Skip transition (considered, but kept
    /// idle — distinguished from "never touched"). From Running it stops
    /// mid-execution and immediately re-arms, bypassing the
    /// execution-count check used by [`Element::end`]. Illegal from
    /// Complete.
    pub fn standby(&mut self, observer: &mut dyn StateObserver) {
        match self.state {
            ElementState::Standby => {
                self.transition = Some(Transition::Skip);
                self.set_state(ElementState::Standby, observer);
            }
            ElementState::Running => {
                self.transition = Some(Transition::End);
                self.set_state(ElementState::Standby, observer);
            }
            ElementState::Complete => {
                tracing::warn!(
                    element = %self.name,
                    from = %self.state,
                    "invalid standby transition request, state unchanged"
                );
            }
        }
    }

    /// Returns the element to its pristine pre-run state.
    ///
    /// Unconditional and idempotent; emits no notification.
    pub fn reset(&mut self) {
        self.state = ElementState::Standby;
        self.transition = None;
        self.execution_count = 0;
        self.changed = false;
    }

    /// Per-tick transition housekeeping.
    ///
    /// A transition set in tick N stays observable through tick N+1's
    /// housekeeping (the change flag covers the activation frame), then is
    /// cleared. Legality of further requests depends on `state` alone, so
    /// a same-tick double call of the same operation is judged against the
    /// already-updated state.
    pub fn update_state(&mut self) {
        if self.changed {
            self.changed = false;
        } else {
            self.transition = None;
        }
    }

    /// Applies the new state and notifies the observer.
    ///
    /// The observer is invoked on every call, including transitions that
    /// leave the state value unchanged (e.g. the Skip re-arm).
    fn set_state(&mut self, state: ElementState, observer: &mut dyn StateObserver) {
        if state != self.state {
            tracing::debug!(
                element = %self.name,
                kind = %self.kind,
                from = %self.state,
                to = %state,
                "element state change"
            );
        }
        self.state = state;
        self.changed = true;
        observer.on_state_change(&self.name, self.kind, self.state);
    }
}
