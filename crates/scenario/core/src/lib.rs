//! Deterministic scenario-execution logic shared across embedders.
//!
//! `scenario-core` defines the story-element state machine, the action
//! contract with its concrete variants, and the six container kinds of the
//! story tree (story board → story → act → maneuver group → maneuver →
//! event → action). An external orchestrator walks the tree once per tick,
//! evaluates triggers, and requests transitions; this crate guarantees that
//! every request is interpreted consistently and that the observable state
//! is always one of exactly three values.
pub mod action;
pub mod element;
pub mod observer;
pub mod story;
pub use action::{Action, ActionBehavior, ExternalAction, OriginKind, UserDefinedAction};
pub use element::{Element, ElementKind, ElementState, Transition};
pub use observer::{NullObserver, StateObserver};
pub use story::{Act, Event, EventPriority, Maneuver, ManeuverGroup, Story, StoryBoard};
