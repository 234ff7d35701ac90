//! Story-tree containers.
//!
//! Non-leaf elements reuse the element state machine and add child
//! ownership plus repeat-execution semantics. The traversal contract is
//! explicit and tested:
//!
//! - **Activation is top-down** and cascades only across levels whose
//!   children are not trigger-gated: a story board starts its stories, an
//!   act starts its maneuver groups and maneuvers, an event starts its
//!   actions. Acts and events wait for their own triggers.
//! - **Repeat cycles re-arm children**: a starting container resets any
//!   child left in Complete by a previous execution cycle.
//! - **Completion aggregation is bottom-up**: `update_state` recurses
//!   into children first, then inspects their post-transition state to
//!   decide the container's own end, then does its own housekeeping.
//! - **Stop and end cascade** to children before resolving the container
//!   itself; **reset cascades** unconditionally.

mod act;
mod board;
mod event;
mod maneuver;

pub use act::Act;
pub use board::{Story, StoryBoard};
pub use event::{Event, EventPriority};
pub use maneuver::{Maneuver, ManeuverGroup};
