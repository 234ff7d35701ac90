//! Host-side helpers around the scenario core.
//!
//! This crate wires externally injected actions and notification sinks
//! into the tick loop of an embedding application:
//! - [`inject`] services actions pushed in from outside the scenario
//!   (UDP bridges, GUIs, scripting), deduplicated by type
//! - [`recorder`] provides a recording notification sink for hosts and
//!   integration-style tests
pub mod inject;
pub mod recorder;

pub use inject::{InjectError, InjectedActionPool};
pub use recorder::{StateChange, StateChangeLog};
