//! Pool of externally injected actions.
//!
//! Hosts can push actions into a running simulation from outside the
//! scenario file — over UDP, from a GUI, or from scripting. The transport
//! is out of scope here; the pool owns the injected actions, starts them,
//! steps them alongside the scripted tree, and discards them once
//! complete.

use scenario_core::{Action, StateObserver};
use tracing::{debug, info, warn};

/// Error returned when an injected action is rejected.
#[derive(Debug, thiserror::Error)]
pub enum InjectError {
    /// An action of the same type is already being serviced; injecting a
    /// second one would fight the first over the same entity state.
    #[error("action of type `{type_name}` already ongoing")]
    AlreadyOngoing {
        /// Type tag of the conflicting action.
        type_name: String,
    },
}

/// Owns and services externally injected actions.
///
/// At most one action per type name is pooled at a time. Each serviced
/// action runs the ordinary element lifecycle: started from Standby,
/// stepped while active, pruned once Complete.
#[derive(Debug, Default)]
pub struct InjectedActionPool {
    actions: Vec<Action>,
}

impl InjectedActionPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of actions currently pooled.
    #[inline]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// True when no actions are pooled.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// The pooled actions.
    #[inline]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Adds an action, rejecting duplicates by type name.
    pub fn add(&mut self, action: Action) -> Result<(), InjectError> {
        if let Some(ongoing) = self
            .actions
            .iter()
            .find(|a| a.type_name() == action.type_name())
        {
            warn!(
                type_name = %action.type_name(),
                ongoing = %ongoing.name(),
                "injected action of this type already ongoing, skipping"
            );
            return Err(InjectError::AlreadyOngoing {
                type_name: action.type_name().to_string(),
            });
        }

        info!(action = %action.name(), type_name = %action.type_name(), "adding injected action");
        self.actions.push(action);
        Ok(())
    }

    /// Services the pool for one tick and returns the number of actions
    /// still pooled.
    ///
    /// Newly injected actions are started, active ones are stepped, and
    /// completed ones are pruned — in that order, so an atomic action
    /// injected this tick can finish and disappear within it.
    pub fn step(&mut self, sim_time: f64, dt: f64, observer: &mut dyn StateObserver) -> usize {
        for action in &mut self.actions {
            if action.is_triggable() {
                action.start(sim_time, dt, observer);
            }
            if action.is_active() {
                action.step(sim_time, dt);
            }
            action.update_state();
        }
        self.prune_completed();
        self.actions.len()
    }

    /// Drops completed actions, returning how many were pruned.
    pub fn prune_completed(&mut self) -> usize {
        let before = self.actions.len();
        self.actions.retain(|action| {
            if action.is_complete() {
                debug!(action = %action.name(), "injected action finished");
                false
            } else {
                true
            }
        });
        before - self.actions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenario_core::{ExternalAction, NullObserver, OriginKind};

    /// Counts down per step; the host decides when to end it.
    struct TimedAction {
        ticks_left: u32,
    }

    impl ExternalAction for TimedAction {
        fn type_name(&self) -> &str {
            "TimedAction"
        }

        fn step(&mut self, _sim_time: f64, _dt: f64) {
            self.ticks_left = self.ticks_left.saturating_sub(1);
        }

        fn duplicate(&self) -> Box<dyn ExternalAction> {
            Box::new(TimedAction {
                ticks_left: self.ticks_left,
            })
        }
    }

    fn timed(name: &str, ticks: u32) -> Action {
        Action::external(name, OriginKind::Private, Box::new(TimedAction { ticks_left: ticks }))
    }

    #[test]
    fn rejects_duplicate_type() {
        let mut pool = InjectedActionPool::new();
        pool.add(timed("first", 3)).unwrap();

        let err = pool.add(timed("second", 1)).unwrap_err();
        assert!(matches!(err, InjectError::AlreadyOngoing { ref type_name } if type_name == "TimedAction"));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn services_full_lifecycle() {
        let mut obs = NullObserver;
        let mut pool = InjectedActionPool::new();
        pool.add(timed("speed", 2)).unwrap();

        // First tick starts and steps the action.
        assert_eq!(pool.step(0.0, 0.1, &mut obs), 1);
        assert!(pool.actions()[0].is_active());

        // Host decides the action is done and ends it; the next tick
        // prunes it.
        for action in &mut pool.actions {
            action.end(0.2, &mut obs);
        }
        assert_eq!(pool.step(0.2, 0.1, &mut obs), 0);
        assert!(pool.is_empty());
    }

    #[test]
    fn prune_reports_count() {
        let mut obs = NullObserver;
        let mut pool = InjectedActionPool::new();
        pool.add(timed("speed", 1)).unwrap();
        pool.actions[0].stop(&mut obs);
        assert_eq!(pool.prune_completed(), 1);
        assert!(pool.is_empty());
    }

    #[test]
    fn type_slot_frees_up_after_completion() {
        let mut obs = NullObserver;
        let mut pool = InjectedActionPool::new();
        pool.add(timed("first", 1)).unwrap();
        pool.actions[0].stop(&mut obs);
        pool.prune_completed();

        // Same type injectable again once the first finished.
        pool.add(timed("second", 1)).unwrap();
        assert_eq!(pool.len(), 1);
    }
}
