//! The user-defined action variant.

/// An authored action carrying an opaque type tag and payload.
///
/// The pair is interpreted by an external handler registered with the
/// host application; the core only transports it. The lifecycle
/// transition completes even if the payload turns out uninterpretable —
/// a malformed payload is the handler's problem, never the state
/// machine's.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserDefinedAction {
    /// Opaque tag selecting the external handler.
    pub type_tag: String,
    /// Opaque payload forwarded to the handler.
    pub payload: String,
}

impl UserDefinedAction {
    /// Creates a user-defined action from its tag/payload pair.
    pub fn new(type_tag: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            type_tag: type_tag.into(),
            payload: payload.into(),
        }
    }

    /// Stable textual tag of this variant.
    pub fn type_name(&self) -> &'static str {
        "UserDefinedAction"
    }

    /// Per-tick update. The work happens in the external handler, so the
    /// core-side step is a no-op.
    pub fn step(&mut self, _sim_time: f64, _dt: f64) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carries_tag_and_payload_verbatim() {
        let action = UserDefinedAction::new("custom/flash_lights", "count=3;interval=0.5");
        assert_eq!(action.type_tag, "custom/flash_lights");
        assert_eq!(action.payload, "count=3;interval=0.5");
        assert_eq!(action.type_name(), "UserDefinedAction");
    }

    #[test]
    fn clone_is_a_deep_value_copy() {
        let action = UserDefinedAction::new("a", "b");
        let copy = action.clone();
        assert_eq!(action, copy);
    }
}
