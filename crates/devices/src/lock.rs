//! Door lock — a single boolean attribute.

use homehub_domain::device::{Device, DeviceKind};
use homehub_domain::error::ValidationError;
use homehub_domain::state::DeviceState;

/// A door lock.
///
/// Recognised attribute: `locked` (boolean). Defaults to locked.
pub struct Lock {
    name: String,
    state: DeviceState,
}

impl Lock {
    /// Create a lock in the locked position.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: DeviceState::new().with("locked", true),
        }
    }
}

impl Device for Lock {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Lock
    }

    fn state(&self) -> DeviceState {
        self.state.clone()
    }

    fn apply_state(&mut self, fragment: &DeviceState) -> Result<(), ValidationError> {
        let mut staged = self.state.clone();

        if let Some(value) = fragment.get("locked") {
            let locked = value
                .as_bool()
                .ok_or(ValidationError::ExpectedBool { field: "locked" })?;
            staged.set("locked", locked);
        }

        self.state = staged;
        Ok(())
    }

    fn restore_state(&mut self, snapshot: DeviceState) {
        self.state = snapshot;
    }
}
