//! Dimmable light — powers itself on when a nonzero brightness is set.

use homehub_domain::device::{Device, DeviceKind};
use homehub_domain::error::ValidationError;
use homehub_domain::state::DeviceState;

const MIN_BRIGHTNESS: i64 = 0;
const MAX_BRIGHTNESS: i64 = 100;

/// A dimmable light.
///
/// Recognised attributes: `power` (boolean), `brightness` (number in
/// `[0, 100]`). Defaults to off at full brightness.
pub struct Light {
    name: String,
    state: DeviceState,
}

impl Light {
    /// Create a light that is off, with brightness at maximum.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: DeviceState::new()
                .with("power", false)
                .with("brightness", MAX_BRIGHTNESS),
        }
    }
}

impl Device for Light {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Light
    }

    fn state(&self) -> DeviceState {
        self.state.clone()
    }

    fn apply_state(&mut self, fragment: &DeviceState) -> Result<(), ValidationError> {
        // Stage the whole fragment, then swap: a failure on any key must
        // leave the committed state untouched.
        let mut staged = self.state.clone();

        if let Some(value) = fragment.get("power") {
            let power = value
                .as_bool()
                .ok_or(ValidationError::ExpectedBool { field: "power" })?;
            staged.set("power", power);
        }

        if let Some(value) = fragment.get("brightness") {
            let level = value.as_i64().ok_or(ValidationError::ExpectedNumber {
                field: "brightness",
            })?;
            if !(MIN_BRIGHTNESS..=MAX_BRIGHTNESS).contains(&level) {
                #[allow(clippy::cast_precision_loss)]
                return Err(ValidationError::OutOfRange {
                    field: "brightness",
                    value: level as f64,
                    min: MIN_BRIGHTNESS as f64,
                    max: MAX_BRIGHTNESS as f64,
                });
            }
            staged.set("brightness", level);
            // A visible brightness implies the light is on, even if the same
            // fragment asked for power = false.
            if level > 0 {
                staged.set("power", true);
            }
        }

        self.state = staged;
        Ok(())
    }

    fn restore_state(&mut self, snapshot: DeviceState) {
        self.state = snapshot;
    }
}
