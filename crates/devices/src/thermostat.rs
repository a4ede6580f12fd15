//! Thermostat — setting a target temperature powers it on.

use homehub_domain::device::{Device, DeviceKind};
use homehub_domain::error::ValidationError;
use homehub_domain::state::DeviceState;

const MIN_TEMP: f64 = 5.0;
const MAX_TEMP: f64 = 30.0;
const DEFAULT_TEMP: f64 = 20.0;

/// A thermostat with a bounded target temperature.
///
/// Recognised attributes: `power` (boolean), `targetTemperature` (number in
/// `[5.0, 30.0]` °C). Defaults to off at 20.0 °C.
pub struct Thermostat {
    name: String,
    state: DeviceState,
}

impl Thermostat {
    /// Create a thermostat that is off, at the default target temperature.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: DeviceState::new()
                .with("power", false)
                .with("targetTemperature", DEFAULT_TEMP),
        }
    }
}

impl Device for Thermostat {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Thermostat
    }

    fn state(&self) -> DeviceState {
        self.state.clone()
    }

    fn apply_state(&mut self, fragment: &DeviceState) -> Result<(), ValidationError> {
        let mut staged = self.state.clone();

        if let Some(value) = fragment.get("power") {
            let power = value
                .as_bool()
                .ok_or(ValidationError::ExpectedBool { field: "power" })?;
            staged.set("power", power);
        }

        if let Some(value) = fragment.get("targetTemperature") {
            let target = value.as_f64().ok_or(ValidationError::ExpectedNumber {
                field: "targetTemperature",
            })?;
            if !(MIN_TEMP..=MAX_TEMP).contains(&target) {
                return Err(ValidationError::OutOfRange {
                    field: "targetTemperature",
                    value: target,
                    min: MIN_TEMP,
                    max: MAX_TEMP,
                });
            }
            staged.set("targetTemperature", target);
            // Asking for a temperature means asking for heating/cooling.
            staged.set("power", true);
        }

        self.state = staged;
        Ok(())
    }

    fn restore_state(&mut self, snapshot: DeviceState) {
        self.state = snapshot;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homehub_domain::state::AttributeValue;

    #[test]
    fn should_default_to_off_at_twenty_degrees() {
        let thermostat = Thermostat::new("Thermo1");
        let state = thermostat.state();
        assert_eq!(state.get("power"), Some(AttributeValue::Bool(false)));
        assert_eq!(
            state.get("targetTemperature"),
            Some(AttributeValue::Float(20.0))
        );
    }

    #[test]
    fn should_power_on_implicitly_when_temperature_is_set() {
        let mut thermostat = Thermostat::new("Thermo1");
        thermostat
            .apply_state(&DeviceState::new().with("targetTemperature", 22.0))
            .unwrap();
        let state = thermostat.state();
        assert_eq!(state.get("power"), Some(AttributeValue::Bool(true)));
        assert_eq!(
            state.get("targetTemperature"),
            Some(AttributeValue::Float(22.0))
        );
    }

    #[test]
    fn should_accept_integer_temperature() {
        let mut thermostat = Thermostat::new("Thermo1");
        thermostat
            .apply_state(&DeviceState::new().with("targetTemperature", 22))
            .unwrap();
        assert_eq!(
            thermostat.state().get("targetTemperature"),
            Some(AttributeValue::Float(22.0))
        );
    }

    #[test]
    fn should_reject_temperature_above_range() {
        let mut thermostat = Thermostat::new("Thermo1");
        let result = thermostat.apply_state(&DeviceState::new().with("targetTemperature", 31.0));
        assert!(matches!(
            result,
            Err(ValidationError::OutOfRange {
                field: "targetTemperature",
                ..
            })
        ));
    }

    #[test]
    fn should_reject_temperature_below_range() {
        let mut thermostat = Thermostat::new("Thermo1");
        let result = thermostat.apply_state(&DeviceState::new().with("targetTemperature", 4.0));
        assert!(result.is_err());
    }

    #[test]
    fn should_accept_temperature_boundaries() {
        let mut thermostat = Thermostat::new("Thermo1");
        thermostat
            .apply_state(&DeviceState::new().with("targetTemperature", 5.0))
            .unwrap();
        thermostat
            .apply_state(&DeviceState::new().with("targetTemperature", 30.0))
            .unwrap();
        assert_eq!(
            thermostat.state().get("targetTemperature"),
            Some(AttributeValue::Float(30.0))
        );
    }

    #[test]
    fn should_reject_non_boolean_power() {
        let mut thermostat = Thermostat::new("Thermo1");
        let result = thermostat.apply_state(&DeviceState::new().with("power", 1.0));
        assert!(matches!(
            result,
            Err(ValidationError::ExpectedBool { field: "power" })
        ));
    }

    #[test]
    fn should_reject_non_numeric_temperature() {
        let mut thermostat = Thermostat::new("Thermo1");
        let result = thermostat.apply_state(&DeviceState::new().with("targetTemperature", false));
        assert!(matches!(
            result,
            Err(ValidationError::ExpectedNumber {
                field: "targetTemperature"
            })
        ));
    }

    #[test]
    fn should_leave_state_untouched_when_fragment_partially_invalid() {
        let mut thermostat = Thermostat::new("Thermo1");
        let before = thermostat.state();
        let result = thermostat.apply_state(
            &DeviceState::new()
                .with("power", true)
                .with("targetTemperature", 35.0),
        );
        assert!(result.is_err());
        assert_eq!(thermostat.state(), before);
    }

    #[test]
    fn should_apply_explicit_power_without_temperature() {
        let mut thermostat = Thermostat::new("Thermo1");
        thermostat
            .apply_state(&DeviceState::new().with("power", true))
            .unwrap();
        assert_eq!(
            thermostat.state().get("power"),
            Some(AttributeValue::Bool(true))
        );
    }

    #[test]
    fn should_restore_snapshot_without_validation() {
        let mut thermostat = Thermostat::new("Thermo1");
        let snapshot = DeviceState::new()
            .with("power", true)
            .with("targetTemperature", 35.0);
        thermostat.restore_state(snapshot.clone());
        assert_eq!(thermostat.state(), snapshot);
    }
}
