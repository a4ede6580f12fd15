//! Device — the capability contract every controllable device implements.
//!
//! The hub's executor only ever sees this trait: validate-and-apply a partial
//! state update, restore a captured snapshot, hand out state clones. New
//! device classes are added by implementing [`Device`], never by editing the
//! transactional layer.

use serde::{Deserialize, Serialize};

use crate::access::Permission;
use crate::error::ValidationError;
use crate::state::DeviceState;

/// Fixed type tag identifying a device's class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Light,
    Thermostat,
    Lock,
}

impl DeviceKind {
    /// The class-specific permission required to control devices of this
    /// kind. [`Permission::ControlAllDevices`] grants every class.
    #[must_use]
    pub fn control_permission(self) -> Permission {
        match self {
            Self::Light => Permission::ControlLights,
            Self::Thermostat => Permission::ControlThermostats,
            Self::Lock => Permission::ControlLocks,
        }
    }
}

impl std::fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => f.write_str("light"),
            Self::Thermostat => f.write_str("thermostat"),
            Self::Lock => f.write_str("lock"),
        }
    }
}

/// Capability contract for a controllable device.
///
/// A device owns exactly one current [`DeviceState`]. All mutation goes
/// through [`apply_state`](Self::apply_state), which validates each
/// recognised key of the fragment and commits the whole fragment or nothing.
pub trait Device {
    /// The device's unique, immutable name.
    fn name(&self) -> &str;

    /// The device's fixed class tag.
    fn kind(&self) -> DeviceKind;

    /// An independent clone of the current committed state. Mutating the
    /// returned value never affects the device.
    fn state(&self) -> DeviceState;

    /// Validate `fragment` against this device's rules and commit it.
    ///
    /// Keys absent from the fragment are left untouched; unrecognised keys
    /// are ignored. A fragment that fails on any key leaves the committed
    /// state exactly as it was before the call.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for the first invalid key encountered.
    fn apply_state(&mut self, fragment: &DeviceState) -> Result<(), ValidationError>;

    /// Overwrite the current state with `snapshot`, unconditionally.
    ///
    /// Reserved for the executor's rollback path; never validates and never
    /// fails.
    fn restore_state(&mut self, snapshot: DeviceState);

    /// A read-only descriptor of this device (name, kind, state clone).
    fn snapshot(&self) -> DeviceSnapshot {
        DeviceSnapshot {
            name: self.name().to_owned(),
            kind: self.kind(),
            state: self.state(),
        }
    }
}

/// Read-only view of a device at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceSnapshot {
    pub name: String,
    pub kind: DeviceKind,
    pub state: DeviceState,
}

impl std::fmt::Display for DeviceSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.name, self.kind, self.state)
    }
}
