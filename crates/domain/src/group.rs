//! Device group — a named set of device names, target of ad-hoc bulk
//! operations.
//!
//! Membership is a set (no duplicates). Iteration follows insertion order so
//! the executor gets a deterministic batch order, but no public contract
//! promises a particular ordering.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{HubError, ValidationError};

/// A named set of device names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceGroup {
    pub name: String,
    devices: IndexSet<String>,
}

impl DeviceGroup {
    /// Create a group from a name and an initial membership list.
    /// Duplicate names in the input collapse into one membership.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Validation`] when `name` is empty.
    pub fn new(
        name: impl Into<String>,
        devices: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, HubError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(Self {
            name,
            devices: devices.into_iter().map(Into::into).collect(),
        })
    }

    /// Add a device name; returns `false` if it was already a member.
    pub fn add_device(&mut self, device: impl Into<String>) -> bool {
        self.devices.insert(device.into())
    }

    /// Remove a device name; returns `false` if it was not a member.
    /// Remaining members keep their relative order.
    pub fn remove_device(&mut self, device: &str) -> bool {
        self.devices.shift_remove(device)
    }

    /// Whether `device` is a member.
    #[must_use]
    pub fn contains(&self, device: &str) -> bool {
        self.devices.contains(device)
    }

    /// Iterate over member names in insertion order.
    pub fn device_names(&self) -> impl Iterator<Item = &str> {
        self.devices.iter().map(String::as_str)
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Whether the group has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

impl std::fmt::Display for DeviceGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} devices)", self.name, self.devices.len())
    }
}
