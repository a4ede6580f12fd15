//! Device registry — owns all registered devices by unique name.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use homehub_domain::device::{Device, DeviceSnapshot};
use homehub_domain::error::{ConflictError, NotFoundError};

/// Name-keyed store of boxed devices.
///
/// Names are unique at registration time; insertion order is irrelevant and
/// [`snapshots`](Self::snapshots) guarantees no particular order.
#[derive(Default)]
pub struct DeviceRegistry {
    devices: HashMap<String, Box<dyn Device>>,
}

impl DeviceRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a device under its own name.
    ///
    /// # Errors
    ///
    /// Returns [`ConflictError`] if a device with the same name is already
    /// registered; the registry is unchanged.
    pub fn register(&mut self, device: Box<dyn Device>) -> Result<(), ConflictError> {
        match self.devices.entry(device.name().to_owned()) {
            Entry::Occupied(entry) => Err(ConflictError {
                entity: "Device",
                name: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(device);
                Ok(())
            }
        }
    }

    /// Remove and return the device registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] if no such device exists.
    pub fn deregister(&mut self, name: &str) -> Result<Box<dyn Device>, NotFoundError> {
        self.devices.remove(name).ok_or_else(|| NotFoundError {
            entity: "Device",
            name: name.to_owned(),
        })
    }

    /// Resolve `name` to a shared device reference.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] if no such device exists.
    pub fn get(&self, name: &str) -> Result<&dyn Device, NotFoundError> {
        self.devices
            .get(name)
            .map(Box::as_ref)
            .ok_or_else(|| NotFoundError {
                entity: "Device",
                name: name.to_owned(),
            })
    }

    /// Resolve `name` to an exclusive device reference.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] if no such device exists.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut (dyn Device + 'static), NotFoundError> {
        self.devices
            .get_mut(name)
            .map(Box::as_mut)
            .ok_or_else(|| NotFoundError {
                entity: "Device",
                name: name.to_owned(),
            })
    }

    /// Whether a device is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.devices.contains_key(name)
    }

    /// Point-in-time descriptors of every registered device (no defined
    /// order).
    #[must_use]
    pub fn snapshots(&self) -> Vec<DeviceSnapshot> {
        self.devices.values().map(|device| device.snapshot()).collect()
    }

    /// Number of registered devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
