//! Hub — the transactional command-dispatch facade.
//!
//! Every operation follows the same shape: authorize the acting user, resolve
//! names against the owned stores, mutate. Batch operations (scene execution,
//! group application) additionally run under an undo log: each device's state
//! is snapshotted immediately before its fragment is applied, and the first
//! validation failure stops the batch and replays every captured snapshot, so
//! the batch commits as a whole or leaves no trace.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use homehub_domain::access::{Permission, User};
use homehub_domain::device::{Device, DeviceKind, DeviceSnapshot};
use homehub_domain::error::{
    AuthorizationError, ConflictError, ExecutionError, HubError, NotFoundError,
};
use homehub_domain::event::{Event, EventKind};
use homehub_domain::group::DeviceGroup;
use homehub_domain::scene::Scene;
use homehub_domain::state::DeviceState;

use crate::registry::DeviceRegistry;

/// The hub facade: device registry, scene and group stores, access gate, and
/// the transactional executor.
///
/// Designed for a single logical actor; all mutation goes through `&mut self`,
/// so a concurrent port wraps the whole hub behind one mutual-exclusion
/// boundary.
#[derive(Default)]
pub struct Hub {
    registry: DeviceRegistry,
    scenes: HashMap<String, Scene>,
    groups: HashMap<String, DeviceGroup>,
    events: Vec<Event>,
}

impl Hub {
    /// Create an empty hub.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a device under its own name.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Authorization`] if `user` lacks
    /// [`Permission::RegisterDevice`], or [`HubError::Conflict`] if the name
    /// is taken. Nothing changes on failure.
    #[tracing::instrument(skip(self, user, device), fields(user = %user.name, device = %device.name()))]
    pub fn register_device(&mut self, user: &User, device: Box<dyn Device>) -> Result<(), HubError> {
        Self::authorize(user, Permission::RegisterDevice)?;
        let name = device.name().to_owned();
        self.registry.register(device)?;
        self.record(EventKind::DeviceRegistered { device: name }, user);
        Ok(())
    }

    /// Remove the device registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Authorization`] if `user` lacks
    /// [`Permission::DeregisterDevice`], or [`HubError::NotFound`] if the
    /// name does not resolve.
    #[tracing::instrument(skip(self, user), fields(user = %user.name))]
    pub fn deregister_device(&mut self, user: &User, name: &str) -> Result<(), HubError> {
        Self::authorize(user, Permission::DeregisterDevice)?;
        self.registry.deregister(name)?;
        self.record(
            EventKind::DeviceDeregistered {
                device: name.to_owned(),
            },
            user,
        );
        Ok(())
    }

    /// Store a scene under its name.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Authorization`] if `user` lacks
    /// [`Permission::EditScenes`], or [`HubError::Conflict`] if a scene with
    /// the same name exists.
    #[tracing::instrument(skip(self, user, scene), fields(user = %user.name, scene = %scene.name))]
    pub fn create_scene(&mut self, user: &User, scene: Scene) -> Result<(), HubError> {
        Self::authorize(user, Permission::EditScenes)?;
        match self.scenes.entry(scene.name.clone()) {
            Entry::Occupied(entry) => Err(ConflictError {
                entity: "Scene",
                name: entry.key().clone(),
            }
            .into()),
            Entry::Vacant(entry) => {
                let name = entry.key().clone();
                entry.insert(scene);
                self.record(EventKind::SceneCreated { scene: name }, user);
                Ok(())
            }
        }
    }

    /// Delete the scene stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Authorization`] if `user` lacks
    /// [`Permission::EditScenes`], or [`HubError::NotFound`] if the name
    /// does not resolve.
    #[tracing::instrument(skip(self, user), fields(user = %user.name))]
    pub fn delete_scene(&mut self, user: &User, name: &str) -> Result<(), HubError> {
        Self::authorize(user, Permission::EditScenes)?;
        if self.scenes.remove(name).is_none() {
            return Err(NotFoundError {
                entity: "Scene",
                name: name.to_owned(),
            }
            .into());
        }
        self.record(
            EventKind::SceneDeleted {
                scene: name.to_owned(),
            },
            user,
        );
        Ok(())
    }

    /// Execute the scene stored under `scene_name` as one all-or-nothing
    /// batch, in stored action order.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Authorization`] if `user` lacks
    /// [`Permission::ExecuteScenes`] (no device is touched),
    /// [`HubError::NotFound`] if the scene or one of its target devices does
    /// not resolve (no device is touched), or [`HubError::Execution`] if a
    /// device rejected its fragment mid-batch — in which case every
    /// participating device has been restored to its exact pre-operation
    /// snapshot.
    #[tracing::instrument(skip(self, user), fields(user = %user.name))]
    pub fn execute_scene(&mut self, user: &User, scene_name: &str) -> Result<(), HubError> {
        Self::authorize(user, Permission::ExecuteScenes)?;
        let scene = self.scenes.get(scene_name).ok_or_else(|| NotFoundError {
            entity: "Scene",
            name: scene_name.to_owned(),
        })?;
        let targets: Vec<(String, DeviceState)> = scene
            .actions
            .iter()
            .map(|action| (action.device.clone(), action.target.clone()))
            .collect();
        self.run_transaction(&targets)?;
        self.record(
            EventKind::SceneExecuted {
                scene: scene_name.to_owned(),
            },
            user,
        );
        tracing::info!(scene = %scene_name, targets = targets.len(), "scene committed");
        Ok(())
    }

    /// Create a group from a name and a membership list.
    ///
    /// Membership is not checked against the registry here; a stale name
    /// surfaces as [`HubError::NotFound`] when the group is applied.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Authorization`] if `user` lacks
    /// [`Permission::EditGroups`], [`HubError::Validation`] for an empty
    /// group name, or [`HubError::Conflict`] if the name is taken.
    #[tracing::instrument(skip(self, user, devices), fields(user = %user.name))]
    pub fn create_group(
        &mut self,
        user: &User,
        name: &str,
        devices: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<(), HubError> {
        Self::authorize(user, Permission::EditGroups)?;
        if self.groups.contains_key(name) {
            return Err(ConflictError {
                entity: "Group",
                name: name.to_owned(),
            }
            .into());
        }
        let group = DeviceGroup::new(name, devices)?;
        self.groups.insert(name.to_owned(), group);
        self.record(
            EventKind::GroupCreated {
                group: name.to_owned(),
            },
            user,
        );
        Ok(())
    }

    /// Delete the group stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Authorization`] if `user` lacks
    /// [`Permission::EditGroups`], or [`HubError::NotFound`] if the name
    /// does not resolve.
    #[tracing::instrument(skip(self, user), fields(user = %user.name))]
    pub fn delete_group(&mut self, user: &User, name: &str) -> Result<(), HubError> {
        Self::authorize(user, Permission::EditGroups)?;
        if self.groups.remove(name).is_none() {
            return Err(NotFoundError {
                entity: "Group",
                name: name.to_owned(),
            }
            .into());
        }
        self.record(
            EventKind::GroupDeleted {
                group: name.to_owned(),
            },
            user,
        );
        Ok(())
    }

    /// Look up a group. Read-only and deliberately unauthorized; callers
    /// needing protection wrap it.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::NotFound`] if the name does not resolve.
    pub fn get_group(&self, name: &str) -> Result<&DeviceGroup, HubError> {
        self.groups.get(name).ok_or_else(|| {
            NotFoundError {
                entity: "Group",
                name: name.to_owned(),
            }
            .into()
        })
    }

    /// Apply one fragment to every member of the group, in the group's
    /// insertion order, as one all-or-nothing batch.
    ///
    /// Authorization is per device class: `user` must hold the control
    /// permission for every member's kind (or
    /// [`Permission::ControlAllDevices`]), checked after membership resolves
    /// but before any device is mutated.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::NotFound`] if the group or a member device does
    /// not resolve, [`HubError::Authorization`] if any member's class is not
    /// covered — both with zero devices touched — or [`HubError::Execution`]
    /// if a member rejected the fragment mid-batch, after rollback.
    #[tracing::instrument(skip(self, user, fragment), fields(user = %user.name, fragment = %fragment))]
    pub fn apply_to_group(
        &mut self,
        user: &User,
        group_name: &str,
        fragment: &DeviceState,
    ) -> Result<(), HubError> {
        let group = self.groups.get(group_name).ok_or_else(|| NotFoundError {
            entity: "Group",
            name: group_name.to_owned(),
        })?;
        let members: Vec<String> = group.device_names().map(str::to_owned).collect();
        for name in &members {
            let device = self.registry.get(name)?;
            Self::authorize_control(user, device.kind())?;
        }
        let targets: Vec<(String, DeviceState)> = members
            .into_iter()
            .map(|name| (name, fragment.clone()))
            .collect();
        self.run_transaction(&targets)?;
        self.record(
            EventKind::GroupApplied {
                group: group_name.to_owned(),
            },
            user,
        );
        tracing::info!(group = %group_name, targets = targets.len(), "group application committed");
        Ok(())
    }

    /// Point-in-time descriptors of every registered device (no defined
    /// order). Read-only.
    #[must_use]
    pub fn all_devices(&self) -> Vec<DeviceSnapshot> {
        self.registry.snapshots()
    }

    /// An independent clone of one device's committed state. Read-only.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::NotFound`] if the name does not resolve.
    pub fn device_state(&self, name: &str) -> Result<DeviceState, HubError> {
        Ok(self.registry.get(name)?.state())
    }

    /// Audit records of committed operations, oldest first.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    fn authorize(user: &User, permission: Permission) -> Result<(), AuthorizationError> {
        if user.role.has(permission) {
            Ok(())
        } else {
            Err(AuthorizationError {
                user: user.name.clone(),
                permission,
            })
        }
    }

    fn authorize_control(user: &User, kind: DeviceKind) -> Result<(), AuthorizationError> {
        if user.role.has(Permission::ControlAllDevices) {
            return Ok(());
        }
        Self::authorize(user, kind.control_permission())
    }

    /// Apply `targets` in order as one unit.
    ///
    /// Resolves every name first (zero devices touched on a miss), then runs
    /// the forward pass, snapshotting each device into the undo log before
    /// its `apply_state`. The first rejection rolls the log back and
    /// surfaces as [`ExecutionError`].
    fn run_transaction(&mut self, targets: &[(String, DeviceState)]) -> Result<(), HubError> {
        for (name, _) in targets {
            self.registry.get(name)?;
        }

        let mut undo_log: Vec<(String, DeviceState)> = Vec::with_capacity(targets.len());
        for (name, fragment) in targets {
            let device = self
                .registry
                .get_mut(name)
                .expect("target resolved before the forward pass");
            undo_log.push((name.clone(), device.state()));
            if let Err(source) = device.apply_state(fragment) {
                tracing::warn!(device = %name, error = %source, "device rejected fragment, rolling back");
                self.rollback(undo_log);
                return Err(ExecutionError {
                    device: name.clone(),
                    fragment: fragment.clone(),
                    source,
                }
                .into());
            }
        }
        Ok(())
    }

    /// Replay captured snapshots, newest first, so a device that appears in
    /// the batch twice ends at its earliest (true pre-operation) snapshot.
    ///
    /// Restores are unconditional and cannot fail validation. A device
    /// vanishing between the forward pass and here breaks the single-actor
    /// contract, which no caller can recover from.
    fn rollback(&mut self, undo_log: Vec<(String, DeviceState)>) {
        for (name, snapshot) in undo_log.into_iter().rev() {
            let device = self
                .registry
                .get_mut(&name)
                .expect("device vanished during rollback");
            device.restore_state(snapshot);
        }
    }

    fn record(&mut self, kind: EventKind, user: &User) {
        let event = Event::new(kind, user.name.clone());
        tracing::debug!(event = %event, "operation committed");
        self.events.push(event);
    }
}
