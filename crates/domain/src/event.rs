//! Event — an immutable audit record of a committed hub operation.
//!
//! Events are appended only after an operation succeeds; a rolled-back batch
//! or a denied request leaves no trace here.

use serde::{Deserialize, Serialize};

use crate::id::EventId;
use crate::time::{self, Timestamp};

/// What happened, with the name of the object it happened to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    DeviceRegistered { device: String },
    DeviceDeregistered { device: String },
    SceneCreated { scene: String },
    SceneDeleted { scene: String },
    SceneExecuted { scene: String },
    GroupCreated { group: String },
    GroupDeleted { group: String },
    GroupApplied { group: String },
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DeviceRegistered { device } => write!(f, "device_registered({device})"),
            Self::DeviceDeregistered { device } => write!(f, "device_deregistered({device})"),
            Self::SceneCreated { scene } => write!(f, "scene_created({scene})"),
            Self::SceneDeleted { scene } => write!(f, "scene_deleted({scene})"),
            Self::SceneExecuted { scene } => write!(f, "scene_executed({scene})"),
            Self::GroupCreated { group } => write!(f, "group_created({group})"),
            Self::GroupDeleted { group } => write!(f, "group_deleted({group})"),
            Self::GroupApplied { group } => write!(f, "group_applied({group})"),
        }
    }
}

/// A committed hub operation: what, who, when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    #[serde(flatten)]
    pub kind: EventKind,
    pub actor: String,
    pub timestamp: Timestamp,
}

impl Event {
    /// Record `kind` as performed by `actor`, stamped now.
    #[must_use]
    pub fn new(kind: EventKind, actor: impl Into<String>) -> Self {
        Self {
            id: EventId::new(),
            kind,
            actor: actor.into(),
            timestamp: time::now(),
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} by {}", self.kind, self.actor)
    }
}
