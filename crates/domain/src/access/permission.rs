//! Permission — enumerated capability tags gating hub operations.

use serde::{Deserialize, Serialize};

/// A capability a role may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Umbrella grant covering every device class.
    ControlAllDevices,
    ControlLights,
    ControlThermostats,
    ControlLocks,
    /// Reserved for per-user device ownership; not yet checked anywhere.
    ControlOwnDevices,
    EditGroups,
    EditScenes,
    ExecuteScenes,
    ViewStatus,
    RegisterDevice,
    DeregisterDevice,
}

impl Permission {
    /// Every permission, for building unrestricted roles.
    pub const ALL: [Self; 11] = [
        Self::ControlAllDevices,
        Self::ControlLights,
        Self::ControlThermostats,
        Self::ControlLocks,
        Self::ControlOwnDevices,
        Self::EditGroups,
        Self::EditScenes,
        Self::ExecuteScenes,
        Self::ViewStatus,
        Self::RegisterDevice,
        Self::DeregisterDevice,
    ];
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Self::ControlAllDevices => "control_all_devices",
            Self::ControlLights => "control_lights",
            Self::ControlThermostats => "control_thermostats",
            Self::ControlLocks => "control_locks",
            Self::ControlOwnDevices => "control_own_devices",
            Self::EditGroups => "edit_groups",
            Self::EditScenes => "edit_scenes",
            Self::ExecuteScenes => "execute_scenes",
            Self::ViewStatus => "view_status",
            Self::RegisterDevice => "register_device",
            Self::DeregisterDevice => "deregister_device",
        };
        f.write_str(tag)
    }
}
