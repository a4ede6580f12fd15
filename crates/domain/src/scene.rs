//! Scene — a named, ordered macro of device state changes.
//!
//! A scene pairs device names with target state fragments. The stored order
//! is significant: it is the order the executor applies (and, on failure,
//! unwinds) the actions.

use serde::{Deserialize, Serialize};

use crate::error::{HubError, ValidationError};
use crate::state::DeviceState;

/// One step of a scene: a device name and the fragment to apply to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneAction {
    pub device: String,
    pub target: DeviceState,
}

impl std::fmt::Display for SceneAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <- {}", self.device, self.target)
    }
}

/// A reusable macro applied to multiple devices as one transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    pub actions: Vec<SceneAction>,
}

impl Scene {
    /// Create a builder for constructing a [`Scene`].
    #[must_use]
    pub fn builder() -> SceneBuilder {
        SceneBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Validation`] when `name` is empty
    /// ([`ValidationError::EmptyName`]). An empty action list is allowed;
    /// executing it is a successful no-op.
    pub fn validate(&self) -> Result<(), HubError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Scene`].
#[derive(Debug, Default)]
pub struct SceneBuilder {
    name: Option<String>,
    actions: Vec<SceneAction>,
}

impl SceneBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append an action; actions execute in the order they are added.
    #[must_use]
    pub fn action(mut self, device: impl Into<String>, target: DeviceState) -> Self {
        self.actions.push(SceneAction {
            device: device.into(),
            target,
        });
        self
    }

    /// Consume the builder, validate, and return a [`Scene`].
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Validation`] if `name` is missing or empty.
    pub fn build(self) -> Result<Scene, HubError> {
        let scene = Scene {
            name: self.name.unwrap_or_default(),
            actions: self.actions,
        };
        scene.validate()?;
        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dim_lights() -> DeviceState {
        DeviceState::new().with("power", true).with("brightness", 20)
    }

    #[test]
    fn should_build_valid_scene_when_name_provided() {
        let scene = Scene::builder()
            .name("Movie Night")
            .action("LivingRoomLight1", dim_lights())
            .action("FrontDoorLock", DeviceState::new().with("locked", true))
            .build()
            .unwrap();
        assert_eq!(scene.name, "Movie Night");
        assert_eq!(scene.actions.len(), 2);
    }

    #[test]
    fn should_preserve_action_order() {
        let scene = Scene::builder()
            .name("Ordered")
            .action("A", DeviceState::new())
            .action("B", DeviceState::new())
            .action("C", DeviceState::new())
            .build()
            .unwrap();
        let devices: Vec<_> = scene.actions.iter().map(|a| a.device.as_str()).collect();
        assert_eq!(devices, ["A", "B", "C"]);
    }

    #[test]
    fn should_allow_scene_without_actions() {
        let scene = Scene::builder().name("Empty").build().unwrap();
        assert!(scene.actions.is_empty());
    }

    #[test]
    fn should_return_validation_error_when_name_is_empty() {
        let result = Scene::builder().action("A", DeviceState::new()).build();
        assert!(matches!(
            result,
            Err(HubError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_display_action_as_device_and_fragment() {
        let action = SceneAction {
            device: "Light1".to_string(),
            target: DeviceState::new().with("brightness", 20),
        };
        assert_eq!(action.to_string(), "Light1 <- {brightness: 20}");
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let scene = Scene::builder()
            .name("Movie Night")
            .action("Light1", dim_lights())
            .build()
            .unwrap();
        let json = serde_json::to_string(&scene).unwrap();
        let parsed: Scene = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, scene);
    }
}
