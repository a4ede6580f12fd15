//! # homehubd — homehub demo daemon
//!
//! Composition root that wires devices, roles, and the hub together and
//! walks through a scripted evening: register the configured devices,
//! create a "Movie Night" scene, execute it as the parent user, show the
//! access gate denying the child user, and log the final device states.
//!
//! ## Dependency rule
//! This is the **only** crate that depends on every other crate.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use homehub_app::hub::Hub;
use homehub_devices::{Light, Lock, Thermostat};
use homehub_domain::access::{Permission, Role, User};
use homehub_domain::device::{Device, DeviceKind};
use homehub_domain::error::HubError;
use homehub_domain::scene::Scene;
use homehub_domain::state::DeviceState;

use config::{Config, DeviceConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.logging.filter))
        .init();

    let admin = User::new("Thomas", admin_role()?);
    let parent = User::new("Zijian", parent_role()?);
    let child = User::new("charlie", child_role()?);

    let mut hub = Hub::new();
    for spec in &config.devices {
        hub.register_device(&admin, build_device(spec))?;
    }
    tracing::info!(devices = config.devices.len(), "hub ready");

    hub.create_scene(&admin, movie_night(&config.devices)?)?;

    tracing::info!(user = %parent, "executing scene as parent");
    hub.execute_scene(&parent, "Movie Night")?;

    tracing::info!(user = %child, "attempting scene as child");
    match hub.execute_scene(&child, "Movie Night") {
        Err(HubError::Authorization(err)) => {
            tracing::warn!(%err, "scene execution denied");
        }
        other => other?,
    }

    for snapshot in hub.all_devices() {
        tracing::info!(device = %snapshot, "final state");
    }
    for event in hub.events() {
        tracing::debug!(%event, "audit");
    }

    Ok(())
}

fn build_device(spec: &DeviceConfig) -> Box<dyn Device> {
    match spec.kind {
        DeviceKind::Light => Box::new(Light::new(spec.name.clone())),
        DeviceKind::Thermostat => Box::new(Thermostat::new(spec.name.clone())),
        DeviceKind::Lock => Box::new(Lock::new(spec.name.clone())),
    }
}

/// The "Movie Night" macro over the configured roster: dim every light,
/// lock every lock, set every thermostat to a cosy 19 °C.
fn movie_night(devices: &[DeviceConfig]) -> Result<Scene, HubError> {
    let mut builder = Scene::builder().name("Movie Night");
    for spec in devices {
        let target = match spec.kind {
            DeviceKind::Light => DeviceState::new().with("power", true).with("brightness", 20),
            DeviceKind::Thermostat => DeviceState::new().with("targetTemperature", 19.0),
            DeviceKind::Lock => DeviceState::new().with("locked", true),
        };
        builder = builder.action(spec.name.clone(), target);
    }
    builder.build()
}

fn admin_role() -> Result<Role, HubError> {
    Role::builder()
        .name("admin")
        .permissions(Permission::ALL)
        .build()
}

fn parent_role() -> Result<Role, HubError> {
    Role::builder()
        .name("parent")
        .permissions([
            Permission::ControlAllDevices,
            Permission::EditScenes,
            Permission::ExecuteScenes,
            Permission::EditGroups,
            Permission::ViewStatus,
        ])
        .build()
}

fn child_role() -> Result<Role, HubError> {
    Role::builder()
        .name("child")
        .permissions([Permission::ControlLights, Permission::ViewStatus])
        .build()
}
