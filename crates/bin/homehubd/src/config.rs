//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `homehub.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

use homehub_domain::device::DeviceKind;

/// Top-level configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Devices to register at startup.
    pub devices: Vec<DeviceConfig>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// One device to register at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceConfig {
    /// Unique device name.
    pub name: String,
    /// Device class.
    pub kind: DeviceKind,
}

impl Config {
    /// Load configuration from `homehub.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// device roster is inconsistent.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("homehub.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("HOMEHUB_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = std::collections::HashSet::new();
        for device in &self.devices {
            if device.name.is_empty() {
                return Err(ConfigError::Validation(
                    "device name must not be empty".to_string(),
                ));
            }
            if !seen.insert(device.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate device name '{}'",
                    device.name
                )));
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            devices: default_devices(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "homehubd=info,homehub=info".to_string(),
        }
    }
}

/// The demo roster used when no config file names any devices.
fn default_devices() -> Vec<DeviceConfig> {
    [
        ("LivingRoomLight1", DeviceKind::Light),
        ("LivingRoomLight2", DeviceKind::Light),
        ("DownstairsThermostat", DeviceKind::Thermostat),
        ("FrontDoorLock", DeviceKind::Lock),
    ]
    .into_iter()
    .map(|(name, kind)| DeviceConfig {
        name: name.to_string(),
        kind,
    })
    .collect()
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
