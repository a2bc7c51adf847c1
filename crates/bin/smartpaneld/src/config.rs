//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `smartpanel.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;
use smartpanel_domain::device::{Device, DeviceType};
use smartpanel_domain::error::PanelError;
use smartpanel_domain::registry::DeviceRegistry;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Simulation loop and automation settings.
    pub simulation: SimulationConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Devices shown on the panel, in display order. Empty means the
    /// built-in living room set.
    pub devices: Vec<DeviceConfig>,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Simulation loop configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Sleep between two ticks, in milliseconds.
    pub tick_ms: u64,
    /// Seconds without motion before the lights go off.
    pub idle_timeout_secs: u64,
    /// Whether random automation starts switched on.
    pub automation_enabled: bool,
    /// Fixed seed for a reproducible run. Unset draws from OS entropy.
    pub seed: Option<u64>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// One `[[devices]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceConfig {
    pub id: String,
    pub kind: DeviceType,
}

impl Config {
    /// Load configuration from `smartpanel.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("smartpanel.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
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

    /// Apply overrides from `lookup`. Values that do not parse are ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("SMARTPANEL_HOST") {
            self.server.host = val;
        }
        if let Some(val) = lookup("SMARTPANEL_PORT")
            && let Ok(port) = val.parse()
        {
            self.server.port = port;
        }
        if let Some(val) = lookup("SMARTPANEL_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("SMARTPANEL_TICK_MS")
            && let Ok(tick_ms) = val.parse()
        {
            self.simulation.tick_ms = tick_ms;
        }
        if let Some(val) = lookup("SMARTPANEL_SEED")
            && let Ok(seed) = val.parse()
        {
            self.simulation.seed = Some(seed);
        }
        if let Some(val) = lookup("SMARTPANEL_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.simulation.tick_ms == 0 {
            return Err(ConfigError::Validation(
                "simulation.tick_ms must be non-zero".to_string(),
            ));
        }
        self.registry()?;
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    #[must_use]
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.simulation.tick_ms)
    }

    #[must_use]
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.simulation.idle_timeout_secs)
    }

    /// Build the device registry, falling back to the default set when no
    /// devices are configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Devices`] on a blank or duplicate id.
    pub fn registry(&self) -> Result<DeviceRegistry, ConfigError> {
        if self.devices.is_empty() {
            return Ok(default_registry()?);
        }
        let devices = self
            .devices
            .iter()
            .map(|device| Device::new(device.id.as_str(), device.kind));
        Ok(DeviceRegistry::from_devices(devices)?)
    }
}

/// The living room set: one device of each type.
fn default_registry() -> Result<DeviceRegistry, PanelError> {
    DeviceRegistry::from_devices([
        Device::light("Living Room Light"),
        Device::thermostat("Living Room Thermostat"),
        Device::camera("Front Door Camera"),
    ])
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_ms: 2000,
            idle_timeout_secs: 5,
            automation_enabled: true,
            seed: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "smartpaneld=info,smartpanel=info,tower_http=debug".to_string(),
        }
    }
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
    /// The configured device list is not a valid registry.
    #[error("invalid device list: {0}")]
    Devices(#[from] PanelError),
}
