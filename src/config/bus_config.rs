use crate::errors::{ConfigError, ConfigResult};
use serde::Deserialize;

/// Root structure of `buses.toml`
#[derive(Debug, Default, Deserialize)]
pub struct BusConfig {
    #[serde(default)]
    pub bus: BusEntry,
}

/// The I2C bus the package hangs off
#[derive(Debug, Deserialize)]
pub struct BusEntry {
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for BusEntry {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

fn default_path() -> String {
    "/dev/i2c-1".to_string()
}

impl BusConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.bus.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "bus.path".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Load bus config file
pub fn load_bus_config(path: &str) -> ConfigResult<BusConfig> {
    let parsed: BusConfig = super::read_toml(path)?;
    parsed.validate()?;
    Ok(parsed)
}
