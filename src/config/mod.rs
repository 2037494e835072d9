pub mod bus_config;
pub mod sensor_config;

pub use bus_config::{load_bus_config, BusConfig, BusEntry};
pub use sensor_config::{
    load_sensor_config, DeviceConfig, OutputFormat, SamplingConfig, SensorConfig,
};

use crate::errors::{ConfigError, ConfigResult};
use std::fs;

/// Read a TOML file into any deserializable config struct
fn read_toml<T: serde::de::DeserializeOwned>(path: &str) -> ConfigResult<T> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::LoadError {
        path: path.to_string(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}
