use crate::errors::{ConfigError, ConfigResult};
use crate::sensors::{Accel, Gyro, Mag, RegisterMap};
use serde::Deserialize;

/// Root structure of `sensors.toml`
#[derive(Debug, Default, Deserialize)]
pub struct SensorConfig {
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub sampling: SamplingConfig,
}

/// Bus addresses and startup options of the package
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    pub accel_address: u8,
    pub gyro_address: u8,
    pub mag_address: u8,
    /// Read back each sub-device's chip ID after startup
    pub verify_chip_id: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            accel_address: Accel::DEFAULT_ADDRESS,
            gyro_address: Gyro::DEFAULT_ADDRESS,
            mag_address: Mag::DEFAULT_ADDRESS,
            verify_chip_id: false,
        }
    }
}

impl DeviceConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        check_address::<Accel>("device.accel_address", self.accel_address)?;
        check_address::<Gyro>("device.gyro_address", self.gyro_address)?;
        check_address::<Mag>("device.mag_address", self.mag_address)?;
        Ok(())
    }
}

fn check_address<K: RegisterMap>(field: &str, address: u8) -> ConfigResult<()> {
    if K::ADDRESSES.contains(&address) {
        return Ok(());
    }
    let allowed: Vec<String> = K::ADDRESSES.iter().map(|a| format!("{:#04x}", a)).collect();
    Err(ConfigError::InvalidValue {
        field: field.to_string(),
        reason: format!(
            "{:#04x} is not a {} address (expected one of {})",
            address,
            K::CHANNEL,
            allowed.join(", ")
        ),
    })
}

/// How samples leave the process
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `info` log line per sample
    #[default]
    Log,
    /// One JSON object per line on stdout
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub device_id: String,
    /// Samples per second
    pub frequency: u32,
    pub format: OutputFormat,
    /// Stop after this many samples; run until interrupted when absent
    pub max_samples: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            device_id: "bmx055".to_string(),
            frequency: 10,
            format: OutputFormat::Log,
            max_samples: None,
        }
    }
}

impl SamplingConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.frequency == 0 || self.frequency > 1000 {
            return Err(ConfigError::InvalidValue {
                field: "sampling.frequency".to_string(),
                reason: format!("{} Hz is outside 1..=1000", self.frequency),
            });
        }
        Ok(())
    }
}

impl SensorConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        self.device.validate()?;
        self.sampling.validate()
    }
}

/// Loads config from TOML file
pub fn load_sensor_config(path: &str) -> ConfigResult<SensorConfig> {
    let parsed: SensorConfig = super::read_toml(path)?;
    parsed.validate()?;
    Ok(parsed)
}
