use crate::bus::I2CBus;
use crate::config::{BusConfig, DeviceConfig};
use crate::device::SensorDevice;
use crate::errors::{RegistryError, RegistryResult};
use linux_embedded_hal::{Delay, I2cdev};
use tracing::info;

/// Open the configured Linux I2C bus and bring the package up on it
pub fn init_device(
    bus_config: &BusConfig,
    device_config: &DeviceConfig,
) -> RegistryResult<SensorDevice<I2CBus<I2cdev>>> {
    let path = &bus_config.bus.path;
    let bus = I2CBus::<I2cdev>::open(path).map_err(|e| RegistryError::BusOpen {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    info!("[registry] opened bus {}", path);

    let mut delay = Delay;
    let device = SensorDevice::with_config(bus, &mut delay, device_config)?;
    Ok(device)
}
