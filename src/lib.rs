//! Driver for the Bosch BMX055 9-axis sensor package.
//!
//! The package exposes an accelerometer, a gyroscope and a magnetometer as
//! three devices on one I2C bus. [`SensorDevice`] brings all three up with a
//! fixed startup configuration and decodes their sample registers into signed
//! integer counts. No unit conversion or calibration is applied.

// Public modules
pub mod bus;
pub mod config;
pub mod device;
pub mod errors;
pub mod messages;
#[cfg(feature = "linux-hal")]
pub mod registry;
pub mod scheduler;
pub mod sensors;

// Re-export commonly used types
pub use bus::{I2CBus, RegisterBus};
pub use config::{load_bus_config, load_sensor_config, DeviceConfig, SensorConfig};
pub use device::SensorDevice;
pub use errors::{BusError, ConfigError, InitError, ReadError};
pub use messages::{AxisReading, Sample, SampleMessage};
pub use scheduler::{run_sampling, SamplingStats};
pub use sensors::{
    AccelChannel, Channel, GyroChannel, MagChannel, Ready, Subdevice, Uninitialized,
};

use tracing_subscriber::EnvFilter;

/// Initialize tracing with RUST_LOG support, defaulting to `info`
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();
}
