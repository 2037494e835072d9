use crate::bus::RegisterBus;
use crate::config::DeviceConfig;
use crate::errors::{InitResult, ReadResult};
use crate::messages::{AxisReading, Sample};
use crate::sensors::{
    AccelChannel, GyroChannel, MagChannel, Ready, RegisterMap, Subdevice, Uninitialized,
};
use embedded_hal::delay::DelayNs;
use tracing::{info, warn};

/// A BMX055 package: three ready sub-devices sharing one bus.
///
/// The device owns the bus and lends it to each channel per operation. Pass
/// `&mut bus` instead of `bus` to keep ownership on the caller's side.
pub struct SensorDevice<B> {
    bus: B,
    accel: AccelChannel,
    gyro: GyroChannel,
    mag: MagChannel,
}

impl<B: RegisterBus> SensorDevice<B> {
    /// Initialize all three sub-devices at their default addresses.
    pub fn new<D: DelayNs + ?Sized>(bus: B, delay: &mut D) -> InitResult<Self> {
        Self::with_config(bus, delay, &DeviceConfig::default())
    }

    /// Initialize all three sub-devices, failing on the first error.
    pub fn with_config<D: DelayNs + ?Sized>(
        mut bus: B,
        delay: &mut D,
        config: &DeviceConfig,
    ) -> InitResult<Self> {
        let accel = bring_up(
            AccelChannel::<Uninitialized>::with_address(config.accel_address),
            &mut bus,
            delay,
            config.verify_chip_id,
        )?;
        let gyro = bring_up(
            GyroChannel::<Uninitialized>::with_address(config.gyro_address),
            &mut bus,
            delay,
            config.verify_chip_id,
        )?;
        let mag = bring_up(
            MagChannel::<Uninitialized>::with_address(config.mag_address),
            &mut bus,
            delay,
            config.verify_chip_id,
        )?;

        info!(
            "[bmx055] ready: accel={:#04x} gyro={:#04x} mag={:#04x}",
            accel.address(),
            gyro.address(),
            mag.address()
        );

        Ok(Self {
            bus,
            accel,
            gyro,
            mag,
        })
    }

    pub fn read_accel(&mut self) -> ReadResult<(i32, i32, i32)> {
        self.accel.read(&mut self.bus)
    }

    pub fn read_gyro(&mut self) -> ReadResult<(i32, i32, i32)> {
        self.gyro.read(&mut self.bus)
    }

    pub fn read_mag(&mut self) -> ReadResult<(i32, i32, i32)> {
        self.mag.read(&mut self.bus)
    }

    /// Read accel, gyro and mag in turn. Any failure discards the whole sample.
    pub fn read_all(&mut self) -> ReadResult<Sample> {
        Ok(Sample {
            accel: AxisReading::from(self.read_accel()?),
            gyro: AxisReading::from(self.read_gyro()?),
            mag: AxisReading::from(self.read_mag()?),
        })
    }

    pub fn accel(&self) -> &AccelChannel {
        &self.accel
    }

    pub fn gyro(&self) -> &GyroChannel {
        &self.gyro
    }

    pub fn mag(&self) -> &MagChannel {
        &self.mag
    }

    /// Consume the device and return the bus
    pub fn release(self) -> B {
        self.bus
    }
}

fn bring_up<K, B, D>(
    channel: Subdevice<K, Uninitialized>,
    bus: &mut B,
    delay: &mut D,
    verify_chip_id: bool,
) -> InitResult<Subdevice<K, Ready>>
where
    K: RegisterMap,
    B: RegisterBus,
    D: DelayNs + ?Sized,
{
    let ready = channel.initialize(bus, delay)?;
    if verify_chip_id {
        ready.verify_chip_id(bus).map_err(|e| {
            warn!("[{}] identity check failed: {}", K::CHANNEL, e);
            e
        })?;
    }
    Ok(ready)
}
