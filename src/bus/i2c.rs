use super::RegisterBus;
use crate::errors::BusError;
use embedded_hal::i2c::{Error as _, ErrorKind, I2c};

#[cfg(feature = "linux-hal")]
use linux_embedded_hal::i2cdev::linux::LinuxI2CError;
#[cfg(feature = "linux-hal")]
use linux_embedded_hal::I2cdev;

impl From<ErrorKind> for BusError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NoAcknowledge(_) => BusError::NoAcknowledge,
            ErrorKind::ArbitrationLoss => BusError::ArbitrationLoss,
            ErrorKind::Bus => BusError::Bus,
            ErrorKind::Overrun => BusError::Overrun,
            other => BusError::Other(other.to_string()),
        }
    }
}

/// I2C bus adapter over any `embedded-hal` I2C implementation
pub struct I2CBus<I> {
    device: I,
}

impl<I: I2c> I2CBus<I> {
    pub fn new(device: I) -> Self {
        Self { device }
    }

    /// Consume self and return the underlying I2C device
    pub fn into_inner(self) -> I {
        self.device
    }
}

#[cfg(feature = "linux-hal")]
impl I2CBus<I2cdev> {
    /// Open a Linux I2C character device, e.g. `/dev/i2c-1`
    pub fn open(path: &str) -> Result<Self, LinuxI2CError> {
        let device = I2cdev::new(path)?;
        Ok(Self::new(device))
    }
}

impl<I: I2c> RegisterBus for I2CBus<I> {
    fn write_register(&mut self, address: u8, register: u8, value: u8) -> Result<(), BusError> {
        self.device
            .write(address, &[register, value])
            .map_err(|e| BusError::from(e.kind()))
    }

    fn read_registers(
        &mut self,
        address: u8,
        register: u8,
        length: u8,
    ) -> Result<Vec<u8>, BusError> {
        let mut buf = vec![0u8; length as usize];
        self.device
            .write_read(address, &[register], &mut buf)
            .map_err(|e| BusError::from(e.kind()))?;
        Ok(buf)
    }
}
