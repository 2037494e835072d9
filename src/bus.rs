pub mod i2c;

pub use self::i2c::I2CBus;

use crate::errors::BusError;

/// Register-oriented access to devices on a shared two-wire bus.
///
/// Implementations perform exactly one transaction per call and never retry;
/// any failure is reported to the caller as a [`BusError`]. Callers sharing one
/// bus across threads must serialize access themselves, since interleaved
/// transactions to the same device corrupt multi-byte register sequences.
pub trait RegisterBus {
    /// Write a single byte to `register` of the device at `address`.
    fn write_register(&mut self, address: u8, register: u8, value: u8) -> Result<(), BusError>;

    /// Read `length` consecutive bytes starting at `register`.
    ///
    /// A transport may return fewer bytes than requested; the caller decides
    /// whether that is an error.
    fn read_registers(&mut self, address: u8, register: u8, length: u8)
        -> Result<Vec<u8>, BusError>;
}

impl<B: RegisterBus + ?Sized> RegisterBus for &mut B {
    fn write_register(&mut self, address: u8, register: u8, value: u8) -> Result<(), BusError> {
        (**self).write_register(address, register, value)
    }

    fn read_registers(
        &mut self,
        address: u8,
        register: u8,
        length: u8,
    ) -> Result<Vec<u8>, BusError> {
        (**self).read_registers(address, register, length)
    }
}
