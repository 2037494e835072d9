//! Sub-device handles for the three functions of the BMX055 package.
//!
//! Each function (accelerometer, gyroscope, magnetometer) answers on its own
//! bus address and is described by a [`RegisterMap`] kind: its register map,
//! its startup sequence and its sample layout, all as compile-time constants.
//! A [`Subdevice`] handle starts out [`Uninitialized`] and only becomes
//! [`Ready`], and therefore readable, by running its startup sequence.

pub mod accel;
pub mod gyro;
pub mod mag;

pub use self::accel::{decode_accel, Accel};
pub use self::gyro::{decode_gyro, Gyro};
pub use self::mag::{decode_mag, Mag};

use crate::bus::RegisterBus;
use crate::errors::{BusError, InitError, InitResult, ReadError, ReadResult};
use embedded_hal::delay::DelayNs;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use tracing::{debug, info, warn};

/// Number of bytes in one X/Y/Z sample burst, for every channel
pub const SAMPLE_LEN: usize = 6;

/// Identifies one function of the package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Accel,
    Gyro,
    Mag,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Accel => "accel",
            Channel::Gyro => "gyro",
            Channel::Mag => "mag",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of a sub-device startup sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStep {
    /// Write `value` to `register`
    Write { register: u8, value: u8 },
    /// Block for `ms` milliseconds before the next step
    Delay { ms: u32 },
}

/// Fixed register map and sample layout of one sub-device
pub trait RegisterMap {
    const CHANNEL: Channel;
    const DEFAULT_ADDRESS: u8;
    /// Every address the sub-device can be strapped to
    const ADDRESSES: &'static [u8];
    const CHIP_ID_REGISTER: u8;
    const CHIP_ID: u8;
    /// First register of the X/Y/Z sample burst
    const DATA_REGISTER: u8;
    const INIT_SEQUENCE: &'static [InitStep];
    /// Significant bits of the X, Y and Z fields
    const AXIS_BITS: [u32; 3];

    fn decode(raw: &[u8; SAMPLE_LEN]) -> (i32, i32, i32);
}

/// Typestate: the startup sequence has not run
#[derive(Debug, Clone, Copy)]
pub struct Uninitialized;

/// Typestate: the startup sequence completed, samples may be read
#[derive(Debug, Clone, Copy)]
pub struct Ready;

/// Handle for one sub-device at a fixed bus address.
///
/// The handle never owns the bus; every operation borrows it.
#[derive(Debug)]
pub struct Subdevice<K, S = Ready> {
    address: u8,
    _marker: PhantomData<(K, S)>,
}

pub type AccelChannel<S = Ready> = Subdevice<Accel, S>;
pub type GyroChannel<S = Ready> = Subdevice<Gyro, S>;
pub type MagChannel<S = Ready> = Subdevice<Mag, S>;

impl<K: RegisterMap, S> Subdevice<K, S> {
    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn channel(&self) -> Channel {
        K::CHANNEL
    }
}

impl<K: RegisterMap> Subdevice<K, Uninitialized> {
    pub fn new() -> Self {
        Self::with_address(K::DEFAULT_ADDRESS)
    }

    pub fn with_address(address: u8) -> Self {
        Self {
            address,
            _marker: PhantomData,
        }
    }

    /// Run the startup sequence.
    ///
    /// Stops at the first failed write; the remaining registers are left
    /// untouched and no ready handle is produced.
    pub fn initialize<B, D>(self, bus: &mut B, delay: &mut D) -> InitResult<Subdevice<K, Ready>>
    where
        B: RegisterBus + ?Sized,
        D: DelayNs + ?Sized,
    {
        for step in K::INIT_SEQUENCE {
            match *step {
                InitStep::Write { register, value } => {
                    debug!(
                        "[{}] write {:#04x} <- {:#04x} at {:#04x}",
                        K::CHANNEL,
                        register,
                        value,
                        self.address
                    );
                    bus.write_register(self.address, register, value)
                        .map_err(|source| {
                            warn!(
                                "[{}] failed to configure register {:#04x}: {}",
                                K::CHANNEL,
                                register,
                                source
                            );
                            InitError::WriteFailed {
                                channel: K::CHANNEL,
                                register,
                                source,
                            }
                        })?;
                }
                InitStep::Delay { ms } => {
                    debug!("[{}] settle {}ms", K::CHANNEL, ms);
                    delay.delay_ms(ms);
                }
            }
        }

        info!("[{}] initialized at {:#04x}", K::CHANNEL, self.address);
        Ok(Subdevice {
            address: self.address,
            _marker: PhantomData,
        })
    }
}

impl<K: RegisterMap> Default for Subdevice<K, Uninitialized> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: RegisterMap> Subdevice<K, Ready> {
    /// Read one X/Y/Z sample burst and decode it.
    pub fn read<B: RegisterBus + ?Sized>(&self, bus: &mut B) -> ReadResult<(i32, i32, i32)> {
        let bytes = bus
            .read_registers(self.address, K::DATA_REGISTER, SAMPLE_LEN as u8)
            .map_err(|source| ReadError::Bus {
                channel: K::CHANNEL,
                source,
            })?;
        decode_sample::<K>(&bytes)
    }

    /// Check the chip-ID register against the value the datasheet documents.
    ///
    /// The magnetometer only answers after its power bit is set, which the
    /// startup sequence does, so this lives on the ready handle.
    pub fn verify_chip_id<B: RegisterBus + ?Sized>(&self, bus: &mut B) -> InitResult<()> {
        let register = K::CHIP_ID_REGISTER;
        let bytes = bus
            .read_registers(self.address, register, 1)
            .map_err(|source| InitError::ReadFailed {
                channel: K::CHANNEL,
                register,
                source,
            })?;

        match bytes.first() {
            Some(&actual) if actual == K::CHIP_ID => {
                debug!("[{}] chip ID {:#04x} confirmed", K::CHANNEL, actual);
                Ok(())
            }
            Some(&actual) => Err(InitError::WrongChipId {
                channel: K::CHANNEL,
                expected: K::CHIP_ID,
                actual,
            }),
            None => Err(InitError::ReadFailed {
                channel: K::CHANNEL,
                register,
                source: BusError::Other("no data returned".to_string()),
            }),
        }
    }
}

/// Decode a raw burst as returned by the bus, rejecting any length but six.
pub fn decode_sample<K: RegisterMap>(bytes: &[u8]) -> ReadResult<(i32, i32, i32)> {
    match bytes.len().cmp(&SAMPLE_LEN) {
        Ordering::Less => Err(ReadError::ShortRead {
            channel: K::CHANNEL,
            expected: SAMPLE_LEN,
            actual: bytes.len(),
        }),
        Ordering::Greater => Err(ReadError::UnexpectedLength {
            channel: K::CHANNEL,
            expected: SAMPLE_LEN,
            actual: bytes.len(),
        }),
        Ordering::Equal => {
            let mut raw = [0u8; SAMPLE_LEN];
            raw.copy_from_slice(bytes);
            Ok(K::decode(&raw))
        }
    }
}

/// Reinterpret the low `bits` bits of `raw` as two's complement.
///
/// `raw` must already be masked to `bits` bits, and `bits` must be in
/// `1..=31`.
pub fn sign_extend(raw: i32, bits: u32) -> i32 {
    debug_assert!(
        (1..=31).contains(&bits),
        "sign_extend: field width {} outside 1..=31",
        bits
    );
    if raw > (1 << (bits - 1)) - 1 {
        // 1 << 31 is i32::MIN; the wrap gives the exact result at that width
        raw.wrapping_sub(1 << bits)
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_extend_boundaries() {
        assert_eq!(sign_extend(0, 12), 0);
        assert_eq!(sign_extend(2047, 12), 2047);
        assert_eq!(sign_extend(2048, 12), -2048);
        assert_eq!(sign_extend(4095, 12), -1);
        assert_eq!(sign_extend(4095, 13), 4095);
        assert_eq!(sign_extend(4096, 13), -4096);
        assert_eq!(sign_extend(16383, 15), 16383);
        assert_eq!(sign_extend(16384, 15), -16384);
        assert_eq!(sign_extend(32767, 16), 32767);
        assert_eq!(sign_extend(32768, 16), -32768);
        assert_eq!(sign_extend(65535, 16), -1);
    }

    #[test]
    fn test_sign_extend_width_limits() {
        assert_eq!(sign_extend(0, 1), 0);
        assert_eq!(sign_extend(1, 1), -1);
        assert_eq!(sign_extend(0x3FFF_FFFF, 31), 0x3FFF_FFFF);
        assert_eq!(sign_extend(0x4000_0000, 31), -0x4000_0000);
        assert_eq!(sign_extend(0x7FFF_FFFF, 31), -1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "outside 1..=31")]
    fn test_sign_extend_zero_width_panics() {
        sign_extend(0, 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "outside 1..=31")]
    fn test_sign_extend_full_word_panics() {
        sign_extend(-1, 32);
    }

    #[test]
    fn test_decode_sample_rejects_short_read() {
        let err = decode_sample::<Accel>(&[0x00, 0x10, 0x00]).unwrap_err();
        assert_eq!(
            err,
            ReadError::ShortRead {
                channel: Channel::Accel,
                expected: 6,
                actual: 3,
            }
        );
    }

    #[test]
    fn test_decode_sample_rejects_empty_read() {
        let err = decode_sample::<Mag>(&[]).unwrap_err();
        assert!(matches!(err, ReadError::ShortRead { actual: 0, .. }));
        assert_eq!(err.channel(), Channel::Mag);
    }

    #[test]
    fn test_decode_sample_rejects_overlong_read() {
        let err = decode_sample::<Gyro>(&[0u8; 7]).unwrap_err();
        assert!(matches!(
            err,
            ReadError::UnexpectedLength {
                channel: Channel::Gyro,
                expected: 6,
                actual: 7,
            }
        ));
    }

    #[test]
    fn test_decode_sample_dispatches_to_channel_layout() {
        let bytes = [0xFF, 0xFF, 0x00, 0x00, 0x01, 0x80];
        assert_eq!(decode_sample::<Gyro>(&bytes).unwrap(), (-1, 0, -32767));
    }

    #[test]
    fn test_channel_display() {
        assert_eq!(Channel::Accel.to_string(), "accel");
        assert_eq!(Channel::Gyro.to_string(), "gyro");
        assert_eq!(Channel::Mag.to_string(), "mag");
    }

    #[test]
    fn test_handle_addresses() {
        let accel = AccelChannel::<Uninitialized>::new();
        assert_eq!(accel.address(), 0x18);
        assert_eq!(accel.channel(), Channel::Accel);

        let mag = MagChannel::<Uninitialized>::with_address(0x12);
        assert_eq!(mag.address(), 0x12);
    }

    #[test]
    fn test_every_sequence_starts_with_a_write_and_ends_with_a_delay() {
        fn check<K: RegisterMap>() {
            assert!(matches!(K::INIT_SEQUENCE.first(), Some(InitStep::Write { .. })));
            assert!(matches!(K::INIT_SEQUENCE.last(), Some(InitStep::Delay { .. })));
            assert!(K::ADDRESSES.contains(&K::DEFAULT_ADDRESS));
        }
        check::<Accel>();
        check::<Gyro>();
        check::<Mag>();
    }
}
