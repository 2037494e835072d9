use super::{sign_extend, Channel, InitStep, RegisterMap, SAMPLE_LEN};

// Register addresses for the BMX055 gyroscope
const CHIP_ID_REG: u8 = 0x00;
const RATE_X_LSB: u8 = 0x02;
const RANGE: u8 = 0x0F;
const BW: u8 = 0x10;
const LPM1: u8 = 0x11;

const CHIP_ID: u8 = 0x0F;

// RANGE: +/- 125 dps
const RANGE_125DPS: u8 = 0x04;
// BW: 100 Hz ODR, 32 Hz filter bandwidth
const ODR_100HZ: u8 = 0x07;
// LPM1: normal mode
const MODE_NORMAL: u8 = 0x00;

const SETTLE_MS: u32 = 10;

/// Gyroscope: full 16-bit samples
#[derive(Debug, Clone, Copy)]
pub struct Gyro;

impl RegisterMap for Gyro {
    const CHANNEL: Channel = Channel::Gyro;
    const DEFAULT_ADDRESS: u8 = 0x68;
    const ADDRESSES: &'static [u8] = &[0x68, 0x69];
    const CHIP_ID_REGISTER: u8 = CHIP_ID_REG;
    const CHIP_ID: u8 = CHIP_ID;
    const DATA_REGISTER: u8 = RATE_X_LSB;
    const INIT_SEQUENCE: &'static [InitStep] = &[
        InitStep::Write {
            register: RANGE,
            value: RANGE_125DPS,
        },
        InitStep::Write {
            register: BW,
            value: ODR_100HZ,
        },
        InitStep::Write {
            register: LPM1,
            value: MODE_NORMAL,
        },
        InitStep::Delay { ms: SETTLE_MS },
    ];
    const AXIS_BITS: [u32; 3] = [16, 16, 16];

    fn decode(raw: &[u8; SAMPLE_LEN]) -> (i32, i32, i32) {
        decode_gyro(raw)
    }
}

fn axis(lsb: u8, msb: u8) -> i32 {
    let raw = ((msb as i32) << 8) | lsb as i32;
    sign_extend(raw, 16)
}

/// Decode a RATE_X_LSB..RATE_Z_MSB burst into signed 16-bit counts.
pub fn decode_gyro(raw: &[u8; SAMPLE_LEN]) -> (i32, i32, i32) {
    (
        axis(raw[0], raw[1]),
        axis(raw[2], raw[3]),
        axis(raw[4], raw[5]),
    )
}
