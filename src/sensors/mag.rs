use super::{sign_extend, Channel, InitStep, RegisterMap, SAMPLE_LEN};

// Register addresses for the BMX055 magnetometer
const CHIP_ID_REG: u8 = 0x40;
const DATAX_LSB: u8 = 0x42;
const POWER_CTRL: u8 = 0x4B;
const OP_MODE: u8 = 0x4C;
const AXES_CTRL: u8 = 0x4E;
const REP_XY: u8 = 0x51;
const REP_Z: u8 = 0x52;

const CHIP_ID: u8 = 0x32;

// POWER_CTRL: soft reset (bits 7 and 1) with the power bit kept set
const SOFT_RESET: u8 = 0x83;
// OP_MODE: normal mode, 10 Hz ODR
const MODE_NORMAL_10HZ: u8 = 0x00;
// AXES_CTRL: data-ready pin enabled, active high, X/Y/Z channels enabled
const AXES_XYZ: u8 = 0x84;
// nXY = 1 + 2 * REPXY = 9
const REPXY_9: u8 = 0x04;
const REPZ_15: u8 = 0x0F;

const RESET_MS: u32 = 10;
const SETTLE_MS: u32 = 10;

/// Magnetometer: 13-bit X/Y and 15-bit Z samples
#[derive(Debug, Clone, Copy)]
pub struct Mag;

impl RegisterMap for Mag {
    const CHANNEL: Channel = Channel::Mag;
    const DEFAULT_ADDRESS: u8 = 0x10;
    const ADDRESSES: &'static [u8] = &[0x10, 0x11, 0x12, 0x13];
    const CHIP_ID_REGISTER: u8 = CHIP_ID_REG;
    const CHIP_ID: u8 = CHIP_ID;
    const DATA_REGISTER: u8 = DATAX_LSB;
    // Configuration written before the reset completes is undefined
    const INIT_SEQUENCE: &'static [InitStep] = &[
        InitStep::Write {
            register: POWER_CTRL,
            value: SOFT_RESET,
        },
        InitStep::Delay { ms: RESET_MS },
        InitStep::Write {
            register: OP_MODE,
            value: MODE_NORMAL_10HZ,
        },
        InitStep::Write {
            register: AXES_CTRL,
            value: AXES_XYZ,
        },
        InitStep::Write {
            register: REP_XY,
            value: REPXY_9,
        },
        InitStep::Write {
            register: REP_Z,
            value: REPZ_15,
        },
        InitStep::Delay { ms: SETTLE_MS },
    ];
    const AXIS_BITS: [u32; 3] = [13, 13, 15];

    fn decode(raw: &[u8; SAMPLE_LEN]) -> (i32, i32, i32) {
        decode_mag(raw)
    }
}

fn xy_axis(lsb: u8, msb: u8) -> i32 {
    let raw = (((msb as i32) << 8) | (lsb & 0xF8) as i32) >> 3;
    sign_extend(raw, 13)
}

fn z_axis(lsb: u8, msb: u8) -> i32 {
    let raw = (((msb as i32) << 8) | (lsb & 0xFE) as i32) >> 1;
    sign_extend(raw, 15)
}

/// Decode a DATAX_LSB..DATAZ_MSB burst: X/Y as signed 13-bit, Z as signed 15-bit.
pub fn decode_mag(raw: &[u8; SAMPLE_LEN]) -> (i32, i32, i32) {
    (
        xy_axis(raw[0], raw[1]),
        xy_axis(raw[2], raw[3]),
        z_axis(raw[4], raw[5]),
    )
}
