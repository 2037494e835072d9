use super::{sign_extend, Channel, InitStep, RegisterMap, SAMPLE_LEN};

// Register addresses for the BMX055 accelerometer
const BGW_CHIPID: u8 = 0x00;
const ACCD_X_LSB: u8 = 0x02;
const PMU_RANGE: u8 = 0x0F;
const PMU_BW: u8 = 0x10;
const PMU_LPW: u8 = 0x11;

const CHIP_ID: u8 = 0xFA;

// PMU_RANGE: +/- 2g
const RANGE_2G: u8 = 0x03;
// PMU_BW: 7.81 Hz filter bandwidth
const BW_7_81HZ: u8 = 0x08;
// PMU_LPW: normal mode
const MODE_NORMAL: u8 = 0x00;

const SETTLE_MS: u32 = 10;

/// Accelerometer: 12-bit samples, left-justified in each 16-bit pair
#[derive(Debug, Clone, Copy)]
pub struct Accel;

impl RegisterMap for Accel {
    const CHANNEL: Channel = Channel::Accel;
    const DEFAULT_ADDRESS: u8 = 0x18;
    const ADDRESSES: &'static [u8] = &[0x18, 0x19];
    const CHIP_ID_REGISTER: u8 = BGW_CHIPID;
    const CHIP_ID: u8 = CHIP_ID;
    const DATA_REGISTER: u8 = ACCD_X_LSB;
    const INIT_SEQUENCE: &'static [InitStep] = &[
        InitStep::Write {
            register: PMU_RANGE,
            value: RANGE_2G,
        },
        InitStep::Write {
            register: PMU_BW,
            value: BW_7_81HZ,
        },
        InitStep::Write {
            register: PMU_LPW,
            value: MODE_NORMAL,
        },
        InitStep::Delay { ms: SETTLE_MS },
    ];
    const AXIS_BITS: [u32; 3] = [12, 12, 12];

    fn decode(raw: &[u8; SAMPLE_LEN]) -> (i32, i32, i32) {
        decode_accel(raw)
    }
}

fn axis(lsb: u8, msb: u8) -> i32 {
    // Low nibble of the LSB carries no data
    let raw = (((msb as i32) << 8) | (lsb & 0xF0) as i32) >> 4;
    sign_extend(raw, 12)
}

/// Decode an ACCD_X_LSB..ACCD_Z_MSB burst into signed 12-bit counts.
pub fn decode_accel(raw: &[u8; SAMPLE_LEN]) -> (i32, i32, i32) {
    (
        axis(raw[0], raw[1]),
        axis(raw[2], raw[3]),
        axis(raw[4], raw[5]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack(value: i32) -> [u8; 2] {
        let field = ((value & 0x0FFF) << 4) as u16;
        field.to_le_bytes()
    }

    #[test]
    fn test_decode_scenario_256() {
        let raw = [0x00, 0x10, 0x00, 0x10, 0x00, 0x10];
        assert_eq!(decode_accel(&raw), (256, 256, 256));
    }

    #[test]
    fn test_decode_zero() {
        assert_eq!(decode_accel(&[0; 6]), (0, 0, 0));
    }

    #[test]
    fn test_decode_range_boundaries() {
        // raw 2047 = 0x7FF, raw 2048 = 0x800
        let raw = [0xF0, 0x7F, 0x00, 0x80, 0xF0, 0xFF];
        assert_eq!(decode_accel(&raw), (2047, -2048, -1));
    }

    #[test]
    fn test_low_nibble_is_ignored() {
        let raw = [0x0F, 0x10, 0x0A, 0x10, 0x01, 0x10];
        assert_eq!(decode_accel(&raw), (256, 256, 256));
    }

    #[test]
    fn test_all_pairs_stay_in_12bit_range() {
        for word in 0..=u16::MAX {
            let [lsb, msb] = word.to_le_bytes();
            let value = axis(lsb, msb);
            assert!((-2048..=2047).contains(&value), "{word:#06x} -> {value}");
        }
    }

    #[test]
    fn test_known_triple_round_trips() {
        for (x, y, z) in [(1, -1, 0), (2047, -2048, 100), (-1000, 999, -7)] {
            let mut raw = [0u8; 6];
            raw[0..2].copy_from_slice(&pack(x));
            raw[2..4].copy_from_slice(&pack(y));
            raw[4..6].copy_from_slice(&pack(z));
            assert_eq!(decode_accel(&raw), (x, y, z));
        }
    }

    #[test]
    fn test_init_sequence_matches_register_map() {
        assert_eq!(
            Accel::INIT_SEQUENCE,
            &[
                InitStep::Write {
                    register: 0x0F,
                    value: 0x03,
                },
                InitStep::Write {
                    register: 0x10,
                    value: 0x08,
                },
                InitStep::Write {
                    register: 0x11,
                    value: 0x00,
                },
                InitStep::Delay { ms: 10 },
            ]
        );
    }
}
