use serde::{Deserialize, Serialize};

/// Signed X/Y/Z counts from one channel
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AxisReading {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl From<(i32, i32, i32)> for AxisReading {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self { x, y, z }
    }
}

impl From<AxisReading> for (i32, i32, i32) {
    fn from(r: AxisReading) -> Self {
        (r.x, r.y, r.z)
    }
}

/// One complete reading of all three channels
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sample {
    pub accel: AxisReading,
    pub gyro: AxisReading,
    pub mag: AxisReading,
}

/// Header metadata attached to every published sample
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Header {
    /// Unique device identifier
    pub device_id: String,
    /// Sequence number for message ordering
    pub seq: u64,
    /// UTC timestamp in nanoseconds
    pub t_utc_ns: u64,
    /// Message schema version for evolution
    pub schema_v: u16,
}

impl Header {
    /// Create a new header stamped with the current time
    pub fn new(device_id: String, seq: u64) -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};

        let now_utc = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;

        Self {
            device_id,
            seq,
            t_utc_ns: now_utc,
            schema_v: 1,
        }
    }
}

/// Raw accel/gyro/mag counts with timing metadata
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SampleMessage {
    pub h: Header,
    #[serde(flatten)]
    pub sample: Sample,
}

impl SampleMessage {
    pub fn new(h: Header, sample: Sample) -> Self {
        Self { h, sample }
    }

    /// Serialize to a single JSON line
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
