use crate::sensors::Channel;
use thiserror::Error;

/// Transport-level failures reported by a [`RegisterBus`](crate::bus::RegisterBus).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BusError {
    #[error("no acknowledge from device")]
    NoAcknowledge,

    #[error("bus transaction timed out")]
    Timeout,

    #[error("bus arbitration lost")]
    ArbitrationLoss,

    #[error("bus not ready")]
    NotReady,

    #[error("bus error (misplaced start or stop condition)")]
    Bus,

    #[error("data overrun")]
    Overrun,

    #[error("transport error: {0}")]
    Other(String),
}

/// Errors raised while bringing a sub-device out of reset and configuring it
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InitError {
    #[error("{channel} initialization failed writing register {register:#04x}: {source}")]
    WriteFailed {
        channel: Channel,
        register: u8,
        #[source]
        source: BusError,
    },

    #[error("{channel} initialization failed reading register {register:#04x}: {source}")]
    ReadFailed {
        channel: Channel,
        register: u8,
        #[source]
        source: BusError,
    },

    #[error("{channel} wrong chip ID: expected {expected:#04x}, got {actual:#04x}")]
    WrongChipId {
        channel: Channel,
        expected: u8,
        actual: u8,
    },
}

impl InitError {
    pub fn channel(&self) -> Channel {
        match self {
            InitError::WriteFailed { channel, .. }
            | InitError::ReadFailed { channel, .. }
            | InitError::WrongChipId { channel, .. } => *channel,
        }
    }
}

/// Errors raised by a sample read
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    #[error("{channel} read failed: {source}")]
    Bus {
        channel: Channel,
        #[source]
        source: BusError,
    },

    #[error("{channel} short read: expected {expected} bytes, got {actual}")]
    ShortRead {
        channel: Channel,
        expected: usize,
        actual: usize,
    },

    #[error("{channel} read returned {actual} bytes, expected {expected}")]
    UnexpectedLength {
        channel: Channel,
        expected: usize,
        actual: usize,
    },
}

impl ReadError {
    pub fn channel(&self) -> Channel {
        match self {
            ReadError::Bus { channel, .. }
            | ReadError::ShortRead { channel, .. }
            | ReadError::UnexpectedLength { channel, .. } => *channel,
        }
    }
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from '{path}': {source}")]
    LoadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration format: {0}")]
    FormatError(#[from] toml::de::Error),

    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Errors raised while wiring a configured device onto a real bus
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Failed to open bus '{path}': {reason}")]
    BusOpen { path: String, reason: String },

    #[error("Device initialization failed: {0}")]
    Init(#[from] InitError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type aliases for convenience
pub type InitResult<T> = Result<T, InitError>;
pub type ReadResult<T> = Result<T, ReadError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type RegistryResult<T> = Result<T, RegistryError>;
