//! Engine configuration
//!
//! Deployment settings for the link. Values are plain data so a board can
//! build them from constants, flash, or a deserialized blob.

use serialcall_protocol::wire::{
    DEFAULT_BAUD_RATE, DEFAULT_HEADER_TIMEOUT_MS, DEFAULT_PAYLOAD_TIMEOUT_MS,
};
use serialcall_protocol::LongWidth;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// Line rate the transport is opened at
    pub baud_rate: u32,
    /// Deadline for the 3 header bytes after sync (ms)
    pub header_timeout_ms: u32,
    /// Deadline for the body, and again for the terminator (ms)
    pub payload_timeout_ms: u32,
    /// Wire width of `Long`/`ULong` arguments and results
    pub long_width: LongWidth,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            header_timeout_ms: DEFAULT_HEADER_TIMEOUT_MS,
            payload_timeout_ms: DEFAULT_PAYLOAD_TIMEOUT_MS,
            long_width: LongWidth::Compat16,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Baud rate of zero
    InvalidBaudRate,
    /// A timeout of zero would fail every read that is not already buffered
    ZeroTimeout,
    /// Header deadline is longer than the payload deadline
    HeaderTimeoutTooLong,
}

impl EngineConfig {
    /// Check the settings are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.baud_rate == 0 {
            return Err(ConfigError::InvalidBaudRate);
        }
        if self.header_timeout_ms == 0 || self.payload_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.header_timeout_ms > self.payload_timeout_ms {
            return Err(ConfigError::HeaderTimeoutTooLong);
        }
        Ok(())
    }
}
