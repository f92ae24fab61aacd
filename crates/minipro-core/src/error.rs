//! Error types for minipro-core

use thiserror::Error;

/// Core error type
///
/// `UnknownDevice` is a user error. The remaining variants mean the catalog
/// itself is corrupt and are never worth retrying.
#[derive(Debug, Error)]
pub enum Error {
    /// Exact-name lookup found nothing
    #[error("unknown device: {0}")]
    UnknownDevice(String),

    /// More signature bytes declared than a 32-bit chip id holds
    #[error("device {device}: chip_id_bytes_count {count} exceeds 4")]
    ChipIdBytesCount {
        /// Offending entry
        device: String,
        /// Declared byte count
        count: u8,
    },

    /// Top byte of opts4 is not a known memory shape
    #[error("device {device}: unknown memory shape: 0x{shape:x}")]
    UnknownMemoryShape {
        /// Offending entry
        device: String,
        /// `opts4 & 0xFF000000`
        shape: u32,
    },

    /// Word size of zero cannot be used as a divisor
    #[error("device {device}: word size is 0")]
    ZeroWordSize {
        /// Offending entry
        device: String,
    },

    /// Formatting into the output buffer failed
    #[error("output formatting failed: {0}")]
    Output(#[from] std::fmt::Error),

    /// JSON serialization failed
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using the core Error type
pub type Result<T> = core::result::Result<T, Error>;
