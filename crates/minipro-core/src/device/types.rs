//! Device descriptor type definitions

use core::fmt;

use super::decode;
use crate::error::{Error, Result};

/// Unit in which a device's code memory size is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryShape {
    /// Byte-addressed memory
    Bytes,
    /// Word-addressed memory (see `Device::word_size`)
    Words,
    /// Bit-addressed memory
    Bits,
}

impl fmt::Display for MemoryShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes => write!(f, "Bytes"),
            Self::Words => write!(f, "Words"),
            Self::Bits => write!(f, "Bits"),
        }
    }
}

/// Physical package classification derived from `package_details`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageKind {
    /// Needs a socket adapter, identified by its photo number
    Adapter(u8),
    /// Fits the DIP socket directly, with this many pins
    Dip(u8),
    /// Only programmable in-circuit
    IspOnly,
}

impl fmt::Display for PackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Adapter(id) => write!(f, "Adapter{:03}.JPG", id),
            Self::Dip(pins) => write!(f, "DIP{}", pins),
            Self::IspOnly => write!(f, "ISP only"),
        }
    }
}

/// Decoded `package_details` word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageInfo {
    /// Package classification
    pub kind: PackageKind,
    /// ICSP jig photo number, 0 if the part has no jig
    pub isp_jig_photo_id: u8,
}

impl PackageInfo {
    /// ICSP jig photo number, if any
    pub fn isp_jig(&self) -> Option<u8> {
        (self.isp_jig_photo_id != 0).then_some(self.isp_jig_photo_id)
    }
}

/// A single catalog entry describing one supported device.
///
/// Entries live in a static table generated at build time, so every
/// reference field is `'static`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Device {
    /// Part name, unique within the catalog
    pub name: &'static str,
    /// Wire protocol selector
    pub protocol_id: u16,
    /// Protocol variant selector
    pub variant: u32,
    /// Address generation mode
    pub addressing_mode: u32,
    /// Device read buffer size in bytes
    pub read_buffer_size: u32,
    /// Device write buffer size in bytes
    pub write_buffer_size: u32,
    /// Bytes per addressable word
    pub word_size: u32,
    /// Total code memory in bytes
    pub code_memory_size: u32,
    /// Data memory in bytes, 0 if absent
    pub data_memory_size: u32,
    /// Second data memory region in bytes, 0 if absent
    pub data_memory2_size: u32,
    /// Signature bytes, right-justified
    pub chip_id: u32,
    /// Number of significant bytes in `chip_id`
    pub chip_id_bytes_count: u8,
    /// Protocol specific option word
    pub opts1: u32,
    /// Protocol specific option word
    pub opts2: u32,
    /// Protocol specific option word
    pub opts3: u32,
    /// Protocol specific option word; the top byte holds the memory shape
    pub opts4: u32,
    /// Little-endian packed adapter, ICSP jig and DIP pin information
    pub package_details: u32,
    /// Write unlock flag/value
    pub write_unlock: u32,
    /// Fuse word names. Only presence is reported.
    pub fuses: Option<&'static [&'static str]>,
}

impl Device {
    /// Unit of the code memory size
    pub fn memory_shape(&self) -> Result<MemoryShape> {
        decode::decode_memory_shape(self.opts4).ok_or_else(|| Error::UnknownMemoryShape {
            device: self.name.into(),
            shape: self.opts4 & decode::MEMORY_SHAPE_MASK,
        })
    }

    /// Decoded package information
    pub fn package(&self) -> PackageInfo {
        decode::decode_package(self.package_details)
    }

    /// Chip id as lowercase hex, truncated to the significant bytes
    pub fn chip_id_hex(&self) -> Result<String> {
        decode::format_chip_id(self.chip_id, self.chip_id_bytes_count).ok_or_else(|| {
            Error::ChipIdBytesCount {
                device: self.name.into(),
                count: self.chip_id_bytes_count,
            }
        })
    }

    /// Code memory size counted in words
    pub fn memory_word_count(&self) -> Result<u32> {
        decode::memory_word_count(self.code_memory_size, self.word_size).ok_or_else(|| {
            Error::ZeroWordSize {
                device: self.name.into(),
            }
        })
    }

    /// Whether the device has fuse definitions
    pub fn has_fuses(&self) -> bool {
        self.fuses.is_some()
    }

    /// Check every decoded field the renderers depend on.
    ///
    /// Renderers call this before formatting, so text and JSON output reject
    /// the same malformed entries.
    pub fn validate(&self) -> Result<()> {
        self.memory_shape()?;
        self.memory_word_count()?;
        self.chip_id_hex()?;
        Ok(())
    }
}
