//! minipro-devices-codegen - Build-time code generator for the device database
//!
//! This crate parses RON device definitions and generates Rust code
//! that is included in minipro-core at build time as a static slice.

use proc_macro2::{Literal, TokenStream};
use quote::quote;
use serde::Deserialize;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Everything that can stop the catalog from being generated
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A RON file or the output file could not be read or written
    #[error("{}: {source}", path.display())]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// A family file is not valid RON for `FamilyDef`
    #[error("{}: {source}", path.display())]
    Ron {
        /// Family file
        path: PathBuf,
        /// Parser error with position
        source: ron::error::SpannedError,
    },

    /// A definition parsed but describes an impossible device
    #[error("device {device}: {reason}")]
    Validation {
        /// Offending definition
        device: String,
        /// What is wrong with it
        reason: String,
    },

    /// The emitted tokens are not a valid Rust file
    #[error("generated code does not parse: {0}")]
    Syntax(#[from] syn::Error),
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> Error + '_ {
    move |source| Error::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Memory size in RON files, written with a unit
#[derive(Debug, Clone, Copy, Deserialize)]
pub enum Size {
    /// Bytes
    B(u32),
    /// Multiples of 1024 bytes
    KiB(u32),
    /// Multiples of 1024 * 1024 bytes
    MiB(u32),
}

impl Size {
    /// Byte count, or `None` if it does not fit the 32-bit table field
    pub fn checked_bytes(self) -> Option<u32> {
        match self {
            Size::B(n) => Some(n),
            Size::KiB(n) => n.checked_mul(1 << 10),
            Size::MiB(n) => n.checked_mul(1 << 20),
        }
    }
}

impl Default for Size {
    fn default() -> Self {
        Size::B(0)
    }
}

// ============================================================================
// Packed field helpers
// ============================================================================

/// Unit in which the code memory size is counted.
///
/// Stored in the top byte of `opts4` in the generated table.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
pub enum MemoryShape {
    #[default]
    Bytes,
    Words,
    Bits,
}

impl MemoryShape {
    fn opts4_bits(self) -> u32 {
        match self {
            MemoryShape::Bytes => 0x0000_0000,
            MemoryShape::Words => 0x0100_0000,
            MemoryShape::Bits => 0x0200_0000,
        }
    }

    /// Bytes per addressable word when the entry does not say otherwise
    fn default_word_size(self) -> u32 {
        match self {
            MemoryShape::Words => 2,
            MemoryShape::Bytes | MemoryShape::Bits => 1,
        }
    }
}

/// Physical package or programming adapter
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
pub enum Package {
    /// Needs adapter N (photo `AdapterNNN.JPG`)
    Adapter(u8),
    /// Plain DIP socket with the given pin count
    Dip(u8),
    /// Programmable in-circuit only
    #[default]
    IspOnly,
}

/// Assemble the little-endian `package_details` word.
///
/// byte0 = adapter photo, byte1 = ICSP jig photo, byte3 low 7 bits = DIP pins.
pub fn pack_package_details(package: Package, icsp: Option<u8>) -> u32 {
    let mut bytes = [0u8; 4];
    match package {
        Package::Adapter(id) => bytes[0] = id,
        Package::Dip(pins) => bytes[3] = pins & 0x7F,
        Package::IspOnly => {}
    }
    bytes[1] = icsp.unwrap_or(0);
    u32::from_le_bytes(bytes)
}

// ============================================================================
// Device definitions
// ============================================================================

/// Single device definition in RON format
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceDef {
    /// Part name (e.g., "AT24C01")
    pub name: String,
    /// Wire protocol selector
    pub protocol_id: u16,
    #[serde(default)]
    pub variant: u32,
    #[serde(default)]
    pub addressing_mode: u32,
    pub read_buffer_size: u32,
    pub write_buffer_size: u32,
    /// Bytes per addressable word; derived from `memory_shape` if omitted
    #[serde(default)]
    pub word_size: Option<u32>,
    pub code_memory_size: Size,
    #[serde(default)]
    pub data_memory_size: Size,
    #[serde(default)]
    pub data_memory2_size: Size,
    #[serde(default)]
    pub chip_id: u32,
    #[serde(default)]
    pub chip_id_bytes_count: u8,
    #[serde(default)]
    pub opts1: u32,
    #[serde(default)]
    pub opts2: u32,
    #[serde(default)]
    pub opts3: u32,
    /// Low 24 bits of opts4; the top byte comes from `memory_shape`
    #[serde(default)]
    pub opts4: u32,
    #[serde(default)]
    pub memory_shape: MemoryShape,
    #[serde(default)]
    pub package: Package,
    /// ICSP jig photo number
    #[serde(default)]
    pub icsp: Option<u8>,
    #[serde(default)]
    pub write_unlock: u32,
    /// Names of the fuse words, if the part has any
    #[serde(default)]
    pub fuses: Option<Vec<String>>,
}

impl DeviceDef {
    /// Effective word size
    pub fn word_size(&self) -> u32 {
        self.word_size
            .unwrap_or_else(|| self.memory_shape.default_word_size())
    }

    /// Effective opts4 with the memory shape merged into the top byte
    pub fn opts4(&self) -> u32 {
        (self.opts4 & 0x00FF_FFFF) | self.memory_shape.opts4_bits()
    }

    /// Packed package details word
    pub fn package_details(&self) -> u32 {
        pack_package_details(self.package, self.icsp)
    }

    fn invalid(&self, reason: impl Into<String>) -> Error {
        let device = if self.name.is_empty() {
            "(unnamed)".to_string()
        } else {
            self.name.clone()
        };
        Error::Validation {
            device,
            reason: reason.into(),
        }
    }

    /// Byte count of one of the size fields
    fn bytes(&self, field: &str, size: Size) -> Result<u32, Error> {
        size.checked_bytes()
            .ok_or_else(|| self.invalid(format!("{} {:?} does not fit in 32 bits", field, size)))
    }

    fn validate(&self) -> Result<(), Error> {
        if self.name.is_empty() {
            return Err(self.invalid("empty name"));
        }
        if self.chip_id_bytes_count > 4 {
            return Err(self.invalid(format!(
                "chip_id_bytes_count {} exceeds 4",
                self.chip_id_bytes_count
            )));
        }
        let id_bits = u32::from(self.chip_id_bytes_count) * 8;
        if id_bits < 32 && self.chip_id >> id_bits != 0 {
            return Err(self.invalid(format!(
                "chip_id 0x{:x} is wider than {} byte(s)",
                self.chip_id, self.chip_id_bytes_count
            )));
        }
        if self.word_size() == 0 {
            return Err(self.invalid("word_size is 0"));
        }
        if self.opts4 & 0xFF00_0000 != 0 {
            return Err(self.invalid("opts4 top byte is set directly, use memory_shape"));
        }
        self.bytes("code_memory_size", self.code_memory_size)?;
        self.bytes("data_memory_size", self.data_memory_size)?;
        self.bytes("data_memory2_size", self.data_memory2_size)?;
        Ok(())
    }

    fn to_tokens(&self) -> Result<TokenStream, Error> {
        let name = &self.name;
        let protocol_id = Literal::u16_unsuffixed(self.protocol_id);
        let variant = Literal::u32_unsuffixed(self.variant);
        let addressing_mode = Literal::u32_unsuffixed(self.addressing_mode);
        let read_buffer_size = Literal::u32_unsuffixed(self.read_buffer_size);
        let write_buffer_size = Literal::u32_unsuffixed(self.write_buffer_size);
        let word_size = Literal::u32_unsuffixed(self.word_size());
        let code_memory_size =
            Literal::u32_unsuffixed(self.bytes("code_memory_size", self.code_memory_size)?);
        let data_memory_size =
            Literal::u32_unsuffixed(self.bytes("data_memory_size", self.data_memory_size)?);
        let data_memory2_size =
            Literal::u32_unsuffixed(self.bytes("data_memory2_size", self.data_memory2_size)?);
        let chip_id = Literal::u32_unsuffixed(self.chip_id);
        let chip_id_bytes_count = Literal::u8_unsuffixed(self.chip_id_bytes_count);
        let opts1 = Literal::u32_unsuffixed(self.opts1);
        let opts2 = Literal::u32_unsuffixed(self.opts2);
        let opts3 = Literal::u32_unsuffixed(self.opts3);
        let opts4 = Literal::u32_unsuffixed(self.opts4());
        let package_details = Literal::u32_unsuffixed(self.package_details());
        let write_unlock = Literal::u32_unsuffixed(self.write_unlock);
        let fuses = match &self.fuses {
            Some(names) => quote!(Some(&[#(#names),*] as &[&str])),
            None => quote!(None),
        };

        Ok(quote! {
            Device {
                name: #name,
                protocol_id: #protocol_id,
                variant: #variant,
                addressing_mode: #addressing_mode,
                read_buffer_size: #read_buffer_size,
                write_buffer_size: #write_buffer_size,
                word_size: #word_size,
                code_memory_size: #code_memory_size,
                data_memory_size: #data_memory_size,
                data_memory2_size: #data_memory2_size,
                chip_id: #chip_id,
                chip_id_bytes_count: #chip_id_bytes_count,
                opts1: #opts1,
                opts2: #opts2,
                opts3: #opts3,
                opts4: #opts4,
                package_details: #package_details,
                write_unlock: #write_unlock,
                fuses: #fuses,
            }
        })
    }
}

/// Device family file (one per RON file)
#[derive(Debug, Clone, Deserialize)]
pub struct FamilyDef {
    /// Family or vendor label (e.g., "Atmel serial EEPROM")
    pub family: String,
    /// Devices in declaration order
    pub devices: Vec<DeviceDef>,
}

/// Complete device database
#[derive(Debug, Clone)]
pub struct DeviceDatabase {
    pub families: Vec<FamilyDef>,
}

impl DeviceDatabase {
    /// Load every family file in `dir`, in file-name order
    pub fn load_from_dir(dir: &Path) -> Result<Self, Error> {
        let families = family_files(dir)?
            .iter()
            .map(|path| Self::load_from_file(path))
            .collect::<Result<_, _>>()?;
        Ok(DeviceDatabase { families })
    }

    /// Load a single family file
    pub fn load_from_file(path: &Path) -> Result<FamilyDef, Error> {
        let content = fs::read_to_string(path).map_err(io_error(path))?;
        ron::from_str(&content).map_err(|source| Error::Ron {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validate every device definition
    pub fn validate(&self) -> Result<(), Error> {
        for family in &self.families {
            for device in &family.devices {
                device.validate()?;
            }
        }
        Ok(())
    }

    /// Generate Rust code for the device database
    pub fn generate_code(&self) -> Result<String, Error> {
        let device_defs = self
            .families
            .iter()
            .flat_map(|family| family.devices.iter())
            .map(DeviceDef::to_tokens)
            .collect::<Result<Vec<_>, _>>()?;

        let tokens = quote! {
            // Auto-generated by minipro-devices-codegen
            // Do not edit manually!

            /// Static device catalog
            ///
            /// Generated from RON files in devices/, in file then declaration order.
            pub static DEVICES: &[Device] = &[
                #(#device_defs),*
            ];
        };

        Ok(prettyplease::unparse(&syn::parse2(tokens)?))
    }

    /// Get total device count
    pub fn device_count(&self) -> usize {
        self.families.iter().map(|f| f.devices.len()).sum()
    }
}

/// Sorted paths of the `*.ron` family files in `dir`.
///
/// Sorting keeps the generated declaration order stable across platforms.
pub fn family_files(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error(dir))? {
        let path = entry.map_err(io_error(dir))?.path();
        if path.extension().is_some_and(|ext| ext == "ron") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Load, validate and write the catalog for `devices_dir` to `output_file`
pub fn generate(devices_dir: &Path, output_file: &Path) -> Result<(), Error> {
    let db = DeviceDatabase::load_from_dir(devices_dir)?;
    db.validate()?;
    let code = db.generate_code()?;
    fs::write(output_file, code).map_err(io_error(output_file))
}
