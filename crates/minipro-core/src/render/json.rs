//! JSON device dump
//!
//! The dump is pretty-printed with two-space indentation. Field order is
//! fixed and numbers are plain decimal, so the output can be diffed against
//! other database dumps.

use serde::Serialize;

use crate::device::Device;
use crate::error::Result;

/// Serialized form of one device
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceRecord<'a> {
    /// Part name
    pub name: &'a str,
    /// Wire protocol selector
    pub protocol_id: u16,
    /// Protocol variant selector
    pub variant: u32,
    /// Read buffer size in bytes
    pub read_buffer_size: u32,
    /// Write buffer size in bytes
    pub write_buffer_size: u32,
    /// Code memory in bytes
    pub code_memory_size: u32,
    /// Data memory in bytes
    pub data_memory_size: u32,
    /// Second data memory region in bytes
    pub data_memory2_size: u32,
    /// Significant chip id bytes as lowercase hex
    pub chip_id: String,
    /// Number of significant chip id bytes
    pub chip_id_bytes_count: u8,
    /// Option word 1
    pub opts1: u32,
    /// Option word 2
    pub opts2: u32,
    /// Option word 3
    pub opts3: u32,
    /// Option word 4, memory shape in the top byte
    pub opts4: u32,
    /// Packed package details
    pub package_details: u32,
    /// Write unlock value
    pub write_unlock: u32,
    /// Whether fuse definitions exist
    pub has_fuses: bool,
}

impl<'a> DeviceRecord<'a> {
    /// Build the record, failing on a malformed catalog entry
    pub fn new(device: &'a Device) -> Result<Self> {
        device.validate()?;
        Ok(Self {
            name: device.name,
            protocol_id: device.protocol_id,
            variant: device.variant,
            read_buffer_size: device.read_buffer_size,
            write_buffer_size: device.write_buffer_size,
            code_memory_size: device.code_memory_size,
            data_memory_size: device.data_memory_size,
            data_memory2_size: device.data_memory2_size,
            chip_id: device.chip_id_hex()?,
            chip_id_bytes_count: device.chip_id_bytes_count,
            opts1: device.opts1,
            opts2: device.opts2,
            opts3: device.opts3,
            opts4: device.opts4,
            package_details: device.package_details,
            write_unlock: device.write_unlock,
            has_fuses: device.has_fuses(),
        })
    }
}

fn records<'a>(devices: &[&'a Device]) -> Result<Vec<DeviceRecord<'a>>> {
    devices
        .iter()
        .map(|&device| {
            log::trace!("Rendering {} as JSON", device.name);
            DeviceRecord::new(device)
        })
        .collect()
}

/// Render one device as a bare JSON object
pub fn render_device(device: &Device) -> Result<String> {
    let mut out = serde_json::to_string_pretty(&DeviceRecord::new(device)?)?;
    out.push('\n');
    Ok(out)
}

/// Render devices as a JSON array; an empty selection gives `[\n]\n`
pub fn render_devices(devices: &[&Device]) -> Result<String> {
    if devices.is_empty() {
        return Ok("[\n]\n".into());
    }
    let mut out = serde_json::to_string_pretty(&records(devices)?)?;
    out.push('\n');
    Ok(out)
}

/// Render devices as comma-separated bare objects with no enclosing array.
///
/// Used when single mode unexpectedly sees more than one record.
pub fn render_objects(devices: &[&Device]) -> Result<String> {
    let mut objects = Vec::with_capacity(devices.len());
    for record in records(devices)? {
        objects.push(serde_json::to_string_pretty(&record)?);
    }
    let mut out = objects.join(",\n");
    if !out.is_empty() {
        out.push('\n');
    }
    Ok(out)
}
