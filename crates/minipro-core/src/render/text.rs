//! Human-readable device report

use core::fmt::Write;

use crate::device::Device;
use crate::error::Result;

/// Line printed between consecutive device blocks
pub const SEPARATOR: &str = "--";

/// Append the labelled block for one device
pub fn write_device(out: &mut String, device: &Device) -> Result<()> {
    device.validate()?;
    let shape = device.memory_shape()?;
    let words = device.memory_word_count()?;
    let package = device.package();

    writeln!(out, "Name: {}", device.name)?;

    write!(out, "Memory: {} {}", words, shape)?;
    if device.data_memory_size != 0 {
        write!(out, " + {} Bytes", device.data_memory_size)?;
    }
    if device.data_memory2_size != 0 {
        write!(out, " + {} Bytes", device.data_memory2_size)?;
    }
    writeln!(out)?;

    writeln!(out, "Package: {}", package.kind)?;
    match package.isp_jig() {
        Some(jig) => writeln!(out, "ISP: ICP{:03}.JPG", jig)?,
        None => writeln!(out, "ISP: -")?,
    }
    writeln!(out, "Protocol: 0x{:02x}", device.protocol_id)?;
    writeln!(out, "Read buffer size: {} Bytes", device.read_buffer_size)?;
    writeln!(out, "Write buffer size: {} Bytes", device.write_buffer_size)?;

    Ok(())
}

/// Render every device, separating blocks with `--`
pub fn render_devices(devices: &[&Device]) -> Result<String> {
    let mut out = String::new();
    for (i, device) in devices.iter().enumerate() {
        if i > 0 {
            writeln!(out, "{}", SEPARATOR)?;
        }
        log::trace!("Rendering {} as text", device.name);
        write_device(&mut out, device)?;
    }
    Ok(out)
}
