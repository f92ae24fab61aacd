//! Decoders for the bit-packed descriptor fields

use super::types::{MemoryShape, PackageInfo, PackageKind};

/// Bits of `opts4` holding the memory shape
pub const MEMORY_SHAPE_MASK: u32 = 0xFF00_0000;

const SHAPE_BYTES: u32 = 0x0000_0000;
const SHAPE_WORDS: u32 = 0x0100_0000;
const SHAPE_BITS: u32 = 0x0200_0000;

/// Pin count occupies the low 7 bits of the top package byte
const DIP_PINS_MASK: u8 = 0x7F;

/// Decode the memory shape from the top byte of `opts4`.
///
/// Returns `None` for any shape byte other than 0, 1 or 2.
pub fn decode_memory_shape(opts4: u32) -> Option<MemoryShape> {
    match opts4 & MEMORY_SHAPE_MASK {
        SHAPE_BYTES => Some(MemoryShape::Bytes),
        SHAPE_WORDS => Some(MemoryShape::Words),
        SHAPE_BITS => Some(MemoryShape::Bits),
        _ => None,
    }
}

/// Decode the little-endian `package_details` word.
///
/// An adapter photo takes priority over a DIP pin count. The ICSP jig
/// photo is independent of both.
pub fn decode_package(package_details: u32) -> PackageInfo {
    let [adapter, isp_jig, _, dip] = package_details.to_le_bytes();
    let pins = dip & DIP_PINS_MASK;

    let kind = if adapter != 0 {
        PackageKind::Adapter(adapter)
    } else if pins != 0 {
        PackageKind::Dip(pins)
    } else {
        PackageKind::IspOnly
    };

    PackageInfo {
        kind,
        isp_jig_photo_id: isp_jig,
    }
}

/// Render `chip_id` as lowercase hex keeping only the last
/// `bytes_count * 2` digits of its 8 digit zero-padded form.
///
/// Returns `None` if `bytes_count` exceeds 4.
pub fn format_chip_id(chip_id: u32, bytes_count: u8) -> Option<String> {
    if bytes_count > 4 {
        return None;
    }
    let full = format!("{:08x}", chip_id);
    Some(full[full.len() - usize::from(bytes_count) * 2..].to_string())
}

/// Code memory size in words. `None` if `word_size` is 0.
pub fn memory_word_count(code_memory_size: u32, word_size: u32) -> Option<u32> {
    code_memory_size.checked_div(word_size)
}
