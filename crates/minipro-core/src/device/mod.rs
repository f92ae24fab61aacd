//! Device descriptors and the compiled-in catalog
//!
//! This module provides the descriptor type, the decoders for its packed
//! fields, and the catalog of every device known to the programmer.

mod catalog;
pub mod decode;
mod types;

pub use catalog::*;
pub use types::*;

#[cfg(test)]
pub(crate) mod testing {
    use super::Device;

    /// A byte-shaped device with every numeric field zeroed
    pub const fn blank(name: &'static str) -> Device {
        Device {
            name,
            protocol_id: 0,
            variant: 0,
            addressing_mode: 0,
            read_buffer_size: 0,
            write_buffer_size: 0,
            word_size: 1,
            code_memory_size: 0,
            data_memory_size: 0,
            data_memory2_size: 0,
            chip_id: 0,
            chip_id_bytes_count: 0,
            opts1: 0,
            opts2: 0,
            opts3: 0,
            opts4: 0,
            package_details: 0,
            write_unlock: 0,
            fuses: None,
        }
    }
}
