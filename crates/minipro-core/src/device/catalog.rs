//! The device catalog
//!
//! The built-in table is generated from `devices/*.ron` by the build script.
//! Declaration order is preserved and is the order of every query result.

use super::types::Device;
use crate::error::{Error, Result};

mod generated {
    use super::Device;

    include!(concat!(env!("OUT_DIR"), "/devices_generated.rs"));
}

pub use generated::DEVICES;

/// Read-only view over an ordered sequence of devices
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    devices: &'a [Device],
}

impl Catalog<'static> {
    /// The catalog compiled into this binary
    pub fn builtin() -> Self {
        Self { devices: DEVICES }
    }
}

impl<'a> Catalog<'a> {
    /// Wrap an existing device table
    pub const fn new(devices: &'a [Device]) -> Self {
        Self { devices }
    }

    /// First device whose name equals `name` exactly (case-sensitive)
    pub fn find_by_name(&self, name: &str) -> Result<&'a Device> {
        self.devices
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| Error::UnknownDevice(name.into()))
    }

    /// Every device, in declaration order
    pub fn devices(&self) -> &'a [Device] {
        self.devices
    }

    /// Iterate over all devices
    pub fn iter(&self) -> impl Iterator<Item = &'a Device> + 'a {
        self.devices.iter()
    }

    /// Number of devices
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::testing::blank;

    static DUPLICATES: [Device; 3] = [
        Device {
            protocol_id: 1,
            ..blank("27C256")
        },
        blank("AT24C01"),
        Device {
            protocol_id: 2,
            ..blank("27C256")
        },
    ];

    #[test]
    fn test_find_by_name_first_match_wins() {
        let catalog = Catalog::new(&DUPLICATES);
        let device = catalog.find_by_name("27C256").unwrap();
        assert_eq!(device.protocol_id, 1);
    }

    #[test]
    fn test_find_by_name_is_case_sensitive() {
        let catalog = Catalog::new(&DUPLICATES);
        let err = catalog.find_by_name("at24c01").unwrap_err();
        assert!(matches!(err, Error::UnknownDevice(ref name) if name == "at24c01"));
        assert_eq!(err.to_string(), "unknown device: at24c01");
    }

    #[test]
    fn test_devices_preserves_order() {
        let catalog = Catalog::new(&DUPLICATES);
        let names: Vec<&str> = catalog.iter().map(|d| d.name).collect();
        assert_eq!(names, ["27C256", "AT24C01", "27C256"]);
        assert_eq!(catalog.devices().len(), catalog.len());
    }

    #[test]
    fn test_builtin_catalog_is_well_formed() {
        let catalog = Catalog::builtin();
        assert!(!catalog.is_empty());
        for device in catalog.iter() {
            assert!(!device.name.is_empty());
            assert!(device.memory_shape().is_ok(), "{}", device.name);
            assert!(device.chip_id_hex().is_ok(), "{}", device.name);
            assert!(device.memory_word_count().is_ok(), "{}", device.name);
        }
    }

    #[test]
    fn test_builtin_catalog_lookup() {
        let catalog = Catalog::builtin();
        let device = catalog.find_by_name("AT24C01").unwrap();
        assert_eq!(device.code_memory_size, 128);
        assert!(catalog.find_by_name("NO-SUCH-PART").is_err());
    }
}
