//! Predicate based selection over the catalog
//!
//! Results always come back in catalog declaration order and are never
//! truncated.

use crate::device::{Catalog, Device};

/// Selection test applied to each device together with a caller argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// Every device; the argument is ignored
    All,
    /// Name equals the argument exactly
    NameEquals,
    /// Argument occurs somewhere in the name (case-sensitive)
    NameContains,
    /// Name starts with the argument, ignoring ASCII case
    NamePrefix,
}

impl Predicate {
    /// Test one device
    pub fn matches(self, device: &Device, arg: &str) -> bool {
        match self {
            Self::All => true,
            Self::NameEquals => device.name == arg,
            Self::NameContains => device.name.contains(arg),
            Self::NamePrefix => starts_with_ignore_ascii_case(device.name, arg),
        }
    }

    /// Whether results are conventionally rendered as a single record
    pub fn is_single(self) -> bool {
        self == Self::NameEquals
    }
}

fn starts_with_ignore_ascii_case(name: &str, prefix: &str) -> bool {
    name.len() >= prefix.len()
        && name.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// All devices matching `predicate` with `arg`, in catalog order
pub fn query<'a>(catalog: &Catalog<'a>, predicate: Predicate, arg: &str) -> Vec<&'a Device> {
    let matches: Vec<&'a Device> = catalog
        .iter()
        .filter(|device| predicate.matches(device, arg))
        .collect();
    log::debug!(
        "{:?}({:?}) matched {} of {} devices",
        predicate,
        arg,
        matches.len(),
        catalog.len()
    );
    matches
}

/// Names of the devices beginning with `prefix`, ignoring ASCII case
pub fn search<'a>(catalog: &Catalog<'a>, prefix: &str) -> Vec<&'a str> {
    query(catalog, Predicate::NamePrefix, prefix)
        .into_iter()
        .map(|device| device.name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::testing::blank;

    static DEVICES: [Device; 2] = [blank("AT24C01"), blank("PIC12F508")];
    static MIXED_CASE: [Device; 3] = [blank("AT24C01"), blank("PIC12F508"), blank("at89c2051")];

    fn names(devices: &[&Device]) -> Vec<&'static str> {
        devices.iter().map(|d| d.name).collect()
    }

    #[test]
    fn test_all() {
        let catalog = Catalog::new(&DEVICES);
        assert_eq!(
            names(&query(&catalog, Predicate::All, "ignored")),
            ["AT24C01", "PIC12F508"]
        );
    }

    #[test]
    fn test_name_equals() {
        let catalog = Catalog::new(&DEVICES);
        assert_eq!(
            names(&query(&catalog, Predicate::NameEquals, "AT24C01")),
            ["AT24C01"]
        );
        assert!(query(&catalog, Predicate::NameEquals, "AT24C0").is_empty());
        assert!(query(&catalog, Predicate::NameEquals, "at24c01").is_empty());
    }

    #[test]
    fn test_name_contains() {
        let catalog = Catalog::new(&DEVICES);
        assert!(query(&catalog, Predicate::NameContains, "to").is_empty());
        assert_eq!(
            names(&query(&catalog, Predicate::NameContains, "12F")),
            ["PIC12F508"]
        );
        assert_eq!(
            names(&query(&catalog, Predicate::NameContains, "0")),
            ["AT24C01", "PIC12F508"]
        );
        // Case-sensitive
        assert!(query(&catalog, Predicate::NameContains, "pic").is_empty());
    }

    #[test]
    fn test_name_prefix_ignores_case() {
        let catalog = Catalog::new(&MIXED_CASE);
        assert_eq!(
            names(&query(&catalog, Predicate::NamePrefix, "at")),
            ["AT24C01", "at89c2051"]
        );
        assert_eq!(
            names(&query(&catalog, Predicate::NamePrefix, "AT8")),
            ["at89c2051"]
        );
        // Prefix longer than the name never matches
        assert!(query(&catalog, Predicate::NamePrefix, "AT24C01X").is_empty());
        // Empty prefix matches everything
        assert_eq!(query(&catalog, Predicate::NamePrefix, "").len(), 3);
    }

    #[test]
    fn test_search_returns_names() {
        let catalog = Catalog::new(&MIXED_CASE);
        assert_eq!(search(&catalog, "AT"), ["AT24C01", "at89c2051"]);
        assert!(search(&catalog, "27C").is_empty());
    }

    #[test]
    fn test_query_is_repeatable() {
        let catalog = Catalog::builtin();
        for predicate in [
            Predicate::All,
            Predicate::NameContains,
            Predicate::NamePrefix,
        ] {
            let first = query(&catalog, predicate, "AT");
            let second = query(&catalog, predicate, "AT");
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_is_single() {
        assert!(Predicate::NameEquals.is_single());
        assert!(!Predicate::All.is_single());
        assert!(!Predicate::NameContains.is_single());
        assert!(!Predicate::NamePrefix.is_single());
    }
}
