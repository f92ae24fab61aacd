//! Output renderers
//!
//! Both renderers build the complete output in memory. A malformed catalog
//! entry aborts rendering before anything is written, so callers never see
//! a partial record.

pub mod json;
pub mod text;

use crate::device::Device;
use crate::error::{Error, Result};

/// Output format for full device records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Labelled lines, blocks separated by `--`
    #[default]
    Text,
    /// JSON array of objects, or a single object in single mode
    Json,
}

/// Render `devices` in the requested format.
///
/// `single` holds the requested name when exactly one record is expected.
/// An empty selection is then an `UnknownDevice` error in either format, and
/// JSON emits the record as a bare object.
pub fn render(devices: &[&Device], format: OutputFormat, single: Option<&str>) -> Result<String> {
    if let (Some(name), []) = (single, devices) {
        return Err(Error::UnknownDevice(name.into()));
    }
    match format {
        OutputFormat::Text => text::render_devices(devices),
        OutputFormat::Json if single.is_some() => match devices {
            [device] => json::render_device(device),
            _ => json::render_objects(devices),
        },
        OutputFormat::Json => json::render_devices(devices),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::testing::blank;

    static PAIR: [Device; 2] = [blank("AT24C01"), blank("AT24C02")];

    #[test]
    fn test_single_json_has_no_array() {
        let out = render(&[&PAIR[0]], OutputFormat::Json, Some("AT24C01")).unwrap();
        assert!(out.starts_with("{\n"));
        assert!(out.ends_with("}\n"));
        assert!(!out.contains('['));
    }

    #[test]
    fn test_json_array_without_single() {
        let out = render(&[&PAIR[0]], OutputFormat::Json, None).unwrap();
        assert!(out.starts_with("[\n  {\n"));
        assert!(out.ends_with("  }\n]\n"));
    }

    #[test]
    fn test_text_ignores_single() {
        let devices = [&PAIR[0], &PAIR[1]];
        assert_eq!(
            render(&devices, OutputFormat::Text, Some("AT24C0")).unwrap(),
            render(&devices, OutputFormat::Text, None).unwrap()
        );
    }

    #[test]
    fn test_single_mode_without_match_is_an_error() {
        for format in [OutputFormat::Text, OutputFormat::Json] {
            let err = render(&[], format, Some("NOPE")).unwrap_err();
            assert!(matches!(err, Error::UnknownDevice(ref name) if name == "NOPE"));
        }
        assert_eq!(render(&[], OutputFormat::Json, None).unwrap(), "[\n]\n");
        assert_eq!(render(&[], OutputFormat::Text, None).unwrap(), "");
    }
}
