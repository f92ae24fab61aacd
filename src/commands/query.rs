//! Full record queries

use minipro_core::device::Catalog;
use minipro_core::query::{query, Predicate};
use minipro_core::render::{self, OutputFormat};
use minipro_core::{Error, Result};

/// Render the devices selected by `predicate`.
///
/// In single mode only the first match is rendered and an empty result is
/// an `UnknownDevice` error.
pub fn run_query(
    catalog: &Catalog<'_>,
    predicate: Predicate,
    arg: &str,
    format: OutputFormat,
    single: bool,
) -> Result<String> {
    if single {
        let device = match predicate {
            Predicate::NameEquals => catalog.find_by_name(arg)?,
            _ => query(catalog, predicate, arg)
                .first()
                .copied()
                .ok_or_else(|| Error::UnknownDevice(arg.into()))?,
        };
        log::debug!("Found {}", device.name);
        return render::render(&[device], format, Some(arg));
    }

    let matches = query(catalog, predicate, arg);
    render::render(&matches, format, None)
}
