//! Command implementations
//!
//! Commands return the complete output text instead of printing, so a
//! failure never leaves a partial record on stdout.

mod query;
mod search;

pub use query::run_query;
pub use search::run_search;

use minipro_core::device::Catalog;
use minipro_core::query::Predicate;
use minipro_core::render::OutputFormat;
use minipro_core::Result;

/// What the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<'a> {
    /// Names beginning with a prefix
    Search(&'a str),
    /// Full records selected by a predicate
    Query {
        /// Selection test
        predicate: Predicate,
        /// Predicate argument
        arg: &'a str,
    },
}

/// Run a selection against the catalog
pub fn run(
    catalog: &Catalog<'_>,
    selection: Selection<'_>,
    format: OutputFormat,
) -> Result<String> {
    match selection {
        Selection::Search(prefix) => {
            if format != OutputFormat::Text {
                log::warn!("JSON output is not available with --search, listing names");
            }
            Ok(run_search(catalog, prefix))
        }
        Selection::Query { predicate, arg } => {
            run_query(catalog, predicate, arg, format, predicate.is_single())
        }
    }
}
