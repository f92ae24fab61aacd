//! Name search

use minipro_core::device::Catalog;
use minipro_core::query;

/// One matching name per line, in catalog order
pub fn run_search(catalog: &Catalog<'_>, prefix: &str) -> String {
    let mut out = String::new();
    for name in query::search(catalog, prefix) {
        out.push_str(name);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_lists_names() {
        let out = run_search(&Catalog::builtin(), "at24");
        assert_eq!(out, "AT24C01\nAT24C02\n");
    }

    #[test]
    fn test_search_without_matches() {
        assert_eq!(run_search(&Catalog::builtin(), "zz"), "");
    }
}
