//! `esm-exports` — static export-surface extraction for TypeScript and
//! JavaScript modules.
//!
//! Given one unit of source text, lists every name the module exposes to
//! importers without executing it: standard export syntax, ambient
//! `declare module` blocks, and legacy `module.exports` assignments. Built
//! for tooling (autocomplete, symbol resolution) that needs a module's
//! public surface from syntax alone.

mod entry;
mod error;
mod extract;
mod output;
mod parser;
mod resolve;
mod util;

pub use entry::{Entry, EntryId, EntrySet};
pub use error::ExportsError;
pub use extract::{extract_exports, ExtractOptions};
pub use output::ExportReport;
pub use parser::{detect_language, parse_file, parse_source, parse_with};
pub use resolve::is_core_module;

/// Extract every statically-visible export binding from `source`.
///
/// Parses with the TypeScript grammar and walks the tree once. The returned
/// entries are ordered by first discovery and de-duplicated by identity.
pub fn parse_exports(
    source: &str,
    options: &ExtractOptions,
) -> Result<Vec<Entry>, ExportsError> {
    let tree = parser::parse_source(source)?;
    Ok(extract::extract_exports(
        tree.root_node(),
        source.as_bytes(),
        options,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_exports_end_to_end() {
        let entries = parse_exports(
            "export const a = 1;\nexport * from './x';",
            &ExtractOptions::default(),
        )
        .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name.as_deref(), Some("a"));
        assert_eq!(entries[1].specifier.as_deref(), Some("./x"));
    }

    #[test]
    fn parse_exports_is_independent_per_call() {
        let options = ExtractOptions::default();
        let first = parse_exports("export const a = 1;", &options).unwrap();
        let second = parse_exports("export const b = 2;", &options).unwrap();
        assert_eq!(first[0].name.as_deref(), Some("a"));
        assert_eq!(second[0].name.as_deref(), Some("b"));
    }
}
