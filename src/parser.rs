use std::path::Path;

use tree_sitter::{Language, Parser, Tree};

use crate::error::ExportsError;

/// Detect the tree-sitter language from a file extension.
pub fn detect_language(ext: &str) -> Result<Language, ExportsError> {
    match ext {
        "tsx" | "jsx" => Ok(tree_sitter_typescript::LANGUAGE_TSX.into()),
        "ts" | "mts" | "js" | "mjs" | "cjs" => {
            Ok(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
        }
        _ => Err(ExportsError::UnsupportedExtension(ext.to_string())),
    }
}

/// Parse source text with the TypeScript grammar.
///
/// Export syntax in the TypeScript grammar is a superset of plain
/// JavaScript, so callers without a file extension get this one.
pub fn parse_source(source: &str) -> Result<Tree, ExportsError> {
    parse_with(source, &tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
}

/// Parse source text with an explicit tree-sitter language.
///
/// A fresh parser is created per call; tree-sitter parsers are not `Sync`,
/// and per-call ownership keeps extraction callable from multiple threads.
pub fn parse_with(source: &str, language: &Language) -> Result<Tree, ExportsError> {
    let mut parser = Parser::new();
    parser
        .set_language(language)
        .map_err(|e| ExportsError::ParseFailed(e.to_string()))?;

    parser
        .parse(source, None)
        .ok_or_else(|| ExportsError::ParseFailed("no tree produced".to_string()))
}

/// Read and parse a source file, returning the tree and source text.
pub fn parse_file(path: &Path) -> Result<(Tree, String), ExportsError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    let source = std::fs::read_to_string(path).map_err(|e| ExportsError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let language = detect_language(ext)?;
    let tree = parse_with(&source, &language)?;

    Ok((tree, source))
}
