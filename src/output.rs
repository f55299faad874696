use std::fmt;
use std::path::Path;

use crate::entry::Entry;
use crate::error::ExportsError;
use crate::extract::{self, ExtractOptions};
use crate::parser;

/// Export surface of a single file, ready for display.
pub struct ExportReport {
    pub display_path: String,
    pub entries: Vec<Entry>,
}

impl ExportReport {
    /// Read, parse, and extract one file.
    ///
    /// The file path becomes the entries' `filepath` unless the caller
    /// already supplied one.
    pub fn from_path(path: &Path, options: &ExtractOptions) -> Result<Self, ExportsError> {
        let (tree, source) = parser::parse_file(path)?;

        let mut options = options.clone();
        if options.filepath.is_none() {
            options.filepath = Some(path.to_string_lossy().into_owned());
        }

        let entries = extract::extract_exports(tree.root_node(), source.as_bytes(), &options);
        Ok(Self {
            display_path: path.to_string_lossy().into_owned(),
            entries,
        })
    }

    /// JSON rendering for tooling consumers.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.entries).unwrap_or_else(|_| "[]".to_string())
    }
}

impl fmt::Display for ExportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}  ({} exports)",
            self.display_path,
            self.entries.len()
        )?;
        if self.entries.is_empty() {
            return Ok(());
        }
        writeln!(f)?;
        for entry in &self.entries {
            writeln!(f, "  {entry}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn from_path_extracts_and_stamps_filepath() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("lib.ts");
        fs::write(&file, "export const a = 1;\nexport default function main() {}").unwrap();

        let report = ExportReport::from_path(&file, &ExtractOptions::default()).unwrap();
        assert_eq!(report.entries.len(), 2);
        assert_eq!(
            report.entries[0].filepath.as_deref(),
            Some(file.to_string_lossy().as_ref())
        );
    }

    #[test]
    fn from_path_keeps_caller_filepath() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("lib.ts");
        fs::write(&file, "export const a = 1;").unwrap();

        let options = ExtractOptions {
            filepath: Some("virtual.ts".to_string()),
            ..ExtractOptions::default()
        };
        let report = ExportReport::from_path(&file, &options).unwrap();
        assert_eq!(report.entries[0].filepath.as_deref(), Some("virtual.ts"));
    }

    #[test]
    fn from_path_parses_tsx() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("app.tsx");
        fs::write(&file, "export function App() { return <div />; }").unwrap();

        let report = ExportReport::from_path(&file, &ExtractOptions::default()).unwrap();
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].name.as_deref(), Some("App"));
    }

    #[test]
    fn display_lists_entries_with_header() {
        let report = ExportReport {
            display_path: "src/lib.ts".to_string(),
            entries: vec![
                Entry {
                    name: Some("a".to_string()),
                    ..Entry::default()
                },
                Entry {
                    specifier: Some("./x".to_string()),
                    ..Entry::default()
                },
            ],
        };
        let text = report.to_string();
        assert!(text.starts_with("src/lib.ts  (2 exports)\n"));
        assert!(text.contains("\n  a\n"));
        assert!(text.contains("\n  *  from ./x\n"));
    }

    #[test]
    fn json_shape_is_a_camel_case_array() {
        let report = ExportReport {
            display_path: "lib.ts".to_string(),
            entries: vec![Entry {
                name: Some("foo".to_string()),
                is_default: true,
                ..Entry::default()
            }],
        };
        let value: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(value[0]["name"], "foo");
        assert_eq!(value[0]["isDefault"], true);
        assert!(value[0].get("specifier").is_none());
    }
}
