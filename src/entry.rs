use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

/// One exported binding discovered in a source unit.
///
/// Immutable after construction, except that the export-assignment resolver
/// may upgrade `cjs`/`ts` from `false` to `true` before the entry reaches
/// the result set. Serializes to camelCase JSON with absent optional fields
/// omitted, matching what JS tooling consumers expect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Exported name; `None` for wildcard re-exports and whole-module exports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Ambient module attribution, or the caller-supplied default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    /// Originating file, passed through unchanged from options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filepath: Option<String>,

    /// Source module of a re-export.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specifier: Option<String>,

    /// The binding is the module's default export.
    pub is_default: bool,

    /// Discovered via a legacy whole-module assignment idiom.
    pub cjs: bool,

    /// Discovery required ambient-module resolution.
    pub ts: bool,
}

impl Entry {
    /// Identity key for de-duplication within one extraction call.
    ///
    /// `cjs` and `ts` are not part of the identity: the same binding
    /// discovered through two idioms is one export, first discovery wins.
    pub fn id(&self) -> EntryId {
        EntryId {
            name: self.name.clone(),
            module: self.module.clone(),
            specifier: self.specifier.clone(),
            is_default: self.is_default,
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.name, &self.specifier) {
            (Some(name), _) => write!(f, "{name}")?,
            (None, Some(_)) => write!(f, "*")?,
            // Whole-module export: the entire module object is the surface.
            (None, None) => write!(f, "=")?,
        }
        if let Some(specifier) = &self.specifier {
            write!(f, "  from {specifier}")?;
        }
        if let Some(module) = &self.module {
            write!(f, "  in {module}")?;
        }

        let mut flags = Vec::new();
        if self.is_default {
            flags.push("default");
        }
        if self.cjs {
            flags.push("cjs");
        }
        if self.ts {
            flags.push("ts");
        }
        if !flags.is_empty() {
            write!(f, "  ({})", flags.join(", "))?;
        }
        Ok(())
    }
}

/// De-duplication key over `(name, module, specifier, is_default)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryId {
    name: Option<String>,
    module: Option<String>,
    specifier: Option<String>,
    is_default: bool,
}

/// Insertion-ordered set of entries keyed by identity; first write wins.
#[derive(Default)]
pub struct EntrySet {
    seen: HashSet<EntryId>,
    result: Vec<Entry>,
}

impl EntrySet {
    /// Insert `entry` unless an entry with the same identity already exists.
    pub fn push(&mut self, entry: Entry) {
        if self.seen.insert(entry.id()) {
            self.result.push(entry);
        }
    }

    pub fn into_entries(self) -> Vec<Entry> {
        self.result
    }
}
