mod declarations;

use std::collections::HashMap;
use std::path::PathBuf;

use tree_sitter::Node;

use crate::entry::{Entry, EntrySet};
use crate::resolve;
use crate::util::{trim_quotes, txt};
use declarations::{declaration_entries, Attribution};

/// Options for one extraction call.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Default module attribution for entries not claimed by an ambient module.
    pub module: Option<String>,
    /// Reserved for the module-resolution collaborator; unused by the walk.
    pub basedir: Option<PathBuf>,
    /// Copied verbatim into every emitted entry.
    pub filepath: Option<String>,
}

/// Statement kinds the walker treats as declaration-bearing.
const DECLARATION_KINDS: &[&str] = &[
    "lexical_declaration",
    "variable_declaration",
    "function_declaration",
    "generator_function_declaration",
    "function_signature",
    "class_declaration",
    "abstract_class_declaration",
    "interface_declaration",
    "type_alias_declaration",
    "enum_declaration",
];

/// Extract every statically-visible export binding reachable from `root`.
///
/// Single pass in source order. Result order follows first discovery;
/// entries claimed by a whole-module export assignment are appended after
/// the walk, preserving their original relative order.
pub fn extract_exports(root: Node, src: &[u8], options: &ExtractOptions) -> Vec<Entry> {
    let mut ctx = WalkContext {
        src,
        options,
        module: options.module.clone(),
        module_name: None,
        module_end: None,
        module_declarations: HashMap::new(),
        entries: EntrySet::default(),
        export_assignment: None,
    };
    ctx.walk(root, 0);
    ctx.resolve_export_assignment();
    ctx.entries.into_entries()
}

/// Mutable traversal state scoped to one extraction call.
struct WalkContext<'a> {
    src: &'a [u8],
    options: &'a ExtractOptions,
    /// Current attribution for emitted entries.
    module: Option<String>,
    /// Name of the ambient module block being walked, if any.
    module_name: Option<String>,
    /// Byte offset at which the ambient module context ends.
    module_end: Option<usize>,
    /// Entries collected per ambient module, provisional until an
    /// export assignment claims them.
    module_declarations: HashMap<String, Vec<Entry>>,
    entries: EntrySet,
    /// Pending `export =` / `export default <expr>` expression; a file has
    /// at most one that matters, the last one wins.
    export_assignment: Option<ExportAssignment>,
}

struct ExportAssignment {
    text: String,
    is_identifier: bool,
}

/// Anchors re-root the bounded descent: the file itself and any
/// module/namespace block, ambient or not.
fn is_anchor(node: Node) -> bool {
    matches!(node.kind(), "program" | "module" | "internal_module")
}

/// The assigned expression of `export = expr` or `export default <expr>`.
///
/// Anonymous default functions and classes parse as expressions but declare
/// nothing, so they are not treated as assignments.
fn export_assignment_expression(node: Node) -> Option<Node> {
    let mut after_equals = false;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if !child.is_named() && child.kind() == "=" {
            after_equals = true;
            continue;
        }
        if after_equals && child.is_named() {
            return Some(child);
        }
    }

    let value = node.child_by_field_name("value")?;
    match value.kind() {
        "function_expression" | "function" | "generator_function" | "class" => None,
        _ => Some(value),
    }
}

impl WalkContext<'_> {
    /// Visit `node`, then descend while within two levels of the nearest
    /// anchor. Exports cannot occur deeper, so nested function and class
    /// bodies are never entered.
    fn walk(&mut self, node: Node, depth: usize) {
        self.visit(node);
        let depth = if is_anchor(node) { 0 } else { depth };
        if depth <= 2 {
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                self.walk(child, depth + 1);
            }
        }
    }

    fn visit(&mut self, node: Node) {
        // The active ambient module context ends at its closing brace.
        if self.module_end.is_some_and(|end| node.start_byte() >= end) {
            self.module = self.options.module.clone();
            self.module_name = None;
            self.module_end = None;
        }

        match node.kind() {
            "module" | "internal_module" => self.enter_module(node),
            "export_statement" => self.export_statement(node),
            "assignment_expression" => self.legacy_assignment(node),
            kind if DECLARATION_KINDS.contains(&kind) => self.module_block_declaration(node),
            _ => {}
        }
    }

    /// `declare module "x" {}` / `declare namespace N {}` open an ambient
    /// context. Plain `module`/`namespace` blocks are still walked for
    /// nested exports but get no attribution.
    fn enter_module(&mut self, node: Node) {
        let is_declare = node
            .parent()
            .is_some_and(|p| p.kind() == "ambient_declaration");
        if !is_declare {
            return;
        }
        let Some(name) = node.child_by_field_name("name") else {
            return;
        };
        let name = trim_quotes(txt(name, self.src)).to_string();
        if resolve::is_core_module(&name) {
            self.module = Some(name.clone());
        }
        self.module_name = Some(name);
        self.module_end = Some(node.end_byte());
    }

    /// Declarations directly inside an ambient module block are provisional:
    /// they surface only if a later export assignment names their module.
    fn module_block_declaration(&mut self, node: Node) {
        let Some(module_name) = self.module_name.clone() else {
            return;
        };
        let inside_block = node.parent().is_some_and(|p| {
            p.kind() == "statement_block"
                && p.parent()
                    .is_some_and(|m| matches!(m.kind(), "module" | "internal_module"))
        });
        if !inside_block {
            return;
        }

        let attr = Attribution {
            module: Some(&module_name),
            filepath: self.options.filepath.as_deref(),
        };
        let entries = declaration_entries(node, self.src, attr);
        self.module_declarations
            .entry(module_name)
            .or_default()
            .extend(entries);
    }

    fn export_statement(&mut self, node: Node) {
        // `export function f() {}`, `export const a = 1`, `export default
        // class Foo {}`: the declaration carries the names.
        if let Some(declaration) = node.child_by_field_name("declaration") {
            // `export declare const x` wraps the declaration once more.
            let declaration = if declaration.kind() == "ambient_declaration" {
                declaration.named_child(0).unwrap_or(declaration)
            } else {
                declaration
            };
            let entries = declaration_entries(declaration, self.src, self.attribution());
            for entry in entries {
                self.entries.push(entry);
            }
            return;
        }

        // `export = expr` and `export default <expr>` designate a single
        // expression as the exported value; resolved after the walk.
        if let Some(expression) = export_assignment_expression(node) {
            self.export_assignment = Some(ExportAssignment {
                text: txt(expression, self.src).to_string(),
                is_identifier: expression.kind() == "identifier",
            });
            return;
        }

        self.export_list(node);
    }

    /// `export { a, b }`, `export { a } from "m"`, `export * from "m"`,
    /// `export * as ns from "m"`.
    fn export_list(&mut self, node: Node) {
        let specifier = node
            .child_by_field_name("source")
            .map(|s| trim_quotes(txt(s, self.src)).to_string());

        let mut is_default = false;
        let mut names: Vec<Option<String>> = Vec::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "default" => is_default = true,
                // A wildcard has no names of its own.
                "*" | "namespace_export" => names.push(None),
                "export_clause" => {
                    let mut specs = child.walk();
                    for spec in child.children(&mut specs) {
                        if spec.kind() != "export_specifier" {
                            continue;
                        }
                        let exported = spec
                            .child_by_field_name("alias")
                            .or_else(|| spec.child_by_field_name("name"));
                        if let Some(exported) = exported {
                            names.push(Some(txt(exported, self.src).to_string()));
                        }
                    }
                }
                _ => {}
            }
        }

        for name in names {
            self.entries.push(Entry {
                name,
                module: self.module.clone(),
                filepath: self.options.filepath.clone(),
                specifier: specifier.clone(),
                is_default,
                ..Entry::default()
            });
        }
    }

    /// `module.exports.name = ...`, the legacy property-assignment idiom.
    fn legacy_assignment(&mut self, node: Node) {
        let Some(left) = node.child_by_field_name("left") else {
            return;
        };
        if left.kind() != "member_expression" {
            return;
        }
        let Some(object) = left.child_by_field_name("object") else {
            return;
        };
        if object.kind() != "member_expression" || txt(object, self.src) != "module.exports" {
            return;
        }
        let Some(property) = left.child_by_field_name("property") else {
            return;
        };

        self.entries.push(Entry {
            name: Some(txt(property, self.src).to_string()),
            module: self.module.clone(),
            filepath: self.options.filepath.clone(),
            cjs: true,
            ..Entry::default()
        });
    }

    /// Reconcile a recorded whole-module export against the declarations
    /// collected per ambient module.
    fn resolve_export_assignment(&mut self) {
        let Some(assignment) = self.export_assignment.take() else {
            return;
        };

        if let Some(declarations) = self.module_declarations.remove(&assignment.text) {
            // The expression names an ambient module: its declarations are
            // the exported surface, reachable at runtime through the legacy
            // idiom and only describable through type-level declarations.
            for mut entry in declarations {
                entry.cjs = true;
                entry.ts = true;
                self.entries.push(entry);
            }
        } else if let Some(module) = self.module.clone() {
            // The entire module object is the export.
            self.entries.push(Entry {
                module: Some(module),
                cjs: true,
                ts: true,
                ..Entry::default()
            });
        } else if assignment.is_identifier {
            self.entries.push(Entry {
                name: Some(assignment.text),
                filepath: self.options.filepath.clone(),
                is_default: true,
                ..Entry::default()
            });
        }
    }

    fn attribution(&self) -> Attribution<'_> {
        Attribution {
            module: self.module.as_deref(),
            filepath: self.options.filepath.as_deref(),
        }
    }
}
