use tree_sitter::Node;

use crate::entry::Entry;
use crate::util::txt;

/// Attribution context for entries produced by the declaration extractor.
#[derive(Clone, Copy)]
pub(crate) struct Attribution<'a> {
    pub module: Option<&'a str>,
    pub filepath: Option<&'a str>,
}

impl Attribution<'_> {
    fn entry(&self, name: &str) -> Entry {
        Entry {
            name: Some(name.to_string()),
            module: self.module.map(str::to_string),
            filepath: self.filepath.map(str::to_string),
            ..Entry::default()
        }
    }
}

/// Collect the entries declared by a declaration-bearing node.
///
/// Binding lists (`const a = 1, b = 2`) contribute one entry per declared
/// identifier, with destructuring patterns flattened to their bound local
/// names. Named declarations (functions, classes, interfaces, type aliases,
/// enums, namespaces) contribute one entry carrying the `default` modifier
/// of the surrounding export statement, if any. Pure function of its inputs.
pub(crate) fn declaration_entries(node: Node, src: &[u8], attr: Attribution) -> Vec<Entry> {
    let mut result = Vec::new();

    let mut cursor = node.walk();
    for declarator in node.children(&mut cursor) {
        if declarator.kind() != "variable_declarator" {
            continue;
        }
        let Some(name) = declarator.child_by_field_name("name") else {
            continue;
        };
        match name.kind() {
            "identifier" => result.push(attr.entry(txt(name, src))),
            "object_pattern" | "array_pattern" => pattern_names(name, src, attr, &mut result),
            _ => {}
        }
    }

    if let Some(name) = node.child_by_field_name("name") {
        let mut entry = attr.entry(txt(name, src));
        entry.is_default = has_default_keyword(node.parent());
        result.push(entry);
    }

    result
}

/// Flatten a destructuring pattern to its bound local names.
///
/// Only the bound side of a rename counts; default values and the source
/// side of `{ src: local }` pairs are ignored.
fn pattern_names(pattern: Node, src: &[u8], attr: Attribution, out: &mut Vec<Entry>) {
    let mut cursor = pattern.walk();
    for element in pattern.children(&mut cursor) {
        match element.kind() {
            // `{ p }` and array elements
            "shorthand_property_identifier_pattern" | "identifier" => {
                out.push(attr.entry(txt(element, src)));
            }
            // `{ src: local }`
            "pair_pattern" => {
                if let Some(value) = element.child_by_field_name("value") {
                    if value.kind() == "identifier" {
                        out.push(attr.entry(txt(value, src)));
                    }
                }
            }
            // `{ p = 1 }` / `[p = 1]`
            "object_assignment_pattern" | "assignment_pattern" => {
                if let Some(left) = element.child_by_field_name("left") {
                    if matches!(
                        left.kind(),
                        "identifier" | "shorthand_property_identifier_pattern"
                    ) {
                        out.push(attr.entry(txt(left, src)));
                    }
                }
            }
            // `{ ...rest }` / `[...rest]`
            "rest_pattern" => {
                let mut inner = element.walk();
                for child in element.named_children(&mut inner) {
                    if child.kind() == "identifier" {
                        out.push(attr.entry(txt(child, src)));
                    }
                }
            }
            _ => {}
        }
    }
}

/// Whether the node's surrounding export statement carries `default`.
fn has_default_keyword(parent: Option<Node>) -> bool {
    let Some(parent) = parent else {
        return false;
    };
    if parent.kind() != "export_statement" {
        return false;
    }
    let mut cursor = parent.walk();
    let has_default = parent.children(&mut cursor).any(|c| c.kind() == "default");
    has_default
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ts(src: &str) -> tree_sitter::Tree {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
            .unwrap();
        parser.parse(src, None).unwrap()
    }

    const NO_ATTR: Attribution<'static> = Attribution {
        module: None,
        filepath: None,
    };

    fn names(entries: &[Entry]) -> Vec<&str> {
        entries.iter().filter_map(|e| e.name.as_deref()).collect()
    }

    #[test]
    fn binding_list_yields_each_declarator() {
        let src = "const a = 1, b = 2;";
        let tree = parse_ts(src);
        let list = tree.root_node().child(0).unwrap();
        assert_eq!(list.kind(), "lexical_declaration");

        let entries = declaration_entries(list, src.as_bytes(), NO_ATTR);
        assert_eq!(names(&entries), vec!["a", "b"]);
    }

    #[test]
    fn object_pattern_yields_bound_names() {
        let src = "const { p, q } = obj;";
        let tree = parse_ts(src);
        let list = tree.root_node().child(0).unwrap();

        let entries = declaration_entries(list, src.as_bytes(), NO_ATTR);
        assert_eq!(names(&entries), vec!["p", "q"]);
    }

    #[test]
    fn renamed_pattern_uses_local_side() {
        let src = "const { source: local } = obj;";
        let tree = parse_ts(src);
        let list = tree.root_node().child(0).unwrap();

        let entries = declaration_entries(list, src.as_bytes(), NO_ATTR);
        assert_eq!(names(&entries), vec!["local"]);
    }

    #[test]
    fn array_pattern_with_default_and_rest() {
        let src = "const [first = 1, ...rest] = items;";
        let tree = parse_ts(src);
        let list = tree.root_node().child(0).unwrap();

        let entries = declaration_entries(list, src.as_bytes(), NO_ATTR);
        assert_eq!(names(&entries), vec!["first", "rest"]);
    }

    #[test]
    fn named_function_carries_parent_default() {
        let src = "export default function foo() {}";
        let tree = parse_ts(src);
        let export = tree.root_node().child(0).unwrap();
        let declaration = export.child_by_field_name("declaration").unwrap();

        let entries = declaration_entries(declaration, src.as_bytes(), NO_ATTR);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name.as_deref(), Some("foo"));
        assert!(entries[0].is_default);
    }

    #[test]
    fn plain_function_is_not_default() {
        let src = "function foo() {}";
        let tree = parse_ts(src);
        let func = tree.root_node().child(0).unwrap();

        let entries = declaration_entries(func, src.as_bytes(), NO_ATTR);
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].is_default);
    }

    #[test]
    fn attribution_is_copied_onto_entries() {
        let src = "const a = 1;";
        let tree = parse_ts(src);
        let list = tree.root_node().child(0).unwrap();

        let attr = Attribution {
            module: Some("m"),
            filepath: Some("lib.d.ts"),
        };
        let entries = declaration_entries(list, src.as_bytes(), attr);
        assert_eq!(entries[0].module.as_deref(), Some("m"));
        assert_eq!(entries[0].filepath.as_deref(), Some("lib.d.ts"));
    }
}
