//! Module-resolution collaborator: core-module recognition by name.

/// Node.js built-in module names, including built-in subpaths.
///
/// Sorted; `is_core_module` binary-searches it.
const CORE_MODULES: &[&str] = &[
    "assert",
    "assert/strict",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "dns/promises",
    "domain",
    "events",
    "fs",
    "fs/promises",
    "http",
    "http2",
    "https",
    "inspector",
    "inspector/promises",
    "module",
    "net",
    "os",
    "path",
    "path/posix",
    "path/win32",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "readline/promises",
    "repl",
    "stream",
    "stream/consumers",
    "stream/promises",
    "stream/web",
    "string_decoder",
    "sys",
    "timers",
    "timers/promises",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "util/types",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

/// Built-ins only reachable through the `node:` prefix.
const PREFIX_ONLY: &[&str] = &["sea", "sqlite", "test", "test/reporters"];

/// Whether a bare module name refers to a Node.js built-in module.
///
/// Accepts the `node:` prefix form and built-in subpaths (`fs/promises`).
pub fn is_core_module(name: &str) -> bool {
    match name.strip_prefix("node:") {
        Some(rest) => {
            PREFIX_ONLY.contains(&rest) || CORE_MODULES.binary_search(&rest).is_ok()
        }
        None => CORE_MODULES.binary_search(&name).is_ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_for_binary_search() {
        assert!(CORE_MODULES.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn recognizes_bare_builtins() {
        assert!(is_core_module("fs"));
        assert!(is_core_module("path"));
        assert!(is_core_module("worker_threads"));
    }

    #[test]
    fn recognizes_node_prefix() {
        assert!(is_core_module("node:fs"));
        assert!(is_core_module("node:stream/web"));
    }

    #[test]
    fn recognizes_builtin_subpaths() {
        assert!(is_core_module("fs/promises"));
        assert!(is_core_module("timers/promises"));
    }

    #[test]
    fn prefix_only_builtins_need_the_prefix() {
        assert!(is_core_module("node:test"));
        assert!(!is_core_module("test"));
    }

    #[test]
    fn rejects_packages_and_relative_paths() {
        assert!(!is_core_module("lodash"));
        assert!(!is_core_module("./fs"));
        assert!(!is_core_module("fs/extra"));
        assert!(!is_core_module(""));
    }
}
