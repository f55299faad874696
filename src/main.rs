//! `esm-exports` — list the export surface of TypeScript/JavaScript files.
//!
//! Shows every name a module exposes to importers without executing it:
//! standard export syntax, ambient `declare module` blocks, and legacy
//! `module.exports` assignments.

use std::path::Path;

use esm_exports::{ExportReport, ExportsError, ExtractOptions};

struct CliArgs {
    module: Option<String>,
    json: bool,
    files: Vec<String>,
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut module = None;
    let mut json = false;
    let mut files = Vec::new();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--json" => json = true,
            "--module" | "-m" => {
                i += 1;
                if i >= args.len() {
                    return Err("--module requires a name argument".to_string());
                }
                module = Some(args[i].clone());
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}"));
            }
            _ => files.push(args[i].clone()),
        }
        i += 1;
    }

    Ok(CliArgs {
        module,
        json,
        files,
    })
}

fn main() {
    let raw: Vec<String> = std::env::args().skip(1).collect();

    if raw.is_empty() || raw[0] == "-h" || raw[0] == "--help" {
        print_help();
        std::process::exit(0);
    }

    let args = match parse_args(&raw) {
        Ok(a) => a,
        Err(msg) => {
            eprintln!("esm-exports: {msg}");
            std::process::exit(1);
        }
    };

    if args.files.is_empty() {
        eprintln!("esm-exports: no files specified");
        std::process::exit(1);
    }

    let options = ExtractOptions {
        module: args.module,
        ..ExtractOptions::default()
    };

    let multi = args.files.len() > 1;
    for (i, path_str) in args.files.iter().enumerate() {
        if i > 0 && multi {
            println!("\n---\n");
        }
        if let Err(e) = process_file(path_str, &options, args.json) {
            eprintln!("esm-exports: {e}");
        }
    }
}

fn process_file(path_str: &str, options: &ExtractOptions, json: bool) -> Result<(), ExportsError> {
    let report = ExportReport::from_path(Path::new(path_str), options)?;
    if json {
        println!("{}", report.to_json());
    } else {
        print!("{report}");
    }
    Ok(())
}

fn print_help() {
    eprintln!("esm-exports — list the export surface of TypeScript/JavaScript files");
    eprintln!("Usage: esm-exports [options] <file> [file2 ...]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --module NAME, -m NAME   Default module attribution for entries");
    eprintln!("  --json                   Emit entries as a JSON array");
    eprintln!("  -h, --help               Show help");
    eprintln!();
    eprintln!("Covers standard exports, ambient `declare module` blocks, and");
    eprintln!("legacy `module.exports` assignments.");
}
