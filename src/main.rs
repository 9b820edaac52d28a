//! FSON CLI — a thin front-end over the library's parse/serialize/get API.

use std::env;
use std::process;

use fson::{FormatOptions, Value};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "check" => cmd_check(&args[2..]),
        "fmt" => cmd_fmt(&args[2..]),
        "get" => cmd_get(&args[2..]),
        "--version" | "-V" => {
            println!("fson {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            process::exit(1);
        }
    };

    if let Err(msg) = result {
        eprintln!("Error: {}", msg);
        process::exit(1);
    }
}

fn print_usage() {
    println!("fson v{} - typed, human-readable data interchange format", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: fson <command> [options]");
    println!();
    println!("Commands:");
    println!("  check <file>                  Parse a document and report OK or the error");
    println!("  fmt <file> [--compact]         Parse and re-emit canonical FSON");
    println!("  get <file> <dotted.path>       Parse and print the value at a path");
    println!("  --version                      Print the crate version");
    println!("  help                           Show this help");
}

fn read_input(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("could not read {}: {}", path, e))
}

fn cmd_check(args: &[String]) -> Result<(), String> {
    let Some(path) = args.first() else {
        return Err("usage: fson check <file>".to_string());
    };
    let text = read_input(path)?;
    match fson::parse(&text) {
        Ok(_) => {
            println!("OK");
            Ok(())
        }
        Err(e) => {
            println!("{} at byte {}: {}", e.kind, e.offset, e.message);
            process::exit(1);
        }
    }
}

fn cmd_fmt(args: &[String]) -> Result<(), String> {
    let Some(path) = args.first() else {
        return Err("usage: fson fmt <file> [--compact]".to_string());
    };
    let compact = args.get(1).map(|a| a == "--compact").unwrap_or(false);
    let text = read_input(path)?;
    let value = fson::parse(&text).map_err(|e| e.to_string())?;
    let opts = if compact {
        FormatOptions::compact()
    } else {
        FormatOptions::pretty()
    };
    println!("{}", fson::serialize(&value, &opts));
    Ok(())
}

fn cmd_get(args: &[String]) -> Result<(), String> {
    if args.len() < 2 {
        return Err("usage: fson get <file> <dotted.path>".to_string());
    }
    let path = &args[0];
    let dotted = &args[1];
    let text = read_input(path)?;
    let value = fson::parse(&text).map_err(|e| e.to_string())?;

    let mut current = &value;
    for segment in dotted.split('.') {
        current = if let Ok(index) = segment.parse::<usize>() {
            current
                .array_get(index)
                .ok_or_else(|| format!("no element at index {}", index))?
        } else {
            current
                .object_get(segment)
                .ok_or_else(|| format!("no key '{}'", segment))?
        };
    }

    print_value(current);
    Ok(())
}

fn print_value(value: &Value) {
    println!("{}", fson::serialize(value, &FormatOptions::compact()));
}
