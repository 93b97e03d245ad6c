//! Quill front-end CLI.

mod commands;

use commands::{lex_file, parse_file};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];
    let mut stdlib: Option<String> = None;
    let mut path: Option<String> = None;
    for arg in args.iter().skip(2) {
        if let Some(dir) = arg.strip_prefix("--stdlib=") {
            stdlib = Some(dir.to_string());
        } else if !arg.starts_with('-') && path.is_none() {
            path = Some(arg.clone());
        }
    }

    match command.as_str() {
        "lex" => {
            let Some(path) = path else {
                eprintln!("Usage: quillc lex <file.qul>");
                std::process::exit(1);
            };
            lex_file(&path);
        }
        "parse" => {
            let Some(path) = path else {
                eprintln!("Usage: quillc parse <file.qul> [--stdlib=<dir>]");
                std::process::exit(1);
            };
            parse_file(&path, stdlib.as_deref());
        }
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("unknown command: {other}");
            print_usage();
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_target(false).init();
}

fn print_usage() {
    println!("Quill front-end");
    println!();
    println!("Usage:");
    println!("  quillc lex <file.qul>                    Dump the token stream");
    println!("  quillc parse <file.qul> [--stdlib=<dir>] Build and dump the syntax tree");
    println!();
    println!("The standard library root defaults to $QUILL_STDLIB, then \"std\".");
}
