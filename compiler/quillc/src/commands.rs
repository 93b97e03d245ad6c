//! CLI subcommands.

use quill_diagnostic::{emitter, Diagnostic};
use quill_lex::SourceFile;
use quill_parse::Builder;
use rustc_hash::FxHashMap;
use std::io::IsTerminal;
use std::sync::Arc;

/// Dump the token stream of a file.
pub fn lex_file(path: &str) {
    let Some((tokens, errors)) = lex_path(path) else {
        std::process::exit(1);
    };
    for tok in &tokens {
        println!("{}:{}\t{:?}\t{}", tok.row, tok.column, tok.id, tok.text);
    }
    if !errors.is_empty() {
        report(&errors);
        std::process::exit(1);
    }
}

/// Build and dump the syntax tree of a file.
pub fn parse_file(path: &str, stdlib: Option<&str>) {
    let Some((tokens, mut errors)) = lex_path(path) else {
        std::process::exit(1);
    };
    let mut builder = Builder::new(tokens);
    if let Some(dir) = stdlib {
        builder = builder.with_stdlib(dir);
    }
    let output = builder.build();
    for obj in &output.tree {
        println!("{obj:#?}");
    }
    errors.extend(output.errors);
    if !errors.is_empty() {
        report(&errors);
        std::process::exit(1);
    }
}

fn lex_path(path: &str) -> Option<(Vec<quill_lex::Token>, Vec<Diagnostic>)> {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: cannot read {path}: {err}");
            return None;
        }
    };
    let file = Arc::new(SourceFile::new(path));
    tracing::debug!(path, bytes = source.len(), "lexing");
    Some(quill_lex::lex(&source, &file))
}

/// Print diagnostics grouped per file, in source order within each group.
fn report(diags: &[Diagnostic]) {
    let mut by_path: FxHashMap<&str, Vec<&Diagnostic>> = FxHashMap::default();
    let mut order: Vec<&str> = Vec::new();
    for diag in diags {
        let entry = by_path.entry(diag.path.as_str()).or_default();
        if entry.is_empty() {
            order.push(&diag.path);
        }
        entry.push(diag);
    }
    let color = std::io::stderr().is_terminal();
    let mut stderr = std::io::stderr().lock();
    for path in order {
        let group: Vec<Diagnostic> = by_path[path].iter().map(|d| (*d).clone()).collect();
        let _ = emitter::emit_all(&mut stderr, &group, color);
    }
}
