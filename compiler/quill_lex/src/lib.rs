//! Lexer for Quill.
//!
//! Converts source text into the flat [`Token`] stream the AST builder
//! consumes. Raw tokenization is a logos-derived scanner; this crate assigns
//! 1-based rows and columns from byte offsets and classifies each match.
//!
//! # Error handling
//!
//! Unrecognized input produces a diagnostic and lexing continues, so a broken
//! file still yields a usable token stream for downstream recovery.
//!
//! # Trivia
//!
//! Whitespace and block comments are skipped. Line comments are real tokens:
//! the builder turns them into comment nodes of the tree.

mod file;
mod raw;
mod token;

pub use file::SourceFile;
pub use token::{kind, Token, TokenId};

use logos::Logos;
use quill_diagnostic::{DiagCode, Diagnostic};
use raw::RawToken;
use std::sync::Arc;

/// Byte offsets of line starts, for offset → row/column translation.
struct LineTable {
    starts: Vec<u32>,
}

impl LineTable {
    fn new(source: &str) -> Self {
        let mut starts = vec![0u32];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                starts.push(i as u32 + 1);
            }
        }
        LineTable { starts }
    }

    /// 1-based (row, column) of a byte offset.
    fn locate(&self, offset: u32) -> (u32, u32) {
        let line = match self.starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        (line as u32 + 1, offset - self.starts[line] + 1)
    }
}

/// Lex `source` into a token stream.
///
/// Returns the tokens plus any lexical diagnostics. The stream has no
/// end-of-file sentinel; the builder works on the finite slice.
pub fn lex(source: &str, file: &Arc<SourceFile>) -> (Vec<Token>, Vec<Diagnostic>) {
    let table = LineTable::new(source);
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    let mut scanner = RawToken::lexer(source);
    while let Some(result) = scanner.next() {
        let span = scanner.span();
        let slice = scanner.slice();
        let (row, column) = table.locate(span.start as u32);
        match result {
            Ok(raw) => {
                tokens.push(Token::new(
                    raw.token_id(),
                    slice,
                    Arc::clone(file),
                    row,
                    column,
                ));
            }
            Err(()) => {
                let code = match slice.as_bytes().first() {
                    Some(b'"') | Some(b'`') | Some(b'\'') => DiagCode::UnterminatedString,
                    _ => DiagCode::UnknownToken,
                };
                errors.push(Diagnostic::error(code, file.path_string(), row, column));
            }
        }
    }
    (tokens, errors)
}
