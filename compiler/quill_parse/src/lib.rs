//! AST builder for Quill.
//!
//! Turns the flat token stream into a tree of declarations, statements,
//! expressions, and type references. The builder is error-tolerant: every
//! syntax problem is appended to the diagnostic list, the cursor resumes at
//! the next statement boundary, and a best-effort node still lands in the
//! tree. `build()` always returns.
//!
//! The walk is slice-driven: the cursor cuts one statement slice at a time
//! (semicolons, row breaks, and balanced braces delimit statements) and each
//! grammar routine consumes its slice, pulling the next one only when a block
//! opener sits on the following line.

mod cursor;
mod split;

mod grammar;

#[cfg(test)]
mod tests;

pub use cursor::{next_statement_pos, Cursor};
pub use split::{block_expr, check_assign_tokens, is_func_call, parts, range, range_last};

use quill_ast::Object;
use quill_diagnostic::{DiagCode, Diagnostic};
use quill_lex::{Token, TokenId};

/// Name of the environment variable naming the standard library root.
pub const STDLIB_ENV: &str = "QUILL_STDLIB";

/// Fallback standard library root when the environment names none.
pub const STDLIB_DEFAULT: &str = "std";

/// Resolved standard library root for `use std::...` declarations.
pub fn stdlib_path() -> String {
    std::env::var(STDLIB_ENV).unwrap_or_else(|_| STDLIB_DEFAULT.to_string())
}

/// Result of a build: the tree plus every diagnostic, in source order.
#[derive(Clone, Debug, Default)]
pub struct BuildOutput {
    pub tree: Vec<Object>,
    pub errors: Vec<Diagnostic>,
}

impl BuildOutput {
    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(|e| e.severity.is_error())
    }
}

/// Build a tree from a token stream with the process-wide stdlib root.
pub fn build(tokens: Vec<Token>) -> BuildOutput {
    Builder::new(tokens).build()
}

/// The AST builder.
///
/// Owns the token cursor, the public-modifier sidechannel, and the output
/// tree and error list until `build()` hands them back.
pub struct Builder {
    pub(crate) cursor: Cursor,
    /// The `pub` sidechannel. Written by the driver loop, consumed exactly
    /// once by the next declaration builder via [`Builder::take_pub`].
    pub(crate) pub_flag: bool,
    pub(crate) stdlib: String,
    pub(crate) tree: Vec<Object>,
    pub(crate) errors: Vec<Diagnostic>,
}

impl Builder {
    pub fn new(tokens: Vec<Token>) -> Self {
        Builder {
            cursor: Cursor::new(tokens),
            pub_flag: false,
            stdlib: stdlib_path(),
            tree: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Override the standard library root (tests, CLI flag).
    #[must_use]
    pub fn with_stdlib(mut self, stdlib: impl Into<String>) -> Self {
        self.stdlib = stdlib.into();
        self
    }

    /// Build the tree. Never fails; inspect [`BuildOutput::errors`].
    pub fn build(mut self) -> BuildOutput {
        let _span = tracing::debug_span!("build", tokens = self.cursor.len()).entered();
        while !self.cursor.ended() {
            let mut toks = self.cursor.next_statement();
            if toks.is_empty() {
                continue;
            }
            self.pub_flag = toks[0].id == TokenId::Pub;
            if self.pub_flag {
                if toks.len() == 1 {
                    if self.cursor.ended() {
                        self.push_err(&toks[0], DiagCode::InvalidSyntax);
                        continue;
                    }
                    let next = self.cursor.next_statement();
                    if next.is_empty() {
                        self.push_err(&toks[0], DiagCode::InvalidSyntax);
                        continue;
                    }
                    toks = next;
                } else {
                    toks.remove(0);
                }
            }
            self.build_node(toks);
        }
        self.wait();
        tracing::debug!(
            objects = self.tree.len(),
            errors = self.errors.len(),
            "tree built"
        );
        BuildOutput {
            tree: self.tree,
            errors: self.errors,
        }
    }

    /// Wait for concurrent sub-builds.
    ///
    /// The build is single-threaded today; the hook keeps the driver shape
    /// ready for parallel declaration builds, which must then restore source
    /// order before appending.
    fn wait(&mut self) {}

    /// Read and clear the public sidechannel.
    pub(crate) fn take_pub(&mut self) -> bool {
        std::mem::take(&mut self.pub_flag)
    }

    /// Append a diagnostic pinned to `tok`.
    pub(crate) fn push_err(&mut self, tok: &Token, code: DiagCode) {
        self.errors
            .push(Diagnostic::error(code, tok.path(), tok.row, tok.column));
    }

    /// Run `f` with a private cursor over `toks`, restoring the outer cursor
    /// afterwards. Impl bodies re-enter the statement loop through this.
    pub(crate) fn with_cursor<T>(
        &mut self,
        toks: Vec<Token>,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let saved = std::mem::replace(&mut self.cursor, Cursor::new(toks));
        let out = f(self);
        self.cursor = saved;
        out
    }

    /// Balanced-range extraction with the pull-next-statement escape hatch:
    /// when the opener is not in the current slice, fetch the next statement
    /// from the stream and search there.
    pub(crate) fn get_range(
        &mut self,
        i: &mut usize,
        open: &str,
        close: &str,
        toks: &mut Vec<Token>,
    ) -> Option<Vec<Token>> {
        if let Some(rang) = split::range(i, open, close, toks) {
            return Some(rang);
        }
        if self.cursor.ended() {
            return None;
        }
        *i = 0;
        *toks = self.cursor.next_statement();
        split::range(i, open, close, toks)
    }
}
