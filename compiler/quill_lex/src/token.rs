//! Token model for the Quill front-end.
//!
//! A token is a kind identifier plus the literal source text it was lexed
//! from. Dispatch happens on the identifier where possible; operators and
//! brace characters are distinguished by their text (see [`kind`]).

use crate::SourceFile;
use std::fmt;
use std::sync::Arc;

/// Token kind identifiers.
///
/// Keywords get their own identifier. Operators share [`TokenId::Op`] and
/// brace characters share [`TokenId::Brace`]; their text tells them apart.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TokenId {
    /// Absent token (zero value for synthesized placeholders).
    Na,
    /// Built-in data type keyword (`i32`, `str`, ...).
    Dt,
    Ident,
    Literal,
    Op,
    Brace,
    Comma,
    Semicolon,
    Colon,
    DblColon,
    Dot,
    Comment,

    // Declaration keywords
    Use,
    Fn,
    Unsafe,
    Const,
    Let,
    Mut,
    Type,
    Enum,
    Struct,
    Trait,
    Impl,
    Cpp,
    Pub,

    // Statement keywords
    Ret,
    Iter,
    In,
    If,
    Else,
    Match,
    Case,
    Default,
    Break,
    Continue,
    Goto,
    Fallthrough,
    Co,
    SelfKw,
}

/// Literal token texts the builders dispatch on.
pub mod kind {
    pub const LBRACE: &str = "{";
    pub const RBRACE: &str = "}";
    pub const LBRACKET: &str = "[";
    pub const RBRACKET: &str = "]";
    pub const LPAREN: &str = "(";
    pub const RPAREN: &str = ")";

    pub const PLUS: &str = "+";
    pub const MINUS: &str = "-";
    pub const STAR: &str = "*";
    pub const SOLIDUS: &str = "/";
    pub const PERCENT: &str = "%";
    pub const AMPER: &str = "&";
    pub const VLINE: &str = "|";
    pub const CARET: &str = "^";
    pub const LSHIFT: &str = "<<";
    pub const RSHIFT: &str = ">>";
    pub const LT: &str = "<";
    pub const GT: &str = ">";
    pub const LESS_EQ: &str = "<=";
    pub const GREAT_EQ: &str = ">=";
    pub const EQS: &str = "==";
    pub const NOT_EQ: &str = "!=";
    pub const DBL_AMPER: &str = "&&";
    pub const DBL_VLINE: &str = "||";
    pub const EXCL: &str = "!";
    pub const EQ: &str = "=";
    pub const TRIPLE_DOT: &str = "...";
    pub const DBL_PLUS: &str = "++";
    pub const DBL_MINUS: &str = "--";
    pub const WALRUS: &str = ":=";

    pub const SELF: &str = "self";
    pub const UNSAFE: &str = "unsafe";
}

/// A lexical token.
///
/// `text` is the literal source text. `row` and `column` are 1-based. Tokens
/// are immutable inputs to the builder; nodes embed copies of them.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub id: TokenId,
    pub text: String,
    pub file: Arc<SourceFile>,
    pub row: u32,
    pub column: u32,
}

impl Token {
    pub fn new(
        id: TokenId,
        text: impl Into<String>,
        file: Arc<SourceFile>,
        row: u32,
        column: u32,
    ) -> Self {
        Token {
            id,
            text: text.into(),
            file,
            row,
            column,
        }
    }

    /// Placeholder token for synthesized slots.
    pub fn na() -> Self {
        Token {
            id: TokenId::Na,
            text: String::new(),
            file: Arc::new(SourceFile::default()),
            row: 0,
            column: 0,
        }
    }

    /// Token for tests and generated trees; positioned at 1:1 of an unnamed file.
    pub fn dummy(id: TokenId, text: impl Into<String>) -> Self {
        Token {
            id,
            text: text.into(),
            file: Arc::new(SourceFile::new("<dummy>")),
            row: 1,
            column: 1,
        }
    }

    /// Path of the file this token came from, for diagnostics.
    pub fn path(&self) -> String {
        self.file.path_string()
    }
}

impl Default for Token {
    fn default() -> Self {
        Token::na()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?}) @ {}:{}", self.id, self.text, self.row, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn na_token_is_empty() {
        let tok = Token::na();
        assert_eq!(tok.id, TokenId::Na);
        assert!(tok.text.is_empty());
        assert_eq!(tok.row, 0);
    }

    #[test]
    fn debug_shows_position() {
        let tok = Token::dummy(TokenId::Ident, "x");
        let out = format!("{tok:?}");
        assert!(out.contains("Ident"));
        assert!(out.contains("1:1"));
    }
}
