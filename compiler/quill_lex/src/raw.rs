//! Raw token definition.
//!
//! The `RawToken` enum is the logos-derived tokenizer output before position
//! assignment and conversion into [`crate::Token`].

use crate::TokenId;
use logos::Logos;

/// Raw token from logos. Carries no text; conversion reads the slice.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"/\*([^*]|\*+[^*/])*\*+/")] // block comments are trivia
pub(crate) enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    // Declaration keywords
    #[token("use")]
    Use,
    #[token("fn")]
    Fn,
    #[token("unsafe")]
    Unsafe,
    #[token("const")]
    Const,
    #[token("let")]
    Let,
    #[token("mut")]
    Mut,
    #[token("type")]
    Type,
    #[token("enum")]
    Enum,
    #[token("struct")]
    Struct,
    #[token("trait")]
    Trait,
    #[token("impl")]
    Impl,
    #[token("cpp")]
    Cpp,
    #[token("pub")]
    Pub,

    // Statement keywords. `for` and `iter` share one identifier: `iter`
    // introduces loops and `for` is the infix of trait impls.
    #[token("ret")]
    Ret,
    #[token("iter")]
    Iter,
    #[token("for")]
    For,
    #[token("in")]
    In,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("match")]
    Match,
    #[token("case")]
    Case,
    #[token("default")]
    Default,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("goto")]
    Goto,
    #[token("fallthrough")]
    Fallthrough,
    #[token("co")]
    Co,
    #[token("self")]
    SelfKw,

    // Built-in data types
    #[token("i8")]
    #[token("i16")]
    #[token("i32")]
    #[token("i64")]
    #[token("u8")]
    #[token("u16")]
    #[token("u32")]
    #[token("u64")]
    #[token("int")]
    #[token("uint")]
    #[token("uintptr")]
    #[token("f32")]
    #[token("f64")]
    #[token("bool")]
    #[token("str")]
    #[token("any")]
    DataType,

    // Literals
    #[token("true")]
    #[token("false")]
    #[token("nil")]
    #[regex(r"[0-9][0-9_]*", priority = 2)]
    #[regex(r"0[xX][0-9a-fA-F_]+", priority = 3)]
    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?", priority = 3)]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+", priority = 3)]
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r"`[^`]*`")]
    #[regex(r"'([^'\\\n]|\\.)'")]
    Literal,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    // Punctuation
    #[token("{")]
    #[token("}")]
    #[token("[")]
    #[token("]")]
    #[token("(")]
    #[token(")")]
    Brace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("::")]
    DblColon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,

    // Operators (longest match wins)
    #[token("...")]
    #[token(":=")]
    #[token("<<=")]
    #[token(">>=")]
    #[token("<<")]
    #[token(">>")]
    #[token("<=")]
    #[token(">=")]
    #[token("==")]
    #[token("!=")]
    #[token("&&")]
    #[token("||")]
    #[token("++")]
    #[token("--")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("%")]
    #[token("&")]
    #[token("|")]
    #[token("^")]
    #[token("!")]
    #[token("<")]
    #[token(">")]
    #[token("=")]
    Op,
}

impl RawToken {
    /// Map the raw class onto the public token identifier.
    pub(crate) fn token_id(self) -> TokenId {
        match self {
            RawToken::LineComment => TokenId::Comment,
            RawToken::Use => TokenId::Use,
            RawToken::Fn => TokenId::Fn,
            RawToken::Unsafe => TokenId::Unsafe,
            RawToken::Const => TokenId::Const,
            RawToken::Let => TokenId::Let,
            RawToken::Mut => TokenId::Mut,
            RawToken::Type => TokenId::Type,
            RawToken::Enum => TokenId::Enum,
            RawToken::Struct => TokenId::Struct,
            RawToken::Trait => TokenId::Trait,
            RawToken::Impl => TokenId::Impl,
            RawToken::Cpp => TokenId::Cpp,
            RawToken::Pub => TokenId::Pub,
            RawToken::Ret => TokenId::Ret,
            RawToken::Iter | RawToken::For => TokenId::Iter,
            RawToken::In => TokenId::In,
            RawToken::If => TokenId::If,
            RawToken::Else => TokenId::Else,
            RawToken::Match => TokenId::Match,
            RawToken::Case => TokenId::Case,
            RawToken::Default => TokenId::Default,
            RawToken::Break => TokenId::Break,
            RawToken::Continue => TokenId::Continue,
            RawToken::Goto => TokenId::Goto,
            RawToken::Fallthrough => TokenId::Fallthrough,
            RawToken::Co => TokenId::Co,
            RawToken::SelfKw => TokenId::SelfKw,
            RawToken::DataType => TokenId::Dt,
            RawToken::Literal => TokenId::Literal,
            RawToken::Ident => TokenId::Ident,
            RawToken::Brace => TokenId::Brace,
            RawToken::Comma => TokenId::Comma,
            RawToken::Semicolon => TokenId::Semicolon,
            RawToken::DblColon => TokenId::DblColon,
            RawToken::Colon => TokenId::Colon,
            RawToken::Dot => TokenId::Dot,
            RawToken::Op => TokenId::Op,
        }
    }
}
