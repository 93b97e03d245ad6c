//! Range and split utilities.
//!
//! Balanced-bracket extraction plus comma/colon splitting that honors
//! nesting, shared by every grammar routine.

use quill_diagnostic::{DiagCode, Diagnostic};
use quill_lex::{kind, Token, TokenId};

/// Extract the token slice between matched `open`/`close`.
///
/// `*i` must point at the opener; on success it advances one past the closer
/// and the slice between the delimiters (exclusive) is returned. Returns
/// `None` when `*i` is not at the opener or the group is unbalanced.
pub fn range(i: &mut usize, open: &str, close: &str, toks: &[Token]) -> Option<Vec<Token>> {
    if *i >= toks.len() {
        return None;
    }
    let tok = &toks[*i];
    if !(tok.id == TokenId::Brace && tok.text == open) {
        return None;
    }
    *i += 1;
    let mut brace_n = 0i32;
    let start = *i;
    while *i < toks.len() {
        let tok = &toks[*i];
        if tok.id == TokenId::Brace {
            if tok.text == open {
                brace_n += 1;
            } else if tok.text == close {
                if brace_n == 0 {
                    let rang = toks[start..*i].to_vec();
                    *i += 1;
                    return Some(rang);
                }
                brace_n -= 1;
            }
        }
        *i += 1;
    }
    None
}

/// Split at top-level occurrences of `id`, honoring brace nesting.
///
/// Empty middle parts are diagnosed as `missing_expr` and dropped. With
/// `allow_trailing_empty` a trailing separator is permitted silently.
pub fn parts(
    toks: &[Token],
    id: TokenId,
    allow_trailing_empty: bool,
) -> (Vec<Vec<Token>>, Vec<Diagnostic>) {
    if toks.is_empty() {
        return (Vec::new(), Vec::new());
    }
    let mut out = Vec::new();
    let mut errs = Vec::new();
    let mut brace_n = 0i32;
    let mut last = 0usize;
    for (i, tok) in toks.iter().enumerate() {
        if tok.id == TokenId::Brace {
            match tok.text.as_str() {
                kind::LBRACE | kind::LBRACKET | kind::LPAREN => {
                    brace_n += 1;
                    continue;
                }
                _ => brace_n -= 1,
            }
        }
        if brace_n > 0 {
            continue;
        }
        if tok.id == id {
            if i == last {
                errs.push(Diagnostic::error(
                    DiagCode::MissingExpr,
                    tok.path(),
                    tok.row,
                    tok.column,
                ));
            } else {
                out.push(toks[last..i].to_vec());
            }
            last = i + 1;
        }
    }
    if last < toks.len() {
        out.push(toks[last..].to_vec());
    } else if !allow_trailing_empty && last > 0 {
        let tok = &toks[last - 1];
        errs.push(Diagnostic::error(
            DiagCode::MissingExpr,
            tok.path(),
            tok.row,
            tok.column,
        ));
    }
    (out, errs)
}

/// For map types `[K: V]`: the bracket group content plus the relative index
/// of the top-level `:`, which is `None` when the group has no colon.
///
/// `*i` must point at the `[`; it ends on the closing `]`.
pub(crate) fn split_colon(toks: &[Token], i: &mut usize) -> Option<(Vec<Token>, Option<usize>)> {
    let mut colon: Option<usize> = None;
    let mut brace_n = 0i32;
    let start = *i;
    while *i < toks.len() {
        let tok = &toks[*i];
        if tok.id == TokenId::Brace {
            match tok.text.as_str() {
                kind::LBRACE | kind::LBRACKET | kind::LPAREN => {
                    brace_n += 1;
                    *i += 1;
                    continue;
                }
                _ => brace_n -= 1,
            }
        }
        if brace_n == 0 {
            if start + 1 > *i {
                return None;
            }
            let inner = toks[start + 1..*i].to_vec();
            return Some((inner, colon));
        }
        if brace_n == 1 && colon.is_none() && tok.id == TokenId::Colon {
            colon = Some(*i - start - 1);
        }
        *i += 1;
    }
    None
}

/// Split off a trailing bracketed group: `(prefix, group)` where `group`
/// includes its delimiters. The group is empty when the list does not end
/// with a closer.
pub fn range_last(toks: &[Token]) -> (Vec<Token>, Vec<Token>) {
    match toks.last() {
        None => return (Vec::new(), Vec::new()),
        Some(last) if last.id != TokenId::Brace => return (toks.to_vec(), Vec::new()),
        _ => {}
    }
    let mut brace_n = 0i32;
    for i in (0..toks.len()).rev() {
        let tok = &toks[i];
        if tok.id == TokenId::Brace {
            match tok.text.as_str() {
                kind::RBRACE | kind::RBRACKET | kind::RPAREN => {
                    brace_n += 1;
                    continue;
                }
                _ => brace_n -= 1,
            }
        }
        if brace_n == 0 {
            return (toks[..i].to_vec(), toks[i..].to_vec());
        }
    }
    (toks.to_vec(), Vec::new())
}

/// Tokens before the first top-level `{`; empty when there is none.
pub fn block_expr(toks: &[Token]) -> Vec<Token> {
    let mut brace_n = 0i32;
    for (i, tok) in toks.iter().enumerate() {
        if tok.id == TokenId::Brace {
            match tok.text.as_str() {
                kind::LBRACE => {
                    if brace_n > 0 {
                        brace_n += 1;
                        continue;
                    }
                    return toks[..i].to_vec();
                }
                kind::LBRACKET | kind::LPAREN => brace_n += 1,
                _ => brace_n -= 1,
            }
        }
    }
    Vec::new()
}

/// Reports whether the tokens form a call: a callee prefix followed by a
/// trailing `(...)` group.
pub fn is_func_call(toks: &[Token]) -> bool {
    match toks.first() {
        Some(tok) => match tok.id {
            TokenId::Brace
            | TokenId::Ident
            | TokenId::Dt
            | TokenId::Cpp
            | TokenId::SelfKw => {}
            _ => return false,
        },
        None => return false,
    }
    let Some(last) = toks.last() else {
        return false;
    };
    if !(last.id == TokenId::Brace && last.text == kind::RPAREN) {
        return false;
    }
    let mut brace_n = 0i32;
    for i in (0..toks.len()).rev() {
        let tok = &toks[i];
        if tok.id == TokenId::Brace {
            if tok.text == kind::RPAREN {
                brace_n += 1;
            } else if tok.text == kind::LPAREN {
                brace_n -= 1;
                if brace_n == 0 {
                    return i > 0;
                }
            }
        }
    }
    false
}

const ASSIGN_OPS: &[&str] = &[
    "=", "+=", "-=", "*=", "/=", "%=", "<<=", ">>=", "&=", "|=", "^=", "++", "--",
];

/// Reports whether `text` is an assignment or compound-assignment operator.
pub fn is_assign_operator(text: &str) -> bool {
    ASSIGN_OPS.contains(&text)
}

/// Reports whether `text` is a postfix operator (`++`, `--`).
pub fn is_postfix_operator(text: &str) -> bool {
    text == kind::DBL_PLUS || text == kind::DBL_MINUS
}

fn can_start_assign(id: TokenId) -> bool {
    matches!(
        id,
        TokenId::Ident
            | TokenId::Cpp
            | TokenId::Let
            | TokenId::Dot
            | TokenId::SelfKw
            | TokenId::Brace
            | TokenId::Op
    )
}

/// Predicate for the assignment statement form: a plausible target start and
/// an assignment operator at brace depth zero.
pub fn check_assign_tokens(toks: &[Token]) -> bool {
    if toks.is_empty() || !can_start_assign(toks[0].id) {
        return false;
    }
    let mut brace_n = 0i32;
    for tok in toks {
        if tok.id == TokenId::Brace {
            match tok.text.as_str() {
                kind::LBRACE | kind::LBRACKET | kind::LPAREN => brace_n += 1,
                _ => brace_n -= 1,
            }
        }
        if brace_n < 0 {
            return false;
        } else if brace_n > 0 {
            continue;
        }
        if tok.id == TokenId::Op && is_assign_operator(&tok.text) {
            return true;
        }
    }
    false
}
