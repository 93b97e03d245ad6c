//! Type reference building.
//!
//! The grammar is recursive: prefix `*`/`&`/`&&`, slices `[]T`, arrays
//! `[N]T` and `[...]T`, maps `[K: V]`, named identifiers with optional
//! namespace and generic arguments, `cpp.Ident` foreign types, `fn`
//! prototypes, and `unsafe` as a bare type or `fn` modifier.
//!
//! Index convention: on success `*i` rests on the last consumed token and
//! the caller advances. Every produced type records its canonical printed
//! `kind` and keeps an `original` snapshot for later substitution.

use crate::{split, Builder};
use quill_ast::{Type, TypeId, TypeTag, PREFIX_ARRAY, PREFIX_SLICE};
use quill_diagnostic::DiagCode;
use quill_lex::{kind, Token, TokenId};

impl Builder {
    /// Parse a type reference starting at `toks[*i]`.
    pub(crate) fn data_type(
        &mut self,
        toks: &[Token],
        i: &mut usize,
        arrays: bool,
        report: bool,
    ) -> (Type, bool) {
        let entry_tok = toks.get(*i).cloned();
        let mut t = Type::default();
        let ok = self.datatype(&mut t, toks, i, arrays, report);
        if report && t.token.id == TokenId::Na {
            if let Some(tok) = entry_tok {
                self.push_err(&tok, DiagCode::InvalidType);
            }
        }
        (t, ok)
    }

    fn datatype(
        &mut self,
        t: &mut Type,
        toks: &[Token],
        i: &mut usize,
        arrays: bool,
        report: bool,
    ) -> bool {
        let ok = self.datatype_inner(t, toks, i, arrays, report);
        t.snapshot_original();
        ok
    }

    fn datatype_inner(
        &mut self,
        t: &mut Type,
        toks: &[Token],
        i: &mut usize,
        arrays: bool,
        report: bool,
    ) -> bool {
        let first = *i;
        let mut dtv = String::new();
        let mut ok = false;
        let mut exhausted = true;
        'scan: while *i < toks.len() {
            let tok = toks[*i].clone();
            match tok.id {
                TokenId::Dt => {
                    t.token = tok.clone();
                    t.id = TypeId::from_keyword(&tok.text);
                    dtv.push_str(&tok.text);
                    ok = true;
                    exhausted = false;
                    break 'scan;
                }
                TokenId::Ident => {
                    dtv.push_str(&tok.text);
                    if *i + 1 < toks.len() && toks[*i + 1].id == TokenId::DblColon {
                        // Namespace segment; the `::` arm appends the separator.
                    } else {
                        t.id = TypeId::Id;
                        t.token = tok;
                        self.id_data_type_part_end(t, &mut dtv, toks, i);
                        ok = true;
                        exhausted = false;
                        break 'scan;
                    }
                }
                TokenId::Cpp => {
                    if *i + 1 >= toks.len() {
                        if report {
                            self.push_err(&tok, DiagCode::InvalidSyntax);
                        }
                        return false;
                    }
                    *i += 1;
                    if toks[*i].id != TokenId::Dot {
                        if report {
                            self.push_err(&toks[*i], DiagCode::InvalidSyntax);
                        }
                    }
                    if *i + 1 >= toks.len() {
                        if report {
                            self.push_err(&tok, DiagCode::InvalidSyntax);
                        }
                        return false;
                    }
                    *i += 1;
                    if toks[*i].id != TokenId::Ident {
                        if report {
                            self.push_err(&toks[*i], DiagCode::InvalidSyntax);
                        }
                    }
                    t.cpp_linked = true;
                    t.id = TypeId::Id;
                    t.token = toks[*i].clone();
                    dtv.push_str(&t.token.text);
                    self.id_data_type_part_end(t, &mut dtv, toks, i);
                    ok = true;
                    exhausted = false;
                    break 'scan;
                }
                TokenId::DblColon => dtv.push_str(&tok.text),
                TokenId::Unsafe
                    if *i + 1 >= toks.len() || toks[*i + 1].id != TokenId::Fn =>
                {
                    t.id = TypeId::Unsafe;
                    t.token = tok.clone();
                    dtv.push_str(&tok.text);
                    ok = true;
                    exhausted = false;
                    break 'scan;
                }
                TokenId::Unsafe | TokenId::Fn => {
                    t.token = tok.clone();
                    t.id = TypeId::Fn;
                    // The prototype parser receives a by-value view so a
                    // pulled continuation line cannot desync this slice.
                    let mut ftoks = toks.to_vec();
                    let (f, proto_ok) = self.func_prototype(&mut ftoks, i, false, true);
                    if !proto_ok {
                        self.push_err(&tok, DiagCode::InvalidType);
                        return false;
                    }
                    *i -= 1;
                    dtv.push_str(&f.type_kind());
                    t.tag = TypeTag::Fn(Box::new(f));
                    ok = true;
                    exhausted = false;
                    break 'scan;
                }
                TokenId::Op => match tok.text.as_str() {
                    kind::STAR | kind::AMPER | kind::DBL_AMPER => dtv.push_str(&tok.text),
                    _ => {
                        if report {
                            self.push_err(&tok, DiagCode::InvalidSyntax);
                        }
                        return false;
                    }
                },
                TokenId::Brace if tok.text == kind::LBRACKET => {
                    *i += 1;
                    if *i >= toks.len() {
                        if report {
                            self.push_err(&tok, DiagCode::InvalidSyntax);
                        }
                        return false;
                    }
                    let next = toks[*i].clone();
                    if next.id == TokenId::Brace && next.text == kind::RBRACKET {
                        // Slice type.
                        dtv.push_str(PREFIX_SLICE);
                        t.id = TypeId::Slice;
                        t.token = next;
                        *i += 1;
                        let mut component = Type::default();
                        ok = self.datatype(&mut component, toks, i, false, report);
                        dtv.push_str(&component.kind);
                        t.component = Some(Box::new(component));
                        exhausted = false;
                        break 'scan;
                    }
                    *i -= 1; // restart from the bracket
                    let sub_ok = if arrays {
                        self.map_or_array_data_type(t, toks, i, report)
                    } else {
                        self.map_data_type(t, toks, i, report)
                    };
                    if t.id == TypeId::Void {
                        if report {
                            self.push_err(&tok, DiagCode::InvalidSyntax);
                        }
                        return false;
                    }
                    t.token = tok;
                    t.kind = format!("{dtv}{}", t.kind);
                    return sub_ok;
                }
                TokenId::Brace => return false,
                _ => {
                    if report {
                        self.push_err(&tok, DiagCode::InvalidSyntax);
                    }
                    return false;
                }
            }
            *i += 1;
        }
        if exhausted {
            if report {
                if let Some(tok) = toks.get(first) {
                    self.push_err(tok, DiagCode::InvalidType);
                }
            }
        }
        t.kind = dtv;
        ok
    }

    /// Optional `[T1, T2, ...]` generic arguments after a named type.
    fn id_data_type_part_end(
        &mut self,
        t: &mut Type,
        dtv: &mut String,
        toks: &[Token],
        i: &mut usize,
    ) {
        if *i + 1 >= toks.len() {
            return;
        }
        *i += 1;
        let tok = &toks[*i];
        if !(tok.id == TokenId::Brace && tok.text == kind::LBRACKET) {
            *i -= 1;
            return;
        }
        dtv.push('[');
        let parts = self.id_generics_parts(toks, i);
        let mut generics = Vec::with_capacity(parts.len());
        let mut kinds = Vec::with_capacity(parts.len());
        for part in &parts {
            let mut index = 0usize;
            let (g, _) = self.data_type(part, &mut index, false, true);
            if index + 1 < part.len() {
                self.push_err(&part[index + 1], DiagCode::InvalidSyntax);
            }
            kinds.push(g.kind.clone());
            generics.push(g);
        }
        dtv.push_str(&kinds.join(","));
        dtv.push(']');
        t.tag = TypeTag::Generics(generics);
    }

    /// Split a `[...]` generics group at `toks[*i]` into comma parts.
    ///
    /// A list that does not begin with `[` terminates immediately and yields
    /// an empty split.
    fn id_generics_parts(&mut self, toks: &[Token], i: &mut usize) -> Vec<Vec<Token>> {
        let first = *i;
        let mut brace_n = 0i32;
        while *i < toks.len() {
            let tok = &toks[*i];
            if tok.id == TokenId::Brace {
                match tok.text.as_str() {
                    kind::LBRACKET => brace_n += 1,
                    kind::RBRACKET => brace_n -= 1,
                    _ => {}
                }
            }
            if brace_n == 0 {
                break;
            }
            *i += 1;
        }
        if first + 1 > *i {
            return Vec::new();
        }
        let (parts_v, errs) = split::parts(&toks[first + 1..*i], TokenId::Comma, true);
        self.errors.extend(errs);
        parts_v
    }

    fn map_or_array_data_type(
        &mut self,
        t: &mut Type,
        toks: &[Token],
        i: &mut usize,
        report: bool,
    ) -> bool {
        if self.map_data_type(t, toks, i, report) {
            return true;
        }
        self.array_data_type(t, toks, i, report)
    }

    fn map_data_type(
        &mut self,
        t: &mut Type,
        toks: &[Token],
        i: &mut usize,
        report: bool,
    ) -> bool {
        let Some((type_toks, Some(colon))) = split::split_colon(toks, i) else {
            return false;
        };
        t.id = TypeId::Map;
        let colon_tok = type_toks[colon].clone();
        if colon == 0 || colon + 1 >= type_toks.len() {
            if report {
                self.push_err(&colon_tok, DiagCode::MissingExpr);
            }
            return false;
        }
        let key_toks = &type_toks[..colon];
        let value_toks = &type_toks[colon + 1..];
        let mut j = 0usize;
        let (key, _) = self.data_type(key_toks, &mut j, true, report);
        j = 0;
        let (value, _) = self.data_type(value_toks, &mut j, true, report);
        t.tag = TypeTag::Map(Box::new(key), Box::new(value));
        t.kind = t.map_kind();
        true
    }

    /// `[N]T` and `[...]T`. Entered with `*i` on the closing `]` of the size
    /// group (left there by the failed map attempt).
    fn array_data_type(
        &mut self,
        t: &mut Type,
        toks: &[Token],
        i: &mut usize,
        report: bool,
    ) -> bool {
        if *i + 1 >= toks.len() {
            return false;
        }
        t.id = TypeId::Array;
        *i += 1;
        let expr_i = *i;
        let mut component = Type::default();
        let mut ok = self.datatype(&mut component, toks, i, true, report);
        if !ok {
            t.component = Some(Box::new(component));
            return false;
        }
        if component.size.auto_sized {
            if let Some(first_tok) = component.size.expr.tokens.first() {
                let tok = first_tok.clone();
                self.push_err(&tok, DiagCode::InvalidSyntax);
            }
            ok = false;
        }
        let (_, expr_group) = split::range_last(&toks[..expr_i]);
        if expr_group.len() >= 2 {
            let expr_toks = &expr_group[1..expr_group.len() - 1];
            if expr_toks.len() == 1
                && expr_toks[0].id == TokenId::Op
                && expr_toks[0].text == kind::TRIPLE_DOT
            {
                t.size.auto_sized = true;
                t.size.expr.tokens = expr_toks.to_vec();
            } else {
                t.size.expr = self.expr(expr_toks);
            }
        }
        t.kind = format!("{}{}", PREFIX_ARRAY, component.kind);
        t.component = Some(Box::new(component));
        ok
    }
}

#[cfg(test)]
mod tests;
