//! `type` declarations: aliases and free generics parameter lists.

use crate::split::{parts, range};
use crate::Builder;
use quill_ast::{GenericType, Node, Object, TypeAlias};
use quill_diagnostic::DiagCode;
use quill_lex::{kind, Token, TokenId};

impl Builder {
    /// `type[T, U]` is a generics parameter list; `type T: U` an alias.
    pub(crate) fn type_or_generics(&mut self, toks: &[Token]) -> Object {
        if toks.len() > 1 {
            let tok = &toks[1];
            if tok.id == TokenId::Brace && tok.text == kind::LBRACKET {
                let generics = self.generics(toks);
                return Object {
                    token: toks[1].clone(),
                    node: Node::Generics(generics),
                };
            }
        }
        // Consume the sidechannel before the alias target parses; a function
        // type in the target would otherwise swallow the flag.
        let is_public = self.take_pub();
        let mut t = self.type_alias(toks);
        t.is_public = is_public;
        Object {
            token: t.token.clone(),
            node: Node::TypeAlias(t),
        }
    }

    /// `type T: Target`.
    pub(crate) fn type_alias(&mut self, toks: &[Token]) -> TypeAlias {
        let mut t = TypeAlias::default();
        let mut i = 1usize; // skip the keyword
        if i >= toks.len() {
            self.push_err(&toks[i - 1], DiagCode::InvalidSyntax);
            return t;
        }
        t.token = toks[1].clone();
        t.id = t.token.text.clone();
        if toks[i].id != TokenId::Ident {
            self.push_err(&toks[i], DiagCode::InvalidSyntax);
        }
        i += 1;
        if i >= toks.len() {
            self.push_err(&toks[i - 1], DiagCode::InvalidSyntax);
            return t;
        }
        if toks[i].id != TokenId::Colon {
            self.push_err(&toks[i - 1], DiagCode::InvalidSyntax);
            return t;
        }
        i += 1;
        if i >= toks.len() {
            self.push_err(&toks[i - 1], DiagCode::MissingType);
            return t;
        }
        let (ty, ok) = self.data_type(toks, &mut i, true, true);
        t.ty = ty;
        if ok && i + 1 < toks.len() {
            self.push_err(&toks[i + 1], DiagCode::InvalidSyntax);
        }
        t
    }

    /// `type[T, U]` generics parameter list.
    pub(crate) fn generics(&mut self, toks: &[Token]) -> Vec<GenericType> {
        let tok = toks[0].clone();
        let mut i = 1usize;
        let generics_toks = range(&mut i, kind::LBRACKET, kind::RBRACKET, toks);
        let Some(generics_toks) = generics_toks.filter(|g| !g.is_empty()) else {
            self.push_err(&tok, DiagCode::MissingExpr);
            return Vec::new();
        };
        if i < toks.len() {
            self.push_err(&toks[i], DiagCode::InvalidSyntax);
        }
        let (parts_v, errs) = parts(&generics_toks, TokenId::Comma, true);
        self.errors.extend(errs);
        let mut generics = Vec::with_capacity(parts_v.len());
        for part in &parts_v {
            generics.push(self.generic(part));
        }
        generics
    }

    fn generic(&mut self, toks: &[Token]) -> GenericType {
        if toks.len() > 1 {
            self.push_err(&toks[1], DiagCode::InvalidSyntax);
        }
        let mut gt = GenericType {
            token: toks[0].clone(),
            ..GenericType::default()
        };
        if gt.token.id != TokenId::Ident {
            self.push_err(&gt.token, DiagCode::InvalidSyntax);
        }
        gt.id = gt.token.text.clone();
        gt
    }
}
