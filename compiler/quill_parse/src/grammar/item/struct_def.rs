//! Struct parsing. Fields reuse the general variable parser in its bare
//! `id: type` form; initializers are not accepted.

use crate::cursor::skip_statement;
use crate::Builder;
use quill_ast::{Node, Object, Struct, Var};
use quill_diagnostic::DiagCode;
use quill_lex::{kind, Token, TokenId};

impl Builder {
    pub(crate) fn struct_decl(&mut self, toks: &[Token]) {
        let s = self.parse_struct(toks, false);
        self.tree.push(Object {
            token: s.token.clone(),
            node: Node::Struct(s),
        });
    }

    pub(crate) fn parse_struct(&mut self, toks: &[Token], cpp_linked: bool) -> Struct {
        let mut s = Struct {
            is_public: self.take_pub(),
            cpp_linked,
            ..Struct::default()
        };
        if toks.len() < 3 {
            self.push_err(&toks[0], DiagCode::InvalidSyntax);
            return s;
        }
        s.token = toks[1].clone();
        if s.token.id != TokenId::Ident {
            self.push_err(&s.token, DiagCode::InvalidSyntax);
        }
        s.id = s.token.text.clone();
        let mut i = 2usize;
        let mut toks_vec = toks.to_vec();
        let Some(body) = self.get_range(&mut i, kind::LBRACE, kind::RBRACE, &mut toks_vec)
        else {
            self.push_err(&s.token, DiagCode::BodyNotExist);
            return s;
        };
        if i < toks_vec.len() {
            self.push_err(&toks_vec[i], DiagCode::InvalidSyntax);
        }
        s.fields = self.struct_fields(&body, cpp_linked);
        s
    }

    fn struct_fields(&mut self, toks: &[Token], cpp_linked: bool) -> Vec<Var> {
        let mut fields = Vec::new();
        let mut i = 0usize;
        while i < toks.len() {
            let var_toks = skip_statement(&mut i, toks);
            if var_toks.is_empty() {
                break;
            }
            if var_toks[0].id == TokenId::Comment {
                continue;
            }
            let mut rest: &[Token] = &var_toks;
            let is_pub = rest[0].id == TokenId::Pub;
            if is_pub {
                if rest.len() == 1 {
                    self.push_err(&rest[0], DiagCode::InvalidSyntax);
                    continue;
                }
                rest = &rest[1..];
            }
            let is_mut = rest[0].id == TokenId::Mut;
            if is_mut {
                if rest.len() == 1 {
                    self.push_err(&rest[0], DiagCode::InvalidSyntax);
                    continue;
                }
                rest = &rest[1..];
            }
            let mut v = self.var(rest, false, false);
            v.is_public = is_pub;
            v.is_mut = is_mut;
            v.is_field = true;
            v.cpp_linked = cpp_linked;
            fields.push(v);
        }
        fields
    }
}
