//! Trait parsing. Every function is prototype-only, implicitly public, and
//! gets its receiver bound to the trait identifier.

use crate::cursor::skip_statement;
use crate::Builder;
use quill_ast::{Fn, Node, Object, Trait};
use quill_diagnostic::DiagCode;
use quill_lex::{kind, Token, TokenId};

impl Builder {
    pub(crate) fn trait_decl(&mut self, toks: &[Token]) {
        let mut tr = Trait {
            is_public: self.take_pub(),
            ..Trait::default()
        };
        if toks.len() < 3 {
            self.push_err(&toks[0], DiagCode::InvalidSyntax);
            return;
        }
        tr.token = toks[1].clone();
        if tr.token.id != TokenId::Ident {
            self.push_err(&tr.token, DiagCode::InvalidSyntax);
        }
        tr.id = tr.token.text.clone();
        let mut i = 2usize;
        let mut toks_vec = toks.to_vec();
        let Some(body) = self.get_range(&mut i, kind::LBRACE, kind::RBRACE, &mut toks_vec)
        else {
            self.push_err(&tr.token, DiagCode::BodyNotExist);
            return;
        };
        if i < toks_vec.len() {
            self.push_err(&toks_vec[i], DiagCode::InvalidSyntax);
        }
        tr.funcs = self.trait_funcs(&body, &tr.id.clone());
        self.tree.push(Object {
            token: tr.token.clone(),
            node: Node::Trait(tr),
        });
    }

    fn trait_funcs(&mut self, toks: &[Token], trait_id: &str) -> Vec<Fn> {
        let mut funcs = Vec::new();
        let mut i = 0usize;
        while i < toks.len() {
            let fn_toks = skip_statement(&mut i, toks);
            if fn_toks.is_empty() {
                break;
            }
            if fn_toks[0].id == TokenId::Comment {
                continue;
            }
            let mut f = self.func(fn_toks, true, false, true);
            self.setup_receiver(&mut f, trait_id);
            f.is_public = true;
            funcs.push(f);
        }
        funcs
    }
}
