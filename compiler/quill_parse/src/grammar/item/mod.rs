//! Top-level declaration builders and their dispatch.

mod enum_def;
mod function;
mod impl_def;
mod link_def;
mod struct_def;
mod trait_def;
mod type_decl;
mod use_def;

use crate::Builder;
use quill_ast::{Comment, Node, Object, Var};
use quill_diagnostic::DiagCode;
use quill_lex::{Token, TokenId};

impl Builder {
    /// Dispatch one top-level statement slice by its leading token.
    ///
    /// A builder that accepts the public modifier consumes the sidechannel
    /// itself; if the flag is still set afterwards the declaration does not
    /// support it.
    pub(crate) fn build_node(&mut self, toks: Vec<Token>) {
        let t = toks[0].clone();
        match t.id {
            TokenId::Use => self.use_decl(&toks),
            TokenId::Fn | TokenId::Unsafe => {
                let f = self.func(toks, false, false, false);
                self.tree.push(Object {
                    token: t.clone(),
                    node: Node::Fn(Box::new(f)),
                });
            }
            TokenId::Const | TokenId::Let | TokenId::Mut => self.global_var(&toks),
            TokenId::Type => {
                let obj = self.type_or_generics(&toks);
                self.tree.push(obj);
            }
            TokenId::Enum => self.enum_decl(&toks),
            TokenId::Struct => self.struct_decl(&toks),
            TokenId::Trait => self.trait_decl(&toks),
            TokenId::Impl => self.impl_decl(toks),
            TokenId::Cpp => self.cpp_link(toks),
            TokenId::Comment => {
                let obj = self.comment_object(&t);
                self.tree.push(obj);
            }
            _ => {
                self.push_err(&t, DiagCode::InvalidSyntax);
                return;
            }
        }
        if self.pub_flag {
            self.push_err(&t, DiagCode::DefNotSupportPub);
            self.pub_flag = false;
        }
    }

    /// A comment carried into the tree, prefix stripped.
    pub(crate) fn comment_object(&mut self, tok: &Token) -> Object {
        let content = tok
            .text
            .strip_prefix("//")
            .unwrap_or(&tok.text)
            .trim()
            .to_string();
        Object {
            token: tok.clone(),
            node: Node::Comment(Comment { content }),
        }
    }

    /// A top-level variable declaration.
    pub(crate) fn global_var(&mut self, toks: &[Token]) {
        if toks.is_empty() {
            return;
        }
        let v: Var = self.var(toks, true, true);
        self.tree.push(Object {
            token: v.token.clone(),
            node: Node::Var(Box::new(v)),
        });
    }
}
