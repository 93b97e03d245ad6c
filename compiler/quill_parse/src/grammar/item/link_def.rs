//! Foreign-link (`cpp`) declarations.
//!
//! The inner declaration parses in its ordinary form (prototype mode for
//! functions). Foreign declarations cannot be public: the sidechannel is
//! saved, forced off around the inner parse, and restored so a `pub cpp ...`
//! still reports `def_not_support_pub` at the dispatch level.

use crate::Builder;
use quill_ast::{LinkAlias, LinkFn, LinkStruct, LinkVar, Node, Object};
use quill_diagnostic::DiagCode;
use quill_lex::{Token, TokenId};

impl Builder {
    pub(crate) fn cpp_link(&mut self, toks: Vec<Token>) {
        if toks.len() == 1 {
            self.push_err(&toks[0], DiagCode::InvalidSyntax);
            return;
        }
        match toks[1].id {
            TokenId::Fn | TokenId::Unsafe => self.link_fn(toks),
            TokenId::Let => self.link_var(toks),
            TokenId::Struct => self.link_struct(toks),
            TokenId::Type => self.link_type_alias(toks),
            _ => self.push_err(&toks[1], DiagCode::InvalidSyntax),
        }
    }

    fn link_fn(&mut self, toks: Vec<Token>) {
        let tok = toks[0].clone();
        let saved_pub = std::mem::take(&mut self.pub_flag);
        let link = self.func(toks[1..].to_vec(), false, false, true);
        self.tree.push(Object {
            token: tok.clone(),
            node: Node::LinkFn(LinkFn { token: tok, link }),
        });
        self.pub_flag = saved_pub;
    }

    fn link_var(&mut self, toks: Vec<Token>) {
        let tok = toks[0].clone();
        let saved_pub = std::mem::take(&mut self.pub_flag);
        let mut link = self.var(&toks[1..], true, false);
        link.cpp_linked = true;
        self.tree.push(Object {
            token: tok.clone(),
            node: Node::LinkVar(LinkVar { token: tok, link }),
        });
        self.pub_flag = saved_pub;
    }

    fn link_struct(&mut self, toks: Vec<Token>) {
        let tok = toks[0].clone();
        let saved_pub = std::mem::take(&mut self.pub_flag);
        let link = self.parse_struct(&toks[1..], true);
        self.tree.push(Object {
            token: tok.clone(),
            node: Node::LinkStruct(LinkStruct { token: tok, link }),
        });
        self.pub_flag = saved_pub;
    }

    fn link_type_alias(&mut self, toks: Vec<Token>) {
        let tok = toks[0].clone();
        let saved_pub = std::mem::take(&mut self.pub_flag);
        let link = self.type_alias(&toks[1..]);
        self.tree.push(Object {
            token: tok.clone(),
            node: Node::LinkAlias(LinkAlias { token: tok, link }),
        });
        self.pub_flag = saved_pub;
    }
}
