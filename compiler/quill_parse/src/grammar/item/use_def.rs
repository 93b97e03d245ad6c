//! Use declaration parsing.
//!
//! Forms:
//! - `use std::a::b` — absolute import under the standard library root
//! - `use std::a::{x, y, self}` — selector import
//! - `use std::a::*` — glob import
//! - `use cpp "header.h"` / `` use cpp `header.h` `` — foreign header

use crate::split::{parts, range_last};
use crate::Builder;
use quill_ast::{Node, Object, UseDecl};
use quill_diagnostic::DiagCode;
use quill_lex::{kind, Token, TokenId};

impl Builder {
    pub(crate) fn use_decl(&mut self, toks: &[Token]) {
        let mut decl = UseDecl {
            token: toks[0].clone(),
            ..UseDecl::default()
        };
        if toks.len() < 2 {
            self.push_err(&decl.token, DiagCode::MissingUsePath);
            return;
        }
        self.build_use_decl(&mut decl, &toks[1..]);
        self.tree.push(Object {
            token: decl.token.clone(),
            node: Node::Use(decl),
        });
    }

    fn build_use_decl(&mut self, decl: &mut UseDecl, toks: &[Token]) {
        let tok = &toks[0];
        if tok.id == TokenId::Cpp {
            self.build_use_cpp_decl(decl, toks);
            return;
        }
        if tok.id != TokenId::Ident || tok.text != "std" {
            self.push_err(&toks[0], DiagCode::InvalidSyntax);
        }
        if toks.len() < 3 {
            self.push_err(&toks[0], DiagCode::InvalidSyntax);
            return;
        }
        // Past `std ::`.
        let mut toks: Vec<Token> = toks[2..].to_vec();
        let mut tok = toks[toks.len() - 1].clone();
        match tok.id {
            TokenId::DblColon => {
                self.push_err(&tok, DiagCode::InvalidSyntax);
                return;
            }
            TokenId::Brace => {
                if tok.text != kind::RBRACE {
                    self.push_err(&tok, DiagCode::InvalidSyntax);
                    return;
                }
                let (rest, group) = range_last(&toks);
                decl.selectors = self.get_selectors(group);
                toks = rest;
                if toks.is_empty() {
                    self.push_err(&tok, DiagCode::InvalidSyntax);
                    return;
                }
                tok = toks[toks.len() - 1].clone();
                if tok.id != TokenId::DblColon {
                    self.push_err(&tok, DiagCode::InvalidSyntax);
                    return;
                }
                toks.pop();
                if toks.is_empty() {
                    self.push_err(&tok, DiagCode::InvalidSyntax);
                    return;
                }
            }
            TokenId::Op => {
                if tok.text != kind::STAR {
                    self.push_err(&tok, DiagCode::InvalidSyntax);
                    return;
                }
                toks.pop();
                if toks.is_empty() {
                    self.push_err(&tok, DiagCode::InvalidSyntax);
                    return;
                }
                tok = toks[toks.len() - 1].clone();
                if tok.id != TokenId::DblColon {
                    self.push_err(&tok, DiagCode::InvalidSyntax);
                    return;
                }
                toks.pop();
                if toks.is_empty() {
                    self.push_err(&tok, DiagCode::InvalidSyntax);
                    return;
                }
                decl.full_use = true;
            }
            _ => {}
        }
        // Resolve segments under the standard library root.
        let sep = std::path::MAIN_SEPARATOR;
        let mut path = self.stdlib.clone();
        path.push(sep);
        let mut link = String::new();
        for (i, tok) in toks.iter().enumerate() {
            if i % 2 != 0 {
                if tok.id != TokenId::DblColon {
                    self.push_err(tok, DiagCode::InvalidSyntax);
                }
                path.push(sep);
            } else {
                if tok.id != TokenId::Ident {
                    self.push_err(tok, DiagCode::InvalidSyntax);
                }
                path.push_str(&tok.text);
            }
            link.push_str(&tok.text);
        }
        decl.link_string = format!("std::{link}");
        decl.path = path;
    }

    fn build_use_cpp_decl(&mut self, decl: &mut UseDecl, toks: &[Token]) {
        if toks.len() > 2 {
            self.push_err(&toks[2], DiagCode::InvalidSyntax);
        }
        let tok = &toks[1];
        let quoted = tok.text.len() >= 2
            && (tok.text.starts_with('"') || tok.text.starts_with('`'));
        if tok.id != TokenId::Literal || !quoted {
            self.push_err(tok, DiagCode::InvalidExpr);
            return;
        }
        decl.cpp = true;
        decl.path = tok.text[1..tok.text.len() - 1].to_string();
    }

    /// Parse the `{...}` selector group into its name tokens.
    fn get_selectors(&mut self, group: Vec<Token>) -> Vec<Token> {
        let mut toks = group;
        let mut i = 0usize;
        let Some(inner) = self.get_range(&mut i, kind::LBRACE, kind::RBRACE, &mut toks) else {
            return Vec::new();
        };
        let (parts_v, errs) = parts(&inner, TokenId::Comma, true);
        if !errs.is_empty() {
            self.errors.extend(errs);
            return Vec::new();
        }
        let mut selectors = Vec::with_capacity(parts_v.len());
        for part in parts_v {
            if part.len() > 1 {
                self.push_err(&part[1], DiagCode::InvalidSyntax);
            }
            let tok = &part[0];
            if tok.id != TokenId::Ident && tok.id != TokenId::SelfKw {
                self.push_err(tok, DiagCode::InvalidSyntax);
                continue;
            }
            selectors.push(tok.clone());
        }
        selectors
    }
}
