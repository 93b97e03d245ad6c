//! Impl parsing.
//!
//! `impl Name { ... }` is an inherent impl: `base` is the implementor and
//! `target` stays void. `impl Trait for Name { ... }` implements a trait:
//! `target` is the trait type, `base` the implementor. Receivers always bind
//! to `base`; trait-impl methods are forced public.
//!
//! Bodies re-enter the statement loop through a private cursor that is
//! restored on every exit path.

use crate::Builder;
use quill_ast::{Fn, Impl, Node, Object, Type};
use quill_diagnostic::DiagCode;
use quill_lex::{kind, Token, TokenId};

impl Builder {
    pub(crate) fn impl_decl(&mut self, toks: Vec<Token>) {
        if toks.len() < 2 {
            self.push_err(&toks[0], DiagCode::InvalidSyntax);
            return;
        }
        if toks[1].id != TokenId::Ident {
            self.push_err(&toks[1], DiagCode::InvalidSyntax);
            return;
        }
        if toks.len() < 3 {
            self.push_err(&toks[1], DiagCode::InvalidSyntax);
            return;
        }
        let mut imp = Impl {
            base: toks[1].clone(),
            target: Type::void(),
            tree: Vec::new(),
        };
        let tok2 = toks[2].clone();
        let mut rest: Vec<Token>;
        if tok2.id == TokenId::Iter {
            // Trait implementation; the infix keyword shares the iter id.
            if toks.len() < 4 {
                self.push_err(&tok2, DiagCode::InvalidSyntax);
                return;
            }
            if toks[3].id != TokenId::Ident {
                self.push_err(&toks[3], DiagCode::InvalidSyntax);
                return;
            }
            let mut i = 0usize;
            let (trait_ty, _) = self.data_type(&toks[1..2], &mut i, false, true);
            imp.target = trait_ty;
            imp.base = toks[3].clone();
            rest = toks[4..].to_vec();
        } else if tok2.id == TokenId::Brace && tok2.text == kind::LBRACE {
            rest = toks[2..].to_vec();
        } else {
            self.push_err(&tok2, DiagCode::InvalidSyntax);
            return;
        }
        let mut i = 0usize;
        let Some(body) = self.get_range(&mut i, kind::LBRACE, kind::RBRACE, &mut rest) else {
            self.push_err(&imp.base, DiagCode::BodyNotExist);
            return;
        };
        if i < rest.len() {
            self.push_err(&rest[i], DiagCode::InvalidSyntax);
        }
        self.impl_funcs(&mut imp, body);
        self.tree.push(Object {
            token: imp.base.clone(),
            node: Node::Impl(imp),
        });
    }

    fn impl_funcs(&mut self, imp: &mut Impl, toks: Vec<Token>) {
        if imp.is_inherent() {
            self.impl_struct(imp, toks);
        } else {
            self.impl_trait_funcs(imp, toks);
        }
    }

    /// Trait-impl body: methods (all public) and comments.
    fn impl_trait_funcs(&mut self, imp: &mut Impl, toks: Vec<Token>) {
        let base_id = imp.base.text.clone();
        let mut entries: Vec<Object> = Vec::new();
        self.with_cursor(toks, |b| {
            while !b.cursor.ended() {
                let fn_toks = b.cursor.next_statement();
                if fn_toks.is_empty() {
                    break;
                }
                let tok = fn_toks[0].clone();
                match tok.id {
                    TokenId::Comment => {
                        let obj = b.comment_object(&tok);
                        entries.push(obj);
                    }
                    TokenId::Fn | TokenId::Unsafe => {
                        if let Some(mut f) = b.get_method(fn_toks) {
                            f.is_public = true;
                            b.setup_receiver(&mut f, &base_id);
                            entries.push(Object {
                                token: f.token.clone(),
                                node: Node::Fn(Box::new(f)),
                            });
                        }
                    }
                    _ => b.push_err(&tok, DiagCode::InvalidSyntax),
                }
            }
        });
        imp.tree.extend(entries);
    }

    /// Inherent-impl body: methods (individually `pub`-flaggable), type
    /// items, and comments.
    fn impl_struct(&mut self, imp: &mut Impl, toks: Vec<Token>) {
        let base_id = imp.base.text.clone();
        let mut entries: Vec<Object> = Vec::new();
        self.with_cursor(toks, |b| {
            while !b.cursor.ended() {
                let mut fn_toks = b.cursor.next_statement();
                if fn_toks.is_empty() {
                    break;
                }
                let mut tok = fn_toks[0].clone();
                match tok.id {
                    TokenId::Comment => {
                        let obj = b.comment_object(&tok);
                        entries.push(obj);
                        continue;
                    }
                    TokenId::Type => {
                        let obj = b.type_or_generics(&fn_toks);
                        entries.push(obj);
                        continue;
                    }
                    _ => {}
                }
                let mut is_pub = false;
                if tok.id == TokenId::Pub {
                    is_pub = true;
                    if fn_toks.len() == 1 {
                        b.push_err(&fn_toks[0], DiagCode::InvalidSyntax);
                        continue;
                    }
                    fn_toks.remove(0);
                    tok = fn_toks[0].clone();
                }
                match tok.id {
                    TokenId::Fn | TokenId::Unsafe => {
                        if let Some(mut f) = b.get_method(fn_toks) {
                            f.is_public = is_pub;
                            b.setup_receiver(&mut f, &base_id);
                            entries.push(Object {
                                token: f.token.clone(),
                                node: Node::Fn(Box::new(f)),
                            });
                        }
                    }
                    _ => b.push_err(&tok, DiagCode::InvalidSyntax),
                }
            }
        });
        imp.tree.extend(entries);
    }

    /// Validate and parse one method slice of an impl body.
    fn get_method(&mut self, toks: Vec<Token>) -> Option<Fn> {
        let tok = toks[0].clone();
        let is_unsafe = tok.id == TokenId::Unsafe;
        let method_toks = if is_unsafe {
            if toks.len() < 2 || toks[1].id != TokenId::Fn {
                self.push_err(&tok, DiagCode::InvalidSyntax);
                return None;
            }
            toks[1..].to_vec()
        } else {
            if tok.id != TokenId::Fn {
                self.push_err(&tok, DiagCode::InvalidSyntax);
                return None;
            }
            toks
        };
        let mut f = self.func(method_toks, true, false, false);
        f.is_unsafe = is_unsafe;
        if let Some(block) = &mut f.block {
            block.is_unsafe = is_unsafe;
        }
        Some(f)
    }
}
