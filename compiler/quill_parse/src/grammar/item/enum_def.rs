//! Enum parsing. The base type defaults to `u32`.

use crate::Builder;
use quill_ast::{Enum, EnumItem, Expr, Node, Object, Type, TypeId};
use quill_diagnostic::DiagCode;
use quill_lex::{kind, Token, TokenId};

impl Builder {
    pub(crate) fn enum_decl(&mut self, toks: &[Token]) {
        let mut e = Enum::default();
        if toks.len() < 3 {
            self.push_err(&toks[0], DiagCode::InvalidSyntax);
            return;
        }
        e.token = toks[1].clone();
        if e.token.id != TokenId::Ident {
            self.push_err(&e.token, DiagCode::InvalidSyntax);
        }
        e.id = e.token.text.clone();
        let mut i = 2usize;
        if toks[i].id == TokenId::Colon {
            i += 1;
            if i >= toks.len() {
                self.push_err(&toks[i - 1], DiagCode::InvalidSyntax);
                return;
            }
            let (ty, _) = self.data_type(toks, &mut i, false, true);
            e.ty = ty;
            i += 1;
            if i >= toks.len() {
                self.push_err(&e.token, DiagCode::BodyNotExist);
                return;
            }
        } else {
            e.ty = Type {
                id: TypeId::U32,
                kind: "u32".to_string(),
                ..Type::default()
            };
        }
        let mut toks_vec = toks.to_vec();
        let Some(item_toks) = self.get_range(&mut i, kind::LBRACE, kind::RBRACE, &mut toks_vec)
        else {
            self.push_err(&e.token, DiagCode::BodyNotExist);
            return;
        };
        if i < toks_vec.len() {
            self.push_err(&toks_vec[i], DiagCode::InvalidSyntax);
        }
        e.is_public = self.take_pub();
        e.items = self.build_enum_items(&item_toks);
        self.tree.push(Object {
            token: e.token.clone(),
            node: Node::Enum(e),
        });
    }

    fn build_enum_items(&mut self, toks: &[Token]) -> Vec<EnumItem> {
        let mut items = Vec::new();
        let mut i = 0usize;
        while i < toks.len() {
            let t = toks[i].clone();
            if t.id == TokenId::Comment {
                i += 1;
                continue;
            }
            let mut item = EnumItem {
                token: t.clone(),
                ..EnumItem::default()
            };
            if item.token.id != TokenId::Ident {
                self.push_err(&item.token, DiagCode::InvalidSyntax);
            }
            item.id = item.token.text.clone();
            if i + 1 >= toks.len() || toks[i + 1].id == TokenId::Comma {
                if i + 1 < toks.len() {
                    i += 1; // land on the comma
                }
                items.push(item);
                i += 1;
                continue;
            }
            i += 1;
            let t = &toks[i];
            if !(t.id == TokenId::Op && t.text == kind::EQ) {
                self.push_err(&toks[0], DiagCode::InvalidSyntax);
            }
            i += 1;
            if i >= toks.len() || toks[i].id == TokenId::Comma {
                self.push_err(&toks[0], DiagCode::MissingExpr);
                i += 1;
                continue;
            }
            item.expr = Some(self.build_enum_item_expr(&mut i, toks));
            items.push(item);
            i += 1;
        }
        items
    }

    /// Item value: up to the next top-level comma or the end of the body.
    fn build_enum_item_expr(&mut self, i: &mut usize, toks: &[Token]) -> Expr {
        let mut brace_n = 0i32;
        let expr_start = *i;
        while *i < toks.len() {
            let t = &toks[*i];
            if t.id == TokenId::Brace {
                match t.text.as_str() {
                    kind::LBRACE | kind::LBRACKET | kind::LPAREN => {
                        brace_n += 1;
                        *i += 1;
                        continue;
                    }
                    _ => brace_n -= 1,
                }
            }
            if brace_n > 0 {
                *i += 1;
                continue;
            }
            if t.id == TokenId::Comma || *i + 1 >= toks.len() {
                let expr_toks = if t.id == TokenId::Comma {
                    toks[expr_start..*i].to_vec()
                } else {
                    toks[expr_start..].to_vec()
                };
                return self.expr(&expr_toks);
            }
            *i += 1;
        }
        Expr::default()
    }
}
