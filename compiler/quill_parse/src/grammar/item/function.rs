//! Function parsing: prototypes, parameters, receivers, return types.
//!
//! Index convention matches the type builder: a parsed return type leaves
//! `*i` on its last token and the caller advances.

use crate::split::{parts, range};
use crate::Builder;
use quill_ast::{
    is_ignore_id, Fn, Param, RetType, Type, TypeId, TypeTag, Var, ANON_ID, IGNORE_ID,
};
use quill_diagnostic::DiagCode;
use quill_lex::{kind, Token, TokenId};

impl Builder {
    /// Parse a function: prototype plus body unless `prototype` is set
    /// (trait methods, foreign links, function-type literals).
    pub(crate) fn func(
        &mut self,
        mut toks: Vec<Token>,
        method: bool,
        anon: bool,
        prototype: bool,
    ) -> Fn {
        let mut i = 0usize;
        let (mut f, ok) = self.func_prototype(&mut toks, &mut i, method, anon);
        if prototype {
            if i + 1 < toks.len() {
                self.push_err(&toks[i + 1], DiagCode::InvalidSyntax);
            }
            return f;
        }
        if !ok {
            return f;
        }
        if i >= toks.len() {
            if self.cursor.ended() {
                self.push_err(&f.token, DiagCode::BodyNotExist);
                return f;
            }
            // The body brace opens on the next line.
            toks = self.cursor.next_statement();
            i = 0;
        }
        match self.get_range(&mut i, kind::LBRACE, kind::RBRACE, &mut toks) {
            Some(block_toks) => {
                let mut block = self.block(block_toks);
                block.is_unsafe = f.is_unsafe;
                f.block = Some(block);
                if i < toks.len() {
                    self.push_err(&toks[i], DiagCode::InvalidSyntax);
                }
            }
            None => {
                self.push_err(&f.token, DiagCode::BodyNotExist);
                self.cursor.requeue(toks);
            }
        }
        f
    }

    /// Parse `unsafe? fn name? (params) ret?`.
    pub(crate) fn func_prototype(
        &mut self,
        toks: &mut Vec<Token>,
        i: &mut usize,
        method: bool,
        anon: bool,
    ) -> (Fn, bool) {
        let mut f = Fn::default();
        let mut ok = true;
        if *i >= toks.len() {
            return (f, false);
        }
        f.token = toks[*i].clone();
        if f.token.id == TokenId::Unsafe {
            f.is_unsafe = true;
            *i += 1;
            if *i >= toks.len() {
                self.push_err(&f.token, DiagCode::InvalidSyntax);
                return (f, false);
            }
            f.token = toks[*i].clone();
        }
        // Skip the fn keyword.
        *i += 1;
        if *i >= toks.len() {
            self.push_err(&f.token, DiagCode::InvalidSyntax);
            return (f, false);
        }
        f.is_public = self.take_pub();
        if anon {
            f.id = ANON_ID.to_string();
        } else {
            let tok = toks[*i].clone();
            if tok.id != TokenId::Ident {
                self.push_err(&tok, DiagCode::InvalidSyntax);
                ok = false;
            }
            f.id = tok.text.clone();
            *i += 1;
        }
        f.ret = RetType::default();
        if *i >= toks.len() {
            self.push_err(&f.token, DiagCode::InvalidSyntax);
            return (f, ok);
        }
        if toks[*i].text != kind::LPAREN {
            self.push_err(&toks[*i], DiagCode::MissingFunctionParentheses);
            return (f, ok);
        }
        if let Some(param_toks) = self.get_range(i, kind::LPAREN, kind::RPAREN, toks) {
            if !param_toks.is_empty() {
                f.params = self.params(&param_toks, method, false);
            }
        }
        let (ret, retok) = self.func_ret_data_type(toks, i);
        if retok {
            f.ret = ret;
            *i += 1;
        }
        (f, ok)
    }

    /// Extract the leading `self` parameter into the receiver slot.
    pub(crate) fn setup_receiver(&mut self, f: &mut Fn, owner_id: &str) {
        if f.params.is_empty() {
            self.push_err(&f.token, DiagCode::MissingReceiver);
            return;
        }
        if f.params[0].id != kind::SELF {
            self.push_err(&f.token, DiagCode::MissingReceiver);
            return;
        }
        let param = f.params.remove(0);
        let mut receiver = Var::default();
        receiver.ty = Type {
            id: TypeId::Struct,
            kind: owner_id.to_string(),
            ..Type::default()
        };
        receiver.is_mut = param.is_mut;
        if param.ty.kind.starts_with('&') {
            receiver.ty.kind = format!("&{owner_id}");
        }
        f.receiver = Some(Box::new(receiver));
    }

    /// Parse a parameter list already stripped of its parentheses.
    pub(crate) fn params(&mut self, toks: &[Token], method: bool, must_pure: bool) -> Vec<Param> {
        let (mut parts_v, errs) = parts(toks, TokenId::Comma, true);
        self.errors.extend(errs);
        if parts_v.is_empty() {
            return Vec::new();
        }
        let mut params = Vec::new();
        if method {
            let param = self.build_self(&parts_v[0]);
            if param.id == kind::SELF {
                params.push(param);
                parts_v.remove(0);
            }
        }
        for part in &parts_v {
            self.push_param(&mut params, part, must_pure);
        }
        self.check_params(&mut params);
        params
    }

    /// Receiver group: `mut? &? self`.
    fn build_self(&mut self, toks: &[Token]) -> Param {
        let mut param = Param::default();
        if toks.is_empty() {
            return param;
        }
        let mut i = 0usize;
        if toks[i].id == TokenId::Mut {
            param.is_mut = true;
            i += 1;
            if i >= toks.len() {
                self.push_err(&toks[i - 1], DiagCode::InvalidSyntax);
                return param;
            }
        }
        if toks[i].text == kind::AMPER {
            param.ty.kind = kind::AMPER.to_string();
            i += 1;
            if i >= toks.len() {
                self.push_err(&toks[i - 1], DiagCode::InvalidSyntax);
                return param;
            }
        }
        if toks[i].id == TokenId::SelfKw {
            param.id = kind::SELF.to_string();
            param.token = toks[i].clone();
            i += 1;
            if i < toks.len() {
                self.push_err(&toks[i], DiagCode::InvalidSyntax);
            }
        }
        param
    }

    fn push_param(&mut self, params: &mut Vec<Param>, toks: &[Token], must_pure: bool) {
        let mut toks = toks;
        let mut param = Param {
            token: toks[0].clone(),
            ..Param::default()
        };
        if param.token.id == TokenId::Mut {
            param.is_mut = true;
            if toks.len() == 1 {
                self.push_err(&toks[0], DiagCode::InvalidSyntax);
                return;
            }
            toks = &toks[1..];
            param.token = toks[0].clone();
        }
        if param.token.id != TokenId::Ident {
            // Anonymous parameter: the part is just a type.
            param.id = ANON_ID.to_string();
            self.param_type(&mut param, toks, must_pure);
        } else {
            self.param_body(&mut param, toks, must_pure);
        }
        params.push(param);
    }

    /// Named parameter: identifier, optional `:` type.
    fn param_body(&mut self, param: &mut Param, toks: &[Token], must_pure: bool) {
        self.param_body_id(param, &toks[0]);
        let tok = toks[0].clone();
        let rest = &toks[1..];
        if rest.is_empty() {
            return;
        }
        if rest.len() < 2 {
            self.push_err(&tok, DiagCode::MissingType);
            return;
        }
        if rest[0].id != TokenId::Colon {
            self.push_err(&rest[0], DiagCode::InvalidSyntax);
            return;
        }
        self.param_type(param, &rest[1..], must_pure);
    }

    fn param_body_id(&mut self, param: &mut Param, tok: &Token) {
        if is_ignore_id(&tok.text) {
            param.id = ANON_ID.to_string();
            return;
        }
        param.id = tok.text.clone();
    }

    fn param_type(&mut self, param: &mut Param, toks: &[Token], must_pure: bool) {
        let mut i = 0usize;
        if !must_pure {
            self.param_type_begin(param, &mut i, toks);
            if i >= toks.len() {
                return;
            }
        }
        let (ty, _) = self.data_type(toks, &mut i, false, true);
        param.ty = ty;
        i += 1;
        if i < toks.len() {
            self.push_err(&toks[i], DiagCode::InvalidSyntax);
        }
    }

    /// Variadic prefix: `...` once, only in parameter type position.
    fn param_type_begin(&mut self, param: &mut Param, i: &mut usize, toks: &[Token]) {
        while *i < toks.len() {
            let tok = &toks[*i];
            if tok.id != TokenId::Op || tok.text != kind::TRIPLE_DOT {
                return;
            }
            if param.variadic {
                let tok = tok.clone();
                self.push_err(&tok, DiagCode::AlreadyVariadic);
            } else {
                param.variadic = true;
            }
            *i += 1;
        }
    }

    /// Bare identifiers in the name slot become anonymous-typed parameters;
    /// nameless untypeable slots are diagnosed.
    fn check_params(&mut self, params: &mut [Param]) {
        for param in params.iter_mut() {
            if param.id == kind::SELF || param.ty.token.id != TokenId::Na {
                continue;
            }
            if param.token.id == TokenId::Na {
                let tok = param.token.clone();
                self.push_err(&tok, DiagCode::MissingType);
            } else {
                param.ty.token = param.token.clone();
                param.ty.id = TypeId::Id;
                param.ty.kind = param.ty.token.text.clone();
                param.ty.snapshot_original();
                param.id = ANON_ID.to_string();
                param.token = Token::na();
            }
        }
    }

    /// Return clause: nothing (void), `: T`, `T`, or a multi-value group.
    pub(crate) fn func_ret_data_type(
        &mut self,
        toks: &[Token],
        i: &mut usize,
    ) -> (RetType, bool) {
        let mut t = RetType::default();
        if *i >= toks.len() {
            return (t, false);
        }
        // Optional `:` before a written return type.
        if toks[*i].id == TokenId::Colon {
            *i += 1;
            if *i >= toks.len() {
                self.push_err(&toks[*i - 1], DiagCode::MissingType);
                return (t, false);
            }
            if toks[*i].id == TokenId::Brace && toks[*i].text == kind::LBRACE {
                self.push_err(&toks[*i - 1], DiagCode::MissingType);
                return (t, false);
            }
        }
        let tok = &toks[*i];
        match tok.id {
            TokenId::Brace => match tok.text.as_str() {
                kind::LPAREN => return self.func_multi_type_ret(toks, i),
                kind::LBRACE => return (t, false),
                _ => {}
            },
            TokenId::Op if tok.text == kind::EQ => return (t, false),
            _ => {}
        }
        let (ty, ok) = self.data_type(toks, i, false, true);
        t.ty = ty;
        (t, ok)
    }

    /// `(T1, T2, ...)` multi-value return: component types plus matching
    /// identifiers so destructuring can bind them.
    fn func_multi_type_ret(&mut self, toks: &[Token], i: &mut usize) -> (RetType, bool) {
        let mut t = RetType::default();
        *i += 1;
        if *i >= toks.len() {
            *i -= 1;
            let (ty, ok) = self.data_type(toks, i, false, false);
            t.ty = ty;
            return (t, ok);
        }
        *i -= 1; // back onto the parenthesis
        let Some(rang) = range(i, kind::LPAREN, kind::RPAREN, toks) else {
            return (t, false);
        };
        let params = self.params(&rang, false, true);
        let mut types = Vec::with_capacity(params.len());
        for param in &params {
            types.push(param.ty.clone());
            let mut id_tok = param.token.clone();
            id_tok.text = if param.id != ANON_ID {
                param.id.clone()
            } else {
                IGNORE_ID.to_string()
            };
            t.identifiers.push(id_tok);
        }
        if types.len() > 1 {
            t.ty.multi_typed = true;
            t.ty.kind = format!(
                "({})",
                types
                    .iter()
                    .map(|ty| ty.kind.as_str())
                    .collect::<Vec<_>>()
                    .join(",")
            );
            t.ty.tag = TypeTag::Multi(types);
        } else if let Some(first) = types.into_iter().next() {
            t.ty = first;
        }
        *i -= 1; // the caller advances past the closing parenthesis
        (t, true)
    }
}
