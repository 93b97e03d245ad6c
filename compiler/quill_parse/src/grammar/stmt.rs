//! Block and statement building.
//!
//! The block builder cuts statement slices from its own token span and
//! dispatches on the leading token. Conditional chains hand their trailing
//! `else` to the next round through the queued-tokens channel; the classic
//! three-clause `iter` consumes two further slices itself.

use crate::cursor::next_statement_pos;
use crate::split::{
    block_expr, check_assign_tokens, is_func_call, is_assign_operator, is_postfix_operator, parts,
    range,
};
use crate::Builder;
use quill_ast::{
    is_ignore_id, Assign, AssignLeft, Block, Break, Case, Comment, ConcurrentCall, Continue,
    Else, ElseIf, Expr, ExprStatement, Fallthrough, Goto, If, Iter, IterFor, IterForeach,
    IterProfile, IterWhile, Label, Match, Ret, Statement, StmtNode, Type, Var, IGNORE_ID,
};
use quill_diagnostic::DiagCode;
use quill_lex::{kind, Token, TokenId};

/// Statement-cutting state of one block.
pub(crate) struct BlockState {
    /// Remaining tokens of the block span.
    pub src: Vec<Token>,
    /// End of the current statement inside `src`.
    pub pos: usize,
    /// The current statement slice.
    pub toks: Vec<Token>,
    /// Tokens queued by the current statement for the next round.
    pub next_toks: Vec<Token>,
    pub with_terminator: bool,
}

impl BlockState {
    fn over(toks: Vec<Token>) -> Self {
        BlockState {
            pos: toks.len(),
            src: toks.clone(),
            toks,
            next_toks: Vec::new(),
            with_terminator: false,
        }
    }
}

/// Cut the next statement slice from `bs.src`.
pub(crate) fn set_to_next_statement(bs: &mut BlockState) {
    bs.src.drain(..bs.pos);
    let (pos, with_term) = next_statement_pos(&bs.src, 0);
    bs.pos = pos;
    bs.with_terminator = with_term;
    let end = if with_term { pos - 1 } else { pos };
    bs.toks = bs.src[..end].to_vec();
}

pub(crate) fn finished(bs: &BlockState) -> bool {
    bs.pos >= bs.src.len()
}

impl Builder {
    /// Build a block from its inner token span.
    pub(crate) fn block(&mut self, toks: Vec<Token>) -> Block {
        let mut block = Block::default();
        let mut bs = BlockState {
            src: toks,
            pos: 0,
            toks: Vec::new(),
            next_toks: Vec::new(),
            with_terminator: false,
        };
        loop {
            set_to_next_statement(&mut bs);
            self.push_statement_to_block(&mut block, &mut bs);
            while !bs.next_toks.is_empty() {
                bs.toks = std::mem::take(&mut bs.next_toks);
                self.push_statement_to_block(&mut block, &mut bs);
            }
            if finished(&bs) {
                break;
            }
        }
        block
    }

    fn push_statement_to_block(&mut self, block: &mut Block, bs: &mut BlockState) {
        if bs.toks.is_empty() {
            return;
        }
        if bs.toks.last().map(|t| t.id) == Some(TokenId::Semicolon) {
            if bs.toks.len() == 1 {
                return;
            }
            bs.toks.pop();
        }
        if let Some(mut s) = self.statement(bs) {
            // Read after the statement ran: iter consumes further slices.
            s.with_terminator = bs.with_terminator;
            block.tree.push(s);
        }
    }

    /// Dispatch one statement slice.
    fn statement(&mut self, bs: &mut BlockState) -> Option<Statement> {
        let tok = bs.toks[0].clone();
        if tok.id == TokenId::Ident {
            if let Some(s) = self.id_statement(bs) {
                return Some(s);
            }
        }
        if let Some(s) = self.assign_statement(&bs.toks.clone()) {
            return Some(s);
        }
        match tok.id {
            TokenId::Const | TokenId::Let | TokenId::Mut => {
                let toks = bs.toks.clone();
                Some(self.var_statement(&toks, true))
            }
            TokenId::Ret => Some(self.ret_statement(&bs.toks.clone())),
            TokenId::Iter => self.iter_expr(bs),
            TokenId::Break => Some(self.break_statement(&bs.toks.clone())),
            TokenId::Continue => Some(self.continue_statement(&bs.toks.clone())),
            TokenId::If => self.if_expr(bs),
            TokenId::Else => self.else_block(bs),
            TokenId::Comment => Some(self.comment_statement(&tok)),
            TokenId::Co => self.concurrent_call_statement(&bs.toks.clone()),
            TokenId::Goto => self.goto_statement(&bs.toks.clone()),
            TokenId::Fallthrough => Some(self.fallthrough_statement(&bs.toks.clone())),
            TokenId::Type => {
                let toks = bs.toks.clone();
                let t = self.type_alias(&toks);
                Some(Statement::new(
                    t.token.clone(),
                    StmtNode::TypeAlias(Box::new(t)),
                ))
            }
            TokenId::Match => self.match_case(&bs.toks.clone()),
            TokenId::Unsafe if bs.toks.len() > 1 && bs.toks[1].text == kind::LBRACE => {
                let toks = bs.toks[1..].to_vec();
                Some(self.block_statement(toks, true))
            }
            TokenId::Brace if tok.text == kind::LBRACE => {
                let toks = bs.toks.clone();
                Some(self.block_statement(toks, false))
            }
            _ => {
                if is_func_call(&bs.toks) {
                    return Some(self.expr_statement(bs));
                }
                self.push_err(&tok, DiagCode::InvalidSyntax);
                None
            }
        }
    }

    /// Identifier-led statements: labels and `:=` short declarations.
    fn id_statement(&mut self, bs: &mut BlockState) -> Option<Statement> {
        if bs.toks.len() == 1 {
            return None;
        }
        let second = bs.toks[1].clone();
        match second.id {
            TokenId::Colon => Some(self.label_statement(bs)),
            TokenId::Op if second.text == kind::WALRUS => Some(self.short_var_statement(bs)),
            _ => None,
        }
    }

    /// `name:` — the rest of the slice is queued as the next statement.
    fn label_statement(&mut self, bs: &mut BlockState) -> Statement {
        let token = bs.toks[0].clone();
        let label = Label {
            token: token.clone(),
            label: token.text.clone(),
        };
        if bs.toks.len() > 2 {
            bs.next_toks = bs.toks[2..].to_vec();
        }
        Statement::new(token, StmtNode::Label(label))
    }

    /// `name := expr` — a fresh mutable binding.
    fn short_var_statement(&mut self, bs: &mut BlockState) -> Statement {
        let token = bs.toks[0].clone();
        let setter = bs.toks[1].clone();
        let mut v = Var {
            token: token.clone(),
            id: token.text.clone(),
            ty: Type::void(),
            is_mut: true,
            is_new: true,
            setter: Some(setter.clone()),
            ..Var::default()
        };
        let value_toks = bs.toks[2..].to_vec();
        if value_toks.is_empty() {
            self.push_err(&setter, DiagCode::MissingExpr);
        } else {
            v.expr = self.expr(&value_toks);
        }
        Statement::new(token, StmtNode::Var(Box::new(v)))
    }

    fn expr_statement(&mut self, bs: &mut BlockState) -> Statement {
        let toks = bs.toks.clone();
        let expr = self.expr(&toks);
        Statement::new(toks[0].clone(), StmtNode::Expr(ExprStatement { expr }))
    }

    pub(crate) fn var_statement(&mut self, toks: &[Token], expr: bool) -> Statement {
        let v = self.var(toks, true, expr);
        Statement::new(v.token.clone(), StmtNode::Var(Box::new(v)))
    }

    /// The general variable parser.
    ///
    /// With `begin` the slice starts at `let`/`const`; without it the parser
    /// accepts the bare `id: type` form used by struct fields. `expr`
    /// controls whether an initializer is allowed.
    pub(crate) fn var(&mut self, toks: &[Token], begin: bool, expr: bool) -> Var {
        let mut v = Var::default();
        v.is_public = self.take_pub();
        if toks.is_empty() {
            return v;
        }
        let mut i = 0usize;
        v.token = toks[i].clone();
        if begin {
            self.var_begin(&mut v, &mut i, toks);
            if i >= toks.len() {
                return v;
            }
        }
        v.token = toks[i].clone();
        if v.token.id != TokenId::Ident {
            self.push_err(&v.token, DiagCode::InvalidSyntax);
            return v;
        }
        v.id = v.token.text.clone();
        v.ty = Type::void();
        i += 1;
        if i < toks.len() {
            self.var_type_and_expr(&mut v, toks, i, expr);
        } else if !expr {
            self.push_err(&v.token, DiagCode::MissingType);
        }
        v
    }

    fn var_begin(&mut self, v: &mut Var, i: &mut usize, toks: &[Token]) {
        let tok = toks[*i].clone();
        match tok.id {
            TokenId::Let => {
                *i += 1;
                if *i < toks.len() && toks[*i].id == TokenId::Mut {
                    v.is_mut = true;
                    *i += 1;
                }
            }
            TokenId::Const => {
                *i += 1;
                if v.is_const {
                    self.push_err(&tok, DiagCode::AlreadyConst);
                }
                v.is_const = true;
                // `const mut` is accepted: const subsumes the marker.
                if *i < toks.len() && toks[*i].id == TokenId::Mut {
                    *i += 1;
                }
            }
            _ => {
                self.push_err(&tok, DiagCode::InvalidSyntax);
                return;
            }
        }
        if *i >= toks.len() {
            self.push_err(&tok, DiagCode::InvalidSyntax);
        }
    }

    fn var_type_and_expr(&mut self, v: &mut Var, toks: &[Token], mut i: usize, expr: bool) {
        let mut tok = toks[i].clone();
        if tok.id == TokenId::Colon {
            i += 1; // skip the annotation colon
            if i >= toks.len()
                || (toks[i].id == TokenId::Op && toks[i].text == kind::EQ)
            {
                self.push_err(&tok, DiagCode::MissingType);
                return;
            }
            let (t, ok) = self.data_type(toks, &mut i, true, false);
            if ok {
                v.ty = t;
                i += 1;
                if i >= toks.len() {
                    return;
                }
                tok = toks[i].clone();
            }
        }
        if expr && tok.id == TokenId::Op {
            if tok.text != kind::EQ {
                self.push_err(&tok, DiagCode::InvalidSyntax);
                return;
            }
            let value_toks = toks[i + 1..].to_vec();
            if value_toks.is_empty() {
                self.push_err(&tok, DiagCode::MissingExpr);
                return;
            }
            v.expr = self.expr(&value_toks);
            v.setter = Some(tok);
        } else {
            self.push_err(&tok, DiagCode::InvalidSyntax);
        }
    }

    fn comment_statement(&mut self, tok: &Token) -> Statement {
        let content = tok
            .text
            .strip_prefix("//")
            .unwrap_or(&tok.text)
            .trim()
            .to_string();
        Statement::new(tok.clone(), StmtNode::Comment(Comment { content }))
    }

    fn ret_statement(&mut self, toks: &[Token]) -> Statement {
        let mut ret = Ret {
            token: toks[0].clone(),
            ..Ret::default()
        };
        if toks.len() > 1 {
            ret.expr = self.expr(&toks[1..]);
        }
        Statement::new(ret.token.clone(), StmtNode::Ret(ret))
    }

    fn break_statement(&mut self, toks: &[Token]) -> Statement {
        let mut br = Break {
            token: toks[0].clone(),
            label: None,
        };
        if toks.len() > 1 {
            if toks[1].id != TokenId::Ident {
                self.push_err(&toks[1], DiagCode::InvalidSyntax);
            } else {
                br.label = Some(toks[1].clone());
                if toks.len() > 2 {
                    self.push_err(&toks[1], DiagCode::InvalidSyntax);
                }
            }
        }
        Statement::new(br.token.clone(), StmtNode::Break(br))
    }

    fn continue_statement(&mut self, toks: &[Token]) -> Statement {
        let mut cont = Continue {
            token: toks[0].clone(),
            loop_label: None,
        };
        if toks.len() > 1 {
            if toks[1].id != TokenId::Ident {
                self.push_err(&toks[1], DiagCode::InvalidSyntax);
            } else {
                cont.loop_label = Some(toks[1].clone());
                if toks.len() > 2 {
                    self.push_err(&toks[1], DiagCode::InvalidSyntax);
                }
            }
        }
        Statement::new(cont.token.clone(), StmtNode::Continue(cont))
    }

    fn goto_statement(&mut self, toks: &[Token]) -> Option<Statement> {
        let token = toks[0].clone();
        if toks.len() == 1 {
            self.push_err(&token, DiagCode::MissingGotoLabel);
            return None;
        }
        if toks.len() > 2 {
            self.push_err(&toks[2], DiagCode::InvalidSyntax);
        }
        let id_tok = &toks[1];
        if id_tok.id != TokenId::Ident {
            self.push_err(id_tok, DiagCode::InvalidSyntax);
            return None;
        }
        let goto = Goto {
            token: token.clone(),
            label: id_tok.text.clone(),
        };
        Some(Statement::new(token, StmtNode::Goto(goto)))
    }

    fn fallthrough_statement(&mut self, toks: &[Token]) -> Statement {
        let token = toks[0].clone();
        if toks.len() > 1 {
            self.push_err(&toks[1], DiagCode::InvalidSyntax);
        }
        Statement::new(
            token.clone(),
            StmtNode::Fallthrough(Fallthrough { token }),
        )
    }

    fn concurrent_call_statement(&mut self, toks: &[Token]) -> Option<Statement> {
        let token = toks[0].clone();
        let rest = &toks[1..];
        if rest.is_empty() {
            self.push_err(&token, DiagCode::MissingExpr);
            return None;
        }
        if !is_func_call(rest) {
            self.push_err(&token, DiagCode::ExprNotFuncCall);
        }
        let expr = self.expr(rest);
        Some(Statement::new(
            token.clone(),
            StmtNode::ConcurrentCall(ConcurrentCall { token, expr }),
        ))
    }

    fn block_statement(&mut self, toks: Vec<Token>, is_unsafe: bool) -> Statement {
        let tok = toks[0].clone();
        let mut i = 0usize;
        let inner = range(&mut i, kind::LBRACE, kind::RBRACE, &toks).unwrap_or_default();
        if i < toks.len() {
            self.push_err(&toks[i], DiagCode::InvalidSyntax);
        }
        let mut block = self.block(inner);
        block.is_unsafe = is_unsafe;
        Statement::new(tok, StmtNode::Block(Box::new(block)))
    }

    // --- Assignments ---

    fn assign_statement(&mut self, toks: &[Token]) -> Option<Statement> {
        let assign = self.assign_expr(toks)?;
        Some(Statement::new(toks[0].clone(), StmtNode::Assign(assign)))
    }

    pub(crate) fn assign_expr(&mut self, toks: &[Token]) -> Option<Assign> {
        if !check_assign_tokens(toks) {
            return None;
        }
        if toks[0].id == TokenId::Let {
            self.let_decl_assign(toks)
        } else {
            self.plain_assign(toks)
        }
    }

    /// `let (a, mut b, _) = rhs` destructuring.
    fn let_decl_assign(&mut self, toks: &[Token]) -> Option<Assign> {
        if toks.len() < 2 {
            return None;
        }
        let toks = &toks[1..];
        let tok = &toks[0];
        if !(tok.id == TokenId::Brace && tok.text == kind::LPAREN) {
            return None;
        }
        let mut assign = Assign::default();
        let mut i = 0usize;
        let Some(rang) = range(&mut i, kind::LPAREN, kind::RPAREN, toks) else {
            let tok = tok.clone();
            self.push_err(&tok, DiagCode::InvalidSyntax);
            return Some(assign);
        };
        if i + 1 < toks.len() {
            assign.setter = toks[i].clone();
            i += 1;
            assign.right = self.assign_exprs(&toks[i..]);
        }
        let (parts_v, errs) = parts(&rang, TokenId::Comma, true);
        if !errs.is_empty() {
            self.errors.extend(errs);
            return Some(assign);
        }
        for part in parts_v {
            let mut part: &[Token] = &part;
            if part.len() > 2 {
                self.push_err(&part[2], DiagCode::InvalidSyntax);
            }
            let mut mutable = false;
            let first = part[0].clone();
            if first.id == TokenId::Mut {
                mutable = true;
                part = &part[1..];
                if part.is_empty() {
                    self.push_err(&first, DiagCode::InvalidSyntax);
                    continue;
                }
            }
            let mut left = self.build_assign_left(part);
            left.var.is_mut = mutable;
            left.var.is_new = !is_ignore_id(&left.var.id);
            if assign.setter.id != TokenId::Na {
                left.var.setter = Some(assign.setter.clone());
            }
            assign.left.push(left);
        }
        Some(assign)
    }

    fn plain_assign(&mut self, toks: &[Token]) -> Option<Assign> {
        let info = self.assign_info(toks);
        if !info.ok {
            return None;
        }
        let mut assign = Assign {
            setter: info.setter.clone(),
            ..Assign::default()
        };
        let (parts_v, errs) = parts(&info.left, TokenId::Comma, true);
        if !errs.is_empty() {
            self.errors.extend(errs);
            return Some(assign);
        }
        for part in parts_v {
            let left = self.build_assign_left(&part);
            assign.left.push(left);
        }
        if let Some(right) = &info.right {
            assign.right = self.assign_exprs(right);
        }
        Some(assign)
    }

    /// Locate the first top-level assignment operator.
    fn assign_info(&mut self, toks: &[Token]) -> AssignInfo {
        let mut info = AssignInfo {
            left: Vec::new(),
            right: None,
            setter: Token::na(),
            ok: true,
        };
        let mut brace_n = 0i32;
        for (i, tok) in toks.iter().enumerate() {
            if tok.id == TokenId::Brace {
                match tok.text.as_str() {
                    kind::LBRACE | kind::LBRACKET | kind::LPAREN => brace_n += 1,
                    _ => brace_n -= 1,
                }
            }
            if brace_n > 0 {
                continue;
            }
            if tok.id != TokenId::Op || !is_assign_operator(&tok.text) {
                continue;
            }
            info.left = toks[..i].to_vec();
            if info.left.is_empty() {
                let tok = tok.clone();
                self.push_err(&tok, DiagCode::InvalidSyntax);
                info.ok = false;
            }
            info.setter = tok.clone();
            if i + 1 >= toks.len() {
                info.right = None;
                info.ok = is_postfix_operator(&info.setter.text);
            } else {
                info.right = Some(toks[i + 1..].to_vec());
                if is_postfix_operator(&info.setter.text) {
                    let err_tok = toks[i + 1].clone();
                    self.push_err(&err_tok, DiagCode::InvalidSyntax);
                    info.right = None;
                }
            }
            break;
        }
        info
    }

    fn build_assign_left(&mut self, toks: &[Token]) -> AssignLeft {
        let mut left = AssignLeft::default();
        if toks[0].id == TokenId::Ident {
            left.var.token = toks[0].clone();
            left.var.id = left.var.token.text.clone();
        }
        left.expr = self.expr(toks);
        left
    }

    fn assign_exprs(&mut self, toks: &[Token]) -> Vec<Expr> {
        let (parts_v, errs) = parts(toks, TokenId::Comma, true);
        if !errs.is_empty() {
            self.errors.extend(errs);
            return Vec::new();
        }
        let mut exprs = Vec::with_capacity(parts_v.len());
        for part in parts_v {
            exprs.push(self.expr(&part));
        }
        exprs
    }

    // --- Iterations ---

    fn iter_expr(&mut self, bs: &mut BlockState) -> Option<Statement> {
        if bs.with_terminator {
            self.for_iter_profile(bs)
        } else {
            let toks = bs.toks.clone();
            self.common_iter_profile(toks)
        }
    }

    /// Restricted statement forms allowed as init/post of the classic loop.
    fn for_statement(&mut self, toks: Vec<Token>) -> Option<Statement> {
        let first = toks[0].clone();
        let mut bs = BlockState::over(toks);
        let s = self.statement(&mut bs);
        if let Some(st) = &s {
            match st.node {
                StmtNode::Expr(_) | StmtNode::Assign(_) | StmtNode::Var(_) => {}
                _ => self.push_err(&first, DiagCode::InvalidSyntax),
            }
        }
        s
    }

    /// `iter init; cond; post { ... }` — consumes two further slices.
    fn for_iter_profile(&mut self, bs: &mut BlockState) -> Option<Statement> {
        let token = bs.toks[0].clone();
        bs.toks.remove(0);
        let mut profile = IterFor::default();
        if !bs.toks.is_empty() {
            let once_toks = std::mem::take(&mut bs.toks);
            profile.once = self.for_statement(once_toks).map(Box::new);
        }
        if finished(bs) {
            self.push_err(&token, DiagCode::InvalidSyntax);
            return None;
        }
        set_to_next_statement(bs);
        if !bs.toks.is_empty() {
            let cond_toks = bs.toks.clone();
            profile.condition = self.expr(&cond_toks);
        }
        if finished(bs) {
            self.push_err(&token, DiagCode::InvalidSyntax);
            return None;
        }
        set_to_next_statement(bs);
        let expr_toks = block_expr(&bs.toks);
        if !expr_toks.is_empty() {
            profile.next = self.for_statement(expr_toks.clone()).map(Box::new);
        }
        let mut i = expr_toks.len();
        let Some(block_toks) = self.get_range(&mut i, kind::LBRACE, kind::RBRACE, &mut bs.toks)
        else {
            self.push_err(&token, DiagCode::BodyNotExist);
            return None;
        };
        if i < bs.toks.len() {
            self.push_err(&bs.toks[i], DiagCode::InvalidSyntax);
        }
        let block = self.block(block_toks);
        Some(Statement::new(
            token.clone(),
            StmtNode::Iter(Box::new(Iter {
                token,
                profile: IterProfile::For(Box::new(profile)),
                block,
            })),
        ))
    }

    /// `iter`, `iter cond`, and `iter vars in expr` loops.
    fn common_iter_profile(&mut self, toks: Vec<Token>) -> Option<Statement> {
        let token = toks[0].clone();
        let mut toks = toks[1..].to_vec();
        if toks.is_empty() {
            self.push_err(&token, DiagCode::BodyNotExist);
            return None;
        }
        let expr_toks = block_expr(&toks);
        let profile = if expr_toks.is_empty() {
            IterProfile::Infinite
        } else {
            self.iter_profile(&expr_toks)
        };
        let mut i = expr_toks.len();
        let Some(block_toks) = self.get_range(&mut i, kind::LBRACE, kind::RBRACE, &mut toks)
        else {
            self.push_err(&token, DiagCode::BodyNotExist);
            return None;
        };
        if i < toks.len() {
            self.push_err(&toks[i], DiagCode::InvalidSyntax);
        }
        let block = self.block(block_toks);
        Some(Statement::new(
            token.clone(),
            StmtNode::Iter(Box::new(Iter {
                token,
                profile,
                block,
            })),
        ))
    }

    /// Foreach when a top-level `in` is present, while otherwise.
    fn iter_profile(&mut self, toks: &[Token]) -> IterProfile {
        let mut brace_n = 0i32;
        for (i, tok) in toks.iter().enumerate() {
            if tok.id == TokenId::Brace {
                match tok.text.as_str() {
                    kind::LBRACE | kind::LBRACKET | kind::LPAREN => {
                        brace_n += 1;
                        continue;
                    }
                    _ => brace_n -= 1,
                }
            }
            if brace_n != 0 {
                continue;
            }
            if tok.id == TokenId::In {
                let in_tok = tok.clone();
                let var_toks = toks[..i].to_vec();
                let expr_toks = toks[i + 1..].to_vec();
                return IterProfile::Foreach(Box::new(
                    self.foreach_profile(&var_toks, &expr_toks, in_tok),
                ));
            }
        }
        IterProfile::While(IterWhile {
            expr: self.expr(toks),
        })
    }

    fn foreach_profile(
        &mut self,
        var_toks: &[Token],
        expr_toks: &[Token],
        in_tok: Token,
    ) -> IterForeach {
        let mut foreach = IterForeach {
            in_token: in_tok.clone(),
            ..IterForeach::default()
        };
        if expr_toks.is_empty() {
            self.push_err(&in_tok, DiagCode::MissingExpr);
            return foreach;
        }
        foreach.expr = self.expr(expr_toks);
        if var_toks.is_empty() {
            foreach.key_a.id = IGNORE_ID.to_string();
            foreach.key_b.id = IGNORE_ID.to_string();
        } else {
            self.setup_foreach_vars(&mut foreach, var_toks);
        }
        foreach
    }

    fn setup_foreach_vars(&mut self, f: &mut IterForeach, toks: &[Token]) {
        if toks[0].id == TokenId::Brace {
            if toks[0].text != kind::LPAREN {
                self.push_err(&toks[0], DiagCode::InvalidSyntax);
                return;
            }
            // Parenthesized variable list.
            let mut i = 0usize;
            let in_tok = f.in_token.clone();
            let Some(rang) = range(&mut i, kind::LPAREN, kind::RPAREN, toks) else {
                self.push_err(&in_tok, DiagCode::InvalidSyntax);
                return;
            };
            if i < toks.len() {
                self.push_err(&in_tok, DiagCode::InvalidSyntax);
            }
            self.setup_foreach_plain_vars(f, &rang);
            return;
        }
        self.setup_foreach_plain_vars(f, toks);
    }

    fn setup_foreach_plain_vars(&mut self, f: &mut IterForeach, toks: &[Token]) {
        let (vars_toks, errs) = parts(toks, TokenId::Comma, true);
        self.errors.extend(errs);
        if vars_toks.is_empty() {
            return;
        }
        if vars_toks.len() > 2 {
            let in_tok = f.in_token.clone();
            self.push_err(&in_tok, DiagCode::MuchForeachVars);
        }
        let mut vars = Vec::with_capacity(vars_toks.len());
        for var_toks in &vars_toks {
            vars.push(self.foreach_var_profile(var_toks));
        }
        f.key_a = vars.remove(0);
        if !vars.is_empty() {
            f.key_b = vars.remove(0);
        } else {
            f.key_b.id = IGNORE_ID.to_string();
        }
    }

    fn foreach_var_profile(&mut self, toks: &[Token]) -> Var {
        let mut v = Var::default();
        if toks.is_empty() {
            return v;
        }
        v.token = toks[0].clone();
        if v.token.id == TokenId::Mut {
            v.is_mut = true;
            if toks.len() == 1 {
                self.push_err(&v.token, DiagCode::InvalidSyntax);
                return v;
            }
            v.token = toks[1].clone();
        } else if toks.len() > 1 {
            self.push_err(&toks[1], DiagCode::InvalidSyntax);
        }
        if v.token.id != TokenId::Ident {
            self.push_err(&v.token, DiagCode::InvalidSyntax);
            return v;
        }
        v.id = v.token.text.clone();
        v.is_new = true;
        v
    }

    // --- Conditionals ---

    fn if_expr(&mut self, bs: &mut BlockState) -> Option<Statement> {
        let token = bs.toks[0].clone();
        bs.toks.remove(0);
        let mut expr_toks = block_expr(&bs.toks);
        let mut i;
        if expr_toks.is_empty() {
            // The body brace opens on the next line.
            if bs.toks.is_empty() || finished(bs) {
                self.push_err(&token, DiagCode::MissingExpr);
                return None;
            }
            expr_toks = std::mem::take(&mut bs.toks);
            set_to_next_statement(bs);
            i = 0;
        } else {
            i = expr_toks.len();
        }
        let Some(block_toks) = self.get_range(&mut i, kind::LBRACE, kind::RBRACE, &mut bs.toks)
        else {
            self.push_err(&token, DiagCode::BodyNotExist);
            return None;
        };
        if i < bs.toks.len() {
            if bs.toks[i].id == TokenId::Else {
                bs.next_toks = bs.toks[i..].to_vec();
            } else {
                self.push_err(&bs.toks[i], DiagCode::InvalidSyntax);
            }
        }
        let expr = self.expr(&expr_toks);
        let block = self.block(block_toks);
        Some(Statement::new(
            token.clone(),
            StmtNode::If(If { token, expr, block }),
        ))
    }

    fn else_if_expr(&mut self, bs: &mut BlockState) -> Option<Statement> {
        let token = bs.toks[1].clone();
        bs.toks.drain(..2);
        let mut expr_toks = block_expr(&bs.toks);
        let mut i;
        if expr_toks.is_empty() {
            if bs.toks.is_empty() || finished(bs) {
                self.push_err(&token, DiagCode::MissingExpr);
                return None;
            }
            expr_toks = std::mem::take(&mut bs.toks);
            set_to_next_statement(bs);
            i = 0;
        } else {
            i = expr_toks.len();
        }
        let Some(block_toks) = self.get_range(&mut i, kind::LBRACE, kind::RBRACE, &mut bs.toks)
        else {
            self.push_err(&token, DiagCode::BodyNotExist);
            return None;
        };
        if i < bs.toks.len() {
            if bs.toks[i].id == TokenId::Else {
                bs.next_toks = bs.toks[i..].to_vec();
            } else {
                self.push_err(&bs.toks[i], DiagCode::InvalidSyntax);
            }
        }
        let expr = self.expr(&expr_toks);
        let block = self.block(block_toks);
        Some(Statement::new(
            token.clone(),
            StmtNode::ElseIf(ElseIf { token, expr, block }),
        ))
    }

    fn else_block(&mut self, bs: &mut BlockState) -> Option<Statement> {
        if bs.toks.len() > 1 && bs.toks[1].id == TokenId::If {
            return self.else_if_expr(bs);
        }
        let token = bs.toks[0].clone();
        bs.toks.remove(0);
        let mut i = 0usize;
        let maybe = self.get_range(&mut i, kind::LBRACE, kind::RBRACE, &mut bs.toks);
        let Some(block_toks) = maybe else {
            if i < bs.toks.len() {
                self.push_err(&token, DiagCode::ElseHaveExpr);
            } else {
                self.push_err(&token, DiagCode::BodyNotExist);
            }
            return None;
        };
        if i < bs.toks.len() {
            self.push_err(&bs.toks[i], DiagCode::InvalidSyntax);
        }
        let block = self.block(block_toks);
        Some(Statement::new(
            token.clone(),
            StmtNode::Else(Else { token, block }),
        ))
    }
}

impl Builder {
    // --- Match ---

    fn match_case(&mut self, toks: &[Token]) -> Option<Statement> {
        let token = toks[0].clone();
        let mut m = Match {
            token: token.clone(),
            ..Match::default()
        };
        let mut toks_vec = toks[1..].to_vec();
        let expr_toks = block_expr(&toks_vec);
        if !expr_toks.is_empty() {
            m.expr = self.expr(&expr_toks);
        }
        let mut i = expr_toks.len();
        let Some(block_toks) = self.get_range(&mut i, kind::LBRACE, kind::RBRACE, &mut toks_vec)
        else {
            self.push_err(&token, DiagCode::BodyNotExist);
            return None;
        };
        let (cases, default) = self.cases(block_toks);
        m.cases = cases;
        m.default = default.map(Box::new);
        // Link arms in source order; the last arm falls through to the
        // default, addressed as index `cases.len()`.
        let n = m.cases.len();
        for (idx, case) in m.cases.iter_mut().enumerate() {
            if idx + 1 < n {
                case.next = Some(idx + 1);
            }
        }
        if m.default.is_some() {
            if let Some(last) = m.cases.last_mut() {
                last.next = Some(n);
            }
        }
        Some(Statement::new(token, StmtNode::Match(Box::new(m))))
    }

    fn cases(&mut self, toks: Vec<Token>) -> (Vec<Case>, Option<Case>) {
        let mut toks = toks;
        let mut cases = Vec::new();
        let mut default: Option<Case> = None;
        while !toks.is_empty() {
            let tok = toks[0].clone();
            match tok.id {
                TokenId::Case => cases.push(self.get_case(&mut toks)),
                TokenId::Default => {
                    let mut c = self.get_case(&mut toks);
                    c.token = tok.clone();
                    if default.is_none() {
                        default = Some(c);
                    } else {
                        self.push_err(&tok, DiagCode::InvalidSyntax);
                    }
                }
                _ => {
                    self.push_err(&tok, DiagCode::InvalidSyntax);
                    break;
                }
            }
        }
        (cases, default)
    }

    fn get_case(&mut self, toks: &mut Vec<Token>) -> Case {
        let token = toks[0].clone();
        toks.remove(0);
        let is_default = token.id == TokenId::Default;
        let exprs = self.case_exprs(toks, is_default);
        let block = self.case_block(toks);
        Case {
            token,
            exprs,
            block,
            next: None,
        }
    }

    /// Comma-separated case expressions up to the `:`; consumes through it.
    fn case_exprs(&mut self, toks: &mut Vec<Token>, is_default: bool) -> Vec<Expr> {
        let mut exprs = Vec::new();
        let mut brace_n = 0i32;
        let mut j = 0usize;
        let mut i = 0usize;
        while i < toks.len() {
            let tok = toks[i].clone();
            if tok.id == TokenId::Brace {
                match tok.text.as_str() {
                    kind::LPAREN | kind::LBRACE | kind::LBRACKET => brace_n += 1,
                    _ => brace_n -= 1,
                }
                i += 1;
                continue;
            }
            if brace_n != 0 {
                i += 1;
                continue;
            }
            match tok.id {
                TokenId::Comma => {
                    let span = toks[j..i].to_vec();
                    self.push_case_expr(&mut exprs, &span, &tok, is_default);
                    j = i + 1;
                }
                TokenId::Colon => {
                    let span = toks[j..i].to_vec();
                    self.push_case_expr(&mut exprs, &span, &tok, is_default);
                    toks.drain(..=i);
                    return exprs;
                }
                _ => {}
            }
            i += 1;
        }
        if let Some(first) = toks.first() {
            let tok = first.clone();
            self.push_err(&tok, DiagCode::InvalidSyntax);
        }
        toks.clear();
        Vec::new()
    }

    fn push_case_expr(
        &mut self,
        exprs: &mut Vec<Expr>,
        toks: &[Token],
        err_tok: &Token,
        is_default: bool,
    ) {
        if is_default {
            if !toks.is_empty() {
                self.push_err(err_tok, DiagCode::InvalidSyntax);
            }
            return;
        }
        if toks.is_empty() {
            self.push_err(err_tok, DiagCode::MissingExpr);
            return;
        }
        exprs.push(self.expr(toks));
    }

    /// Case body: everything up to the next top-level `case`/`default`.
    fn case_block(&mut self, toks: &mut Vec<Token>) -> Block {
        let mut brace_n = 0i32;
        let mut split_at: Option<usize> = None;
        for (i, tok) in toks.iter().enumerate() {
            if tok.id == TokenId::Brace {
                match tok.text.as_str() {
                    kind::LPAREN | kind::LBRACE | kind::LBRACKET => brace_n += 1,
                    _ => brace_n -= 1,
                }
                continue;
            }
            if brace_n != 0 {
                continue;
            }
            if matches!(tok.id, TokenId::Case | TokenId::Default) {
                split_at = Some(i);
                break;
            }
        }
        match split_at {
            Some(i) => {
                let block_toks: Vec<Token> = toks.drain(..i).collect();
                self.block(block_toks)
            }
            None => {
                let rest = std::mem::take(toks);
                self.block(rest)
            }
        }
    }
}

/// Assignment-operator scan result.
struct AssignInfo {
    left: Vec<Token>,
    right: Option<Vec<Token>>,
    setter: Token,
    ok: bool,
}
