//! Statement nodes.

use crate::{Comment, Expr, TypeAlias, Var};
use quill_lex::Token;

/// A statement inside a block.
///
/// `with_terminator` records that the source slice ended with `;`, which
/// disambiguates the three-clause `iter` form.
#[derive(Clone, Debug, PartialEq)]
pub struct Statement {
    pub token: Token,
    pub node: StmtNode,
    pub with_terminator: bool,
}

impl Statement {
    pub fn new(token: Token, node: StmtNode) -> Self {
        Statement {
            token,
            node,
            with_terminator: false,
        }
    }
}

/// Statement payloads.
#[derive(Clone, Debug, PartialEq)]
pub enum StmtNode {
    Var(Box<Var>),
    Assign(Assign),
    Ret(Ret),
    Iter(Box<Iter>),
    Break(Break),
    Continue(Continue),
    If(If),
    ElseIf(ElseIf),
    Else(Else),
    Match(Box<Match>),
    Label(Label),
    Goto(Goto),
    Fallthrough(Fallthrough),
    ConcurrentCall(ConcurrentCall),
    Comment(Comment),
    Expr(ExprStatement),
    Block(Box<Block>),
    TypeAlias(Box<TypeAlias>),
}

/// A code block.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Block {
    pub tree: Vec<Statement>,
    pub is_unsafe: bool,
}

/// One target of an assignment.
///
/// `var` carries binding info when the target declares a fresh name
/// (destructuring); for plain targets only its token/id are filled when the
/// target starts with an identifier.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AssignLeft {
    pub expr: Expr,
    pub var: Var,
}

/// An assignment statement, including compound and postfix forms.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Assign {
    pub setter: Token,
    pub left: Vec<AssignLeft>,
    pub right: Vec<Expr>,
}

/// A return statement.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ret {
    pub token: Token,
    pub expr: Expr,
}

/// An `iter` loop.
#[derive(Clone, Debug, PartialEq)]
pub struct Iter {
    pub token: Token,
    pub profile: IterProfile,
    pub block: Block,
}

/// The three loop shapes, plus the bare infinite form.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum IterProfile {
    /// `iter { ... }` with no clause.
    #[default]
    Infinite,
    While(IterWhile),
    Foreach(Box<IterForeach>),
    For(Box<IterFor>),
}

/// Condition-only loop.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IterWhile {
    pub expr: Expr,
}

/// `iter k, v in xs` loop.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IterForeach {
    pub key_a: Var,
    pub key_b: Var,
    pub in_token: Token,
    pub expr: Expr,
}

/// Classic three-clause loop: `iter init; cond; post { ... }`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IterFor {
    pub once: Option<Box<Statement>>,
    pub condition: Expr,
    pub next: Option<Box<Statement>>,
}

/// A break statement with an optional loop label.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Break {
    pub token: Token,
    pub label: Option<Token>,
}

/// A continue statement with an optional loop label.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Continue {
    pub token: Token,
    pub loop_label: Option<Token>,
}

/// The head of a conditional chain.
#[derive(Clone, Debug, PartialEq)]
pub struct If {
    pub token: Token,
    pub expr: Expr,
    pub block: Block,
}

/// An `else if` link of a conditional chain.
#[derive(Clone, Debug, PartialEq)]
pub struct ElseIf {
    pub token: Token,
    pub expr: Expr,
    pub block: Block,
}

/// The trailing `else` of a conditional chain.
#[derive(Clone, Debug, PartialEq)]
pub struct Else {
    pub token: Token,
    pub block: Block,
}

/// A match statement.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Match {
    pub token: Token,
    pub expr: Expr,
    pub cases: Vec<Case>,
    pub default: Option<Box<Case>>,
}

/// One match arm.
///
/// `next` links arms in source order for fall-through: the index of the
/// following arm in `cases`, or `cases.len()` when the default arm follows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Case {
    pub token: Token,
    pub exprs: Vec<Expr>,
    pub block: Block,
    pub next: Option<usize>,
}

/// A statement label.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Label {
    pub token: Token,
    pub label: String,
}

/// A goto statement.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Goto {
    pub token: Token,
    pub label: String,
}

/// Fall through to the next match arm.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fallthrough {
    pub token: Token,
}

/// A deferred-concurrent call (`co f(...)`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConcurrentCall {
    pub token: Token,
    pub expr: Expr,
}

/// An expression in statement position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExprStatement {
    pub expr: Expr,
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_lex::TokenId;

    #[test]
    fn statement_defaults_to_no_terminator() {
        let s = Statement::new(
            Token::dummy(TokenId::Ret, "ret"),
            StmtNode::Ret(Ret::default()),
        );
        assert!(!s.with_terminator);
    }

    #[test]
    fn default_iter_profile_is_infinite() {
        assert_eq!(IterProfile::default(), IterProfile::Infinite);
    }
}
