//! Expression nodes.
//!
//! The builder stops decomposition at binary-operator boundaries: an operand
//! is an opaque token run owned by the node, decomposed by a later evaluator.

use quill_lex::Token;

/// An expression: the covered token span plus its operator tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Expr {
    pub tokens: Vec<Token>,
    pub op: ExprOp,
}

impl Expr {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.op == ExprOp::None
    }
}

/// Operator tree of an expression.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ExprOp {
    #[default]
    None,
    /// Leaf: an undivided token run.
    Operand(Vec<Token>),
    /// A binary operation over two sub-trees.
    Binary(Box<Binop>),
}

/// A binary operation.
#[derive(Clone, Debug, PartialEq)]
pub struct Binop {
    pub left: ExprOp,
    pub right: ExprOp,
    pub op: Token,
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_lex::TokenId;

    #[test]
    fn default_expr_is_empty() {
        assert!(Expr::default().is_empty());
    }

    #[test]
    fn operand_expr_is_not_empty() {
        let expr = Expr {
            tokens: vec![Token::dummy(TokenId::Literal, "1")],
            op: ExprOp::Operand(vec![Token::dummy(TokenId::Literal, "1")]),
        };
        assert!(!expr.is_empty());
    }
}
