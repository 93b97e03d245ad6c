//! Expression building.
//!
//! Produces an operator tree by precedence climbing over the token span.
//! Decomposition stops at binary-operator boundaries: operands stay opaque
//! token runs for the later evaluator. Call, index, member, and literal
//! syntax is therefore never inspected here.

use crate::Builder;
use quill_ast::{Binop, Expr, ExprOp};
use quill_lex::{kind, Token, TokenId};

impl Builder {
    /// Build an expression from a token span.
    pub(crate) fn expr(&mut self, toks: &[Token]) -> Expr {
        Expr {
            tokens: toks.to_vec(),
            op: build_expr_op(toks),
        }
    }
}

fn eliminate_comments(toks: &[Token]) -> Vec<Token> {
    toks.iter()
        .filter(|t| t.id != TokenId::Comment)
        .cloned()
        .collect()
}

fn build_expr_op(toks: &[Token]) -> ExprOp {
    let toks = eliminate_comments(toks);
    build_binop_tree(&toks)
}

fn build_binop_tree(toks: &[Token]) -> ExprOp {
    match find_lowest_precedence_operator(toks) {
        None => ExprOp::Operand(toks.to_vec()),
        Some(i) => ExprOp::Binary(Box::new(Binop {
            left: build_binop_tree(&toks[..i]),
            right: build_binop_tree(&toks[i + 1..]),
            op: toks[i].clone(),
        })),
    }
}

/// First-to-apply slot per precedence rank (1 = lowest, splits outermost).
///
/// Within a rank the rightmost occurrence wins, which makes the produced
/// tree left-associative.
#[derive(Default)]
struct Precedencer {
    slots: [Option<usize>; 6],
}

impl Precedencer {
    fn set(&mut self, rank: usize, idx: usize) {
        self.slots[rank] = Some(idx);
    }

    fn lowest(&self) -> Option<usize> {
        self.slots.iter().skip(1).flatten().next().copied()
    }
}

/// Index of the operator to split at, or `None` for a leaf span.
///
/// Operators inside brace groups and operators whose left neighbor is itself
/// an operator (prefix unaries) are never split points.
fn find_lowest_precedence_operator(toks: &[Token]) -> Option<usize> {
    let mut prec = Precedencer::default();
    let mut brace_n = 0i32;
    for (i, tok) in toks.iter().enumerate() {
        if tok.id == TokenId::Brace {
            match tok.text.as_str() {
                kind::LBRACE | kind::LPAREN | kind::LBRACKET => brace_n += 1,
                _ => brace_n -= 1,
            }
            continue;
        }
        if i == 0 || tok.id != TokenId::Op || brace_n > 0 {
            continue;
        }
        if toks[i - 1].id == TokenId::Op {
            continue;
        }
        match tok.text.as_str() {
            kind::STAR | kind::PERCENT | kind::SOLIDUS | kind::RSHIFT | kind::LSHIFT
            | kind::AMPER => prec.set(5, i),
            kind::PLUS | kind::MINUS | kind::VLINE | kind::CARET => prec.set(4, i),
            kind::EQS | kind::NOT_EQ | kind::LT | kind::LESS_EQ | kind::GT | kind::GREAT_EQ => {
                prec.set(3, i)
            }
            kind::DBL_AMPER => prec.set(2, i),
            kind::DBL_VLINE => prec.set(1, i),
            _ => {}
        }
    }
    prec.lowest()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_lex::SourceFile;
    use std::sync::Arc;

    fn toks(source: &str) -> Vec<Token> {
        let file = Arc::new(SourceFile::new("<test>"));
        let (tokens, errors) = quill_lex::lex(source, &file);
        assert!(errors.is_empty());
        tokens
    }

    fn op_text(op: &ExprOp) -> &str {
        match op {
            ExprOp::Binary(b) => &b.op.text,
            _ => panic!("expected a binary node, got {op:?}"),
        }
    }

    fn operand_texts(op: &ExprOp) -> Vec<&str> {
        match op {
            ExprOp::Operand(toks) => toks.iter().map(|t| t.text.as_str()).collect(),
            _ => panic!("expected an operand leaf, got {op:?}"),
        }
    }

    #[test]
    fn plain_span_is_a_leaf() {
        let op = build_expr_op(&toks("f(a + b)"));
        assert_eq!(operand_texts(&op), vec!["f", "(", "a", "+", "b", ")"]);
    }

    #[test]
    fn lowest_rank_splits_outermost() {
        // `a + b * c` applies `+` last, so it is the root.
        let op = build_expr_op(&toks("a + b * c"));
        assert_eq!(op_text(&op), "+");
        let ExprOp::Binary(root) = op else { unreachable!() };
        assert_eq!(operand_texts(&root.left), vec!["a"]);
        assert_eq!(op_text(&root.right), "*");
    }

    #[test]
    fn same_rank_is_left_associative() {
        // `a - b - c` parses as `(a - b) - c`.
        let op = build_expr_op(&toks("a - b - c"));
        let ExprOp::Binary(root) = op else { unreachable!() };
        assert_eq!(root.op.text, "-");
        assert_eq!(operand_texts(&root.right), vec!["c"]);
        let ExprOp::Binary(left) = root.left else {
            panic!("left side should be the first subtraction")
        };
        assert_eq!(left.op.text, "-");
        assert_eq!(operand_texts(&left.left), vec!["a"]);
        assert_eq!(operand_texts(&left.right), vec!["b"]);
    }

    #[test]
    fn logical_ranks_are_lowest() {
        let op = build_expr_op(&toks("a == b && c < d || e"));
        assert_eq!(op_text(&op), "||");
        let ExprOp::Binary(root) = op else { unreachable!() };
        assert_eq!(op_text(&root.left), "&&");
    }

    #[test]
    fn prefix_unary_is_not_a_split_point() {
        let op = build_expr_op(&toks("a * -b"));
        assert_eq!(op_text(&op), "*");
        let ExprOp::Binary(root) = op else { unreachable!() };
        assert_eq!(operand_texts(&root.right), vec!["-", "b"]);
    }

    #[test]
    fn operators_inside_groups_are_opaque() {
        let op = build_expr_op(&toks("(a + b)"));
        assert_eq!(operand_texts(&op), vec!["(", "a", "+", "b", ")"]);
    }

    #[test]
    fn comments_are_stripped() {
        let op = build_expr_op(&toks("a + // note\nb"));
        assert_eq!(op_text(&op), "+");
    }
}
