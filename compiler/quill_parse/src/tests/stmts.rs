//! Statement-level tests: assignments, loops, conditionals, match, and the
//! smaller statement forms.

use super::{body_stmts, build_clean, build_src, fn_body, single_stmt};
use quill_ast::{ExprOp, IterProfile, StmtNode};
use quill_diagnostic::DiagCode;

#[test]
fn local_variables() {
    let StmtNode::Var(v) = single_stmt("let x = 5") else {
        panic!("var expected")
    };
    assert_eq!(v.id, "x");
    assert!(!v.is_mut);
    assert!(v.setter.is_some());

    let StmtNode::Var(v) = single_stmt("let mut y: int = 5") else {
        panic!("var expected")
    };
    assert!(v.is_mut);
    assert_eq!(v.ty.kind, "int");

    let StmtNode::Var(v) = single_stmt("const z = 1") else {
        panic!("var expected")
    };
    assert!(v.is_const);
}

#[test]
fn short_declaration() {
    let StmtNode::Var(v) = single_stmt("i := 0") else {
        panic!("var expected")
    };
    assert_eq!(v.id, "i");
    assert!(v.is_new);
    assert!(v.is_mut);
    assert_eq!(v.setter.as_ref().expect("setter").text, ":=");
    assert_eq!(v.expr.tokens[0].text, "0");
}

#[test]
fn plain_assignment() {
    let StmtNode::Assign(assign) = single_stmt("x = 1") else {
        panic!("assign expected")
    };
    assert_eq!(assign.setter.text, "=");
    assert_eq!(assign.left.len(), 1);
    assert_eq!(assign.left[0].var.id, "x");
    assert_eq!(assign.right.len(), 1);
}

#[test]
fn multi_assignment() {
    let StmtNode::Assign(assign) = single_stmt("a, b = b, a") else {
        panic!("assign expected")
    };
    assert_eq!(assign.left.len(), 2);
    assert_eq!(assign.right.len(), 2);
}

#[test]
fn compound_assignment() {
    let StmtNode::Assign(assign) = single_stmt("total += 3") else {
        panic!("assign expected")
    };
    assert_eq!(assign.setter.text, "+=");
}

#[test]
fn postfix_assignment_has_no_right_side() {
    let StmtNode::Assign(assign) = single_stmt("n++") else {
        panic!("assign expected")
    };
    assert_eq!(assign.setter.text, "++");
    assert!(assign.right.is_empty());
}

#[test]
fn postfix_with_right_side_is_reported() {
    let out = build_src("fn main() {\nn++ 5\n}");
    assert!(out.errors.iter().any(|e| e.code == DiagCode::InvalidSyntax));
}

#[test]
fn destructuring_assignment() {
    let StmtNode::Assign(assign) = single_stmt("let (x, mut y, _) = pair()") else {
        panic!("assign expected")
    };
    assert_eq!(assign.setter.text, "=");
    assert_eq!(assign.left.len(), 3);
    assert!(assign.left[0].var.is_new);
    assert!(!assign.left[0].var.is_mut);
    assert!(assign.left[1].var.is_new);
    assert!(assign.left[1].var.is_mut);
    // `_` discards: not a fresh binding.
    assert!(!assign.left[2].var.is_new);
    assert_eq!(assign.right.len(), 1);
}

#[test]
fn return_statements() {
    let StmtNode::Ret(ret) = single_stmt("ret") else {
        panic!("ret expected")
    };
    assert!(ret.expr.tokens.is_empty());

    let StmtNode::Ret(ret) = single_stmt("ret x * 2") else {
        panic!("ret expected")
    };
    let ExprOp::Binary(op) = &ret.expr.op else {
        panic!("binary expected")
    };
    assert_eq!(op.op.text, "*");
}

#[test]
fn expression_statement_requires_a_call_shape() {
    let StmtNode::Expr(es) = single_stmt("obj.run(1, 2)") else {
        panic!("expr statement expected")
    };
    assert_eq!(es.expr.tokens[0].text, "obj");

    let out = build_src("fn main() {\nx + 1\n}");
    assert!(out.errors.iter().any(|e| e.code == DiagCode::InvalidSyntax));
}

#[test]
fn infinite_iter() {
    let StmtNode::Iter(iter) = single_stmt("iter { }") else {
        panic!("iter expected")
    };
    assert_eq!(iter.profile, IterProfile::Infinite);
}

#[test]
fn while_iter() {
    let StmtNode::Iter(iter) = single_stmt("iter x < 10 { x++ }") else {
        panic!("iter expected")
    };
    let IterProfile::While(w) = &iter.profile else {
        panic!("while profile expected")
    };
    let ExprOp::Binary(op) = &w.expr.op else {
        panic!("binary expected")
    };
    assert_eq!(op.op.text, "<");
    assert_eq!(iter.block.tree.len(), 1);
}

#[test]
fn foreach_iter() {
    let StmtNode::Iter(iter) = single_stmt("iter a, b in xs { }") else {
        panic!("iter expected")
    };
    let IterProfile::Foreach(each) = &iter.profile else {
        panic!("foreach profile expected")
    };
    assert_eq!(each.key_a.id, "a");
    assert!(each.key_a.is_new);
    assert_eq!(each.key_b.id, "b");
    assert_eq!(each.in_token.text, "in");
    assert_eq!(each.expr.tokens[0].text, "xs");
}

#[test]
fn foreach_single_var_defaults_second_to_ignore() {
    let StmtNode::Iter(iter) = single_stmt("iter v in xs { }") else {
        panic!("iter expected")
    };
    let IterProfile::Foreach(each) = &iter.profile else {
        panic!("foreach profile expected")
    };
    assert_eq!(each.key_a.id, "v");
    assert_eq!(each.key_b.id, "_");
}

#[test]
fn foreach_with_parenthesized_mut_vars() {
    let StmtNode::Iter(iter) = single_stmt("iter (i, mut v) in xs { }") else {
        panic!("iter expected")
    };
    let IterProfile::Foreach(each) = &iter.profile else {
        panic!("foreach profile expected")
    };
    assert_eq!(each.key_a.id, "i");
    assert!(each.key_b.is_mut);
}

#[test]
fn foreach_with_three_vars_is_reported() {
    let out = build_src("fn main() {\niter a, b, c in xs { }\n}");
    assert!(out.errors.iter().any(|e| e.code == DiagCode::MuchForeachVars));
}

#[test]
fn classic_for_iter() {
    let stmts = body_stmts("iter i := 0; i < 10; i++ {\n}");
    assert_eq!(stmts.len(), 1);
    let StmtNode::Iter(iter) = &stmts[0].node else {
        panic!("iter expected")
    };
    let IterProfile::For(profile) = &iter.profile else {
        panic!("for profile expected")
    };
    let once = profile.once.as_ref().expect("init statement");
    let StmtNode::Var(init) = &once.node else {
        panic!("init should be a fresh binding")
    };
    assert_eq!(init.id, "i");
    assert!(init.is_new);
    let ExprOp::Binary(cond) = &profile.condition.op else {
        panic!("condition expected")
    };
    assert_eq!(cond.op.text, "<");
    let next = profile.next.as_ref().expect("post statement");
    let StmtNode::Assign(post) = &next.node else {
        panic!("post should be an assignment")
    };
    assert_eq!(post.setter.text, "++");
    assert!(iter.block.tree.is_empty());
}

#[test]
fn if_else_chain() {
    let stmts = body_stmts("if a { } else if b { } else { }");
    assert_eq!(stmts.len(), 3);
    assert!(matches!(stmts[0].node, StmtNode::If(_)));
    assert!(matches!(stmts[1].node, StmtNode::ElseIf(_)));
    assert!(matches!(stmts[2].node, StmtNode::Else(_)));
}

#[test]
fn if_condition_and_body() {
    let StmtNode::If(ifst) = single_stmt("if x == 1 { run() }") else {
        panic!("if expected")
    };
    let ExprOp::Binary(cond) = &ifst.expr.op else {
        panic!("binary expected")
    };
    assert_eq!(cond.op.text, "==");
    assert_eq!(ifst.block.tree.len(), 1);
}

#[test]
fn else_with_expression_is_reported() {
    let out = build_src("fn main() {\nif a { } else b { }\n}");
    assert!(out.errors.iter().any(|e| e.code == DiagCode::ElseHaveExpr));
}

#[test]
fn match_with_cases_and_default() {
    let stmts = body_stmts(
        "match x {\ncase 1, 2:\n\trun()\ncase 3:\n\tfallthrough\ndefault:\n\tother()\n}",
    );
    let StmtNode::Match(m) = &stmts[0].node else {
        panic!("match expected")
    };
    assert_eq!(m.expr.tokens[0].text, "x");
    assert_eq!(m.cases.len(), 2);
    assert_eq!(m.cases[0].exprs.len(), 2);
    assert_eq!(m.cases[0].block.tree.len(), 1);
    assert_eq!(m.cases[1].exprs.len(), 1);
    assert!(matches!(
        m.cases[1].block.tree[0].node,
        StmtNode::Fallthrough(_)
    ));
    let default = m.default.as_ref().expect("default arm");
    assert!(default.exprs.is_empty());
    // Arms link in source order; the last one falls through to the default.
    assert_eq!(m.cases[0].next, Some(1));
    assert_eq!(m.cases[1].next, Some(m.cases.len()));
}

#[test]
fn match_without_expression() {
    let stmts = body_stmts("match {\ncase a:\n\trun()\n}");
    let StmtNode::Match(m) = &stmts[0].node else {
        panic!("match expected")
    };
    assert!(m.expr.tokens.is_empty());
    assert_eq!(m.cases.len(), 1);
}

#[test]
fn duplicate_default_is_reported() {
    let out = build_src("fn main() {\nmatch x {\ndefault:\n\ta()\ndefault:\n\tb()\n}\n}");
    assert!(out.errors.iter().any(|e| e.code == DiagCode::InvalidSyntax));
}

#[test]
fn labels_goto_break_continue() {
    let stmts = body_stmts("top: x = 1\ngoto top");
    assert_eq!(stmts.len(), 3);
    let StmtNode::Label(label) = &stmts[0].node else {
        panic!("label expected")
    };
    assert_eq!(label.label, "top");
    assert!(matches!(stmts[1].node, StmtNode::Assign(_)));
    let StmtNode::Goto(goto) = &stmts[2].node else {
        panic!("goto expected")
    };
    assert_eq!(goto.label, "top");

    let stmts = body_stmts("outer: iter {\nbreak outer\n}");
    let StmtNode::Iter(iter) = &stmts[1].node else {
        panic!("iter expected")
    };
    let StmtNode::Break(br) = &iter.block.tree[0].node else {
        panic!("break expected")
    };
    assert_eq!(br.label.as_ref().expect("label").text, "outer");

    let StmtNode::Continue(cont) = single_stmt("continue") else {
        panic!("continue expected")
    };
    assert!(cont.loop_label.is_none());
}

#[test]
fn goto_without_label_is_reported() {
    let out = build_src("fn main() {\ngoto\n}");
    assert!(out.errors.iter().any(|e| e.code == DiagCode::MissingGotoLabel));
}

#[test]
fn concurrent_call() {
    let StmtNode::ConcurrentCall(cc) = single_stmt("co run()") else {
        panic!("co expected")
    };
    assert_eq!(cc.token.text, "co");
    assert!(!cc.expr.tokens.is_empty());

    let out = build_src("fn main() {\nco x\n}");
    assert!(out.errors.iter().any(|e| e.code == DiagCode::ExprNotFuncCall));
}

#[test]
fn nested_and_unsafe_blocks() {
    let StmtNode::Block(block) = single_stmt("{ run() }") else {
        panic!("block expected")
    };
    assert!(!block.is_unsafe);
    assert_eq!(block.tree.len(), 1);

    let StmtNode::Block(block) = single_stmt("unsafe { run() }") else {
        panic!("unsafe block expected")
    };
    assert!(block.is_unsafe);
}

#[test]
fn local_type_alias() {
    let StmtNode::TypeAlias(alias) = single_stmt("type Local: int") else {
        panic!("alias expected")
    };
    assert_eq!(alias.id, "Local");
    assert_eq!(alias.ty.kind, "int");
}

#[test]
fn comment_statement() {
    let StmtNode::Comment(c) = single_stmt("// inner note") else {
        panic!("comment expected")
    };
    assert_eq!(c.content, "inner note");
}

#[test]
fn statement_terminator_flag() {
    let out = build_clean("fn main() {\na = 1;\nb = 2\n}");
    let body = fn_body(&out);
    assert_eq!(body.tree.len(), 2);
    assert!(body.tree[0].with_terminator);
    assert!(!body.tree[1].with_terminator);
}

#[test]
fn method_call_receiver_forms() {
    let StmtNode::Expr(es) = single_stmt("self.close()") else {
        panic!("expr statement expected")
    };
    assert_eq!(es.expr.tokens[0].text, "self");

    let StmtNode::Expr(es) = single_stmt("cpp.exit(1)") else {
        panic!("expr statement expected")
    };
    assert_eq!(es.expr.tokens[0].text, "cpp");
}
