//! Error-recovery tests: the builder never aborts and keeps producing
//! best-effort nodes after a malformed construct.

use super::{build_src, build_clean};
use quill_ast::Node;
use quill_diagnostic::DiagCode;

#[test]
fn garbage_statement_does_not_stop_the_build() {
    let out = build_src("+ +\nfn ok() { }");
    assert!(out.errors.iter().any(|e| e.code == DiagCode::InvalidSyntax));
    assert_eq!(out.tree.len(), 1);
    let Node::Fn(f) = &out.tree[0].node else {
        panic!("fn expected")
    };
    assert_eq!(f.id, "ok");
}

#[test]
fn malformed_declaration_does_not_block_the_next_one() {
    let out = build_src("enum X\nfn ok() { }");
    assert!(!out.errors.is_empty());
    // The broken enum is reported; the following function still parses.
    assert!(out
        .tree
        .iter()
        .any(|o| matches!(&o.node, Node::Fn(f) if f.id == "ok")));
}

#[test]
fn missing_enum_body() {
    let out = build_src("enum Color: u8");
    assert!(out.errors.iter().any(|e| e.code == DiagCode::BodyNotExist));
}

#[test]
fn missing_struct_and_trait_bodies() {
    let out = build_src("struct S\ntrait T");
    // Both declarations are too short to carry a body.
    assert_eq!(
        out.errors
            .iter()
            .filter(|e| e.code == DiagCode::InvalidSyntax)
            .count(),
        2
    );
}

#[test]
fn impl_with_garbage_member() {
    let out = build_src("impl Foo {\nenum X { A }\nfn good(self) { }\n}");
    assert!(out.errors.iter().any(|e| e.code == DiagCode::InvalidSyntax));
    let Node::Impl(imp) = &out.tree[0].node else {
        panic!("impl expected")
    };
    // The valid method still lands after the rejected member.
    assert!(imp
        .tree
        .iter()
        .any(|o| matches!(&o.node, Node::Fn(f) if f.id == "good")));
}

#[test]
fn errors_accumulate_in_source_order() {
    let out = build_src("+ +\n+ +\n+ +");
    assert_eq!(out.errors.len(), 3);
    let rows: Vec<u32> = out.errors.iter().map(|e| e.row).collect();
    assert_eq!(rows, vec![1, 2, 3]);
}

#[test]
fn missing_variable_type_and_expression() {
    let out = build_src("cpp let x");
    assert!(out.errors.iter().any(|e| e.code == DiagCode::MissingType));

    let out = build_src("fn main() {\nlet x: = 5\n}");
    assert!(out.errors.iter().any(|e| e.code == DiagCode::MissingType));

    let out = build_src("fn main() {\nlet x = \n}");
    assert!(out.errors.iter().any(|e| e.code == DiagCode::MissingExpr));
}

#[test]
fn invalid_use_paths() {
    let out = build_src("use foo::bar");
    assert!(out.errors.iter().any(|e| e.code == DiagCode::InvalidSyntax));

    let out = build_src("use std::io::");
    assert!(out.errors.iter().any(|e| e.code == DiagCode::InvalidSyntax));
}

#[test]
fn builder_output_reports_errors() {
    assert!(!build_clean("fn main() { }").has_errors());
    assert!(build_src("+ +").has_errors());
}

#[test]
fn lone_trailing_semicolon_is_ignored() {
    let out = build_clean("fn main() { };");
    assert_eq!(out.tree.len(), 1);
}
