//! End-to-end builder tests driving `lex` + `build` over literal source.

mod recovery;
mod stmts;

use crate::{BuildOutput, Builder};
use quill_ast::{Block, Node, Object, Statement, StmtNode};
use quill_lex::SourceFile;
use std::sync::Arc;

pub(crate) fn build_src(source: &str) -> BuildOutput {
    let file = Arc::new(SourceFile::new("<test>"));
    let (tokens, lex_errs) = quill_lex::lex(source, &file);
    assert!(lex_errs.is_empty(), "lex errors in test input: {lex_errs:?}");
    Builder::new(tokens).with_stdlib("std").build()
}

pub(crate) fn build_clean(source: &str) -> BuildOutput {
    let out = build_src(source);
    assert!(out.errors.is_empty(), "unexpected diagnostics: {:?}", out.errors);
    out
}

/// The single object of a one-declaration source.
pub(crate) fn only_object(out: &BuildOutput) -> &Object {
    assert_eq!(out.tree.len(), 1, "tree: {:?}", out.tree);
    &out.tree[0]
}

/// The body of the first function in the tree.
pub(crate) fn fn_body(out: &BuildOutput) -> &Block {
    for obj in &out.tree {
        if let Node::Fn(f) = &obj.node {
            return f.block.as_ref().expect("function has a body");
        }
    }
    panic!("no function in tree: {:?}", out.tree);
}

/// Build `fn main() {{ {body} }}` and return its statements.
pub(crate) fn body_stmts(body: &str) -> Vec<Statement> {
    let out = build_src(&format!("fn main() {{\n{body}\n}}"));
    assert!(out.errors.is_empty(), "unexpected diagnostics: {:?}", out.errors);
    fn_body(&out).tree.clone()
}

pub(crate) fn single_stmt(body: &str) -> StmtNode {
    let stmts = body_stmts(body);
    assert_eq!(stmts.len(), 1, "statements: {stmts:?}");
    stmts[0].node.clone()
}
