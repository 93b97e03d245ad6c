use crate::Builder;
use quill_ast::{Type, TypeId, TypeTag};
use quill_diagnostic::Diagnostic;
use quill_lex::{SourceFile, Token};
use std::sync::Arc;

fn toks(source: &str) -> Vec<Token> {
    let file = Arc::new(SourceFile::new("<test>"));
    let (tokens, errors) = quill_lex::lex(source, &file);
    assert!(errors.is_empty(), "lex errors in test input: {errors:?}");
    tokens
}

fn parse_type(source: &str) -> (Type, bool, Vec<Diagnostic>) {
    let tokens = toks(source);
    let mut b = Builder::new(Vec::new());
    let mut i = 0usize;
    let (t, ok) = b.data_type(&tokens, &mut i, true, true);
    (t, ok, b.errors)
}

fn kind_of(source: &str) -> String {
    let (t, ok, errs) = parse_type(source);
    assert!(ok, "type {source:?} did not parse: {errs:?}");
    assert!(errs.is_empty(), "type {source:?} reported: {errs:?}");
    t.kind
}

#[test]
fn primitives() {
    let (t, ok, _) = parse_type("u32");
    assert!(ok);
    assert_eq!(t.id, TypeId::U32);
    assert_eq!(t.kind, "u32");
}

#[test]
fn named_type() {
    let (t, ok, _) = parse_type("Person");
    assert!(ok);
    assert_eq!(t.id, TypeId::Id);
    assert_eq!(t.kind, "Person");
    assert_eq!(t.token.text, "Person");
}

#[test]
fn pointer_and_reference_prefixes() {
    assert_eq!(kind_of("*int"), "*int");
    assert_eq!(kind_of("&Person"), "&Person");
    assert_eq!(kind_of("&&Person"), "&&Person");
    assert_eq!(kind_of("*&int"), "*&int");
}

#[test]
fn slice_type() {
    let (t, ok, _) = parse_type("[]int");
    assert!(ok);
    assert_eq!(t.id, TypeId::Slice);
    assert_eq!(t.kind, "[]int");
    assert_eq!(t.component.as_ref().unwrap().id, TypeId::Int);
}

#[test]
fn fixed_array_type() {
    let (t, ok, _) = parse_type("[4]str");
    assert!(ok);
    assert_eq!(t.id, TypeId::Array);
    assert_eq!(t.kind, "[...]str");
    assert!(!t.size.auto_sized);
    assert_eq!(t.size.expr.tokens[0].text, "4");
    assert_eq!(t.component.as_ref().unwrap().id, TypeId::Str);
}

#[test]
fn auto_sized_array_type() {
    let (t, ok, _) = parse_type("[...]int");
    assert!(ok);
    assert_eq!(t.id, TypeId::Array);
    assert!(t.size.auto_sized);
    assert_eq!(t.size.expr.tokens[0].text, "...");
}

#[test]
fn map_type() {
    let (t, ok, _) = parse_type("[int:str]");
    assert!(ok);
    assert_eq!(t.id, TypeId::Map);
    assert_eq!(t.kind, "[int:str]");
    let TypeTag::Map(key, value) = &t.tag else {
        panic!("map tag expected")
    };
    assert_eq!(key.id, TypeId::Int);
    assert_eq!(value.id, TypeId::Str);
}

#[test]
fn generic_arguments() {
    let (t, ok, _) = parse_type("MyBox[int,str]");
    assert!(ok);
    assert_eq!(t.kind, "MyBox[int,str]");
    let TypeTag::Generics(args) = &t.tag else {
        panic!("generics tag expected")
    };
    assert_eq!(args.len(), 2);
    assert_eq!(args[0].kind, "int");
}

#[test]
fn namespaced_identifier() {
    let (t, ok, _) = parse_type("io::Reader");
    assert!(ok);
    assert_eq!(t.id, TypeId::Id);
    assert_eq!(t.kind, "io::Reader");
    assert_eq!(t.token.text, "Reader");
}

#[test]
fn foreign_linked_type() {
    let (t, ok, _) = parse_type("cpp.FILE");
    assert!(ok);
    assert!(t.cpp_linked);
    assert_eq!(t.kind, "FILE");
    assert_eq!(t.token.text, "FILE");
}

#[test]
fn function_type() {
    let (t, ok, _) = parse_type("fn(int, str): bool");
    assert!(ok);
    assert_eq!(t.id, TypeId::Fn);
    assert_eq!(t.kind, "fn(int,str):bool");
    let TypeTag::Fn(f) = &t.tag else {
        panic!("fn tag expected")
    };
    assert_eq!(f.params.len(), 2);
    assert_eq!(f.ret.ty.kind, "bool");
}

#[test]
fn unsafe_types() {
    let (t, ok, _) = parse_type("unsafe");
    assert!(ok);
    assert_eq!(t.id, TypeId::Unsafe);

    let (t, ok, _) = parse_type("unsafe fn(int)");
    assert!(ok);
    assert_eq!(t.id, TypeId::Fn);
    let TypeTag::Fn(f) = &t.tag else {
        panic!("fn tag expected")
    };
    assert!(f.is_unsafe);
}

#[test]
fn original_records_the_written_form() {
    let (t, _, _) = parse_type("MyBox[int]");
    let original = t.original.as_ref().unwrap();
    assert_eq!(original.kind, t.kind);
}

#[test]
fn kind_round_trips() {
    // Re-parsing a printed kind yields an equal kind.
    for source in [
        "int",
        "[]int",
        "[...]f64",
        "[int:str]",
        "MyBox[int,str]",
        "*&Person",
        "fn(int,...str):bool",
        "io::Reader",
    ] {
        let first = kind_of(source);
        let second = kind_of(&first);
        assert_eq!(first, second, "kind of {source:?} did not round-trip");
    }
}

#[test]
fn garbage_reports_invalid_type() {
    let (_, ok, errs) = parse_type("+");
    assert!(!ok);
    assert!(!errs.is_empty());
}
