use super::*;
use quill_lex::SourceFile;
use std::sync::Arc;

fn toks(source: &str) -> Vec<Token> {
    let file = Arc::new(SourceFile::new("<test>"));
    let (tokens, errors) = quill_lex::lex(source, &file);
    assert!(errors.is_empty(), "lex errors in test input: {errors:?}");
    tokens
}

#[test]
fn semicolon_splits_at_depth_zero() {
    let tokens = toks("a = 1; b = 2");
    let (pos, with_term) = next_statement_pos(&tokens, 0);
    assert!(with_term);
    // `a = 1 ;` is four tokens; pos is one past the terminator.
    assert_eq!(pos, 4);
    assert_eq!(tokens[pos].text, "b");
}

#[test]
fn semicolon_inside_braces_does_not_split() {
    let tokens = toks("fn f() { ret 1; }");
    let (pos, with_term) = next_statement_pos(&tokens, 0);
    assert_eq!(pos, tokens.len());
    assert!(!with_term);
}

#[test]
fn row_break_splits() {
    let tokens = toks("use std::io\nuse std::os");
    let (pos, with_term) = next_statement_pos(&tokens, 0);
    assert!(!with_term);
    assert_eq!(tokens[pos].id, TokenId::Use);
}

#[test]
fn row_break_inside_parens_does_not_split() {
    let tokens = toks("f(a,\n  b)");
    let (pos, _) = next_statement_pos(&tokens, 0);
    assert_eq!(pos, tokens.len());
}

#[test]
fn statement_slices_partition_the_input() {
    // Repeated next-statement cuts cover the stream without overlap.
    let tokens = toks("use std::io\nfn main() { x = 1; y = 2 }\nenum E { A, B }");
    let mut pos = 0usize;
    let mut covered = 0usize;
    while pos < tokens.len() {
        let start = pos;
        let (next, _) = next_statement_pos(&tokens, pos);
        assert!(next > start, "cursor must make progress");
        covered += next - start;
        pos = next;
    }
    assert_eq!(covered, tokens.len());
}

#[test]
fn cursor_skips_lone_semicolons_and_strips_terminators() {
    let mut cursor = Cursor::new(toks("a = 1;\n;\nb = 2"));
    let first = cursor.next_statement();
    assert_eq!(
        first.iter().map(|t| t.text.as_str()).collect::<Vec<_>>(),
        vec!["a", "=", "1"]
    );
    let second = cursor.next_statement();
    assert_eq!(
        second.iter().map(|t| t.text.as_str()).collect::<Vec<_>>(),
        vec!["b", "=", "2"]
    );
    assert!(cursor.ended());
    assert!(cursor.next_statement().is_empty());
}

#[test]
fn trailing_semicolon_at_end_of_stream() {
    let mut cursor = Cursor::new(toks("ret 5;"));
    let stmt = cursor.next_statement();
    assert_eq!(stmt.last().unwrap().text, "5");
    assert!(cursor.ended());
    assert!(cursor.next_statement().is_empty());
}

#[test]
fn requeue_prepends_at_position() {
    let mut cursor = Cursor::new(toks("a\nb"));
    let first = cursor.next_statement();
    assert_eq!(first[0].text, "a");
    cursor.requeue(first);
    let again = cursor.next_statement();
    assert_eq!(again[0].text, "a");
    let second = cursor.next_statement();
    assert_eq!(second[0].text, "b");
}
