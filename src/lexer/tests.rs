//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric literals
//! - String literals with escape sequences
//! - Operators and punctuation (longest match first)
//! - Comments
//! - Error cases

use super::{lexer::tokenize, tokens::TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source, Some("test.js".to_string()))
        .unwrap()
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    let source = "var let const function return new import export default if else while throw typeof this null true false";
    let tokens = tokenize(source, Some("test.js".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Var);
    assert_eq!(tokens[1].kind, TokenKind::Let);
    assert_eq!(tokens[2].kind, TokenKind::Const);
    assert_eq!(tokens[3].kind, TokenKind::Function);
    assert_eq!(tokens[4].kind, TokenKind::Return);
    assert_eq!(tokens[5].kind, TokenKind::New);
    assert_eq!(tokens[6].kind, TokenKind::Import);
    assert_eq!(tokens[7].kind, TokenKind::Export);
    assert_eq!(tokens[8].kind, TokenKind::Default);
    assert_eq!(tokens[9].kind, TokenKind::If);
    assert_eq!(tokens[10].kind, TokenKind::Else);
    assert_eq!(tokens[11].kind, TokenKind::While);
    assert_eq!(tokens[12].kind, TokenKind::Throw);
    assert_eq!(tokens[13].kind, TokenKind::Typeof);
    assert_eq!(tokens[14].kind, TokenKind::This);
    assert_eq!(tokens[15].kind, TokenKind::Null);
    assert_eq!(tokens[16].kind, TokenKind::True);
    assert_eq!(tokens[17].kind, TokenKind::False);
    assert_eq!(tokens[18].kind, TokenKind::EOF);
}

#[test]
fn test_contextual_words_are_identifiers() {
    let tokens = tokenize("from as type", None).unwrap();

    assert!(tokens[..3].iter().all(|token| token.kind == TokenKind::Identifier));
    assert_eq!(tokens[0].value, "from");
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo $bar baz_123 _underscore CamelCase";
    let tokens = tokenize(source, Some("test.js".to_string())).unwrap();

    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "$bar");
    assert_eq!(tokens[2].value, "baz_123");
    assert_eq!(tokens[3].value, "_underscore");
    assert_eq!(tokens[4].value, "CamelCase");
    assert!(tokens[..5].iter().all(|token| token.kind == TokenKind::Identifier));
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 3.14 0 1e10", None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].value, "0");
    assert_eq!(tokens[3].value, "1e10");
}

#[test]
fn test_tokenize_strings_with_both_quotes() {
    let tokens = tokenize("'tcomb' \"tcomb-react\"", None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "tcomb");
    assert_eq!(tokens[1].kind, TokenKind::String);
    assert_eq!(tokens[1].value, "tcomb-react");
}

#[test]
fn test_tokenize_string_escapes() {
    let tokens = tokenize(r#"'it\'s\n' "tab\there" '\x41B'"#, None).unwrap();

    assert_eq!(tokens[0].value, "it's\n");
    assert_eq!(tokens[1].value, "tab\there");
    assert_eq!(tokens[2].value, "AB");
}

#[test]
fn test_string_span_covers_quotes() {
    let tokens = tokenize("'ab\\n'", None).unwrap();

    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[0].span.end.0, 6);
}

#[test]
fn test_longest_operator_wins() {
    assert_eq!(
        kinds("=== !== == != => = <= < >= >"),
        vec![
            TokenKind::StrictEquals,
            TokenKind::StrictNotEquals,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::FatArrow,
            TokenKind::Assignment,
            TokenKind::LessEquals,
            TokenKind::Less,
            TokenKind::GreaterEquals,
            TokenKind::Greater,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_annotation_punctuation() {
    assert_eq!(
        kinds("?Array<A|B&C>[]"),
        vec![
            TokenKind::Question,
            TokenKind::Identifier,
            TokenKind::Less,
            TokenKind::Identifier,
            TokenKind::Pipe,
            TokenKind::Identifier,
            TokenKind::Ampersand,
            TokenKind::Identifier,
            TokenKind::Greater,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_nested_generics_close_separately() {
    let tokens = tokenize("Array<Array<T>>", None).unwrap();

    assert_eq!(tokens[5].kind, TokenKind::Greater);
    assert_eq!(tokens[6].kind, TokenKind::Greater);
}

#[test]
fn test_comments_are_skipped() {
    let source = "a // line comment\n/* block\ncomment */ b";

    assert_eq!(
        kinds(source),
        vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::EOF]
    );
}

#[test]
fn test_division_is_not_a_comment() {
    assert_eq!(
        kinds("a / b /= c"),
        vec![
            TokenKind::Identifier,
            TokenKind::Slash,
            TokenKind::Identifier,
            TokenKind::SlashEquals,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_token_positions() {
    let tokens = tokenize("let x", None).unwrap();

    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[0].span.end.0, 3);
    assert_eq!(tokens[1].span.start.0, 4);
}

#[test]
fn test_unrecognised_token() {
    let error = tokenize("let x = #;", None).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 8);
}

#[test]
fn test_invalid_hex_escape() {
    let error = tokenize("'\\xZZ'", None).unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}
