//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Integer literals
//! - Operators and punctuation, including two-character operators
//! - Illegal characters
//! - End-of-input behaviour

use pretty_assertions::assert_eq;

use super::{
    lexer::{tokenize, Lexer},
    tokens::TokenKind,
};
use crate::Span;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).iter().map(|token| token.kind).collect()
}

#[test]
fn test_tokenize_keywords() {
    let tokens = tokenize("let fn true false if else return");

    assert_eq!(tokens[0].kind, TokenKind::Let);
    assert_eq!(tokens[1].kind, TokenKind::Fn);
    assert_eq!(tokens[2].kind, TokenKind::True);
    assert_eq!(tokens[3].kind, TokenKind::False);
    assert_eq!(tokens[4].kind, TokenKind::If);
    assert_eq!(tokens[5].kind, TokenKind::Else);
    assert_eq!(tokens[6].kind, TokenKind::Return);
    assert_eq!(tokens[7].kind, TokenKind::EOF);
    assert_eq!(tokens[6].literal, "return");
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo bar baz_123 _underscore CamelCase letter iffy");

    let expected = ["foo", "bar", "baz_123", "_underscore", "CamelCase", "letter", "iffy"];
    for (token, name) in tokens.iter().zip(expected) {
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.literal, name);
    }
    assert_eq!(tokens[7].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_integers() {
    let tokens = tokenize("42 0 838383 99999999999999999999999");

    assert_eq!(tokens[0].kind, TokenKind::Integer);
    assert_eq!(tokens[0].literal, "42");
    assert_eq!(tokens[1].literal, "0");
    assert_eq!(tokens[2].literal, "838383");
    // No range checking at this layer.
    assert_eq!(tokens[3].kind, TokenKind::Integer);
    assert_eq!(tokens[3].literal, "99999999999999999999999");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_digits_then_letters_split() {
    assert_eq!(
        kinds("5five"),
        vec![TokenKind::Integer, TokenKind::Identifier, TokenKind::EOF]
    );
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("= + - ! * / < > == !="),
        vec![
            TokenKind::Assignment,
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Not,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_two_character_operators_without_spaces() {
    let tokens = tokenize("a==b!=!c=d");

    let pairs: Vec<(TokenKind, &str)> = tokens
        .iter()
        .map(|token| (token.kind, token.literal.as_str()))
        .collect();

    assert_eq!(
        pairs,
        vec![
            (TokenKind::Identifier, "a"),
            (TokenKind::Equals, "=="),
            (TokenKind::Identifier, "b"),
            (TokenKind::NotEquals, "!="),
            (TokenKind::Not, "!"),
            (TokenKind::Identifier, "c"),
            (TokenKind::Assignment, "="),
            (TokenKind::Identifier, "d"),
            (TokenKind::EOF, ""),
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds("( ) { } , ;"),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_program() {
    let source = "let five = 5;
let add = fn(x, y) {
  x + y;
};
let result = add(five, 10);
if (5 < 10) {
\treturn true;
} else {
\treturn false;
}
10 == 10;
10 != 9;";

    let tokens = tokenize(source);
    let pairs: Vec<(TokenKind, &str)> = tokens
        .iter()
        .map(|token| (token.kind, token.literal.as_str()))
        .collect();

    assert_eq!(
        pairs,
        vec![
            (TokenKind::Let, "let"),
            (TokenKind::Identifier, "five"),
            (TokenKind::Assignment, "="),
            (TokenKind::Integer, "5"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::Let, "let"),
            (TokenKind::Identifier, "add"),
            (TokenKind::Assignment, "="),
            (TokenKind::Fn, "fn"),
            (TokenKind::OpenParen, "("),
            (TokenKind::Identifier, "x"),
            (TokenKind::Comma, ","),
            (TokenKind::Identifier, "y"),
            (TokenKind::CloseParen, ")"),
            (TokenKind::OpenCurly, "{"),
            (TokenKind::Identifier, "x"),
            (TokenKind::Plus, "+"),
            (TokenKind::Identifier, "y"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::CloseCurly, "}"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::Let, "let"),
            (TokenKind::Identifier, "result"),
            (TokenKind::Assignment, "="),
            (TokenKind::Identifier, "add"),
            (TokenKind::OpenParen, "("),
            (TokenKind::Identifier, "five"),
            (TokenKind::Comma, ","),
            (TokenKind::Integer, "10"),
            (TokenKind::CloseParen, ")"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::If, "if"),
            (TokenKind::OpenParen, "("),
            (TokenKind::Integer, "5"),
            (TokenKind::Less, "<"),
            (TokenKind::Integer, "10"),
            (TokenKind::CloseParen, ")"),
            (TokenKind::OpenCurly, "{"),
            (TokenKind::Return, "return"),
            (TokenKind::True, "true"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::CloseCurly, "}"),
            (TokenKind::Else, "else"),
            (TokenKind::OpenCurly, "{"),
            (TokenKind::Return, "return"),
            (TokenKind::False, "false"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::CloseCurly, "}"),
            (TokenKind::Integer, "10"),
            (TokenKind::Equals, "=="),
            (TokenKind::Integer, "10"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::Integer, "10"),
            (TokenKind::NotEquals, "!="),
            (TokenKind::Integer, "9"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::EOF, ""),
        ]
    );
}

#[test]
fn test_illegal_characters() {
    let tokens = tokenize("let a = @ # é;");

    assert_eq!(tokens[3].kind, TokenKind::Illegal);
    assert_eq!(tokens[3].literal, "@");
    assert_eq!(tokens[4].kind, TokenKind::Illegal);
    assert_eq!(tokens[4].literal, "#");
    assert_eq!(tokens[5].kind, TokenKind::Illegal);
    assert_eq!(tokens[5].literal, "é");
    assert_eq!(tokens[6].kind, TokenKind::Semicolon);
    assert_eq!(tokens[7].kind, TokenKind::EOF);
}

#[test]
fn test_unsupported_operators_are_illegal() {
    assert_eq!(
        kinds("a % b"),
        vec![
            TokenKind::Identifier,
            TokenKind::Illegal,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_empty_and_whitespace_only_input() {
    assert_eq!(kinds(""), vec![TokenKind::EOF]);
    assert_eq!(kinds(" \t\r\n  \n"), vec![TokenKind::EOF]);
}

#[test]
fn test_eof_is_idempotent() {
    let mut lexer = Lexer::new("x");

    assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
    for _ in 0..3 {
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::EOF);
        assert_eq!(token.literal, "");
    }
}

#[test]
fn test_token_spans() {
    let tokens = tokenize("let  ab == 10;");

    assert_eq!(tokens[0].span, Span::new(0, 3));
    assert_eq!(tokens[1].span, Span::new(5, 7));
    assert_eq!(tokens[2].span, Span::new(8, 10));
    assert_eq!(tokens[3].span, Span::new(11, 13));
    assert_eq!(tokens[4].span, Span::new(13, 14));
    assert_eq!(tokens[5].span, Span::new(14, 14));
}
