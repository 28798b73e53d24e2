#![allow(dead_code)]

use templatex::{Scanner, Token, TokenKind, tokenize};

pub fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input)
        .expect("tokenize failed")
        .iter()
        .map(|t| t.kind)
        .collect()
}

pub fn lexemes(input: &str) -> Vec<String> {
    tokenize(input)
        .expect("tokenize failed")
        .into_iter()
        .map(|t| t.lexeme)
        .collect()
}

/// Advance `n` times and return the token read last.
pub fn nth_token(input: &str, n: usize) -> Token {
    let mut scanner = Scanner::new(input);
    for _ in 1..n {
        scanner.advance().expect("advance failed");
    }
    scanner.advance().expect("advance failed").clone()
}
