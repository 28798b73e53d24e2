use std::fmt;
use std::str::Chars;

use crate::token::{self, Span, Token, TokenKind};

/// Lexeme of the [`TokenKind::Error`] token emitted for a lone `!`.
pub const BANG_WITHOUT_EQUALS: &str = "expected character = after !";

/// Classifies a lexical error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Input ended before the closing `"`.
    UnterminatedString,
    /// Character that cannot start any token.
    UnexpectedCharacter(char),
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedString => {
                write!(f, "unterminated string literal")
            }
            Self::UnexpectedCharacter(ch) => {
                write!(f, "unrecognized character: {ch:?}")
            }
        }
    }
}

/// Error produced while scanning.
///
/// The offending input has already been consumed when this is
/// returned, so calling [`Scanner::advance`] again resumes after it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", span.line, span.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

/// Scan `input` to the end and collect every token, EOF included.
///
/// # Errors
///
/// Returns the first `LexError` encountered.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let mut scanner = Scanner::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = scanner.advance()?.clone();
        let done = token.is_eof();
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

/// Like [`tokenize`], but keeps scanning past lexical errors and
/// returns them alongside the tokens that did scan.
#[must_use]
pub fn tokenize_all(input: &str) -> (Vec<Token>, Vec<LexError>) {
    let mut scanner = Scanner::new(input);
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    loop {
        match scanner.advance() {
            Ok(token) => {
                let token = token.clone();
                let done = token.is_eof();
                tokens.push(token);
                if done {
                    return (tokens, errors);
                }
            }
            Err(err) => errors.push(err),
        }
    }
}

/// Character reader with exactly one rune of push-back.
#[derive(Debug)]
struct Cursor<'src> {
    chars: Chars<'src>,
    pending: Option<char>,
    pos: Span,
    before: Span,
}

impl<'src> Cursor<'src> {
    fn new(input: &'src str) -> Self {
        let start = Span::new(1, 0);
        Self {
            chars: input.chars(),
            pending: None,
            pos: start,
            before: start,
        }
    }

    /// Position of the next rune to be read.
    const fn position(&self) -> Span {
        self.pos
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.pending.take().or_else(|| self.chars.next())?;
        self.before = self.pos;
        if ch == '\n' {
            self.pos.line += 1;
            self.pos.column = 0;
        } else {
            self.pos.column += 1;
        }
        Some(ch)
    }

    /// Undo the last `bump`. Only valid once per `bump`.
    fn put_back(&mut self, ch: char) {
        debug_assert!(self.pending.is_none(), "lookahead is one rune");
        self.pending = Some(ch);
        self.pos = self.before;
    }

    /// Consume the next rune only if it is `expected`.
    fn eat(&mut self, expected: char) -> bool {
        match self.bump() {
            Some(ch) if ch == expected => true,
            Some(ch) => {
                self.put_back(ch);
                false
            }
            None => false,
        }
    }
}

/// Pull-based tokenizer.
///
/// Each [`advance`](Self::advance) reads one token into the `current`
/// slot and moves the old one into `previous`. Nothing is read until
/// the first `advance`.
#[derive(Debug)]
pub struct Scanner<'src> {
    cursor: Cursor<'src>,
    current: Option<Token>,
    previous: Option<Token>,
}

impl<'src> Scanner<'src> {
    #[must_use]
    pub fn new(input: &'src str) -> Self {
        Self {
            cursor: Cursor::new(input),
            current: None,
            previous: None,
        }
    }

    /// The token read by the last successful `advance`.
    #[must_use]
    pub const fn current(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    /// The token that was current before the last successful `advance`.
    #[must_use]
    pub const fn previous(&self) -> Option<&Token> {
        self.previous.as_ref()
    }

    /// Read the next token and make it current.
    ///
    /// Once input is exhausted every call yields an EOF token at the
    /// same position.
    ///
    /// # Errors
    ///
    /// Returns `LexError` for an unterminated string literal or a
    /// character that starts no token. The slots are left untouched
    /// and scanning resumes after the bad input on the next call.
    pub fn advance(&mut self) -> Result<&Token, LexError> {
        match self.next_token() {
            Ok(token) => {
                log::trace!("scanned {token}");
                self.previous = self.current.take();
                let current: &Token = self.current.insert(token);
                Ok(current)
            }
            Err(err) => {
                log::debug!("{err}");
                Err(err)
            }
        }
    }

    fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        let start = self.cursor.position();
        let Some(ch) = self.cursor.bump() else {
            return Ok(Token::eof(start));
        };
        // ASCII digits only; other Unicode digits fall through to an error.
        if let Some(digit) = ch.to_digit(10) {
            return Ok(self.read_number(digit, start));
        }
        if ch.is_alphabetic() {
            return Ok(self.read_word(ch, start));
        }
        self.read_symbol(ch, start)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.cursor.bump() {
            if !ch.is_whitespace() {
                self.cursor.put_back(ch);
                break;
            }
        }
    }

    fn read_number(&mut self, first: u32, start: Span) -> Token {
        let mut value = u64::from(first);
        while let Some(ch) = self.cursor.bump() {
            let Some(digit) = ch.to_digit(10) else {
                self.cursor.put_back(ch);
                break;
            };
            value = value.wrapping_mul(10).wrapping_add(u64::from(digit));
        }
        Token::new(TokenKind::Number, value.to_string(), start)
    }

    fn read_word(&mut self, first: char, start: Span) -> Token {
        let mut text = String::from(first);
        while let Some(ch) = self.cursor.bump() {
            if ch.is_alphabetic() || ch == '_' {
                text.push(ch);
            } else {
                self.cursor.put_back(ch);
                break;
            }
        }
        let kind = if token::is_keyword(&text) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        Token::new(kind, text, start)
    }

    fn read_symbol(&mut self, ch: char, start: Span) -> Result<Token, LexError> {
        match ch {
            '"' => self.read_text(start),
            '=' => Ok(self.read_operator(start, TokenKind::Assign, TokenKind::Equal)),
            '<' => Ok(self.read_operator(start, TokenKind::Less, TokenKind::LessEqual)),
            '>' => Ok(self.read_operator(start, TokenKind::Greater, TokenKind::GreaterEqual)),
            '!' => {
                let token = if self.cursor.eat('=') {
                    Token::new(TokenKind::NotEqual, "!=", start)
                } else {
                    Token::new(TokenKind::Error, BANG_WITHOUT_EQUALS, start)
                };
                Ok(token)
            }
            _ => TokenKind::from_punct(ch)
                .map(|kind| Token::new(kind, ch, start))
                .ok_or(LexError {
                    kind: LexErrorKind::UnexpectedCharacter(ch),
                    span: start,
                }),
        }
    }

    /// `single` on its own, `double` when followed by `=`.
    fn read_operator(&mut self, start: Span, single: TokenKind, double: TokenKind) -> Token {
        let kind = if self.cursor.eat('=') { double } else { single };
        Token::new(kind, kind.symbol().unwrap_or_default(), start)
    }

    fn read_text(&mut self, start: Span) -> Result<Token, LexError> {
        let mut text = String::from('"');
        loop {
            let Some(ch) = self.cursor.bump() else {
                return Err(LexError {
                    kind: LexErrorKind::UnterminatedString,
                    span: start,
                });
            };
            text.push(ch);
            if ch == '"' {
                break;
            }
        }
        Ok(Token::new(TokenKind::Text, text, start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .expect("should tokenize")
            .iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn nothing_is_current_before_first_advance() {
        let scanner = Scanner::new("a");
        assert!(scanner.current().is_none());
        assert!(scanner.previous().is_none());
    }

    #[test]
    fn only_ascii_digits_start_numbers() {
        let mut scanner = Scanner::new("\u{663}");
        let err = scanner.advance().expect_err("arabic-indic three");
        assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter('\u{663}'));
        assert_eq!(err.span, Span::new(1, 0));
    }

    #[test]
    fn letter_numbers_scan_as_identifiers() {
        let tokens = tokenize("\u{216B}").expect("roman numeral twelve");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].lexeme, "\u{216B}");
        assert!(tokens[1].is_eof());
    }

    #[test]
    fn advance_shifts_current_into_previous() {
        let mut scanner = Scanner::new("a b");
        scanner.advance().expect("a");
        assert_eq!(scanner.current().map(|t| t.lexeme.as_str()), Some("a"));
        assert!(scanner.previous().is_none());

        scanner.advance().expect("b");
        assert_eq!(scanner.current().map(|t| t.lexeme.as_str()), Some("b"));
        assert_eq!(scanner.previous().map(|t| t.lexeme.as_str()), Some("a"));
    }

    #[test]
    fn cursor_put_back_restores_position() {
        let mut cursor = Cursor::new("a\nb");
        assert_eq!(cursor.bump(), Some('a'));
        assert_eq!(cursor.bump(), Some('\n'));
        assert_eq!(cursor.position(), Span::new(2, 0));
        cursor.put_back('\n');
        assert_eq!(cursor.position(), Span::new(1, 1));
        assert_eq!(cursor.bump(), Some('\n'));
        assert_eq!(cursor.bump(), Some('b'));
        assert_eq!(cursor.position(), Span::new(2, 1));
    }

    #[test]
    fn cursor_eat_leaves_mismatch() {
        let mut cursor = Cursor::new("x");
        assert!(!cursor.eat('='));
        assert_eq!(cursor.position(), Span::new(1, 0));
        assert_eq!(cursor.bump(), Some('x'));
        assert!(!cursor.eat('='));
    }

    #[test]
    fn punctuation() {
        assert_eq!(
            kinds(". , : $ @ ( ) [ ] { } | / *"),
            vec![
                TokenKind::Dot,
                TokenKind::Comma,
                TokenKind::Colon,
                TokenKind::Dollar,
                TokenKind::At,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Pipe,
                TokenKind::Slash,
                TokenKind::Star,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn operators_need_no_whitespace() {
        let tokens = tokenize("a<=b").expect("should tokenize");
        let lexemes: Vec<_> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, ["a", "<=", "b", "0"]);
    }

    #[test]
    fn greater_at_end_of_input_has_position() {
        let tokens = tokenize("a >").expect("should tokenize");
        assert_eq!(tokens[1].kind, TokenKind::Greater);
        assert_eq!(tokens[1].span, Span::new(1, 2));
        assert_eq!(tokens[2].span, Span::new(1, 3));
    }

    #[test]
    fn bang_at_end_of_input() {
        let tokens = tokenize("!").expect("should tokenize");
        assert_eq!(tokens[0].kind, TokenKind::Error);
        assert_eq!(tokens[0].lexeme, BANG_WITHOUT_EQUALS);
        assert!(tokens[1].is_eof());
    }

    #[test]
    fn identifier_stops_at_digit() {
        let tokens = tokenize("abc12").expect("should tokenize");
        assert_eq!(tokens[0].lexeme, "abc");
        assert_eq!(tokens[1].kind, TokenKind::Number);
        assert_eq!(tokens[1].lexeme, "12");
    }

    #[test]
    fn underscores_continue_an_identifier() {
        let tokens = tokenize("first_name").expect("should tokenize");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].lexeme, "first_name");
    }

    #[test]
    fn leading_underscore_is_unexpected() {
        let err = tokenize("_x").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter('_'));
    }

    #[test]
    fn text_keeps_quotes_and_backslashes() {
        let tokens = tokenize(r#""a \n b""#).expect("should tokenize");
        assert_eq!(tokens[0].kind, TokenKind::Text);
        assert_eq!(tokens[0].lexeme, r#""a \n b""#);
    }

    #[test]
    fn text_spanning_lines_moves_line_counter() {
        let tokens = tokenize("\"a\nb\" c").expect("should tokenize");
        assert_eq!(tokens[0].span, Span::new(1, 0));
        assert_eq!(tokens[1].span, Span::new(2, 3));
    }

    #[test]
    fn number_overflow_wraps() {
        let tokens = tokenize("18446744073709551616").expect("should tokenize");
        assert_eq!(tokens[0].lexeme, "0");
    }

    #[test]
    fn error_display_includes_location() {
        let err = tokenize("a\n  #").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unrecognized character: '#' at line 2, column 2"
        );
    }

    #[test]
    fn scanning_resumes_after_error() {
        let mut scanner = Scanner::new("a # b");
        scanner.advance().expect("a");
        assert!(scanner.advance().is_err());
        assert_eq!(scanner.current().map(|t| t.lexeme.as_str()), Some("a"));
        let tok = scanner.advance().expect("b");
        assert_eq!(tok.lexeme, "b");
        assert_eq!(tok.span, Span::new(1, 4));
    }

    #[test]
    fn tokenize_all_collects_every_error() {
        let (tokens, errors) = tokenize_all("# a ~ 1");
        let lexemes: Vec<_> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, ["a", "1", "0"]);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[1].kind, LexErrorKind::UnexpectedCharacter('~'));
        assert_eq!(errors[1].span, Span::new(1, 4));
    }
}
