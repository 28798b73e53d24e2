use std::fmt;

use crate::Error;
use crate::ast::{Comment, Program, Word};
use crate::scanner::{LexError, Scanner};
use crate::token::{Span, Token, TokenKind};

const WORD_OR_CLOSE: &[TokenKind] = &[TokenKind::Identifier, TokenKind::Keyword, TokenKind::Star];

/// Classifies a parser error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The current token is not one the rule accepts here.
    UnexpectedToken {
        expected: &'static [TokenKind],
        found: TokenKind,
        lexeme: String,
    },
    /// A rule was entered before the scanner produced any token.
    /// Carries `Span::default()`, which no real token has.
    NotPositioned,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken {
                expected,
                found,
                lexeme,
            } => {
                write!(f, "expected ")?;
                for (i, kind) in expected.iter().enumerate() {
                    if i > 0 {
                        write!(f, " or ")?;
                    }
                    write!(f, "{kind}")?;
                }
                write!(f, ", found {found} {lexeme:?}")
            }
            Self::NotPositioned => {
                write!(f, "scanner not advanced before the first token")
            }
        }
    }
}

/// Error produced during parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", span.line, span.column)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    fn unexpected(expected: &'static [TokenKind], found: &Token) -> Self {
        Self {
            kind: ParseErrorKind::UnexpectedToken {
                expected,
                found: found.kind,
                lexeme: found.lexeme.clone(),
            },
            span: found.span,
        }
    }
}

/// Recursive-descent parser driven by a [`Scanner`].
///
/// Every rule expects `current` to sit on its first token and leaves
/// it on the token right after its last one.
///
/// Lexical errors met while skipping text outside a rule, or while
/// stepping past a rule's last token, do not fail the parse. They are
/// kept in [`diagnostics`](Self::diagnostics) in source order.
#[derive(Debug)]
pub struct Parser<'src> {
    scanner: Scanner<'src>,
    diagnostics: Vec<LexError>,
}

impl<'src> Parser<'src> {
    #[must_use]
    pub const fn new(scanner: Scanner<'src>) -> Self {
        Self {
            scanner,
            diagnostics: Vec::new(),
        }
    }

    #[must_use]
    pub const fn scanner(&self) -> &Scanner<'src> {
        &self.scanner
    }

    #[must_use]
    pub fn into_scanner(self) -> Scanner<'src> {
        self.scanner
    }

    /// Lexical errors recovered from so far.
    #[must_use]
    pub fn diagnostics(&self) -> &[LexError] {
        &self.diagnostics
    }

    /// Parse a whole document, collecting every `{{ /* ... */ }}`
    /// comment into a [`Program`]. Everything else is skipped, and
    /// lexical errors in skipped text land in `diagnostics`.
    ///
    /// Primes the scanner if nothing has been read yet.
    pub fn parse(&mut self) -> Result<Program, Error> {
        if self.scanner.current().is_none() {
            self.skip();
        }

        let mut program = Program::new();
        loop {
            let kind = self.current()?.kind;
            match kind {
                TokenKind::Eof => break,
                TokenKind::LBrace => {
                    self.skip();
                    if self.current()?.kind != TokenKind::LBrace {
                        continue;
                    }
                    self.skip();
                    if self.current()?.kind == TokenKind::Slash {
                        program.declarations.push(self.parse_comment()?.into());
                    }
                }
                _ => self.skip(),
            }
        }

        log::debug!(
            "parsed {} declaration(s), {} lexical diagnostic(s)",
            program.declarations.len(),
            self.diagnostics.len()
        );
        Ok(program)
    }

    /// `Comment := '/' '*' Word* '*' '/'` where
    /// `Word := identifier | keyword`.
    ///
    /// Lexical errors inside the comment fail the rule. Once the
    /// closing `/` matched the comment is complete, so an error in the
    /// input right after it goes to `diagnostics` instead.
    pub fn parse_comment(&mut self) -> Result<Comment, Error> {
        let open = self.expect(&[TokenKind::Slash])?;
        self.expect(&[TokenKind::Star])?;

        let mut words = Vec::new();
        loop {
            let token = self.current()?;
            if token.kind.is_word() {
                words.push(Word::new(token.lexeme.clone(), token.span));
                self.scanner.advance()?;
            } else if token.kind == TokenKind::Star {
                break;
            } else {
                return Err(ParseError::unexpected(WORD_OR_CLOSE, token).into());
            }
        }

        self.expect(&[TokenKind::Star])?;
        self.check(&[TokenKind::Slash])?;
        self.skip();

        log::debug!("comment at {} with {} word(s)", open.span, words.len());
        Ok(Comment {
            words,
            span: open.span,
        })
    }

    fn current(&self) -> Result<&Token, ParseError> {
        self.scanner.current().ok_or(ParseError {
            kind: ParseErrorKind::NotPositioned,
            span: Span::default(),
        })
    }

    /// Fail unless `current` has a kind in `expected`.
    fn check(&self, expected: &'static [TokenKind]) -> Result<&Token, ParseError> {
        let token = self.current()?;
        if expected.contains(&token.kind) {
            Ok(token)
        } else {
            Err(ParseError::unexpected(expected, token))
        }
    }

    /// Consume `current` if its kind is in `expected`.
    fn expect(&mut self, expected: &'static [TokenKind]) -> Result<Token, Error> {
        let token = self.check(expected)?.clone();
        self.scanner.advance()?;
        Ok(token)
    }

    /// Advance to the next token that scans, recording lexical errors
    /// on the way. Each error consumes input, so this reaches EOF.
    fn skip(&mut self) {
        while let Err(err) = self.scanner.advance() {
            log::debug!("skipped: {err}");
            self.diagnostics.push(err);
        }
    }
}
