//! Scanner and early parser for double-brace template files.
//!
//! A pull-based [`Scanner`] turns template text into position-annotated
//! tokens one [`advance`](Scanner::advance) at a time, and a
//! recursive-descent [`Parser`] consumes them to build AST nodes.
//!
//! # Quick start
//!
//! ## Pull tokens
//!
//! ```
//! use templatex::{Scanner, TokenKind};
//!
//! let mut scanner = Scanner::new("{{ if .Age >= 18 }}");
//! let mut kinds = Vec::new();
//! loop {
//!     let token = scanner.advance().unwrap();
//!     if token.kind == TokenKind::Eof {
//!         break;
//!     }
//!     kinds.push(token.kind);
//! }
//! assert!(kinds.contains(&TokenKind::GreaterEqual));
//! ```
//!
//! ## Parse comments
//!
//! ```
//! use templatex::parse_str;
//!
//! let program = parse_str("{{ /* if else */ }}").unwrap();
//! let comment = program.comments().next().unwrap();
//! assert_eq!(comment.texts().collect::<Vec<_>>(), ["if", "else"]);
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod parser;
pub mod scanner;
pub mod source;
pub mod token;

pub use ast::{
    Comment, Declaration, Node, NodeKind, Outline, Program, Visitor, Word, WordCollector,
};
pub use parser::{ParseError, ParseErrorKind, Parser};
pub use scanner::{LexError, LexErrorKind, Scanner, tokenize, tokenize_all};
pub use source::{LoadError, LoadOptions, Source};
pub use token::{KEYWORDS, Span, Token, TokenKind, is_keyword};

/// Unified error type covering both scanning and parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A lexical error.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// A parser error.
    #[error("{0}")]
    Parse(#[from] ParseError),
}

impl Error {
    /// Where the error was detected.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Lex(e) => e.span,
            Self::Parse(e) => e.span,
        }
    }
}

/// Scan and parse a template string in one step.
pub fn parse_str(input: &str) -> Result<Program, Error> {
    Parser::new(Scanner::new(input)).parse()
}
