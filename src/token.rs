use std::fmt;

/// Source location for error reporting.
///
/// `line` is 1-based. `column` counts the characters already consumed
/// on the line when the token started, so the first column is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Words that scan as [`TokenKind::Keyword`] instead of
/// [`TokenKind::Identifier`].
pub const KEYWORDS: [&str; 14] = [
    "if", "else", "for", "in", "or", "and", "var", "define", "template", "end", "false", "true",
    "with", "block",
];

/// Exact, case-sensitive membership test against [`KEYWORDS`].
#[must_use]
pub fn is_keyword(text: &str) -> bool {
    KEYWORDS.contains(&text)
}

/// Token kinds produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Double-quoted text literal, quotes included in the lexeme.
    Text,
    /// Letter/underscore run that is not a keyword.
    Identifier,
    /// Letter/underscore run found in [`KEYWORDS`].
    Keyword,
    /// Unsigned base-10 integer.
    Number,
    /// `.`
    Dot,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `$`
    Dollar,
    /// `@`
    At,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `|`
    Pipe,
    /// `/`
    Slash,
    /// `*`
    Star,
    /// `=`
    Assign,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// Malformed operator; the lexeme holds the message.
    Error,
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Fixed spelling for punctuation and operator kinds.
    #[must_use]
    pub const fn symbol(self) -> Option<&'static str> {
        let sym = match self {
            Self::Dot => ".",
            Self::Comma => ",",
            Self::Colon => ":",
            Self::Dollar => "$",
            Self::At => "@",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::Pipe => "|",
            Self::Slash => "/",
            Self::Star => "*",
            Self::Assign => "=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Text
            | Self::Identifier
            | Self::Keyword
            | Self::Number
            | Self::Error
            | Self::Eof => return None,
        };
        Some(sym)
    }

    /// Kind of a single-character punctuation mark.
    ///
    /// The first characters of two-character operators are not
    /// included; the scanner resolves those with one rune of lookahead.
    #[must_use]
    pub const fn from_punct(ch: char) -> Option<Self> {
        let kind = match ch {
            '.' => Self::Dot,
            ',' => Self::Comma,
            ':' => Self::Colon,
            '$' => Self::Dollar,
            '@' => Self::At,
            '(' => Self::LParen,
            ')' => Self::RParen,
            '[' => Self::LBracket,
            ']' => Self::RBracket,
            '{' => Self::LBrace,
            '}' => Self::RBrace,
            '|' => Self::Pipe,
            '/' => Self::Slash,
            '*' => Self::Star,
            _ => return None,
        };
        Some(kind)
    }

    /// True for the kinds a comment may contain.
    #[must_use]
    pub const fn is_word(self) -> bool {
        matches!(self, Self::Identifier | Self::Keyword)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Identifier => "identifier",
            Self::Keyword => "keyword",
            Self::Number => "number",
            Self::Error => "error",
            Self::Eof => "end of input",
            _ => return write!(f, "'{}'", self.symbol().unwrap_or_default()),
        };
        f.write_str(name)
    }
}

/// A single token with its kind, text, and source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    /// Terminal token. The lexeme is always `"0"`.
    #[must_use]
    pub fn eof(span: Span) -> Self {
        Self::new(TokenKind::Eof, "0", span)
    }

    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} at {}", self.kind, self.lexeme, self.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_membership_is_case_sensitive() {
        assert!(is_keyword("define"));
        assert!(is_keyword("block"));
        assert!(!is_keyword("Define"));
        assert!(!is_keyword("elseif"));
        assert!(!is_keyword(""));
    }

    #[test]
    fn punct_kinds_round_trip_through_symbol() {
        for ch in ".,:$@()[]{}|/*".chars() {
            let kind = TokenKind::from_punct(ch).expect("punctuation");
            assert_eq!(kind.symbol(), Some(ch.to_string().as_str()));
        }
        assert_eq!(TokenKind::from_punct('='), None);
        assert_eq!(TokenKind::from_punct('#'), None);
    }

    #[test]
    fn display_names() {
        assert_eq!(TokenKind::Star.to_string(), "'*'");
        assert_eq!(TokenKind::GreaterEqual.to_string(), "'>='");
        assert_eq!(TokenKind::Identifier.to_string(), "identifier");
        assert_eq!(TokenKind::Eof.to_string(), "end of input");
    }

    #[test]
    fn eof_lexeme() {
        let tok = Token::eof(Span::new(3, 7));
        assert!(tok.is_eof());
        assert_eq!(tok.lexeme, "0");
        assert_eq!(tok.to_string(), "end of input \"0\" at 3:7");
    }
}
