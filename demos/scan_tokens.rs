//! Pull tokens from a scanner one at a time.

use templatex::{Scanner, TokenKind};

fn main() {
    let input = "\
{{ define \"user\" }}
  {{ if .Age >= 18 and .Tags[0] != \"\" }}
    {{ /* adult user */ }}
  {{ end }}
{{ end }}";

    let mut scanner = Scanner::new(input);
    loop {
        let token = match scanner.advance() {
            Ok(t) => t,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };
        if token.kind == TokenKind::Eof {
            break;
        }
        println!(
            "{:>3}:{:<3} {:<14} {}",
            token.span.line,
            token.span.column,
            format!("{:?}", token.kind),
            token.lexeme
        );
    }
}
