//! Demonstrate error handling for invalid template input.

use templatex::{Error, Parser, Scanner, tokenize_all};

fn main() {
    // Lexical errors in plain text are skipped and kept as diagnostics
    let mut parser = Parser::new(Scanner::new("{{ define \"page }}\n"));
    match parser.parse() {
        Ok(program) => {
            println!("Parsed {} comment(s)", program.declarations.len());
            for e in parser.diagnostics() {
                println!("  Skipped: {e}");
                println!("  Kind: {:?}", e.kind);
                println!("  Location: line {}, column {}", e.span.line, e.span.column);
            }
        }
        Err(e) => println!("Error: {e}"),
    }

    println!();

    // Unterminated text literal inside a comment fails the parse
    match templatex::parse_str("{{ /* \"open */ }}") {
        Ok(_) => println!("Parsed OK (unexpected)"),
        Err(Error::Lex(e)) => {
            println!("Lex error: {e}");
        }
        Err(Error::Parse(e)) => {
            println!("Parse error: {e}");
        }
    }

    println!();

    // Number inside a comment
    match templatex::parse_str("{{ /* step 1 */ }}") {
        Ok(_) => println!("Parsed OK (unexpected)"),
        Err(Error::Lex(e)) => {
            println!("Lex error: {e}");
        }
        Err(Error::Parse(e)) => {
            println!("Parse error: {e}");
            println!("  Kind: {:?}", e.kind);
            println!("  Location: line {}, column {}", e.span.line, e.span.column);
        }
    }

    println!();

    // Collect every lexical error instead of stopping at the first
    let (tokens, errors) = tokenize_all("{{ #a }}\n{{ b ~ c }}\n{{ !d }}");
    println!("{} token(s), {} error(s)", tokens.len(), errors.len());
    for e in &errors {
        println!("  {e}");
    }
    for t in tokens.iter().filter(|t| t.kind == templatex::TokenKind::Error) {
        println!("  error token at {}: {}", t.span, t.lexeme);
    }
}
