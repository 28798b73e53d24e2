//! CLI tool to inspect and validate template files.

use std::process::ExitCode;

use templatex::{LoadOptions, Outline, Parser, Source, tokenize_all};

fn usage() {
    eprintln!("Usage: templatex <command> [--wrap] [files...]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  tokens    Print every token, reporting all lexical errors");
    eprintln!("  comments  Print the outline of each file's comments");
    eprintln!("  check     Check that file(s) parse, warning on skipped lexical errors");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --wrap    Wrap each file in a define/end pair named after it");
    eprintln!();
    eprintln!("Set RUST_LOG=debug (or trace) for scanner diagnostics.");
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        usage();
        return ExitCode::from(2);
    }

    let command = args[1].as_str();
    if !matches!(command, "tokens" | "comments" | "check") {
        eprintln!("Unknown command: {command}");
        return ExitCode::from(2);
    }

    let mut options = LoadOptions::new();
    let mut files = Vec::new();
    for arg in &args[2..] {
        if arg == "--wrap" {
            options = options.with_wrap_fragment(true);
        } else {
            files.push(arg.as_str());
        }
    }

    if files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    let mut had_error = false;

    for path in files {
        let source = match Source::load(path, &options) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{e}");
                had_error = true;
                continue;
            }
        };

        match command {
            "tokens" => {
                let (tokens, errors) = tokenize_all(&source.text);
                for token in &tokens {
                    println!(
                        "{}:{}\t{:?}\t{}",
                        token.span.line, token.span.column, token.kind, token.lexeme
                    );
                }
                for e in &errors {
                    eprintln!("{path}: {e}");
                }
                had_error |= !errors.is_empty();
            }
            "comments" => match Parser::new(source.scanner()).parse() {
                Ok(program) => {
                    println!("{path} ({})", source.name);
                    print!("{}", Outline::render(&program));
                }
                Err(e) => {
                    eprintln!("{path}: {e}");
                    had_error = true;
                }
            },
            _ => {
                let mut parser = Parser::new(source.scanner());
                match parser.parse() {
                    Ok(program) => {
                        for e in parser.diagnostics() {
                            eprintln!("{path}: warning: {e}");
                        }
                        let comments = program.declarations.len();
                        eprintln!("{path}: valid ({comments} comment(s))");
                    }
                    Err(e) => {
                        eprintln!("{path}: {e}");
                        had_error = true;
                    }
                }
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
