use std::{path::PathBuf, process::ExitCode, time::Instant};

use ajs_lexer::{
    display_error,
    errors::errors::ErrorImpl,
    init_tracing,
    lexer::{lexer::tokenize_with, rules::RuleTable},
    listing::listing::{read_source, render_listing, write_listing, ListingOptions},
};
use clap::Parser as ClapParser;

#[derive(ClapParser)]
#[command(author, version, about = "AJS Lexer")]
struct Cli {
    /// Source file to tokenize
    input: PathBuf,
    /// Directory the `.lexer` listing is written to
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,
    /// Also print the listing to stdout
    #[arg(long)]
    print: bool,
    /// Print every token with its line
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let options = ListingOptions {
        output_dir: cli.output_dir,
        ..ListingOptions::default()
    };

    let source = match read_source(&cli.input) {
        Ok(source) => source,
        Err(error) => {
            display_error(&error, "", &cli.input);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    let table = RuleTable::new();
    let file_name = cli
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());

    let tokens = match tokenize_with(&table, &source, file_name) {
        Ok(tokens) => tokens,
        Err(error) => {
            if let ErrorImpl::IllegalCharacter { .. } = error.get_kind() {
                display_error(&error, &source, &cli.input);
            } else {
                display_error(&error, "", &cli.input);
            }
            return ExitCode::FAILURE;
        }
    };

    println!("Tokenized in {:?}", start.elapsed());

    if cli.debug {
        for token in &tokens {
            println!("{} @{}", token, token.line);
        }
    }

    if cli.print {
        println!("{}", render_listing(&tokens));
    }

    match write_listing(&tokens, &cli.input, &options) {
        Ok(path) => {
            println!("Wrote {} tokens to {}", tokens.len(), path.display());
            ExitCode::SUCCESS
        }
        Err(error) => {
            display_error(&error, "", &cli.input);
            ExitCode::FAILURE
        }
    }
}
