use std::{
    fs::read_to_string,
    io::{self, Read},
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};

use clap::Parser;
use monkey_parser::{
    lexer::lexer::tokenize, parser::parser::parse_with_errors, render_diagnostic,
};
use tracing::{error, info, warn, Level};

/// Lexes and parses a source file, printing either the canonical rendering
/// of every statement or the diagnostics.
#[derive(Parser)]
#[command(name = "monkey")]
#[command(version = "0.1.0")]
#[command(about = "Parse source files and print their canonical form", long_about = None)]
struct Cli {
    /// Input file, `-` for stdin
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Print the token stream instead of parsing
    #[arg(long)]
    tokens: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let (file_name, source) = match read_input(&cli.input) {
        Ok(source) => (cli.input.to_string_lossy().into_owned(), source),
        Err(err) => {
            error!("failed to read {}: {}", cli.input.display(), err);
            eprintln!("Error: failed to read {}: {}", cli.input.display(), err);
            return ExitCode::from(2);
        }
    };

    let start = Instant::now();

    if cli.tokens {
        for token in tokenize(&source) {
            println!("{}", token);
        }
        info!("Tokenized in {:?}", start.elapsed());
        return ExitCode::SUCCESS;
    }

    let (program, errors) = parse_with_errors(&source);
    info!("Parsed in {:?}", start.elapsed());

    if !errors.is_empty() {
        for error in &errors {
            eprint!("{}", render_diagnostic(error, &source, &file_name));
        }
        return ExitCode::from(1);
    }

    if program.is_empty() {
        warn!("{} contains no statements", file_name);
    }

    for stmt in &program.statements {
        println!("{}", stmt);
    }

    ExitCode::SUCCESS
}

fn read_input(path: &Path) -> io::Result<String> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        return Ok(source);
    }

    read_to_string(path)
}
