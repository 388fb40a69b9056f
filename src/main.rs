//! clite - command-line interface.
//!
//! Runs a clite program and prints its result and final global variables,
//! or stops after an earlier stage to show tokens, the parse tree or the
//! reconstructed source.

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clite::Error;
use clite::interpreter::{DEFAULT_MAX_CALL_DEPTH, InterpreterConfig, Value};
use clite::lexer::lex;

/// clite - run programs written in a small C-like language
#[derive(Parser, Debug)]
#[command(name = "clite")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input source file
    #[arg(value_name = "FILE", required_unless_present = "eval")]
    input: Option<PathBuf>,

    /// Program text to run instead of a file
    #[arg(short, long, value_name = "SOURCE", conflicts_with = "input")]
    eval: Option<String>,

    /// Only run the lexer and print tokens
    #[arg(long)]
    tokens: bool,

    /// Print the parse tree
    #[arg(long)]
    tree: bool,

    /// Print the source reconstructed from the parse tree
    #[arg(long)]
    source: bool,

    /// Parse and analyze without running, then list every scope
    #[arg(long)]
    check: bool,

    /// Maximum depth of nested function calls
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_call_depth: usize,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let (name, source) = match (&args.eval, &args.input) {
        (Some(text), _) => ("<eval>".to_string(), text.clone()),
        (None, Some(path)) => match fs::read_to_string(path) {
            Ok(s) => (path.display().to_string(), s),
            Err(e) => {
                eprintln!("Error reading '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        (None, None) => {
            eprintln!("no input given");
            return ExitCode::FAILURE;
        }
    };

    log::info!("running {} ({} bytes)", name, source.len());

    match execute(&args, &source) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let (line, column) = err.line_col(&source);
            eprintln!("{name}:{line}:{column}: {err}");
            ExitCode::FAILURE
        }
    }
}

fn execute(args: &Args, source: &str) -> Result<(), Error> {
    if args.tokens {
        for token in lex(source) {
            println!(
                "{:4}..{:<4} {:20} {:?}",
                token.span.start,
                token.span.end,
                format!("{:?}", token.kind),
                token.text
            );
        }
        return Ok(());
    }

    if args.tree || args.source {
        let program = clite::parser::parse(source)?;
        if args.tree {
            print!("{}", program.dump());
        }
        if args.source {
            print!("{}", program.to_source());
        }
        return Ok(());
    }

    if args.check {
        let typed = clite::check(source)?;
        log::info!("{} scopes", typed.symbols.scope_count());
        print!("{}", typed.symbols.render());
        return Ok(());
    }

    let config = InterpreterConfig {
        max_call_depth: args.max_call_depth,
    };
    let execution = clite::run_with_config(source, config)?;

    if execution.result != Value::Void {
        println!("result = {}", execution.result);
    }
    for (name, value) in &execution.globals {
        println!("{name} = {value}");
    }
    Ok(())
}
