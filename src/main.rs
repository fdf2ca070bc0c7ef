// declcheck: name-conflict checker for the toy language

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser as ClapParser, Subcommand};
use tracing_subscriber::EnvFilter;

use declcheck::constants::EXIT_IO_ERROR;
use declcheck::parser::lexer::Lexer;
use declcheck::parser::parse_source;
use declcheck::report::Transcript;
use declcheck::semantic::CheckPolicy;

#[derive(ClapParser)]
#[command(name = "declcheck")]
#[command(about = "Parse a toy-language program and check its declarations", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    check: CheckArgs,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse the input and report name conflicts (the default)
    Check(CheckArgs),
    /// Print one token per line
    Lex {
        /// Input file path, `-` or omitted for stdin
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Parse the input and print the tree
    Parse {
        /// Input file path, `-` or omitted for stdin
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
}

#[derive(Args)]
struct CheckArgs {
    /// Run every check instead of stopping at the first failure
    #[arg(long)]
    all_checks: bool,

    /// Input file path, `-` or omitted for stdin
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,
}

impl CheckArgs {
    fn policy(&self) -> CheckPolicy {
        if self.all_checks {
            CheckPolicy::RunAll
        } else {
            CheckPolicy::StopAtFirstFailure
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let outcome = match cli.command {
        Some(Commands::Check(args)) => check(&args),
        None => check(&cli.check),
        Some(Commands::Lex { file }) => lex(file.as_deref()),
        Some(Commands::Parse { file }) => parse(file.as_deref()),
    };

    match outcome {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(EXIT_IO_ERROR as u8)
        }
    }
}

/// Logs go to stderr; stdout carries only the report.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// `None` or `-` selects standard input.
fn input_path(file: Option<&Path>) -> Option<&Path> {
    file.filter(|path| *path != Path::new("-"))
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match input_path(file) {
        Some(path) => declcheck::read_source(path)
            .with_context(|| format!("failed to read file '{}'", path.display())),
        None => {
            let mut bytes = Vec::new();
            io::stdin()
                .read_to_end(&mut bytes)
                .context("failed to read standard input")?;
            Ok(declcheck::decode_source(bytes))
        }
    }
}

fn check(args: &CheckArgs) -> Result<u8> {
    let transcript = match input_path(args.file.as_deref()) {
        Some(path) => declcheck::check_file(path, args.policy())
            .with_context(|| format!("failed to read file '{}'", path.display()))?,
        None => declcheck::check_source(&read_input(None)?, args.policy()),
    };
    print!("{}", transcript);
    Ok(transcript.status().exit_code() as u8)
}

fn lex(file: Option<&Path>) -> Result<u8> {
    let source = read_input(file)?;
    for token in Lexer::new(&source).tokenize() {
        println!("{}", token);
    }
    Ok(0)
}

fn parse(file: Option<&Path>) -> Result<u8> {
    let source = read_input(file)?;
    match parse_source(&source) {
        Ok(program) => {
            print!("{}", program);
            Ok(0)
        }
        Err(err) => {
            let transcript = Transcript::syntax_error(&err);
            print!("{}", transcript);
            Ok(transcript.status().exit_code() as u8)
        }
    }
}
