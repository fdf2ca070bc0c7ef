//! # Introduction
//!
//! declcheck is the front end of a small imperative toy language. It scans
//! source text, builds an AST by predictive recursive descent and runs a fixed
//! set of name-conflict checks over the declared identifiers.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Analyzer → Transcript
//! ```
//!
//! 1. [`parser`]: tokenises the source and builds an AST; the first
//!    unexpected token ends the run with a syntax error.
//! 2. [`semantic`]: collects the TYPE and VAR identifiers and reports error
//!    codes 0, 1, 2 and 4.
//! 3. [`report`]: the lines a run prints and its exit status.
//!
//! ## Language
//!
//! Declarations: `TYPE` and `VAR` sections of `ids : type ;` entries, with
//! `INT`, `REAL`, `STRING`, `BOOLEAN`, `LONG` or a declared name as the type.
//! Statements: assignment, `WHILE cond { ... }` and `DO { ... } WHILE cond`.
//! Expressions: `+ - * /` over integers, reals, identifiers and parentheses.

pub mod constants;
pub mod parser;
pub mod report;
pub mod semantic;

use report::Transcript;
use semantic::CheckPolicy;
use std::io;
use std::path::Path;

/// Parse and analyze `source`, returning the transcript of the run.
pub fn check_source(source: &str, policy: CheckPolicy) -> Transcript {
    match parser::parse_source(source) {
        Ok(program) => Transcript::analysis(&semantic::analyze(&program, policy)),
        Err(err) => {
            tracing::debug!(line = ?err.line(), %err, "parse failed");
            Transcript::syntax_error(&err)
        }
    }
}

/// Turn raw input bytes into source text.
///
/// Bytes that are not valid UTF-8 become U+FFFD, which the lexer scans as an
/// `ERROR` token. Such input only fails where the parser actually reaches it.
pub fn decode_source(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(source) => source,
        Err(err) => {
            tracing::warn!(
                valid_up_to = err.utf8_error().valid_up_to(),
                "input is not valid UTF-8"
            );
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    }
}

/// Read a source file as bytes and decode it with [`decode_source`].
pub fn read_source(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "read source");
    Ok(decode_source(bytes))
}

/// Read a source file and check it.
pub fn check_file(path: &Path, policy: CheckPolicy) -> io::Result<Transcript> {
    let source = read_source(path)?;
    Ok(check_source(&source, policy))
}
