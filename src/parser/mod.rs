//! Toy-language front end
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization with one token of pushback
//! - [`parse`]: The [`Parser`](parse::Parser) and [`ParseError`](parse::ParseError)
//! - `declarations`, `statements`, `expressions`: one method per nonterminal
//! - [`ast`]: AST node definitions
//! - [`printer`]: Source-like rendering of a parsed program
//!
//! # Language
//!
//! A program is an optional `TYPE` section, an optional `VAR` section and a
//! braced body of assignments, `WHILE` loops and `DO ... WHILE` loops.
//! `SWITCH` and `CASE` are reserved words with no statement form.
//!
//! # Parser Implementation
//!
//! Hand-written predictive recursive descent with a single token of lookahead.
//! No external parser generator dependencies.

pub mod ast;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
pub mod printer;
mod statements;

use ast::Program;
use parse::{ParseError, Parser};

/// Parse a complete program.
pub fn parse_source(source: &str) -> Result<Program, ParseError> {
    Parser::new(source).parse_program()
}
