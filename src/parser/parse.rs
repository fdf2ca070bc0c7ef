//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, token helpers, and the `program` entry point.
//!
//! # Parser Architecture
//!
//! Predictive recursive descent with one function per grammar nonterminal:
//! - This module: Parser struct, helper methods, and `program`
//! - `declarations`: `decl`, the TYPE/VAR sections, `id_list`, `type_name`
//! - `statements`: `body`, `stmt_list` and the statement forms
//! - `expressions`: `expr`, `term`, `factor`, `condition`, `primary`
//!
//! Each function decides on its production from the next token, pulling it
//! from the lexer and pushing it back when a callee has to see it again.
//! There is no backtracking and no recovery: the first unexpected token ends
//! the parse with a [`ParseError`].
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared lexer.

use crate::constants::MAX_NESTING_DEPTH;
use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use thiserror::Error;
use tracing::debug;

/// Parser error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Unexpected token in the given nonterminal
    #[error("Syntax error while parsing {nonterminal}. {expected} line {line}")]
    Syntax {
        nonterminal: &'static str,
        expected: &'static str,
        line: usize,
    },

    /// Pushback misuse inside the parser
    #[error(transparent)]
    Lexer(#[from] LexError),
}

impl ParseError {
    /// Line of a syntax error, `None` for internal errors
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::Syntax { line, .. } => Some(*line),
            ParseError::Lexer(_) => None,
        }
    }
}

/// Recursive descent parser for the toy language
pub struct Parser {
    pub(crate) lexer: Lexer,
    /// Active `expr`, `term`, `factor` and `body` frames
    depth: usize,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        Self {
            lexer: Lexer::new(source),
            depth: 0,
        }
    }

    /// Parse the entire program: `decl body`
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        match self.peek_kind()? {
            TokenKind::Type | TokenKind::Var | TokenKind::LBrace => {}
            _ => return self.syntax_error("program", "TYPE or VAR or LBRACE expected"),
        }

        let decl = self.parse_decl()?;
        let body = self.parse_body()?;

        debug!(statements = body.statements.len(), "parsed program");
        Ok(Program { decl, body })
    }

    // ===== Helper methods =====

    pub(crate) fn next_token(&mut self) -> Token {
        self.lexer.fetch()
    }

    /// Hand the token just fetched back to the lexer.
    pub(crate) fn unget(&mut self) -> Result<(), ParseError> {
        self.lexer.push_back()?;
        Ok(())
    }

    /// Kind of the next token, left in place for the callee.
    pub(crate) fn peek_kind(&mut self) -> Result<TokenKind, ParseError> {
        let kind = self.next_token().kind;
        self.unget()?;
        Ok(kind)
    }

    /// Fetch a token of the given kind or fail in `nonterminal`.
    pub(crate) fn expect(
        &mut self,
        kind: TokenKind,
        nonterminal: &'static str,
        expected: &'static str,
    ) -> Result<Token, ParseError> {
        let token = self.next_token();
        if token.kind == kind {
            Ok(token)
        } else {
            self.syntax_error(nonterminal, expected)
        }
    }

    /// Run `rule` one nesting level deeper, failing in `nonterminal` once
    /// `MAX_NESTING_DEPTH` levels are active.
    pub(crate) fn nested<T>(
        &mut self,
        nonterminal: &'static str,
        rule: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return self.syntax_error(nonterminal, "nesting too deep");
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    pub(crate) fn syntax_error<T>(
        &self,
        nonterminal: &'static str,
        expected: &'static str,
    ) -> Result<T, ParseError> {
        let line = self.lexer.line();
        debug!(nonterminal, expected, line, "syntax error");
        Err(ParseError::Syntax {
            nonterminal,
            expected,
            line,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<Program, ParseError> {
        Parser::new(source).parse_program()
    }

    fn syntax(nonterminal: &'static str, expected: &'static str, line: usize) -> ParseError {
        ParseError::Syntax {
            nonterminal,
            expected,
            line,
        }
    }

    #[test]
    fn test_parse_minimal_program() {
        let program = parse("{ x = 1; }").unwrap();

        assert_eq!(program.decl, Decl::default());
        assert_eq!(program.body.statements.len(), 1);
        match &program.body.statements[0] {
            Statement::Assign { target, expr, line } => {
                assert_eq!(target, "x");
                assert_eq!(*line, 1);
                assert_eq!(*expr, Expression::Primary(Primary::Int(1)));
            }
            other => panic!("Expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_both_sections() {
        let source = "TYPE t: INT; u, w: t;\nVAR x, y: t; z: REAL;\n{ x = 1; }";
        let program = parse(source).unwrap();

        let types = program.decl.type_section.expect("type section");
        assert_eq!(types.decls.len(), 2);
        assert_eq!(types.decls[0].ids, vec!["t"]);
        assert_eq!(
            types.decls[0].type_name,
            TypeName::Primitive(PrimitiveType::Int)
        );
        assert_eq!(types.decls[1].ids, vec!["u", "w"]);
        assert_eq!(types.decls[1].type_name, TypeName::Named("t".to_string()));

        let vars = program.decl.var_section.expect("var section");
        assert_eq!(vars.decls.len(), 2);
        assert_eq!(vars.decls[0].ids, vec!["x", "y"]);
        assert_eq!(vars.decls[0].line, 2);
        assert_eq!(
            vars.decls[1].type_name,
            TypeName::Primitive(PrimitiveType::Real)
        );
    }

    #[test]
    fn test_type_section_without_var_section() {
        let program = parse("TYPE t: LONG; { x = 1; }").unwrap();
        assert!(program.decl.type_section.is_some());
        assert!(program.decl.var_section.is_none());
    }

    #[test]
    fn test_var_section_only() {
        let program = parse("VAR s: STRING; b: BOOLEAN; { s = b; }").unwrap();
        assert!(program.decl.type_section.is_none());
        assert_eq!(program.decl.var_section.unwrap().decls.len(), 2);
    }

    #[test]
    fn test_duplicate_ids_kept() {
        let program = parse("TYPE a, a: INT; { x = 1; }").unwrap();
        let types = program.decl.type_section.unwrap();
        assert_eq!(types.decls[0].ids, vec!["a", "a"]);
    }

    #[test]
    fn test_bad_program_start() {
        assert_eq!(
            parse("x = 1;"),
            Err(syntax("program", "TYPE or VAR or LBRACE expected", 1))
        );
        assert_eq!(
            parse(""),
            Err(syntax("program", "TYPE or VAR or LBRACE expected", 1))
        );
    }

    #[test]
    fn test_empty_body_rejected() {
        assert_eq!(
            parse("{ }"),
            Err(syntax("stmt_list", "ID, WHILE, DO or SWITCH expected", 1))
        );
    }

    #[test]
    fn test_empty_type_section_rejected() {
        assert_eq!(
            parse("TYPE VAR x: INT; { x = 1; }"),
            Err(syntax("type_decl_list", "ID expected", 1))
        );
    }

    #[test]
    fn test_missing_semicolon_in_declaration() {
        assert_eq!(
            parse("VAR x: INT\n{ x = 1; }"),
            Err(syntax("var_decl", "SEMICOLON expected", 2))
        );
    }

    #[test]
    fn test_keyword_is_not_a_type_name() {
        assert_eq!(
            parse("VAR x: WHILE; { x = 1; }"),
            Err(syntax("type_name", "type name expected", 1))
        );
    }

    #[test]
    fn test_id_list_separator() {
        assert_eq!(
            parse("VAR x; y: INT; { x = 1; }"),
            Err(syntax("id_list", "COMMA or COLON expected", 1))
        );
        assert_eq!(
            parse("VAR x, : INT; { x = 1; }"),
            Err(syntax("id_list", "ID expected", 1))
        );
    }

    #[test]
    fn test_var_before_type_rejected() {
        // The TYPE section, when present, comes first
        assert_eq!(
            parse("VAR x: INT; TYPE t: INT; { x = 1; }"),
            Err(syntax("body", "LBRACE expected", 1))
        );
    }

    #[test]
    fn test_missing_closing_brace_at_end_of_input() {
        assert_eq!(
            parse("{ x = 1;\n"),
            Err(syntax("body", "RBRACE expected", 2))
        );
    }

    #[test]
    fn test_error_token_is_fatal() {
        assert_eq!(
            parse("VAR x: INT; { x = 1 # 2; }"),
            Err(syntax("term", "MULT or DIV expected", 1))
        );
    }

    #[test]
    fn test_trailing_input_ignored() {
        assert!(parse("{ x = 1; } trailing").is_ok());
    }

    #[test]
    fn test_error_display() {
        let err = parse("{\n\n}").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Syntax error while parsing stmt_list. ID, WHILE, DO or SWITCH expected line 3"
        );
        assert_eq!(err.line(), Some(3));
    }
}
