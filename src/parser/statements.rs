//! Statement parsing implementation
//!
//! This module handles the program body and every statement form:
//!
//! - Assignments: `x = expr;`
//! - Loops: `WHILE condition { ... }` and `DO { ... } WHILE condition`
//! - `SWITCH`, which is reserved and rejected
//!
//! # Grammar
//!
//! ```text
//! body        ::= "{" stmt+ "}"
//! stmt        ::= assign_stmt | while_stmt | do_stmt | switch_stmt
//! assign_stmt ::= identifier "=" expr ";"
//! while_stmt  ::= "WHILE" condition body
//! do_stmt     ::= "DO" body "WHILE" condition
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

/// FIRST(stmt)
fn starts_statement(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Id | TokenKind::While | TokenKind::Do | TokenKind::Switch
    )
}

impl Parser {
    /// `{ stmt+ }`; each body counts as one nesting level
    pub(crate) fn parse_body(&mut self) -> Result<Body, ParseError> {
        self.nested("body", Self::body_rule)
    }

    fn body_rule(&mut self) -> Result<Body, ParseError> {
        self.expect(TokenKind::LBrace, "body", "LBRACE expected")?;
        let statements = self.parse_stmt_list()?;
        self.expect(TokenKind::RBrace, "body", "RBRACE expected")?;
        Ok(Body { statements })
    }

    /// One or more statements; the first token outside FIRST(stmt) is left
    /// for the enclosing body.
    pub(crate) fn parse_stmt_list(&mut self) -> Result<Vec<Statement>, ParseError> {
        if !starts_statement(self.peek_kind()?) {
            return self.syntax_error("stmt_list", "ID, WHILE, DO or SWITCH expected");
        }

        let mut statements = Vec::new();
        loop {
            statements.push(self.parse_stmt()?);
            if !starts_statement(self.peek_kind()?) {
                break;
            }
        }
        Ok(statements)
    }

    pub(crate) fn parse_stmt(&mut self) -> Result<Statement, ParseError> {
        let token = self.next_token();
        self.unget()?;
        match token.kind {
            TokenKind::Id => self.parse_assign_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::Do => self.parse_do_stmt(),
            TokenKind::Switch => self.parse_switch_stmt(),
            _ => self.syntax_error("stmt", "ID, WHILE, DO or SWITCH expected"),
        }
    }

    pub(crate) fn parse_assign_stmt(&mut self) -> Result<Statement, ParseError> {
        let target = self.expect(TokenKind::Id, "assign_stmt", "ID expected")?;
        self.expect(TokenKind::Equal, "assign_stmt", "EQUAL expected")?;
        let expr = self.parse_expr()?;
        self.expect(TokenKind::Semicolon, "assign_stmt", "SEMICOLON expected")?;

        Ok(Statement::Assign {
            target: target.lexeme,
            expr,
            line: target.line,
        })
    }

    pub(crate) fn parse_while_stmt(&mut self) -> Result<Statement, ParseError> {
        self.expect(TokenKind::While, "while_stmt", "WHILE expected")?;
        let condition = self.parse_condition()?;
        let body = self.parse_body()?;
        Ok(Statement::While { condition, body })
    }

    /// `DO body WHILE condition`; no terminating semicolon
    pub(crate) fn parse_do_stmt(&mut self) -> Result<Statement, ParseError> {
        self.expect(TokenKind::Do, "do_stmt", "DO expected")?;
        let body = self.parse_body()?;
        self.expect(TokenKind::While, "do_stmt", "WHILE expected")?;
        let condition = self.parse_condition()?;
        Ok(Statement::DoWhile { body, condition })
    }

    /// `SWITCH` is a reserved construct with no grammar yet.
    pub(crate) fn parse_switch_stmt(&mut self) -> Result<Statement, ParseError> {
        self.expect(TokenKind::Switch, "switch_stmt", "SWITCH expected")?;
        self.syntax_error("switch_stmt", "SWITCH statements are not supported")
    }
}
