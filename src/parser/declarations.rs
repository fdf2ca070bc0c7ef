//! Declaration parsing implementation
//!
//! This module handles the declaration part of a program:
//!
//! - The optional `TYPE` section
//! - The optional `VAR` section, which must follow the `TYPE` section
//! - Identifier lists and type names
//!
//! # Grammar
//!
//! ```text
//! decl              ::= [type_decl_section] [var_decl_section]
//! type_decl_section ::= "TYPE" type_decl+
//! var_decl_section  ::= "VAR" var_decl+
//! type_decl         ::= id_list ":" type_name ";"
//! var_decl          ::= id_list ":" type_name ";"
//! id_list           ::= identifier ("," id_list)?
//! type_name         ::= identifier | "INT" | "REAL" | "STRING" | "BOOLEAN" | "LONG"
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};
use tracing::debug;

impl Parser {
    /// Parse the declaration part. With neither section present the next
    /// token has to open the body.
    pub(crate) fn parse_decl(&mut self) -> Result<Decl, ParseError> {
        let token = self.next_token();
        match token.kind {
            TokenKind::Type => {
                self.unget()?;
                let type_section = self.parse_type_decl_section()?;
                let var_section = if self.peek_kind()? == TokenKind::Var {
                    Some(self.parse_var_decl_section()?)
                } else {
                    None
                };
                Ok(Decl {
                    type_section: Some(type_section),
                    var_section,
                })
            }
            TokenKind::Var => {
                self.unget()?;
                Ok(Decl {
                    type_section: None,
                    var_section: Some(self.parse_var_decl_section()?),
                })
            }
            TokenKind::LBrace => {
                self.unget()?;
                Ok(Decl::default())
            }
            _ => self.syntax_error("decl", "LBRACE expected"),
        }
    }

    pub(crate) fn parse_type_decl_section(&mut self) -> Result<TypeSection, ParseError> {
        self.expect(TokenKind::Type, "type_decl_section", "TYPE expected")?;
        let decls = self.parse_decl_list("type_decl_list", "type_decl")?;
        debug!(declarations = decls.len(), "parsed TYPE section");
        Ok(TypeSection { decls })
    }

    pub(crate) fn parse_var_decl_section(&mut self) -> Result<VarSection, ParseError> {
        self.expect(TokenKind::Var, "var_decl_section", "VAR expected")?;
        let decls = self.parse_decl_list("var_decl_list", "var_decl")?;
        debug!(declarations = decls.len(), "parsed VAR section");
        Ok(VarSection { decls })
    }

    /// One or more declarations; stops at the first token that is not an
    /// identifier and leaves it for the caller.
    fn parse_decl_list(
        &mut self,
        list: &'static str,
        item: &'static str,
    ) -> Result<Vec<Declaration>, ParseError> {
        if self.peek_kind()? != TokenKind::Id {
            return self.syntax_error(list, "ID expected");
        }

        let mut decls = Vec::new();
        loop {
            decls.push(self.parse_declaration(item)?);
            if self.peek_kind()? != TokenKind::Id {
                break;
            }
        }
        Ok(decls)
    }

    /// `id_list ':' type_name ';'`; `nonterminal` is `type_decl` or `var_decl`
    fn parse_declaration(&mut self, nonterminal: &'static str) -> Result<Declaration, ParseError> {
        let first = self.expect(TokenKind::Id, nonterminal, "ID expected")?;
        self.unget()?;

        let ids = self.parse_id_list()?;
        self.expect(TokenKind::Colon, nonterminal, "COLON expected")?;
        let type_name = self.parse_type_name()?;
        self.expect(TokenKind::Semicolon, nonterminal, "SEMICOLON expected")?;

        Ok(Declaration {
            ids,
            type_name,
            line: first.line,
        })
    }

    /// Comma-separated identifiers up to, but not including, the `:`
    pub(crate) fn parse_id_list(&mut self) -> Result<Vec<String>, ParseError> {
        let mut ids = Vec::new();
        loop {
            let id = self.expect(TokenKind::Id, "id_list", "ID expected")?;
            ids.push(id.lexeme);

            match self.next_token().kind {
                TokenKind::Comma => {}
                TokenKind::Colon => {
                    self.unget()?;
                    return Ok(ids);
                }
                _ => return self.syntax_error("id_list", "COMMA or COLON expected"),
            }
        }
    }

    pub(crate) fn parse_type_name(&mut self) -> Result<TypeName, ParseError> {
        let token = self.next_token();
        let type_name = match token.kind {
            TokenKind::Id => TypeName::Named(token.lexeme),
            TokenKind::Int => TypeName::Primitive(PrimitiveType::Int),
            TokenKind::Real => TypeName::Primitive(PrimitiveType::Real),
            TokenKind::String => TypeName::Primitive(PrimitiveType::String),
            TokenKind::Boolean => TypeName::Primitive(PrimitiveType::Boolean),
            TokenKind::Long => TypeName::Primitive(PrimitiveType::Long),
            _ => return self.syntax_error("type_name", "type name expected"),
        };
        Ok(type_name)
    }
}
