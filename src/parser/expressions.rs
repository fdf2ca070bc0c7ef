//! Expression parsing implementation
//!
//! This module handles arithmetic expressions and loop conditions.
//!
//! # Grammar
//!
//! ```text
//! expr      ::= term (("+" | "-") expr)?
//! term      ::= factor (("*" | "/") term)?
//! factor    ::= "(" expr ")" | int-lit | real-lit | identifier
//! condition ::= primary [relop primary]
//! primary   ::= int-lit | real-lit | identifier
//! ```
//!
//! # Associativity
//!
//! `expr` and `term` recurse on their right operand instead of looping, so
//! `1 - 2 - 3` builds `1 - (2 - 3)`. The tree shape is part of the AST
//! contract and must not be rebalanced here.
//!
//! # Depth
//!
//! Every `expr`, `term` and `factor` call counts against
//! [`MAX_NESTING_DEPTH`](crate::constants::MAX_NESTING_DEPTH), so long
//! operator chains and deep parentheses end in a syntax error rather than
//! exhausting the stack.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::{Token, TokenKind};
use crate::parser::parse::{ParseError, Parser};

/// FIRST(factor)
fn starts_factor(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Id | TokenKind::LParen | TokenKind::Num | TokenKind::RealNum
    )
}

impl Parser {
    pub(crate) fn parse_expr(&mut self) -> Result<Expression, ParseError> {
        self.nested("expr", Self::expr_rule)
    }

    fn expr_rule(&mut self) -> Result<Expression, ParseError> {
        if !starts_factor(self.peek_kind()?) {
            return self.syntax_error("expr", "ID, LPAREN, NUM, or REALNUM expected");
        }

        let term = self.parse_term()?;
        let op = match self.next_token().kind {
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Sub,
            TokenKind::Semicolon | TokenKind::Mult | TokenKind::Div | TokenKind::RParen => {
                self.unget()?;
                return Ok(term);
            }
            _ => return self.syntax_error("expr", "PLUS, MINUS, or SEMICOLON expected"),
        };

        let right = self.parse_expr()?;
        Ok(Expression::Binary {
            op,
            left: Box::new(term),
            right: Box::new(right),
        })
    }

    pub(crate) fn parse_term(&mut self) -> Result<Expression, ParseError> {
        self.nested("term", Self::term_rule)
    }

    fn term_rule(&mut self) -> Result<Expression, ParseError> {
        if !starts_factor(self.peek_kind()?) {
            return self.syntax_error("term", "ID, LPAREN, NUM, or REALNUM expected");
        }

        let factor = self.parse_factor()?;
        let op = match self.next_token().kind {
            TokenKind::Mult => BinOp::Mul,
            TokenKind::Div => BinOp::Div,
            TokenKind::Semicolon | TokenKind::Plus | TokenKind::Minus | TokenKind::RParen => {
                self.unget()?;
                return Ok(factor);
            }
            _ => return self.syntax_error("term", "MULT or DIV expected"),
        };

        let right = self.parse_term()?;
        Ok(Expression::Binary {
            op,
            left: Box::new(factor),
            right: Box::new(right),
        })
    }

    pub(crate) fn parse_factor(&mut self) -> Result<Expression, ParseError> {
        self.nested("factor", Self::factor_rule)
    }

    fn factor_rule(&mut self) -> Result<Expression, ParseError> {
        let token = self.next_token();
        match token.kind {
            TokenKind::LParen => {
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen, "factor", "RPAREN expected")?;
                Ok(inner)
            }
            TokenKind::Num | TokenKind::RealNum | TokenKind::Id => {
                Ok(Expression::Primary(self.primary_from(token, "factor")?))
            }
            _ => self.syntax_error("factor", "LPAREN, NUM, REALNUM, or ID expected"),
        }
    }

    /// `primary [relop primary]`
    pub(crate) fn parse_condition(&mut self) -> Result<Condition, ParseError> {
        let left = self.parse_primary()?;

        let token = self.next_token();
        let op = match token.kind {
            TokenKind::Greater => RelOp::Gt,
            TokenKind::Less => RelOp::Lt,
            TokenKind::GtEq => RelOp::Ge,
            TokenKind::LtEq => RelOp::Le,
            TokenKind::NotEqual => RelOp::Ne,
            _ => {
                self.unget()?;
                return Ok(Condition {
                    left,
                    comparison: None,
                });
            }
        };

        let right = self.parse_primary()?;
        Ok(Condition {
            left,
            comparison: Some((op, right)),
        })
    }

    pub(crate) fn parse_primary(&mut self) -> Result<Primary, ParseError> {
        let token = self.next_token();
        match token.kind {
            TokenKind::Num | TokenKind::RealNum | TokenKind::Id => {
                self.primary_from(token, "primary")
            }
            _ => self.syntax_error("primary", "NUM, REALNUM, or ID expected"),
        }
    }

    /// Convert a literal or identifier token into an operand.
    fn primary_from(
        &self,
        token: Token,
        nonterminal: &'static str,
    ) -> Result<Primary, ParseError> {
        match token.kind {
            TokenKind::Num => match token.lexeme.parse::<i64>() {
                Ok(value) => Ok(Primary::Int(value)),
                Err(_) => self.syntax_error(nonterminal, "NUM out of range"),
            },
            TokenKind::RealNum => match token.lexeme.parse::<f64>() {
                Ok(value) => Ok(Primary::Real(value)),
                Err(_) => self.syntax_error(nonterminal, "REALNUM expected"),
            },
            TokenKind::Id => Ok(Primary::Id(token.lexeme)),
            _ => self.syntax_error(nonterminal, "NUM, REALNUM, or ID expected"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_NESTING_DEPTH;

    fn expr(source: &str) -> Expression {
        Parser::new(source).parse_expr().unwrap()
    }

    fn int(n: i64) -> Box<Expression> {
        Box::new(Expression::Primary(Primary::Int(n)))
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        assert_eq!(
            expr("1 + 2 * 3 ;"),
            Expression::Binary {
                op: BinOp::Add,
                left: int(1),
                right: Box::new(Expression::Binary {
                    op: BinOp::Mul,
                    left: int(2),
                    right: int(3),
                }),
            }
        );
    }

    #[test]
    fn test_subtraction_nests_right() {
        assert_eq!(
            expr("1 - 2 - 3;"),
            Expression::Binary {
                op: BinOp::Sub,
                left: int(1),
                right: Box::new(Expression::Binary {
                    op: BinOp::Sub,
                    left: int(2),
                    right: int(3),
                }),
            }
        );
    }

    #[test]
    fn test_division_nests_right() {
        assert_eq!(
            expr("8 / 4 / 2;"),
            Expression::Binary {
                op: BinOp::Div,
                left: int(8),
                right: Box::new(Expression::Binary {
                    op: BinOp::Div,
                    left: int(4),
                    right: int(2),
                }),
            }
        );
    }

    #[test]
    fn test_parentheses_group_left() {
        assert_eq!(
            expr("(1 - 2) - 3;"),
            Expression::Binary {
                op: BinOp::Sub,
                left: Box::new(Expression::Binary {
                    op: BinOp::Sub,
                    left: int(1),
                    right: int(2),
                }),
                right: int(3),
            }
        );
    }

    #[test]
    fn test_operand_kinds() {
        assert_eq!(
            expr("x * 0.5;"),
            Expression::Binary {
                op: BinOp::Mul,
                left: Box::new(Expression::Primary(Primary::Id("x".to_string()))),
                right: Box::new(Expression::Primary(Primary::Real(0.5))),
            }
        );
    }

    #[test]
    fn test_same_input_same_tree() {
        let source = "a + b * (c - 4) / 2.0 - d;";
        assert_eq!(expr(source), expr(source));
    }

    #[test]
    fn test_unbalanced_parenthesis() {
        assert_eq!(
            Parser::new("(1 + 2;").parse_expr(),
            Err(ParseError::Syntax {
                nonterminal: "factor",
                expected: "RPAREN expected",
                line: 1,
            })
        );
    }

    #[test]
    fn test_missing_operand() {
        assert_eq!(
            Parser::new("1 + ;").parse_expr(),
            Err(ParseError::Syntax {
                nonterminal: "expr",
                expected: "ID, LPAREN, NUM, or REALNUM expected",
                line: 1,
            })
        );
        assert_eq!(
            Parser::new("2 * ;").parse_expr(),
            Err(ParseError::Syntax {
                nonterminal: "term",
                expected: "ID, LPAREN, NUM, or REALNUM expected",
                line: 1,
            })
        );
    }

    #[test]
    fn test_integer_out_of_range() {
        assert_eq!(
            Parser::new("99999999999999999999;").parse_expr(),
            Err(ParseError::Syntax {
                nonterminal: "factor",
                expected: "NUM out of range",
                line: 1,
            })
        );
    }

    #[test]
    fn test_long_operator_chain_too_deep() {
        let source = format!("{}1;", "1 + ".repeat(200_000));
        match Parser::new(&source).parse_expr() {
            Err(ParseError::Syntax { expected, .. }) => assert_eq!(expected, "nesting too deep"),
            other => panic!("Expected nesting error, got {:?}", other),
        }
    }

    #[test]
    fn test_deep_parentheses_too_deep() {
        let source = format!("{}1{};", "(".repeat(MAX_NESTING_DEPTH), ")".repeat(MAX_NESTING_DEPTH));
        match Parser::new(&source).parse_expr() {
            Err(ParseError::Syntax { expected, .. }) => assert_eq!(expected, "nesting too deep"),
            other => panic!("Expected nesting error, got {:?}", other),
        }
    }

    #[test]
    fn test_chain_below_limit_parses() {
        let source = format!("{}1;", "1 + ".repeat(100));
        assert!(Parser::new(&source).parse_expr().is_ok());
    }

    #[test]
    fn test_condition_operators() {
        for (source, op) in [
            ("a > 1", RelOp::Gt),
            ("a < 1", RelOp::Lt),
            ("a >= 1", RelOp::Ge),
            ("a <= 1", RelOp::Le),
            ("a <> 1", RelOp::Ne),
        ] {
            let condition = Parser::new(source).parse_condition().unwrap();
            assert_eq!(condition.comparison, Some((op, Primary::Int(1))));
        }
    }

    #[test]
    fn test_condition_rejects_equal_sign() {
        // `=` is not a relational operator, so the condition ends at `a`
        let mut parser = Parser::new("a = 1");
        let condition = parser.parse_condition().unwrap();
        assert_eq!(condition.comparison, None);
        assert_eq!(parser.next_token().kind, TokenKind::Equal);
    }

    #[test]
    fn test_condition_needs_right_operand() {
        assert_eq!(
            Parser::new("a > {").parse_condition(),
            Err(ParseError::Syntax {
                nonterminal: "primary",
                expected: "NUM, REALNUM, or ID expected",
                line: 1,
            })
        );
    }
}
