//! Parse-tree printer
//!
//! Renders an AST back in a source-like layout for debugging: one
//! declaration or statement per line, blocks indented, expressions in prefix
//! form (`+ 1 * 2 3`), reals with four decimals.

use crate::parser::ast::*;
use std::fmt::{self, Display, Formatter, Write};

const INDENT: &str = "    ";

impl Display for PrimitiveType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrimitiveType::Int => "INT",
            PrimitiveType::Real => "REAL",
            PrimitiveType::String => "STRING",
            PrimitiveType::Boolean => "BOOLEAN",
            PrimitiveType::Long => "LONG",
        };
        f.write_str(name)
    }
}

impl Display for TypeName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TypeName::Primitive(p) => write!(f, "{}", p),
            TypeName::Named(name) => f.write_str(name),
        }
    }
}

impl Display for Declaration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {} ;", self.ids.join(", "), self.type_name)
    }
}

impl Display for BinOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let op = match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        };
        f.write_str(op)
    }
}

impl Display for RelOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let op = match self {
            RelOp::Gt => ">",
            RelOp::Lt => "<",
            RelOp::Ge => ">=",
            RelOp::Le => "<=",
            RelOp::Ne => "<>",
        };
        f.write_str(op)
    }
}

impl Display for Primary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Primary::Int(n) => write!(f, "{}", n),
            Primary::Real(x) => write!(f, "{:.4}", x),
            Primary::Id(name) => f.write_str(name),
        }
    }
}

/// Prefix notation
impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Binary { op, left, right } => write!(f, "{} {} {}", op, left, right),
            Expression::Primary(p) => write!(f, "{}", p),
        }
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.left)?;
        if let Some((op, right)) = &self.comparison {
            write!(f, " {} {}", op, right)?;
        }
        Ok(())
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(section) = &self.decl.type_section {
            writeln!(f, "TYPE")?;
            for decl in &section.decls {
                writeln!(f, "{INDENT}{}", decl)?;
            }
        }
        if let Some(section) = &self.decl.var_section {
            writeln!(f, "VAR")?;
            for decl in &section.decls {
                writeln!(f, "{INDENT}{}", decl)?;
            }
        }
        write_body(f, &self.body, 0)
    }
}

fn write_body(out: &mut impl Write, body: &Body, depth: usize) -> fmt::Result {
    let pad = INDENT.repeat(depth);
    writeln!(out, "{pad}{{")?;
    for stmt in &body.statements {
        write_statement(out, stmt, depth + 1)?;
    }
    writeln!(out, "{pad}}}")
}

fn write_statement(out: &mut impl Write, stmt: &Statement, depth: usize) -> fmt::Result {
    let pad = INDENT.repeat(depth);
    match stmt {
        Statement::Assign { target, expr, .. } => writeln!(out, "{pad}{} = {} ;", target, expr),
        Statement::While { condition, body } => {
            writeln!(out, "{pad}WHILE {}", condition)?;
            write_body(out, body, depth)
        }
        Statement::DoWhile { body, condition } => {
            writeln!(out, "{pad}DO")?;
            write_body(out, body, depth)?;
            writeln!(out, "{pad}WHILE {}", condition)
        }
        Statement::Switch => writeln!(out, "{pad}SWITCH"),
    }
}
