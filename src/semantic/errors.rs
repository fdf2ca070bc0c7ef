//! Semantic error types
//!
//! This module defines [`SemanticError`], one detected name conflict. Unlike
//! syntax errors these are informational: they are reported and the run still
//! completes normally.

use std::fmt;
use thiserror::Error;

/// The fixed categories of name conflict. Code 3 is reserved and unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A name declared twice in the TYPE section
    DuplicateType = 0,
    /// A name declared in both the TYPE and the VAR section
    TypeRedeclaredAsVar = 1,
    /// A name declared twice in the VAR section
    DuplicateVar = 2,
    /// A variable name also used as a type name in the VAR section
    VarUsedAsType = 4,
}

impl ErrorCode {
    /// Codes in the order the checks run
    pub const ALL: [ErrorCode; 4] = [
        ErrorCode::DuplicateType,
        ErrorCode::TypeRedeclaredAsVar,
        ErrorCode::DuplicateVar,
        ErrorCode::VarUsedAsType,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// One reported conflict and the offending identifier
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("ERROR CODE {code} {name}")]
pub struct SemanticError {
    pub code: ErrorCode,
    pub name: String,
}

impl SemanticError {
    pub fn new(code: ErrorCode, name: impl Into<String>) -> Self {
        SemanticError {
            code,
            name: name.into(),
        }
    }
}
