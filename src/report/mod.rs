// Run transcript: the lines a check run prints and the status it ends with

use crate::constants::{EXIT_SYNTAX_ERROR, SUCCESS_LINE};
use crate::parser::parse::ParseError;
use crate::semantic::errors::SemanticError;
use std::fmt;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Parsing and analysis finished, whether or not conflicts were found
    Completed,
    SyntaxError,
}

impl RunStatus {
    pub fn exit_code(self) -> i32 {
        match self {
            RunStatus::Completed => 0,
            RunStatus::SyntaxError => EXIT_SYNTAX_ERROR,
        }
    }
}

/// Ordered output lines of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    lines: Vec<String>,
    status: RunStatus,
}

impl Transcript {
    pub fn new() -> Self {
        Transcript {
            lines: Vec::new(),
            status: RunStatus::Completed,
        }
    }

    /// Transcript of a run that stopped at a syntax error
    pub fn syntax_error(err: &ParseError) -> Self {
        let mut transcript = Transcript::new();
        transcript.push_line(err.to_string());
        transcript.status = RunStatus::SyntaxError;
        transcript
    }

    /// Transcript of a completed analysis
    pub fn analysis(errors: &[SemanticError]) -> Self {
        let mut transcript = Transcript::new();
        if errors.is_empty() {
            transcript.push_line(SUCCESS_LINE);
        }
        for error in errors {
            transcript.push_line(error.to_string());
        }
        transcript
    }

    pub fn push_line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Completed && self.lines.iter().all(|l| l == SUCCESS_LINE)
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

/// One line per entry, each newline-terminated
impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::errors::ErrorCode;

    #[test]
    fn test_success_transcript() {
        let transcript = Transcript::analysis(&[]);
        assert_eq!(transcript.lines(), ["All systems go!"]);
        assert_eq!(transcript.status().exit_code(), 0);
        assert!(transcript.is_success());
    }

    #[test]
    fn test_semantic_errors_exit_zero() {
        let errors = [
            SemanticError::new(ErrorCode::DuplicateType, "a"),
            SemanticError::new(ErrorCode::DuplicateVar, "x"),
        ];
        let transcript = Transcript::analysis(&errors);
        assert_eq!(transcript.to_string(), "ERROR CODE 0 a\nERROR CODE 2 x\n");
        assert_eq!(transcript.status(), RunStatus::Completed);
        assert!(!transcript.is_success());
    }

    #[test]
    fn test_syntax_error_transcript() {
        let err = ParseError::Syntax {
            nonterminal: "stmt_list",
            expected: "statement expected",
            line: 3,
        };
        let transcript = Transcript::syntax_error(&err);
        assert_eq!(transcript.lines().len(), 1);
        assert_eq!(transcript.status().exit_code(), 1);
    }
}
