//! Name-conflict analysis
//!
//! Runs after a successful parse. The declaration part is flattened once into
//! [`NameLists`](collect::NameLists), then the checks run in a fixed order:
//!
//! | Code | Conflict                                         |
//! |------|--------------------------------------------------|
//! | 0    | identifier declared twice in TYPE                |
//! | 1    | identifier declared in both TYPE and VAR         |
//! | 2    | identifier declared twice in VAR                 |
//! | 4    | variable name used as a type name inside VAR     |
//!
//! Each check reports at most one identifier. Under the default
//! [`CheckPolicy::StopAtFirstFailure`] the remaining checks are skipped once
//! one has reported.

pub mod checks;
pub mod collect;
pub mod errors;

use crate::parser::ast::Program;
use collect::NameLists;
use errors::{ErrorCode, SemanticError};

/// Whether checks keep running after the first reported conflict
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckPolicy {
    #[default]
    StopAtFirstFailure,
    RunAll,
}

/// Analysis state for one program
pub struct Analyzer<'a> {
    names: NameLists<'a>,
    policy: CheckPolicy,
    error_found: bool,
    errors: Vec<SemanticError>,
}

impl<'a> Analyzer<'a> {
    pub fn new(program: &'a Program) -> Self {
        Analyzer {
            names: NameLists::collect(&program.decl),
            policy: CheckPolicy::default(),
            error_found: false,
            errors: Vec::new(),
        }
    }

    pub fn with_policy(mut self, policy: CheckPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run every check in code order and return the reported conflicts.
    pub fn run(mut self) -> Vec<SemanticError> {
        tracing::debug!(
            types = self.names.type_ids.len(),
            vars = self.names.var_ids.len(),
            type_refs = self.names.var_type_refs.len(),
            "collected declarations"
        );

        for code in ErrorCode::ALL {
            if self.error_found && self.policy == CheckPolicy::StopAtFirstFailure {
                tracing::debug!(code = code.number(), "skipping check after earlier failure");
                continue;
            }
            self.run_check(code);
        }

        self.errors
    }

    fn run_check(&mut self, code: ErrorCode) {
        match checks::check_for(code)(&self.names) {
            Some(name) => {
                tracing::debug!(code = code.number(), name, "name conflict");
                self.errors.push(SemanticError::new(code, name));
                self.error_found = true;
            }
            None => tracing::trace!(code = code.number(), "check passed"),
        }
    }
}

/// Analyze `program` under `policy`.
pub fn analyze(program: &Program, policy: CheckPolicy) -> Vec<SemanticError> {
    Analyzer::new(program).with_policy(policy).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;

    fn codes(source: &str, policy: CheckPolicy) -> Vec<String> {
        let program = parse_source(source).unwrap();
        analyze(&program, policy)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_clean_program() {
        let src = "TYPE t: INT;\nVAR x: t; y: REAL;\n{ x = 1; }";
        assert!(codes(src, CheckPolicy::StopAtFirstFailure).is_empty());
    }

    #[test]
    fn test_each_code() {
        let stop = CheckPolicy::StopAtFirstFailure;
        assert_eq!(codes("TYPE a: INT; a: REAL; { x = 1; }", stop), ["ERROR CODE 0 a"]);
        assert_eq!(codes("TYPE a: INT; VAR a: REAL; { x = 1; }", stop), ["ERROR CODE 1 a"]);
        assert_eq!(codes("VAR a, a: INT; { x = 1; }", stop), ["ERROR CODE 2 a"]);
        assert_eq!(codes("VAR a: INT; b: a; { x = 1; }", stop), ["ERROR CODE 4 a"]);
    }

    #[test]
    fn test_stop_at_first_failure() {
        // Every check has a conflict to report here
        let src = "TYPE a, a: INT; VAR a, b, b: a; { x = 1; }";
        assert_eq!(codes(src, CheckPolicy::StopAtFirstFailure), ["ERROR CODE 0 a"]);
    }

    #[test]
    fn test_run_all() {
        let src = "TYPE a, a: INT; VAR a, b, b: a; { x = 1; }";
        assert_eq!(
            codes(src, CheckPolicy::RunAll),
            [
                "ERROR CODE 0 a",
                "ERROR CODE 1 a",
                "ERROR CODE 2 b",
                "ERROR CODE 4 a"
            ]
        );
    }

    #[test]
    fn test_type_section_references_ignored() {
        // A TYPE declaration naming another type is not a code-4 conflict
        let src = "TYPE t: INT; u: t;\nVAR v: u;\n{ v = 1; }";
        assert!(codes(src, CheckPolicy::RunAll).is_empty());
    }
}
