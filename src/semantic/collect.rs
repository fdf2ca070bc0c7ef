//! Identifier collection
//!
//! A single walk over the declaration part that flattens it into the name
//! lists the checks work on. Only declarations are visited; the body plays no
//! part in name-conflict analysis.

use crate::parser::ast::{Decl, Declaration};

/// Flat, source-ordered identifier lists borrowed from the AST
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameLists<'a> {
    /// Every identifier declared in the TYPE section
    pub type_ids: Vec<&'a str>,
    /// Every identifier declared in the VAR section
    pub var_ids: Vec<&'a str>,
    /// Type names of VAR declarations that refer to an identifier
    pub var_type_refs: Vec<&'a str>,
}

impl<'a> NameLists<'a> {
    pub fn collect(decl: &'a Decl) -> Self {
        let mut names = NameLists::default();

        if let Some(section) = &decl.type_section {
            for declaration in &section.decls {
                names.type_ids.extend(ids(declaration));
            }
        }

        if let Some(section) = &decl.var_section {
            for declaration in &section.decls {
                names.var_ids.extend(ids(declaration));
                if let Some(reference) = declaration.type_name.reference() {
                    names.var_type_refs.push(reference);
                }
            }
        }

        names
    }
}

fn ids(declaration: &Declaration) -> impl Iterator<Item = &str> {
    declaration.ids.iter().map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;

    #[test]
    fn test_collects_in_source_order() {
        let program = parse_source(
            "TYPE t1, t2: INT; t3: t1;\nVAR x: t2; y, z: REAL; w: t3;\n{ x = 1; }",
        )
        .unwrap();
        let names = NameLists::collect(&program.decl);

        assert_eq!(names.type_ids, vec!["t1", "t2", "t3"]);
        assert_eq!(names.var_ids, vec!["x", "y", "z", "w"]);
        // Primitive types and TYPE-section references are not collected
        assert_eq!(names.var_type_refs, vec!["t2", "t3"]);
    }

    #[test]
    fn test_empty_declarations() {
        let program = parse_source("{ x = 1; }").unwrap();
        assert_eq!(NameLists::collect(&program.decl), NameLists::default());
    }
}
