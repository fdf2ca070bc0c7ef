//! The four name-conflict checks
//!
//! Each check looks at the collected [`NameLists`] and returns the first
//! offending identifier, if any. Intersections are computed symmetrically
//! with a hash set; only the reporting order depends on which list is
//! scanned.

use super::collect::NameLists;
use super::errors::ErrorCode;
use rustc_hash::{FxHashMap, FxHashSet};

/// Signature shared by every check
pub type Check = for<'n> fn(&'n NameLists<'_>) -> Option<&'n str>;

/// The check that detects `code`
pub fn check_for(code: ErrorCode) -> Check {
    match code {
        ErrorCode::DuplicateType => duplicate_type_ids,
        ErrorCode::TypeRedeclaredAsVar => type_redeclared_as_var,
        ErrorCode::DuplicateVar => duplicate_var_ids,
        ErrorCode::VarUsedAsType => var_used_as_type,
    }
}

/// Code 0
pub fn duplicate_type_ids<'n>(names: &'n NameLists<'_>) -> Option<&'n str> {
    first_duplicate(&names.type_ids)
}

/// Code 1: first TYPE identifier that is also declared as a variable
pub fn type_redeclared_as_var<'n>(names: &'n NameLists<'_>) -> Option<&'n str> {
    first_shared(&names.type_ids, &names.var_ids)
}

/// Code 2
pub fn duplicate_var_ids<'n>(names: &'n NameLists<'_>) -> Option<&'n str> {
    first_duplicate(&names.var_ids)
}

/// Code 4: first variable whose name is used as a type name in the VAR section
pub fn var_used_as_type<'n>(names: &'n NameLists<'_>) -> Option<&'n str> {
    first_shared(&names.var_ids, &names.var_type_refs)
}

/// Earliest name that occurs again later in the list
fn first_duplicate<'a>(names: &[&'a str]) -> Option<&'a str> {
    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    for &name in names {
        *counts.entry(name).or_insert(0) += 1;
    }
    names
        .iter()
        .copied()
        .find(|name| counts.get(name).is_some_and(|&count| count > 1))
}

/// First name of `scan` that also appears in `other`
fn first_shared<'a>(scan: &[&'a str], other: &[&str]) -> Option<&'a str> {
    let other: FxHashSet<&str> = other.iter().copied().collect();
    scan.iter().copied().find(|name| other.contains(name))
}
