//! Branch filter matching with glob semantics.

use glob_match::glob_match;

use crate::utils::parser;

/// Separator between individual patterns in a filter spec.
const PATTERN_SEPARATOR: &str = ";";

/// True when the spec requests no filtering at all: empty, `*`, or `**`.
///
/// Callers check this before resolving the branch, so an unfiltered task
/// never shells out to git.
pub fn is_unfiltered(spec: &str) -> bool {
    matches!(spec.trim(), "" | "*" | "**")
}

/// Match `branch` against a semicolon-delimited filter spec.
///
/// Each pattern is a whole-string glob (`*` matches any run of
/// characters, `?` exactly one), compared case-insensitively. The first
/// matching pattern wins; false when none match.
pub fn branch_matches(branch: &str, spec: &str) -> bool {
    let branch = branch.to_lowercase();

    parser::split_tokens(spec, &[PATTERN_SEPARATOR])
        .iter()
        .any(|pattern| glob_match(&pattern.to_lowercase(), &branch))
}
