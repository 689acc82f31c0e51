//! Production scanner: extracts candidate entry-point names from grammar text.
//!
//! Matching is textual, not syntactic. The scanner does not balance braces
//! or skip comments and string literals, so a declaration keyword followed
//! by an identifier is reported wherever it appears — including inside a
//! comment. That is the contract: recognition of fixed markers, not parsing.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches the three C++ type-declaration keywords followed by an identifier
static PRODUCTION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(struct|class|using) ([a-zA-Z0-9_]+)").unwrap());

/// List the declared names in `source`, in source order.
///
/// Duplicates are retained; an empty source yields an empty list.
pub fn list_productions(source: &str) -> Vec<String> {
    PRODUCTION_REGEX
        .captures_iter(source)
        .map(|caps| caps[2].to_string())
        .collect()
}
