//! Composite identifiers
//!
//! Remote objects that are addressed by two names (a repository and an
//! object name inside it) carry a `left/right` identifier. The same format
//! is accepted on import, so the identifier a user sees is the identifier
//! they can import.

use anyhow::{bail, Result};

/// Join two parts into a composite identifier.
pub fn build_two_part_id(left: &str, right: &str) -> String {
    format!("{}/{}", left, right)
}

/// Split a composite identifier into its two parts.
/// `left_name` and `right_name` are used in the error message so callers
/// can describe the expected shape.
pub fn parse_two_part_id(id: &str, left_name: &str, right_name: &str) -> Result<(String, String)> {
    let parts: Vec<&str> = id.split('/').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        bail!(
            "Invalid ID {:?}: must be written as <{}>/<{}>",
            id,
            left_name,
            right_name
        );
    }
    Ok((parts[0].to_string(), parts[1].to_string()))
}
