//! GraphQL envelope types
//!
//! Shared pieces of the GitHub GraphQL (v4) wire format used by paginated
//! queries.

use serde::Deserialize;

/// Cursor-based pagination info returned by every GraphQL connection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}
