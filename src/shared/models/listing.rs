//! Pagination and ordering shared by the list endpoints.

use serde::Deserialize;

/// Page size used when the client does not send one
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// Largest page a client may request
pub const MAX_PAGE_SIZE: usize = 100;

/// Ordering by creation time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    /// Newest first
    #[default]
    Desc,
}

/// Offset/limit window over a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub start_index: usize,
    pub limit: usize,
}

impl Pagination {
    /// Build from optional query values, applying the default and cap on `limit`
    pub fn new(start_index: Option<usize>, limit: Option<usize>) -> Self {
        Self {
            start_index: start_index.unwrap_or(0),
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}
