//! Response envelope and pagination types

use serde::{Deserialize, Serialize};

/// Pagination metadata attached to list responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: u64,
    pub page: u64,
    pub pages: u64,
    pub limit: u64,
}

/// Standard `{data, pagination?, message?}` response envelope
///
/// Every backend response wraps its payload in `data`; list endpoints add
/// `pagination` and mutation endpoints may add a human-readable `message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A page of items together with its pagination metadata
///
/// Returned by the list operations on the domain services after the envelope
/// has been unwrapped.
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: Option<Pagination>,
}

impl<T> Paginated<T> {
    /// Total item count reported by the server, falling back to the page
    /// length when no pagination block was returned.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.pagination.map_or(self.items.len() as u64, |p| p.total)
    }
}
