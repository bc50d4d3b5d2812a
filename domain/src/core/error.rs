//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Raised while turning tool arguments into a [`QueryRequest`](crate::search::QueryRequest).
/// Every variant is caller-correctable, so the dispatcher reports them as
/// invalid arguments rather than backend failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Query cannot be empty")]
    EmptyQuery,

    #[error("page must be >= 1, got {0}")]
    InvalidPage(i64),

    #[error("size must be >= 1, got {0}")]
    InvalidSize(i64),

    #[error("Invalid asset type: {0} (expected 1=web, 2=non-web, 3=all)")]
    InvalidAssetType(i64),

    #[error("Invalid date '{value}' for {field}: expected YYYY-MM-DD")]
    InvalidDate { field: String, value: String },

    #[error("Invalid time range: start {start} is after end {end}")]
    InvertedTimeRange { start: String, end: String },
}
