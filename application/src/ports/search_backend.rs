//! Search Backend port
//!
//! Defines the interface every asset search engine adapter implements.
//! The dispatcher only ever talks to this trait; encoding, authentication,
//! envelope parsing and record layout all stay inside the adapter.

use async_trait::async_trait;
use assetscope_domain::{
    BackendDescriptor, QueryDefaults, QueryRequest, RecordLayout, SearchResponse, ToolDefinition,
};
use thiserror::Error;

/// Errors a search call can end in
///
/// None of them are retried. The `Backend` message is the remote text,
/// passed through unmodified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Connection refused, DNS failure, timeout
    #[error("Search request failed: {0}")]
    Transport(String),

    /// Non-2xx status or a body that is not the expected JSON envelope
    #[error("Failed to decode search response: {0}")]
    Decode(String),

    /// The service answered but reported a logical failure
    #[error("{message}")]
    Backend { code: i64, message: String },
}

/// Gateway to one asset search engine
///
/// Implementations (adapters) live in the infrastructure layer. Adding a
/// backend means implementing this trait; the dispatcher and the report
/// formatter need no change.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Identity, endpoint and credentials of this backend
    fn descriptor(&self) -> &BackendDescriptor;

    /// Tool declaration exposed to callers
    fn tool_definition(&self) -> ToolDefinition;

    /// Defaulting policy for this backend's arguments
    fn defaults(&self) -> QueryDefaults;

    /// Which record keys a report line shows, and how
    fn record_layout(&self) -> RecordLayout;

    /// Issue exactly one outbound request and normalize the answer
    ///
    /// A backend-reported failure comes back as [`SearchError::Backend`].
    async fn search(&self, request: &QueryRequest) -> Result<SearchResponse, SearchError>;
}
