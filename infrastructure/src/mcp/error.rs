//! Error types for the stdio protocol server

use thiserror::Error;

/// Result type alias for server operations
pub type Result<T> = std::result::Result<T, McpError>;

/// Errors that stop the serve loop
///
/// Anything that goes wrong inside a single frame is answered on the wire
/// instead; only a broken stdin or stdout ends the loop.
#[derive(Error, Debug)]
pub enum McpError {
    #[error("I/O error on the protocol channel: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
