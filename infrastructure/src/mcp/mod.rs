//! JSON-RPC tool server over stdio
//!
//! Exposes the registered search tools to a single client speaking the
//! Model Context Protocol dialect of JSON-RPC 2.0.

pub mod error;
pub mod protocol;
pub mod server;
pub mod transport;

pub use error::{McpError, Result};
pub use server::McpServer;
