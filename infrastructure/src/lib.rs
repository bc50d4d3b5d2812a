//! Infrastructure layer for assetscope
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the FOFA and Hunter HTTP backends, the
//! JSON-RPC stdio server and configuration file loading.

pub mod backends;
pub mod config;
pub mod mcp;
pub mod tools;

// Re-export commonly used types
pub use backends::{
    DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, FofaBackend, FofaContract, HttpSearchBackend,
    HunterBackend, HunterContract, build_http_client, fofa_backend, hunter_backend,
};
pub use config::{ConfigError, ConfigLoader, FileConfig, FofaCredentials};
pub use mcp::{McpError, McpServer};
pub use tools::JsonSchemaToolConverter;
