//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod report_renderer;
pub mod search_backend;
pub mod tool_executor;
pub mod tool_schema;
