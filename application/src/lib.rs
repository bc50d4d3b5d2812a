//! Application layer for assetscope
//!
//! This crate contains the tool dispatch use case and the port definitions
//! adapters implement. It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    report_renderer::ReportRenderer,
    search_backend::{SearchBackend, SearchError},
    tool_executor::ToolExecutorPort,
    tool_schema::ToolSchemaPort,
};
pub use use_cases::dispatch_tool::{DispatchError, DispatchOutput, DispatchToolUseCase};
