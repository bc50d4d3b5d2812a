//! Tool domain module
//!
//! Defines how search backends are presented to callers of the dispatch
//! protocol: each backend is one named tool with a parameter schema.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (declared)   │    │ (invocation) │    │ (output)     │
//! └──────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`ToolSpec`]: Registry of declared tools, ordered by name
//! - [`ToolDefinition`]: Schema for a single tool (name, description, params)
//! - [`ToolParameter`]: One argument, with optional default policy
//! - [`ToolCall`]: An invocation request with arguments
//! - [`ToolResult`]: Rendered report or [`ToolError`]
//! - [`ToolValidator`]: Pure domain trait for parameter validation

pub mod entities;
pub mod traits;
pub mod value_objects;

pub use entities::{ToolCall, ToolDefinition, ToolParameter, ToolSpec};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{ToolError, ToolResult, ToolResultMetadata};
