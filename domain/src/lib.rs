//! Domain layer for assetscope
//!
//! This crate contains the core types, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Search
//!
//! A search backend (FOFA, Hunter, ...) receives a validated [`QueryRequest`]
//! and answers with a normalized [`SearchResponse`]. Per-backend rules live
//! in values the backend hands out: [`QueryEncoding`], [`QueryDefaults`] and
//! [`RecordLayout`].
//!
//! ## Tools
//!
//! Each backend is exposed as one named [`ToolDefinition`]. Invocations
//! arrive as [`ToolCall`]s and leave as [`ToolResult`]s.

pub mod core;
pub mod search;
pub mod tool;

// Re-export commonly used types
pub use crate::core::error::DomainError;
pub use search::{
    AssetType, AuthScheme, BackendDescriptor, BackendFailure, FieldSelection, LabeledField,
    QueryDefaults, QueryEncoding, QueryRequest, Record, RecordLayout, SearchArguments,
    SearchResponse, TimeRange,
};
pub use tool::{
    DefaultToolValidator, ToolCall, ToolDefinition, ToolError, ToolParameter, ToolResult,
    ToolResultMetadata, ToolSpec, ToolValidator,
};
