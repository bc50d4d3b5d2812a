//! Tool schema conversion port.
//!
//! Separates "which tools exist" (domain) from "how to declare them on the
//! wire" (infrastructure). The protocol server asks this port for the JSON
//! Schema of each tool when answering a tool listing.

use assetscope_domain::tool::entities::{ToolDefinition, ToolSpec};

/// Port for converting tool definitions to JSON Schema declarations.
pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single tool definition to a declaration with an input schema.
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Convert all tools to a JSON array (sorted by name).
    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value>;
}
