//! Tool domain value objects: immutable result and error types
//!
//! Every invocation produces a [`ToolResult`]: either the rendered report or a
//! [`ToolError`] whose `message` is handed back to the caller unmodified.

use serde::{Deserialize, Serialize};

/// Error that occurred during tool execution.
///
/// | Code | Cause |
/// |------|-------|
/// | `UNKNOWN_TOOL` | No adapter registered under that name |
/// | `INVALID_ARGUMENT` | Missing, mistyped or out-of-range argument |
/// | `TRANSPORT_ERROR` | Connection, DNS or timeout failure |
/// | `DECODE_ERROR` | Non-2xx status or unparseable body |
/// | `BACKEND_ERROR` | The search service rejected the query |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (e.g., "BACKEND_ERROR")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ToolError {
    pub const UNKNOWN_TOOL: &'static str = "UNKNOWN_TOOL";
    pub const INVALID_ARGUMENT: &'static str = "INVALID_ARGUMENT";
    pub const TRANSPORT_ERROR: &'static str = "TRANSPORT_ERROR";
    pub const DECODE_ERROR: &'static str = "DECODE_ERROR";
    pub const BACKEND_ERROR: &'static str = "BACKEND_ERROR";

    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::new(Self::UNKNOWN_TOOL, format!("Unknown tool: {}", name.into()))
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(Self::INVALID_ARGUMENT, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(Self::TRANSPORT_ERROR, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(Self::DECODE_ERROR, message)
    }

    /// Backend-reported failure; `message` is the remote text, verbatim
    pub fn backend(code: i64, message: impl Into<String>) -> Self {
        Self::new(Self::BACKEND_ERROR, message).with_details(format!("backend code {}", code))
    }

    pub fn is_unknown_tool(&self) -> bool {
        self.code == Self::UNKNOWN_TOOL
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ToolError {}

/// Result of a tool execution, carrying output or error information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Name of the tool that was executed
    pub tool_name: String,
    /// Whether the execution was successful
    pub success: bool,
    /// Output content (for successful execution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Error information (for failed execution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
    /// Metadata about the execution
    #[serde(default)]
    pub metadata: ToolResultMetadata,
}

/// Structured metadata about tool execution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolResultMetadata {
    /// Duration of execution in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// Number of records rendered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_count: Option<usize>,
    /// Total reported by the backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(tool_name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: true,
            output: Some(output.into()),
            error: None,
            metadata: ToolResultMetadata::default(),
        }
    }

    /// Create a failed result
    pub fn failure(tool_name: impl Into<String>, error: ToolError) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: false,
            output: None,
            error: Some(error),
            metadata: ToolResultMetadata::default(),
        }
    }

    /// Add metadata to the result
    pub fn with_metadata(mut self, metadata: ToolResultMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Add duration metadata
    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.metadata.duration_ms = Some(duration_ms);
        self
    }

    /// Check if execution was successful
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get the output content
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    /// Get the error
    pub fn error(&self) -> Option<&ToolError> {
        self.error.as_ref()
    }
}
