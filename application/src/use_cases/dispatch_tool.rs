//! Dispatch Tool use case
//!
//! Routes one named invocation to the search backend registered under that
//! name. Each invocation walks the same states:
//!
//! ```text
//! Received ──▶ Validated/Defaulted ──▶ Delegated ──▶ Formatted ──▶ Responded
//!    │                 │                   │
//!    ▼                 ▼                   ▼
//! Rejected          Failed              Failed
//! (unknown tool)  (bad argument)    (transport/decode/backend)
//! ```
//!
//! Exactly one backend call is made per invocation and nothing is retried.
//! A failure never carries partial output.

use crate::ports::report_renderer::ReportRenderer;
use crate::ports::search_backend::{SearchBackend, SearchError};
use crate::ports::tool_executor::ToolExecutorPort;
use assetscope_domain::{
    DefaultToolValidator, SearchArguments, ToolCall, ToolError, ToolResult, ToolResultMetadata,
    ToolSpec, ToolValidator,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that end an invocation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Search(#[from] SearchError),
}

impl DispatchError {
    /// Map to the wire-level error, keeping backend messages verbatim.
    pub fn to_tool_error(&self) -> ToolError {
        match self {
            DispatchError::UnknownTool(name) => ToolError::unknown_tool(name),
            DispatchError::InvalidArgument(message) => ToolError::invalid_argument(message),
            DispatchError::Search(SearchError::Transport(_)) => {
                ToolError::transport(self.to_string())
            }
            DispatchError::Search(SearchError::Decode(_)) => ToolError::decode(self.to_string()),
            DispatchError::Search(SearchError::Backend { code, message }) => {
                ToolError::backend(*code, message)
            }
        }
    }
}

/// Successful dispatch: the rendered report plus counts for logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutput {
    pub report: String,
    pub record_count: usize,
    pub total_count: u64,
}

/// Use case routing tool calls to search backends
pub struct DispatchToolUseCase {
    backends: HashMap<String, Arc<dyn SearchBackend>>,
    tool_spec: ToolSpec,
    renderer: Arc<dyn ReportRenderer>,
    validator: DefaultToolValidator,
}

impl DispatchToolUseCase {
    pub fn new(renderer: Arc<dyn ReportRenderer>) -> Self {
        Self {
            backends: HashMap::new(),
            tool_spec: ToolSpec::new(),
            renderer,
            validator: DefaultToolValidator,
        }
    }

    /// Register a backend under its tool name (builder pattern)
    ///
    /// A later registration with the same tool name replaces the earlier one.
    pub fn register(mut self, backend: Arc<dyn SearchBackend>) -> Self {
        let definition = backend.tool_definition();
        debug!(
            tool = %definition.name,
            backend = %backend.descriptor().id,
            "Registered search tool"
        );
        self.backends.insert(definition.name.clone(), backend);
        self.tool_spec = std::mem::take(&mut self.tool_spec).register(definition);
        self
    }

    pub fn backend_count(&self) -> usize {
        self.backends.len()
    }

    /// Run one invocation to completion.
    pub async fn dispatch(&self, call: &ToolCall) -> Result<DispatchOutput, DispatchError> {
        let (backend, definition) = match (
            self.backends.get(&call.tool_name),
            self.tool_spec.get(&call.tool_name),
        ) {
            (Some(backend), Some(definition)) => (backend, definition),
            _ => return Err(DispatchError::UnknownTool(call.tool_name.clone())),
        };

        self.validator
            .validate(call, definition)
            .map_err(DispatchError::InvalidArgument)?;
        let args = SearchArguments::from_call(call).map_err(DispatchError::InvalidArgument)?;
        let request = backend
            .defaults()
            .build_request(args)
            .map_err(|e| DispatchError::InvalidArgument(e.to_string()))?;

        debug!(
            tool = %call.tool_name,
            page = request.page(),
            size = request.size(),
            "Delegating search"
        );

        let response = backend.search(&request).await?;

        // An adapter may hand back the normalized failure instead of an Err
        if let Some(failure) = &response.backend_error {
            return Err(SearchError::Backend {
                code: failure.code,
                message: failure.message.clone(),
            }
            .into());
        }

        let report = self.renderer.render(&response, &backend.record_layout());
        Ok(DispatchOutput {
            report,
            record_count: response.records.len(),
            total_count: response.total_count,
        })
    }
}

#[async_trait]
impl ToolExecutorPort for DispatchToolUseCase {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        let start = Instant::now();
        let outcome = self.dispatch(call).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(output) => {
                info!(
                    tool = %call.tool_name,
                    records = output.record_count,
                    total = output.total_count,
                    duration_ms,
                    "Search completed"
                );
                ToolResult::success(&call.tool_name, output.report).with_metadata(
                    ToolResultMetadata {
                        duration_ms: Some(duration_ms),
                        match_count: Some(output.record_count),
                        total_count: Some(output.total_count),
                    },
                )
            }
            Err(e) => {
                warn!(tool = %call.tool_name, error = %e, duration_ms, "Search failed");
                ToolResult::failure(&call.tool_name, e.to_tool_error()).with_duration(duration_ms)
            }
        }
    }
}
