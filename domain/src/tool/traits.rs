//! Tool domain traits
//!
//! Contains pure domain logic traits for tool validation.

use super::entities::{ToolCall, ToolDefinition};

/// Validator for tool calls
///
/// This is a pure domain trait that validates tool calls
/// against their definitions without any I/O operations.
pub trait ToolValidator {
    /// Validate a tool call against its definition
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String>;
}

/// Default implementation of ToolValidator
///
/// Parameters with a default policy may be omitted even when the schema
/// marks them required; the defaulting step fills them in afterwards.
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String> {
        for param in &definition.parameters {
            let missing = call
                .arguments
                .get(&param.name)
                .is_none_or(|v| v.is_null());
            if param.must_be_supplied() && missing {
                return Err(format!(
                    "Missing required parameter '{}' for tool '{}'",
                    param.name, definition.name
                ));
            }
        }

        let mut unknown: Vec<&str> = call
            .arguments
            .keys()
            .map(|k| k.as_str())
            .filter(|k| definition.parameter(k).is_none())
            .collect();
        unknown.sort_unstable();

        if let Some(arg_name) = unknown.first() {
            return Err(format!(
                "Unknown parameter '{}' for tool '{}'",
                arg_name, definition.name
            ));
        }

        Ok(())
    }
}
