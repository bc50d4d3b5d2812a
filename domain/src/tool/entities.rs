//! Tool domain entities

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Definition of a tool exposed over the dispatch protocol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "fofa_search")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Parameter specifications, in declaration order
    pub parameters: Vec<ToolParameter>,
}

/// Parameter specification for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name
    pub name: String,
    /// Parameter description (query-language help for the caller)
    pub description: String,
    /// Whether the protocol schema marks this parameter required
    pub required: bool,
    /// Parameter type hint (e.g., "string", "integer")
    pub param_type: String,
    /// Value applied when the caller omits the parameter or sends zero
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&ToolParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: "string".to_string(),
            default_value: None,
        }
    }

    pub fn with_type(mut self, param_type: impl Into<String>) -> Self {
        self.param_type = param_type.into();
        self
    }

    pub fn with_default(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Required by the schema and no default can stand in for it
    pub fn must_be_supplied(&self) -> bool {
        self.required && self.default_value.is_none()
    }
}

/// Specification of the tools a server exposes
///
/// Ordered by name so listings are stable.
#[derive(Debug, Clone, Default)]
pub struct ToolSpec {
    tools: BTreeMap<String, ToolDefinition>,
}

impl ToolSpec {
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    pub fn register(mut self, tool: ToolDefinition) -> Self {
        self.tools.insert(tool.name.clone(), tool);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    pub fn all(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// A call to a tool with arguments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to call
    pub tool_name: String,
    /// Arguments passed to the tool
    #[serde(default)]
    pub arguments: HashMap<String, serde_json::Value>,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: HashMap::new(),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Get a string argument
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }

    /// Get a required string argument or return an error message
    pub fn require_string(&self, key: &str) -> Result<&str, String> {
        self.get_string(key)
            .ok_or_else(|| format!("Missing required argument: {}", key))
    }

    /// Get an optional integer, rejecting values of another type.
    ///
    /// `null` counts as absent. Integral floats (`2.0`) are accepted since
    /// some clients send every number as a float.
    pub fn integer_arg(&self, key: &str) -> Result<Option<i64>, String> {
        match self.arguments.get(key) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(v) => v
                .as_i64()
                .or_else(|| v.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
                .map(Some)
                .ok_or_else(|| format!("Argument '{}' must be an integer, got {}", key, v)),
        }
    }

    /// Get an optional string, rejecting values of another type.
    pub fn string_arg(&self, key: &str) -> Result<Option<&str>, String> {
        match self.arguments.get(key) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(v) => v
                .as_str()
                .map(Some)
                .ok_or_else(|| format!("Argument '{}' must be a string, got {}", key, v)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_definition() {
        let tool = ToolDefinition::new("fofa_search", "FOFA搜索引擎")
            .with_parameter(ToolParameter::new("query", "搜索查询语句", true))
            .with_parameter(
                ToolParameter::new("page", "页码", true)
                    .with_type("integer")
                    .with_default(1),
            );

        assert_eq!(tool.name, "fofa_search");
        assert_eq!(tool.parameters.len(), 2);
        assert!(tool.parameter("query").unwrap().must_be_supplied());
        assert!(!tool.parameter("page").unwrap().must_be_supplied());
        assert!(tool.parameter("size").is_none());
    }

    #[test]
    fn test_tool_spec_is_sorted() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new("hunter_search", "Hunter"))
            .register(ToolDefinition::new("fofa_search", "FOFA"));

        assert_eq!(spec.len(), 2);
        assert!(spec.get("fofa_search").is_some());
        assert!(spec.get("shodan_search").is_none());
        assert_eq!(
            spec.names().collect::<Vec<_>>(),
            vec!["fofa_search", "hunter_search"]
        );
    }

    #[test]
    fn test_tool_call() {
        let call = ToolCall::new("fofa_search")
            .with_arg("query", "ip=\"1.1.1.1\"")
            .with_arg("page", 2);

        assert_eq!(call.tool_name, "fofa_search");
        assert_eq!(call.get_string("query"), Some("ip=\"1.1.1.1\""));
        assert_eq!(call.require_string("query").unwrap(), "ip=\"1.1.1.1\"");
        assert!(call.require_string("missing").is_err());
        assert_eq!(call.integer_arg("page").unwrap(), Some(2));
    }

    #[test]
    fn test_integer_arg_typing() {
        let call = ToolCall::new("t")
            .with_arg("page", 3)
            .with_arg("size", 20.0)
            .with_arg("bad", "ten")
            .with_arg("none", serde_json::Value::Null);

        assert_eq!(call.integer_arg("page"), Ok(Some(3)));
        assert_eq!(call.integer_arg("size"), Ok(Some(20)));
        assert_eq!(call.integer_arg("none"), Ok(None));
        assert_eq!(call.integer_arg("absent"), Ok(None));
        assert!(call.integer_arg("bad").unwrap_err().contains("must be an integer"));
    }

    #[test]
    fn test_string_arg_typing() {
        let call = ToolCall::new("t").with_arg("fields", "ip,port").with_arg("n", 1);
        assert_eq!(call.string_arg("fields"), Ok(Some("ip,port")));
        assert!(call.string_arg("n").is_err());
    }
}
