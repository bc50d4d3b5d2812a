//! JSON-RPC protocol types for the tool server.
//!
//! This module defines the message structures of the JSON-RPC 2.0 dialect
//! spoken over stdin/stdout, one JSON object per line.
//!
//! # Protocol Overview
//!
//! - **Requests**: Client → Server (`initialize`, `ping`, `tools/list`, `tools/call`)
//! - **Responses**: Server → Client (result or error)
//! - **Notifications**: Client → Server (`notifications/initialized`), never answered

use assetscope_domain::ToolResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

/// Protocol revision announced by `initialize`
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Standard JSON-RPC error codes
pub mod error_codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;
}

/// Method names the server understands
pub mod methods {
    pub const INITIALIZE: &str = "initialize";
    pub const INITIALIZED: &str = "notifications/initialized";
    pub const PING: &str = "ping";
    pub const TOOLS_LIST: &str = "tools/list";
    pub const TOOLS_CALL: &str = "tools/call";
}

/// An incoming JSON-RPC request (has `id` + `method`).
///
/// `id` is echoed back untouched; clients use both numbers and strings.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingRequest {
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC error object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// JSON-RPC response sent from server → client.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }
}

/// Parameters of a `tools/call` request
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// One content block of a tool result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

impl TextContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            content_type: "text".to_string(),
            text: text.into(),
        }
    }
}

/// Result payload for a `tools/call` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    pub content: Vec<TextContent>,
    pub is_error: bool,
}

impl ToolCallResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            content: vec![TextContent::new(text)],
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![TextContent::new(text)],
            is_error: true,
        }
    }
}

impl From<ToolResult> for ToolCallResult {
    /// Failures carry the error message exactly as produced.
    fn from(result: ToolResult) -> Self {
        match (result.output, result.error) {
            (_, Some(error)) => Self::error(error.message),
            (Some(output), None) => Self::success(output),
            (None, None) => Self::success(String::new()),
        }
    }
}

/// Tool-related server capabilities
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsCapability {
    pub list_changed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerCapabilities {
    pub tools: ToolsCapability,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

/// Result of `initialize`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: &'static str,
    pub capabilities: ServerCapabilities,
    pub server_info: ServerInfo,
}

impl InitializeResult {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION,
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: name.into(),
                version: version.into(),
            },
        }
    }
}

/// Result of `tools/list`
#[derive(Debug, Clone, Serialize)]
pub struct ListToolsResult {
    pub tools: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetscope_domain::ToolError;
    use serde_json::json;

    #[test]
    fn success_response_omits_error() {
        let resp = JsonRpcResponse::success(json!(7), json!({}));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["jsonrpc"], "2.0");
        assert_eq!(json["id"], 7);
        assert!(json.get("error").is_none());
        assert!(json["result"].is_object());
    }

    #[test]
    fn error_response_omits_result() {
        let resp = JsonRpcResponse::error(Value::Null, error_codes::PARSE_ERROR, "Parse error");
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json["id"].is_null());
        assert!(json.get("result").is_none());
        assert_eq!(json["error"]["code"], -32700);
        assert!(json["error"].get("data").is_none());
    }

    #[test]
    fn string_ids_are_preserved() {
        let request: IncomingRequest =
            serde_json::from_value(json!({"jsonrpc": "2.0", "id": "abc", "method": "ping"}))
                .unwrap();
        assert_eq!(request.id, json!("abc"));
        assert!(request.params.is_none());
    }

    #[test]
    fn tool_call_result_serializes_camel_case() {
        let json = serde_json::to_value(ToolCallResult::success("搜索结果(共0条):\n")).unwrap();
        assert_eq!(json["content"][0]["type"], "text");
        assert_eq!(json["content"][0]["text"], "搜索结果(共0条):\n");
        assert_eq!(json["isError"], false);
    }

    #[test]
    fn tool_result_failure_keeps_message() {
        let result = ToolResult::failure(
            "hunter_search",
            ToolError::backend(401, "令牌过期"),
        );
        let payload = ToolCallResult::from(result);
        assert!(payload.is_error);
        assert_eq!(payload.content[0].text, "令牌过期");
    }

    #[test]
    fn initialize_result_shape() {
        let json = serde_json::to_value(InitializeResult::new("assetscope", "0.3.0")).unwrap();
        assert_eq!(json["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(json["capabilities"]["tools"]["listChanged"], false);
        assert_eq!(json["serverInfo"]["name"], "assetscope");
    }
}
