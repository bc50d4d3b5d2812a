//! Stdio tool server
//!
//! Reads newline-delimited JSON-RPC frames and handles each one to
//! completion, including any outbound search, before reading the next.

use super::error::Result;
use super::protocol::{
    IncomingRequest, InitializeResult, JsonRpcResponse, ListToolsResult, ToolCallParams,
    ToolCallResult, error_codes, methods,
};
use super::transport::{MessageKind, classify_message, write_frame};
use assetscope_application::{ToolExecutorPort, ToolSchemaPort};
use assetscope_domain::ToolCall;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite};
use tracing::{debug, info, warn};

/// Server exposing every registered tool over one JSON-RPC channel
pub struct McpServer {
    executor: Arc<dyn ToolExecutorPort>,
    schema: Arc<dyn ToolSchemaPort>,
    name: String,
    version: String,
}

fn respond<T: Serialize>(id: Value, payload: &T) -> JsonRpcResponse {
    match serde_json::to_value(payload) {
        Ok(result) => JsonRpcResponse::success(id, result),
        Err(e) => JsonRpcResponse::error(
            id,
            error_codes::INTERNAL_ERROR,
            format!("Failed to encode result: {}", e),
        ),
    }
}

impl McpServer {
    pub fn new(executor: Arc<dyn ToolExecutorPort>, schema: Arc<dyn ToolSchemaPort>) -> Self {
        Self {
            executor,
            schema,
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Name and version announced by `initialize`
    pub fn with_server_info(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.name = name.into();
        self.version = version.into();
        self
    }

    /// Serve until the reader reaches end of input.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(
            tools = ?self.executor.available_tools(),
            "Serving tools on stdio"
        );

        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    self.handle_line(line).await
                }
                Err(e) => {
                    warn!(error = %e, "Frame is not valid UTF-8");
                    Some(JsonRpcResponse::error(
                        Value::Null,
                        error_codes::PARSE_ERROR,
                        format!("Parse error: {}", e),
                    ))
                }
            };
            if let Some(response) = response {
                write_frame(&mut writer, &response).await?;
            }
        }

        info!("Input closed, shutting down");
        Ok(())
    }

    /// Handle one frame; `None` when nothing must be written back.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let message: Value = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "Unparseable frame");
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    error_codes::PARSE_ERROR,
                    format!("Parse error: {}", e),
                ));
            }
        };

        match classify_message(&message) {
            MessageKind::Request { id } => Some(self.handle_request(id, message).await),
            MessageKind::Notification => {
                let method = message.get("method").and_then(Value::as_str);
                if method != Some(methods::INITIALIZED) {
                    debug!(method = ?method, "Ignoring notification");
                }
                None
            }
            MessageKind::Response => {
                debug!("Ignoring unsolicited response");
                None
            }
            MessageKind::Invalid => Some(JsonRpcResponse::error(
                message.get("id").cloned().unwrap_or(Value::Null),
                error_codes::INVALID_REQUEST,
                "Invalid request: expected an object with a method",
            )),
        }
    }

    async fn handle_request(&self, id: Value, message: Value) -> JsonRpcResponse {
        let request: IncomingRequest = match serde_json::from_value(message) {
            Ok(request) => request,
            Err(e) => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_REQUEST,
                    format!("Invalid request: {}", e),
                );
            }
        };

        debug!(method = %request.method, id = %request.id, "Request");
        match request.method.as_str() {
            methods::INITIALIZE => respond(
                request.id,
                &InitializeResult::new(self.name.clone(), self.version.clone()),
            ),
            methods::PING => JsonRpcResponse::success(request.id, serde_json::json!({})),
            methods::TOOLS_LIST => respond(
                request.id,
                &ListToolsResult {
                    tools: self.schema.all_tools_schema(self.executor.tool_spec()),
                },
            ),
            methods::TOOLS_CALL => self.handle_tool_call(request.id, request.params).await,
            other => JsonRpcResponse::error(
                request.id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            ),
        }
    }

    async fn handle_tool_call(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: ToolCallParams = match params.map(serde_json::from_value) {
            Some(Ok(params)) => params,
            Some(Err(e)) => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid tools/call params: {}", e),
                );
            }
            None => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    "Missing tools/call params",
                );
            }
        };

        let arguments = match params.arguments {
            None | Some(Value::Null) => Default::default(),
            Some(Value::Object(map)) => map.into_iter().collect(),
            Some(other) => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Tool arguments must be an object, got {}", other),
                );
            }
        };

        if !self.executor.has_tool(&params.name) {
            warn!(tool = %params.name, "Unknown tool");
            return JsonRpcResponse::error(
                id,
                error_codes::INVALID_PARAMS,
                format!("Unknown tool: {}", params.name),
            );
        }

        let call = ToolCall {
            tool_name: params.name,
            arguments,
        };
        let result = self.executor.execute(&call).await;
        if let Some(error) = result.error()
            && error.is_unknown_tool()
        {
            return JsonRpcResponse::error(id, error_codes::INVALID_PARAMS, error.message.clone());
        }

        respond(id, &ToolCallResult::from(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::JsonSchemaToolConverter;
    use assetscope_domain::{ToolDefinition, ToolError, ToolParameter, ToolResult, ToolSpec};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Executor answering from canned results and recording every call
    struct StubExecutor {
        spec: ToolSpec,
        calls: Mutex<Vec<ToolCall>>,
    }

    impl StubExecutor {
        fn new() -> Self {
            Self {
                spec: ToolSpec::new().register(
                    ToolDefinition::new("fofa_search", "FOFA搜索引擎")
                        .with_parameter(ToolParameter::new("query", "搜索查询语句", true)),
                ),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ToolExecutorPort for StubExecutor {
        fn tool_spec(&self) -> &ToolSpec {
            &self.spec
        }

        async fn execute(&self, call: &ToolCall) -> ToolResult {
            self.calls.lock().unwrap().push(call.clone());
            match call.get_string("query") {
                Some("fail") => ToolResult::failure(
                    &call.tool_name,
                    ToolError::backend(-1, "[-700] Account Invalid"),
                ),
                _ => ToolResult::success(&call.tool_name, "搜索结果(共0条):\n"),
            }
        }
    }

    fn server() -> (McpServer, Arc<StubExecutor>) {
        let executor = Arc::new(StubExecutor::new());
        let server = McpServer::new(executor.clone(), Arc::new(JsonSchemaToolConverter))
            .with_server_info("assetscope", "0.3.0");
        (server, executor)
    }

    async fn run(server: &McpServer, input: &str) -> Vec<Value> {
        let mut out = Vec::new();
        server.serve(input.as_bytes(), &mut out).await.unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_full_session() {
        let (server, executor) = server();
        let input = [
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"t","version":"1"}}}"#,
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"fofa_search","arguments":{"query":"title=\"test\""}}}"#,
        ]
        .join("\n");

        let frames = run(&server, &input).await;
        assert_eq!(frames.len(), 3);

        assert_eq!(frames[0]["id"], 1);
        assert_eq!(frames[0]["result"]["serverInfo"]["name"], "assetscope");

        assert_eq!(frames[1]["id"], 2);
        let tools = frames[1]["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["name"], "fofa_search");
        assert!(tools[0]["inputSchema"]["properties"]["query"].is_object());

        assert_eq!(frames[2]["id"], 3);
        assert_eq!(frames[2]["result"]["isError"], false);
        assert_eq!(frames[2]["result"]["content"][0]["text"], "搜索结果(共0条):\n");

        let calls = executor.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].get_string("query"), Some("title=\"test\""));
    }

    #[tokio::test]
    async fn test_invalid_utf8_frame_does_not_stop_serving() {
        let (server, _) = server();
        let mut input = b"\xff\xfe garbage\n".to_vec();
        input.extend_from_slice(br#"{"jsonrpc":"2.0","id":9,"method":"ping"}"#);
        input.push(b'\n');

        let mut out = Vec::new();
        server.serve(input.as_slice(), &mut out).await.unwrap();
        let frames: Vec<Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0]["id"], Value::Null);
        assert_eq!(frames[0]["error"]["code"], error_codes::PARSE_ERROR);
        assert_eq!(frames[1]["id"], 9);
        assert!(frames[1].get("error").is_none());
    }

    #[tokio::test]
    async fn test_tool_failure_is_error_result() {
        let (server, _) = server();
        let frames = run(
            &server,
            r#"{"jsonrpc":"2.0","id":"x","method":"tools/call","params":{"name":"fofa_search","arguments":{"query":"fail"}}}"#,
        )
        .await;

        assert_eq!(frames[0]["id"], "x");
        assert!(frames[0].get("error").is_none());
        assert_eq!(frames[0]["result"]["isError"], true);
        assert_eq!(
            frames[0]["result"]["content"][0]["text"],
            "[-700] Account Invalid"
        );
    }

    #[tokio::test]
    async fn test_unknown_tool_is_invalid_params() {
        let (server, executor) = server();
        let frames = run(
            &server,
            r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"shodan_search","arguments":{}}}"#,
        )
        .await;

        assert_eq!(frames[0]["error"]["code"], error_codes::INVALID_PARAMS);
        assert!(
            frames[0]["error"]["message"]
                .as_str()
                .unwrap()
                .contains("shodan_search")
        );
        assert!(executor.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_protocol_errors() {
        let (server, _) = server();
        let input = [
            "this is not json",
            r#"{"jsonrpc":"2.0","id":5,"method":"resources/list"}"#,
            r#"{"jsonrpc":"2.0","id":6,"method":"tools/call"}"#,
            r#"{"jsonrpc":"2.0","id":7,"method":"tools/call","params":{"name":"fofa_search","arguments":[1]}}"#,
            r#"[1,2,3]"#,
        ]
        .join("\n");

        let frames = run(&server, &input).await;
        assert_eq!(frames.len(), 5);

        assert!(frames[0]["id"].is_null());
        assert_eq!(frames[0]["error"]["code"], error_codes::PARSE_ERROR);
        assert_eq!(frames[1]["error"]["code"], error_codes::METHOD_NOT_FOUND);
        assert_eq!(frames[2]["error"]["code"], error_codes::INVALID_PARAMS);
        assert_eq!(frames[3]["error"]["code"], error_codes::INVALID_PARAMS);
        assert_eq!(frames[4]["error"]["code"], error_codes::INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_blank_lines_notifications_and_ping() {
        let (server, _) = server();
        let input = "\n   \n{\"jsonrpc\":\"2.0\",\"method\":\"notifications/cancelled\"}\n{\"jsonrpc\":\"2.0\",\"id\":9,\"method\":\"ping\"}\n";

        let frames = run(&server, input).await;
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0]["id"], 9);
        assert_eq!(frames[0]["result"], json!({}));
    }

    /// Joins rendered lines under a fixed header
    struct LinesRenderer;

    impl assetscope_application::ReportRenderer for LinesRenderer {
        fn render(
            &self,
            response: &assetscope_domain::SearchResponse,
            layout: &assetscope_domain::RecordLayout,
        ) -> String {
            let mut out = format!("搜索结果(共{}条):\n", response.total_count);
            for record in &response.records {
                out.push_str(&layout.render_line(record));
                out.push('\n');
            }
            out
        }
    }

    #[tokio::test]
    async fn test_fofa_call_through_dispatcher() {
        use crate::backends::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, build_http_client, fofa_backend};
        use assetscope_application::DispatchToolUseCase;
        use wiremock::matchers::{method, query_param};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let remote = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("page", "1"))
            .and(query_param("size", "50"))
            .and(query_param("fields", "ip,port,title"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": false,
                "results": [["1.1.1.1", "80", "A"], ["2.2.2.2", "443", "B"], ["3.3.3.3", "8080", "C"]]
            })))
            .expect(1)
            .mount(&remote)
            .await;

        let client = build_http_client(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT).unwrap();
        let dispatcher = DispatchToolUseCase::new(Arc::new(LinesRenderer))
            .register(Arc::new(fofa_backend(remote.uri(), "e", "k", client)));
        let server = McpServer::new(Arc::new(dispatcher), Arc::new(JsonSchemaToolConverter));

        let frames = run(
            &server,
            r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"fofa_search","arguments":{"query":"title=\"test\"","page":0,"size":0,"fields":"ip,port,title"}}}"#,
        )
        .await;

        assert_eq!(frames[0]["result"]["isError"], false);
        let text = frames[0]["result"]["content"][0]["text"].as_str().unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "搜索结果(共3条):");
        assert_eq!(lines.len(), 4);
        assert!(lines[1..].iter().all(|l| l.split(" | ").count() == 3));
    }

    #[tokio::test]
    async fn test_empty_input_ends_cleanly() {
        let (server, _) = server();
        assert!(run(&server, "").await.is_empty());
    }
}
