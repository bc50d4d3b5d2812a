//! Generic HTTP search adapter
//!
//! [`HttpSearchBackend`] owns the parts every backend shares: one GET per
//! invocation, a bounded deadline, status checking and error mapping. The
//! wire contract (URL, auth parameters, encoding, envelope shape) is the
//! [`BackendContract`] strategy plugged into it.

use assetscope_application::ports::search_backend::{SearchBackend, SearchError};
use assetscope_domain::{
    BackendDescriptor, QueryDefaults, QueryRequest, RecordLayout, SearchResponse, ToolDefinition,
};
use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Default per-call deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default `User-Agent` header.
pub const DEFAULT_USER_AGENT: &str = concat!("assetscope/", env!("CARGO_PKG_VERSION"));

/// One backend's wire contract.
pub trait BackendContract: Send + Sync {
    fn tool_definition(&self) -> ToolDefinition;

    fn defaults(&self) -> QueryDefaults;

    fn record_layout(&self) -> RecordLayout;

    /// Outbound URL with the encoded query, auth material and every set
    /// parameter. Unset optional parameters are left out entirely.
    fn build_url(
        &self,
        descriptor: &BackendDescriptor,
        request: &QueryRequest,
    ) -> Result<Url, SearchError>;

    /// Normalize a 2xx body. A reported failure lands in
    /// `SearchResponse::backend_error`; a body that is not the expected JSON
    /// envelope is a [`SearchError::Decode`].
    fn parse_response(
        &self,
        request: &QueryRequest,
        body: &[u8],
    ) -> Result<SearchResponse, SearchError>;
}

/// Build the shared HTTP client with an explicit per-request deadline.
pub fn build_http_client(timeout: Duration, user_agent: &str) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
}

/// Join `base` and `path` and attach query parameters.
pub(crate) fn endpoint_url(
    base: &str,
    path: &str,
    params: &[(&str, String)],
) -> Result<Url, SearchError> {
    let endpoint = format!("{}{}", base.trim_end_matches('/'), path);
    Url::parse_with_params(&endpoint, params)
        .map_err(|e| SearchError::Transport(format!("invalid endpoint URL '{}': {}", endpoint, e)))
}

/// Human-readable transport failure without the request URL, which
/// carries credentials.
fn describe_transport_error(error: reqwest::Error) -> String {
    let kind = if error.is_timeout() {
        "request timed out"
    } else if error.is_connect() {
        "connection failed"
    } else {
        "request failed"
    };

    let error = error.without_url();
    let mut message = format!("{}: {}", kind, error);
    let mut source = std::error::Error::source(&error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Decode a response envelope, which must be a JSON object.
pub(crate) fn decode_envelope<T: DeserializeOwned>(
    backend: &str,
    body: &[u8],
) -> Result<T, SearchError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| SearchError::Decode(format!("invalid {} response: {}", backend, e)))?;
    if !value.is_object() {
        return Err(SearchError::Decode(format!(
            "invalid {} response: expected a JSON object, got {}",
            backend, value
        )));
    }
    serde_json::from_value(value)
        .map_err(|e| SearchError::Decode(format!("invalid {} response: {}", backend, e)))
}

/// Search backend speaking HTTP GET + JSON
pub struct HttpSearchBackend<C: BackendContract> {
    descriptor: BackendDescriptor,
    contract: C,
    client: reqwest::Client,
}

impl<C: BackendContract> HttpSearchBackend<C> {
    pub fn new(descriptor: BackendDescriptor, contract: C, client: reqwest::Client) -> Self {
        Self {
            descriptor,
            contract,
            client,
        }
    }

    pub fn build_request(&self, request: &QueryRequest) -> Result<Url, SearchError> {
        self.contract.build_url(&self.descriptor, request)
    }

    pub fn parse_response(
        &self,
        request: &QueryRequest,
        body: &[u8],
    ) -> Result<SearchResponse, SearchError> {
        self.contract.parse_response(request, body)
    }
}

#[async_trait]
impl<C: BackendContract> SearchBackend for HttpSearchBackend<C> {
    fn descriptor(&self) -> &BackendDescriptor {
        &self.descriptor
    }

    fn tool_definition(&self) -> ToolDefinition {
        self.contract.tool_definition()
    }

    fn defaults(&self) -> QueryDefaults {
        self.contract.defaults()
    }

    fn record_layout(&self) -> RecordLayout {
        self.contract.record_layout()
    }

    async fn search(&self, request: &QueryRequest) -> Result<SearchResponse, SearchError> {
        let url = self.build_request(request)?;
        debug!(
            backend = %self.descriptor.id,
            host = url.host_str().unwrap_or_default(),
            page = request.page(),
            size = request.size(),
            "Sending search request"
        );

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::Transport(describe_transport_error(e)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| SearchError::Transport(describe_transport_error(e)))?;

        if !status.is_success() {
            return Err(SearchError::Decode(format!(
                "{} returned HTTP {}",
                self.descriptor.id, status
            )));
        }

        debug!(
            backend = %self.descriptor.id,
            bytes = body.len(),
            "Received search response"
        );

        let parsed = self.parse_response(request, &body)?;
        if let Some(failure) = parsed.backend_error {
            return Err(SearchError::Backend {
                code: failure.code,
                message: failure.message,
            });
        }
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_joins_and_encodes() {
        let url = endpoint_url(
            "https://example.com/api/v1/",
            "/search/all",
            &[("qbase64", "a+b/c=".to_string()), ("page", "1".to_string())],
        )
        .unwrap();

        assert_eq!(url.path(), "/api/v1/search/all");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("qbase64".to_string(), "a+b/c=".to_string()),
                ("page".to_string(), "1".to_string())
            ]
        );
    }

    #[test]
    fn test_decode_envelope_requires_object() {
        #[derive(Debug, serde::Deserialize)]
        struct Envelope {
            #[serde(default)]
            code: i64,
        }

        let envelope: Envelope = decode_envelope("test", br#"{"code": 7}"#).unwrap();
        assert_eq!(envelope.code, 7);

        let bodies: [&[u8]; 5] = [b"[]", b"[200]", b"200", b"\"ok\"", b"null"];
        for body in bodies {
            let err = decode_envelope::<Envelope>("test", body).unwrap_err();
            assert!(matches!(err, SearchError::Decode(_)), "body {:?}", body);
        }
    }

    #[test]
    fn test_endpoint_url_rejects_garbage_base() {
        let err = endpoint_url("not a url", "/search", &[]).unwrap_err();
        assert!(matches!(err, SearchError::Transport(_)));
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT).is_ok());
    }
}
