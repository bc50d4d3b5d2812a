//! `hunter_search`: the Qianxin Hunter asset search engine.
//!
//! `GET {base_url}?api-key=..&search=..&page=..&page_size=..&is_web=..`
//! with the query in URL-safe base64. `start_time` / `end_time` are only
//! sent when set.
//!
//! The envelope is `{"code": 200, "message": "...", "data": {"total": N,
//! "arr": [...]}}`; any other `code` is a failure whose `message` is
//! surfaced verbatim. Records are JSON objects rendered as
//! `IP: .. | 端口: .. | 标题: ..`. The header reports `data.total`, which
//! may exceed the rows on the page.

use super::http::{BackendContract, decode_envelope, endpoint_url};
use assetscope_application::ports::search_backend::SearchError;
use assetscope_domain::{
    AssetType, AuthScheme, BackendDescriptor, LabeledField, QueryDefaults, QueryEncoding,
    QueryRequest, Record, RecordLayout, SearchResponse, ToolDefinition, ToolParameter,
    search::param,
};
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;

/// Canonical tool name.
pub const HUNTER_SEARCH: &str = "hunter_search";

/// Backend identifier.
pub const HUNTER_ID: &str = "hunter";

/// Public API endpoint.
pub const HUNTER_BASE_URL: &str = "https://hunter.qianxin.com/openApi/search";

/// Page size when the caller sends none.
pub const HUNTER_DEFAULT_SIZE: i64 = 20;

const HUNTER_OK: i64 = 200;

const QUERY_HELP: &str = "搜索查询语句。支持以下语法:
- IP搜索: ip=\"1.1.1.1\" 或 ip=\"220.181.111.0/24\"
- 端口搜索: ip.port=\"80\"
- 域名搜索: domain=\"example.com\"
- Web标题搜索: web.title=\"登录页面\"
- 响应头搜索: header.server=\"Microsoft-IIS/10\"
- 资产类型: is_web=true(web资产)
示例: ip=\"1.1.1.1\" && ip.port=\"80\"";

/// Descriptor for a Hunter API key.
pub fn hunter_descriptor(base_url: impl Into<String>, key: impl Into<String>) -> BackendDescriptor {
    BackendDescriptor::new(
        HUNTER_ID,
        base_url,
        AuthScheme::ApiKey { key: key.into() },
        QueryEncoding::Base64UrlSafe,
    )
}

/// Create the [`ToolDefinition`] for `hunter_search`.
pub fn hunter_search_definition() -> ToolDefinition {
    ToolDefinition::new(HUNTER_SEARCH, "Hunter搜索引擎")
        .with_parameter(ToolParameter::new(param::QUERY, QUERY_HELP, true))
        .with_parameter(
            ToolParameter::new(param::PAGE, "页码，默认为1", true)
                .with_type("integer")
                .with_default(1),
        )
        .with_parameter(
            ToolParameter::new(param::SIZE, "每页数量，默认为20", true)
                .with_type("integer")
                .with_default(HUNTER_DEFAULT_SIZE),
        )
        .with_parameter(
            ToolParameter::new(
                param::IS_WEB,
                "资产类型: 1(web资产), 2(非web资产), 3(全部)",
                true,
            )
            .with_type("integer")
            .with_default(AssetType::Web.code()),
        )
        .with_parameter(ToolParameter::new(
            param::START_TIME,
            "开始时间，格式为YYYY-MM-DD",
            false,
        ))
        .with_parameter(ToolParameter::new(
            param::END_TIME,
            "结束时间，格式为YYYY-MM-DD",
            false,
        ))
}

#[derive(Debug, Deserialize)]
struct HunterEnvelope {
    code: i64,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<HunterData>,
}

#[derive(Debug, Deserialize)]
struct HunterData {
    #[serde(default)]
    total: Option<u64>,
    #[serde(default)]
    arr: Option<Vec<Value>>,
}

/// Hunter wire contract
#[derive(Debug, Clone, Copy, Default)]
pub struct HunterContract;

impl BackendContract for HunterContract {
    fn tool_definition(&self) -> ToolDefinition {
        hunter_search_definition()
    }

    fn defaults(&self) -> QueryDefaults {
        QueryDefaults::new(HUNTER_DEFAULT_SIZE).with_asset_type(AssetType::Web)
    }

    fn record_layout(&self) -> RecordLayout {
        RecordLayout::labeled([
            LabeledField::new("ip", "IP"),
            LabeledField::new("port", "端口"),
            LabeledField::new("web_title", "标题"),
        ])
    }

    fn build_url(
        &self,
        descriptor: &BackendDescriptor,
        request: &QueryRequest,
    ) -> Result<Url, SearchError> {
        let key = match &descriptor.auth {
            AuthScheme::ApiKey { key } | AuthScheme::EmailKey { key, .. } => key.clone(),
        };
        let asset_type = request.asset_type().unwrap_or(AssetType::Web);

        let mut params: Vec<(&str, String)> = vec![
            ("api-key", key),
            ("search", descriptor.encoding.encode(request.raw_query())),
            ("page", request.page().to_string()),
            ("page_size", request.size().to_string()),
            ("is_web", asset_type.code().to_string()),
        ];
        if let Some(range) = request.time_range() {
            if let Some(start) = range.start_str() {
                params.push(("start_time", start));
            }
            if let Some(end) = range.end_str() {
                params.push(("end_time", end));
            }
        }

        endpoint_url(&descriptor.base_url, "", &params)
    }

    fn parse_response(
        &self,
        _request: &QueryRequest,
        body: &[u8],
    ) -> Result<SearchResponse, SearchError> {
        let envelope: HunterEnvelope = decode_envelope("Hunter", body)?;

        if envelope.code != HUNTER_OK {
            let message = envelope
                .message
                .unwrap_or_else(|| format!("Hunter returned code {}", envelope.code));
            return Ok(SearchResponse::failure(envelope.code, message));
        }

        let Some(data) = envelope.data else {
            return Ok(SearchResponse::success(0, Vec::new()));
        };

        let records = data
            .arr
            .unwrap_or_default()
            .into_iter()
            .map(|item| match item {
                Value::Object(object) => Ok(Record::from_object(object)),
                other => Err(SearchError::Decode(format!(
                    "Hunter record is not an object: {}",
                    other
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SearchResponse::success(data.total.unwrap_or(0), records))
    }
}
