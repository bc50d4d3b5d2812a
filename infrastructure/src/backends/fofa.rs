//! `fofa_search`: the FOFA asset search engine.
//!
//! # Wire contract
//!
//! `GET {base_url}/search/all` with:
//!
//! | Param | Value |
//! |-------|-------|
//! | `qbase64` | query, standard base64 |
//! | `email`, `key` | account credentials |
//! | `page`, `size` | pagination |
//! | `fields` | comma separated selectors, omitted when unset |
//!
//! The envelope reports failure as `{"error": true, "errmsg": "..."}`.
//! `results` holds one row per hit, each row a list of strings in the
//! requested field order. With a single field FOFA flattens rows to bare
//! strings, so both shapes are accepted.
//!
//! # Output
//!
//! Every value of a row, in order, joined by ` | `. The header counts the
//! rows returned.

use super::http::{BackendContract, decode_envelope, endpoint_url};
use assetscope_application::ports::search_backend::SearchError;
use assetscope_domain::{
    AuthScheme, BackendDescriptor, QueryDefaults, QueryEncoding, QueryRequest, Record,
    RecordLayout, SearchResponse, ToolDefinition, ToolParameter, search::param,
};
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;

/// Canonical tool name.
pub const FOFA_SEARCH: &str = "fofa_search";

/// Backend identifier.
pub const FOFA_ID: &str = "fofa";

/// Public API base.
pub const FOFA_BASE_URL: &str = "https://fofa.info/api/v1";

/// Page size when the caller sends none.
pub const FOFA_DEFAULT_SIZE: i64 = 50;

/// Columns FOFA returns when `fields` is omitted.
const FOFA_DEFAULT_FIELDS: [&str; 3] = ["host", "ip", "port"];

/// FOFA reports failures with a flag, not a code.
const FOFA_ERROR_CODE: i64 = -1;

const QUERY_HELP: &str = "搜索查询语句，支持以下查询语法:
1. 基础查询: title=\"百度\"
2. IP查询: ip=\"1.1.1.1\"
3. 端口查询: port=\"80\"
4. 协议查询: protocol=\"http\"
5. 国家查询: country=\"CN\"
6. 域名查询: domain=\"qq.com\"
7. 操作系统查询: os=\"windows\"
8. 服务器查询: server=\"nginx\"
9. ICP备案查询: icp=\"京ICP备\"
10. 证书查询: cert=\"*.example.com\"
11. 组合查询: title=\"admin\" && country=\"US\"
12. 时间范围查询: after=\"2023-01-01\" && before=\"2023-12-31\"
13. 正则查询: title=~\"admin.*\"
14. 模糊查询: title=*\"管理后台\"
15. 排除查询: !title=\"test\"
示例: title=\"管理后台\" && country=\"CN\"";

const FIELDS_HELP: &str = "返回字段(逗号分隔)，可选值:
1. ip: IP地址
2. port: 端口
3. protocol: 协议名
4. country: 国家代码
5. country_name: 国家名
6. region: 区域
7. city: 城市
8. longitude: 经度
9. latitude: 纬度
10. asn: ASN编号
11. org: ASN组织
12. host: 主机名
13. domain: 域名
14. os: 操作系统
15. server: 网站server
16. icp: ICP备案号
17. title: 网站标题
18. jarm: JARM指纹
19. header: 网站header
20. banner: 协议banner
21. cert: 证书
22. base_protocol: 基础协议
23. link: 资产URL
示例: ip,port,title
默认: host,ip,port";

/// Descriptor for a FOFA account.
pub fn fofa_descriptor(
    base_url: impl Into<String>,
    email: impl Into<String>,
    key: impl Into<String>,
) -> BackendDescriptor {
    BackendDescriptor::new(
        FOFA_ID,
        base_url,
        AuthScheme::EmailKey {
            email: email.into(),
            key: key.into(),
        },
        QueryEncoding::Base64Standard,
    )
}

/// Create the [`ToolDefinition`] for `fofa_search`.
pub fn fofa_search_definition() -> ToolDefinition {
    ToolDefinition::new(FOFA_SEARCH, "FOFA搜索引擎")
        .with_parameter(ToolParameter::new(param::QUERY, QUERY_HELP, true))
        .with_parameter(
            ToolParameter::new(param::PAGE, "页码，默认为1", true)
                .with_type("integer")
                .with_default(1),
        )
        .with_parameter(
            ToolParameter::new(param::SIZE, "每页数量，默认为50", true)
                .with_type("integer")
                .with_default(FOFA_DEFAULT_SIZE),
        )
        .with_parameter(ToolParameter::new(param::FIELDS, FIELDS_HELP, false))
}

#[derive(Debug, Deserialize)]
struct FofaEnvelope {
    #[serde(default)]
    error: bool,
    #[serde(default)]
    errmsg: Option<String>,
    #[serde(default)]
    results: Option<Vec<Value>>,
}

/// Pull the numeric code out of messages like `[-700] Account Invalid`.
fn errmsg_code(message: &str) -> Option<i64> {
    let rest = message.trim_start().strip_prefix('[')?;
    let (code, _) = rest.split_once(']')?;
    code.trim().parse().ok()
}

/// FOFA wire contract
#[derive(Debug, Clone, Copy, Default)]
pub struct FofaContract;

impl BackendContract for FofaContract {
    fn tool_definition(&self) -> ToolDefinition {
        fofa_search_definition()
    }

    fn defaults(&self) -> QueryDefaults {
        QueryDefaults::new(FOFA_DEFAULT_SIZE)
    }

    fn record_layout(&self) -> RecordLayout {
        RecordLayout::all_fields()
    }

    fn build_url(
        &self,
        descriptor: &BackendDescriptor,
        request: &QueryRequest,
    ) -> Result<Url, SearchError> {
        let mut params: Vec<(&str, String)> = vec![(
            "qbase64",
            descriptor.encoding.encode(request.raw_query()),
        )];

        match &descriptor.auth {
            AuthScheme::EmailKey { email, key } => {
                params.push(("email", email.clone()));
                params.push(("key", key.clone()));
            }
            AuthScheme::ApiKey { key } => params.push(("key", key.clone())),
        }

        params.push(("page", request.page().to_string()));
        params.push(("size", request.size().to_string()));
        if let Some(fields) = request.fields() {
            params.push(("fields", fields.to_param()));
        }

        endpoint_url(&descriptor.base_url, "/search/all", &params)
    }

    fn parse_response(
        &self,
        request: &QueryRequest,
        body: &[u8],
    ) -> Result<SearchResponse, SearchError> {
        let envelope: FofaEnvelope = decode_envelope("FOFA", body)?;

        if envelope.error {
            let message = envelope
                .errmsg
                .unwrap_or_else(|| "FOFA reported an error without a message".to_string());
            let code = errmsg_code(&message).unwrap_or(FOFA_ERROR_CODE);
            return Ok(SearchResponse::failure(code, message));
        }

        let names: Vec<String> = match request.fields() {
            Some(fields) => fields.as_slice().to_vec(),
            None => FOFA_DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect(),
        };

        let records: Vec<Record> = envelope
            .results
            .unwrap_or_default()
            .into_iter()
            .map(|row| match row {
                Value::Array(values) => Record::from_row(&names, values),
                scalar => Record::from_row(&names, vec![scalar]),
            })
            .collect();

        Ok(SearchResponse::success(records.len() as u64, records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetscope_domain::{FieldSelection, SearchArguments};
    use serde_json::json;

    fn descriptor() -> BackendDescriptor {
        fofa_descriptor(FOFA_BASE_URL, "me@example.com", "k3y")
    }

    fn request(fields: Option<&str>) -> QueryRequest {
        QueryRequest::try_new("title=\"test\"", 1, 50)
            .unwrap()
            .with_fields(fields.and_then(FieldSelection::parse))
    }

    fn query_pairs(url: &Url) -> Vec<(String, String)> {
        url.query_pairs().into_owned().collect()
    }

    #[test]
    fn test_build_url() {
        let url = FofaContract
            .build_url(&descriptor(), &request(Some("ip,port,title")))
            .unwrap();

        assert_eq!(url.host_str(), Some("fofa.info"));
        assert_eq!(url.path(), "/api/v1/search/all");
        assert_eq!(
            query_pairs(&url),
            vec![
                ("qbase64".to_string(), "dGl0bGU9InRlc3Qi".to_string()),
                ("email".to_string(), "me@example.com".to_string()),
                ("key".to_string(), "k3y".to_string()),
                ("page".to_string(), "1".to_string()),
                ("size".to_string(), "50".to_string()),
                ("fields".to_string(), "ip,port,title".to_string()),
            ]
        );
    }

    #[test]
    fn test_build_url_omits_unset_fields() {
        let url = FofaContract.build_url(&descriptor(), &request(None)).unwrap();
        assert!(query_pairs(&url).iter().all(|(k, _)| k != "fields"));
    }

    #[test]
    fn test_encoded_query_round_trips() {
        let raw = "title=\"管理后台\" && country=\"CN\" || host=\"a+b/c\"";
        let request = QueryRequest::try_new(raw, 1, 10).unwrap();
        let url = FofaContract.build_url(&descriptor(), &request).unwrap();

        let encoded = query_pairs(&url)
            .into_iter()
            .find(|(k, _)| k == "qbase64")
            .map(|(_, v)| v)
            .unwrap();
        assert_eq!(
            QueryEncoding::Base64Standard.decode(&encoded).as_deref(),
            Some(raw)
        );
    }

    #[test]
    fn test_parse_rows_keyed_by_requested_fields() {
        let body = json!({
            "error": false,
            "mode": "extended",
            "page": 1,
            "size": 1200,
            "results": [
                ["1.1.1.1", "80", "Test A"],
                ["2.2.2.2", "443", "Test B"],
                ["3.3.3.3", "8080", "Test C"]
            ]
        });
        let response = FofaContract
            .parse_response(&request(Some("ip,port,title")), body.to_string().as_bytes())
            .unwrap();

        assert!(response.is_success());
        assert_eq!(response.total_count, 3);
        assert_eq!(response.records.len(), 3);
        assert_eq!(response.records[1].get("port"), Some(&json!("443")));
        assert_eq!(response.records[2].get("title"), Some(&json!("Test C")));
    }

    #[test]
    fn test_parse_single_field_flattened_rows() {
        let body = json!({"error": false, "results": ["1.1.1.1", "2.2.2.2"]});
        let response = FofaContract
            .parse_response(&request(Some("ip")), body.to_string().as_bytes())
            .unwrap();

        assert_eq!(response.records.len(), 2);
        assert_eq!(response.records[0].get("ip"), Some(&json!("1.1.1.1")));
    }

    #[test]
    fn test_parse_default_columns_when_fields_omitted() {
        let body = json!({"error": false, "results": [["example.com", "1.1.1.1", "80"]]});
        let response = FofaContract
            .parse_response(&request(None), body.to_string().as_bytes())
            .unwrap();

        let record = &response.records[0];
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["host", "ip", "port"]);
    }

    #[test]
    fn test_parse_null_results_is_empty() {
        let body = json!({"error": false, "results": null});
        let response = FofaContract
            .parse_response(&request(None), body.to_string().as_bytes())
            .unwrap();
        assert_eq!(response.total_count, 0);
        assert!(response.records.is_empty());
    }

    #[test]
    fn test_parse_error_flag() {
        let body = json!({"error": true, "errmsg": "[-700] Account Invalid"});
        let response = FofaContract
            .parse_response(&request(None), body.to_string().as_bytes())
            .unwrap();

        let failure = response.backend_error.unwrap();
        assert_eq!(failure.code, -700);
        assert_eq!(failure.message, "[-700] Account Invalid");
    }

    #[test]
    fn test_parse_error_flag_without_code() {
        let body = json!({"error": true, "errmsg": "查询语法错误"});
        let response = FofaContract
            .parse_response(&request(None), body.to_string().as_bytes())
            .unwrap();

        let failure = response.backend_error.unwrap();
        assert_eq!(failure.code, FOFA_ERROR_CODE);
        assert_eq!(failure.message, "查询语法错误");
    }

    #[test]
    fn test_parse_malformed_body_is_decode_error() {
        let err = FofaContract
            .parse_response(&request(None), b"<html>502 Bad Gateway</html>")
            .unwrap_err();
        assert!(matches!(err, SearchError::Decode(_)));
    }

    #[test]
    fn test_parse_non_object_body_is_decode_error() {
        for body in [&b"[]"[..], &b"[false]"[..], &b"\"ok\""[..]] {
            let err = FofaContract.parse_response(&request(None), body).unwrap_err();
            assert!(matches!(err, SearchError::Decode(_)));
        }
    }

    #[test]
    fn test_definition_matches_defaults() {
        let definition = fofa_search_definition();
        assert_eq!(definition.name, FOFA_SEARCH);
        assert_eq!(
            definition.parameter("size").unwrap().default_value,
            Some(json!(50))
        );
        assert!(!definition.parameter("fields").unwrap().required);
        assert!(definition.parameter("is_web").is_none());

        let args = FofaContract
            .defaults()
            .apply(SearchArguments::new("q").with_size(0));
        assert_eq!(args.size, Some(FOFA_DEFAULT_SIZE));
    }
}
