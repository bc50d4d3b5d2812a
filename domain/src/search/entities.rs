//! Search domain entities
//!
//! [`BackendDescriptor`] identifies one search engine for the lifetime of the
//! process. [`QueryRequest`] is the normalized, validated query handed to an
//! adapter; it is built fresh for every invocation and never mutated.

use super::encoding::QueryEncoding;
use crate::core::error::DomainError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format accepted for time range bounds.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Authentication material for a search backend.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthScheme {
    /// Account email plus API key (FOFA)
    EmailKey { email: String, key: String },
    /// Single API key (Hunter)
    ApiKey { key: String },
}

impl std::fmt::Debug for AuthScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthScheme::EmailKey { email, .. } => f
                .debug_struct("EmailKey")
                .field("email", email)
                .field("key", &"<redacted>")
                .finish(),
            AuthScheme::ApiKey { .. } => f
                .debug_struct("ApiKey")
                .field("key", &"<redacted>")
                .finish(),
        }
    }
}

/// Immutable description of one search engine.
///
/// Built once at startup from credentials and configuration, then moved
/// into the adapter that serves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendDescriptor {
    /// Stable identifier (e.g. "fofa", "hunter")
    pub id: String,
    /// Search endpoint base URL
    pub base_url: String,
    /// Credentials sent with every request
    pub auth: AuthScheme,
    /// How the raw query is encoded on the wire
    pub encoding: QueryEncoding,
}

impl BackendDescriptor {
    pub fn new(
        id: impl Into<String>,
        base_url: impl Into<String>,
        auth: AuthScheme,
        encoding: QueryEncoding,
    ) -> Self {
        Self {
            id: id.into(),
            base_url: base_url.into(),
            auth,
            encoding,
        }
    }
}

/// Asset-type filter (Hunter `is_web`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    /// Web assets only
    Web,
    /// Non-web assets only
    NonWeb,
    /// Everything
    All,
}

impl AssetType {
    /// Wire code used by the backend
    pub fn code(&self) -> i64 {
        match self {
            AssetType::Web => 1,
            AssetType::NonWeb => 2,
            AssetType::All => 3,
        }
    }

    pub fn from_code(code: i64) -> Result<Self, DomainError> {
        match code {
            1 => Ok(AssetType::Web),
            2 => Ok(AssetType::NonWeb),
            3 => Ok(AssetType::All),
            other => Err(DomainError::InvalidAssetType(other)),
        }
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Optional date bounds. An absent bound means unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl TimeRange {
    /// Parse `YYYY-MM-DD` bounds. Empty strings count as absent.
    ///
    /// Returns `Ok(None)` when both bounds are absent.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Option<Self>, DomainError> {
        let start = parse_bound("start_time", start)?;
        let end = parse_bound("end_time", end)?;

        if let (Some(s), Some(e)) = (start, end)
            && s > e
        {
            return Err(DomainError::InvertedTimeRange {
                start: s.format(DATE_FORMAT).to_string(),
                end: e.format(DATE_FORMAT).to_string(),
            });
        }

        if start.is_none() && end.is_none() {
            Ok(None)
        } else {
            Ok(Some(Self { start, end }))
        }
    }

    pub fn start_str(&self) -> Option<String> {
        self.start.map(|d| d.format(DATE_FORMAT).to_string())
    }

    pub fn end_str(&self) -> Option<String> {
        self.end.map(|d| d.format(DATE_FORMAT).to_string())
    }
}

fn parse_bound(field: &str, value: Option<&str>) -> Result<Option<NaiveDate>, DomainError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => NaiveDate::parse_from_str(v, DATE_FORMAT)
            .map(Some)
            .map_err(|_| DomainError::InvalidDate {
                field: field.to_string(),
                value: v.to_string(),
            }),
    }
}

/// Ordered set of field selectors.
///
/// Order is preserved because it decides the column order of row-shaped
/// results; duplicates keep their first position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSelection {
    fields: Vec<String>,
}

impl FieldSelection {
    /// Parse a comma separated selector list.
    ///
    /// Returns `None` when nothing but separators and whitespace remains.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut fields: Vec<String> = Vec::new();
        for field in raw.split(',').map(str::trim).filter(|f| !f.is_empty()) {
            if !fields.iter().any(|f| f == field) {
                fields.push(field.to_string());
            }
        }
        if fields.is_empty() {
            None
        } else {
            Some(Self { fields })
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Wire form: comma joined, no spaces
    pub fn to_param(&self) -> String {
        self.fields.join(",")
    }
}

/// A validated search request (Value Object)
///
/// `page` and `size` are at least 1 by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    raw_query: String,
    page: u32,
    size: u32,
    fields: Option<FieldSelection>,
    time_range: Option<TimeRange>,
    asset_type: Option<AssetType>,
}

impl QueryRequest {
    pub fn try_new(raw_query: impl Into<String>, page: i64, size: i64) -> Result<Self, DomainError> {
        let raw_query = raw_query.into();
        if raw_query.trim().is_empty() {
            return Err(DomainError::EmptyQuery);
        }
        let page = u32::try_from(page)
            .ok()
            .filter(|p| *p >= 1)
            .ok_or(DomainError::InvalidPage(page))?;
        let size = u32::try_from(size)
            .ok()
            .filter(|s| *s >= 1)
            .ok_or(DomainError::InvalidSize(size))?;

        Ok(Self {
            raw_query,
            page,
            size,
            fields: None,
            time_range: None,
            asset_type: None,
        })
    }

    pub fn with_fields(mut self, fields: Option<FieldSelection>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_time_range(mut self, time_range: Option<TimeRange>) -> Self {
        self.time_range = time_range;
        self
    }

    pub fn with_asset_type(mut self, asset_type: Option<AssetType>) -> Self {
        self.asset_type = asset_type;
        self
    }

    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn fields(&self) -> Option<&FieldSelection> {
        self.fields.as_ref()
    }

    pub fn time_range(&self) -> Option<&TimeRange> {
        self.time_range.as_ref()
    }

    pub fn asset_type(&self) -> Option<AssetType> {
        self.asset_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_request_rejects_zero_page_and_size() {
        assert_eq!(
            QueryRequest::try_new("ip=\"1.1.1.1\"", 0, 10),
            Err(DomainError::InvalidPage(0))
        );
        assert_eq!(
            QueryRequest::try_new("ip=\"1.1.1.1\"", 1, -5),
            Err(DomainError::InvalidSize(-5))
        );
    }

    #[test]
    fn test_query_request_rejects_blank_query() {
        assert_eq!(
            QueryRequest::try_new("   ", 1, 10),
            Err(DomainError::EmptyQuery)
        );
    }

    #[test]
    fn test_query_request_builder() {
        let request = QueryRequest::try_new("title=\"test\"", 2, 20)
            .unwrap()
            .with_fields(FieldSelection::parse("ip,port"))
            .with_asset_type(Some(AssetType::All));

        assert_eq!(request.raw_query(), "title=\"test\"");
        assert_eq!(request.page(), 2);
        assert_eq!(request.size(), 20);
        assert_eq!(request.fields().unwrap().to_param(), "ip,port");
        assert_eq!(request.asset_type(), Some(AssetType::All));
        assert!(request.time_range().is_none());
    }

    #[test]
    fn test_field_selection_keeps_order_and_drops_duplicates() {
        let fields = FieldSelection::parse(" ip, port ,,title,ip ").unwrap();
        assert_eq!(fields.as_slice(), &["ip", "port", "title"]);
        assert_eq!(fields.to_param(), "ip,port,title");
        assert!(FieldSelection::parse(" , ,").is_none());
    }

    #[test]
    fn test_asset_type_codes() {
        assert_eq!(AssetType::from_code(1), Ok(AssetType::Web));
        assert_eq!(AssetType::from_code(3).unwrap().code(), 3);
        assert_eq!(
            AssetType::from_code(7),
            Err(DomainError::InvalidAssetType(7))
        );
    }

    #[test]
    fn test_time_range_parse() {
        assert_eq!(TimeRange::parse(None, Some("")), Ok(None));

        let range = TimeRange::parse(Some("2024-01-01"), None).unwrap().unwrap();
        assert_eq!(range.start_str().as_deref(), Some("2024-01-01"));
        assert!(range.end.is_none());

        assert!(matches!(
            TimeRange::parse(Some("2024/01/01"), None),
            Err(DomainError::InvalidDate { .. })
        ));
        assert!(matches!(
            TimeRange::parse(Some("2024-06-01"), Some("2024-01-01")),
            Err(DomainError::InvertedTimeRange { .. })
        ));
    }

    #[test]
    fn test_auth_scheme_debug_redacts_key() {
        let auth = AuthScheme::EmailKey {
            email: "me@example.com".to_string(),
            key: "secret-key".to_string(),
        };
        let debug = format!("{:?}", auth);
        assert!(debug.contains("me@example.com"));
        assert!(!debug.contains("secret-key"));
    }
}
