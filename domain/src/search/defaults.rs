//! Argument defaulting
//!
//! Tool parameters such as `page` and `size` are declared required by the
//! protocol, yet callers routinely send `0` or omit them. [`QueryDefaults`]
//! fills those gaps per backend before a [`QueryRequest`] is built.
//!
//! | Parameter | Rule |
//! |-----------|------|
//! | `page` | `< 1` or unset → `1` |
//! | `size` | `< 1` or unset → backend default (FOFA 50, Hunter 20) |
//! | `is_web` | `0` or unset → backend default (Hunter: web assets) |
//! | `start_time` / `end_time` | no default, empty means absent |
//!
//! [`QueryDefaults::apply`] is idempotent.

use super::entities::{AssetType, FieldSelection, QueryRequest, TimeRange};
use crate::core::error::DomainError;
use crate::tool::entities::ToolCall;

/// Page used when the caller sends none.
pub const DEFAULT_PAGE: i64 = 1;

/// Argument names shared by every search tool.
pub mod param {
    pub const QUERY: &str = "query";
    pub const PAGE: &str = "page";
    pub const SIZE: &str = "size";
    pub const FIELDS: &str = "fields";
    pub const IS_WEB: &str = "is_web";
    pub const START_TIME: &str = "start_time";
    pub const END_TIME: &str = "end_time";
}

/// Raw tool arguments, after type checking but before defaulting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchArguments {
    pub query: String,
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub fields: Option<String>,
    pub asset_type: Option<i64>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl SearchArguments {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Extract arguments from a tool call, checking JSON types only.
    pub fn from_call(call: &ToolCall) -> Result<Self, String> {
        Ok(Self {
            query: call.require_string(param::QUERY)?.to_string(),
            page: call.integer_arg(param::PAGE)?,
            size: call.integer_arg(param::SIZE)?,
            fields: call.string_arg(param::FIELDS)?.map(str::to_string),
            asset_type: call.integer_arg(param::IS_WEB)?,
            start_time: call.string_arg(param::START_TIME)?.map(str::to_string),
            end_time: call.string_arg(param::END_TIME)?.map(str::to_string),
        })
    }

    pub fn with_page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_size(mut self, size: i64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    pub fn with_asset_type(mut self, asset_type: i64) -> Self {
        self.asset_type = Some(asset_type);
        self
    }

    pub fn with_time_range(
        mut self,
        start: Option<impl Into<String>>,
        end: Option<impl Into<String>>,
    ) -> Self {
        self.start_time = start.map(Into::into);
        self.end_time = end.map(Into::into);
        self
    }
}

/// Per-backend default policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryDefaults {
    pub size: i64,
    /// `None` for backends without an asset-type filter
    pub asset_type: Option<AssetType>,
}

impl QueryDefaults {
    pub const fn new(size: i64) -> Self {
        Self {
            size,
            asset_type: None,
        }
    }

    pub const fn with_asset_type(self, asset_type: AssetType) -> Self {
        Self {
            asset_type: Some(asset_type),
            ..self
        }
    }

    /// Fill unset or out-of-range values.
    pub fn apply(&self, mut args: SearchArguments) -> SearchArguments {
        if args.page.is_none_or(|p| p < 1) {
            args.page = Some(DEFAULT_PAGE);
        }
        if args.size.is_none_or(|s| s < 1) {
            args.size = Some(self.size);
        }
        if let Some(default) = self.asset_type
            && args.asset_type.is_none_or(|code| code == 0)
        {
            args.asset_type = Some(default.code());
        }
        if args.fields.as_deref().is_some_and(|f| f.trim().is_empty()) {
            args.fields = None;
        }
        if args.start_time.as_deref().is_some_and(|s| s.trim().is_empty()) {
            args.start_time = None;
        }
        if args.end_time.as_deref().is_some_and(|s| s.trim().is_empty()) {
            args.end_time = None;
        }
        args
    }

    /// Apply defaults, then validate into a [`QueryRequest`].
    pub fn build_request(&self, args: SearchArguments) -> Result<QueryRequest, DomainError> {
        let args = self.apply(args);

        let asset_type = args.asset_type.map(AssetType::from_code).transpose()?;
        let time_range = TimeRange::parse(args.start_time.as_deref(), args.end_time.as_deref())?;
        let fields = args.fields.as_deref().and_then(FieldSelection::parse);

        Ok(QueryRequest::try_new(
            args.query,
            args.page.unwrap_or(DEFAULT_PAGE),
            args.size.unwrap_or(self.size),
        )?
        .with_fields(fields)
        .with_time_range(time_range)
        .with_asset_type(asset_type))
    }
}
