//! Search domain module
//!
//! Pure types describing one asset search, independent of any particular
//! backend's wire format.
//!
//! ```text
//! SearchArguments ──QueryDefaults──▶ QueryRequest ──adapter──▶ SearchResponse
//!   (raw tool args)   (per backend)   (validated)               (normalized)
//!                                                                   │
//!                                                   RecordLayout ◀──┘
//!                                                   (per backend)
//! ```
//!
//! - [`QueryRequest`]: validated, immutable query (`page ≥ 1`, `size ≥ 1`)
//! - [`QueryDefaults`]: per-backend defaulting policy, idempotent
//! - [`QueryEncoding`]: per-backend encoding of the raw query text
//! - [`SearchResponse`] / [`Record`]: normalized output with no fixed schema
//! - [`RecordLayout`]: per-backend choice of which keys a report line shows

pub mod defaults;
pub mod encoding;
pub mod entities;
pub mod layout;
pub mod value_objects;

pub use defaults::{DEFAULT_PAGE, QueryDefaults, SearchArguments, param};
pub use encoding::QueryEncoding;
pub use entities::{AssetType, AuthScheme, BackendDescriptor, FieldSelection, QueryRequest, TimeRange};
pub use layout::{FIELD_SEPARATOR, LabeledField, RecordLayout, display_value};
pub use value_objects::{BackendFailure, Record, SearchResponse};
