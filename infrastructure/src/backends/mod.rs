//! Search backend adapters
//!
//! Each engine is an [`HttpSearchBackend`] paired with its wire contract:
//!
//! | Tool | Contract | Encoding | Auth |
//! |------|----------|----------|------|
//! | `fofa_search` | [`FofaContract`] | standard base64 | `email` + `key` |
//! | `hunter_search` | [`HunterContract`] | URL-safe base64 | `api-key` |

pub mod fofa;
pub mod http;
pub mod hunter;

pub use fofa::{FOFA_BASE_URL, FOFA_SEARCH, FofaContract, fofa_descriptor, fofa_search_definition};
pub use http::{
    BackendContract, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, HttpSearchBackend, build_http_client,
};
pub use hunter::{
    HUNTER_BASE_URL, HUNTER_SEARCH, HunterContract, hunter_descriptor, hunter_search_definition,
};

/// FOFA adapter
pub type FofaBackend = HttpSearchBackend<FofaContract>;

/// Hunter adapter
pub type HunterBackend = HttpSearchBackend<HunterContract>;

/// Build the FOFA adapter around a shared client.
pub fn fofa_backend(
    base_url: impl Into<String>,
    email: impl Into<String>,
    key: impl Into<String>,
    client: reqwest::Client,
) -> FofaBackend {
    HttpSearchBackend::new(fofa_descriptor(base_url, email, key), FofaContract, client)
}

/// Build the Hunter adapter around a shared client.
pub fn hunter_backend(
    base_url: impl Into<String>,
    key: impl Into<String>,
    client: reqwest::Client,
) -> HunterBackend {
    HttpSearchBackend::new(hunter_descriptor(base_url, key), HunterContract, client)
}
