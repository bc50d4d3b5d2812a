//! Query encoding strategies
//!
//! Each backend expects the raw query text in its own byte encoding. The two
//! schemes are not interchangeable: standard base64 uses `+` and `/`, which a
//! backend decoding URL-safe base64 rejects, and vice versa.

use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use serde::{Deserialize, Serialize};

/// How a backend wants `raw_query` encoded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryEncoding {
    /// RFC 4648 standard alphabet, padded (FOFA `qbase64`)
    Base64Standard,
    /// RFC 4648 URL-safe alphabet, padded (Hunter `search`)
    Base64UrlSafe,
}

impl QueryEncoding {
    pub fn encode(&self, raw: &str) -> String {
        match self {
            QueryEncoding::Base64Standard => STANDARD.encode(raw.as_bytes()),
            QueryEncoding::Base64UrlSafe => URL_SAFE.encode(raw.as_bytes()),
        }
    }

    /// Inverse of [`encode`](Self::encode). `None` if the input is not valid
    /// for this alphabet or does not decode to UTF-8.
    pub fn decode(&self, encoded: &str) -> Option<String> {
        let bytes = match self {
            QueryEncoding::Base64Standard => STANDARD.decode(encoded),
            QueryEncoding::Base64UrlSafe => URL_SAFE.decode(encoded),
        }
        .ok()?;
        String::from_utf8(bytes).ok()
    }
}
