//! Report renderer port
//!
//! Turns a normalized [`SearchResponse`] into the text handed back to the
//! caller. Implementations must be pure: same input, same output, no I/O.

use assetscope_domain::{RecordLayout, SearchResponse};

/// Port for rendering search results as text
pub trait ReportRenderer: Send + Sync {
    /// Render the header and one line per record, in record order.
    fn render(&self, response: &SearchResponse, layout: &RecordLayout) -> String;
}
