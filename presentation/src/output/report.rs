//! Plain-text search report
//!
//! ```text
//! 搜索结果(共3条):
//! 1.1.1.1 | 80 | A
//! 2.2.2.2 | 443 | B
//! 3.3.3.3 | 8080 | C
//! ```

use assetscope_application::ReportRenderer;
use assetscope_domain::{RecordLayout, SearchResponse};

/// Formats search results as the text returned by a tool call
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReportFormatter;

impl TextReportFormatter {
    pub fn header(total_count: u64) -> String {
        format!("搜索结果(共{}条):\n", total_count)
    }
}

impl ReportRenderer for TextReportFormatter {
    fn render(&self, response: &SearchResponse, layout: &RecordLayout) -> String {
        let mut output = Self::header(response.total_count);
        for record in &response.records {
            output.push_str(&layout.render_line(record));
            output.push('\n');
        }
        output
    }
}
