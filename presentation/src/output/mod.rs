//! Output formatting for tool results

pub mod report;

pub use report::TextReportFormatter;
