//! Presentation layer for assetscope
//!
//! This crate contains the CLI definitions and the text report formatter.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{Cli, Command};
pub use output::TextReportFormatter;
