//! Use cases (application services)

pub mod dispatch_tool;
