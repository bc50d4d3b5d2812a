//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: argument and request validation errors

pub mod error;
