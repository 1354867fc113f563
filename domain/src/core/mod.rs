//! Core domain concepts shared across all subdomains.
//!
//! - [`error::ConfigError`]: invalid gate configuration
//! - [`error::MatchError`]: malformed word lists

pub mod error;
