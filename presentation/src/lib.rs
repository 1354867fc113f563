//! Presentation layer for manual-approval
//!
//! This crate contains the CLI definition and console output formatting.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{Cli, InputArgs};
pub use output::console::ConsoleFormatter;
