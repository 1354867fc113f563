//! Infrastructure layer for manual-approval
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus input loading and step outputs.

pub mod config;
pub mod github;
pub mod output;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig, GateSettings, RunContext};
pub use github::{GitHubConfig, GitHubTicketService};
pub use output::{OutputError, WorkflowOutput, duration_minutes};
