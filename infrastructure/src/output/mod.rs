//! Workflow step outputs

mod workflow_output;

pub use workflow_output::{OutputError, WorkflowOutput, duration_minutes};
