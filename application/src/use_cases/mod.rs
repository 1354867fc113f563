//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod poll_approval;
pub mod resolve_approvers;
pub mod run_gate;
pub mod ticket_lifecycle;

#[cfg(test)]
pub(crate) mod test_support;
