//! Domain layer for manual-approval
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Quorum with veto
//!
//! A workflow waits on a bounded set of human voters who reply on an
//! approval ticket:
//!
//! - **Approval**: `quorum` distinct voters reply with an approve word
//! - **Veto**: a single eligible voter replies with a deny word
//!
//! ## Ticket
//!
//! The ticket is the voting medium. It moves from `Open` to exactly one
//! closed state and is never reopened.

pub mod core;
pub mod quorum;
pub mod ticket;
pub mod util;

// Re-export commonly used types
pub use core::error::{ConfigError, MatchError};
pub use quorum::{
    DecisionStatus, Reply, Tally, Verdict, Vote, VoteKind, VoterSet, WordMatcher, aggregate, tally,
};
pub use ticket::{TicketState, WorkflowRun};
