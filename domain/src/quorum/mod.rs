//! Approval quorum domain
//!
//! This module contains the voting rules of the approval gate.
//!
//! # Core Concepts
//!
//! ## Voters
//! A [`VoterSet`] is the ordered set of identities entitled to one counted
//! vote each, plus the quorum of approvals required.
//!
//! ## Replies and votes
//! A [`Reply`] becomes a [`Vote`] only when its author is still an eligible
//! voter and its body is a recognized word ([`WordMatcher`]).
//!
//! ## Decision
//! [`tally`] folds the full reply history into a [`DecisionStatus`]:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ for each reply (oldest first)                            │
//! │   author not in remaining pool ──────────► skip          │
//! │   Approve ──► count, remove author                       │
//! │               count == quorum ───────────► Approved      │
//! │   Deny ──────────────────────────────────► Denied        │
//! │   Neither ───────────────────────────────► continue      │
//! │ history exhausted ───────────────────────► Pending       │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod consensus;
pub mod vote;
pub mod voter_set;
pub mod words;

// Re-export main types
pub use consensus::{DecisionStatus, Tally, aggregate, tally};
pub use vote::{Reply, Verdict, Vote, VoteKind};
pub use voter_set::{VoterSet, parse_minimum_approvals};
pub use words::{DEFAULT_APPROVE_WORDS, DEFAULT_DENY_WORDS, WordMatcher, parse_additional_words};
