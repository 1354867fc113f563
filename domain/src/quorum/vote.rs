//! Vote types for the approval quorum
//!
//! A [`Reply`] is raw ticket input; a [`Vote`] is what a reply becomes once
//! its author is an eligible voter and its body matches a word list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Classification of a single reply body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Approve,
    Deny,
    Neither,
}

impl Verdict {
    /// The vote this verdict casts, if any.
    pub fn vote_kind(self) -> Option<VoteKind> {
        match self {
            Verdict::Approve => Some(VoteKind::Approve),
            Verdict::Deny => Some(VoteKind::Deny),
            Verdict::Neither => None,
        }
    }
}

/// Kind of a counted vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteKind {
    Approve,
    Deny,
}

impl std::fmt::Display for VoteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoteKind::Approve => write!(f, "approve"),
            VoteKind::Deny => write!(f, "deny"),
        }
    }
}

/// A counted vote from an eligible voter
///
/// # Example
///
/// ```
/// use approval_domain::quorum::{Vote, VoteKind};
///
/// let vote = Vote::approve("alice");
/// assert_eq!(vote.kind, VoteKind::Approve);
/// assert!(vote.is_approval());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub author: String,
    pub kind: VoteKind,
}

impl Vote {
    pub fn new(author: impl Into<String>, kind: VoteKind) -> Self {
        Self {
            author: author.into(),
            kind,
        }
    }

    pub fn approve(author: impl Into<String>) -> Self {
        Self::new(author, VoteKind::Approve)
    }

    pub fn deny(author: impl Into<String>) -> Self {
        Self::new(author, VoteKind::Deny)
    }

    pub fn is_approval(&self) -> bool {
        self.kind == VoteKind::Approve
    }
}

/// A comment on the approval ticket, in delivery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    /// Login of the comment author
    pub author: String,
    /// Raw comment body
    pub body: String,
    /// Creation time reported by the ticket service
    pub created_at: Option<DateTime<Utc>>,
}

impl Reply {
    pub fn new(author: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            body: body.into(),
            created_at: None,
        }
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}
