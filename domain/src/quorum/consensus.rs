//! Quorum-with-veto decision over the reply history.
//!
//! Approval needs `quorum` distinct approvals; denial needs a single deny
//! from any voter who has not already approved. The first counted action of
//! a voter is final.
//!
//! The fold is stateless: every poll re-runs it over the full history, so
//! the same history always produces the same [`DecisionStatus`].

use super::vote::{Reply, Vote, VoteKind};
use super::voter_set::VoterSet;
use super::words::WordMatcher;
use serde::{Deserialize, Serialize};

/// Outcome of evaluating the reply history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionStatus {
    /// Not enough approvals yet, no veto
    Pending,
    /// Quorum of approvals reached
    Approved,
    /// An eligible voter denied
    Denied,
}

impl DecisionStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, DecisionStatus::Pending)
    }
}

impl std::fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecisionStatus::Pending => write!(f, "pending"),
            DecisionStatus::Approved => write!(f, "approved"),
            DecisionStatus::Denied => write!(f, "denied"),
        }
    }
}

/// Status plus the votes that were counted to reach it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub status: DecisionStatus,
    /// Counted votes, in reply order; a deny vote can only be last
    pub votes: Vec<Vote>,
    /// Approvals needed to reach quorum
    pub needed: usize,
}

impl Tally {
    pub fn approvals(&self) -> usize {
        self.votes.iter().filter(|v| v.is_approval()).count()
    }

    /// Short progress line, e.g. "1/2 approvals (alice)".
    pub fn summary(&self) -> String {
        let approvers: Vec<&str> = self
            .votes
            .iter()
            .filter(|v| v.is_approval())
            .map(|v| v.author.as_str())
            .collect();
        if approvers.is_empty() {
            format!("0/{} approvals", self.needed)
        } else {
            format!(
                "{}/{} approvals ({})",
                approvers.len(),
                self.needed,
                approvers.join(", ")
            )
        }
    }
}

/// Evaluate the reply history and report the counted votes.
///
/// # Example
///
/// ```
/// use approval_domain::quorum::{tally, DecisionStatus, Reply, VoterSet, WordMatcher};
///
/// let voters = VoterSet::from_input(vec!["alice".into(), "bob".into()], "1").unwrap();
/// let matcher = WordMatcher::with_defaults().unwrap();
/// let replies = vec![Reply::new("mallory", "yes"), Reply::new("bob", "yes")];
///
/// let result = tally(&replies, &voters, &matcher);
/// assert_eq!(result.status, DecisionStatus::Approved);
/// assert_eq!(result.summary(), "1/1 approvals (bob)");
/// ```
pub fn tally(replies: &[Reply], voters: &VoterSet, matcher: &WordMatcher) -> Tally {
    let mut remaining: Vec<&str> = voters.identities().iter().map(String::as_str).collect();
    let mut votes = Vec::new();
    let needed = voters.quorum();

    for reply in replies {
        let Some(idx) = remaining.iter().position(|voter| *voter == reply.author) else {
            continue;
        };

        match matcher.classify(&reply.body).vote_kind() {
            Some(VoteKind::Approve) => {
                remaining.swap_remove(idx);
                votes.push(Vote::approve(reply.author.clone()));
                if votes.len() == needed {
                    return Tally {
                        status: DecisionStatus::Approved,
                        votes,
                        needed,
                    };
                }
            }
            Some(VoteKind::Deny) => {
                votes.push(Vote::deny(reply.author.clone()));
                return Tally {
                    status: DecisionStatus::Denied,
                    votes,
                    needed,
                };
            }
            None => {}
        }
    }

    Tally {
        status: DecisionStatus::Pending,
        votes,
        needed,
    }
}

/// Evaluate the reply history to a [`DecisionStatus`].
pub fn aggregate(replies: &[Reply], voters: &VoterSet, matcher: &WordMatcher) -> DecisionStatus {
    tally(replies, voters, matcher).status
}
