//! Approval ticket state machine.

use crate::quorum::DecisionStatus;
use serde::{Deserialize, Serialize};

/// Lifecycle state of the approval ticket
///
/// ```text
///        ┌──► ClosedApproved
/// Open ──┼──► ClosedDenied
///        └──► ClosedCancelled
/// ```
///
/// Transitions only move forward; a closed ticket is never reopened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TicketState {
    #[default]
    Open,
    ClosedApproved,
    ClosedDenied,
    ClosedCancelled,
}

impl TicketState {
    pub fn is_open(&self) -> bool {
        matches!(self, TicketState::Open)
    }

    /// Closed state for a terminal decision, `None` for `Pending`.
    pub fn closed_for(status: DecisionStatus) -> Option<TicketState> {
        match status {
            DecisionStatus::Approved => Some(TicketState::ClosedApproved),
            DecisionStatus::Denied => Some(TicketState::ClosedDenied),
            DecisionStatus::Pending => None,
        }
    }

    /// Whether moving from `self` to `next` is allowed.
    pub fn can_transition_to(&self, next: TicketState) -> bool {
        self.is_open() && !next.is_open()
    }
}

impl std::fmt::Display for TicketState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TicketState::Open => "open",
            TicketState::ClosedApproved => "closed (approved)",
            TicketState::ClosedDenied => "closed (denied)",
            TicketState::ClosedCancelled => "closed (cancelled)",
        };
        write!(f, "{}", s)
    }
}
