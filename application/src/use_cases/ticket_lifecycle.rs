//! Ticket lifecycle driver
//!
//! Owns the approval ticket's state machine and performs every remote
//! state change through the [`TicketService`] port:
//!
//! ```text
//! open ──► Open ──close(Approved)──► ClosedApproved
//!               ──close(Denied)────► ClosedDenied
//!               ──cancel───────────► ClosedCancelled
//! ```

use crate::ports::ticket_service::{NewTicket, RemoteState, ServiceError, TicketRef, TicketService};
use approval_domain::ticket::{ticket_body, ticket_title};
use approval_domain::{DecisionStatus, TicketState, WordMatcher, WorkflowRun};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors from ticket lifecycle operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Ticket #{id} is already {state}")]
    AlreadyClosed { id: u64, state: TicketState },

    #[error("Cannot close a ticket on a {0} decision")]
    NotTerminal(DecisionStatus),
}

/// Everything needed to open the approval ticket
#[derive(Debug, Clone)]
pub struct TicketDraft {
    pub run: WorkflowRun,
    /// Suffix for the default title
    pub title: Option<String>,
    /// Text placed before the generated instructions
    pub preface: Option<String>,
    pub assignees: Vec<String>,
    pub labels: Vec<String>,
}

impl TicketDraft {
    pub fn new(run: WorkflowRun, assignees: Vec<String>) -> Self {
        Self {
            run,
            title: None,
            preface: None,
            assignees,
            labels: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_preface(mut self, preface: impl Into<String>) -> Self {
        self.preface = Some(preface.into());
        self
    }

    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    /// Compose the remote ticket request.
    pub fn to_new_ticket(&self, matcher: &WordMatcher) -> NewTicket {
        NewTicket {
            title: ticket_title(self.title.as_deref()),
            body: ticket_body(&self.run, matcher, self.preface.as_deref()),
            assignees: self.assignees.clone(),
            labels: self
                .labels
                .iter()
                .map(|l| l.trim())
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// A ticket opened by this process, with its local lifecycle state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketHandle {
    pub ticket: TicketRef,
    pub state: TicketState,
}

impl TicketHandle {
    pub fn id(&self) -> u64 {
        self.ticket.id
    }
}

/// Drives the approval ticket through its lifecycle
pub struct TicketLifecycle<S: TicketService + ?Sized> {
    service: Arc<S>,
}

impl<S: TicketService + ?Sized> Clone for TicketLifecycle<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

impl<S: TicketService + ?Sized> TicketLifecycle<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self { service }
    }

    /// Create the ticket, assigned to the voters.
    pub async fn open(
        &self,
        draft: &TicketDraft,
        matcher: &WordMatcher,
    ) -> Result<TicketHandle, LifecycleError> {
        let request = draft.to_new_ticket(matcher);
        info!(
            "Creating issue in repo {}/{} with the following content:\nTitle: {}\nApprovers: {:?}\nBody:\n{}",
            draft.run.owner, draft.run.repo, request.title, request.assignees, request.body
        );

        let ticket = self.service.create_ticket(&request).await?;
        debug!("Issue created: {}", ticket.url);

        Ok(TicketHandle {
            ticket,
            state: TicketState::Open,
        })
    }

    /// Post `comment` and close the ticket for a terminal decision.
    pub async fn close(
        &self,
        handle: &mut TicketHandle,
        outcome: DecisionStatus,
        comment: &str,
    ) -> Result<(), LifecycleError> {
        let next = TicketState::closed_for(outcome).ok_or(LifecycleError::NotTerminal(outcome))?;
        self.transition(handle, next, comment).await
    }

    /// Post `comment` and close the ticket as cancelled.
    pub async fn cancel(
        &self,
        handle: &mut TicketHandle,
        comment: &str,
    ) -> Result<(), LifecycleError> {
        self.transition(handle, TicketState::ClosedCancelled, comment)
            .await
    }

    async fn transition(
        &self,
        handle: &mut TicketHandle,
        next: TicketState,
        comment: &str,
    ) -> Result<(), LifecycleError> {
        if !handle.state.can_transition_to(next) {
            return Err(LifecycleError::AlreadyClosed {
                id: handle.id(),
                state: handle.state,
            });
        }

        self.service.create_comment(handle.id(), comment).await?;
        self.service
            .set_ticket_state(handle.id(), RemoteState::Closed)
            .await?;

        handle.state = next;
        debug!("Issue #{} is now {}", handle.id(), next);
        Ok(())
    }
}
