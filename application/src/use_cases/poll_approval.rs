//! Poll Approval use case
//!
//! One tick re-reads the full comment history, folds it into a decision,
//! and either closes the ticket or sleeps until the next tick. Ticks never
//! overlap and nothing is carried between them.
//!
//! Cancellation is observed only between ticks: before a tick starts and
//! while sleeping. A tick that has started, including its close, always
//! runs to completion.

use crate::config::GateConfig;
use crate::ports::ticket_service::{ServiceError, TicketService};
use crate::use_cases::ticket_lifecycle::{LifecycleError, TicketHandle, TicketLifecycle};
use approval_domain::ticket::{APPROVED_COMMENT, DENIED_COMMENT};
use approval_domain::{DecisionStatus, Tally, VoterSet, WordMatcher, tally};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Errors that end the poll loop
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PollError {
    #[error("error getting comments: {0}")]
    FetchComments(#[source] ServiceError),

    #[error("error closing issue: {0}")]
    Close(#[from] LifecycleError),
}

/// Use case for polling the ticket until a decision is reached
pub struct PollApprovalUseCase<S: TicketService + ?Sized> {
    service: Arc<S>,
    lifecycle: TicketLifecycle<S>,
    voters: VoterSet,
    matcher: WordMatcher,
    config: GateConfig,
    cancel: CancellationToken,
}

impl<S: TicketService + ?Sized> PollApprovalUseCase<S> {
    pub fn new(service: Arc<S>, voters: VoterSet, matcher: WordMatcher) -> Self {
        Self {
            lifecycle: TicketLifecycle::new(Arc::clone(&service)),
            service,
            voters,
            matcher,
            config: GateConfig::default(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_config(mut self, config: GateConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Poll until the decision is terminal, then close the ticket.
    ///
    /// Returns [`DecisionStatus::Approved`] or [`DecisionStatus::Denied`]
    /// with the ticket closed, or [`DecisionStatus::Pending`] with the
    /// ticket still open when cancelled between ticks.
    pub async fn execute(&self, handle: &mut TicketHandle) -> Result<DecisionStatus, PollError> {
        info!(
            "Waiting for approval on issue #{} ({})",
            handle.id(),
            self.voters.describe()
        );

        loop {
            if self.cancel.is_cancelled() {
                return Ok(DecisionStatus::Pending);
            }

            let tally = self.tick(handle).await?;
            debug!("Workflow status: {} [{}]", tally.status, tally.summary());

            let status = tally.status;
            if status.is_terminal() {
                let comment = match status {
                    DecisionStatus::Approved => APPROVED_COMMENT,
                    _ => DENIED_COMMENT,
                };
                self.lifecycle.close(handle, status, comment).await?;
                info!("Workflow manual approval {}", status);
                return Ok(status);
            }

            tokio::select! {
                _ = tokio::time::sleep(self.config.poll_interval) => {}
                _ = self.cancel.cancelled() => {
                    debug!("Polling interrupted on issue #{}", handle.id());
                    return Ok(DecisionStatus::Pending);
                }
            }
        }
    }

    /// Fetch the full history and evaluate it. No ticket side effects.
    pub async fn tick(&self, handle: &TicketHandle) -> Result<Tally, PollError> {
        let replies = self
            .service
            .list_comments(handle.id())
            .await
            .map_err(PollError::FetchComments)?;
        Ok(tally(&replies, &self.voters, &self.matcher))
    }
}
