//! Run Gate use case
//!
//! Top-level driver: opens the approval ticket, then runs the poll loop
//! with the external cancellation signal.
//!
//! ```text
//! cancelled? ──► yes ──► Interrupted (no ticket)
//!     │
//!     no ──► open ticket ──► start clock ──► poll loop ┬─ Approved / Denied (closed by the loop)
//!                                                      └─ Pending (cancelled) ──► cancel ticket ──► Cancelled
//! ```
//!
//! The poll loop only observes cancellation between ticks, so a fetch or
//! close that has started finishes before the ticket is cancelled, and a
//! ticket closed by a decision is never cancelled afterwards.

use crate::config::GateConfig;
use crate::ports::ticket_service::TicketService;
use crate::use_cases::poll_approval::{PollApprovalUseCase, PollError};
use crate::use_cases::ticket_lifecycle::{LifecycleError, TicketDraft, TicketHandle, TicketLifecycle};
use approval_domain::ticket::CANCELLED_COMMENT;
use approval_domain::{DecisionStatus, VoterSet, WordMatcher};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Errors that abort the gate
#[derive(Error, Debug)]
pub enum RunGateError {
    #[error("cancelled before the approval issue was created")]
    Interrupted,

    #[error("error creating issue: {0}")]
    Open(#[source] LifecycleError),

    #[error("{source}")]
    Poll {
        #[source]
        source: PollError,
        elapsed: Duration,
    },

    #[error("error cancelling issue: {source}")]
    Cancel {
        #[source]
        source: LifecycleError,
        elapsed: Duration,
    },
}

impl RunGateError {
    /// Time since the ticket was opened, if it was.
    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            RunGateError::Interrupted | RunGateError::Open(_) => None,
            RunGateError::Poll { elapsed, .. } | RunGateError::Cancel { elapsed, .. } => {
                Some(*elapsed)
            }
        }
    }
}

/// Terminal outcome of the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Approved,
    Denied,
    Cancelled,
}

impl GateOutcome {
    /// Only approval lets the workflow continue.
    pub fn is_success(&self) -> bool {
        matches!(self, GateOutcome::Approved)
    }
}

impl std::fmt::Display for GateOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GateOutcome::Approved => write!(f, "approved"),
            GateOutcome::Denied => write!(f, "denied"),
            GateOutcome::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Result of a completed gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateReport {
    pub outcome: GateOutcome,
    pub ticket: TicketHandle,
    /// Time from ticket creation to the outcome
    pub elapsed: Duration,
}

/// Input for the RunGate use case
#[derive(Debug, Clone)]
pub struct RunGateInput {
    pub draft: TicketDraft,
    pub voters: VoterSet,
    pub matcher: WordMatcher,
}

/// Use case for running the approval gate end to end
pub struct RunGateUseCase<S: TicketService + ?Sized> {
    service: Arc<S>,
    config: GateConfig,
}

impl<S: TicketService + ?Sized> RunGateUseCase<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            config: GateConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GateConfig) -> Self {
        self.config = config;
        self
    }

    /// Open the ticket and wait for a decision or `cancel`.
    pub async fn execute(
        &self,
        input: RunGateInput,
        cancel: CancellationToken,
    ) -> Result<GateReport, RunGateError> {
        if cancel.is_cancelled() {
            warn!("Cancelled before the approval issue was created");
            return Err(RunGateError::Interrupted);
        }

        let lifecycle = TicketLifecycle::new(Arc::clone(&self.service));
        let mut handle = lifecycle
            .open(&input.draft, &input.matcher)
            .await
            .map_err(RunGateError::Open)?;
        info!("Approval issue: {}", handle.ticket.url);

        let start = Instant::now();
        let poll = PollApprovalUseCase::new(Arc::clone(&self.service), input.voters, input.matcher)
            .with_config(self.config.clone())
            .with_cancellation(cancel);

        let finished = poll.execute(&mut handle).await;
        let elapsed = start.elapsed();

        let outcome = match finished {
            Ok(DecisionStatus::Approved) => GateOutcome::Approved,
            Ok(DecisionStatus::Denied) => GateOutcome::Denied,
            Ok(DecisionStatus::Pending) => {
                warn!("{}", CANCELLED_COMMENT);
                lifecycle
                    .cancel(&mut handle, CANCELLED_COMMENT)
                    .await
                    .map_err(|source| RunGateError::Cancel { source, elapsed })?;
                GateOutcome::Cancelled
            }
            Err(source) => return Err(RunGateError::Poll { source, elapsed }),
        };

        Ok(GateReport {
            outcome,
            ticket: handle,
            elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ticket_service::{RemoteState, ServiceError};
    use crate::use_cases::test_support::{Call, MockTicketService};
    use approval_domain::ticket::{APPROVED_COMMENT, DENIED_COMMENT};
    use approval_domain::{TicketState, WorkflowRun};

    fn input(quorum: &str) -> RunGateInput {
        let voters = VoterSet::from_input(
            vec!["alice".into(), "bob".into(), "carol".into()],
            quorum,
        )
        .unwrap();
        RunGateInput {
            draft: TicketDraft::new(
                WorkflowRun::new(42, "acme", "rockets", "https://github.com"),
                voters.identities().to_vec(),
            ),
            voters,
            matcher: WordMatcher::with_defaults().unwrap(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_approved_run() {
        let service = Arc::new(
            MockTicketService::new()
                .with_history(&[])
                .with_history(&[("alice", "yes"), ("carol", "👍"), ("bob", "no")]),
        );

        let report = RunGateUseCase::new(Arc::clone(&service))
            .execute(input("2"), CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(report.outcome, GateOutcome::Approved);
        assert!(report.outcome.is_success());
        assert_eq!(report.ticket.state, TicketState::ClosedApproved);
        assert!(report.elapsed >= Duration::from_secs(10));
        assert!(report.elapsed < Duration::from_secs(11));
        assert_eq!(service.comments_posted(), vec![APPROVED_COMMENT]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_denied_run() {
        let service = Arc::new(MockTicketService::new().with_history(&[("bob", "no"), ("alice", "yes")]));

        let report = RunGateUseCase::new(Arc::clone(&service))
            .execute(input("2"), CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(report.outcome, GateOutcome::Denied);
        assert!(!report.outcome.is_success());
        assert_eq!(service.comments_posted(), vec![DENIED_COMMENT]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_closes_ticket() {
        let service = Arc::new(MockTicketService::new().with_history(&[("alice", "looking")]));
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(25)).await;
            trigger.cancel();
        });

        let report = RunGateUseCase::new(Arc::clone(&service))
            .execute(input("1"), cancel)
            .await
            .unwrap();

        assert_eq!(report.outcome, GateOutcome::Cancelled);
        assert_eq!(report.ticket.state, TicketState::ClosedCancelled);
        assert!(report.elapsed >= Duration::from_secs(25));
        assert!(report.elapsed < Duration::from_secs(26));
        assert_eq!(service.comments_posted(), vec![CANCELLED_COMMENT]);
        assert_eq!(service.calls().last(), Some(&Call::SetState(7, RemoteState::Closed)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_before_open_creates_no_ticket() {
        let service = Arc::new(MockTicketService::new());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let error = RunGateUseCase::new(Arc::clone(&service))
            .execute(input("1"), cancel)
            .await
            .unwrap_err();

        assert!(matches!(error, RunGateError::Interrupted));
        assert_eq!(error.elapsed(), None);
        assert!(service.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_close_keeps_approval() {
        let service = Arc::new(
            MockTicketService::new()
                .with_history(&[("alice", "yes")])
                .with_state_delay(Duration::from_secs(5)),
        );
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            trigger.cancel();
        });

        let report = RunGateUseCase::new(Arc::clone(&service))
            .execute(input("1"), cancel)
            .await
            .unwrap();

        assert_eq!(report.outcome, GateOutcome::Approved);
        assert_eq!(report.ticket.state, TicketState::ClosedApproved);
        assert_eq!(service.comments_posted(), vec![APPROVED_COMMENT]);
        assert!(report.elapsed >= Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_failure_has_no_elapsed() {
        let service = Arc::new(
            MockTicketService::new().with_create_error(ServiceError::Transport("dns".into())),
        );

        let error = RunGateUseCase::new(service)
            .execute(input("1"), CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(error, RunGateError::Open(_)));
        assert_eq!(error.elapsed(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_failure_reports_elapsed() {
        let service = Arc::new(
            MockTicketService::new().with_history_error(ServiceError::Status {
                status: 502,
                message: "Bad Gateway".into(),
            }),
        );

        let error = RunGateUseCase::new(service)
            .execute(input("1"), CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(error, RunGateError::Poll { .. }));
        assert_eq!(error.elapsed(), Some(Duration::ZERO));
        assert_eq!(
            error.to_string(),
            "error getting comments: Request failed with status 502: Bad Gateway"
        );
    }
}
