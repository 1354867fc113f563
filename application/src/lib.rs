//! Application layer for manual-approval
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DEFAULT_POLL_INTERVAL, GateConfig};
pub use ports::ticket_service::{NewTicket, RemoteState, ServiceError, TicketRef, TicketService};
pub use use_cases::poll_approval::{PollApprovalUseCase, PollError};
pub use use_cases::resolve_approvers::{ResolveApproversInput, ResolveApproversUseCase};
pub use use_cases::run_gate::{GateOutcome, GateReport, RunGateError, RunGateInput, RunGateUseCase};
pub use use_cases::ticket_lifecycle::{LifecycleError, TicketDraft, TicketHandle, TicketLifecycle};
