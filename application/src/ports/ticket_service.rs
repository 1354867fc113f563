//! Ticket service port
//!
//! Defines the interface for the remote ticket tracker that hosts the
//! approval ticket, its comment stream, and the group directory used to
//! expand approver references. Adapters live in the infrastructure layer.

use approval_domain::Reply;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the remote ticket service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl ServiceError {
    /// Whether the service reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::Status { status: 404, .. })
    }
}

/// Request to create a ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTicket {
    pub title: String,
    pub body: String,
    pub assignees: Vec<String>,
    pub labels: Vec<String>,
}

/// Reference to a created ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketRef {
    /// Service-assigned ticket number
    pub id: u64,
    /// Browser link to the ticket
    pub url: String,
}

/// Open/closed state as the remote service knows it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteState {
    Open,
    Closed,
}

/// Port for the ticket tracker.
///
/// All calls suspend the caller until the service answers; the core never
/// issues two calls concurrently against the same ticket.
#[async_trait]
pub trait TicketService: Send + Sync {
    /// Create a ticket assigned to `assignees` with `labels`.
    async fn create_ticket(&self, ticket: &NewTicket) -> Result<TicketRef, ServiceError>;

    /// Full comment history of a ticket, oldest first.
    async fn list_comments(&self, ticket_id: u64) -> Result<Vec<Reply>, ServiceError>;

    /// Post a comment on a ticket.
    async fn create_comment(&self, ticket_id: u64, body: &str) -> Result<(), ServiceError>;

    /// Change the ticket's open/closed state.
    async fn set_ticket_state(&self, ticket_id: u64, state: RemoteState)
    -> Result<(), ServiceError>;

    /// Members of `group` within `org`.
    ///
    /// Callers treat an error or an empty list as "not a group".
    async fn list_group_members(&self, org: &str, group: &str)
    -> Result<Vec<String>, ServiceError>;
}
