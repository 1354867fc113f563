//! Approval ticket domain
//!
//! - [`state::TicketState`]: forward-only ticket lifecycle
//! - [`template`]: title, body and closing comment text

pub mod state;
pub mod template;

pub use state::TicketState;
pub use template::{
    APPROVED_COMMENT, CANCELLED_COMMENT, DENIED_COMMENT, WorkflowRun, ticket_body, ticket_title,
};
