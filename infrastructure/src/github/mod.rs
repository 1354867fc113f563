//! GitHub adapter
//!
//! Implements [`TicketService`](approval_application::TicketService) over
//! the REST API using reqwest.

mod client;
mod dto;

pub use client::{GitHubConfig, GitHubTicketService};
