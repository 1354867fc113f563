//! In-memory `TicketService` for use case tests.

use crate::ports::ticket_service::{NewTicket, RemoteState, ServiceError, TicketRef, TicketService};
use approval_domain::Reply;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    CreateTicket(NewTicket),
    ListComments(u64),
    CreateComment(u64, String),
    SetState(u64, RemoteState),
    ListGroupMembers(String, String),
}

/// Scripted ticket service.
///
/// Each `list_comments` call pops the next scripted history; the last one
/// is repeated once the script runs out.
#[derive(Default)]
pub(crate) struct MockTicketService {
    histories: Mutex<VecDeque<Result<Vec<Reply>, ServiceError>>>,
    groups: HashMap<String, Vec<String>>,
    group_error: Option<ServiceError>,
    comment_error: Option<ServiceError>,
    create_error: Option<ServiceError>,
    state_delay: Option<Duration>,
    calls: Mutex<Vec<Call>>,
}

impl MockTicketService {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_history(self, replies: &[(&str, &str)]) -> Self {
        let history = replies.iter().map(|(a, b)| Reply::new(*a, *b)).collect();
        self.histories.lock().unwrap().push_back(Ok(history));
        self
    }

    pub(crate) fn with_history_error(self, error: ServiceError) -> Self {
        self.histories.lock().unwrap().push_back(Err(error));
        self
    }

    pub(crate) fn with_group(mut self, slug: &str, members: &[&str]) -> Self {
        self.groups.insert(
            slug.to_string(),
            members.iter().map(|m| m.to_string()).collect(),
        );
        self
    }

    /// Answer unknown groups with `error` instead of a 404.
    pub(crate) fn with_group_error(mut self, error: ServiceError) -> Self {
        self.group_error = Some(error);
        self
    }

    pub(crate) fn with_comment_error(mut self, error: ServiceError) -> Self {
        self.comment_error = Some(error);
        self
    }

    pub(crate) fn with_create_error(mut self, error: ServiceError) -> Self {
        self.create_error = Some(error);
        self
    }

    /// Make `set_ticket_state` take `delay` before answering.
    pub(crate) fn with_state_delay(mut self, delay: Duration) -> Self {
        self.state_delay = Some(delay);
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn comments_posted(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CreateComment(_, body) => Some(body),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn poll_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::ListComments(_)))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl TicketService for MockTicketService {
    async fn create_ticket(&self, ticket: &NewTicket) -> Result<TicketRef, ServiceError> {
        self.record(Call::CreateTicket(ticket.clone()));
        if let Some(error) = &self.create_error {
            return Err(error.clone());
        }
        Ok(TicketRef {
            id: 7,
            url: "https://github.com/acme/rockets/issues/7".to_string(),
        })
    }

    async fn list_comments(&self, ticket_id: u64) -> Result<Vec<Reply>, ServiceError> {
        self.record(Call::ListComments(ticket_id));
        let mut histories = self.histories.lock().unwrap();
        let next = if histories.len() > 1 {
            histories.pop_front()
        } else {
            histories.front().cloned()
        };
        next.unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn create_comment(&self, ticket_id: u64, body: &str) -> Result<(), ServiceError> {
        self.record(Call::CreateComment(ticket_id, body.to_string()));
        match &self.comment_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    async fn set_ticket_state(
        &self,
        ticket_id: u64,
        state: RemoteState,
    ) -> Result<(), ServiceError> {
        self.record(Call::SetState(ticket_id, state));
        if let Some(delay) = self.state_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(())
    }

    async fn list_group_members(
        &self,
        org: &str,
        group: &str,
    ) -> Result<Vec<String>, ServiceError> {
        self.record(Call::ListGroupMembers(org.to_string(), group.to_string()));
        self.groups
            .get(group)
            .cloned()
            .ok_or_else(|| {
                self.group_error.clone().unwrap_or(ServiceError::Status {
                    status: 404,
                    message: "Not Found".to_string(),
                })
            })
    }
}
