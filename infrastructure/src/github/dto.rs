//! GitHub REST payloads

use approval_application::{NewTicket, RemoteState, TicketRef};
use approval_domain::Reply;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct CreateIssueRequest<'a> {
    pub title: &'a str,
    pub body: &'a str,
    #[serde(skip_serializing_if = "is_empty")]
    pub assignees: &'a [String],
    #[serde(skip_serializing_if = "is_empty")]
    pub labels: &'a [String],
}

impl<'a> From<&'a NewTicket> for CreateIssueRequest<'a> {
    fn from(ticket: &'a NewTicket) -> Self {
        Self {
            title: &ticket.title,
            body: &ticket.body,
            assignees: &ticket.assignees,
            labels: &ticket.labels,
        }
    }
}

fn is_empty(list: &&[String]) -> bool {
    list.is_empty()
}

#[derive(Debug, Deserialize)]
pub(crate) struct IssueResponse {
    pub number: u64,
    pub html_url: String,
}

impl From<IssueResponse> for TicketRef {
    fn from(issue: IssueResponse) -> Self {
        TicketRef {
            id: issue.number,
            url: issue.html_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CommentRequest<'a> {
    pub body: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateStateRequest {
    pub state: RemoteState,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserDto {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentDto {
    /// Null for comments by deleted accounts
    pub user: Option<UserDto>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl CommentDto {
    /// Comments without an author cannot vote and are dropped.
    pub fn into_reply(self) -> Option<Reply> {
        let author = self.user?.login;
        let reply = Reply::new(author, self.body.unwrap_or_default());
        Some(match self.created_at {
            Some(at) => reply.with_created_at(at),
            None => reply,
        })
    }
}

/// Error body returned by the REST API
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_into_reply() {
        let json = r#"[
            {"user": {"login": "alice"}, "body": "approved", "created_at": "2024-03-01T12:00:00Z"},
            {"user": null, "body": "approved"},
            {"user": {"login": "bob"}, "body": null}
        ]"#;
        let comments: Vec<CommentDto> = serde_json::from_str(json).unwrap();
        let replies: Vec<Reply> = comments.into_iter().filter_map(CommentDto::into_reply).collect();

        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0].author, "alice");
        assert_eq!(replies[0].body, "approved");
        assert!(replies[0].created_at.is_some());
        assert_eq!(replies[1].author, "bob");
        assert_eq!(replies[1].body, "");
    }

    #[test]
    fn test_create_issue_request_skips_empty_lists() {
        let ticket = NewTicket {
            title: "Approval required".into(),
            body: "body".into(),
            assignees: vec!["alice".into()],
            labels: vec![],
        };
        let json = serde_json::to_value(CreateIssueRequest::from(&ticket)).unwrap();
        assert_eq!(json["assignees"], serde_json::json!(["alice"]));
        assert!(json.get("labels").is_none());
    }

    #[test]
    fn test_update_state_serializes_lowercase() {
        let json = serde_json::to_string(&UpdateStateRequest {
            state: RemoteState::Closed,
        })
        .unwrap();
        assert_eq!(json, r#"{"state":"closed"}"#);
    }
}
