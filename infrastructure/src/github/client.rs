//! GitHub REST adapter for the ticket service port.
//!
//! Tickets are issues in the workflow's repository, replies are issue
//! comments and groups are organization teams.

use super::dto::{
    CommentDto, CommentRequest, CreateIssueRequest, ErrorBody, IssueResponse, UpdateStateRequest,
    UserDto,
};
use approval_application::{NewTicket, RemoteState, ServiceError, TicketRef, TicketService};
use approval_domain::Reply;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace};

const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("manual-approval/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Page size for list endpoints (the API maximum)
const PER_PAGE: usize = 100;

/// Connection settings for [`GitHubTicketService`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubConfig {
    /// REST base, e.g. `https://api.github.com`
    pub api_base_url: String,
    pub owner: String,
    pub repo: String,
    pub token: String,
}

impl GitHubConfig {
    pub fn new(
        api_base_url: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            owner: owner.into(),
            repo: repo.into(),
            token: token.into(),
        }
    }
}

/// Issue-backed [`TicketService`]
pub struct GitHubTicketService {
    client: Client,
    base: Url,
    owner: String,
    repo: String,
    token: String,
}

impl GitHubTicketService {
    pub fn new(config: GitHubConfig) -> Result<Self, ServiceError> {
        let base = Url::parse(&config.api_base_url).map_err(|e| {
            ServiceError::Other(format!("invalid API URL '{}': {}", config.api_base_url, e))
        })?;
        if base.cannot_be_a_base() {
            return Err(ServiceError::Other(format!(
                "invalid API URL '{}': not a base URL",
                config.api_base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("X-GitHub-Api-Version", HeaderValue::from_static(API_VERSION));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(transport)?;

        Ok(Self {
            client,
            base,
            owner: config.owner,
            repo: config.repo,
            token: config.token,
        })
    }

    /// Base URL with `segments` appended, each percent-encoded.
    fn endpoint<I>(&self, segments: I) -> Url
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base.clone();
        // Checked in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn issue_endpoint(&self, ticket_id: u64, tail: &[&str]) -> Url {
        let id = ticket_id.to_string();
        let head = ["repos", self.owner.as_str(), self.repo.as_str(), "issues", id.as_str()];
        self.endpoint(head.iter().chain(tail))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ServiceError> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(transport)?;
        check_status(response).await
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ServiceError> {
        self.send(request)
            .await?
            .json()
            .await
            .map_err(|e| ServiceError::Decode(e.to_string()))
    }

    /// GET every page of a list endpoint.
    async fn get_all<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>, ServiceError> {
        let mut items = Vec::new();
        for page in 1.. {
            let mut page_url = url.clone();
            page_url
                .query_pairs_mut()
                .append_pair("per_page", &PER_PAGE.to_string())
                .append_pair("page", &page.to_string());
            trace!("GET {}", page_url);

            let batch: Vec<T> = self.send_json(self.client.get(page_url)).await?;
            let done = batch.len() < PER_PAGE;
            items.extend(batch);
            if done {
                break;
            }
        }
        Ok(items)
    }
}

fn transport(error: reqwest::Error) -> ServiceError {
    ServiceError::Transport(error.to_string())
}

/// Turn a non-success response into [`ServiceError::Status`], preferring
/// the API's `message` field over the raw body.
async fn check_status(response: Response) -> Result<Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.message)
        .unwrap_or(text);
    Err(ServiceError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl TicketService for GitHubTicketService {
    async fn create_ticket(&self, ticket: &NewTicket) -> Result<TicketRef, ServiceError> {
        let url = self.endpoint(["repos", self.owner.as_str(), self.repo.as_str(), "issues"]);
        debug!("Creating issue in {}/{}", self.owner, self.repo);
        let issue: IssueResponse = self
            .send_json(self.client.post(url).json(&CreateIssueRequest::from(ticket)))
            .await?;
        Ok(issue.into())
    }

    async fn list_comments(&self, ticket_id: u64) -> Result<Vec<Reply>, ServiceError> {
        let comments: Vec<CommentDto> = self
            .get_all(self.issue_endpoint(ticket_id, &["comments"]))
            .await?;
        Ok(comments
            .into_iter()
            .filter_map(CommentDto::into_reply)
            .collect())
    }

    async fn create_comment(&self, ticket_id: u64, body: &str) -> Result<(), ServiceError> {
        let url = self.issue_endpoint(ticket_id, &["comments"]);
        debug!("Commenting on issue #{}", ticket_id);
        self.send(self.client.post(url).json(&CommentRequest { body }))
            .await
            .map(drop)
    }

    async fn set_ticket_state(
        &self,
        ticket_id: u64,
        state: RemoteState,
    ) -> Result<(), ServiceError> {
        let url = self.issue_endpoint(ticket_id, &[]);
        debug!("Setting issue #{} state to {:?}", ticket_id, state);
        self.send(self.client.patch(url).json(&UpdateStateRequest { state }))
            .await
            .map(drop)
    }

    async fn list_group_members(
        &self,
        org: &str,
        group: &str,
    ) -> Result<Vec<String>, ServiceError> {
        let url = self.endpoint(["orgs", org, "teams", group, "members"]);
        let members: Vec<UserDto> = self.get_all(url).await?;
        Ok(members.into_iter().map(|m| m.login).collect())
    }
}
