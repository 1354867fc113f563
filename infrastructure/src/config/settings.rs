//! Validated gate settings built from action inputs and run context.

use super::file_config::FileConfig;
use super::run_context::RunContext;
use approval_application::{GateConfig, ResolveApproversInput};
use approval_domain::quorum::parse_additional_words;
use approval_domain::util::split_list;
use approval_domain::{ConfigError, MatchError, WordMatcher, WorkflowRun};

pub const DEFAULT_SERVER_URL: &str = "https://github.com";
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Everything the gate needs, checked before any remote call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateSettings {
    pub token: String,
    pub run: WorkflowRun,
    /// REST API base URL
    pub api_url: String,
    /// Identity that triggered the run
    pub initiator: Option<String>,
    pub approvers: String,
    pub minimum_approvals: String,
    pub exclude_initiator: bool,
    pub issue_title: Option<String>,
    pub issue_body: Option<String>,
    pub labels: Vec<String>,
    pub additional_approved_words: Vec<String>,
    pub additional_denied_words: Vec<String>,
    pub gate: GateConfig,
}

impl GateSettings {
    /// Validate inputs and run context.
    ///
    /// All missing required values are reported together.
    pub fn resolve(inputs: &FileConfig, ctx: &RunContext) -> Result<Self, ConfigError> {
        let mut missing = Vec::new();
        if ctx.run_id.is_none() {
            missing.push("GITHUB_RUN_ID".to_string());
        }
        if inputs.secret.is_none() {
            missing.push("secret".to_string());
        }
        if inputs.approvers.is_none() {
            missing.push("approvers".to_string());
        }
        if ctx.repository.is_none() {
            missing.push("GITHUB_REPOSITORY".to_string());
        }

        let (Some(run_id), Some(token), Some(approvers), Some(repository)) = (
            ctx.run_id.as_deref(),
            inputs.secret.clone(),
            inputs.approvers.clone(),
            ctx.repository.as_deref(),
        ) else {
            return Err(ConfigError::MissingInputs(missing));
        };

        let run_id = run_id
            .trim()
            .parse::<u64>()
            .map_err(|e| invalid("GITHUB_RUN_ID", e.to_string()))?;
        let (owner, repo) = ctx.owner_and_repo().ok_or_else(|| {
            invalid(
                "GITHUB_REPOSITORY",
                format!("expected 'owner/repo', got '{}'", repository),
            )
        })?;

        let server_url = ctx
            .server_url
            .clone()
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        let api_url = api_url_for(ctx.api_url.as_deref(), ctx.server_url.as_deref());

        Ok(Self {
            token,
            run: WorkflowRun::new(run_id, owner, repo, server_url),
            api_url,
            initiator: ctx.actor.clone(),
            approvers,
            minimum_approvals: inputs.minimum_approvals.trim().to_string(),
            exclude_initiator: parse_bool_input(
                "exclude-workflow-initiator-as-approver",
                &inputs.exclude_workflow_initiator_as_approver,
            )?,
            issue_title: non_blank(&inputs.issue_title),
            issue_body: non_blank(&inputs.issue_body),
            labels: split_list(&inputs.labels),
            additional_approved_words: parse_additional_words(&inputs.additional_approved_words),
            additional_denied_words: parse_additional_words(&inputs.additional_denied_words),
            gate: GateConfig::from_interval_seconds(parse_interval(
                &inputs.polling_interval_seconds,
            )?),
        })
    }

    /// Word matcher with the configured additional words.
    pub fn word_matcher(&self) -> Result<WordMatcher, MatchError> {
        WordMatcher::new(
            self.additional_approved_words.clone(),
            self.additional_denied_words.clone(),
        )
    }

    /// Approver resolution input; groups are looked up in the repo owner's org.
    pub fn resolve_approvers_input(&self) -> ResolveApproversInput {
        ResolveApproversInput {
            approvers: self.approvers.clone(),
            org: self.run.owner.clone(),
            initiator: self.initiator.clone(),
            exclude_initiator: self.exclude_initiator,
            minimum_approvals: self.minimum_approvals.clone(),
        }
    }
}

/// REST base URL: explicit API URL, else the enterprise `/api/v3` path under
/// a non-github.com server, else the public API.
fn api_url_for(api_url: Option<&str>, server_url: Option<&str>) -> String {
    match (api_url, server_url) {
        (Some(api), _) => api.trim_end_matches('/').to_string(),
        (None, Some(server)) if server.trim_end_matches('/') != DEFAULT_SERVER_URL => {
            format!("{}/api/v3", server.trim_end_matches('/'))
        }
        _ => DEFAULT_API_URL.to_string(),
    }
}

/// Boolean input in YAML 1.2 core form; blank means false.
fn parse_bool_input(field: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim() {
        "" | "false" | "False" | "FALSE" => Ok(false),
        "true" | "True" | "TRUE" => Ok(true),
        other => Err(invalid(
            field,
            format!("'{}' is not one of true, false", other),
        )),
    }
}

fn parse_interval(raw: &str) -> Result<Option<u64>, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<u64>()
        .map(Some)
        .map_err(|e| invalid("polling-interval-seconds", e.to_string()))
}

fn non_blank(raw: &str) -> Option<String> {
    Some(raw.to_string()).filter(|s| !s.trim().is_empty())
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.into(),
    }
}
