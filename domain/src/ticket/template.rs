//! Text of the approval ticket and its closing comments.

use crate::quorum::WordMatcher;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "Approval required";

pub const APPROVED_COMMENT: &str =
    "Approval has been granted, continuing workflow and closing this issue.";
pub const DENIED_COMMENT: &str = "Approval was denied. Closing issue and failing workflow.";
pub const CANCELLED_COMMENT: &str = "Workflow cancelled, closing issue.";

/// The workflow run waiting on approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowRun {
    pub run_id: u64,
    pub owner: String,
    pub repo: String,
    /// Web base URL, e.g. `https://github.com`
    pub server_url: String,
}

impl WorkflowRun {
    pub fn new(
        run_id: u64,
        owner: impl Into<String>,
        repo: impl Into<String>,
        server_url: impl Into<String>,
    ) -> Self {
        Self {
            run_id,
            owner: owner.into(),
            repo: repo.into(),
            server_url: server_url.into(),
        }
    }

    /// Link to the run's page.
    pub fn url(&self) -> String {
        format!(
            "{}/{}/{}/actions/runs/{}",
            self.server_url.trim_end_matches('/'),
            self.owner,
            self.repo,
            self.run_id
        )
    }
}

/// Ticket title: `"Approval required"` with an optional suffix.
///
/// The suffix is used verbatim; a blank one is ignored.
pub fn ticket_title(custom: Option<&str>) -> String {
    match custom.filter(|t| !t.trim().is_empty()) {
        Some(title) => format!("{}: {}", DEFAULT_TITLE, title),
        None => DEFAULT_TITLE.to_string(),
    }
}

/// Ticket body: run reference, accepted words, and an optional preface.
pub fn ticket_body(run: &WorkflowRun, matcher: &WordMatcher, preface: Option<&str>) -> String {
    let body = format!(
        "Workflow ([#{}]({})) is pending manual review.\n\n\
         To continue the workflow, respond with one of the following:\n{}\n\n\
         To cancel the workflow, respond with one of the following:\n{}",
        run.run_id,
        run.url(),
        bullet_list(matcher.approve_words()),
        bullet_list(matcher.deny_words()),
    );

    match preface.filter(|p| !p.trim().is_empty()) {
        Some(preface) => format!("{}\n\n{}", preface, body),
        None => body,
    }
}

fn bullet_list<'a>(words: impl Iterator<Item = &'a str>) -> String {
    words
        .map(|word| format!("* {}", word))
        .collect::<Vec<_>>()
        .join("\n")
}
