//! CLI command definitions

use clap::{Args, Parser};
use serde::Serialize;
use std::path::PathBuf;

/// CLI arguments for manual-approval
#[derive(Parser, Debug)]
#[command(name = "manual-approval")]
#[command(author, version, about = "Pause a workflow until enough approvers say yes")]
#[command(long_about = r#"
Manual Approval opens an issue assigned to the approvers and waits for
their replies. The workflow continues once the minimum number of approvers
reply with an approve word, and fails as soon as any approver replies with
a deny word.

Inputs are read from (in priority order):
1. Command-line flags
2. INPUT_* environment variables (set by the Actions runner)
3. --config <path>     Explicit config file
4. ./approval.toml     Project-level config

The run context (GITHUB_RUN_ID, GITHUB_REPOSITORY, GITHUB_ACTOR, ...) always
comes from the environment. The token is only read from INPUT_SECRET or a
config file.

Example:
  manual-approval --approvers alice,release.managers --minimum-approvals 2
"#)]
pub struct Cli {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Input overrides, merged over every other source.
///
/// Serializes with the same keys as the action inputs; unset flags are
/// skipped so they do not mask lower layers.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct InputArgs {
    /// Comma-separated approver logins or team names
    #[arg(long, value_name = "LIST")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approvers: Option<String>,

    /// Approvals required (defaults to all approvers)
    #[arg(long, value_name = "N")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_approvals: Option<String>,

    /// Issue title
    #[arg(long, value_name = "TITLE")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_title: Option<String>,

    /// Text shown above the generated issue body
    #[arg(long, value_name = "TEXT")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_body: Option<String>,

    /// Comma-separated issue labels
    #[arg(long, value_name = "LIST")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<String>,

    /// Do not count the user who triggered the run as an approver
    #[arg(long, value_name = "BOOL")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_workflow_initiator_as_approver: Option<bool>,

    /// Comma-separated extra approve words
    #[arg(long, value_name = "LIST")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_approved_words: Option<String>,

    /// Comma-separated extra deny words
    #[arg(long, value_name = "LIST")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_denied_words: Option<String>,

    /// Seconds between comment polls
    #[arg(long, value_name = "SECONDS")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polling_interval_seconds: Option<u64>,
}
