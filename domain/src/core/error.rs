//! Domain error types

use thiserror::Error;

/// Invalid or contradictory gate configuration.
///
/// Always detected before the approval ticket is created.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing inputs: {}", .0.join(", "))]
    MissingInputs(Vec<String>),

    #[error("no approvers left after resolving approver references")]
    NoApprovers,

    #[error("error parsing minimum number of approvals '{raw}': {reason}")]
    InvalidMinimumApprovals { raw: String, reason: String },

    #[error(
        "minimum required approvals ({required}) is greater than the total number of approvers ({available})"
    )]
    QuorumUnreachable { required: usize, available: usize },

    #[error("minimum required approvals must be at least 1")]
    ZeroQuorum,

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Malformed word-matching configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("empty word in {list} word list")]
    EmptyWord { list: &'static str },

    #[error("word '{word}' cannot be used as a matcher: {reason}")]
    InvalidPattern { word: String, reason: String },
}
