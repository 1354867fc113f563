//! Workflow run context supplied by the runner environment (`GITHUB_*`).

use super::file_config::lossy;
use serde::{Deserialize, Serialize};

/// Raw run context, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunContext {
    /// `GITHUB_RUN_ID`
    #[serde(deserialize_with = "lossy::opt_string")]
    pub run_id: Option<String>,
    /// `GITHUB_REPOSITORY`, as `owner/repo`
    #[serde(deserialize_with = "lossy::opt_string")]
    pub repository: Option<String>,
    /// `GITHUB_REPOSITORY_OWNER`
    #[serde(deserialize_with = "lossy::opt_string")]
    pub repository_owner: Option<String>,
    /// `GITHUB_ACTOR`, the identity that triggered the run
    #[serde(deserialize_with = "lossy::opt_string")]
    pub actor: Option<String>,
    /// `GITHUB_SERVER_URL`
    #[serde(deserialize_with = "lossy::opt_string")]
    pub server_url: Option<String>,
    /// `GITHUB_API_URL`
    #[serde(deserialize_with = "lossy::opt_string")]
    pub api_url: Option<String>,
}

impl RunContext {
    pub const KEYS: &'static [&'static str] = &[
        "run_id",
        "repository",
        "repository_owner",
        "actor",
        "server_url",
        "api_url",
    ];

    /// Split `repository` into `(owner, repo)`.
    ///
    /// `repository_owner`, when set, wins over the owner part of
    /// `repository`.
    pub fn owner_and_repo(&self) -> Option<(String, String)> {
        let (owner, repo) = self.repository.as_deref()?.split_once('/')?;
        if owner.is_empty() || repo.is_empty() {
            return None;
        }
        let owner = self.repository_owner.as_deref().unwrap_or(owner);
        Some((owner.to_string(), repo.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_and_repo() {
        let ctx = RunContext {
            repository: Some("acme/rockets".into()),
            ..Default::default()
        };
        assert_eq!(
            ctx.owner_and_repo(),
            Some(("acme".to_string(), "rockets".to_string()))
        );
    }

    #[test]
    fn test_malformed_repository() {
        for repository in ["acme", "/rockets", "acme/"] {
            let ctx = RunContext {
                repository: Some(repository.into()),
                ..Default::default()
            };
            assert_eq!(ctx.owner_and_repo(), None, "{}", repository);
        }
    }
}
