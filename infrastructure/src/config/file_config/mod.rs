//! Raw action input data types
//!
//! These structs mirror the inputs declared by the action. Every value is
//! kept as text here; parsing and validation happen in
//! [`GateSettings`](super::GateSettings).
//!
//! Example `approval.toml`:
//!
//! ```toml
//! approvers = "alice,release.managers"
//! minimum-approvals = 2
//! issue-title = "Deploy to production"
//! labels = "approval,prod"
//! exclude-workflow-initiator-as-approver = true
//! additional-approved-words = "lgtm,ship it"
//! ```

pub(crate) mod lossy;

use serde::{Deserialize, Serialize};

/// Action inputs (raw structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FileConfig {
    /// Token used against the ticket service
    #[serde(deserialize_with = "lossy::opt_string", skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    /// Comma-separated logins or team names
    #[serde(deserialize_with = "lossy::opt_string", skip_serializing_if = "Option::is_none")]
    pub approvers: Option<String>,
    /// Minimum number of approvals; empty means all approvers
    #[serde(deserialize_with = "lossy::string")]
    pub minimum_approvals: String,
    #[serde(deserialize_with = "lossy::string")]
    pub issue_title: String,
    #[serde(deserialize_with = "lossy::string")]
    pub issue_body: String,
    /// Comma-separated labels
    #[serde(deserialize_with = "lossy::string")]
    pub labels: String,
    #[serde(deserialize_with = "lossy::string")]
    pub exclude_workflow_initiator_as_approver: String,
    /// Comma-separated extra approve words
    #[serde(deserialize_with = "lossy::string")]
    pub additional_approved_words: String,
    /// Comma-separated extra deny words
    #[serde(deserialize_with = "lossy::string")]
    pub additional_denied_words: String,
    #[serde(deserialize_with = "lossy::string")]
    pub polling_interval_seconds: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::providers::{Format, Toml};

    #[test]
    fn test_deserialize_toml_config() {
        let toml_str = r#"
approvers = "alice,bob"
minimum-approvals = 1
issue-title = "Deploy"
exclude-workflow-initiator-as-approver = true
additional-denied-words = "nah"
polling-interval-seconds = 5
"#;
        let config: FileConfig = figment::Figment::new()
            .merge(Toml::string(toml_str))
            .extract()
            .unwrap();

        assert_eq!(config.approvers.as_deref(), Some("alice,bob"));
        assert_eq!(config.minimum_approvals, "1");
        assert_eq!(config.issue_title, "Deploy");
        assert_eq!(config.exclude_workflow_initiator_as_approver, "true");
        assert_eq!(config.additional_denied_words, "nah");
        assert_eq!(config.polling_interval_seconds, "5");
        assert_eq!(config.secret, None);
    }

    #[test]
    fn test_defaults_are_empty() {
        let config = FileConfig::default();
        assert!(config.approvers.is_none());
        assert!(config.minimum_approvals.is_empty());
        assert!(config.labels.is_empty());
    }
}
