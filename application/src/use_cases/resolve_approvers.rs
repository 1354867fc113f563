//! Resolve Approvers use case
//!
//! Expands raw approver references (logins or team names) into the
//! [`VoterSet`] that the poll loop counts votes against.

use crate::ports::ticket_service::TicketService;
use approval_domain::util::{dedup_preserving_order, split_list};
use approval_domain::{ConfigError, VoterSet};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Input for the ResolveApprovers use case
#[derive(Debug, Clone, Default)]
pub struct ResolveApproversInput {
    /// Comma-separated approver references
    pub approvers: String,
    /// Organization that owns the groups
    pub org: String,
    /// Identity that triggered the workflow
    pub initiator: Option<String>,
    /// Drop the initiator from the voters
    pub exclude_initiator: bool,
    /// Raw minimum-approvals input; empty means all voters
    pub minimum_approvals: String,
}

impl ResolveApproversInput {
    pub fn new(approvers: impl Into<String>, org: impl Into<String>) -> Self {
        Self {
            approvers: approvers.into(),
            org: org.into(),
            ..Default::default()
        }
    }

    pub fn excluding_initiator(mut self, initiator: impl Into<String>) -> Self {
        self.initiator = Some(initiator.into());
        self.exclude_initiator = true;
        self
    }

    pub fn with_minimum_approvals(mut self, raw: impl Into<String>) -> Self {
        self.minimum_approvals = raw.into();
        self
    }

    fn is_excluded(&self, identity: &str) -> bool {
        self.exclude_initiator
            && self
                .initiator
                .as_deref()
                .is_some_and(|initiator| initiator.to_lowercase() == identity.to_lowercase())
    }
}

/// Use case for building the eligible voter set
pub struct ResolveApproversUseCase<S: TicketService + ?Sized> {
    service: Arc<S>,
}

impl<S: TicketService + ?Sized> ResolveApproversUseCase<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self { service }
    }

    /// Resolve references, apply initiator exclusion, deduplicate, and
    /// validate the quorum.
    pub async fn execute(&self, input: &ResolveApproversInput) -> Result<VoterSet, ConfigError> {
        let references = split_list(&input.approvers);

        // Lookups run concurrently; join_all keeps input order.
        let expansions = join_all(
            references
                .iter()
                .map(|reference| self.expand_group(&input.org, reference)),
        )
        .await;

        let mut identities = Vec::new();
        for (reference, expansion) in references.iter().zip(expansions) {
            match expansion {
                Some(members) => {
                    for member in members {
                        if input.is_excluded(&member) {
                            debug!(
                                "Not adding user '{}' from group '{}' as an approver as they are the workflow initiator",
                                member, reference
                            );
                        } else {
                            identities.push(member);
                        }
                    }
                }
                None if input.is_excluded(reference) => {
                    debug!(
                        "Not adding user '{}' as an approver as they are the workflow initiator",
                        reference
                    );
                }
                None => identities.push(reference.clone()),
            }
        }

        let voters =
            VoterSet::from_input(dedup_preserving_order(identities), &input.minimum_approvals)?;
        info!(
            "Resolved approvers: {} ({})",
            voters.identities().join(", "),
            voters.describe()
        );
        Ok(voters)
    }

    /// Try to read `reference` as a group. `None` means "treat as a login".
    async fn expand_group(&self, org: &str, reference: &str) -> Option<Vec<String>> {
        // Group slugs use hyphens where display names use periods.
        let slug = reference.replace('.', "-");
        debug!(
            "Attempting to expand user {}/{} as a group (may not succeed)",
            org, slug
        );

        match self.service.list_group_members(org, &slug).await {
            Ok(members) if !members.is_empty() => Some(members),
            Ok(_) => {
                debug!("Group {}/{} has no members, using '{}' as a login", org, slug, reference);
                None
            }
            Err(e) if e.is_not_found() => {
                debug!("'{}' is not a group, using it as a login", reference);
                None
            }
            Err(e) => {
                warn!(
                    "Failed to look up group {}/{} ({}), using '{}' as a login",
                    org, slug, e, reference
                );
                None
            }
        }
    }
}
