//! Eligible voters and the quorum needed to approve.

use crate::core::error::ConfigError;
use crate::util::dedup_preserving_order;
use serde::Serialize;

/// Ordered, duplicate-free set of voter identities plus the approval quorum.
///
/// Invariants: at least one voter, and `1 <= quorum <= len`. Built once at
/// startup and never mutated.
///
/// # Example
///
/// ```
/// use approval_domain::quorum::VoterSet;
///
/// let voters = VoterSet::from_input(vec!["alice".into(), "bob".into(), "alice".into()], "").unwrap();
/// assert_eq!(voters.len(), 2);
/// assert_eq!(voters.quorum(), 2);
///
/// let voters = VoterSet::from_input(vec!["alice".into(), "bob".into()], "1").unwrap();
/// assert_eq!(voters.quorum(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoterSet {
    identities: Vec<String>,
    quorum: usize,
}

impl VoterSet {
    /// Build a voter set. `quorum` defaults to every voter.
    pub fn new(identities: Vec<String>, quorum: Option<usize>) -> Result<Self, ConfigError> {
        let identities = dedup_preserving_order(identities);
        if identities.is_empty() {
            return Err(ConfigError::NoApprovers);
        }

        let quorum = quorum.unwrap_or(identities.len());
        if quorum == 0 {
            return Err(ConfigError::ZeroQuorum);
        }
        if quorum > identities.len() {
            return Err(ConfigError::QuorumUnreachable {
                required: quorum,
                available: identities.len(),
            });
        }

        Ok(Self { identities, quorum })
    }

    /// Build a voter set from the raw minimum-approvals input.
    ///
    /// An empty (or blank) input means every voter must approve.
    pub fn from_input(identities: Vec<String>, minimum_approvals: &str) -> Result<Self, ConfigError> {
        Self::new(identities, parse_minimum_approvals(minimum_approvals)?)
    }

    pub fn identities(&self) -> &[String] {
        &self.identities
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    /// Always false for a constructed set.
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    /// Distinct approvals required for an `Approved` decision.
    pub fn quorum(&self) -> usize {
        self.quorum
    }

    /// Human-readable requirement, e.g. "2 of 3 approvers".
    pub fn describe(&self) -> String {
        format!("{} of {} approvers", self.quorum, self.identities.len())
    }
}

/// Parse the minimum-approvals input. `None` means "all voters".
pub fn parse_minimum_approvals(raw: &str) -> Result<Option<usize>, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<usize>()
        .map(Some)
        .map_err(|e| ConfigError::InvalidMinimumApprovals {
            raw: raw.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_quorum_defaults_to_all() {
        let set = VoterSet::new(ids(&["alice", "bob", "carol"]), None).unwrap();
        assert_eq!(set.quorum(), 3);
        assert_eq!(set.describe(), "3 of 3 approvers");
    }

    #[test]
    fn test_duplicates_removed_in_order() {
        let set = VoterSet::new(ids(&["bob", "alice", "bob"]), None).unwrap();
        assert_eq!(set.identities(), &["bob", "alice"]);
        assert_eq!(set.quorum(), 2);
    }

    #[test]
    fn test_empty_set_rejected() {
        assert_eq!(VoterSet::new(vec![], None), Err(ConfigError::NoApprovers));
    }

    #[test]
    fn test_quorum_exceeding_voters_rejected() {
        let result = VoterSet::from_input(ids(&["alice", "bob", "carol"]), "5");
        assert_eq!(
            result,
            Err(ConfigError::QuorumUnreachable {
                required: 5,
                available: 3
            })
        );
    }

    #[test]
    fn test_zero_quorum_rejected() {
        assert_eq!(
            VoterSet::from_input(ids(&["alice"]), "0"),
            Err(ConfigError::ZeroQuorum)
        );
    }

    #[test]
    fn test_parse_minimum_approvals() {
        assert_eq!(parse_minimum_approvals(""), Ok(None));
        assert_eq!(parse_minimum_approvals("  "), Ok(None));
        assert_eq!(parse_minimum_approvals(" 2 "), Ok(Some(2)));
        assert!(matches!(
            parse_minimum_approvals("two"),
            Err(ConfigError::InvalidMinimumApprovals { .. })
        ));
        assert!(matches!(
            parse_minimum_approvals("-1"),
            Err(ConfigError::InvalidMinimumApprovals { .. })
        ));
    }
}
