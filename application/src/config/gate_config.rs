//! Poll loop behavior configuration.

use std::time::Duration;

/// Sleep between two polls of the ticket's comments.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Controls runtime behavior of the approval poll loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Time to wait after a tick that ended `Pending`.
    pub poll_interval: Duration,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl GateConfig {
    /// Creates a GateConfig from an optional interval in seconds.
    ///
    /// `None` and `0` both fall back to [`DEFAULT_POLL_INTERVAL`].
    pub fn from_interval_seconds(seconds: Option<u64>) -> Self {
        Self {
            poll_interval: seconds
                .filter(|s| *s > 0)
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_POLL_INTERVAL),
        }
    }
}
