//! Polling and fan-out limits for a judging run.

use std::time::Duration;

/// Bounded exponential backoff for status polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay before the first poll.
    pub initial_interval: Duration,
    /// Upper bound on any single delay.
    pub max_interval: Duration,
    /// Growth factor between consecutive delays.
    pub multiplier: u32,
    /// Polls allowed per submission before giving up.
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_secs(1),
            max_interval: Duration::from_secs(8),
            multiplier: 2,
            max_attempts: 60,
        }
    }
}

impl PollPolicy {
    /// No waiting between polls. Used with in-process judges.
    #[must_use]
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            initial_interval: Duration::ZERO,
            max_interval: Duration::ZERO,
            multiplier: 1,
            max_attempts,
        }
    }

    /// Delay before poll number `attempt` (0-based).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = self.multiplier.max(1).saturating_pow(attempt);
        self.initial_interval.saturating_mul(factor).min(self.max_interval)
    }
}

/// Knobs for one judging run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JudgeOptions {
    /// Poll backoff.
    pub poll: PollPolicy,
    /// Submissions in flight at once. Values below 1 are treated as 1.
    pub concurrency: usize,
    /// Wall-clock budget for the whole run.
    pub deadline: Option<Duration>,
}

impl Default for JudgeOptions {
    fn default() -> Self {
        Self { poll: PollPolicy::default(), concurrency: 1, deadline: None }
    }
}
