//! Debounce configuration.

use serde::{Deserialize, Serialize};
use tokio::time::{Duration, Instant};

/// Configuration for debounced state writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    /// Whether writes are debounced at all. When disabled every update is
    /// written immediately.
    pub enabled: bool,

    /// Quiet period in milliseconds.
    ///
    /// After an update, the gate waits this long before emitting.
    /// Additional updates reset the timer.
    pub quiet_period_ms: u64,

    /// Maximum delay before forcing an emission.
    ///
    /// If updates keep coming, emit after this many milliseconds
    /// since the first pending update. Unset means never force.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_delay_ms: Option<u64>,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            quiet_period_ms: 500,
            max_delay_ms: None,
        }
    }
}

impl DebounceConfig {
    /// Create a config that writes every update immediately.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Create an enabled config with the given quiet period.
    pub fn with_quiet_period_ms(quiet_period_ms: u64) -> Self {
        Self {
            quiet_period_ms,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn max_delay_ms(mut self, max_delay_ms: u64) -> Self {
        self.max_delay_ms = Some(max_delay_ms);
        self
    }

    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }

    /// When the pending value should be emitted, given the time of the
    /// latest update and of the first update since the last emission.
    pub fn deadline(&self, first_pending: Instant, latest: Instant) -> Instant {
        let quiet = latest + self.quiet_period();
        match self.max_delay_ms {
            Some(max) => quiet.min(first_pending + Duration::from_millis(max)),
            None => quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DebounceConfig::default();
        assert!(config.enabled);
        assert_eq!(config.quiet_period_ms, 500);
        assert_eq!(config.max_delay_ms, None);
    }

    #[test]
    fn test_deadline_follows_latest_update() {
        let config = DebounceConfig::with_quiet_period_ms(500);
        let start = Instant::now();
        let latest = start + Duration::from_millis(300);

        assert_eq!(config.deadline(start, latest), latest + Duration::from_millis(500));
    }

    #[test]
    fn test_deadline_capped_by_max_delay() {
        let config = DebounceConfig::with_quiet_period_ms(500).max_delay_ms(1000);
        let start = Instant::now();

        // Early update: quiet period ends first
        let early = start + Duration::from_millis(100);
        assert_eq!(config.deadline(start, early), early + Duration::from_millis(500));

        // Late update: max delay wins
        let late = start + Duration::from_millis(900);
        assert_eq!(config.deadline(start, late), start + Duration::from_millis(1000));
    }

    #[test]
    fn test_disabled() {
        assert!(!DebounceConfig::disabled().enabled);
    }
}
