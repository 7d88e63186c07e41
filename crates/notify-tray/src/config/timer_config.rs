use crate::config::default_timer_interval_secs;

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timer item configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Seconds between timer ticks.
    #[serde(default = "default_timer_interval_secs")]
    pub interval_secs: u64,
}

impl TimerConfig {
    /// Tick interval as a `Duration`.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_timer_interval_secs(),
        }
    }
}
