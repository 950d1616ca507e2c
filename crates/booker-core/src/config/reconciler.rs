//! Expiry reconciler configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for the background sweep that releases expired reservations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcilerConfig {
    /// Whether the reconciler runs inside the server process.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Seconds between sweeps.
    #[serde(default = "default_interval")]
    pub interval_seconds: u64,
    /// Run one sweep immediately on start instead of waiting a full interval.
    #[serde(default = "default_true")]
    pub run_on_start: bool,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_seconds: default_interval(),
            run_on_start: true,
        }
    }
}

impl ReconcilerConfig {
    /// Sweep interval as a [`Duration`]. Never zero.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds.max(1))
    }
}

fn default_true() -> bool {
    true
}

fn default_interval() -> u64 {
    60
}
