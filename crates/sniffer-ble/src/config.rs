//! BLE scanner configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

// ----------------------------------------------------------------------------
// Configuration
// ----------------------------------------------------------------------------

/// Configuration for the BLE scanner adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BleScannerConfig {
    /// Which host adapter to scan with, in the order the platform lists them
    pub adapter_index: usize,
    /// How often the adapter power state is re-read, in seconds.
    /// Covers platforms that do not push state updates.
    pub state_poll_interval_secs: u64,
}

impl Default for BleScannerConfig {
    fn default() -> Self {
        Self {
            adapter_index: 0,
            state_poll_interval_secs: 5,
        }
    }
}

impl BleScannerConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the host adapter
    pub fn with_adapter_index(mut self, index: usize) -> Self {
        self.adapter_index = index;
        self
    }

    /// Set the power state poll interval
    pub fn with_state_poll_interval(mut self, interval: Duration) -> Self {
        self.state_poll_interval_secs = interval.as_secs();
        self
    }

    /// Poll interval as a duration, never shorter than one second
    pub fn state_poll_interval(&self) -> Duration {
        Duration::from_secs(self.state_poll_interval_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BleScannerConfig::default();
        assert_eq!(config.adapter_index, 0);
        assert_eq!(config.state_poll_interval(), Duration::from_secs(5));
    }

    #[test]
    fn test_zero_interval_clamped() {
        let config = BleScannerConfig::new().with_state_poll_interval(Duration::ZERO);
        assert_eq!(config.state_poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: BleScannerConfig = toml::from_str("adapter_index = 2").unwrap();
        assert_eq!(config.adapter_index, 2);
        assert_eq!(config.state_poll_interval_secs, 5);
    }
}
