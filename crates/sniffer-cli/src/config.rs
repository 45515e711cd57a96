//! Sniffer configuration
//!
//! Configuration is layered with the usual priority order:
//! command line flags > configuration file > defaults.
//! The defaults reproduce the fixed behaviour of the first deployment, so a
//! deployment without a file or flags is unchanged.
//!
//! ```toml
//! [capture]
//! log_dir = "/var/log"
//! filename_scheme = "legacy"
//! flush_each_record = true
//! create_log_dir = false
//! stats_interval_secs = 300
//!
//! [ble]
//! adapter_index = 0
//! state_poll_interval_secs = 5
//!
//! [logging]
//! verbose = false
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sniffer_ble::BleScannerConfig;
use sniffer_core::{FilenameScheme, DEFAULT_LOG_DIR};

use crate::cli::Cli;
use crate::error::{CliError, Result};

// ----------------------------------------------------------------------------
// Configuration Sections
// ----------------------------------------------------------------------------

/// Where and how capture records are written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Directory holding the capture log
    pub log_dir: PathBuf,
    /// Log file naming scheme
    pub filename_scheme: FilenameScheme,
    /// Flush after every record rather than relying on buffering
    pub flush_each_record: bool,
    /// Create `log_dir` if it is missing
    pub create_log_dir: bool,
    /// Seconds between statistics reports; 0 disables them
    pub stats_interval_secs: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            filename_scheme: FilenameScheme::Legacy,
            flush_each_record: true,
            create_log_dir: false,
            stats_interval_secs: 300,
        }
    }
}

/// Diagnostic output settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable debug-level diagnostics
    pub verbose: bool,
}

/// Complete configuration for the sniffer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub capture: CaptureConfig,
    pub ble: BleScannerConfig,
    pub logging: LoggingConfig,
}

// ----------------------------------------------------------------------------
// Loading
// ----------------------------------------------------------------------------

impl AppConfig {
    /// Load and validate a TOML configuration file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: AppConfig = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the configuration for a command line: file (if given) or
    /// defaults, then flag overrides.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.apply_cli_overrides(cli);
        config.validate()?;
        Ok(config)
    }

    /// Apply flags given on the command line
    pub fn apply_cli_overrides(&mut self, cli: &Cli) {
        if cli.verbose {
            self.logging.verbose = true;
        }
        if let Some(dir) = &cli.log_dir {
            self.capture.log_dir = dir.clone();
        }
        if let Some(scheme) = cli.filename_scheme {
            self.capture.filename_scheme = scheme;
        }
        if let Some(index) = cli.adapter {
            self.ble.adapter_index = index;
        }
        if let Some(secs) = cli.stats_interval {
            self.capture.stats_interval_secs = secs;
        }
    }

    /// Reject configurations that cannot produce a capture log
    pub fn validate(&self) -> Result<()> {
        if self.capture.log_dir.as_os_str().is_empty() {
            return Err(CliError::Config("capture.log_dir must not be empty".to_string()));
        }
        if self.capture.log_dir.is_file() {
            return Err(CliError::Config(format!(
                "capture.log_dir {} is a file",
                self.capture.log_dir.display()
            )));
        }
        Ok(())
    }
}
