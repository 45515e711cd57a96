//! Sniffer CLI library
//!
//! Argument parsing, configuration and the application lifecycle for the
//! `ble-sniffer` binary.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;

pub use app::{SnifferApp, StatsReporter};
pub use cli::Cli;
pub use config::{AppConfig, CaptureConfig, LoggingConfig};
pub use error::{CliError, Result};
