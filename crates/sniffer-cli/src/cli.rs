//! Command-line interface definitions and parsing
//!
//! Every flag is optional. Without any, the sniffer writes legacy-named logs
//! to `/var/log` using the first adapter.

use std::path::PathBuf;

use clap::Parser;
use sniffer_core::FilenameScheme;

#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory the capture log is written to
    #[arg(short = 'd', long)]
    pub log_dir: Option<PathBuf>,

    /// Capture log naming scheme: legacy or iso8601
    #[arg(long)]
    pub filename_scheme: Option<FilenameScheme>,

    /// Index of the Bluetooth adapter to scan with
    #[arg(short, long)]
    pub adapter: Option<usize>,

    /// Seconds between capture statistics reports (0 disables)
    #[arg(long)]
    pub stats_interval: Option<u64>,
}
