//! Capture log file naming
//!
//! The legacy scheme reproduces the file names written by the first sensor
//! deployment byte for byte: unpadded components, a zero-based month index and
//! a two-digit year suffix, e.g. `sniffer_9-18-26_9:5:3.log` for
//! 2026-10-18 09:05:03. Downstream parsers key on this shape, so it stays the
//! default. The ISO-8601 scheme is sortable and colon-free for new deployments.

use core::fmt;
use core::str::FromStr;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

/// Prefix shared by every capture log
pub const LOG_FILE_PREFIX: &str = "sniffer_";

/// Extension shared by every capture log
pub const LOG_FILE_EXTENSION: &str = "log";

/// Default directory for capture logs
pub const DEFAULT_LOG_DIR: &str = "/var/log";

// ----------------------------------------------------------------------------
// Filename Scheme
// ----------------------------------------------------------------------------

/// How the process start time is rendered into the log file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilenameScheme {
    /// `sniffer_<M>-<D>-<YY>_<h>:<m>:<s>.log`, unpadded, zero-based month
    #[default]
    Legacy,
    /// `sniffer_<YYYY>-<MM>-<DD>T<hh>-<mm>-<ss>.log`
    Iso8601,
}

impl fmt::Display for FilenameScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilenameScheme::Legacy => f.write_str("legacy"),
            FilenameScheme::Iso8601 => f.write_str("iso8601"),
        }
    }
}

impl FromStr for FilenameScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(FilenameScheme::Legacy),
            "iso8601" | "iso" => Ok(FilenameScheme::Iso8601),
            other => Err(format!(
                "unknown filename scheme '{}' (expected 'legacy' or 'iso8601')",
                other
            )),
        }
    }
}

// ----------------------------------------------------------------------------
// Formatting
// ----------------------------------------------------------------------------

/// Render the log file name for a run started at `started`
pub fn log_file_name<Tz: TimeZone>(scheme: FilenameScheme, started: &DateTime<Tz>) -> String {
    match scheme {
        FilenameScheme::Legacy => format!(
            "{}{}-{}-{}_{}:{}:{}.{}",
            LOG_FILE_PREFIX,
            started.month0(),
            started.day(),
            started.year().rem_euclid(100),
            started.hour(),
            started.minute(),
            started.second(),
            LOG_FILE_EXTENSION
        ),
        FilenameScheme::Iso8601 => format!(
            "{}{:04}-{:02}-{:02}T{:02}-{:02}-{:02}.{}",
            LOG_FILE_PREFIX,
            started.year(),
            started.month(),
            started.day(),
            started.hour(),
            started.minute(),
            started.second(),
            LOG_FILE_EXTENSION
        ),
    }
}

/// Full path of the log file for a run started at `started`
pub fn log_file_path<Tz: TimeZone>(
    dir: &Path,
    scheme: FilenameScheme,
    started: &DateTime<Tz>,
) -> PathBuf {
    dir.join(log_file_name(scheme, started))
}
