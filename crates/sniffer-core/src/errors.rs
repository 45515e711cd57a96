//! Error types for the capture pipeline
//!
//! Everything that can go wrong between receiving an advertisement and having
//! its record on disk is an I/O failure on the capture log. All of them are
//! fatal to the run.

use std::path::PathBuf;

use thiserror::Error;

// ----------------------------------------------------------------------------
// Error Types
// ----------------------------------------------------------------------------

/// Errors raised by the sniffer core
#[derive(Error, Debug)]
pub enum SnifferError {
    #[error("Failed to open capture log {}: {source}", .path.display())]
    LogOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write capture log: {0}")]
    LogWrite(#[source] std::io::Error),
}

/// Result type for sniffer core operations
pub type Result<T> = std::result::Result<T, SnifferError>;
