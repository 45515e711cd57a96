//! Error types for the BLE scanner adapter

use sniffer_core::SnifferError;
use thiserror::Error;

// ----------------------------------------------------------------------------
// Error Types
// ----------------------------------------------------------------------------

/// Errors raised while driving the host radio
#[derive(Error, Debug)]
pub enum BleScannerError {
    #[error("Failed to create BLE manager: {0}")]
    ManagerInit(String),

    #[error("BLE adapter not available")]
    NoAdapters,

    #[error("BLE adapter index {index} out of range ({available} available)")]
    AdapterIndexOutOfRange { index: usize, available: usize },

    #[error("BLE adapter not initialized")]
    NotInitialized,

    #[error("Failed to start BLE scan: {0}")]
    ScanFailed(String),

    #[error("Failed to get BLE events: {0}")]
    EventStreamFailed(String),

    #[error("Capture handler failed: {0}")]
    Handler(#[from] SnifferError),
}

/// Result type for scanner operations
pub type Result<T> = std::result::Result<T, BleScannerError>;
