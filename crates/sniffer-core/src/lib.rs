//! Capture pipeline for the passive BLE advertisement sniffer
//!
//! This crate holds everything that does not touch the radio: the data model,
//! address anonymization, capture log naming and the append-only log itself.
//! A platform binding (see `sniffer-ble`) drives a [`ScanEventHandler`] with
//! radio state changes and advertisement reports; [`CaptureRecorder`] is the
//! handler that turns those reports into log lines.
//!
//! ## Modules
//!
//! - [`types`] - Advertisement events, capture records, timestamps, radio state
//! - [`anonymize`] - One-way address hashing
//! - [`log_name`] - Capture log file naming schemes
//! - [`log_stream`] - Append-only log handle
//! - [`recorder`] - Filtering, anonymizing recorder
//! - [`scan_state`] - Scan on/off state machine
//! - [`handler`] - Scanner-facing handler trait
//! - [`errors`] - Error types
//!
//! ## Usage
//!
//! ```rust
//! use sniffer_core::{AddressType, AdvertisementEvent, CaptureRecorder, LogStream, SystemTimeSource};
//!
//! # fn example() -> sniffer_core::Result<()> {
//! let stream = LogStream::new(Vec::new(), false)?;
//! let mut recorder = CaptureRecorder::new(stream, SystemTimeSource::new());
//!
//! let event = AdvertisementEvent::new("d1:0c:2e:4b:7a:19", AddressType::Random, -71);
//! let record = recorder.record(&event)?;
//! assert!(record.is_some());
//! # Ok(())
//! # }
//! ```

pub mod anonymize;
pub mod errors;
pub mod handler;
pub mod log_name;
pub mod log_stream;
pub mod recorder;
pub mod scan_state;
pub mod types;

pub use anonymize::{hash_address, ADDRESS_HASH_LEN};
pub use errors::{Result, SnifferError};
pub use handler::ScanEventHandler;
pub use log_name::{log_file_name, log_file_path, FilenameScheme, DEFAULT_LOG_DIR};
pub use log_stream::{LogStream, LOG_HEADER};
pub use recorder::{CaptureRecorder, CaptureStats};
pub use scan_state::{ScanAction, ScanState};
pub use types::{
    AddressType, AdvertisementEvent, CaptureRecord, RadioState, SystemTimeSource, TimeSource,
    Timestamp,
};
