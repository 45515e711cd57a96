//! Bluetooth Low Energy scanner adapter for the advertisement sniffer
//!
//! This crate binds the host radio, via btleplug, to the
//! [`ScanEventHandler`](sniffer_core::ScanEventHandler) interface from
//! `sniffer-core`.
//!
//! ## Architecture
//!
//! - [`config`] - Adapter selection and state polling
//! - [`error`] - Error types specific to the scanner
//! - [`convert`] - Mapping btleplug types onto the capture data model
//! - [`scanner`] - Adapter acquisition and the scan event loop
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sniffer_ble::{BleScanner, BleScannerConfig};
//! use sniffer_core::{CaptureRecorder, FilenameScheme};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut recorder =
//!     CaptureRecorder::initialize("/var/log".as_ref(), FilenameScheme::Legacy, true)?;
//!
//! let mut scanner = BleScanner::new(BleScannerConfig::default());
//! scanner.initialize().await?;
//! scanner
//!     .run(&mut recorder, async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await?;
//!
//! recorder.close()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Platform Support
//!
//! Scanning works wherever btleplug provides central mode (BlueZ on Linux,
//! Core Bluetooth on macOS, WinRT on Windows). On Linux the process needs
//! access to the BlueZ D-Bus interface.

pub mod config;
pub mod convert;
pub mod error;
pub mod scanner;

pub use config::BleScannerConfig;
pub use error::{BleScannerError, Result};
pub use scanner::BleScanner;
