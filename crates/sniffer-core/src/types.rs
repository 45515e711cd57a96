//! Core types for the capture pipeline
//!
//! Advertisements arrive from the radio as [`AdvertisementEvent`]s and leave as
//! [`CaptureRecord`]s. Time is abstracted behind [`TimeSource`] so the recorder
//! can be driven with a fixed clock in tests.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

// ----------------------------------------------------------------------------
// Address Type
// ----------------------------------------------------------------------------

/// Classification of a BLE hardware address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    /// Fixed, manufacturer-assigned address
    Public,
    /// Periodically rotated address
    Random,
    /// The radio stack did not report a type
    Unknown,
}

impl AddressType {
    /// Check if this is a rotating (random) address
    pub fn is_random(&self) -> bool {
        matches!(self, AddressType::Random)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AddressType::Public => "public",
            AddressType::Random => "random",
            AddressType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AddressType {
    type Err = core::convert::Infallible;

    /// Unrecognised strings map to `Unknown` rather than failing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "public" => AddressType::Public,
            "random" => AddressType::Random,
            _ => AddressType::Unknown,
        })
    }
}

// ----------------------------------------------------------------------------
// Advertisement Event
// ----------------------------------------------------------------------------

/// A single advertisement report from the radio
///
/// Produced by the scanner and consumed immediately by the recorder; never
/// stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvertisementEvent {
    /// Raw hardware address token as reported by the radio stack
    pub address: String,
    /// Whether the address is public or rotating
    pub address_type: AddressType,
    /// Received signal strength in dBm
    pub rssi: i16,
}

impl AdvertisementEvent {
    pub fn new(address: impl Into<String>, address_type: AddressType, rssi: i16) -> Self {
        Self {
            address: address.into(),
            address_type,
            rssi,
        }
    }
}

// ----------------------------------------------------------------------------
// Time
// ----------------------------------------------------------------------------

/// Wall-clock time in milliseconds since the Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create a new timestamp
    pub fn new(millis: u64) -> Self {
        Self(millis)
    }

    /// Current wall-clock time
    pub fn now() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self(duration.as_millis() as u64)
    }

    /// Milliseconds since the epoch
    pub fn as_millis(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of capture timestamps
pub trait TimeSource {
    /// Get the current timestamp
    fn now(&self) -> Timestamp;
}

/// Wall-clock implementation of [`TimeSource`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl SystemTimeSource {
    pub fn new() -> Self {
        Self
    }
}

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

// ----------------------------------------------------------------------------
// Capture Record
// ----------------------------------------------------------------------------

/// The unit of durable output: one line in the capture log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRecord {
    pub timestamp: Timestamp,
    /// Lowercase hex SHA-256 of the raw address
    pub address_hash: String,
    pub rssi: i16,
}

impl CaptureRecord {
    /// Render the record as a newline-terminated log line
    pub fn to_line(&self) -> String {
        format!("{}\n", self)
    }
}

impl fmt::Display for CaptureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.timestamp, self.address_hash, self.rssi)
    }
}

// ----------------------------------------------------------------------------
// Radio State
// ----------------------------------------------------------------------------

/// Power/availability state of the host radio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioState {
    PoweredOn,
    PoweredOff,
    Unknown,
}

impl RadioState {
    /// Only a powered-on radio can scan
    pub fn is_ready(&self) -> bool {
        matches!(self, RadioState::PoweredOn)
    }
}

impl fmt::Display for RadioState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RadioState::PoweredOn => f.write_str("poweredOn"),
            RadioState::PoweredOff => f.write_str("poweredOff"),
            RadioState::Unknown => f.write_str("unknown"),
        }
    }
}
