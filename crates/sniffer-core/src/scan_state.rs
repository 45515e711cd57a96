//! Scan on/off state machine
//!
//! The only state the sniffer keeps about the radio. Each radio state report
//! is fed through [`ScanState::transition`], which says whether the adapter has
//! to start or stop scanning. Repeated reports of the same state are no-ops, so
//! a flapping radio never causes a double start.

use tracing::debug;

use crate::types::RadioState;

/// What the adapter must do after a radio state report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanAction {
    Start,
    Stop,
}

/// Whether the adapter is currently scanning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    Idle,
    Scanning,
}

impl ScanState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_scanning(&self) -> bool {
        matches!(self, ScanState::Scanning)
    }

    /// Apply a radio state report, returning the action to execute, if any
    pub fn transition(&mut self, radio: RadioState) -> Option<ScanAction> {
        let action = match (*self, radio.is_ready()) {
            (ScanState::Idle, true) => {
                *self = ScanState::Scanning;
                Some(ScanAction::Start)
            }
            (ScanState::Scanning, false) => {
                *self = ScanState::Idle;
                Some(ScanAction::Stop)
            }
            _ => None,
        };
        debug!("Radio {} -> scan state {:?} ({:?})", radio, self, action);
        action
    }

    /// Force the machine back to idle, e.g. on shutdown.
    /// Returns `Stop` if a scan was running.
    pub fn shutdown(&mut self) -> Option<ScanAction> {
        match std::mem::take(self) {
            ScanState::Scanning => Some(ScanAction::Stop),
            ScanState::Idle => None,
        }
    }
}
