//! Scanner-facing capability interface
//!
//! The platform binding drives an implementation of [`ScanEventHandler`] with
//! radio state changes and advertisement reports. Keeping the interface this
//! narrow lets the capture logic be exercised with synthetic events.

use crate::errors::Result;
use crate::types::{AdvertisementEvent, RadioState};

/// Receiver of scanner notifications
///
/// All methods are called from a single logical flow, one at a time, in
/// delivery order.
pub trait ScanEventHandler {
    /// The radio became ready and scanning has started
    fn on_ready(&mut self);

    /// The radio left the ready state; scanning is stopped until it returns
    fn on_unready(&mut self, state: RadioState);

    /// One advertisement report. An error here is fatal to the scan loop.
    fn on_advertisement(&mut self, event: &AdvertisementEvent) -> Result<()>;
}
