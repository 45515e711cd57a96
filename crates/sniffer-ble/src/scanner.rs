//! BLE scanner adapter
//!
//! Presents the host radio as two signals to a [`ScanEventHandler`]: radio
//! readiness and advertisement reports. Scanning is started with an empty
//! filter whenever the radio reports powered-on and stopped whenever it leaves
//! that state. A radio going away is a normal transition, not an error.

use std::future::Future;

use btleplug::api::{Central, CentralEvent, CentralState, Manager as _, Peripheral as _, ScanFilter};
use btleplug::platform::{Adapter, Manager, PeripheralId};
use futures::stream::StreamExt;
use sniffer_core::{RadioState, ScanAction, ScanEventHandler, ScanState};
use tracing::{debug, info, warn};

use crate::config::BleScannerConfig;
use crate::convert::{advertisement_from_properties, radio_state_from_central};
use crate::error::{BleScannerError, Result};

// ----------------------------------------------------------------------------
// Scanner
// ----------------------------------------------------------------------------

/// Drives one host BLE adapter and forwards what it hears
pub struct BleScanner {
    config: BleScannerConfig,
    adapter: Option<Adapter>,
    scan_state: ScanState,
    /// Last radio state reported, for change logging
    last_radio_state: Option<RadioState>,
}

impl BleScanner {
    /// Create a scanner; call [`BleScanner::initialize`] before running it
    pub fn new(config: BleScannerConfig) -> Self {
        Self {
            config,
            adapter: None,
            scan_state: ScanState::new(),
            last_radio_state: None,
        }
    }

    /// Acquire the configured host adapter.
    ///
    /// Failure here (no hardware, no permission to open the radio) is fatal.
    pub async fn initialize(&mut self) -> Result<()> {
        let manager = Manager::new()
            .await
            .map_err(|e| BleScannerError::ManagerInit(e.to_string()))?;

        let adapters = manager
            .adapters()
            .await
            .map_err(|e| BleScannerError::ManagerInit(format!("Failed to get adapters: {}", e)))?;

        if adapters.is_empty() {
            return Err(BleScannerError::NoAdapters);
        }

        let available = adapters.len();
        let index = self.config.adapter_index;
        let adapter = adapters
            .into_iter()
            .nth(index)
            .ok_or(BleScannerError::AdapterIndexOutOfRange { index, available })?;

        match adapter.adapter_info().await {
            Ok(info) => info!("BLE adapter initialized: {}", info),
            Err(e) => debug!("BLE adapter initialized (no adapter info: {})", e),
        }

        self.adapter = Some(adapter);
        Ok(())
    }

    /// Whether a scan is currently running
    pub fn is_scanning(&self) -> bool {
        self.scan_state.is_scanning()
    }

    /// Run until `shutdown` resolves or a fatal error occurs.
    ///
    /// Every report is handed to `handler` inline, in delivery order, before
    /// the next event is read. Handler errors end the run.
    pub async fn run<H, S>(&mut self, handler: &mut H, shutdown: S) -> Result<()>
    where
        H: ScanEventHandler,
        S: Future<Output = ()>,
    {
        let adapter = self
            .adapter
            .clone()
            .ok_or(BleScannerError::NotInitialized)?;

        let mut events = adapter
            .events()
            .await
            .map_err(|e| BleScannerError::EventStreamFailed(e.to_string()))?;

        let initial = self.read_radio_state(&adapter).await;
        self.apply_radio_state(&adapter, initial, handler).await?;

        let mut state_poll = tokio::time::interval(self.config.state_poll_interval());
        state_poll.tick().await;
        tokio::pin!(shutdown);

        let result = loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Received shutdown signal");
                    break Ok(());
                }

                event = events.next() => {
                    let Some(event) = event else {
                        break Err(BleScannerError::EventStreamFailed(
                            "BLE event stream closed".to_string(),
                        ));
                    };
                    if let Err(e) = self.handle_event(&adapter, event, handler).await {
                        break Err(e);
                    }
                }

                _ = state_poll.tick() => {
                    let state = self.read_radio_state(&adapter).await;
                    if let Err(e) = self.apply_radio_state(&adapter, state, handler).await {
                        break Err(e);
                    }
                }
            }
        };

        if let Some(ScanAction::Stop) = self.scan_state.shutdown() {
            match adapter.stop_scan().await {
                Ok(()) => info!("Bluetooth scanner stopped"),
                Err(e) => warn!("Failed to stop BLE scan on shutdown: {}", e),
            }
        }

        result
    }

    /// Dispatch one central event
    ///
    /// Every `DeviceDiscovered`/`DeviceUpdated` report is forwarded; nothing is
    /// deduplicated here. Some stacks coalesce repeats before they reach us:
    /// BlueZ only raises `DeviceUpdated` when a D-Bus property (RSSI, payload)
    /// changes, so an identical repeated advertisement produces no event.
    async fn handle_event<H: ScanEventHandler>(
        &mut self,
        adapter: &Adapter,
        event: CentralEvent,
        handler: &mut H,
    ) -> Result<()> {
        match event {
            CentralEvent::StateUpdate(state) => {
                self.apply_radio_state(adapter, radio_state_from_central(state), handler)
                    .await
            }
            CentralEvent::DeviceDiscovered(id) | CentralEvent::DeviceUpdated(id) => {
                if !self.scan_state.is_scanning() {
                    return Ok(());
                }
                self.forward_advertisement(adapter, &id, handler).await
            }
            _ => Ok(()),
        }
    }

    /// Read the peripheral's latest report and hand it to the handler
    async fn forward_advertisement<H: ScanEventHandler>(
        &self,
        adapter: &Adapter,
        id: &PeripheralId,
        handler: &mut H,
    ) -> Result<()> {
        // A peripheral can disappear between the event and the lookup.
        let peripheral = match adapter.peripheral(id).await {
            Ok(peripheral) => peripheral,
            Err(e) => {
                debug!("Peripheral {:?} gone before lookup: {}", id, e);
                return Ok(());
            }
        };

        let properties = match peripheral.properties().await {
            Ok(Some(properties)) => properties,
            Ok(None) => return Ok(()),
            Err(e) => {
                debug!("No properties for peripheral {:?}: {}", id, e);
                return Ok(());
            }
        };

        match advertisement_from_properties(&properties) {
            Some(event) => handler.on_advertisement(&event)?,
            None => debug!("Skipping report without RSSI from {:?}", id),
        }
        Ok(())
    }

    /// Current adapter power state. Platforms that cannot report it are
    /// treated as powered on so scanning is still attempted.
    async fn read_radio_state(&self, adapter: &Adapter) -> RadioState {
        match adapter.adapter_state().await {
            Ok(state) => radio_state_from_central(state),
            Err(e) => {
                debug!("Adapter state unavailable ({}), assuming powered on", e);
                radio_state_from_central(CentralState::PoweredOn)
            }
        }
    }

    /// Log the radio state whenever it differs from the previous report.
    /// Returns whether it changed.
    fn note_radio_state(&mut self, state: RadioState) -> bool {
        if self.last_radio_state == Some(state) {
            return false;
        }
        info!("Bluetooth Scanner is: {}", state);
        self.last_radio_state = Some(state);
        true
    }

    /// Feed a radio state report through the scan state machine and act on it
    async fn apply_radio_state<H: ScanEventHandler>(
        &mut self,
        adapter: &Adapter,
        state: RadioState,
        handler: &mut H,
    ) -> Result<()> {
        self.note_radio_state(state);
        match self.scan_state.transition(state) {
            Some(ScanAction::Start) => {
                adapter
                    .start_scan(ScanFilter::default())
                    .await
                    .map_err(|e| BleScannerError::ScanFailed(e.to_string()))?;
                info!("Started BLE scanning for all advertisers");
                handler.on_ready();
            }
            Some(ScanAction::Stop) => {
                // The radio is already down when this fires; a failed stop is expected.
                if let Err(e) = adapter.stop_scan().await {
                    debug!("stop_scan after radio state {} failed: {}", state, e);
                }
                handler.on_unready(state);
            }
            None => {}
        }
        Ok(())
    }
}
