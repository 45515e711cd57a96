//! Sniffer application lifecycle
//!
//! Opens the capture log, acquires the radio, runs the scan loop until a
//! shutdown signal or a fatal error and then closes the log.

use std::io::Write;
use std::time::{Duration, Instant};

use sniffer_ble::{BleScanner, BleScannerConfig};
use sniffer_core::{
    AdvertisementEvent, CaptureRecorder, CaptureStats, RadioState, ScanEventHandler, TimeSource,
};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::Result;

// ----------------------------------------------------------------------------
// Statistics Reporting
// ----------------------------------------------------------------------------

/// Wraps a recorder and logs its counters at a fixed interval
pub struct StatsReporter<W: Write, T: TimeSource> {
    recorder: CaptureRecorder<W, T>,
    interval: Option<Duration>,
    last_report: Instant,
}

impl<W: Write, T: TimeSource> StatsReporter<W, T> {
    /// `interval` of zero disables reporting
    pub fn new(recorder: CaptureRecorder<W, T>, interval: Duration) -> Self {
        Self {
            recorder,
            interval: (!interval.is_zero()).then_some(interval),
            last_report: Instant::now(),
        }
    }

    pub fn stats(&self) -> CaptureStats {
        self.recorder.stats()
    }

    pub fn into_recorder(self) -> CaptureRecorder<W, T> {
        self.recorder
    }

    fn maybe_report(&mut self) {
        if let Some(interval) = self.interval {
            if self.last_report.elapsed() >= interval {
                info!("Capture stats: {}", self.recorder.stats());
                self.last_report = Instant::now();
            }
        }
    }
}

impl<W: Write, T: TimeSource> ScanEventHandler for StatsReporter<W, T> {
    fn on_ready(&mut self) {
        self.recorder.on_ready();
    }

    fn on_unready(&mut self, state: RadioState) {
        self.recorder.on_unready(state);
        info!("Capture stats: {}", self.recorder.stats());
    }

    fn on_advertisement(&mut self, event: &AdvertisementEvent) -> sniffer_core::Result<()> {
        self.recorder.on_advertisement(event)?;
        self.maybe_report();
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Application
// ----------------------------------------------------------------------------

/// The running sniffer
pub struct SnifferApp {
    config: AppConfig,
}

impl SnifferApp {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Capture until a shutdown signal arrives.
    ///
    /// Returns the final counters. Any error is fatal: the log is still
    /// flushed before it is returned.
    pub async fn run(self) -> Result<CaptureStats> {
        let capture = &self.config.capture;

        if capture.create_log_dir {
            std::fs::create_dir_all(&capture.log_dir)?;
        }

        let recorder = CaptureRecorder::initialize(
            &capture.log_dir,
            capture.filename_scheme,
            capture.flush_each_record,
        )?;
        let mut handler =
            StatsReporter::new(recorder, Duration::from_secs(capture.stats_interval_secs));

        let scan_result = scan(self.config.ble.clone(), &mut handler).await;

        let recorder = handler.into_recorder();
        let stats = recorder.stats();
        let close_result = recorder.close();

        scan_result?;
        close_result?;
        Ok(stats)
    }
}

async fn scan<H: ScanEventHandler>(config: BleScannerConfig, handler: &mut H) -> Result<()> {
    let mut scanner = BleScanner::new(config);
    scanner.initialize().await?;
    scanner.run(handler, shutdown_signal()).await?;
    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received terminate signal, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sniffer_core::{AddressType, LogStream, SystemTimeSource};

    fn reporter(interval: Duration) -> StatsReporter<Vec<u8>, SystemTimeSource> {
        let stream = LogStream::new(Vec::new(), false).unwrap();
        StatsReporter::new(CaptureRecorder::new(stream, SystemTimeSource::new()), interval)
    }

    #[test]
    fn test_reporter_forwards_to_recorder() {
        let mut handler = reporter(Duration::from_secs(60));
        handler.on_ready();
        handler
            .on_advertisement(&AdvertisementEvent::new("aa", AddressType::Random, -50))
            .unwrap();
        handler
            .on_advertisement(&AdvertisementEvent::new("bb", AddressType::Public, -50))
            .unwrap();
        handler.on_unready(RadioState::PoweredOff);

        let stats = handler.stats();
        assert_eq!(stats.recorded, 1);
        assert_eq!(stats.dropped_non_random, 1);
    }

    #[test]
    fn test_zero_interval_disables_reporting() {
        let handler = reporter(Duration::ZERO);
        assert!(handler.interval.is_none());
    }

    #[tokio::test]
    async fn test_missing_log_dir_fails_before_radio() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.capture.log_dir = dir.path().join("absent");

        let err = SnifferApp::new(config).run().await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::CliError::Capture(sniffer_core::SnifferError::LogOpen { .. })
        ));
    }
}
