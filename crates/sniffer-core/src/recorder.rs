//! Capture recorder
//!
//! Filters advertisement reports down to rotating addresses, anonymizes the
//! address and appends one line per report to the capture log. There is no
//! aggregation or deduplication: a device seen a thousand times produces a
//! thousand lines.

use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::Local;
use tracing::{debug, info};

use crate::anonymize::hash_address;
use crate::errors::Result;
use crate::handler::ScanEventHandler;
use crate::log_name::{log_file_path, FilenameScheme};
use crate::log_stream::LogStream;
use crate::types::{
    AdvertisementEvent, CaptureRecord, RadioState, SystemTimeSource, TimeSource, Timestamp,
};

// ----------------------------------------------------------------------------
// Statistics
// ----------------------------------------------------------------------------

/// Counters kept for the lifetime of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureStats {
    /// Lines appended to the capture log
    pub recorded: u64,
    /// Reports discarded because the address was not random
    pub dropped_non_random: u64,
    /// Random-address reports skipped because they carried no address
    pub skipped_malformed: u64,
}

impl CaptureStats {
    /// Total reports seen
    pub fn seen(&self) -> u64 {
        self.recorded + self.dropped_non_random + self.skipped_malformed
    }
}

impl fmt::Display for CaptureStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} recorded, {} non-random dropped, {} malformed skipped",
            self.recorded, self.dropped_non_random, self.skipped_malformed
        )
    }
}

// ----------------------------------------------------------------------------
// Capture Recorder
// ----------------------------------------------------------------------------

/// Filters, anonymizes and persists advertisement reports
#[derive(Debug)]
pub struct CaptureRecorder<W: Write, T: TimeSource = SystemTimeSource> {
    stream: LogStream<W>,
    clock: T,
    last_timestamp: Option<Timestamp>,
    stats: CaptureStats,
}

impl CaptureRecorder<File, SystemTimeSource> {
    /// Open a new capture log in `log_dir`, named after the current local time
    pub fn initialize(
        log_dir: &Path,
        scheme: FilenameScheme,
        flush_each_line: bool,
    ) -> Result<Self> {
        let path = log_file_path(log_dir, scheme, &Local::now());
        info!("output -> {}", path.display());
        let stream = LogStream::open(&path, flush_each_line)?;
        Ok(Self::new(stream, SystemTimeSource::new()))
    }
}

impl<W: Write, T: TimeSource> CaptureRecorder<W, T> {
    /// Build a recorder over an already-open stream
    pub fn new(stream: LogStream<W>, clock: T) -> Self {
        Self {
            stream,
            clock,
            last_timestamp: None,
            stats: CaptureStats::default(),
        }
    }

    /// Record one advertisement report.
    ///
    /// Returns the record written, or `None` when the report was filtered out.
    pub fn record(&mut self, event: &AdvertisementEvent) -> Result<Option<CaptureRecord>> {
        if !event.address_type.is_random() {
            self.stats.dropped_non_random += 1;
            return Ok(None);
        }

        if event.address.is_empty() {
            debug!("Skipping random-address report without an address");
            self.stats.skipped_malformed += 1;
            return Ok(None);
        }

        let record = CaptureRecord {
            timestamp: self.next_timestamp(),
            address_hash: hash_address(&event.address),
            rssi: event.rssi,
        };

        self.stream.append_line(&record.to_line())?;
        self.stats.recorded += 1;
        Ok(Some(record))
    }

    /// Wall-clock time, held back to the last written value if the clock steps backwards
    fn next_timestamp(&mut self) -> Timestamp {
        let now = self.clock.now();
        let timestamp = match self.last_timestamp {
            Some(last) if now < last => last,
            _ => now,
        };
        self.last_timestamp = Some(timestamp);
        timestamp
    }

    pub fn stats(&self) -> CaptureStats {
        self.stats
    }

    /// Path of the capture log, if file-backed
    pub fn log_path(&self) -> Option<&Path> {
        self.stream.path()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stream.flush()
    }

    /// Flush and release the log, returning the sink
    pub fn close(self) -> Result<W> {
        info!("Capture finished: {}", self.stats);
        self.stream.close()
    }
}

impl<W: Write, T: TimeSource> ScanEventHandler for CaptureRecorder<W, T> {
    fn on_ready(&mut self) {
        info!("Bluetooth scanner started");
    }

    fn on_unready(&mut self, state: RadioState) {
        info!("Bluetooth scanner stopped ({})", state);
        if let Err(e) = self.stream.flush() {
            // The next append will hit the same error and end the run.
            debug!("Flush after scanner stop failed: {}", e);
        }
    }

    fn on_advertisement(&mut self, event: &AdvertisementEvent) -> Result<()> {
        self.record(event).map(|_| ())
    }
}
