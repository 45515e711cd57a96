//! Append-only capture log
//!
//! [`LogStream`] is the single owner of the output sink for a run. It writes
//! the header once when constructed, appends whole lines afterwards and never
//! seeks, truncates or rewrites. The buffer is flushed on [`LogStream::close`]
//! and, best effort, when the stream is dropped.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{Result, SnifferError};

/// Header line written once at the top of every capture log
pub const LOG_HEADER: &str = "ts,mac_hash,rssi";

// ----------------------------------------------------------------------------
// Log Stream
// ----------------------------------------------------------------------------

/// Exclusive, append-only handle on the capture log
#[derive(Debug)]
pub struct LogStream<W: Write> {
    writer: BufWriter<W>,
    /// Flush after every appended line instead of relying on the buffer
    flush_each_line: bool,
    lines_written: u64,
    path: Option<PathBuf>,
}

impl LogStream<File> {
    /// Open (or create) the log file at `path` in append mode and write the header
    pub fn open(path: &Path, flush_each_line: bool) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| SnifferError::LogOpen {
                path: path.to_path_buf(),
                source,
            })?;

        let mut stream = Self::new(file, flush_each_line)?;
        stream.path = Some(path.to_path_buf());
        Ok(stream)
    }
}

impl<W: Write> LogStream<W> {
    /// Wrap an arbitrary sink and write the header
    pub fn new(sink: W, flush_each_line: bool) -> Result<Self> {
        let mut writer = BufWriter::new(sink);
        writeln!(writer, "{}", LOG_HEADER).map_err(SnifferError::LogWrite)?;
        writer.flush().map_err(SnifferError::LogWrite)?;

        Ok(Self {
            writer,
            flush_each_line,
            lines_written: 0,
            path: None,
        })
    }

    /// Append one complete line. `line` must already carry its trailing newline.
    pub fn append_line(&mut self, line: &str) -> Result<()> {
        debug_assert!(line.ends_with('\n'));
        self.writer
            .write_all(line.as_bytes())
            .map_err(SnifferError::LogWrite)?;
        if self.flush_each_line {
            self.writer.flush().map_err(SnifferError::LogWrite)?;
        }
        self.lines_written += 1;
        Ok(())
    }

    /// Push buffered lines to the sink
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(SnifferError::LogWrite)
    }

    /// Flush and release the sink
    pub fn close(self) -> Result<W> {
        let lines = self.lines_written;
        let sink = self
            .writer
            .into_inner()
            .map_err(|e| SnifferError::LogWrite(e.into_error()))?;
        debug!("Capture log closed after {} data lines", lines);
        Ok(sink)
    }

    /// Data lines appended so far, excluding the header
    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    /// Path of the backing file, if the stream was opened from one
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
