//! Timing records and the sinks that report them.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::info;

/// Start and end of one timed operation.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingRecord {
    pub label: &'static str,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration: Duration,
}

impl TimingRecord {
    /// Starts a stopwatch for an operation called `label`.
    pub fn start(label: &'static str) -> Stopwatch {
        Stopwatch {
            label,
            wall: Utc::now(),
            mono: Instant::now(),
        }
    }
}

/// A running measurement; [`Stopwatch::stop`] turns it into a record.
#[derive(Debug)]
pub struct Stopwatch {
    label: &'static str,
    wall: DateTime<Utc>,
    mono: Instant,
}

impl Stopwatch {
    pub fn stop(self) -> TimingRecord {
        TimingRecord {
            label: self.label,
            start: self.wall,
            end: Utc::now(),
            duration: self.mono.elapsed(),
        }
    }
}

/// Destination for timing records.
///
/// Failures are returned to the caller, which decides whether they
/// matter. The engine only logs them.
pub trait TimingSink {
    fn record(&self, record: &TimingRecord) -> io::Result<()>;
}

impl<T: TimingSink + ?Sized> TimingSink for &T {
    fn record(&self, record: &TimingRecord) -> io::Result<()> {
        (**self).record(record)
    }
}

impl<T: TimingSink + ?Sized> TimingSink for Box<T> {
    fn record(&self, record: &TimingRecord) -> io::Result<()> {
        (**self).record(record)
    }
}

/// Emits each record as a `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TimingSink for TracingSink {
    fn record(&self, record: &TimingRecord) -> io::Result<()> {
        info!(
            start = %record.start.to_rfc3339(),
            end = %record.end.to_rfc3339(),
            duration = ?record.duration,
            "{} finished",
            record.label
        );
        Ok(())
    }
}

/// Appends records to a plain-text log file.
pub struct FileSink {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl FileSink {
    /// Opens `path` for appending, creating it and its parent directories.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TimingSink for FileSink {
    fn record(&self, record: &TimingRecord) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| io::Error::other("timing log writer poisoned"))?;
        writeln!(writer, "{} Start time: {}", record.label, record.start)?;
        writeln!(writer, "{} End time: {}", record.label, record.end)?;
        writeln!(writer, "{} duration time: {:?}", record.label, record.duration)?;
        writer.flush()
    }
}
