//! Output sink trait and run summary types
//!
//! This module defines the trait interface for record sinks and the
//! summary the coordinator returns after a sweep.

use crate::record::StudentRecord;
use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for sweep results
///
/// The coordinator is the only caller, so implementations need no internal
/// locking. Each `append_batch` call must land as one contiguous block:
/// rows from two batches never interleave.
pub trait RecordSink {
    /// Writes the fixed header row, discarding any previous contents
    fn write_header(&mut self) -> OutputResult<()>;

    /// Appends every record of one completed sweep
    fn append_batch(&mut self, records: &[StudentRecord]) -> OutputResult<()>;
}

/// Summary statistics for one sweep run
#[derive(Debug, Clone, PartialEq)]
pub struct SweepSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub elapsed: Duration,

    /// Prefixes submitted to the pool
    pub prefixes_scheduled: u64,

    /// Sweeps that returned an outcome
    pub sweeps_completed: u64,

    /// Sweep tasks that panicked or were cancelled
    pub sweeps_failed: u64,

    /// Sweeps ended by the consecutive-failure threshold
    pub sweeps_stopped_early: u64,

    /// Registration numbers requested across all sweeps
    pub fetch_attempts: u64,

    /// Records persisted to the sink
    pub records_written: u64,

    /// Records of completed sweeps the sink failed to persist
    pub records_lost: u64,
}

impl SweepSummary {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            finished_at: None,
            elapsed: Duration::ZERO,
            prefixes_scheduled: 0,
            sweeps_completed: 0,
            sweeps_failed: 0,
            sweeps_stopped_early: 0,
            fetch_attempts: 0,
            records_written: 0,
            records_lost: 0,
        }
    }

    /// Share of requests that produced a record, as a percentage
    pub fn hit_rate(&self) -> f64 {
        if self.fetch_attempts == 0 {
            return 0.0;
        }
        ((self.records_written + self.records_lost) as f64 / self.fetch_attempts as f64) * 100.0
    }
}
