//! Sweep scheduling: concurrency bound and start pacing
//!
//! This module handles:
//! - Global concurrency limiting via a semaphore
//! - A fixed stagger between consecutive sweep starts

use crate::config::SweepConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::time::Instant;

/// Paces sweep submission and bounds how many run at once
///
/// The stagger is a fixed delay between submissions. It does not adapt to
/// server latency or error rates.
#[derive(Debug)]
pub struct Scheduler {
    /// Global semaphore for limiting concurrent sweeps
    semaphore: Arc<Semaphore>,

    /// Minimum gap between two submissions
    stagger: Duration,

    /// When the previous submission happened
    last_submission: Option<Instant>,
}

impl Scheduler {
    pub fn new(max_concurrent: usize, stagger: Duration) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
            stagger,
            last_submission: None,
        }
    }

    pub fn from_config(config: &SweepConfig) -> Self {
        Self::new(
            config.max_concurrent_sweeps as usize,
            Duration::from_millis(config.stagger_ms),
        )
    }

    /// Waits until the stagger since the previous submission has elapsed
    ///
    /// The first call returns immediately.
    pub async fn pace(&mut self) {
        if let Some(last) = self.last_submission {
            tokio::time::sleep_until(last + self.stagger).await;
        }
        self.last_submission = Some(Instant::now());
    }

    /// Handle used by a spawned sweep to claim a slot
    pub fn slots(&self) -> Arc<Semaphore> {
        Arc::clone(&self.semaphore)
    }

    /// Number of sweeps that could start right now
    pub fn available_slots(&self) -> usize {
        self.semaphore.available_permits()
    }
}

/// Waits for a free slot; the slot is released when the permit drops
///
/// Returns `None` only if the semaphore was closed.
pub async fn acquire_slot(slots: Arc<Semaphore>) -> Option<OwnedSemaphorePermit> {
    slots.acquire_owned().await.ok()
}
