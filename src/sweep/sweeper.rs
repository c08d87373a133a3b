//! Branch sweeper: sequential scan of one prefix
//!
//! Registration numbers are assumed to be handed out densely from 1 upward,
//! so a run of consecutive absences is read as the end of the allocated
//! range. This is a heuristic, not a guarantee: a student whose sequence
//! number lies beyond a gap of `failure_threshold` or more absences is never
//! requested and therefore never collected.

use crate::config::SweepConfig;
use crate::record::StudentRecord;
use crate::regno::Prefix;
use crate::sweep::fetcher::{fetch_registration, FetchContext, FetchOutcome};
use std::ops::RangeInclusive;

/// Bounds applied to every prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepLimits {
    /// Sequence numbers tried, in order
    pub sequences: RangeInclusive<u32>,

    /// Consecutive absences that end the sweep
    pub failure_threshold: u32,
}

impl From<&SweepConfig> for SweepLimits {
    fn from(config: &SweepConfig) -> Self {
        Self {
            sequences: config.sequence_range(),
            failure_threshold: config.failure_threshold,
        }
    }
}

/// Everything one sweep produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepOutcome {
    pub prefix: Prefix,

    /// Parsed records in sequence-number order
    pub records: Vec<StudentRecord>,

    /// Number of registration numbers requested
    pub attempts: u32,

    /// Whether the failure threshold cut the sweep short
    pub stopped_early: bool,
}

/// Sweeps one prefix
///
/// Fetches are strictly sequential. The consecutive-absence counter is
/// local to this call, resets on every record found, and ends the sweep
/// as soon as it reaches `limits.failure_threshold`.
pub async fn sweep_prefix(
    ctx: &FetchContext,
    prefix: &Prefix,
    limits: &SweepLimits,
) -> SweepOutcome {
    let mut records = Vec::new();
    let mut attempts = 0;
    let mut consecutive_failures = 0;
    let mut stopped_early = false;

    for sequence in limits.sequences.clone() {
        let reg_no = match prefix.registration(sequence) {
            Ok(reg_no) => reg_no,
            Err(e) => {
                tracing::warn!("Stopping prefix {}: {}", prefix, e);
                break;
            }
        };

        attempts += 1;
        match fetch_registration(ctx, &reg_no).await {
            FetchOutcome::Found(record) => {
                tracing::info!(
                    "Processed: {} | Name: {} | College: {} ({}) | Branch: {} ({})",
                    record.registration_number,
                    record.name,
                    record.college_name,
                    record.college_code,
                    record.branch_name,
                    record.branch_code
                );
                records.push(record);
                consecutive_failures = 0;
            }
            FetchOutcome::Absent(reason) => {
                tracing::debug!("No result for {}: {:?}", reg_no, reason);
                consecutive_failures += 1;
                if consecutive_failures >= limits.failure_threshold {
                    tracing::info!(
                        "Stopping prefix {} after {} consecutive failures",
                        prefix,
                        consecutive_failures
                    );
                    stopped_early = true;
                    break;
                }
            }
        }
    }

    SweepOutcome {
        prefix: prefix.clone(),
        records,
        attempts,
        stopped_early,
    }
}
