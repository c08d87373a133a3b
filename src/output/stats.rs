//! Sweep run statistics
//!
//! This module provides the end-of-run report printed by the CLI.

use crate::output::traits::SweepSummary;

/// Formats a summary as the multi-line report printed after a sweep
pub fn format_summary(summary: &SweepSummary) -> String {
    let mut out = String::new();

    out.push_str("=== Sweep Statistics ===\n\n");
    out.push_str(&format!("Started: {}\n", summary.started_at.to_rfc3339()));
    if let Some(finished) = summary.finished_at {
        out.push_str(&format!("Finished: {}\n", finished.to_rfc3339()));
    }
    out.push('\n');

    out.push_str("Sweeps:\n");
    out.push_str(&format!("  Prefixes scheduled: {}\n", summary.prefixes_scheduled));
    out.push_str(&format!("  Completed: {}\n", summary.sweeps_completed));
    out.push_str(&format!("  Stopped early: {}\n", summary.sweeps_stopped_early));
    out.push_str(&format!("  Failed: {}\n", summary.sweeps_failed));
    out.push('\n');

    out.push_str("Requests:\n");
    out.push_str(&format!("  Registration numbers tried: {}\n", summary.fetch_attempts));
    out.push_str(&format!("  Records written: {}\n", summary.records_written));
    if summary.records_lost > 0 {
        out.push_str(&format!("  Records lost to write errors: {}\n", summary.records_lost));
    }
    out.push_str(&format!("  Hit rate: {:.2}%\n", summary.hit_rate()));
    out.push('\n');

    out.push_str(&format!(
        "Completed in {:.2} seconds\n",
        summary.elapsed.as_secs_f64()
    ));

    out
}

/// Prints a summary to stdout
pub fn print_summary(summary: &SweepSummary) {
    print!("{}", format_summary(summary));
}
