//! Sweep module: the registration-number scrape
//!
//! This module contains the core sweep logic, including:
//! - The result-page parsing contract
//! - Fetching one registration number
//! - Sweeping one prefix with the early-stop heuristic
//! - Scheduling and coordinating sweeps across all prefixes

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;
mod sweeper;

pub use coordinator::{run_sweep, Coordinator};
pub use fetcher::{build_http_client, fetch_registration, AbsentReason, FetchContext, FetchOutcome};
pub use parser::{parse_result_page, PageSelectors, ResultPage, ResultPageSchema};
pub use scheduler::{acquire_slot, Scheduler};
pub use sweeper::{sweep_prefix, SweepLimits, SweepOutcome};
