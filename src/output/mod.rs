//! Output module for sweep results and the tools that consume them
//!
//! This module handles:
//! - Appending sweep results to the CSV results file
//! - Summarizing a sweep run
//! - Ranking the results file
//! - Looking students up and rendering a top-N report

mod csv_writer;
mod lookup;
mod ranking;
mod report;
pub mod stats;
mod traits;

pub use csv_writer::CsvResultsWriter;
pub use lookup::{find_by_registration, format_record, load_ranked, lookup};
pub use ranking::{coerce_grade, min_rank_desc, normalize_column, rank_results, RankStats, RankedRecord};
pub use report::{render_top_report, top_n, write_top_report};
pub use stats::{format_summary, print_summary};
pub use traits::{OutputError, OutputResult, RecordSink, SweepSummary};
