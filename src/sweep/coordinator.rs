//! Sweep coordinator - main orchestration logic
//!
//! This module drives a complete run:
//! - Generating every prefix of the search space
//! - Spawning one sweep task per prefix, paced and bounded by the scheduler
//! - Collecting outcomes in completion order
//! - Appending each outcome to the record sink from this task only

use crate::config::Config;
use crate::output::{CsvResultsWriter, RecordSink, SweepSummary};
use crate::regno::{generate_prefixes, Prefix};
use crate::sweep::fetcher::FetchContext;
use crate::sweep::parser::ResultPageSchema;
use crate::sweep::scheduler::{acquire_slot, Scheduler};
use crate::sweep::sweeper::{sweep_prefix, SweepLimits, SweepOutcome};
use crate::SweepError;
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::{JoinError, JoinSet};

/// Completed sweeps between two progress lines
const PROGRESS_INTERVAL: u64 = 25;

/// Main sweep coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    context: Arc<FetchContext>,
    limits: SweepLimits,
}

impl Coordinator {
    /// Creates a coordinator with a fresh HTTP client
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Client and parsing contract are ready
    /// * `Err(SweepError)` - The client or a selector could not be built
    pub fn new(config: Config) -> Result<Self, SweepError> {
        let context = FetchContext::new(&config.http, &ResultPageSchema::default())?;
        Ok(Self::with_context(config, context))
    }

    /// Creates a coordinator around an existing network context
    pub fn with_context(config: Config, context: FetchContext) -> Self {
        let limits = SweepLimits::from(&config.sweep);
        Self {
            config: Arc::new(config),
            context: Arc::new(context),
            limits,
        }
    }

    /// Every prefix this coordinator will sweep, in submission order
    pub fn prefixes(&self) -> Result<Vec<Prefix>, SweepError> {
        let sweep = &self.config.sweep;
        Ok(generate_prefixes(
            &sweep.batch_year,
            sweep.branches.keys(),
            sweep.college_range(),
        )?)
    }

    /// Runs the sweep, writing results to `sink`
    ///
    /// Individual sweep failures are logged and counted; they never stop
    /// the run. The only errors returned are those raised before the first
    /// sweep starts (prefix generation, writing the header).
    pub async fn run<S: RecordSink>(&self, sink: &mut S) -> Result<SweepSummary, SweepError> {
        let start_time = Instant::now();
        let mut summary = SweepSummary::new(Utc::now());

        let prefixes = self.prefixes()?;
        summary.prefixes_scheduled = prefixes.len() as u64;
        tracing::info!("Generated {} prefixes to check", prefixes.len());
        tracing::warn!(
            "Prefixes are abandoned after {} consecutive absences; students numbered past such a gap are not collected",
            self.limits.failure_threshold
        );

        sink.write_header()?;

        let mut scheduler = Scheduler::from_config(&self.config.sweep);
        let mut tasks: JoinSet<SweepOutcome> = JoinSet::new();

        for prefix in prefixes {
            scheduler.pace().await;

            let slots = scheduler.slots();
            let context = Arc::clone(&self.context);
            let limits = self.limits.clone();
            tasks.spawn(async move {
                let _permit = acquire_slot(slots).await;
                sweep_prefix(&context, &prefix, &limits).await
            });

            while let Some(joined) = tasks.try_join_next() {
                self.handle_completion(joined, sink, &mut summary, start_time);
            }
        }

        while let Some(joined) = tasks.join_next().await {
            self.handle_completion(joined, sink, &mut summary, start_time);
        }

        summary.finished_at = Some(Utc::now());
        summary.elapsed = start_time.elapsed();

        tracing::info!(
            "Sweep completed: {} records from {} prefixes in {:.2}s",
            summary.records_written,
            summary.prefixes_scheduled,
            summary.elapsed.as_secs_f64()
        );

        Ok(summary)
    }

    /// Persists one finished sweep and updates the counters
    fn handle_completion<S: RecordSink>(
        &self,
        joined: Result<SweepOutcome, JoinError>,
        sink: &mut S,
        summary: &mut SweepSummary,
        start_time: Instant,
    ) {
        let outcome = match joined {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("Error in branch processing: {}", e);
                summary.sweeps_failed += 1;
                return;
            }
        };

        summary.sweeps_completed += 1;
        summary.fetch_attempts += u64::from(outcome.attempts);
        if outcome.stopped_early {
            summary.sweeps_stopped_early += 1;
        }

        let count = outcome.records.len() as u64;
        match sink.append_batch(&outcome.records) {
            Ok(()) => summary.records_written += count,
            Err(e) => {
                tracing::error!(
                    "Failed to write {} records for prefix {}: {}",
                    count,
                    outcome.prefix,
                    e
                );
                summary.records_lost += count;
            }
        }

        let done = summary.sweeps_completed + summary.sweeps_failed;
        if done % PROGRESS_INTERVAL == 0 {
            let elapsed = start_time.elapsed().as_secs_f64();
            tracing::info!(
                "Progress: {}/{} prefixes, {} records, {:.2} requests/sec",
                done,
                summary.prefixes_scheduled,
                summary.records_written,
                summary.fetch_attempts as f64 / elapsed.max(f64::EPSILON)
            );
        }
    }
}

/// Runs a complete sweep into the configured results file
///
/// # Example
///
/// ```no_run
/// use results_sweeper::config::Config;
/// use results_sweeper::sweep::run_sweep;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let summary = run_sweep(Config::default()).await?;
/// println!("{} records", summary.records_written);
/// # Ok(())
/// # }
/// ```
pub async fn run_sweep(config: Config) -> Result<SweepSummary, SweepError> {
    let mut writer = CsvResultsWriter::create(Path::new(&config.output.results_path))?;
    let coordinator = Coordinator::new(config)?;
    coordinator.run(&mut writer).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputResult;
    use crate::record::StudentRecord;
    use std::collections::BTreeMap;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Keeps every batch in memory
    #[derive(Default)]
    struct MemorySink {
        headers: usize,
        batches: Vec<Vec<StudentRecord>>,
        fail_appends: bool,
    }

    impl RecordSink for MemorySink {
        fn write_header(&mut self) -> OutputResult<()> {
            self.headers += 1;
            self.batches.clear();
            Ok(())
        }

        fn append_batch(&mut self, records: &[StudentRecord]) -> OutputResult<()> {
            if self.fail_appends {
                return Err(crate::output::OutputError::Write("disk full".to_string()));
            }
            self.batches.push(records.to_vec());
            Ok(())
        }
    }

    fn test_config(server: &MockServer, branches: &[&str], colleges: (u32, u32)) -> Config {
        let mut config = Config::default();
        config.sweep.branches = branches
            .iter()
            .map(|b| (b.to_string(), format!("Branch {}", b)))
            .collect::<BTreeMap<_, _>>();
        config.sweep.college_start = colleges.0;
        config.sweep.college_end = colleges.1;
        config.sweep.sequence_end = 20;
        config.sweep.failure_threshold = 3;
        config.sweep.max_concurrent_sweeps = 2;
        config.sweep.stagger_ms = 1;
        config.http.url_template = format!("{}/result.aspx?RegNo={{reg_no}}", server.uri());
        config.http.timeout_secs = 2;
        config
    }

    async fn mount_student(server: &MockServer, reg_no: &str) {
        Mock::given(method("GET"))
            .and(query_param("RegNo", reg_no))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!(
                r#"<span id="ContentPlaceHolder1_DataList1_StudentNameLabel_0">{}</span>"#,
                reg_no
            )))
            .mount(server)
            .await;
    }

    async fn mount_absent(server: &MockServer) {
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_prefixes_follow_config() {
        let server = MockServer::start().await;
        let config = test_config(&server, &["101", "105"], (102, 104));
        let coordinator = Coordinator::new(config).unwrap();
        let prefixes = coordinator.prefixes().unwrap();
        assert_eq!(prefixes.len(), 6);
        assert_eq!(prefixes[0].as_str(), "21101102");
        assert_eq!(prefixes[5].as_str(), "21105104");
    }

    #[tokio::test]
    async fn test_run_collects_every_prefix() {
        let server = MockServer::start().await;
        for reg_no in ["21101102001", "21101102002", "21105103001", "21105103004"] {
            mount_student(&server, reg_no).await;
        }
        mount_absent(&server).await;

        let config = test_config(&server, &["101", "105"], (102, 103));
        let coordinator = Coordinator::new(config).unwrap();
        let mut sink = MemorySink::default();
        let summary = coordinator.run(&mut sink).await.unwrap();

        assert_eq!(sink.headers, 1);
        assert_eq!(summary.prefixes_scheduled, 4);
        assert_eq!(summary.sweeps_completed, 4);
        assert_eq!(summary.sweeps_failed, 0);
        assert_eq!(summary.sweeps_stopped_early, 4);
        assert_eq!(summary.records_written, 4);
        assert!(summary.finished_at.is_some());

        // One batch per sweep, rows inside a batch in sequence order
        assert_eq!(sink.batches.len(), 4);
        let mut found: Vec<Vec<String>> = sink
            .batches
            .iter()
            .filter(|b| !b.is_empty())
            .map(|b| b.iter().map(|r| r.registration_number.clone()).collect())
            .collect();
        found.sort();
        assert_eq!(
            found,
            vec![
                vec!["21101102001".to_string(), "21101102002".to_string()],
                vec!["21105103001".to_string(), "21105103004".to_string()],
            ]
        );

        // 21101102: 2 found + 3 absent; 21101103 and 21105102: 3 absent;
        // 21105103: 001 found, 002-003 absent, 004 found, 005-007 absent
        assert_eq!(summary.fetch_attempts, 5 + 3 + 3 + 7);
    }

    #[tokio::test]
    async fn test_sink_failure_does_not_stop_run() {
        let server = MockServer::start().await;
        mount_student(&server, "21101102001").await;
        mount_absent(&server).await;

        let config = test_config(&server, &["101"], (102, 103));
        let coordinator = Coordinator::new(config).unwrap();
        let mut sink = MemorySink {
            fail_appends: true,
            ..MemorySink::default()
        };
        let summary = coordinator.run(&mut sink).await.unwrap();

        assert_eq!(summary.sweeps_completed, 2);
        assert_eq!(summary.records_written, 0);
        assert_eq!(summary.records_lost, 1);
    }

    #[tokio::test]
    async fn test_panicked_sweep_is_counted_as_failed() {
        let server = MockServer::start().await;
        let config = test_config(&server, &["101"], (102, 103));
        let coordinator = Coordinator::new(config).unwrap();

        let mut tasks: JoinSet<SweepOutcome> = JoinSet::new();
        tasks.spawn(async { panic!("sweep task crashed") });
        tasks.spawn(async {
            SweepOutcome {
                prefix: "21101103".parse().unwrap(),
                records: Vec::new(),
                attempts: 3,
                stopped_early: true,
            }
        });

        let mut sink = MemorySink::default();
        let mut summary = SweepSummary::new(Utc::now());
        let start_time = Instant::now();
        while let Some(joined) = tasks.join_next().await {
            coordinator.handle_completion(joined, &mut sink, &mut summary, start_time);
        }

        assert_eq!(summary.sweeps_failed, 1);
        assert_eq!(summary.sweeps_completed, 1);
        assert_eq!(summary.fetch_attempts, 3);
        assert_eq!(summary.records_written, 0);
        assert_eq!(sink.batches.len(), 1);
        assert!(sink.batches[0].is_empty());
    }
}
