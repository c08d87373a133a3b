//! Results-Sweeper main entry point
//!
//! This is the command-line interface for the registration-number sweep and
//! the tools that rank, query, and report on its output.

use clap::Parser;
use results_sweeper::config::{load_config_with_hash, Config};
use results_sweeper::output::{
    format_record, load_ranked, lookup, print_summary, rank_results, write_top_report,
};
use results_sweeper::sweep::{run_sweep, Coordinator};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Results-Sweeper: collects published results by registration number
///
/// Without a mode flag, sweeps every batch × branch × college prefix and
/// writes the parsed records to the results file, replacing any previous
/// contents.
#[derive(Parser, Debug)]
#[command(name = "results-sweeper")]
#[command(version = "1.0.0")]
#[command(about = "Sweeps a results portal by registration number", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the resolved configuration and search space without sending requests
    #[arg(long, conflicts_with_all = ["rank", "lookup", "report"])]
    dry_run: bool,

    /// Rank the results file and write the ranked file
    #[arg(long, conflicts_with_all = ["dry_run", "lookup", "report"])]
    rank: bool,

    /// Look a registration number up in the ranked file
    #[arg(long, value_name = "REG_NO", conflicts_with_all = ["dry_run", "rank", "report"])]
    lookup: Option<String>,

    /// Write a top-N report from the ranked file
    #[arg(long, value_name = "N", num_args = 0..=1, default_missing_value = "10",
          conflicts_with_all = ["dry_run", "rank", "lookup"])]
    report: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            Config::default()
        }
    };

    if cli.dry_run {
        handle_dry_run(config)?;
    } else if cli.rank {
        handle_rank(&config)?;
    } else if let Some(reg_no) = &cli.lookup {
        handle_lookup(&config, reg_no)?;
    } else if let Some(n) = cli.report {
        handle_report(&config, n)?;
    } else {
        handle_sweep(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("results_sweeper=info,warn"),
            1 => EnvFilter::new("results_sweeper=debug,info"),
            2 => EnvFilter::new("results_sweeper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles --dry-run: shows what would be swept
fn handle_dry_run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Results-Sweeper Dry Run ===\n");

    let sweep = &config.sweep;
    println!("Search Space:");
    println!("  Batch year: {}", sweep.batch_year);
    println!("  Colleges: {:03}..={:03}", sweep.college_start, sweep.college_end);
    println!("  Sequences: {}..={}", sweep.sequence_start, sweep.sequence_end);
    println!("\nBranches ({}):", sweep.branches.len());
    for (code, name) in &sweep.branches {
        println!("  - {} {}", code, name);
    }

    println!("\nPacing:");
    println!("  Failure threshold: {}", sweep.failure_threshold);
    println!("  Max concurrent sweeps: {}", sweep.max_concurrent_sweeps);
    println!("  Stagger: {}ms", sweep.stagger_ms);

    println!("\nHTTP:");
    println!("  URL template: {}", config.http.url_template);
    println!("  Timeout: {}s", config.http.timeout_secs);

    println!("\nOutput:");
    println!("  Results: {}", config.output.results_path);
    println!("  Ranked: {}", config.output.ranked_path);
    println!("  Report: {}", config.output.report_path);

    let max_requests =
        u64::from(sweep.sequence_end - sweep.sequence_start + 1);
    let coordinator = Coordinator::new(config)?;
    let prefixes = coordinator.prefixes()?;

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would sweep {} prefixes (at most {} requests)",
        prefixes.len(),
        prefixes.len() as u64 * max_requests
    );

    Ok(())
}

/// Handles the main sweep operation
async fn handle_sweep(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Sweeping batch {} across {} branches",
        config.sweep.batch_year,
        config.sweep.branches.len()
    );

    let results_path = config.output.results_path.clone();
    match run_sweep(config).await {
        Ok(summary) => {
            print_summary(&summary);
            println!("Results saved in {}", results_path);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Sweep failed: {}", e);
            Err(e.into())
        }
    }
}

/// Handles --rank: writes the ranked file from the results file
fn handle_rank(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let stats = rank_results(
        Path::new(&config.output.results_path),
        Path::new(&config.output.ranked_path),
    )?;

    println!("✓ Ranked {} students", stats.rows_written);
    println!("  Rows read: {}", stats.rows_read);
    println!("  Dropped (missing grades): {}", stats.rows_missing_grades);
    println!("  Duplicates removed: {}", stats.duplicates_removed);
    println!("  Without CGPA (unranked): {}", stats.rows_unranked);
    println!("✓ Saved to: {}", config.output.ranked_path);

    Ok(())
}

/// Handles --lookup: prints matching rows from the ranked file
fn handle_lookup(config: &Config, reg_no: &str) -> Result<(), Box<dyn std::error::Error>> {
    let rows = lookup(Path::new(&config.output.ranked_path), reg_no)?;

    if rows.is_empty() {
        println!("No student found!");
        return Ok(());
    }

    for row in &rows {
        println!("{}\n", format_record(row));
    }

    Ok(())
}

/// Handles --report: writes the top-N markdown report
fn handle_report(config: &Config, n: usize) -> Result<(), Box<dyn std::error::Error>> {
    let rows = load_ranked(Path::new(&config.output.ranked_path))?;
    write_top_report(&rows, n, Path::new(&config.output.report_path))?;

    println!("✓ Top {} report exported to: {}", n, config.output.report_path);

    Ok(())
}
