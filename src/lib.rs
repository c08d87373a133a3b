//! Results-Sweeper: a registration-number sweep over a university results portal
//!
//! This crate walks the combinatorial space of registration numbers
//! (batch year × branch × college × sequence), scrapes each result page,
//! and appends the parsed student records to a CSV file. Companion tools
//! rank the collected records, look students up, and render a top-N report.

pub mod config;
pub mod output;
pub mod record;
pub mod regno;
pub mod sweep;

use thiserror::Error;

/// Main error type for Results-Sweeper operations
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Registration number error: {0}")]
    RegNo(#[from] RegNoError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing column '{0}' in input file")]
    MissingColumn(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL template: {0}")]
    InvalidUrl(String),
}

/// Registration-number errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegNoError {
    #[error("Expected {expected} digits, got '{value}'")]
    Length { expected: usize, value: String },

    #[error("Non-digit character in '{0}'")]
    NonDigit(String),

    #[error("Sequence number {0} does not fit in 3 digits")]
    SequenceOverflow(u32),
}

/// Result type alias for Results-Sweeper operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for registration-number operations
pub type RegNoResult<T> = std::result::Result<T, RegNoError>;

// Re-export commonly used types
pub use config::Config;
pub use record::StudentRecord;
pub use regno::{generate_prefixes, Prefix, RegistrationNumber};
pub use sweep::{run_sweep, FetchOutcome, SweepOutcome};
