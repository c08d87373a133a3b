//! Configuration module for Results-Sweeper
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; omitted keys fall back to the portal's known layout.
//!
//! # Example
//!
//! ```no_run
//! use results_sweeper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sweep.toml")).unwrap();
//! println!("Failure threshold: {}", config.sweep.failure_threshold);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, HttpConfig, OutputConfig, SweepConfig, REG_NO_PLACEHOLDER};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
