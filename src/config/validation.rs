use crate::config::types::{Config, HttpConfig, OutputConfig, SweepConfig, REG_NO_PLACEHOLDER};
use crate::regno::{BATCH_YEAR_LEN, BRANCH_CODE_LEN};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_sweep_config(&config.sweep)?;
    validate_http_config(&config.http)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the search space and pacing settings
fn validate_sweep_config(config: &SweepConfig) -> Result<(), ConfigError> {
    validate_digits("batch_year", &config.batch_year, BATCH_YEAR_LEN)?;

    if config.branches.is_empty() {
        return Err(ConfigError::Validation(
            "at least one branch code is required".to_string(),
        ));
    }

    for code in config.branches.keys() {
        validate_digits("branch code", code, BRANCH_CODE_LEN)?;
    }

    if config.college_end > 999 || config.college_start > config.college_end {
        return Err(ConfigError::Validation(format!(
            "college range must satisfy start <= end <= 999, got {}..={}",
            config.college_start, config.college_end
        )));
    }

    if config.sequence_start < 1
        || config.sequence_end > 999
        || config.sequence_start > config.sequence_end
    {
        return Err(ConfigError::Validation(format!(
            "sequence range must satisfy 1 <= start <= end <= 999, got {}..={}",
            config.sequence_start, config.sequence_end
        )));
    }

    if config.failure_threshold < 1 {
        return Err(ConfigError::Validation(format!(
            "failure_threshold must be >= 1, got {}",
            config.failure_threshold
        )));
    }

    if config.max_concurrent_sweeps < 1 || config.max_concurrent_sweeps > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_sweeps must be between 1 and 100, got {}",
            config.max_concurrent_sweeps
        )));
    }

    Ok(())
}

/// Validates HTTP settings, including a trial render of the URL template
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if !config.url_template.contains(REG_NO_PLACEHOLDER) {
        return Err(ConfigError::InvalidUrl(format!(
            "'{}' does not contain {}",
            config.url_template, REG_NO_PLACEHOLDER
        )));
    }

    let rendered = config
        .url_template
        .replace(REG_NO_PLACEHOLDER, "00000000000");
    let url = Url::parse(&rendered)
        .map_err(|e| ConfigError::InvalidUrl(format!("'{}': {}", config.url_template, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "'{}' must use http or https",
            config.url_template
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    for (name, value) in [
        ("results_path", &config.results_path),
        ("ranked_path", &config.ranked_path),
        ("report_path", &config.report_path),
    ] {
        if value.is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
        }
    }

    Ok(())
}

fn validate_digits(name: &str, value: &str, len: usize) -> Result<(), ConfigError> {
    if value.len() != len || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConfigError::Validation(format!(
            "{} must be exactly {} digits, got '{}'",
            name, len, value
        )));
    }
    Ok(())
}
