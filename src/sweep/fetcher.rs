//! HTTP fetcher for single registration numbers
//!
//! This module turns one registration number into either a [`StudentRecord`]
//! or an explicit [`FetchOutcome::Absent`]. Nothing in here returns an
//! error: transport failures, non-success statuses, non-result pages and
//! parser panics are all expected outcomes for the vast majority of the
//! search space and are reported as absences.

use crate::config::{HttpConfig, REG_NO_PLACEHOLDER};
use crate::record::{StudentRecord, NOT_FOUND};
use crate::regno::RegistrationNumber;
use crate::sweep::parser::{parse_result_page, PageSelectors, ResultPage, ResultPageSchema};
use crate::{ConfigError, SweepError};
use reqwest::Client;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

/// Why a registration number yielded no record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbsentReason {
    /// Server answered with a non-success status
    Status(u16),

    /// Request exceeded the configured timeout
    Timeout,

    /// Could not connect to the server
    Connect,

    /// Any other transport failure
    Transport(String),

    /// The response body could not be read
    Body(String),

    /// The page has no student-name label
    NotResultPage,

    /// Parsing the page panicked
    Panicked(String),
}

/// Result of fetching one registration number
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A valid result page was parsed
    Found(StudentRecord),

    /// No student at this registration number
    Absent(AbsentReason),
}

/// Shared network context handed to every sweep
///
/// Wraps one [`Client`] (connection pool and cookie store) together with the
/// result-page URL template and the compiled parsing contract. Share it with
/// an `Arc`; all methods take `&self`.
#[derive(Debug, Clone)]
pub struct FetchContext {
    client: Client,
    url_template: String,
    selectors: PageSelectors,
}

impl FetchContext {
    /// Builds a context with a fresh client for the given HTTP settings
    pub fn new(config: &HttpConfig, schema: &ResultPageSchema) -> Result<Self, SweepError> {
        let client = build_http_client(config)?;
        Self::with_client(client, &config.url_template, schema)
    }

    /// Builds a context around an existing client
    pub fn with_client(
        client: Client,
        url_template: &str,
        schema: &ResultPageSchema,
    ) -> Result<Self, SweepError> {
        if !url_template.contains(REG_NO_PLACEHOLDER) {
            return Err(ConfigError::InvalidUrl(format!(
                "'{}' does not contain {}",
                url_template, REG_NO_PLACEHOLDER
            ))
            .into());
        }

        let selectors = PageSelectors::compile(schema).map_err(ConfigError::Validation)?;

        Ok(Self {
            client,
            url_template: url_template.to_string(),
            selectors,
        })
    }

    /// Renders the result-page URL for a registration number
    pub fn result_url(&self, reg_no: &RegistrationNumber) -> String {
        self.url_template
            .replace(REG_NO_PLACEHOLDER, reg_no.as_str())
    }
}

/// Builds the HTTP client shared by all sweeps
///
/// The client presents itself as a desktop browser, keeps cookies across
/// requests, and bounds every request by `timeout_secs`.
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .cookie_store(true)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches and parses the result page of one registration number
///
/// # Request Flow
///
/// | Step | Failure → outcome |
/// |------|-------------------|
/// | GET templated URL | timeout / connect / other → `Absent` |
/// | Check status | non-2xx → `Absent(Status)` |
/// | Read body | → `Absent(Body)` |
/// | Locate name label | missing → `Absent(NotResultPage)` |
/// | Read optional fields | missing → `"Not Found"` |
///
/// College and branch codes are always sliced from `reg_no`, even though the
/// page carries college and branch names of its own.
pub async fn fetch_registration(ctx: &FetchContext, reg_no: &RegistrationNumber) -> FetchOutcome {
    let url = ctx.result_url(reg_no);

    let response = match ctx.client.get(&url).send().await {
        Ok(response) => response,
        Err(e) => return FetchOutcome::Absent(classify_transport_error(&e)),
    };

    let status = response.status();
    if !status.is_success() {
        return FetchOutcome::Absent(AbsentReason::Status(status.as_u16()));
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => return FetchOutcome::Absent(AbsentReason::Body(e.to_string())),
    };

    guarded_parse(reg_no, || parse_result_page(&body, &ctx.selectors))
}

/// Runs `parse` and turns its result into an outcome
///
/// A panic inside `parse` is caught and reported as
/// `Absent(Panicked)` so one malformed page cannot abort its sweep.
fn guarded_parse<F>(reg_no: &RegistrationNumber, parse: F) -> FetchOutcome
where
    F: FnOnce() -> Option<ResultPage>,
{
    match panic::catch_unwind(AssertUnwindSafe(parse)) {
        Ok(Some(page)) => FetchOutcome::Found(build_record(reg_no, page)),
        Ok(None) => FetchOutcome::Absent(AbsentReason::NotResultPage),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::warn!("Error processing {}: {}", reg_no, message);
            FetchOutcome::Absent(AbsentReason::Panicked(message))
        }
    }
}

/// Assembles a record, filling missing fields with the sentinel
fn build_record(reg_no: &RegistrationNumber, page: ResultPage) -> StudentRecord {
    let or_sentinel = |value: Option<String>| value.unwrap_or_else(|| NOT_FOUND.to_string());

    StudentRecord {
        registration_number: reg_no.to_string(),
        name: page.name,
        father_name: or_sentinel(page.father_name),
        mother_name: or_sentinel(page.mother_name),
        college_name: or_sentinel(page.college_name),
        college_code: reg_no.college_code().to_string(),
        branch_name: or_sentinel(page.branch_name),
        branch_code: reg_no.branch_code().to_string(),
        sgpa: or_sentinel(page.sgpa),
        cur_cgpa: or_sentinel(page.cur_cgpa),
    }
}

fn classify_transport_error(e: &reqwest::Error) -> AbsentReason {
    if e.is_timeout() {
        AbsentReason::Timeout
    } else if e.is_connect() {
        AbsentReason::Connect
    } else {
        AbsentReason::Transport(e.to_string())
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
