use serde::Deserialize;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// Placeholder substituted with the registration number in the URL template
pub const REG_NO_PLACEHOLDER: &str = "{reg_no}";

/// Main configuration structure for Results-Sweeper
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sweep: SweepConfig,
    pub http: HttpConfig,
    pub output: OutputConfig,
}

/// Search-space and pacing configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Two-digit batch year prefixed to every registration number
    #[serde(rename = "batch-year")]
    pub batch_year: String,

    /// Branch code (3 digits) -> display name
    pub branches: BTreeMap<String, String>,

    /// First college code of the range (inclusive)
    #[serde(rename = "college-start")]
    pub college_start: u32,

    /// Last college code of the range (inclusive)
    #[serde(rename = "college-end")]
    pub college_end: u32,

    /// First sequence number tried under each prefix
    #[serde(rename = "sequence-start")]
    pub sequence_start: u32,

    /// Last sequence number tried under each prefix (inclusive)
    #[serde(rename = "sequence-end")]
    pub sequence_end: u32,

    /// Consecutive absences after which a prefix is abandoned
    #[serde(rename = "failure-threshold")]
    pub failure_threshold: u32,

    /// Maximum number of prefixes swept at the same time
    #[serde(rename = "max-concurrent-sweeps")]
    pub max_concurrent_sweeps: u32,

    /// Delay between starting two sweeps (milliseconds)
    #[serde(rename = "stagger-ms")]
    pub stagger_ms: u64,
}

impl SweepConfig {
    pub fn college_range(&self) -> RangeInclusive<u32> {
        self.college_start..=self.college_end
    }

    pub fn sequence_range(&self) -> RangeInclusive<u32> {
        self.sequence_start..=self.sequence_end
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        let branches = [
            ("101", "Civil Engineering (CE)"),
            ("102", "Mechanical Engineering (ME)"),
            ("103", "Electrical Engineering (EE)"),
            ("104", "Electronics & Communication Engineering (ECE)"),
            ("105", "Computer Science Engineering (CSE)"),
            ("106", "Information Technology (IT)"),
            ("107", "Leather Technology (LT)"),
            ("110", "Electrical & Electronics Engineering (EEE)"),
            ("111", "Instrumentation Engineering (IE)"),
        ]
        .into_iter()
        .map(|(code, name)| (code.to_string(), name.to_string()))
        .collect();

        Self {
            batch_year: "21".to_string(),
            branches,
            college_start: 102,
            college_end: 165,
            sequence_start: 1,
            sequence_end: 130,
            failure_threshold: 5,
            max_concurrent_sweeps: 10,
            stagger_ms: 100,
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Result page URL containing the `{reg_no}` placeholder
    #[serde(rename = "url-template")]
    pub url_template: String,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            url_template: "https://results.beup.ac.in/ResultsBTech6thSem2024_B2021Pub.aspx?Sem=VI&RegNo={reg_no}".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// CSV file receiving raw sweep results
    #[serde(rename = "results-path")]
    pub results_path: String,

    /// CSV file written by the rank loader
    #[serde(rename = "ranked-path")]
    pub ranked_path: String,

    /// Markdown file written by the top-N report
    #[serde(rename = "report-path")]
    pub report_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_path: "all_branches_results.csv".to_string(),
            ranked_path: "ranked_students.csv".to_string(),
            report_path: "top_students.md".to_string(),
        }
    }
}
