//! Student records and the results-file schema

use serde::{Deserialize, Serialize};

/// Sentinel stored in any field the result page did not provide
pub const NOT_FOUND: &str = "Not Found";

/// Header row of the raw results file, in column order
pub const RESULT_HEADERS: [&str; 10] = [
    "Registration Number",
    "Name",
    "Father's Name",
    "Mother's Name",
    "College Name",
    "College Code",
    "Branch Name",
    "Branch Code",
    "SGPA",
    "Cur. CGPA",
];

/// One parsed result page
///
/// Field order and serde names mirror [`RESULT_HEADERS`], so a record
/// serializes to exactly one results-file row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    #[serde(rename = "Registration Number")]
    pub registration_number: String,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Father's Name")]
    pub father_name: String,

    #[serde(rename = "Mother's Name")]
    pub mother_name: String,

    #[serde(rename = "College Name")]
    pub college_name: String,

    /// Sliced from the registration number, never read from the page
    #[serde(rename = "College Code")]
    pub college_code: String,

    #[serde(rename = "Branch Name")]
    pub branch_name: String,

    /// Sliced from the registration number, never read from the page
    #[serde(rename = "Branch Code")]
    pub branch_code: String,

    #[serde(rename = "SGPA")]
    pub sgpa: String,

    #[serde(rename = "Cur. CGPA")]
    pub cur_cgpa: String,
}
