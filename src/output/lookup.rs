//! Point lookups against the ranked file

use crate::output::ranking::RankedRecord;
use crate::Result;
use std::path::Path;

/// Loads every row of a ranked file
pub fn load_ranked(path: &Path) -> Result<Vec<RankedRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

/// All rows whose registration number equals `reg_no` exactly
///
/// Surrounding whitespace in `reg_no` is ignored.
pub fn find_by_registration<'a>(rows: &'a [RankedRecord], reg_no: &str) -> Vec<&'a RankedRecord> {
    let reg_no = reg_no.trim();
    rows.iter()
        .filter(|row| row.registration_number == reg_no)
        .collect()
}

/// Looks a registration number up in the ranked file
///
/// An empty result means the student is not in the file.
pub fn lookup(path: &Path, reg_no: &str) -> Result<Vec<RankedRecord>> {
    let rows = load_ranked(path)?;
    Ok(find_by_registration(&rows, reg_no)
        .into_iter()
        .cloned()
        .collect())
}

/// Formats one ranked row for terminal display
pub fn format_record(row: &RankedRecord) -> String {
    let grade = |v: Option<f64>| v.map(|g| g.to_string()).unwrap_or_else(|| "-".to_string());
    let rank = |v: Option<u32>| v.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string());

    format!(
        "Registration Number: {}\n\
         Name: {}\n\
         Father's Name: {}\n\
         Mother's Name: {}\n\
         College: {} ({})\n\
         Branch: {} ({})\n\
         SGPA: {}\n\
         Cur. CGPA: {}\n\
         University Rank: {}\n\
         Branch Rank: {}",
        row.registration_number,
        row.name,
        row.father_name,
        row.mother_name,
        row.college_name,
        row.college_code,
        row.branch_name,
        row.branch_code,
        grade(row.sgpa),
        grade(row.cur_cgpa),
        rank(row.university_rank),
        rank(row.branch_rank),
    )
}
