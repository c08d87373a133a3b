//! Rank loader: turns the raw results file into a ranked file
//!
//! Processing order:
//! 1. Normalize header names (trim, lowercase, spaces → `_`)
//! 2. Drop rows whose SGPA or CGPA cell is empty
//! 3. Coerce SGPA and CGPA to numbers; unparseable values become null
//! 4. Drop exact duplicate rows, keeping the first
//! 5. Rank by CGPA, descending, with min-rank ties, across the whole
//!    population and within each branch name
//!
//! Rows with a null CGPA stay in the output but carry no rank.

use crate::record::RESULT_HEADERS;
use crate::{Result, SweepError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// One row of the ranked file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRecord {
    pub registration_number: String,
    pub name: String,
    #[serde(rename = "father's_name")]
    pub father_name: String,
    #[serde(rename = "mother's_name")]
    pub mother_name: String,
    pub college_name: String,
    pub college_code: String,
    pub branch_name: String,
    pub branch_code: String,
    pub sgpa: Option<f64>,
    #[serde(rename = "cur._cgpa")]
    pub cur_cgpa: Option<f64>,
    pub university_rank: Option<u32>,
    pub branch_rank: Option<u32>,
}

/// Counters reported by [`rank_results`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankStats {
    pub rows_read: usize,
    pub rows_missing_grades: usize,
    pub duplicates_removed: usize,
    pub rows_unranked: usize,
    pub rows_written: usize,
}

/// Normalizes a header name the way the ranked file spells it
///
/// ```
/// use results_sweeper::output::normalize_column;
///
/// assert_eq!(normalize_column(" Cur. CGPA "), "cur._cgpa");
/// assert_eq!(normalize_column("Father's Name"), "father's_name");
/// ```
pub fn normalize_column(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Converts a grade cell to a number; anything unparseable is null
pub fn coerce_grade(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Min-rank, descending: equal values share a rank, and a value's rank is
/// one more than the number of strictly greater values. Nulls stay unranked.
pub fn min_rank_desc(values: &[Option<f64>]) -> Vec<Option<u32>> {
    let mut sorted: Vec<f64> = values.iter().flatten().copied().collect();
    sorted.sort_by(|a, b| b.total_cmp(a));

    values
        .iter()
        .map(|value| {
            value.map(|v| {
                let better = sorted.partition_point(|&w| w > v);
                (better + 1) as u32
            })
        })
        .collect()
}

/// Reads the raw results file, ranks it, and writes the ranked file
pub fn rank_results(input: &Path, output: &Path) -> Result<RankStats> {
    let mut reader = csv::Reader::from_path(input)?;
    let (rows, mut stats) = read_raw_rows(&mut reader)?;

    let ranked = rank_rows(rows, &mut stats);

    let mut writer = csv::Writer::from_path(output)?;
    for row in &ranked {
        writer.serialize(row)?;
    }
    writer.flush()?;
    stats.rows_written = ranked.len();

    tracing::info!(
        "Ranked {} rows ({} missing grades, {} duplicates, {} unranked) into {}",
        stats.rows_written,
        stats.rows_missing_grades,
        stats.duplicates_removed,
        stats.rows_unranked,
        output.display()
    );

    Ok(stats)
}

/// Reads raw rows by normalized header name, so column order does not matter
fn read_raw_rows<R: std::io::Read>(
    reader: &mut csv::Reader<R>,
) -> Result<(Vec<RankedRecord>, RankStats)> {
    let headers: Vec<String> = reader.headers()?.iter().map(normalize_column).collect();

    let mut positions = Vec::with_capacity(RESULT_HEADERS.len());
    for column in RESULT_HEADERS.iter().map(|h| normalize_column(h)) {
        let index = headers
            .iter()
            .position(|h| *h == column)
            .ok_or_else(|| SweepError::MissingColumn(column.clone()))?;
        positions.push(index);
    }

    let mut stats = RankStats::default();
    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result?;
        stats.rows_read += 1;

        let cell = |i: usize| record.get(positions[i]).unwrap_or("").to_string();
        let (sgpa, cgpa) = (cell(8), cell(9));

        if sgpa.trim().is_empty() || cgpa.trim().is_empty() {
            stats.rows_missing_grades += 1;
            continue;
        }

        rows.push(RankedRecord {
            registration_number: cell(0),
            name: cell(1),
            father_name: cell(2),
            mother_name: cell(3),
            college_name: cell(4),
            college_code: cell(5),
            branch_name: cell(6),
            branch_code: cell(7),
            sgpa: coerce_grade(&sgpa),
            cur_cgpa: coerce_grade(&cgpa),
            university_rank: None,
            branch_rank: None,
        });
    }

    Ok((rows, stats))
}

/// Deduplicates and ranks rows in place of a data frame
fn rank_rows(rows: Vec<RankedRecord>, stats: &mut RankStats) -> Vec<RankedRecord> {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(rows.len());
    for row in rows {
        if seen.insert(dedup_key(&row)) {
            unique.push(row);
        } else {
            stats.duplicates_removed += 1;
        }
    }

    let cgpas: Vec<Option<f64>> = unique.iter().map(|r| r.cur_cgpa).collect();
    for (row, rank) in unique.iter_mut().zip(min_rank_desc(&cgpas)) {
        row.university_rank = rank;
    }

    let mut by_branch: HashMap<String, Vec<usize>> = HashMap::new();
    for (i, row) in unique.iter().enumerate() {
        by_branch.entry(row.branch_name.clone()).or_default().push(i);
    }
    for indices in by_branch.values() {
        let cgpas: Vec<Option<f64>> = indices.iter().map(|&i| unique[i].cur_cgpa).collect();
        for (&i, rank) in indices.iter().zip(min_rank_desc(&cgpas)) {
            unique[i].branch_rank = rank;
        }
    }

    stats.rows_unranked = unique.iter().filter(|r| r.cur_cgpa.is_none()).count();
    unique
}

fn dedup_key(row: &RankedRecord) -> Vec<String> {
    let grade = |v: Option<f64>| v.map(|g| g.to_bits().to_string()).unwrap_or_default();
    vec![
        row.registration_number.clone(),
        row.name.clone(),
        row.father_name.clone(),
        row.mother_name.clone(),
        row.college_name.clone(),
        row.college_code.clone(),
        row.branch_name.clone(),
        row.branch_code.clone(),
        grade(row.sgpa),
        grade(row.cur_cgpa),
    ]
}
