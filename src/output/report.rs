//! Top-N report generation
//!
//! Renders the best students by current CGPA as a markdown document with a
//! table and a horizontal text bar per student.

use crate::output::ranking::RankedRecord;
use crate::output::traits::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Width of a bar for the maximum CGPA
const BAR_WIDTH: usize = 40;

/// Upper bound of the CGPA scale
const CGPA_SCALE: f64 = 10.0;

/// The `n` rows with the highest CGPA, best first
///
/// Rows without a CGPA are skipped; ties keep their file order.
pub fn top_n(rows: &[RankedRecord], n: usize) -> Vec<&RankedRecord> {
    let mut ranked: Vec<&RankedRecord> = rows.iter().filter(|r| r.cur_cgpa.is_some()).collect();
    ranked.sort_by(|a, b| {
        let (a, b) = (a.cur_cgpa.unwrap_or_default(), b.cur_cgpa.unwrap_or_default());
        b.total_cmp(&a)
    });
    ranked.truncate(n);
    ranked
}

/// Formats the top-N rows as markdown
pub fn render_top_report(top: &[&RankedRecord]) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Top {} Students by CGPA\n\n", top.len()));

    if top.is_empty() {
        md.push_str("No ranked students found.\n");
        return md;
    }

    md.push_str("| # | Name | Registration Number | Branch | CGPA |\n");
    md.push_str("|---|------|---------------------|--------|------|\n");
    for (i, row) in top.iter().enumerate() {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {:.2} |\n",
            i + 1,
            row.name,
            row.registration_number,
            row.branch_name,
            row.cur_cgpa.unwrap_or_default()
        ));
    }

    md.push_str("\n## CGPA\n\n```text\n");
    let name_width = top.iter().map(|r| r.name.chars().count()).max().unwrap_or(0);
    for row in top {
        let cgpa = row.cur_cgpa.unwrap_or_default();
        md.push_str(&format!(
            "{:<width$} | {} {:.2}\n",
            row.name,
            bar(cgpa),
            cgpa,
            width = name_width
        ));
    }
    md.push_str("```\n");

    md
}

fn bar(cgpa: f64) -> String {
    let ratio = (cgpa / CGPA_SCALE).clamp(0.0, 1.0);
    "█".repeat((ratio * BAR_WIDTH as f64).round() as usize)
}

/// Writes the top-N report to `output_path`
pub fn write_top_report(rows: &[RankedRecord], n: usize, output_path: &Path) -> OutputResult<()> {
    let markdown = render_top_report(&top_n(rows, n));

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}
