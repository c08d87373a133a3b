use crate::regno::{Prefix, COLLEGE_CODE_LEN};
use crate::RegNoResult;
use std::ops::RangeInclusive;

/// Generates every batch × branch × college prefix
///
/// Branches are visited in the order given, and within each branch the
/// college codes ascend through `colleges`, zero-padded to three digits.
/// The result holds exactly `branches.len() * colleges.count()` entries.
///
/// # Example
///
/// ```
/// use results_sweeper::generate_prefixes;
///
/// let prefixes = generate_prefixes("21", ["101", "105"], 102..=103).unwrap();
/// let raw: Vec<&str> = prefixes.iter().map(|p| p.as_str()).collect();
/// assert_eq!(raw, ["21101102", "21101103", "21105102", "21105103"]);
/// ```
pub fn generate_prefixes<I, S>(
    batch_year: &str,
    branches: I,
    colleges: RangeInclusive<u32>,
) -> RegNoResult<Vec<Prefix>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut prefixes = Vec::new();
    for branch in branches {
        for college in colleges.clone() {
            let college_code = format!("{:0width$}", college, width = COLLEGE_CODE_LEN);
            prefixes.push(Prefix::from_parts(
                batch_year,
                branch.as_ref(),
                &college_code,
            )?);
        }
    }
    Ok(prefixes)
}
