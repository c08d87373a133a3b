use crate::regno::{
    BATCH_YEAR_SPAN, BRANCH_CODE_SPAN, COLLEGE_CODE_SPAN, MAX_SEQUENCE, PREFIX_LEN, REG_NO_LEN,
    SEQUENCE_LEN, SEQUENCE_SPAN,
};
use crate::{RegNoError, RegNoResult};
use std::fmt;
use std::str::FromStr;

/// The batch-year + branch + college part shared by one sweep
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Prefix(String);

/// A full 11-digit registration number
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistrationNumber(String);

fn check_digits(value: &str, expected: usize) -> RegNoResult<()> {
    if value.len() != expected {
        return Err(RegNoError::Length {
            expected,
            value: value.to_string(),
        });
    }
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RegNoError::NonDigit(value.to_string()));
    }
    Ok(())
}

impl Prefix {
    /// Builds a prefix from its three components
    pub fn from_parts(batch_year: &str, branch_code: &str, college_code: &str) -> RegNoResult<Self> {
        format!("{}{}{}", batch_year, branch_code, college_code).parse()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn branch_code(&self) -> &str {
        &self.0[BRANCH_CODE_SPAN]
    }

    pub fn college_code(&self) -> &str {
        &self.0[COLLEGE_CODE_SPAN]
    }

    /// Appends a zero-padded sequence number to this prefix
    ///
    /// # Example
    ///
    /// ```
    /// use results_sweeper::Prefix;
    ///
    /// let prefix: Prefix = "21105102".parse().unwrap();
    /// assert_eq!(prefix.registration(3).unwrap().as_str(), "21105102003");
    /// ```
    pub fn registration(&self, sequence: u32) -> RegNoResult<RegistrationNumber> {
        if sequence > MAX_SEQUENCE {
            return Err(RegNoError::SequenceOverflow(sequence));
        }
        Ok(RegistrationNumber(format!(
            "{}{:0width$}",
            self.0,
            sequence,
            width = SEQUENCE_LEN
        )))
    }
}

impl FromStr for Prefix {
    type Err = RegNoError;

    fn from_str(s: &str) -> RegNoResult<Self> {
        check_digits(s, PREFIX_LEN)?;
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl RegistrationNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn batch_year(&self) -> &str {
        &self.0[BATCH_YEAR_SPAN]
    }

    pub fn branch_code(&self) -> &str {
        &self.0[BRANCH_CODE_SPAN]
    }

    pub fn college_code(&self) -> &str {
        &self.0[COLLEGE_CODE_SPAN]
    }

    /// The sequence number within the prefix
    pub fn sequence(&self) -> u32 {
        // Validated as ASCII digits on construction
        self.0[SEQUENCE_SPAN].parse().unwrap_or_default()
    }

    pub fn prefix(&self) -> Prefix {
        Prefix(self.0[..PREFIX_LEN].to_string())
    }
}

impl FromStr for RegistrationNumber {
    type Err = RegNoError;

    fn from_str(s: &str) -> RegNoResult<Self> {
        check_digits(s, REG_NO_LEN)?;
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for RegistrationNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
