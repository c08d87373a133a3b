//! Registration-number handling for Results-Sweeper
//!
//! A registration number is an opaque 11-digit key whose fields are recovered
//! purely by position:
//!
//! | Offset  | Field        |
//! |---------|--------------|
//! | `0..2`  | batch year   |
//! | `2..5`  | branch code  |
//! | `5..8`  | college code |
//! | `8..11` | sequence     |
//!
//! Every accessor in this module slices through the same offset constants.

mod number;
mod prefix;

pub use number::{Prefix, RegistrationNumber};
pub use prefix::generate_prefixes;

use std::ops::Range;

/// Length of the batch-year field
pub const BATCH_YEAR_LEN: usize = 2;

/// Length of the branch-code field
pub const BRANCH_CODE_LEN: usize = 3;

/// Length of the college-code field
pub const COLLEGE_CODE_LEN: usize = 3;

/// Length of the zero-padded sequence field
pub const SEQUENCE_LEN: usize = 3;

/// Length of a sweep prefix (batch year + branch + college)
pub const PREFIX_LEN: usize = BATCH_YEAR_LEN + BRANCH_CODE_LEN + COLLEGE_CODE_LEN;

/// Length of a full registration number
pub const REG_NO_LEN: usize = PREFIX_LEN + SEQUENCE_LEN;

pub const BATCH_YEAR_SPAN: Range<usize> = 0..BATCH_YEAR_LEN;
pub const BRANCH_CODE_SPAN: Range<usize> = BATCH_YEAR_LEN..BATCH_YEAR_LEN + BRANCH_CODE_LEN;
pub const COLLEGE_CODE_SPAN: Range<usize> = BRANCH_CODE_SPAN.end..PREFIX_LEN;
pub const SEQUENCE_SPAN: Range<usize> = PREFIX_LEN..REG_NO_LEN;

/// Largest sequence number representable in the sequence field
pub const MAX_SEQUENCE: u32 = 999;
