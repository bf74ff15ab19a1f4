//! Error types for the cycle calculator and record parsing

use chrono::NaiveDate;
use thiserror::Error;

/// Rejected calculator input.
///
/// The calculator either returns a fully populated plan or one of these.
/// Retrying with the same input fails the same way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInputError {
    /// The last period date is later than the reference date
    #[error("last period date cannot be in the future ({last_period_date} is after {today})")]
    FutureLastPeriod {
        /// Supplied first day of the last period
        last_period_date: NaiveDate,
        /// Reference date the plan was evaluated against
        today: NaiveDate,
    },

    /// A cycle of zero days
    #[error("average cycle length must be a positive number of days")]
    ZeroCycleLength,

    /// A milestone date would overflow the calendar
    #[error("cycle dates fall outside the supported calendar range")]
    DateOutOfRange,
}

/// A string that does not name any variant of an enum-valued record field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct UnknownVariant {
    /// Field being parsed, e.g. "order status"
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
    /// Comma-separated list of accepted values
    pub expected: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: &str, expected: &[&str]) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected: expected.join(", "),
        }
    }
}
