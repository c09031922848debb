//! Billing period handling
//!
//! Consumption is billed per calendar month. A [`BillingPeriod`] is a
//! validated (month, year) pair; values outside the accepted range never
//! reach storage.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Earliest year for which readings are accepted
pub const MIN_BILLING_YEAR: i32 = 2000;

/// Errors related to billing periods
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Month must be between 1 and 12, got {0}")]
    MonthOutOfRange(i32),

    #[error("Year must be greater than or equal to 2000, got {0}")]
    YearOutOfRange(i32),
}

/// A calendar month for which consumption is billed
///
/// Ordering is chronological (year first, then month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct BillingPeriod {
    year: i32,
    month: i32,
}

impl BillingPeriod {
    /// Creates a billing period
    ///
    /// The month is checked before the year, so a reading with both fields
    /// out of range reports the month.
    ///
    /// # Errors
    ///
    /// Returns `TemporalError::MonthOutOfRange` for months outside 1..=12 and
    /// `TemporalError::YearOutOfRange` for years before [`MIN_BILLING_YEAR`].
    pub fn new(month: i32, year: i32) -> Result<Self, TemporalError> {
        if !(1..=12).contains(&month) {
            return Err(TemporalError::MonthOutOfRange(month));
        }
        if year < MIN_BILLING_YEAR {
            return Err(TemporalError::YearOutOfRange(year));
        }
        Ok(Self { year, month })
    }

    pub fn month(&self) -> i32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}
