//! Billing domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::{PortError, TemporalError};
use crate::invoice::InvoiceKey;

/// Errors that can occur in the billing domain
///
/// The display text of the validation and not-found variants is the reason
/// reported to callers.
#[derive(Debug, Error)]
pub enum BillingError {
    /// Month outside 1..=12
    #[error("Month must be between 1 and 12.")]
    InvalidMonth(i32),

    /// Year before 2000
    #[error("Year must be greater than or equal to 2000.")]
    InvalidYear(i32),

    /// Consumed volume zero or negative
    #[error("Consumed volume must be greater than 0.")]
    InvalidVolume(Decimal),

    /// Consumed volume above the billable maximum
    #[error("Consumed volume must be less than or equal to 1000000000.")]
    VolumeTooLarge(Decimal),

    /// An invoice already exists for the same taxpayer and month
    #[error("A consumption record already exists for this identifier, month and year.")]
    DuplicateReading(InvoiceKey),

    /// No invoice stored under the key
    #[error("No consumption record found for the given parameters.")]
    InvoiceNotFound(InvoiceKey),

    /// The ledger holds no invoices at all
    #[error("No consumption records found.")]
    EmptyLedger,

    /// The backing store failed
    #[error("Storage failure: {0}")]
    Storage(#[from] PortError),
}

impl BillingError {
    /// True for rejections of the reading itself (nothing was persisted)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            BillingError::InvalidMonth(_)
                | BillingError::InvalidYear(_)
                | BillingError::InvalidVolume(_)
                | BillingError::VolumeTooLarge(_)
                | BillingError::DuplicateReading(_)
        )
    }

    /// True when a key or the whole ledger did not resolve
    pub fn is_not_found(&self) -> bool {
        matches!(self, BillingError::InvoiceNotFound(_) | BillingError::EmptyLedger)
    }
}

impl From<TemporalError> for BillingError {
    fn from(error: TemporalError) -> Self {
        match error {
            TemporalError::MonthOutOfRange(month) => BillingError::InvalidMonth(month),
            TemporalError::YearOutOfRange(year) => BillingError::InvalidYear(year),
        }
    }
}
