//! Consumption ledger
//!
//! The ledger owns the collection of stored invoices. It validates readings,
//! bills them through the calculator and persists them via an
//! [`InvoiceStore`]; it is the only component that mutates the collection.
//!
//! # Invariants
//!
//! - At most one invoice per (identifier, month, year)
//! - Stored invoices are never modified, only deleted by key
//! - A rejected reading leaves the ledger unchanged

use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use core_kernel::{BillingPeriod, HealthCheckResult, HealthCheckable, Money, PortError, RoundingConvention};
use crate::calculator;
use crate::error::BillingError;
use crate::invoice::{Invoice, InvoiceKey};
use crate::ports::InvoiceStore;
use crate::reading::Reading;
use crate::tariff::MAXIMUM_VOLUME_CONSUMED;

/// Service over the stored invoices
///
/// Cheap to clone; clones share the same store.
#[derive(Clone)]
pub struct ConsumptionLedger {
    store: Arc<dyn InvoiceStore>,
    rounding: RoundingConvention,
}

impl std::fmt::Debug for ConsumptionLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsumptionLedger")
            .field("rounding", &self.rounding)
            .finish_non_exhaustive()
    }
}

impl ConsumptionLedger {
    /// Creates a ledger over the given store, reporting totals half-to-even
    pub fn new(store: Arc<dyn InvoiceStore>) -> Self {
        Self {
            store,
            rounding: RoundingConvention::default(),
        }
    }

    /// Sets the convention used to round the reported general total
    pub fn with_rounding(mut self, rounding: RoundingConvention) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn rounding(&self) -> RoundingConvention {
        self.rounding
    }

    /// Validates, bills and stores a reading
    ///
    /// Checks run in this order and the first failure is reported:
    /// 1. month within 1..=12
    /// 2. year not before 2000
    /// 3. consumed volume greater than zero
    /// 4. consumed volume at most [`MAXIMUM_VOLUME_CONSUMED`]
    /// 5. no invoice stored for the same (identifier, month, year)
    ///
    /// # Errors
    ///
    /// - `InvalidMonth`, `InvalidYear`, `InvalidVolume`, `VolumeTooLarge`,
    ///   `DuplicateReading` for rejected readings
    /// - `Storage` when the store fails
    #[instrument(
        skip(self, reading),
        fields(identifier = %reading.identifier, month = reading.month, year = reading.year)
    )]
    pub async fn create(&self, reading: Reading) -> Result<Invoice, BillingError> {
        let key = match self.validate(&reading).await {
            Ok(key) => key,
            Err(error) => {
                warn!(reason = %error, "Reading rejected");
                return Err(error);
            }
        };

        let invoice = calculator::compute_invoice(reading);

        // The store re-checks the key atomically; losing a race with a
        // concurrent create surfaces here as a conflict.
        let stored = self.store.insert_new(invoice).await.map_err(|error| match error {
            PortError::Conflict { .. } => {
                warn!(key = %key, "Concurrent create for the same key");
                BillingError::DuplicateReading(key)
            }
            other => BillingError::Storage(other),
        })?;

        info!(
            invoice_id = %stored.id(),
            tariff_tier = ?stored.tariff_tier(),
            total = %stored.total().amount(),
            "Consumption invoice created"
        );
        Ok(stored)
    }

    async fn validate(&self, reading: &Reading) -> Result<InvoiceKey, BillingError> {
        BillingPeriod::new(reading.month, reading.year)?;

        if reading.volume_consumed <= Decimal::ZERO {
            return Err(BillingError::InvalidVolume(reading.volume_consumed));
        }
        if reading.volume_consumed > MAXIMUM_VOLUME_CONSUMED {
            return Err(BillingError::VolumeTooLarge(reading.volume_consumed));
        }

        let key = InvoiceKey::from(reading);
        if self.store.find(&key).await?.is_some() {
            return Err(BillingError::DuplicateReading(key));
        }

        Ok(key)
    }

    /// Returns every stored invoice
    ///
    /// # Errors
    ///
    /// `EmptyLedger` when nothing is stored.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Invoice>, BillingError> {
        let invoices = self.store.list().await?;
        if invoices.is_empty() {
            debug!("Ledger is empty");
            return Err(BillingError::EmptyLedger);
        }
        debug!(count = invoices.len(), "Listed invoices");
        Ok(invoices)
    }

    /// Looks up the invoice for a taxpayer and month
    ///
    /// # Errors
    ///
    /// `InvoiceNotFound` when no invoice matches the key exactly.
    #[instrument(skip(self, key), fields(key = %key))]
    pub async fn find_by_key(&self, key: &InvoiceKey) -> Result<Invoice, BillingError> {
        self.store
            .find(key)
            .await?
            .ok_or_else(|| BillingError::InvoiceNotFound(key.clone()))
    }

    /// Deletes the invoice for a taxpayer and month
    ///
    /// # Errors
    ///
    /// `InvoiceNotFound` when no invoice matches; the ledger is unchanged.
    #[instrument(skip(self, key), fields(key = %key))]
    pub async fn delete_by_key(&self, key: &InvoiceKey) -> Result<(), BillingError> {
        if !self.store.remove(key).await? {
            debug!("Nothing to delete");
            return Err(BillingError::InvoiceNotFound(key.clone()));
        }
        info!("Consumption invoice removed");
        Ok(())
    }

    /// Sum of every invoice total, rounded to cents
    ///
    /// Totals are summed at full precision and rounded once, using the
    /// ledger's [`RoundingConvention`].
    ///
    /// # Errors
    ///
    /// `EmptyLedger` when nothing is stored.
    #[instrument(skip(self))]
    pub async fn total_general(&self) -> Result<Money, BillingError> {
        let sum = self.store.sum_totals().await?.ok_or(BillingError::EmptyLedger)?;
        Ok(sum.round_for_reporting(self.rounding))
    }

    /// Number of stored invoices
    pub async fn count(&self) -> Result<u64, BillingError> {
        Ok(self.store.count().await?)
    }

    /// Health of the backing store
    pub async fn health(&self) -> HealthCheckResult {
        self.store.health_check().await
    }
}
