//! PostgreSQL Invoice Store
//!
//! Implements the billing domain's `InvoiceStore` port on top of the
//! [`ConsumptionRepository`].
//!
//! Rows are turned back into invoices by recomputing the derived amounts from
//! the stored reading. When the recomputed total differs from the persisted
//! one (for instance a row billed under an older tariff table), the stored row
//! is still returned with recomputed amounts and a warning is logged.

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use core_kernel::{
    DomainPort, HealthCheckResult, HealthCheckable, InvoiceId, Money, PortError, TaxpayerId,
};
use domain_billing::{checked_total, Invoice, InvoiceKey, InvoiceStore, Reading};

use crate::pool::DatabasePool;
use crate::repositories::consumption::{ConsumptionRepository, ConsumptionRow, NewConsumptionRow};

const ADAPTER_ID: &str = "postgres";

/// PostgreSQL-backed implementation of the InvoiceStore port
///
/// # Error Handling
///
/// Database errors are translated to `PortError` variants:
/// - unique-key violation -> `PortError::Conflict`
/// - connection failures -> `PortError::Connection`
/// - rows that no longer map to a reading -> `PortError::Transformation`
/// - other errors -> `PortError::Internal`
#[derive(Debug, Clone)]
pub struct PostgresInvoiceStore {
    repository: ConsumptionRepository,
}

impl PostgresInvoiceStore {
    /// Creates a new store over the given connection pool
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            repository: ConsumptionRepository::new(pool),
        }
    }

}

impl DomainPort for PostgresInvoiceStore {}

#[async_trait]
impl HealthCheckable for PostgresInvoiceStore {
    /// Performs a `SELECT 1` round trip
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();
        let result = self.repository.ping().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(()) => HealthCheckResult::healthy(ADAPTER_ID, latency_ms),
            Err(e) => HealthCheckResult::unhealthy(
                ADAPTER_ID,
                latency_ms,
                format!("Database error: {}", e),
            ),
        }
    }
}

#[async_trait]
impl InvoiceStore for PostgresInvoiceStore {
    #[instrument(skip(self, invoice), fields(key = %invoice.key()))]
    async fn insert_new(&self, invoice: Invoice) -> Result<Invoice, PortError> {
        let row = self.repository.insert(invoice_to_row(&invoice)).await?;
        debug!(invoice_id = %row.invoice_id, "Invoice persisted");
        Ok(invoice)
    }

    async fn find(&self, key: &InvoiceKey) -> Result<Option<Invoice>, PortError> {
        self.repository
            .find_by_key(key.identifier.as_str(), key.month, key.year)
            .await?
            .map(row_to_invoice)
            .transpose()
    }

    async fn list(&self) -> Result<Vec<Invoice>, PortError> {
        self.repository
            .list()
            .await?
            .into_iter()
            .map(row_to_invoice)
            .collect()
    }

    async fn remove(&self, key: &InvoiceKey) -> Result<bool, PortError> {
        Ok(self
            .repository
            .delete_by_key(key.identifier.as_str(), key.month, key.year)
            .await?)
    }

    async fn count(&self) -> Result<u64, PortError> {
        let count = self.repository.count().await?;
        u64::try_from(count)
            .map_err(|_| PortError::transformation(format!("Negative row count: {}", count)))
    }

    /// Sums the recomputed totals, so the result agrees with `list`
    async fn sum_totals(&self) -> Result<Option<Money>, PortError> {
        let invoices = self.list().await?;
        if invoices.is_empty() {
            return Ok(None);
        }
        checked_total(&invoices)
            .map(Some)
            .ok_or_else(|| PortError::internal("Sum of invoice totals overflowed"))
    }
}

fn invoice_to_row(invoice: &Invoice) -> NewConsumptionRow {
    NewConsumptionRow {
        invoice_id: *invoice.id().as_uuid(),
        identifier: invoice.identifier().as_str().to_string(),
        month: invoice.month(),
        year: invoice.year(),
        volume_consumed: invoice.volume_consumed(),
        tariff_flag: invoice.tariff_flag().to_string(),
        has_sewage_service: invoice.has_sewage_service(),
        billable_volume: invoice.billable_volume(),
        tariff_rate: invoice.tariff_rate().amount(),
        water_charge: invoice.water_charge().amount(),
        flag_surcharge: invoice.flag_surcharge().amount(),
        sewage_fee: invoice.sewage_fee().amount(),
        total: invoice.total().amount(),
        created_at: invoice.created_at(),
    }
}

fn row_to_invoice(row: ConsumptionRow) -> Result<Invoice, PortError> {
    let identifier = TaxpayerId::parse(row.identifier.as_str())
        .map_err(|e| PortError::transformation(format!("Invoice {}: {}", row.invoice_id, e)))?;

    let reading = Reading::new(identifier, row.month, row.year, row.volume_consumed)
        .with_flag(row.tariff_flag)
        .with_sewage(row.has_sewage_service);

    let invoice = Invoice::rehydrate(InvoiceId::from_uuid(row.invoice_id), row.created_at, reading);

    if invoice.total().amount() != row.total {
        warn!(
            invoice_id = %row.invoice_id,
            stored_total = %row.total,
            computed_total = %invoice.total().amount(),
            "Stored invoice total differs from current tariff"
        );
    }

    Ok(invoice)
}
