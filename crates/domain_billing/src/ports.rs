//! Billing Domain Ports
//!
//! The `InvoiceStore` trait is everything the ledger needs from persistence.
//! Adapters:
//!
//! - **In-memory**: [`InMemoryInvoiceStore`](crate::adapters::InMemoryInvoiceStore),
//!   for local runs and tests
//! - **PostgreSQL**: `infra_db::adapters::PostgresInvoiceStore`
//!
//! # Uniqueness
//!
//! `insert_new` is the authoritative guard for the one-invoice-per-key rule.
//! It must check and insert atomically and report an existing key as
//! `PortError::Conflict`, so two concurrent creates for the same taxpayer and
//! month cannot both succeed.

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, Money, PortError};
use crate::invoice::{Invoice, InvoiceKey};

/// Storage port for consumption invoices
#[async_trait]
pub trait InvoiceStore: DomainPort + HealthCheckable {
    /// Inserts an invoice whose key is not yet stored
    ///
    /// # Errors
    ///
    /// `PortError::Conflict` if an invoice with the same key exists.
    async fn insert_new(&self, invoice: Invoice) -> Result<Invoice, PortError>;

    /// Exact-match lookup on (identifier, month, year)
    async fn find(&self, key: &InvoiceKey) -> Result<Option<Invoice>, PortError>;

    /// Full scan, ordered by year, month, identifier
    async fn list(&self) -> Result<Vec<Invoice>, PortError>;

    /// Removes an invoice, returning whether one was stored under the key
    async fn remove(&self, key: &InvoiceKey) -> Result<bool, PortError>;

    /// Number of stored invoices
    async fn count(&self) -> Result<u64, PortError>;

    /// Sum of all invoice totals at full precision, `None` when empty
    async fn sum_totals(&self) -> Result<Option<Money>, PortError>;
}
