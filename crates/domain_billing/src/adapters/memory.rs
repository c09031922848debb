//! In-memory invoice store
//!
//! Invoices are held in a `BTreeMap` keyed by [`InvoiceKey`], so a full scan
//! comes out in (year, month, identifier) order without sorting. A single
//! `RwLock` guards the map; `insert_new` performs its existence check and the
//! insert under one write guard.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

use core_kernel::{DomainPort, HealthCheckResult, HealthCheckable, Money, PortError};
use crate::invoice::{checked_total, Invoice, InvoiceKey};
use crate::ports::InvoiceStore;

const ADAPTER_ID: &str = "memory";

/// Process-local invoice store
#[derive(Debug, Default)]
pub struct InMemoryInvoiceStore {
    invoices: RwLock<BTreeMap<InvoiceKey, Invoice>>,
}

impl InMemoryInvoiceStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl DomainPort for InMemoryInvoiceStore {}

#[async_trait]
impl HealthCheckable for InMemoryInvoiceStore {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::healthy(ADAPTER_ID, 0)
    }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoiceStore {
    async fn insert_new(&self, invoice: Invoice) -> Result<Invoice, PortError> {
        let key = invoice.key();
        let mut invoices = self.invoices.write().await;
        if invoices.contains_key(&key) {
            return Err(PortError::conflict(format!("Invoice {} already exists", key)));
        }
        debug!(key = %key, "Storing invoice in memory");
        invoices.insert(key, invoice.clone());
        Ok(invoice)
    }

    async fn find(&self, key: &InvoiceKey) -> Result<Option<Invoice>, PortError> {
        Ok(self.invoices.read().await.get(key).cloned())
    }

    async fn list(&self) -> Result<Vec<Invoice>, PortError> {
        Ok(self.invoices.read().await.values().cloned().collect())
    }

    async fn remove(&self, key: &InvoiceKey) -> Result<bool, PortError> {
        Ok(self.invoices.write().await.remove(key).is_some())
    }

    async fn count(&self) -> Result<u64, PortError> {
        Ok(self.invoices.read().await.len() as u64)
    }

    async fn sum_totals(&self) -> Result<Option<Money>, PortError> {
        let invoices = self.invoices.read().await;
        if invoices.is_empty() {
            return Ok(None);
        }
        checked_total(invoices.values())
            .map(Some)
            .ok_or_else(|| PortError::internal("Sum of invoice totals overflowed"))
    }
}
